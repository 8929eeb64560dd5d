// constants.rs - Application-wide Constants
//
// Centralized constants for dial geometry, timing, and default settings.

/// Circular duration dial geometry
pub mod dial {
    /// Degrees of rotation that make up one minute (360 degrees = 60 minutes)
    pub const DEGREES_PER_MINUTE: f64 = 6.0;
    /// Minutes shown on one full revolution of the ring
    pub const MINUTES_PER_REVOLUTION: u32 = 60;
    /// Minutes selected before the user touches the dial
    pub const DEFAULT_MINUTES: u32 = 30;
    /// Side of the square container the dial is drawn in
    pub const CONTAINER_SIZE: f64 = 250.0;
    /// Radius of the ring the knob travels on
    pub const RING_RADIUS: f64 = 110.0;
}

/// Countdown timing
pub mod timer {
    use std::time::Duration;

    /// Interval between two ticks
    pub const TICK_INTERVAL: Duration = Duration::from_secs(1);
    /// Seconds in one minute of duration input
    pub const SECONDS_PER_MINUTE: u64 = 60;
    /// Remaining seconds from which hours are shown
    pub const HOUR_DISPLAY_THRESHOLD: u64 = 3600;
    /// Text shown once the countdown has run out
    pub const EXPIRED_TEXT: &str = "TIME UP";
}

/// Overlay display defaults
pub mod overlay {
    /// Translucent black background (#AARRGGBB)
    pub const DEFAULT_BACKGROUND: &str = "#40000000";
    /// Mostly opaque white text (#AARRGGBB)
    pub const DEFAULT_TEXT_COLOR: &str = "#AFFFFFFF";
    /// Countdown font size in points
    pub const DEFAULT_FONT_SIZE: f64 = 100.0;
    /// Distance kept between anchored text and the work area edge
    pub const ANCHOR_MARGIN: i32 = 50;
    /// Approximate glyph width relative to font size, for text extents
    pub const GLYPH_WIDTH_RATIO: f64 = 0.6;
    /// Line height relative to font size
    pub const LINE_HEIGHT_RATIO: f64 = 1.2;
}

/// Main window dimensions
pub mod main_window {
    /// Default window width
    pub const DEFAULT_WIDTH: u32 = 360;
    /// Default window height
    pub const DEFAULT_HEIGHT: u32 = 420;
    /// Smallest usable size
    pub const MIN_SIZE: u32 = 250;
}

/// Fallback work area when the platform cannot report one
pub mod screen {
    pub const FALLBACK_WIDTH: u32 = 1920;
    pub const FALLBACK_HEIGHT: u32 = 1080;
}
