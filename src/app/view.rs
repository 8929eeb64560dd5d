// app/view.rs - View Models
//
// What the rendering layer reads: the overlay's text and styling each tick,
// and which countdown buttons the main window shows.

use crate::layout::{largest_font_size, text_extent, Anchor, WorkArea};
use crate::settings::{Color, OverlaySettings};
use crate::timer::{Phase, TimerEngine};

/// Everything needed to draw one overlay frame
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayView {
    pub text: String,
    pub background: Color,
    pub text_color: Color,
    pub font_size: f64,
    pub anchor: Anchor,
    /// Top-left of the text, in screen coordinates
    pub text_origin: (i32, i32),
}

impl OverlayView {
    /// Font sizes taller than `area` are drawn at the largest size that fits.
    pub fn new(engine: &TimerEngine, settings: &OverlaySettings, area: &WorkArea) -> Self {
        let text = engine.display_text();
        let font_size = settings.font_size.min(largest_font_size(area));
        let extent = text_extent(&text, font_size);
        Self {
            text_origin: settings.anchor.place_with_default_margin(area, extent),
            text,
            background: settings.background,
            text_color: settings.text_color,
            font_size,
            anchor: settings.anchor,
        }
    }
}

/// Visibility of the main window's countdown buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlsState {
    pub play_visible: bool,
    pub stop_visible: bool,
    pub pause_visible: bool,
    pub restart_visible: bool,
    /// Pause button currently offers "resume"
    pub pause_shows_resume: bool,
}

impl ControlsState {
    pub fn for_phase(phase: Option<Phase>) -> Self {
        let running = matches!(phase, Some(p) if p != Phase::Idle);
        Self {
            play_visible: !running,
            stop_visible: running,
            pause_visible: running,
            restart_visible: running,
            pause_shows_resume: phase == Some(Phase::Paused),
        }
    }
}
