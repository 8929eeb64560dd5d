//! Focus Overlay - Countdown Overlay Library
//!
//! This library provides the toolkit-independent core of the focus timer:
//! the duration dial, the countdown engine, the overlay z-order policy and
//! the settings validation. The winit binary is a thin host around it.

pub mod app;
pub mod config;
pub mod constants;
pub mod dial;
pub mod error;
pub mod layout;
pub mod platform;
pub mod presentation;
pub mod render;
pub mod settings;
pub mod timer;

// Re-export commonly used types
pub use app::{ControlsState, FocusSession, HostCommand, OverlayView};
pub use dial::{DurationDial, Point};
pub use error::{FocusError, Result};
pub use layout::{Anchor, WorkArea};
pub use platform::WindowControl;
pub use presentation::{MainWindowState, PresentationController, PresentationDecision, ZOrderState};
pub use settings::{Color, OverlaySettings, SettingsApplier, SettingsForm};
pub use timer::{Phase, TickClock, TimerEngine, TimerEvent};
