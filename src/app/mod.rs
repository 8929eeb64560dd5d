// app/mod.rs - Application State
//
// This module contains the toolkit-independent session that ties the dial,
// the countdown and the presentation policy together. The windowing host only
// forwards input and executes the commands the session queues.

mod commands;
mod state;
mod view;

pub use commands::HostCommand;
pub use state::*;
pub use view::{ControlsState, OverlayView};
