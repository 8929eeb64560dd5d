//! Shared helpers for the integration tests

#![allow(dead_code)]

use focus_overlay::{FocusError, MainWindowState, WindowControl};

/// One recorded platform call
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Topmost(bool),
    ClickThrough(bool),
    Visible(bool),
    BringToFront,
    State(MainWindowState),
}

/// A `WindowControl` that records every call and can be told to fail
#[derive(Debug, Default)]
pub struct FakeWindow {
    pub calls: Vec<Call>,
    pub failing: bool,
}

impl FakeWindow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call is recorded but reported as failed
    pub fn failing() -> Self {
        Self {
            calls: Vec::new(),
            failing: true,
        }
    }

    pub fn take_calls(&mut self) -> Vec<Call> {
        std::mem::take(&mut self.calls)
    }

    fn record(&mut self, call: Call) -> focus_overlay::Result<()> {
        self.calls.push(call);
        if self.failing {
            Err(FocusError::platform("fake", "refused"))
        } else {
            Ok(())
        }
    }
}

impl WindowControl for FakeWindow {
    fn set_topmost(&mut self, topmost: bool) -> focus_overlay::Result<()> {
        self.record(Call::Topmost(topmost))
    }

    fn set_click_through(&mut self, enabled: bool) -> focus_overlay::Result<()> {
        self.record(Call::ClickThrough(enabled))
    }

    fn set_visible(&mut self, visible: bool) -> focus_overlay::Result<()> {
        self.record(Call::Visible(visible))
    }

    fn bring_to_front(&mut self) -> focus_overlay::Result<()> {
        self.record(Call::BringToFront)
    }

    fn set_window_state(&mut self, state: MainWindowState) -> focus_overlay::Result<()> {
        self.record(Call::State(state))
    }
}

/// Absolute-tolerance float comparison
pub fn approx_eq(a: f64, b: f64, eps: f64) -> bool {
    (a - b).abs() <= eps
}
