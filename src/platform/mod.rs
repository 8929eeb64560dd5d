// platform/mod.rs - Platform Abstraction Layer
//
// Native window flags (topmost, click-through, activation) sit behind the
// `WindowControl` trait so the presentation policy can drive real windows,
// or fakes in tests. OS-specific helpers live in submodules.

#[cfg(target_os = "windows")]
pub mod windows;

use crate::error::Result;
use crate::layout::WorkArea;
use crate::presentation::MainWindowState;

/// Trait for platform-specific window operations.
///
/// Every call is best effort. Callers log failures and keep going.
pub trait WindowControl {
    /// Keep the window above ordinary (non-topmost) windows
    fn set_topmost(&mut self, topmost: bool) -> Result<()>;

    /// Let pointer input pass through to the windows beneath
    fn set_click_through(&mut self, enabled: bool) -> Result<()>;

    /// Show or hide the window
    fn set_visible(&mut self, visible: bool) -> Result<()>;

    /// Activate the window so it stacks above other topmost windows
    fn bring_to_front(&mut self) -> Result<()>;

    /// Minimize, maximize, or restore the window
    fn set_window_state(&mut self, state: MainWindowState) -> Result<()>;
}

/// Work area (screen minus taskbar) of the primary monitor, when the
/// platform can report it
pub fn primary_work_area() -> Option<WorkArea> {
    #[cfg(target_os = "windows")]
    {
        windows::get_primary_work_area()
    }
    #[cfg(not(target_os = "windows"))]
    {
        None
    }
}
