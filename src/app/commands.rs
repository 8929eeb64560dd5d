// app/commands.rs - Requests from the session to the windowing host

use crate::presentation::MainWindowState;
use crate::settings::OverlaySettings;

/// Something only the windowing host can do
#[derive(Debug, Clone, PartialEq)]
pub enum HostCommand {
    /// Create the overlay window over the primary work area
    OpenOverlay { settings: OverlaySettings },
    /// Tear the overlay window down
    CloseOverlay,
    /// Settings changed while the overlay is live
    UpdateOverlay { settings: OverlaySettings },
    /// Minimize or restore the main window
    SetMainWindowState(MainWindowState),
    /// Leave the event loop
    Exit,
}
