// presentation/mod.rs - Overlay Z-Order Policy
//
// Keeps the overlay above every foreign application while it exists, yet lets
// the main window surface above the overlay whenever the user restores it.
//
// Both windows are marked always-on-top. Explicitly foregrounding the main
// window makes the platform's activation order place it above the overlay,
// which gives the wanted stacking without any priority system. Minimizing the
// main window drops its topmost flag so it yields back below the overlay.
//
// | overlay | main window       | main topmost        | overlay           |
// |---------|-------------------|---------------------|-------------------|
// | absent  | any               | false               | n/a               |
// | present | Minimized         | false               | visible, topmost  |
// | present | Normal/Maximized  | true + foregrounded | visible, topmost  |

use log::{debug, warn};

use crate::platform::WindowControl;
use crate::timer::Phase;

/// Window state of the main application window, as reported by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MainWindowState {
    #[default]
    Normal,
    Maximized,
    Minimized,
}

impl MainWindowState {
    /// State from the flags a windowing toolkit reports. Some platforms cannot
    /// tell whether a window is minimized (`None`); a known minimized window
    /// then stays minimized.
    pub fn from_flags(minimized: Option<bool>, maximized: bool, last_known: MainWindowState) -> Self {
        match minimized {
            Some(true) => MainWindowState::Minimized,
            None if last_known == MainWindowState::Minimized => MainWindowState::Minimized,
            _ if maximized => MainWindowState::Maximized,
            _ => MainWindowState::Normal,
        }
    }

    pub fn is_surfaced(&self) -> bool {
        !matches!(self, MainWindowState::Minimized)
    }
}

/// Inputs of the policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ZOrderState {
    pub main_window_state: MainWindowState,
    pub overlay_present: bool,
}

impl ZOrderState {
    /// Derive the state from the main window and the countdown phase.
    /// No engine, or an idle one, means no overlay.
    pub fn new(main_window_state: MainWindowState, phase: Option<Phase>) -> Self {
        Self {
            main_window_state,
            overlay_present: matches!(phase, Some(p) if p != Phase::Idle),
        }
    }
}

/// Window flags the host must apply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PresentationDecision {
    pub main_topmost: bool,
    /// Main window should be activated above the overlay
    pub foreground_main: bool,
    pub overlay_visible: bool,
    pub overlay_topmost: bool,
    pub overlay_click_through: bool,
}

/// Pure policy table
pub fn decide(state: ZOrderState) -> PresentationDecision {
    if !state.overlay_present {
        return PresentationDecision::default();
    }

    let surfaced = state.main_window_state.is_surfaced();
    PresentationDecision {
        main_topmost: surfaced,
        foreground_main: surfaced,
        overlay_visible: true,
        overlay_topmost: true,
        overlay_click_through: true,
    }
}

/// Applies decisions to real windows, issuing only the calls that change
/// something compared to the last applied decision.
#[derive(Debug, Default)]
pub struct PresentationController {
    applied: Option<PresentationDecision>,
}

impl PresentationController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget what was applied, so the next `apply` pushes every flag again.
    /// Used when a fresh overlay window replaces the previous one.
    pub fn invalidate(&mut self) {
        self.applied = None;
    }

    pub fn apply(
        &mut self,
        state: ZOrderState,
        main: &mut dyn WindowControl,
        overlay: Option<&mut dyn WindowControl>,
    ) -> PresentationDecision {
        let decision = decide(state);
        let previous = self.applied;

        if previous == Some(decision) {
            return decision;
        }
        debug!("Applying presentation {:?} for {:?}", decision, state);

        let changed = |pick: fn(&PresentationDecision) -> bool| {
            previous.map(|p| pick(&p)) != Some(pick(&decision))
        };

        if let Some(overlay) = overlay {
            if changed(|d| d.overlay_visible) {
                report(overlay.set_visible(decision.overlay_visible));
            }
            if changed(|d| d.overlay_topmost) {
                report(overlay.set_topmost(decision.overlay_topmost));
            }
            if changed(|d| d.overlay_click_through) {
                report(overlay.set_click_through(decision.overlay_click_through));
            }
        }

        if changed(|d| d.main_topmost) {
            report(main.set_topmost(decision.main_topmost));
        }
        if decision.foreground_main && changed(|d| d.foreground_main) {
            report(main.bring_to_front());
        }

        self.applied = Some(decision);
        decision
    }
}

/// Platform calls are best effort: log and carry on
fn report(result: crate::error::Result<()>) {
    if let Err(e) = result {
        warn!("Window flag not applied: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(main: MainWindowState, present: bool) -> ZOrderState {
        ZOrderState {
            main_window_state: main,
            overlay_present: present,
        }
    }

    #[test]
    fn no_overlay_means_nothing_topmost() {
        for main in [
            MainWindowState::Normal,
            MainWindowState::Maximized,
            MainWindowState::Minimized,
        ] {
            assert_eq!(decide(state(main, false)), PresentationDecision::default());
        }
    }

    #[test]
    fn window_flags_map_to_states() {
        use MainWindowState::*;
        assert_eq!(MainWindowState::from_flags(Some(true), false, Normal), Minimized);
        assert_eq!(MainWindowState::from_flags(Some(false), true, Minimized), Maximized);
        assert_eq!(MainWindowState::from_flags(Some(false), false, Minimized), Normal);
    }

    #[test]
    fn unknown_minimized_flag_keeps_a_minimized_window_minimized() {
        use MainWindowState::*;
        assert_eq!(MainWindowState::from_flags(None, false, Minimized), Minimized);
        assert_eq!(MainWindowState::from_flags(None, true, Minimized), Minimized);
        assert_eq!(MainWindowState::from_flags(None, false, Normal), Normal);
        assert_eq!(MainWindowState::from_flags(None, true, Normal), Maximized);

        // The policy keeps the main window below the overlay
        let d = decide(state(MainWindowState::from_flags(None, false, Minimized), true));
        assert!(!d.main_topmost && !d.foreground_main);
    }

    #[test]
    fn minimized_main_yields_to_overlay() {
        let d = decide(state(MainWindowState::Minimized, true));
        assert!(!d.main_topmost);
        assert!(!d.foreground_main);
        assert!(d.overlay_visible && d.overlay_topmost && d.overlay_click_through);
    }

    #[test]
    fn surfaced_main_goes_above_overlay() {
        for main in [MainWindowState::Normal, MainWindowState::Maximized] {
            let d = decide(state(main, true));
            assert!(d.main_topmost);
            assert!(d.foreground_main);
            assert!(d.overlay_topmost);
        }
    }

    #[test]
    fn overlay_presence_follows_phase() {
        let main = MainWindowState::Normal;
        assert!(!ZOrderState::new(main, None).overlay_present);
        assert!(!ZOrderState::new(main, Some(Phase::Idle)).overlay_present);
        assert!(ZOrderState::new(main, Some(Phase::Running)).overlay_present);
        assert!(ZOrderState::new(main, Some(Phase::Paused)).overlay_present);
        assert!(ZOrderState::new(main, Some(Phase::Expired)).overlay_present);
    }
}
