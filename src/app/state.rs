// app/state.rs - Focus Session
//
// The single source of truth for the running application: the dial, the
// current settings, the countdown (present only while an overlay exists) and
// the main window state. Input handlers call into the session; the session
// answers with host commands that the windowing layer drains and executes.

use std::collections::VecDeque;
use std::time::Instant;

use log::{debug, info};

use crate::dial::DurationDial;
use crate::error::{FocusError, Result};
use crate::layout::WorkArea;
use crate::platform::WindowControl;
use crate::presentation::{MainWindowState, PresentationController, PresentationDecision, ZOrderState};
use crate::settings::{OverlaySettings, SettingsApplier, SettingsForm};
use crate::timer::{Phase, TickClock, TimerEngine, TimerEvent};

use super::commands::HostCommand;
use super::view::{ControlsState, OverlayView};

/// Main application state
#[derive(Debug)]
pub struct FocusSession {
    /// Duration picker; the host forwards pointer gestures to it
    pub dial: DurationDial,
    settings: OverlaySettings,
    applier: SettingsApplier,
    /// Present exactly while the overlay exists
    timer: Option<TimerEngine>,
    clock: TickClock,
    main_state: MainWindowState,
    presentation: PresentationController,
    commands: VecDeque<HostCommand>,
    events: Vec<TimerEvent>,
    /// Last view handed out by `changed_overlay_view`
    shown: Option<OverlayView>,
}

impl Default for FocusSession {
    fn default() -> Self {
        Self::new(OverlaySettings::default())
    }
}

impl FocusSession {
    pub fn new(settings: OverlaySettings) -> Self {
        Self {
            dial: DurationDial::default(),
            settings,
            applier: SettingsApplier,
            timer: None,
            clock: TickClock::default(),
            main_state: MainWindowState::Normal,
            presentation: PresentationController::new(),
            commands: VecDeque::new(),
            events: Vec::new(),
            shown: None,
        }
    }

    pub fn settings(&self) -> &OverlaySettings {
        &self.settings
    }

    pub fn timer(&self) -> Option<&TimerEngine> {
        self.timer.as_ref()
    }

    pub fn phase(&self) -> Option<Phase> {
        self.timer.as_ref().map(TimerEngine::phase)
    }

    pub fn overlay_present(&self) -> bool {
        self.zorder_state().overlay_present
    }

    pub fn main_window_state(&self) -> MainWindowState {
        self.main_state
    }

    pub fn zorder_state(&self) -> ZOrderState {
        ZOrderState::new(self.main_state, self.phase())
    }

    pub fn controls(&self) -> ControlsState {
        ControlsState::for_phase(self.phase())
    }

    /// Countdown text, while an overlay exists
    pub fn display_text(&self) -> Option<String> {
        self.timer.as_ref().map(TimerEngine::display_text)
    }

    pub fn overlay_view(&self, area: &WorkArea) -> Option<OverlayView> {
        self.timer
            .as_ref()
            .map(|engine| OverlayView::new(engine, &self.settings, area))
    }

    /// The overlay view, but only when it differs from the last one returned
    /// here. The host re-presents the overlay frame only on `Some`.
    pub fn changed_overlay_view(&mut self, area: &WorkArea) -> Option<OverlayView> {
        let view = self.overlay_view(area)?;
        if self.shown.as_ref() == Some(&view) {
            return None;
        }
        self.shown = Some(view.clone());
        Some(view)
    }

    /// Make the next `changed_overlay_view` return the view even if unchanged
    pub fn invalidate_overlay_view(&mut self) {
        self.shown = None;
    }

    /// Start a countdown and open the overlay.
    ///
    /// Returns `Ok(false)` when an overlay already exists; at most one
    /// countdown runs at a time.
    pub fn start(&mut self, minutes: i64) -> Result<bool> {
        if minutes <= 0 {
            return Err(FocusError::invalid_input(format!(
                "cannot start a countdown of {} minutes",
                minutes
            )));
        }
        if self.overlay_present() {
            debug!("Start ignored, overlay already present");
            return Ok(false);
        }

        let mut engine = TimerEngine::new();
        engine.start(minutes)?;
        self.timer = Some(engine);
        self.after_timer_change();

        info!("Opening overlay for {} minutes", minutes);
        self.presentation.invalidate();
        self.shown = None;
        self.commands.push_back(HostCommand::OpenOverlay {
            settings: self.settings,
        });
        self.request_main_state(MainWindowState::Minimized);
        Ok(true)
    }

    /// Start with whatever the dial currently shows
    pub fn start_from_dial(&mut self) -> Result<bool> {
        self.start(self.dial.minutes() as i64)
    }

    /// Stop the countdown and tear the overlay down
    pub fn stop(&mut self) -> bool {
        let Some(mut engine) = self.timer.take() else {
            return false;
        };
        engine.stop();
        self.events.extend(engine.drain_events());
        self.clock.disarm();

        info!("Closing overlay");
        self.commands.push_back(HostCommand::CloseOverlay);
        self.restore_if_minimized();
        true
    }

    /// Pause a running countdown, or resume a paused one
    pub fn toggle_pause(&mut self) -> bool {
        let Some(engine) = self.timer.as_mut() else {
            return false;
        };
        let toggled = if engine.is_paused() {
            engine.resume()
        } else {
            engine.pause()
        };
        self.after_timer_change();
        toggled
    }

    /// Reset the countdown to `minutes`; a paused countdown also resumes
    pub fn restart(&mut self, minutes: i64) -> Result<bool> {
        if minutes <= 0 {
            return Err(FocusError::invalid_input(format!(
                "cannot restart with {} minutes",
                minutes
            )));
        }
        let restarted = match self.timer.as_mut() {
            Some(engine) => engine.restart(minutes),
            None => false,
        };
        self.after_timer_change();
        Ok(restarted)
    }

    pub fn restart_from_dial(&mut self) -> Result<bool> {
        self.restart(self.dial.minutes() as i64)
    }

    /// Overwrite the remaining time without touching a pause
    pub fn set_remaining(&mut self, minutes: i64) -> bool {
        let updated = match self.timer.as_mut() {
            Some(engine) => engine.set_remaining(minutes),
            None => false,
        };
        self.after_timer_change();
        updated
    }

    /// Replace the settings from a form. Returns the fields that were ignored.
    pub fn apply_settings(&mut self, form: &SettingsForm) -> Vec<FocusError> {
        let applied = self.applier.apply(&self.settings, form);
        self.settings = applied.settings;
        if self.overlay_present() {
            self.commands.push_back(HostCommand::UpdateOverlay {
                settings: self.settings,
            });
        }
        applied.rejected
    }

    /// The host reports a new main window state
    pub fn main_window_state_changed(&mut self, state: MainWindowState) {
        if state != self.main_state {
            debug!("Main window {:?} -> {:?}", self.main_state, state);
        }
        self.main_state = state;
    }

    /// The overlay window went away (closed by the user or the platform)
    pub fn overlay_closed(&mut self) {
        if let Some(mut engine) = self.timer.take() {
            engine.stop();
            self.events.extend(engine.drain_events());
            self.clock.disarm();
            info!("Overlay closed externally");
        }
        self.restore_if_minimized();
    }

    /// The main window is closing; an open overlay goes with it
    pub fn main_closed(&mut self) {
        if let Some(mut engine) = self.timer.take() {
            engine.stop();
            self.events.extend(engine.drain_events());
            self.clock.disarm();
            info!("Main window closed, closing overlay");
            self.commands.push_back(HostCommand::CloseOverlay);
        }
        self.commands.push_back(HostCommand::Exit);
    }

    /// When the event loop should wake for the next tick
    pub fn next_tick_deadline(&self) -> Option<Instant> {
        self.clock.next_deadline()
    }

    /// Feed elapsed ticks into the countdown. Returns how many fired.
    pub fn poll_ticks(&mut self, now: Instant) -> u32 {
        let due = self.clock.take_due(now);
        if due == 0 {
            return 0;
        }
        if let Some(engine) = self.timer.as_mut() {
            for _ in 0..due {
                engine.tick();
            }
        }
        self.after_timer_change();
        due
    }

    /// Apply the z-order policy to the host's windows
    pub fn sync_presentation(
        &mut self,
        main: &mut dyn WindowControl,
        overlay: Option<&mut dyn WindowControl>,
    ) -> PresentationDecision {
        let state = self.zorder_state();
        self.presentation.apply(state, main, overlay)
    }

    /// Drain the queued host commands
    pub fn take_commands(&mut self) -> Vec<HostCommand> {
        self.commands.drain(..).collect()
    }

    /// Drain the countdown notifications gathered so far
    pub fn take_timer_events(&mut self) -> Vec<TimerEvent> {
        if let Some(engine) = self.timer.as_mut() {
            self.events.extend(engine.drain_events());
        }
        std::mem::take(&mut self.events)
    }

    fn after_timer_change(&mut self) {
        let ticking = self.timer.as_ref().is_some_and(TimerEngine::is_ticking);
        self.clock.sync(ticking, Instant::now());
    }

    fn request_main_state(&mut self, state: MainWindowState) {
        self.main_state = state;
        self.commands.push_back(HostCommand::SetMainWindowState(state));
    }

    fn restore_if_minimized(&mut self) {
        if self.main_state == MainWindowState::Minimized {
            self.request_main_state(MainWindowState::Normal);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_queues_overlay_and_minimizes_main() {
        let mut session = FocusSession::default();
        assert!(session.start(25).unwrap());
        assert_eq!(session.phase(), Some(Phase::Running));
        assert_eq!(session.main_window_state(), MainWindowState::Minimized);
        assert_eq!(
            session.take_commands(),
            vec![
                HostCommand::OpenOverlay {
                    settings: OverlaySettings::default()
                },
                HostCommand::SetMainWindowState(MainWindowState::Minimized),
            ]
        );
        assert!(session.next_tick_deadline().is_some());
    }

    #[test]
    fn second_start_is_a_no_op() {
        let mut session = FocusSession::default();
        session.start(5).unwrap();
        session.take_commands();
        assert!(!session.start(10).unwrap());
        assert!(session.take_commands().is_empty());
        assert_eq!(session.timer().map(TimerEngine::remaining_seconds), Some(300));
    }

    #[test]
    fn non_positive_start_is_rejected() {
        let mut session = FocusSession::default();
        assert!(session.start(0).unwrap_err().is_invalid_input());
        assert!(!session.overlay_present());
        assert!(session.take_commands().is_empty());
    }

    #[test]
    fn stop_restores_minimized_main() {
        let mut session = FocusSession::default();
        session.start(5).unwrap();
        session.take_commands();
        assert!(session.stop());
        assert_eq!(
            session.take_commands(),
            vec![
                HostCommand::CloseOverlay,
                HostCommand::SetMainWindowState(MainWindowState::Normal),
            ]
        );
        assert!(session.next_tick_deadline().is_none());
        assert!(!session.stop());
    }

    #[test]
    fn pausing_disarms_the_clock() {
        let mut session = FocusSession::default();
        session.start(5).unwrap();
        assert!(session.toggle_pause());
        assert_eq!(session.phase(), Some(Phase::Paused));
        assert!(session.next_tick_deadline().is_none());
        assert!(session.toggle_pause());
        assert_eq!(session.phase(), Some(Phase::Running));
        assert!(session.next_tick_deadline().is_some());
    }

    #[test]
    fn poll_ticks_counts_down() {
        let mut session = FocusSession::default();
        session.start(1).unwrap();
        let deadline = session.next_tick_deadline().unwrap();
        assert_eq!(session.poll_ticks(deadline), 1);
        assert_eq!(session.display_text().as_deref(), Some("00:59"));
    }
}
