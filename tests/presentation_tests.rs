//! Z-order policy applied through fake windows

mod common;

use common::{Call, FakeWindow};
use focus_overlay::{FocusSession, MainWindowState};

fn started_session() -> FocusSession {
    let mut session = FocusSession::default();
    assert!(session.start(25).unwrap());
    session.take_commands();
    session
}

#[test]
fn minimized_main_leaves_the_overlay_on_top() {
    let mut session = started_session();
    let mut main = FakeWindow::new();
    let mut overlay = FakeWindow::new();

    let decision = session.sync_presentation(&mut main, Some(&mut overlay));

    assert!(!decision.main_topmost);
    assert_eq!(
        overlay.take_calls(),
        vec![Call::Visible(true), Call::Topmost(true), Call::ClickThrough(true)]
    );
    assert_eq!(main.take_calls(), vec![Call::Topmost(false)]);
}

#[test]
fn reapplying_the_same_state_issues_no_calls() {
    let mut session = started_session();
    let mut main = FakeWindow::new();
    let mut overlay = FakeWindow::new();

    let first = session.sync_presentation(&mut main, Some(&mut overlay));
    main.take_calls();
    overlay.take_calls();

    let second = session.sync_presentation(&mut main, Some(&mut overlay));
    assert_eq!(first, second);
    assert!(main.calls.is_empty());
    assert!(overlay.calls.is_empty());
}

#[test]
fn restoring_main_raises_it_above_the_overlay() {
    let mut session = started_session();
    let mut main = FakeWindow::new();
    let mut overlay = FakeWindow::new();
    session.sync_presentation(&mut main, Some(&mut overlay));
    main.take_calls();
    overlay.take_calls();

    session.main_window_state_changed(MainWindowState::Normal);
    let decision = session.sync_presentation(&mut main, Some(&mut overlay));
    assert!(decision.main_topmost && decision.foreground_main);
    assert_eq!(main.take_calls(), vec![Call::Topmost(true), Call::BringToFront]);
    assert!(overlay.calls.is_empty());

    session.main_window_state_changed(MainWindowState::Minimized);
    session.sync_presentation(&mut main, Some(&mut overlay));
    assert_eq!(main.take_calls(), vec![Call::Topmost(false)]);

    // Foregrounding happens again on each transition back to surfaced
    session.main_window_state_changed(MainWindowState::Maximized);
    session.sync_presentation(&mut main, Some(&mut overlay));
    assert_eq!(main.take_calls(), vec![Call::Topmost(true), Call::BringToFront]);
}

#[test]
fn closing_the_overlay_drops_main_topmost() {
    let mut session = started_session();
    let mut main = FakeWindow::new();
    let mut overlay = FakeWindow::new();
    session.main_window_state_changed(MainWindowState::Normal);
    session.sync_presentation(&mut main, Some(&mut overlay));
    main.take_calls();

    assert!(session.stop());
    let decision = session.sync_presentation(&mut main, None);
    assert!(!decision.main_topmost);
    assert!(!decision.overlay_visible);
    assert_eq!(main.take_calls(), vec![Call::Topmost(false)]);
}

#[test]
fn platform_failures_degrade_without_retry() {
    let mut session = started_session();
    let mut main = FakeWindow::failing();
    let mut overlay = FakeWindow::failing();

    let decision = session.sync_presentation(&mut main, Some(&mut overlay));
    assert!(decision.overlay_click_through);
    assert_eq!(overlay.take_calls().len(), 3);
    assert_eq!(main.take_calls().len(), 1);

    session.sync_presentation(&mut main, Some(&mut overlay));
    assert!(main.calls.is_empty() && overlay.calls.is_empty());
}

#[test]
fn a_new_overlay_gets_every_flag_again() {
    let mut session = started_session();
    let mut main = FakeWindow::new();
    let mut overlay = FakeWindow::new();
    session.sync_presentation(&mut main, Some(&mut overlay));

    session.stop();
    session.sync_presentation(&mut main, None);
    session.take_commands();

    assert!(session.start(5).unwrap());
    let mut fresh = FakeWindow::new();
    session.sync_presentation(&mut main, Some(&mut fresh));
    assert_eq!(
        fresh.take_calls(),
        vec![Call::Visible(true), Call::Topmost(true), Call::ClickThrough(true)]
    );
}
