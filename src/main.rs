// main.rs - Focus Overlay Application Entry Point
//
// This is the orchestrator for the entire application. It manages:
// 1. Window creation (main dial window + countdown overlay)
// 2. Event loop handling (pointer drags on the dial, keyboard shortcuts)
// 3. Executing the commands the focus session queues, then applying the
//    z-order policy to both windows

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, error, info, warn};
use winit::application::ApplicationHandler;
use winit::event::{ElementState, MouseButton, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::WindowId;

use focus_overlay::config::{self, Cli};
use focus_overlay::constants::dial::{CONTAINER_SIZE, RING_RADIUS};
use focus_overlay::{
    FocusSession, HostCommand, OverlaySettings, Point, SettingsForm, TimerEvent, WindowControl,
};

mod window_manager;

use window_manager::{overlay_area, MainWindow, OverlayWindow};

/// Main application state
/// This holds both windows and the toolkit-independent session
struct FocusApp {
    session: FocusSession,

    /// The dial window, created on first resume
    main_window: Option<MainWindow>,

    /// Present while a countdown runs
    overlay_window: Option<OverlayWindow>,

    /// Last cursor position over the main window, in physical pixels
    cursor: Point,

    /// `--minutes` given on the command line, consumed on first resume
    auto_start: Option<i64>,

    /// Settings file re-read by the reload shortcut
    settings_path: Option<PathBuf>,

    /// Title last set on the main window
    main_title: String,
}

impl FocusApp {
    fn new(settings: OverlaySettings, settings_path: Option<PathBuf>, auto_start: Option<i64>) -> Self {
        Self {
            session: FocusSession::new(settings),
            main_window: None,
            overlay_window: None,
            cursor: Point::new(0.0, 0.0),
            auto_start,
            settings_path,
            main_title: String::new(),
        }
    }
}

impl ApplicationHandler for FocusApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        info!("Application resumed");

        if self.main_window.is_none() {
            match MainWindow::new(event_loop) {
                Ok(main) => {
                    self.main_window = Some(main);
                    self.fit_dial();
                    self.update_main_title();
                }
                Err(e) => {
                    error!("Failed to create main window: {:#}", e);
                    event_loop.exit();
                    return;
                }
            }
        }

        if let Some(minutes) = self.auto_start.take() {
            info!("Auto-starting a {} minute countdown", minutes);
            if let Err(e) = self.session.start(minutes) {
                warn!("Auto-start rejected: {}", e);
            }
        }
        self.pump(event_loop);
    }

    /// Called when the event loop is about to block waiting for events
    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let ticks = self.session.poll_ticks(Instant::now());
        if ticks > 0 {
            debug!("{} tick(s) elapsed", ticks);
            self.pump(event_loop);
        }

        // Sleep until the next countdown second, or until input arrives
        match self.session.next_tick_deadline() {
            Some(deadline) => event_loop.set_control_flow(ControlFlow::WaitUntil(deadline)),
            None => event_loop.set_control_flow(ControlFlow::Wait),
        }
    }

    /// Main event dispatcher - routes events to the window they belong to
    fn window_event(&mut self, event_loop: &ActiveEventLoop, window_id: WindowId, event: WindowEvent) {
        let is_main = self.main_window.as_ref().is_some_and(|w| w.window_id() == window_id);
        let is_overlay = self.overlay_window.as_ref().is_some_and(|w| w.window_id() == window_id);

        match event {
            WindowEvent::CloseRequested if is_overlay => {
                info!("Overlay close requested");
                self.overlay_window = None;
                self.session.overlay_closed();
            }

            WindowEvent::CloseRequested if is_main => {
                info!("Main window close requested, shutting down");
                self.session.main_closed();
            }

            WindowEvent::RedrawRequested if is_main => {
                if let Some(main) = &self.main_window {
                    main.draw(&self.session.dial);
                }
            }

            WindowEvent::RedrawRequested if is_overlay => self.session.invalidate_overlay_view(),

            WindowEvent::Resized(_) | WindowEvent::Occluded(_) | WindowEvent::Focused(_) if is_main => {
                if let Some(main) = &self.main_window {
                    let state = main.state(self.session.main_window_state());
                    self.session.main_window_state_changed(state);
                }
                self.fit_dial();
            }

            WindowEvent::KeyboardInput { event, .. } if is_main => {
                // Only handle key press events (not release)
                if event.state == ElementState::Pressed && !event.repeat {
                    if let PhysicalKey::Code(code) = event.physical_key {
                        self.handle_key(code);
                    }
                }
            }

            WindowEvent::MouseInput { state, button: MouseButton::Left, .. } if is_main => match state {
                ElementState::Pressed => self.session.dial.on_drag_start(self.cursor),
                ElementState::Released => self.session.dial.on_drag_end(),
            },

            WindowEvent::CursorMoved { position, .. } if is_main => {
                self.cursor = Point::new(position.x, position.y);
                if self.session.dial.on_drag_move(self.cursor) {
                    self.dial_changed();
                }
            }

            _ => return,
        }

        self.pump(event_loop);
    }
}

impl FocusApp {
    fn handle_key(&mut self, code: KeyCode) {
        let session = &mut self.session;
        match code {
            KeyCode::Enter | KeyCode::NumpadEnter => {
                if let Err(e) = session.start_from_dial() {
                    warn!("Start rejected: {}", e);
                }
            }
            KeyCode::Space => {
                session.toggle_pause();
            }
            KeyCode::KeyR => {
                if let Err(e) = session.restart_from_dial() {
                    warn!("Restart rejected: {}", e);
                }
            }
            KeyCode::KeyT => {
                let minutes = session.dial.minutes() as i64;
                session.set_remaining(minutes);
            }
            KeyCode::KeyS | KeyCode::Escape => {
                session.stop();
            }
            KeyCode::ArrowUp => {
                let minutes = session.dial.minutes() as i64 + 1;
                session.dial.set_minutes(minutes);
                self.dial_changed();
            }
            KeyCode::ArrowDown => {
                let minutes = session.dial.minutes() as i64 - 1;
                session.dial.set_minutes(minutes);
                self.dial_changed();
            }
            KeyCode::KeyD => {
                info!("Resetting overlay settings to defaults");
                session.apply_settings(&SettingsForm::defaults());
            }
            KeyCode::KeyL => self.reload_settings(),
            _ => {}
        }
    }

    /// Re-read the settings file and apply it on top of the current settings
    fn reload_settings(&mut self) {
        let Some(path) = self.settings_path.clone() else {
            warn!("No settings file location known");
            return;
        };
        match config::read_settings_form(&path) {
            Ok(form) => {
                let rejected = self.session.apply_settings(&form);
                info!("Settings reloaded from {} ({} field(s) ignored)", path.display(), rejected.len());
            }
            Err(e) => warn!("Settings not reloaded: {:#}", e),
        }
    }

    /// Execute queued host commands until none are left, then apply the
    /// presentation policy and refresh whatever changed
    fn pump(&mut self, event_loop: &ActiveEventLoop) {
        loop {
            let commands = self.session.take_commands();
            if commands.is_empty() {
                break;
            }
            for command in commands {
                self.execute(event_loop, command);
            }
        }

        if let Some(main) = self.main_window.as_mut() {
            let overlay = self
                .overlay_window
                .as_mut()
                .map(|o| o.control() as &mut dyn WindowControl);
            self.session.sync_presentation(main.control(), overlay);
        }

        for event in self.session.take_timer_events() {
            match event {
                TimerEvent::Expired => info!("Time is up"),
                TimerEvent::Ticked { .. } => {}
                other => debug!("Timer event: {:?}", other),
            }
        }

        self.refresh_overlay();
        self.update_main_title();
    }

    fn execute(&mut self, event_loop: &ActiveEventLoop, command: HostCommand) {
        match command {
            HostCommand::OpenOverlay { .. } => {
                let area = overlay_area(event_loop);
                match OverlayWindow::new(event_loop, area) {
                    Ok(overlay) => self.overlay_window = Some(overlay),
                    Err(e) => {
                        error!("Failed to create overlay window: {:#}", e);
                        self.session.stop();
                    }
                }
            }
            HostCommand::CloseOverlay => {
                if self.overlay_window.take().is_some() {
                    info!("Overlay window closed");
                }
            }
            HostCommand::UpdateOverlay { settings } => {
                debug!("Overlay settings changed: {:?}", settings);
            }
            HostCommand::SetMainWindowState(state) => {
                if let Some(main) = self.main_window.as_mut() {
                    if let Err(e) = main.control().set_window_state(state) {
                        warn!("Main window state not applied: {}", e);
                    }
                }
            }
            HostCommand::Exit => {
                info!("Exiting event loop");
                event_loop.exit();
            }
        }
    }

    /// Re-present the overlay when its text or styling changed
    fn refresh_overlay(&mut self) {
        if let Some(overlay) = &self.overlay_window {
            if let Some(view) = self.session.changed_overlay_view(&overlay.area()) {
                overlay.show(&view);
            }
        }
    }

    /// Keep the dial centered and proportioned to the client area
    fn fit_dial(&mut self) {
        let Some(main) = &self.main_window else {
            return;
        };
        let size = main.inner_size();
        if size.width == 0 || size.height == 0 {
            return;
        }
        let side = size.width.min(size.height) as f64;
        let dial = &mut self.session.dial;
        dial.set_center(Point::new(size.width as f64 / 2.0, size.height as f64 / 2.0));
        dial.set_radius(side * RING_RADIUS / CONTAINER_SIZE);
        main.request_redraw();
    }

    fn dial_changed(&self) {
        if let Some(main) = &self.main_window {
            main.request_redraw();
        }
    }

    /// Update main window title to show the duration and available shortcuts
    fn update_main_title(&mut self) {
        let Some(main) = &self.main_window else {
            return;
        };
        let controls = self.session.controls();
        let hints = if controls.play_visible {
            "ENTER=Start".to_string()
        } else {
            let pause = if controls.pause_shows_resume { "Resume" } else { "Pause" };
            format!("SPACE={} R=Restart T=Set S=Stop", pause)
        };
        let status = self
            .session
            .display_text()
            .map(|text| format!(" [{}]", text))
            .unwrap_or_default();

        let title = format!(
            "Focus Overlay | {} min{} | {}",
            self.session.dial.minutes(),
            status,
            hints
        );
        if title != self.main_title {
            main.set_title(&title);
            self.main_title = title;
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(cli.log_level()))
        .init();

    info!("Focus Overlay starting...");

    let settings_path = cli.settings_path();
    let settings = config::load_settings(settings_path.as_deref());

    // Create the winit event loop
    let event_loop = EventLoop::new().context("Failed to create event loop")?;
    event_loop.set_control_flow(ControlFlow::Wait);

    // Create application state
    let mut app = FocusApp::new(settings, settings_path, cli.minutes);

    // Run the event loop
    event_loop.run_app(&mut app).context("Event loop failed")?;

    info!("Focus Overlay shutting down");
    Ok(())
}
