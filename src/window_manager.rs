// window_manager.rs - Window Management for the Main and Overlay Windows
//
// This module manages two types of windows:
// 1. MainWindow: a normal decorated window holding the duration dial
// 2. OverlayWindow: a frameless, transparent, always-on-top window covering
//    the primary work area and showing the countdown
//
// Both implement `WindowControl` through `NativeWindow`, so the presentation
// policy in the library can drive them. On Windows the flags and the pixels
// go through Win32 directly; elsewhere winit's portable calls are used.

use anyhow::{Context, Result};
use log::{info, warn};
use winit::{
    dpi::{PhysicalPosition, PhysicalSize},
    event_loop::ActiveEventLoop,
    window::{Window, WindowAttributes, WindowId, WindowLevel},
};

use focus_overlay::constants::{main_window, screen};
use focus_overlay::dial::DurationDial;
use focus_overlay::error::FocusError;
use focus_overlay::platform::{self, WindowControl};
use focus_overlay::render;
use focus_overlay::{MainWindowState, OverlayView, WorkArea};

#[cfg(windows)]
use raw_window_handle::{HasWindowHandle, RawWindowHandle};

/// Work area the overlay covers: the native report, the primary monitor, or
/// a fixed fallback, in that order
pub fn overlay_area(event_loop: &ActiveEventLoop) -> WorkArea {
    if let Some(area) = platform::primary_work_area() {
        return area;
    }
    if let Some(monitor) = event_loop.primary_monitor() {
        let position = monitor.position();
        let size = monitor.size();
        return WorkArea::new(position.x, position.y, size.width, size.height);
    }
    warn!("Primary monitor unknown, assuming {}x{}", screen::FALLBACK_WIDTH, screen::FALLBACK_HEIGHT);
    WorkArea::new(0, 0, screen::FALLBACK_WIDTH, screen::FALLBACK_HEIGHT)
}

/// A winit window with the native flag operations attached
pub struct NativeWindow {
    window: Window,
}

impl NativeWindow {
    fn new(window: Window) -> Self {
        Self { window }
    }

    /// Win32 handle of the window
    #[cfg(windows)]
    fn hwnd(&self) -> focus_overlay::Result<isize> {
        let handle = self
            .window
            .window_handle()
            .map_err(|e| FocusError::platform("window_handle", e))?;
        match handle.as_raw() {
            RawWindowHandle::Win32(win32) => Ok(win32.hwnd.get()),
            _ => Err(FocusError::platform("window_handle", "not a Win32 window")),
        }
    }

    /// Minimize/maximize state as winit reports it, falling back on
    /// `last_known` where the platform cannot report minimization
    pub fn state(&self, last_known: MainWindowState) -> MainWindowState {
        MainWindowState::from_flags(self.window.is_minimized(), self.window.is_maximized(), last_known)
    }
}

impl WindowControl for NativeWindow {
    #[cfg(windows)]
    fn set_topmost(&mut self, topmost: bool) -> focus_overlay::Result<()> {
        platform::windows::set_window_topmost(self.hwnd()?, topmost)
    }

    #[cfg(not(windows))]
    fn set_topmost(&mut self, topmost: bool) -> focus_overlay::Result<()> {
        let level = if topmost { WindowLevel::AlwaysOnTop } else { WindowLevel::Normal };
        self.window.set_window_level(level);
        Ok(())
    }

    #[cfg(windows)]
    fn set_click_through(&mut self, enabled: bool) -> focus_overlay::Result<()> {
        platform::windows::set_window_click_through(self.hwnd()?, enabled)
    }

    #[cfg(not(windows))]
    fn set_click_through(&mut self, enabled: bool) -> focus_overlay::Result<()> {
        self.window
            .set_cursor_hittest(!enabled)
            .map_err(|e| FocusError::platform("set_cursor_hittest", e))
    }

    fn set_visible(&mut self, visible: bool) -> focus_overlay::Result<()> {
        self.window.set_visible(visible);
        Ok(())
    }

    #[cfg(windows)]
    fn bring_to_front(&mut self) -> focus_overlay::Result<()> {
        platform::windows::bring_window_to_front(self.hwnd()?)
    }

    #[cfg(not(windows))]
    fn bring_to_front(&mut self) -> focus_overlay::Result<()> {
        self.window.focus_window();
        Ok(())
    }

    fn set_window_state(&mut self, state: MainWindowState) -> focus_overlay::Result<()> {
        match state {
            MainWindowState::Minimized => self.window.set_minimized(true),
            MainWindowState::Maximized => {
                self.window.set_minimized(false);
                self.window.set_maximized(true);
            }
            MainWindowState::Normal => {
                self.window.set_minimized(false);
                self.window.set_maximized(false);
            }
        }
        Ok(())
    }
}

/// Wrapper for the main (dial) window
pub struct MainWindow {
    native: NativeWindow,
}

impl MainWindow {
    pub fn new(event_loop: &ActiveEventLoop) -> Result<Self> {
        info!("Creating main window");

        let attributes = WindowAttributes::default()
            .with_title("Focus Overlay")
            .with_inner_size(PhysicalSize::new(main_window::DEFAULT_WIDTH, main_window::DEFAULT_HEIGHT))
            .with_min_inner_size(PhysicalSize::new(main_window::MIN_SIZE, main_window::MIN_SIZE))
            .with_resizable(true);

        let window = event_loop
            .create_window(attributes)
            .context("Failed to create main window")?;

        info!("Main window created with ID: {:?}", window.id());
        Ok(Self {
            native: NativeWindow::new(window),
        })
    }

    pub fn window_id(&self) -> WindowId {
        self.native.window.id()
    }

    pub fn control(&mut self) -> &mut NativeWindow {
        &mut self.native
    }

    pub fn state(&self, last_known: MainWindowState) -> MainWindowState {
        self.native.state(last_known)
    }

    pub fn inner_size(&self) -> PhysicalSize<u32> {
        self.native.window.inner_size()
    }

    pub fn set_title(&self, title: &str) {
        self.native.window.set_title(title);
    }

    pub fn request_redraw(&self) {
        self.native.window.request_redraw();
    }

    /// Paint the dial into the client area
    #[cfg(windows)]
    pub fn draw(&self, dial: &DurationDial) {
        let size = self.inner_size();
        let frame = render::dial_frame(dial, size.width, size.height);
        if let Err(e) = self.native.hwnd().and_then(|hwnd| platform::windows::paint_frame(hwnd, &frame)) {
            warn!("Dial not painted: {}", e);
        }
    }

    #[cfg(not(windows))]
    pub fn draw(&self, dial: &DurationDial) {
        let size = self.inner_size();
        let frame = render::dial_frame(dial, size.width, size.height);
        log::trace!("Dial frame {}x{} has no native surface", frame.width(), frame.height());
    }
}

/// Wrapper for the countdown overlay window
pub struct OverlayWindow {
    native: NativeWindow,
    area: WorkArea,
}

impl OverlayWindow {
    /// Create the overlay covering `area`. It starts hidden; the presentation
    /// policy shows it and applies topmost and click-through.
    pub fn new(event_loop: &ActiveEventLoop, area: WorkArea) -> Result<Self> {
        info!("Creating overlay window over {:?}", area);

        let attributes = WindowAttributes::default()
            .with_title("Focus Overlay - Countdown")
            .with_position(PhysicalPosition::new(area.x, area.y))
            .with_inner_size(PhysicalSize::new(area.width.max(1), area.height.max(1)))
            .with_resizable(false)
            .with_decorations(false) // No title bar, the overlay is pure content
            .with_transparent(true)
            .with_visible(false)
            .with_window_level(WindowLevel::AlwaysOnTop);

        let window = event_loop
            .create_window(attributes)
            .context("Failed to create overlay window")?;

        info!("Overlay window created with ID: {:?}", window.id());

        #[cfg(not(windows))]
        warn!("No layered window support here, the countdown shows in the overlay title only");

        Ok(Self {
            native: NativeWindow::new(window),
            area,
        })
    }

    pub fn window_id(&self) -> WindowId {
        self.native.window.id()
    }

    pub fn area(&self) -> WorkArea {
        self.area
    }

    pub fn control(&mut self) -> &mut NativeWindow {
        &mut self.native
    }

    /// Render one overlay frame
    pub fn show(&self, view: &OverlayView) {
        self.native.window.set_title(&view.text);
        self.present(view);
    }

    #[cfg(windows)]
    fn present(&self, view: &OverlayView) {
        let frame = render::overlay_frame(view, &self.area);
        if let Err(e) = self.native.hwnd().and_then(|hwnd| platform::windows::present_layered(hwnd, &frame)) {
            warn!("Overlay frame not presented: {}", e);
        }
    }

    #[cfg(not(windows))]
    fn present(&self, _view: &OverlayView) {}
}
