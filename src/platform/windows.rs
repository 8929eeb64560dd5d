// platform/windows.rs - Windows-specific Platform Implementation
//
// Win32 calls for the overlay: topmost ordering, click-through styles,
// foreground activation, the primary monitor work area and pushing
// rasterized frames to windows through GDI.

use windows::Win32::{
    Foundation::{COLORREF, HWND, POINT, SIZE},
    Graphics::Gdi::{
        CreateCompatibleDC, CreateDIBSection, DeleteDC, DeleteObject, GetDC, GetMonitorInfoW,
        MonitorFromWindow, ReleaseDC, SelectObject, StretchDIBits, BITMAPINFO,
        BITMAPINFOHEADER, BI_RGB, BLENDFUNCTION, DIB_RGB_COLORS, MONITORINFO,
        MONITOR_DEFAULTTOPRIMARY, SRCCOPY,
    },
    UI::WindowsAndMessaging::*,
};

use crate::error::{FocusError, Result};
use crate::layout::WorkArea;
use crate::render::Frame;

/// Header for a top-down 32-bit DIB of the frame's size
fn frame_bitmap_info(frame: &Frame) -> BITMAPINFO {
    BITMAPINFO {
        bmiHeader: BITMAPINFOHEADER {
            biSize: std::mem::size_of::<BITMAPINFOHEADER>() as u32,
            biWidth: frame.width() as i32,
            biHeight: -(frame.height() as i32), // Top-down
            biPlanes: 1,
            biBitCount: 32,
            biCompression: BI_RGB.0,
            ..Default::default()
        },
        ..Default::default()
    }
}

/// Get the primary monitor's work area (excluding taskbar)
pub fn get_primary_work_area() -> Option<WorkArea> {
    unsafe {
        let hwnd = GetDesktopWindow();
        let monitor = MonitorFromWindow(hwnd, MONITOR_DEFAULTTOPRIMARY);
        let mut info = MONITORINFO {
            cbSize: std::mem::size_of::<MONITORINFO>() as u32,
            ..Default::default()
        };

        if GetMonitorInfoW(monitor, &mut info).as_bool() {
            let rc = info.rcWork;
            Some(WorkArea::new(
                rc.left,
                rc.top,
                (rc.right - rc.left) as u32,
                (rc.bottom - rc.top) as u32,
            ))
        } else {
            log::warn!("GetMonitorInfoW failed, work area unknown");
            None
        }
    }
}

/// Set window as topmost or not
pub fn set_window_topmost(hwnd: isize, topmost: bool) -> Result<()> {
    unsafe {
        let insert_after = if topmost { Some(HWND_TOPMOST) } else { Some(HWND_NOTOPMOST) };
        SetWindowPos(
            HWND(hwnd as *mut _),
            insert_after,
            0, 0, 0, 0,
            SWP_NOMOVE | SWP_NOSIZE | SWP_NOACTIVATE,
        )
        .map_err(|e| FocusError::platform("SetWindowPos(topmost)", e))
    }
}

/// Make a window click-through (transparent to mouse events)
pub fn set_window_click_through(hwnd: isize, click_through: bool) -> Result<()> {
    unsafe {
        let hwnd = HWND(hwnd as *mut _);
        let style = GetWindowLongW(hwnd, GWL_EXSTYLE);
        // Layered style is required for WS_EX_TRANSPARENT to pass clicks through
        let mut new_style = style | WS_EX_LAYERED.0 as i32;
        if click_through {
            new_style |= WS_EX_TRANSPARENT.0 as i32;
        } else {
            new_style &= !(WS_EX_TRANSPARENT.0 as i32);
        }
        if SetWindowLongW(hwnd, GWL_EXSTYLE, new_style) == 0 && style != 0 {
            return Err(FocusError::platform(
                "SetWindowLongW(GWL_EXSTYLE)",
                "extended style rejected",
            ));
        }
        Ok(())
    }
}

/// Raise a topmost window above the other topmost windows and activate it
pub fn bring_window_to_front(hwnd: isize) -> Result<()> {
    unsafe {
        let hwnd = HWND(hwnd as *mut _);
        SetWindowPos(
            hwnd,
            Some(HWND_TOPMOST),
            0, 0, 0, 0,
            SWP_NOMOVE | SWP_NOSIZE | SWP_SHOWWINDOW,
        )
        .map_err(|e| FocusError::platform("SetWindowPos(front)", e))?;

        if !SetForegroundWindow(hwnd).as_bool() {
            return Err(FocusError::platform(
                "SetForegroundWindow",
                "foreground lock held by another process",
            ));
        }
        Ok(())
    }
}

/// Replace the content of a layered window with a premultiplied ARGB frame
pub fn present_layered(hwnd: isize, frame: &Frame) -> Result<()> {
    if frame.width() == 0 || frame.height() == 0 {
        return Ok(());
    }
    unsafe {
        let hwnd = HWND(hwnd as *mut _);
        let style = GetWindowLongW(hwnd, GWL_EXSTYLE);
        if style & WS_EX_LAYERED.0 as i32 == 0 {
            SetWindowLongW(hwnd, GWL_EXSTYLE, style | WS_EX_LAYERED.0 as i32);
        }

        let screen_dc = GetDC(None);
        let mem_dc = CreateCompatibleDC(Some(screen_dc));
        let bmi = frame_bitmap_info(frame);

        let mut bits: *mut std::ffi::c_void = std::ptr::null_mut();
        let bitmap = match CreateDIBSection(Some(mem_dc), &bmi, DIB_RGB_COLORS, &mut bits, None, 0) {
            Ok(bitmap) => bitmap,
            Err(e) => {
                let _ = DeleteDC(mem_dc);
                ReleaseDC(None, screen_dc);
                return Err(FocusError::platform("CreateDIBSection", e));
            }
        };
        let old_bitmap = SelectObject(mem_dc, bitmap.into());

        // DIB memory is BGRA, the little-endian layout of ARGB words
        let pixels = std::slice::from_raw_parts_mut(bits as *mut u32, frame.pixels().len());
        pixels.copy_from_slice(frame.pixels());

        let blend = BLENDFUNCTION {
            BlendOp: 0, // AC_SRC_OVER
            BlendFlags: 0,
            SourceConstantAlpha: 255,
            AlphaFormat: 1, // AC_SRC_ALPHA
        };
        let size = SIZE {
            cx: frame.width() as i32,
            cy: frame.height() as i32,
        };
        let origin = POINT { x: 0, y: 0 };

        let result = UpdateLayeredWindow(
            hwnd,
            Some(screen_dc),
            None, // Keep the current position
            Some(&size),
            Some(mem_dc),
            Some(&origin),
            COLORREF(0),
            Some(&blend),
            ULW_ALPHA,
        )
        .map_err(|e| FocusError::platform("UpdateLayeredWindow", e));

        SelectObject(mem_dc, old_bitmap);
        let _ = DeleteObject(bitmap.into());
        let _ = DeleteDC(mem_dc);
        ReleaseDC(None, screen_dc);
        result
    }
}

/// Paint an opaque frame into the client area of an ordinary window
pub fn paint_frame(hwnd: isize, frame: &Frame) -> Result<()> {
    if frame.width() == 0 || frame.height() == 0 {
        return Ok(());
    }
    unsafe {
        let hwnd = HWND(hwnd as *mut _);
        let hdc = GetDC(Some(hwnd));
        let bmi = frame_bitmap_info(frame);
        let lines = StretchDIBits(
            hdc,
            0, 0,
            frame.width() as i32, frame.height() as i32,
            0, 0,
            frame.width() as i32, frame.height() as i32,
            Some(frame.pixels().as_ptr() as *const _),
            &bmi,
            DIB_RGB_COLORS,
            SRCCOPY,
        );
        ReleaseDC(Some(hwnd), hdc);
        if lines == 0 {
            return Err(FocusError::platform("StretchDIBits", "no scan lines copied"));
        }
        Ok(())
    }
}
