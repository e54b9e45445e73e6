use std::ffi::c_void;
use std::num::NonZeroIsize;
use std::ptr::NonNull;

use raw_window_handle::{
    AndroidDisplayHandle, AndroidNdkWindowHandle, AppKitDisplayHandle, AppKitWindowHandle,
    HasDisplayHandle, HasWindowHandle, RawDisplayHandle, RawWindowHandle, UiKitDisplayHandle,
    UiKitWindowHandle, WaylandDisplayHandle, WaylandWindowHandle, Win32WindowHandle,
    WindowsDisplayHandle, XlibDisplayHandle, XlibWindowHandle,
};

use crate::types::CanvasOptions;

/// Windowing systems a foreign host can hand us a surface from.
///
/// The numeric tags are shared with the C header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    UiKit,
    AppKit,
    AndroidNdk,
    Wayland,
    Xlib,
    Win32,
}

impl Platform {
    pub const fn tag(self) -> u32 {
        match self {
            Platform::UiKit => 0,
            Platform::AppKit => 1,
            Platform::AndroidNdk => 2,
            Platform::Wayland => 3,
            Platform::Xlib => 4,
            Platform::Win32 => 5,
        }
    }

    pub fn from_tag(tag: u32) -> Option<Self> {
        Some(match tag {
            0 => Platform::UiKit,
            1 => Platform::AppKit,
            2 => Platform::AndroidNdk,
            3 => Platform::Wayland,
            4 => Platform::Xlib,
            5 => Platform::Win32,
            _ => return None,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SurfaceTargetError {
    #[error("unknown platform tag {0}")]
    UnknownPlatform(u32),
    #[error("{platform:?} surface requires a non-null {field}")]
    NullPointer {
        platform: Platform,
        field: &'static str,
    },
    #[error("window handle unavailable: {0}")]
    Unavailable(#[from] raw_window_handle::HandleError),
}

/// Pointers a foreign host passes for its drawing surface.
///
/// `view` is the platform view or window (`UIView`, `NSView`, `ANativeWindow`,
/// `wl_surface`, X11 window id, `HWND`). `display` is the display connection where
/// the platform has one. `layer` carries the host's `CAMetalLayer` on Apple
/// platforms; wgpu locates the layer through the view, so it is only checked.
#[derive(Debug, Clone, Copy)]
pub struct RawSurface {
    pub platform: Platform,
    pub display: *mut c_void,
    pub view: *mut c_void,
    pub layer: *mut c_void,
}

impl RawSurface {
    pub fn handles(&self) -> Result<(RawDisplayHandle, RawWindowHandle), SurfaceTargetError> {
        let platform = self.platform;
        let non_null = |ptr: *mut c_void, field: &'static str| {
            NonNull::new(ptr).ok_or(SurfaceTargetError::NullPointer { platform, field })
        };

        match platform {
            Platform::UiKit => {
                let view = non_null(self.view, "view")?;
                if self.layer.is_null() {
                    tracing::debug!("UIKit host did not pass a metal layer; using the view's");
                }
                Ok((
                    RawDisplayHandle::UiKit(UiKitDisplayHandle::new()),
                    RawWindowHandle::UiKit(UiKitWindowHandle::new(view)),
                ))
            }
            Platform::AppKit => {
                let view = non_null(self.view, "view")?;
                Ok((
                    RawDisplayHandle::AppKit(AppKitDisplayHandle::new()),
                    RawWindowHandle::AppKit(AppKitWindowHandle::new(view)),
                ))
            }
            Platform::AndroidNdk => {
                let window = non_null(self.view, "native window")?;
                Ok((
                    RawDisplayHandle::Android(AndroidDisplayHandle::new()),
                    RawWindowHandle::AndroidNdk(AndroidNdkWindowHandle::new(window)),
                ))
            }
            Platform::Wayland => {
                let display = non_null(self.display, "display")?;
                let surface = non_null(self.view, "surface")?;
                Ok((
                    RawDisplayHandle::Wayland(WaylandDisplayHandle::new(display)),
                    RawWindowHandle::Wayland(WaylandWindowHandle::new(surface)),
                ))
            }
            Platform::Xlib => {
                let window = self.view as usize;
                if window == 0 {
                    return Err(SurfaceTargetError::NullPointer {
                        platform,
                        field: "window id",
                    });
                }
                Ok((
                    RawDisplayHandle::Xlib(XlibDisplayHandle::new(NonNull::new(self.display), 0)),
                    RawWindowHandle::Xlib(XlibWindowHandle::new(window as _)),
                ))
            }
            Platform::Win32 => {
                let hwnd = NonZeroIsize::new(self.view as isize).ok_or(
                    SurfaceTargetError::NullPointer {
                        platform,
                        field: "HWND",
                    },
                )?;
                let mut window = Win32WindowHandle::new(hwnd);
                window.hinstance = NonZeroIsize::new(self.display as isize);
                Ok((
                    RawDisplayHandle::Windows(WindowsDisplayHandle::new()),
                    RawWindowHandle::Win32(window),
                ))
            }
        }
    }
}

/// Everything the engine needs to build a canvas on a host surface.
///
/// Only read during creation. The host keeps the underlying surface alive until
/// the canvas is destroyed.
#[derive(Debug, Clone)]
pub struct SurfaceDescriptor {
    pub display: RawDisplayHandle,
    pub window: RawWindowHandle,
    pub width: u32,
    pub height: u32,
    /// Host's preferred frames per second; `0` when unknown.
    pub maximum_frames: u32,
    pub options: CanvasOptions,
}

impl SurfaceDescriptor {
    pub fn from_raw(
        surface: RawSurface,
        width: u32,
        height: u32,
        maximum_frames: u32,
        options: CanvasOptions,
    ) -> Result<Self, SurfaceTargetError> {
        let (display, window) = surface.handles()?;
        Ok(Self {
            display,
            window,
            width,
            height,
            maximum_frames,
            options,
        })
    }

    pub fn from_window<T>(
        target: &T,
        width: u32,
        height: u32,
        options: CanvasOptions,
    ) -> Result<Self, SurfaceTargetError>
    where
        T: HasDisplayHandle + HasWindowHandle,
    {
        Ok(Self {
            display: target.display_handle()?.as_raw(),
            window: target.window_handle()?.as_raw(),
            width,
            height,
            maximum_frames: 0,
            options,
        })
    }
}
