use std::ffi::c_void;

use lifecycle::{CanvasId, INVALID_RAW_HANDLE};
use renderer::{CanvasOptions, Platform, RawSurface, StatusCallback, SurfaceDescriptor, SurfaceTargetError};

/// Returned instead of a handle when no canvas or view could be made.
pub const WGPU_CANVAS_INVALID: i64 = INVALID_RAW_HANDLE;

/// `view_obj_t.flags` bit asking for a `FrameEntered` status after every frame.
pub const WGPU_CANVAS_REPORT_FRAMES: u32 = 1;

pub type StatusFn = extern "C" fn(status: i32);
pub type RequestFrameFn = extern "C" fn(user_data: *mut c_void);

/// Host surface description, laid out as `view_obj_t` in `wgpu_canvas.h`.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct ViewObj {
    pub platform: u32,
    pub display: *mut c_void,
    pub view: *mut c_void,
    pub layer: *mut c_void,
    pub width: u32,
    pub height: u32,
    pub maximum_frames: i32,
    pub flags: u32,
    pub callback: Option<StatusFn>,
}

impl ViewObj {
    pub(crate) fn descriptor(&self) -> Result<SurfaceDescriptor, SurfaceTargetError> {
        let platform =
            Platform::from_tag(self.platform).ok_or(SurfaceTargetError::UnknownPlatform(self.platform))?;
        let surface = RawSurface {
            platform,
            display: self.display,
            view: self.view,
            layer: self.layer,
        };

        let mut options = CanvasOptions {
            report_frames: self.flags & WGPU_CANVAS_REPORT_FRAMES != 0,
            ..CanvasOptions::default()
        };
        if let Some(callback) = self.callback {
            options = options.with_status(StatusCallback::new(move |code| callback(code.code())));
        }

        SurfaceDescriptor::from_raw(
            surface,
            self.width,
            self.height,
            u32::try_from(self.maximum_frames).unwrap_or(0),
            options,
        )
    }
}

pub(crate) fn raw_id(id: Option<CanvasId>) -> i64 {
    id.map_or(WGPU_CANVAS_INVALID, CanvasId::to_raw)
}
