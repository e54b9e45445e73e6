//! View-level entry points. Each view owns a lifecycle controller; the host only
//! forwards surface events and refresh ticks.

use std::ffi::c_void;

use lifecycle::{CanvasId, SceneChange, SceneIndex, SurfaceController};

use crate::abi::{raw_id, RequestFrameFn, ViewObj, WGPU_CANVAS_INVALID};
use crate::registry::{with_registry, HostRefresh, Registry, View};

fn with_view<R>(raw: i64, f: impl FnOnce(&mut View, &mut renderer::WgpuEngine) -> R) -> Option<R> {
    let Some(id) = CanvasId::from_raw(raw) else {
        tracing::trace!(raw, "call with invalid view handle ignored");
        return None;
    };
    with_registry(|Registry { engine, views }| match views.get_mut(id) {
        Some(view) => Some(f(view, engine)),
        None => {
            tracing::debug!(view = %id, "call on freed view ignored");
            None
        }
    })
    .flatten()
}

/// Registers a view. `request_frame(user_data)` must schedule exactly one later
/// `wgpu_view_tick` call on the UI thread.
#[no_mangle]
pub extern "C" fn wgpu_view_new(request_frame: Option<RequestFrameFn>, user_data: *mut c_void) -> i64 {
    crate::init_logging();
    let Some(request_frame) = request_frame else {
        tracing::error!("wgpu_view_new called without a request_frame callback");
        return WGPU_CANVAS_INVALID;
    };
    let refresh = HostRefresh::new(request_frame, user_data);
    let id = with_registry(|registry| {
        registry
            .views
            .insert(SurfaceController::new(refresh, SceneIndex(0)))
    });
    raw_id(id)
}

/// Binds a canvas to the view's new surface and starts its frame loop.
/// Returns the canvas handle, or `WGPU_CANVAS_INVALID` if creation failed.
///
/// # Safety
///
/// The pointers in `obj` must name a live platform surface that stays valid
/// until `wgpu_view_surface_destroyed` or `wgpu_view_free`.
#[no_mangle]
pub unsafe extern "C" fn wgpu_view_surface_created(view: i64, obj: ViewObj, scene: i32) -> i64 {
    let descriptor = match obj.descriptor() {
        Ok(descriptor) => descriptor,
        Err(err) => {
            tracing::error!(error = %err, "rejected surface description");
            return WGPU_CANVAS_INVALID;
        }
    };
    let created = with_view(view, |view, engine| {
        view.on_surface_created(engine, &descriptor, SceneIndex(scene))
            .ok()
    });
    raw_id(created.flatten())
}

#[no_mangle]
pub extern "C" fn wgpu_view_surface_resized(view: i64, width: u32, height: u32) {
    with_view(view, |view, engine| view.on_surface_resized(engine, width, height));
}

#[no_mangle]
pub extern "C" fn wgpu_view_surface_destroyed(view: i64) {
    with_view(view, |view, engine| view.on_surface_destroyed(engine));
}

/// Delivers one refresh tick. Returns whether a frame was drawn.
#[no_mangle]
pub extern "C" fn wgpu_view_tick(view: i64) -> bool {
    with_view(view, |view, engine| view.on_tick(engine)).unwrap_or(false)
}

/// Switches the view's scene. Returns whether the engine was asked to switch.
#[no_mangle]
pub extern "C" fn wgpu_view_change_example(view: i64, scene: i32) -> bool {
    let change = with_view(view, |view, engine| view.change_scene(engine, SceneIndex(scene)));
    matches!(change, Some(SceneChange::Applied { .. }))
}

/// Tears down the view and any canvas it still holds. Stale handles are ignored.
#[no_mangle]
pub extern "C" fn wgpu_view_free(view: i64) {
    let Some(id) = CanvasId::from_raw(view) else {
        return;
    };
    with_registry(|Registry { engine, views }| {
        if let Some(mut view) = views.remove(id) {
            view.on_surface_destroyed(engine);
            tracing::debug!(view = %id, "view freed");
        }
    });
}
