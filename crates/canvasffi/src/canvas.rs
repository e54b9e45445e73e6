//! Engine-level entry points. The host owns the handle and drives frames itself.

use lifecycle::{CanvasId, RenderEngine, SceneIndex};

use crate::abi::{raw_id, ViewObj, WGPU_CANVAS_INVALID};
use crate::registry::with_registry;

/// Creates a canvas on the host surface described by `obj`, showing `scene`.
///
/// Returns `WGPU_CANVAS_INVALID` when the surface is unusable or the GPU
/// refuses it.
///
/// # Safety
///
/// The pointers in `obj` must name a live platform surface that outlives the
/// returned canvas.
#[no_mangle]
pub unsafe extern "C" fn create_wgpu_canvas(obj: ViewObj, scene: i32) -> i64 {
    crate::init_logging();
    let descriptor = match obj.descriptor() {
        Ok(descriptor) => descriptor,
        Err(err) => {
            tracing::error!(error = %err, "rejected surface description");
            return WGPU_CANVAS_INVALID;
        }
    };

    let created = with_registry(|registry| registry.engine.create(&descriptor, SceneIndex(scene)));
    match created {
        Some(Ok(id)) => {
            tracing::info!(canvas = %id, scene, "canvas created");
            raw_id(Some(id))
        }
        Some(Err(err)) => {
            tracing::error!(error = %err, "canvas creation failed");
            WGPU_CANVAS_INVALID
        }
        None => WGPU_CANVAS_INVALID,
    }
}

fn with_canvas(raw: i64, f: impl FnOnce(&mut renderer::WgpuEngine, CanvasId)) {
    let Some(id) = CanvasId::from_raw(raw) else {
        tracing::trace!(raw, "call with invalid canvas handle ignored");
        return;
    };
    with_registry(|registry| f(&mut registry.engine, id));
}

#[no_mangle]
pub extern "C" fn enter_frame(canvas: i64) {
    with_canvas(canvas, |engine, id| engine.enter_frame(id));
}

#[no_mangle]
pub extern "C" fn change_example(canvas: i64, scene: i32) {
    with_canvas(canvas, |engine, id| engine.change_example(id, SceneIndex(scene)));
}

#[no_mangle]
pub extern "C" fn resize_wgpu_canvas(canvas: i64, width: u32, height: u32) {
    with_canvas(canvas, |engine, id| engine.resize(id, width, height));
}

/// Releases the canvas. Repeated calls and stale handles are ignored.
#[no_mangle]
pub extern "C" fn drop_wgpu_canvas(canvas: i64) {
    with_canvas(canvas, |engine, id| {
        let live = engine.contains(id);
        engine.destroy(id);
        if live {
            tracing::info!(canvas = %id, "canvas dropped");
        }
    });
}
