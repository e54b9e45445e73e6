//! C ABI for hosting wgpu canvases inside native app shells.
//!
//! Two layers are exported, both declared in `include/wgpu_canvas.h`:
//!
//! - engine-level calls (`create_wgpu_canvas`, `enter_frame`, `change_example`,
//!   `resize_wgpu_canvas`, `drop_wgpu_canvas`) for shells that manage the
//!   surface lifecycle and frame loop themselves;
//! - view-level calls (`wgpu_view_*`) that hand surface events and refresh ticks
//!   to a [`lifecycle::SurfaceController`] living on the Rust side.
//!
//! Handles are `int64_t` values issued by arena tables. `WGPU_CANVAS_INVALID`
//! never names a live object, and calls with stale handles do nothing. All state
//! lives in thread-local storage of the UI thread; other threads see no handles.

mod abi;
mod canvas;
mod registry;
mod view;

use std::sync::Once;

use tracing_subscriber::EnvFilter;

pub use abi::{RequestFrameFn, StatusFn, ViewObj, WGPU_CANVAS_INVALID, WGPU_CANVAS_REPORT_FRAMES};
pub use canvas::{change_example, create_wgpu_canvas, drop_wgpu_canvas, enter_frame, resize_wgpu_canvas};
pub use view::{
    wgpu_view_change_example, wgpu_view_free, wgpu_view_new, wgpu_view_surface_created,
    wgpu_view_surface_destroyed, wgpu_view_surface_resized, wgpu_view_tick,
};

/// Installs a `RUST_LOG`-driven subscriber the first time the library is entered.
/// A subscriber installed by the host application wins.
pub(crate) fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .try_init();
    });
}
