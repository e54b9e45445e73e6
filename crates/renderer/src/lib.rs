//! wgpu render engine for lifecycle-driven canvases.
//!
//! The crate implements [`lifecycle::RenderEngine`] on top of `wgpu` and ships a
//! desktop shell that drives it from a winit window. The overall flow is:
//!
//! ```text
//!   host surface ──▶ SurfaceDescriptor ──▶ WgpuEngine::create ──▶ WgpuCanvas
//!                                                  │
//!   refresh tick ──▶ SurfaceController::on_tick ───┴─▶ enter_frame() ─▶ present
//! ```
//!
//! `WgpuEngine` keeps every canvas in a [`lifecycle::HandleTable`]; hosts only
//! ever see the [`lifecycle::CanvasId`]. Each canvas draws one of the built-in
//! WGSL scenes in [`scenes::SCENES`] and can switch between them without
//! rebuilding its surface.

mod canvas;
mod descriptor;
mod engine;
mod error;
mod gpu;
pub mod runtime;
pub mod scenes;
mod types;
mod window;

pub use canvas::WgpuCanvas;
pub use descriptor::{Platform, RawSurface, SurfaceDescriptor, SurfaceTargetError};
pub use engine::WgpuEngine;
pub use error::CanvasError;
pub use runtime::FramePacer;
pub use types::{CanvasOptions, GpuPowerPreference, StatusCallback};
pub use window::{run_desktop, ShellConfig};
