//! GPU plumbing behind a canvas.
//!
//! - `context` owns the wgpu instance, surface, device and queue and knows how to
//!   reconfigure the swapchain when the host surface changes size.
//! - `uniforms` mirrors the WGSL `Globals` block and advances scene time.
//! - `pipeline` builds one render pipeline per catalog scene.

mod context;
mod pipeline;
mod uniforms;

pub(crate) use context::GpuContext;
pub(crate) use pipeline::ScenePipeline;
pub(crate) use uniforms::{FrameClock, SceneUniforms, UniformBinding};
