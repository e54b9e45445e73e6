//! Surface lifecycle protocol between platform shells and a render engine.
//!
//! A [`SurfaceController`] sits in each view. It turns OS surface events into
//! [`RenderEngine`] calls, keeps the view's [`CanvasHandle`], drives frames from a
//! platform [`RefreshSource`] through a [`FrameScheduler`], and forwards scene
//! selections through an [`ExampleSelector`].

mod controller;
mod engine;
mod error;
mod handle;
mod scheduler;
mod selector;
mod status;

pub use controller::SurfaceController;
pub use engine::{RenderEngine, SceneIndex};
pub use error::CreationError;
pub use handle::{CanvasHandle, CanvasId, HandleTable, INVALID_RAW_HANDLE};
pub use scheduler::{FrameScheduler, RefreshSource, SchedulerState};
pub use selector::{ExampleSelector, SceneChange};
pub use status::StatusCode;
