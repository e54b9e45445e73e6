use std::fmt;

use crate::handle::CanvasId;

/// Scene selector passed through to the engine.
///
/// The engine owns the valid range and its out-of-range policy; the lifecycle
/// layer only compares indices for equality.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SceneIndex(pub i32);

impl SceneIndex {
    pub fn get(self) -> i32 {
        self.0
    }
}

impl From<i32> for SceneIndex {
    fn from(value: i32) -> Self {
        Self(value)
    }
}

impl fmt::Display for SceneIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Operations a rendering backend exposes to platform shells.
///
/// Every call after `create` names the canvas by id. Calls with an id the engine
/// no longer knows must be ignored rather than fault.
pub trait RenderEngine {
    /// Platform surface description consumed by `create`.
    type Descriptor: ?Sized;
    type Error: std::error::Error + Send + Sync + 'static;

    fn create(
        &mut self,
        descriptor: &Self::Descriptor,
        scene: SceneIndex,
    ) -> Result<CanvasId, Self::Error>;

    /// Produce exactly one frame for `id`.
    fn enter_frame(&mut self, id: CanvasId);

    fn change_example(&mut self, id: CanvasId, scene: SceneIndex);

    /// Surfaces that reconfigure on size changes override this.
    fn resize(&mut self, id: CanvasId, width: u32, height: u32) {
        let _ = (id, width, height);
    }

    /// Release everything held for `id`. Must be idempotent.
    fn destroy(&mut self, id: CanvasId);
}
