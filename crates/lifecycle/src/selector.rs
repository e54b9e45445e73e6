use tracing::debug;

use crate::engine::{RenderEngine, SceneIndex};
use crate::handle::CanvasHandle;

/// Outcome of a scene selection request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneChange {
    /// No canvas is bound, so nothing was forwarded.
    Dropped,
    /// The requested scene is already showing.
    Unchanged,
    Applied { previous: SceneIndex },
}

/// Tracks the scene last forwarded to the engine for one view.
#[derive(Debug, Clone)]
pub struct ExampleSelector {
    current: SceneIndex,
}

impl ExampleSelector {
    pub fn new(initial: SceneIndex) -> Self {
        Self { current: initial }
    }

    pub fn current(&self) -> SceneIndex {
        self.current
    }

    /// Record the scene a freshly created canvas starts on.
    pub(crate) fn reset(&mut self, scene: SceneIndex) {
        self.current = scene;
    }

    pub fn select<E: RenderEngine + ?Sized>(
        &mut self,
        engine: &mut E,
        handle: &CanvasHandle,
        scene: SceneIndex,
    ) -> SceneChange {
        let Some(id) = handle.id() else {
            debug!(%scene, "scene change dropped: no canvas");
            return SceneChange::Dropped;
        };
        if scene == self.current {
            return SceneChange::Unchanged;
        }
        engine.change_example(id, scene);
        let previous = std::mem::replace(&mut self.current, scene);
        debug!(canvas = %id, %previous, %scene, "scene changed");
        SceneChange::Applied { previous }
    }
}
