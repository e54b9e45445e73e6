use tracing::{debug, error, info, trace};

use crate::engine::{RenderEngine, SceneIndex};
use crate::error::CreationError;
use crate::handle::{CanvasHandle, CanvasId};
use crate::scheduler::{FrameScheduler, RefreshSource};
use crate::selector::{ExampleSelector, SceneChange};

/// Per-view state machine binding an OS surface to engine-owned canvas state.
///
/// The controller owns the view's handle, its frame scheduler and its scene
/// selector. The engine is borrowed per call so that one engine can serve many
/// views.
#[derive(Debug)]
pub struct SurfaceController<R: RefreshSource> {
    refresh: R,
    handle: CanvasHandle,
    scheduler: FrameScheduler,
    selector: ExampleSelector,
    creations: u64,
}

impl<R: RefreshSource> SurfaceController<R> {
    pub fn new(refresh: R, initial_scene: SceneIndex) -> Self {
        Self {
            refresh,
            handle: CanvasHandle::Invalid,
            scheduler: FrameScheduler::new(),
            selector: ExampleSelector::new(initial_scene),
            creations: 0,
        }
    }

    pub fn handle(&self) -> &CanvasHandle {
        &self.handle
    }

    pub fn canvas_id(&self) -> Option<CanvasId> {
        self.handle.id()
    }

    pub fn is_valid(&self) -> bool {
        self.handle.is_valid()
    }

    pub fn current_scene(&self) -> SceneIndex {
        self.selector.current()
    }

    pub fn scheduler(&self) -> &FrameScheduler {
        &self.scheduler
    }

    pub fn refresh(&self) -> &R {
        &self.refresh
    }

    pub fn refresh_mut(&mut self) -> &mut R {
        &mut self.refresh
    }

    /// Number of canvases this view has successfully created.
    pub fn creations(&self) -> u64 {
        self.creations
    }

    /// Binds a canvas to a newly available surface and starts the frame loop.
    ///
    /// A second call while a canvas is bound returns the existing id without
    /// touching the engine. Failures leave the view without a canvas.
    pub fn on_surface_created<E: RenderEngine>(
        &mut self,
        engine: &mut E,
        descriptor: &E::Descriptor,
        initial_scene: SceneIndex,
    ) -> Result<CanvasId, CreationError> {
        if let Some(id) = self.handle.id() {
            debug!(canvas = %id, "surface created while canvas is bound; keeping it");
            return Ok(id);
        }

        let id = engine.create(descriptor, initial_scene).map_err(|err| {
            error!(error = %err, scene = %initial_scene, "canvas creation failed");
            CreationError::new(err)
        })?;

        self.handle = CanvasHandle::Valid(id);
        self.selector.reset(initial_scene);
        self.creations += 1;
        self.scheduler.start(&mut self.refresh);
        info!(canvas = %id, scene = %initial_scene, "canvas created");
        Ok(id)
    }

    pub fn on_surface_resized<E: RenderEngine>(&mut self, engine: &mut E, width: u32, height: u32) {
        match self.handle.id() {
            Some(id) => {
                debug!(canvas = %id, width, height, "surface resized");
                engine.resize(id, width, height);
            }
            None => trace!(width, height, "resize ignored: no canvas"),
        }
    }

    /// Stops the frame loop and releases the canvas. Returns whether a canvas was
    /// bound.
    pub fn on_surface_destroyed<E: RenderEngine>(&mut self, engine: &mut E) -> bool {
        let Some(id) = self.handle.invalidate() else {
            debug!("surface destroyed without a canvas");
            return false;
        };
        self.scheduler.stop(&mut self.refresh);
        engine.destroy(id);
        info!(canvas = %id, frames = self.scheduler.frames(), "canvas destroyed");
        true
    }

    /// Handles one refresh tick. Returns whether a frame was produced.
    pub fn on_tick<E: RenderEngine>(&mut self, engine: &mut E) -> bool {
        let Some(id) = self.handle.id() else {
            trace!("tick ignored: no canvas");
            return false;
        };
        let produced = self
            .scheduler
            .run_tick(&mut self.refresh, || engine.enter_frame(id));
        if produced {
            trace!(canvas = %id, frame = self.scheduler.frames(), "frame");
        } else {
            debug!(canvas = %id, "stale tick ignored");
        }
        produced
    }

    pub fn change_scene<E: RenderEngine>(&mut self, engine: &mut E, scene: SceneIndex) -> SceneChange {
        self.selector.select(engine, &self.handle, scene)
    }
}
