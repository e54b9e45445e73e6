use lifecycle::{CanvasId, HandleTable, RenderEngine, SceneIndex};

use crate::canvas::WgpuCanvas;
use crate::descriptor::SurfaceDescriptor;
use crate::error::CanvasError;

/// wgpu-backed render engine owning every live canvas.
///
/// Calls naming an id that is not (or no longer) in the table are ignored.
#[derive(Default)]
pub struct WgpuEngine {
    canvases: HandleTable<WgpuCanvas>,
}

impl WgpuEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.canvases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.canvases.is_empty()
    }

    pub fn contains(&self, id: CanvasId) -> bool {
        self.canvases.contains(id)
    }

    pub fn canvas(&self, id: CanvasId) -> Option<&WgpuCanvas> {
        self.canvases.get(id)
    }

    /// Destroys every canvas still alive.
    pub fn shutdown(&mut self) {
        for (id, _canvas) in self.canvases.drain() {
            tracing::debug!(canvas = %id, "released at shutdown");
        }
    }
}

impl RenderEngine for WgpuEngine {
    type Descriptor = SurfaceDescriptor;
    type Error = CanvasError;

    fn create(
        &mut self,
        descriptor: &SurfaceDescriptor,
        scene: SceneIndex,
    ) -> Result<CanvasId, CanvasError> {
        let canvas = WgpuCanvas::new(descriptor, scene)?;
        Ok(self.canvases.insert(canvas))
    }

    fn enter_frame(&mut self, id: CanvasId) {
        match self.canvases.get_mut(id) {
            Some(canvas) => canvas.enter_frame(),
            None => tracing::trace!(canvas = %id, "frame for unknown canvas ignored"),
        }
    }

    fn change_example(&mut self, id: CanvasId, scene: SceneIndex) {
        match self.canvases.get_mut(id) {
            Some(canvas) => canvas.change_example(scene),
            None => tracing::debug!(canvas = %id, %scene, "scene change for unknown canvas ignored"),
        }
    }

    fn resize(&mut self, id: CanvasId, width: u32, height: u32) {
        if let Some(canvas) = self.canvases.get_mut(id) {
            canvas.resize(width, height);
        }
    }

    fn destroy(&mut self, id: CanvasId) {
        if self.canvases.remove(id).is_none() {
            tracing::debug!(canvas = %id, "destroy of unknown canvas ignored");
        }
    }
}
