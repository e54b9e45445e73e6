use crate::descriptor::SurfaceTargetError;

/// Failures while building or rebuilding engine-side canvas state.
#[derive(Debug, thiserror::Error)]
pub enum CanvasError {
    #[error(transparent)]
    Target(#[from] SurfaceTargetError),
    #[error("failed to create rendering surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),
    #[error("failed to find a suitable GPU adapter: {0}")]
    Adapter(#[from] wgpu::RequestAdapterError),
    #[error("failed to create GPU device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),
    #[error("surface is not compatible with the selected adapter")]
    IncompatibleSurface,
    #[error("GPU max texture dimension is {max}, requested surface is {width}x{height}")]
    SurfaceTooLarge { width: u32, height: u32, max: u32 },
}
