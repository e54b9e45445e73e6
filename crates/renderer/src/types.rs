use std::fmt;
use std::rc::Rc;
use std::time::Duration;

use lifecycle::StatusCode;

/// GPU adapter preference when several adapters can drive the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GpuPowerPreference {
    #[default]
    High,
    Low,
}

impl From<canvasconfig::PowerPreference> for GpuPowerPreference {
    fn from(value: canvasconfig::PowerPreference) -> Self {
        match value {
            canvasconfig::PowerPreference::High => Self::High,
            canvasconfig::PowerPreference::Low => Self::Low,
        }
    }
}

impl From<GpuPowerPreference> for wgpu::PowerPreference {
    fn from(value: GpuPowerPreference) -> Self {
        match value {
            GpuPowerPreference::High => wgpu::PowerPreference::HighPerformance,
            GpuPowerPreference::Low => wgpu::PowerPreference::LowPower,
        }
    }
}

/// Host callback receiving canvas progress notifications.
#[derive(Clone)]
pub struct StatusCallback(Rc<dyn Fn(StatusCode)>);

impl StatusCallback {
    pub fn new(callback: impl Fn(StatusCode) + 'static) -> Self {
        Self(Rc::new(callback))
    }

    pub fn notify(&self, code: StatusCode) {
        (self.0)(code)
    }
}

impl fmt::Debug for StatusCallback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("StatusCallback(..)")
    }
}

/// Per-canvas behaviour that does not depend on the platform surface.
#[derive(Debug, Clone)]
pub struct CanvasOptions {
    pub power: GpuPowerPreference,
    /// Emit `FrameEntered` after every presented frame.
    pub report_frames: bool,
    /// Render stats logging interval; `None` disables it.
    pub stats_interval: Option<Duration>,
    pub status: Option<StatusCallback>,
}

impl Default for CanvasOptions {
    fn default() -> Self {
        Self {
            power: GpuPowerPreference::High,
            report_frames: false,
            stats_interval: Some(Duration::from_secs(5)),
            status: None,
        }
    }
}

impl CanvasOptions {
    pub fn from_config(config: &canvasconfig::CanvasConfig) -> Self {
        Self {
            power: config.canvas.power.into(),
            report_frames: config.canvas.report_frames,
            stats_interval: config.stats_interval(),
            status: None,
        }
    }

    pub fn with_status(mut self, status: StatusCallback) -> Self {
        self.status = Some(status);
        self
    }

    pub(crate) fn notify(&self, code: StatusCode) {
        if let Some(status) = &self.status {
            status.notify(code);
        }
    }
}
