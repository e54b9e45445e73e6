use std::time::Instant;

use bytemuck::{Pod, Zeroable};

/// Mirror of the `Globals` block in `shaders/common.wgsl`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub(crate) struct SceneUniforms {
    pub resolution: [f32; 2],
    pub time: f32,
    pub delta: f32,
    pub frame: u32,
    _padding: [u32; 3],
}

impl SceneUniforms {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            resolution: [width as f32, height as f32],
            ..Self::zeroed()
        }
    }

    pub fn set_resolution(&mut self, width: u32, height: u32) {
        self.resolution = [width as f32, height as f32];
    }
}

/// Wall-clock time and frame counter fed to the scenes.
#[derive(Debug)]
pub(crate) struct FrameClock {
    start: Instant,
    last: Option<Instant>,
    frame: u32,
}

impl FrameClock {
    pub fn new(now: Instant) -> Self {
        Self {
            start: now,
            last: None,
            frame: 0,
        }
    }

    /// Restart scene time, e.g. after a scene switch.
    pub fn restart(&mut self, now: Instant) {
        *self = Self::new(now);
    }

    pub fn advance(&mut self, uniforms: &mut SceneUniforms, now: Instant) {
        let delta = self
            .last
            .map(|last| now.saturating_duration_since(last).as_secs_f32())
            .unwrap_or(0.0);
        uniforms.time = now.saturating_duration_since(self.start).as_secs_f32();
        uniforms.delta = delta;
        uniforms.frame = self.frame;
        self.last = Some(now);
        self.frame = self.frame.wrapping_add(1);
    }
}

/// Uniform buffer plus the bind group every scene pipeline shares.
pub(crate) struct UniformBinding {
    pub layout: wgpu::BindGroupLayout,
    pub bind_group: wgpu::BindGroup,
    buffer: wgpu::Buffer,
}

impl UniformBinding {
    pub fn new(device: &wgpu::Device) -> Self {
        let layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("scene uniform layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });
        let buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("scene uniforms"),
            size: std::mem::size_of::<SceneUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("scene uniform bind group"),
            layout: &layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
        });
        Self {
            layout,
            bind_group,
            buffer,
        }
    }

    pub fn write(&self, queue: &wgpu::Queue, uniforms: &SceneUniforms) {
        queue.write_buffer(&self.buffer, 0, bytemuck::bytes_of(uniforms));
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn layout_matches_the_shader_block() {
        assert_eq!(std::mem::size_of::<SceneUniforms>(), 32);
    }

    #[test]
    fn clock_counts_frames_and_deltas() {
        let start = Instant::now();
        let mut clock = FrameClock::new(start);
        let mut uniforms = SceneUniforms::new(640, 480);

        clock.advance(&mut uniforms, start);
        assert_eq!(uniforms.frame, 0);
        assert_eq!(uniforms.delta, 0.0);

        clock.advance(&mut uniforms, start + Duration::from_millis(500));
        assert_eq!(uniforms.frame, 1);
        assert!((uniforms.delta - 0.5).abs() < 1e-6);
        assert!((uniforms.time - 0.5).abs() < 1e-6);
        assert_eq!(uniforms.resolution, [640.0, 480.0]);

        clock.restart(start + Duration::from_secs(2));
        clock.advance(&mut uniforms, start + Duration::from_secs(2));
        assert_eq!(uniforms.frame, 0);
        assert_eq!(uniforms.time, 0.0);
    }
}
