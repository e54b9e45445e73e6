use std::time::Instant;

use lifecycle::{SceneIndex, StatusCode};

use crate::descriptor::SurfaceDescriptor;
use crate::error::CanvasError;
use crate::gpu::{FrameClock, GpuContext, ScenePipeline, SceneUniforms, UniformBinding};
use crate::runtime::RenderStats;
use crate::scenes;
use crate::types::CanvasOptions;

/// Engine-side state of one live canvas.
pub struct WgpuCanvas {
    context: GpuContext,
    binding: UniformBinding,
    uniforms: SceneUniforms,
    clock: FrameClock,
    pipeline: ScenePipeline,
    scene: usize,
    stats: RenderStats,
    options: CanvasOptions,
}

impl WgpuCanvas {
    pub fn new(descriptor: &SurfaceDescriptor, scene: SceneIndex) -> Result<Self, CanvasError> {
        let context = GpuContext::new(descriptor)?;
        let binding = UniformBinding::new(&context.device);
        let (position, resolved) = scenes::resolve(scene);
        let pipeline = ScenePipeline::new(&context.device, &binding.layout, context.format(), resolved);
        let (width, height) = context.size();
        let now = Instant::now();

        tracing::info!(
            adapter = %context.adapter_name,
            scene = resolved.name,
            width,
            height,
            "canvas ready"
        );

        let canvas = Self {
            uniforms: SceneUniforms::new(width, height),
            clock: FrameClock::new(now),
            stats: RenderStats::new(descriptor.options.stats_interval, now),
            options: descriptor.options.clone(),
            context,
            binding,
            pipeline,
            scene: position,
        };
        canvas.options.notify(StatusCode::CanvasCreated);
        Ok(canvas)
    }

    /// Catalog position of the scene being drawn.
    pub fn scene(&self) -> usize {
        self.scene
    }

    pub fn size(&self) -> (u32, u32) {
        self.context.size()
    }

    pub fn enter_frame(&mut self) {
        let now = Instant::now();
        let frame = match self.context.surface.get_current_texture() {
            Ok(frame) => frame,
            Err(err) => {
                self.stats.record_skip();
                match err {
                    wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated => {
                        tracing::debug!(error = %err, "surface out of date; reconfiguring");
                        self.context.reconfigure();
                    }
                    wgpu::SurfaceError::Timeout => {
                        tracing::warn!("surface timeout; retrying next frame");
                    }
                    wgpu::SurfaceError::OutOfMemory => {
                        tracing::error!("surface out of memory; skipping frame");
                    }
                    other => {
                        tracing::warn!(error = %other, "surface error; retrying next frame");
                    }
                }
                return;
            }
        };

        self.clock.advance(&mut self.uniforms, now);
        self.binding.write(&self.context.queue, &self.uniforms);

        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .context
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("canvas frame"),
            });
        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    depth_slice: None,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                occlusion_query_set: None,
                timestamp_writes: None,
            });
            render_pass.set_pipeline(&self.pipeline.pipeline);
            render_pass.set_bind_group(0, &self.binding.bind_group, &[]);
            render_pass.draw(0..3, 0..1);
        }
        self.context.queue.submit(Some(encoder.finish()));
        frame.present();

        self.stats.record_frame();
        if let Some(report) = self.stats.poll(now) {
            tracing::info!(
                scene = self.pipeline.name,
                fps = format_args!("{:.1}", report.fps),
                frames = report.frames,
                skipped = report.skipped,
                "render stats"
            );
        }
        if self.options.report_frames {
            self.options.notify(StatusCode::FrameEntered);
        }
    }

    /// Swaps the active scene without touching the surface. Scene time restarts.
    pub fn change_example(&mut self, scene: SceneIndex) {
        let (position, resolved) = scenes::resolve(scene);
        if position != usize::try_from(scene.get()).unwrap_or(usize::MAX) {
            tracing::debug!(%scene, fallback = resolved.name, "scene index outside catalog");
        }
        self.pipeline = ScenePipeline::new(
            &self.context.device,
            &self.binding.layout,
            self.context.format(),
            resolved,
        );
        self.scene = position;
        self.clock.restart(Instant::now());
        tracing::info!(scene = resolved.name, "switched scene");
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if self.context.resize(width, height) {
            self.uniforms.set_resolution(width, height);
            tracing::debug!(width, height, "resized canvas surface");
        }
    }
}
