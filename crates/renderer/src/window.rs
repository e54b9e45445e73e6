use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{anyhow, Result};
use canvasconfig::KeyName;
use lifecycle::{RefreshSource, SceneChange, SceneIndex, SurfaceController};
use tracing::{debug, error, info, trace};
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, Event, KeyEvent, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::keyboard::{Key, NamedKey};
use winit::window::{Window, WindowBuilder};

use crate::descriptor::SurfaceDescriptor;
use crate::engine::WgpuEngine;
use crate::runtime::FramePacer;
use crate::types::CanvasOptions;

/// Settings for the desktop shell window.
#[derive(Debug, Clone)]
pub struct ShellConfig {
    pub title: String,
    pub size: (u32, u32),
    pub initial_scene: SceneIndex,
    pub max_fps: Option<f32>,
    pub bindings: BTreeMap<KeyName, i32>,
    pub options: CanvasOptions,
}

impl ShellConfig {
    pub fn from_config(config: &canvasconfig::CanvasConfig) -> Self {
        Self {
            title: config.window.title.clone(),
            size: (config.window.size.width, config.window.size.height),
            initial_scene: SceneIndex(config.canvas.initial_scene),
            max_fps: config.max_fps(),
            bindings: config.key_bindings(),
            options: CanvasOptions::from_config(config),
        }
    }
}

/// Window redraw requests as the refresh source of a desktop view.
///
/// With a frame cap the re-armed request is parked until its deadline and handed
/// to winit from `AboutToWait`.
struct WindowRefresh {
    window: Arc<Window>,
    pacer: FramePacer,
    parked: Option<Instant>,
}

impl WindowRefresh {
    fn new(window: Arc<Window>, max_fps: Option<f32>) -> Self {
        Self {
            window,
            pacer: FramePacer::new(max_fps),
            parked: None,
        }
    }

    /// Called when winit delivers a redraw; the tick being consumed is no longer
    /// parked.
    fn delivered(&mut self, now: Instant) {
        self.parked = None;
        self.pacer.mark_frame(now);
    }

    /// Releases a parked request once its deadline passes and returns the next
    /// wake-up time, if any.
    fn poll(&mut self, now: Instant) -> Option<Instant> {
        let deadline = self.parked?;
        if now >= deadline {
            self.parked = None;
            self.window.request_redraw();
            None
        } else {
            Some(deadline)
        }
    }
}

impl RefreshSource for WindowRefresh {
    fn request_tick(&mut self) {
        let now = Instant::now();
        match self.pacer.next_deadline(now) {
            Some(deadline) => {
                trace!(
                    wait_ms = deadline.saturating_duration_since(now).as_millis() as u64,
                    "redraw parked"
                );
                self.parked = Some(deadline);
            }
            None => self.window.request_redraw(),
        }
    }

    fn cancel(&mut self) {
        self.parked = None;
        self.pacer.reset();
    }
}

fn key_name(event: &KeyEvent) -> Option<KeyName> {
    match &event.logical_key {
        Key::Character(value) => {
            let mut chars = value.chars();
            let ch = chars.next()?;
            if chars.next().is_some() || !ch.is_ascii_alphanumeric() {
                return None;
            }
            Some(KeyName::Char(ch.to_ascii_lowercase()))
        }
        Key::Named(named) => match named {
            NamedKey::Space => Some(KeyName::Space),
            NamedKey::Tab => Some(KeyName::Tab),
            NamedKey::Enter => Some(KeyName::Enter),
            NamedKey::Backspace => Some(KeyName::Backspace),
            NamedKey::ArrowLeft => Some(KeyName::Left),
            NamedKey::ArrowRight => Some(KeyName::Right),
            NamedKey::ArrowUp => Some(KeyName::Up),
            NamedKey::ArrowDown => Some(KeyName::Down),
            NamedKey::Home => Some(KeyName::Home),
            NamedKey::End => Some(KeyName::End),
            NamedKey::PageUp => Some(KeyName::PageUp),
            NamedKey::PageDown => Some(KeyName::PageDown),
            _ => None,
        },
        _ => None,
    }
}

fn create_canvas(
    view: &mut SurfaceController<WindowRefresh>,
    engine: &mut WgpuEngine,
    window: &Window,
    options: &CanvasOptions,
) {
    let size = window.inner_size();
    let descriptor =
        match SurfaceDescriptor::from_window(window, size.width, size.height, options.clone()) {
            Ok(descriptor) => descriptor,
            Err(err) => {
                error!(error = %err, "window surface unavailable");
                return;
            }
        };
    let scene = view.current_scene();
    if let Err(err) = view.on_surface_created(engine, &descriptor, scene) {
        error!(error = %err, source = ?std::error::Error::source(&err), "canvas stays inactive");
    }
}

/// Opens a window and drives one canvas from its redraw requests until the
/// window closes.
pub fn run_desktop(config: ShellConfig) -> Result<()> {
    let event_loop = EventLoop::new().map_err(|err| anyhow!("failed to create event loop: {err}"))?;
    let window = WindowBuilder::new()
        .with_title(config.title.as_str())
        .with_inner_size(PhysicalSize::new(config.size.0, config.size.1))
        .build(&event_loop)
        .map_err(|err| anyhow!("failed to create window: {err}"))?;
    let window = Arc::new(window);

    let ShellConfig {
        initial_scene,
        max_fps,
        bindings,
        options,
        ..
    } = config;

    let mut engine = WgpuEngine::new();
    let mut view = SurfaceController::new(WindowRefresh::new(window.clone(), max_fps), initial_scene);
    info!(scene = %initial_scene, ?max_fps, bindings = bindings.len(), "desktop shell starting");

    let run_result = event_loop.run(move |event, elwt| match event {
        Event::Resumed => create_canvas(&mut view, &mut engine, &window, &options),
        Event::Suspended => {
            view.on_surface_destroyed(&mut engine);
        }
        Event::WindowEvent { window_id, event } if window_id == window.id() => match event {
            WindowEvent::CloseRequested => {
                view.on_surface_destroyed(&mut engine);
                elwt.exit();
            }
            WindowEvent::Destroyed => {
                view.on_surface_destroyed(&mut engine);
            }
            WindowEvent::Resized(size) => {
                view.on_surface_resized(&mut engine, size.width, size.height);
            }
            WindowEvent::ScaleFactorChanged {
                mut inner_size_writer,
                ..
            } => {
                let _ = inner_size_writer.request_inner_size(window.inner_size());
            }
            WindowEvent::RedrawRequested => {
                view.refresh_mut().delivered(Instant::now());
                window.pre_present_notify();
                view.on_tick(&mut engine);
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if event.state != ElementState::Pressed || event.repeat {
                    return;
                }
                if matches!(event.logical_key, Key::Named(NamedKey::Escape)) {
                    view.on_surface_destroyed(&mut engine);
                    elwt.exit();
                    return;
                }
                let Some(scene) = key_name(&event).and_then(|key| bindings.get(&key)) else {
                    return;
                };
                if let SceneChange::Applied { previous } =
                    view.change_scene(&mut engine, SceneIndex(*scene))
                {
                    debug!(%previous, scene, "key selected scene");
                }
            }
            _ => {}
        },
        Event::AboutToWait => match view.refresh_mut().poll(Instant::now()) {
            Some(deadline) => elwt.set_control_flow(ControlFlow::WaitUntil(deadline)),
            None => elwt.set_control_flow(ControlFlow::Wait),
        },
        Event::LoopExiting => {
            view.on_surface_destroyed(&mut engine);
            engine.shutdown();
        }
        _ => {}
    });

    run_result.map_err(|err| anyhow!("window event loop error: {err}"))
}
