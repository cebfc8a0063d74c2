//! Particle Field
//!
//! Animated background of drifting, proximity-linked dots that shy away from
//! the pointer. One window hosts one field.

mod host;

use glam::Vec2;
use host::{HostError, TouchTracker, WindowHost};
use particle_physics::{FieldConfig, FieldOverrides};
use particle_renderer::FieldRenderer;
use particle_simulation::{DrawList, FieldHandle, InputEvent, Stage};
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Instant;
use winit::{
    application::ApplicationHandler,
    event::*,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

/// Id the window's drawing surface is registered under
const SURFACE_ID: &str = "heroParticles";

/// Pick the field preset from `--preset <name>`; the hero preset otherwise
fn preset_from_args(mut args: impl Iterator<Item = String>) -> Result<FieldConfig, HostError> {
    while let Some(arg) = args.next() {
        if arg == "--preset" {
            let name = args.next().ok_or(HostError::MissingPresetName)?;
            return FieldConfig::preset(&name).ok_or(HostError::UnknownPreset(name));
        }
    }
    Ok(FieldConfig::hero())
}

struct GpuState {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,

    renderer: FieldRenderer,
}

impl GpuState {
    async fn new(window: Arc<Window>) -> Result<Self, HostError> {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });

        let surface = instance.create_surface(window.clone())?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await?;

        log::info!("✓ Using GPU: {}", adapter.get_info().name);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("Device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: wgpu::MemoryHints::default(),
                experimental_features: wgpu::ExperimentalFeatures::default(),
                trace: wgpu::Trace::Off,
            })
            .await?;

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first())
            .copied()
            .ok_or(HostError::SurfaceNotSupported)?;
        let alpha_mode = surface_caps
            .alpha_modes
            .first()
            .copied()
            .ok_or(HostError::SurfaceNotSupported)?;

        // Vsync keeps the loop at display refresh rate
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let renderer = FieldRenderer::new(&device, config.format);
        log::info!("✓ Renderer initialized");

        Ok(Self {
            surface,
            device,
            queue,
            config,
            renderer,
        })
    }

    fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.config.width = new_size.width;
            self.config.height = new_size.height;
            self.surface.configure(&self.device, &self.config);
        }
    }

    fn render(&mut self, draw_list: &DrawList) -> Result<(), wgpu::SurfaceError> {
        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        self.renderer.render(
            &self.device,
            &self.queue,
            &view,
            draw_list,
            self.config.width,
            self.config.height,
        );

        output.present();
        Ok(())
    }
}

/// Rolling frame-time window for the title bar
struct FrameStats {
    frame_times: VecDeque<f32>,
    last_frame_time: Instant,
}

impl FrameStats {
    const WINDOW: usize = 100;

    fn new() -> Self {
        Self {
            frame_times: VecDeque::with_capacity(Self::WINDOW),
            last_frame_time: Instant::now(),
        }
    }

    /// Record a frame at `now`, returning (fps, average frame time in ms)
    fn record(&mut self, now: Instant) -> (f32, f32) {
        let frame_time = (now - self.last_frame_time).as_secs_f32() * 1000.0;
        self.last_frame_time = now;

        if self.frame_times.len() == Self::WINDOW {
            self.frame_times.pop_front();
        }
        self.frame_times.push_back(frame_time);

        let avg_frame_time = self.frame_times.iter().sum::<f32>() / self.frame_times.len() as f32;
        let fps = if avg_frame_time > 0.0 {
            1000.0 / avg_frame_time
        } else {
            0.0
        };
        (fps, avg_frame_time)
    }
}

struct App {
    overrides: FieldOverrides,
    window: Option<Arc<Window>>,
    gpu_state: Option<GpuState>,

    stage: Stage,
    field: Option<FieldHandle>,
    draw_list: DrawList,

    touches: TouchTracker,
    occluded: bool,
    stats: FrameStats,
}

impl App {
    fn new(config: FieldConfig) -> Self {
        Self {
            overrides: config.into(),
            window: None,
            gpu_state: None,
            stage: Stage::new(),
            field: None,
            draw_list: DrawList::new(),
            touches: TouchTracker::default(),
            occluded: false,
            stats: FrameStats::new(),
        }
    }

    fn start(&mut self, event_loop: &ActiveEventLoop) -> Result<(), HostError> {
        let window_attributes = Window::default_attributes()
            .with_title("Particle Field")
            .with_inner_size(winit::dpi::LogicalSize::new(1280, 720));

        let window = Arc::new(event_loop.create_window(window_attributes)?);
        self.gpu_state = Some(pollster::block_on(GpuState::new(window.clone()))?);

        let mut host = WindowHost {
            window: &window,
            surface_id: SURFACE_ID,
            occluded: self.occluded,
        };
        self.field = Some(self.stage.create(&mut host, SURFACE_ID, &self.overrides));
        self.window = Some(window);
        Ok(())
    }

    fn shutdown(&mut self, event_loop: &ActiveEventLoop) {
        if let Some(handle) = self.field.take() {
            self.stage.stop(&handle);
        }
        event_loop.exit();
    }

    fn dispatch(&mut self, event: InputEvent) {
        self.stage.dispatch(SURFACE_ID, event, Instant::now());
    }

    // A native winit window has no default scroll/zoom touch gesture, so the
    // field's "consumed" answer has nothing to cancel here and is dropped.
    fn handle_touch(&mut self, touch: Touch) {
        let position = Vec2::new(touch.location.x as f32, touch.location.y as f32);

        match touch.phase {
            TouchPhase::Started => self.touches.start(touch.id),
            TouchPhase::Moved => {
                if self.touches.is_primary(touch.id) {
                    self.dispatch(InputEvent::TouchMoved(position));
                }
            }
            TouchPhase::Ended | TouchPhase::Cancelled => {
                if self.touches.end(touch.id) {
                    self.dispatch(InputEvent::TouchEnded);
                }
            }
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let (Some(window), Some(gpu_state)) = (&self.window, &mut self.gpu_state) else {
            return;
        };

        let mut host = WindowHost {
            window,
            surface_id: SURFACE_ID,
            occluded: self.occluded,
        };
        if !self.stage.frame(&mut host, SURFACE_ID, &mut self.draw_list) {
            return;
        }

        match gpu_state.render(&self.draw_list) {
            Ok(()) => {
                let (fps, frame_time) = self.stats.record(Instant::now());
                window.set_title(&format!(
                    "Particle Field - {:.0} FPS ({:.2}ms) - {} particles",
                    fps,
                    frame_time,
                    self.stage
                        .field(SURFACE_ID)
                        .map_or(0, |field| field.particles().len())
                ));
            }
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                gpu_state.resize(window.inner_size())
            }
            Err(wgpu::SurfaceError::OutOfMemory) => event_loop.exit(),
            Err(e) => log::warn!("Render error: {:?}", e),
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            if let Err(e) = self.start(event_loop) {
                log::error!("{}", e);
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested
            | WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        ..
                    },
                ..
            } => self.shutdown(event_loop),

            WindowEvent::Resized(physical_size) => {
                if let Some(gpu_state) = &mut self.gpu_state {
                    gpu_state.resize(physical_size);
                }
                self.stage.window_resized(Instant::now());
            }

            WindowEvent::CursorMoved { position, .. } => {
                let position = Vec2::new(position.x as f32, position.y as f32);
                self.dispatch(InputEvent::PointerMoved(position));
            }

            WindowEvent::CursorLeft { .. } => {
                self.dispatch(InputEvent::PointerLeft);
            }

            WindowEvent::Touch(touch) => self.handle_touch(touch),

            WindowEvent::Occluded(occluded) => {
                self.occluded = occluded;
                log::debug!("Surface occluded: {}", occluded);
                if !occluded {
                    if let Some(window) = &self.window {
                        window.request_redraw();
                    }
                }
            }

            WindowEvent::RedrawRequested => self.redraw(event_loop),

            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            let mut host = WindowHost {
                window,
                surface_id: SURFACE_ID,
                occluded: self.occluded,
            };
            self.stage.poll(&mut host, Instant::now());
        }

        // Sleep until the next resize rebuild is due; redraws wake us otherwise
        match self.stage.next_deadline() {
            Some(deadline) => event_loop.set_control_flow(ControlFlow::WaitUntil(deadline)),
            None => event_loop.set_control_flow(ControlFlow::Wait),
        }
    }
}

fn run() -> Result<(), HostError> {
    let config = preset_from_args(std::env::args().skip(1))?;
    log::info!(
        "Starting particle field: {} particles, line distance {}",
        config.particle_count,
        config.line_distance
    );

    let event_loop = EventLoop::new()?;
    let mut app = App::new(config);
    event_loop.run_app(&mut app)?;
    Ok(())
}

fn main() {
    // Initialize logger (RUST_LOG=debug for verbose output)
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}
