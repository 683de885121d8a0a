use anyhow::{Context, Result, anyhow};
use clap::Parser;
use kostka_common::ViewerConfig;
use kostka_input::{CaptureState, EventQueue, InputEvent, KeyboardState};
use kostka_kernel::{FrameInput, FrameOutcome, FrameStats, PlatformRequest, SimulationState, step_frame};
use kostka_render_wgpu::WgpuBackend;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{DeviceEvent, ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::PhysicalKey;
use winit::window::{CursorGrabMode, Window, WindowId};

#[derive(Parser)]
#[command(name = "kostka", about = "First-person voxel grid viewer")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// YAML file overriding speed, sensitivity, window size and vsync
    #[arg(long)]
    config: Option<PathBuf>,
}

const STATS_INTERVAL: Duration = Duration::from_secs(1);

struct ViewerApp {
    config: ViewerConfig,
    state: SimulationState,
    keyboard: KeyboardState,
    /// Events received since the last frame, drained by the next one.
    pending: EventQueue,
    started: Instant,
    stats: FrameStats,
    last_stats_log: Instant,
    window: Option<Arc<Window>>,
    backend: Option<WgpuBackend>,
}

impl ViewerApp {
    fn new(config: ViewerConfig) -> Self {
        let now = Instant::now();
        Self {
            state: SimulationState::new(&config, 0),
            config,
            keyboard: KeyboardState::new(),
            pending: EventQueue::new(CaptureState::Released),
            started: now,
            stats: FrameStats::new(120),
            last_stats_log: now,
            window: None,
            backend: None,
        }
    }

    fn run_frame(&mut self, event_loop: &ActiveEventLoop) {
        let Some(backend) = self.backend.as_mut() else {
            return;
        };

        let now_ms = self.started.elapsed().as_millis() as u64;
        let report = step_frame(
            &mut self.state,
            backend,
            FrameInput {
                now_ms,
                events: self.pending.events(),
                movement: self.keyboard.movement(),
            },
        );
        self.pending.clear(self.state.capture);

        if let Some(window) = &self.window {
            for request in &report.requests {
                if let PlatformRequest::SetRelativeMouse(enabled) = *request {
                    set_relative_mouse(window, enabled);
                }
            }
        }

        if report.outcome == FrameOutcome::Quit {
            event_loop.exit();
            return;
        }

        self.stats.record(report.delta_seconds);
        if self.last_stats_log.elapsed() >= STATS_INTERVAL {
            self.last_stats_log = Instant::now();
            tracing::debug!(
                fps = self.stats.fps(),
                avg_ms = self.stats.average_ms(),
                max_ms = self.stats.max_ms(),
                "frame stats"
            );
        }
    }
}

impl ApplicationHandler for ViewerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attrs = Window::default_attributes()
            .with_title("Kostka")
            .with_resizable(true)
            .with_inner_size(PhysicalSize::new(
                self.config.window_width,
                self.config.window_height,
            ));
        let window = match event_loop.create_window(attrs) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                tracing::error!("failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };

        match init_gpu(window.clone(), &self.config) {
            Ok(backend) => {
                let (width, height) = backend.size();
                // Report the real drawable size before the first frame.
                self.pending.push(InputEvent::Resized { width, height });
                self.backend = Some(backend);
                self.window = Some(window);

                // Frame timing starts now, not before window and device setup.
                self.started = Instant::now();
                self.last_stats_log = self.started;
                self.state.clock.restart(0);
            }
            Err(e) => {
                tracing::error!("GPU initialization failed: {e:#}");
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
            // Handled immediately: a hidden window may never get another redraw.
            WindowEvent::CloseRequested => {
                self.state.handle_event(&InputEvent::CloseRequested);
                if !self.state.is_running() {
                    event_loop.exit();
                }
            }
            WindowEvent::Resized(size) => {
                self.pending.push(InputEvent::Resized {
                    width: size.width,
                    height: size.height,
                });
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(key),
                        state: key_state,
                        repeat,
                        ..
                    },
                ..
            } => {
                let pressed = key_state == ElementState::Pressed;
                self.keyboard.set(key, pressed);
                if pressed && !repeat {
                    self.pending.push(InputEvent::KeyDown(key));
                }
            }
            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                ..
            } => {
                self.pending.push(InputEvent::MouseButtonDown);
            }
            WindowEvent::Focused(false) => {
                self.keyboard.clear();
            }
            WindowEvent::RedrawRequested => {
                self.run_frame(event_loop);
            }
            _ => {}
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: winit::event::DeviceId,
        event: DeviceEvent,
    ) {
        if let DeviceEvent::MouseMotion { delta } = event {
            self.pending.push(InputEvent::MouseMotion {
                dx: delta.0 as f32,
                dy: delta.1 as f32,
            });
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

/// Create the surface, device and backend for `window`.
fn init_gpu(window: Arc<Window>, config: &ViewerConfig) -> Result<WgpuBackend> {
    let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
        backends: wgpu::Backends::all(),
        ..Default::default()
    });

    let surface = instance
        .create_surface(window.clone())
        .context("create surface")?;

    let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
        power_preference: wgpu::PowerPreference::HighPerformance,
        compatible_surface: Some(&surface),
        force_fallback_adapter: false,
    }))
    .ok_or_else(|| anyhow!("no compatible GPU adapter"))?;

    let (device, queue) = pollster::block_on(adapter.request_device(
        &wgpu::DeviceDescriptor {
            label: Some("kostka_device"),
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::default(),
            memory_hints: Default::default(),
        },
        None,
    ))
    .context("create device")?;

    // Driver diagnostics go to the log and never stop the loop.
    device.on_uncaptured_error(Box::new(|err| {
        tracing::error!("GPU error: {err}");
    }));

    let size = window.inner_size();
    let surface_caps = surface.get_capabilities(&adapter);
    let surface_format = surface_caps
        .formats
        .iter()
        .find(|f| f.is_srgb())
        .or_else(|| surface_caps.formats.first())
        .copied()
        .ok_or_else(|| anyhow!("surface reports no supported formats"))?;

    let surface_config = wgpu::SurfaceConfiguration {
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        format: surface_format,
        width: size.width.max(1),
        height: size.height.max(1),
        present_mode: if config.vsync {
            wgpu::PresentMode::AutoVsync
        } else {
            wgpu::PresentMode::AutoNoVsync
        },
        alpha_mode: surface_caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto),
        view_formats: vec![],
        desired_maximum_frame_latency: 2,
    };

    tracing::info!(
        "GPU initialized with {} backend ({})",
        adapter.get_info().backend.to_str(),
        adapter.get_info().name
    );

    Ok(WgpuBackend::new(surface, device, queue, surface_config))
}

/// Hide and lock the cursor so motion arrives as unbounded deltas.
fn set_relative_mouse(window: &Window, enabled: bool) {
    if enabled {
        let grabbed = window
            .set_cursor_grab(CursorGrabMode::Locked)
            .or_else(|_| window.set_cursor_grab(CursorGrabMode::Confined));
        if let Err(e) = grabbed {
            tracing::warn!("cursor grab unavailable: {e}");
        }
    } else if let Err(e) = window.set_cursor_grab(CursorGrabMode::None) {
        tracing::warn!("cursor release failed: {e}");
    }
    window.set_cursor_visible(!enabled);
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .init();

    let config = match &cli.config {
        Some(path) => ViewerConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => ViewerConfig::default(),
    };

    tracing::info!("kostka starting");

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = ViewerApp::new(config);
    event_loop.run_app(&mut app)?;

    tracing::info!(edits = app.state.edit_count(), "kostka exiting");
    Ok(())
}
