use anyhow::Context;
use clap::{Parser, Subcommand};
use kostka_common::{GRID_CELLS, GRID_DIM, ViewerConfig};
use kostka_input::{EventQueue, InputEvent, Movement};
use kostka_kernel::{FrameInput, FrameOutcome, FrameStats, SimulationState, step_frame};
use kostka_render::{BackendCall, RecordingBackend};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "kostka-cli", about = "Headless tool for the kostka viewer")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// YAML file overriding speed, sensitivity and window size
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version, grid dimensions and effective configuration
    Info,
    /// Drive the frame loop against a recording backend
    Simulate {
        /// Number of frames to run
        #[arg(short, long, default_value = "60")]
        frames: u32,
        /// Simulated frame duration in milliseconds
        #[arg(long, default_value = "16")]
        frame_ms: u64,
        #[arg(long)]
        forward: bool,
        #[arg(long)]
        back: bool,
        #[arg(long)]
        left: bool,
        #[arg(long)]
        right: bool,
        #[arg(long)]
        up: bool,
        #[arg(long)]
        down: bool,
        /// Horizontal mouse delta applied every frame (pixels)
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        look_dx: f32,
        /// Vertical mouse delta applied every frame (pixels)
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        look_dy: f32,
        /// Voxel edits to place, one per frame after capturing the mouse
        #[arg(long, default_value = "0")]
        clicks: u32,
    },
}

fn main() -> anyhow::Result<()> {
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

    match cli.command {
        Commands::Info => {
            println!("kostka-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("grid: {GRID_DIM}^3 = {GRID_CELLS} cells");
            println!(
                "camera: speed={} sensitivity={}",
                config.speed, config.sensitivity
            );
            println!(
                "window: {}x{} vsync={}",
                config.window_width, config.window_height, config.vsync
            );
        }
        Commands::Simulate {
            frames,
            frame_ms,
            forward,
            back,
            left,
            right,
            up,
            down,
            look_dx,
            look_dy,
            clicks,
        } => {
            let movement = Movement {
                forward,
                back,
                left,
                right,
                up,
                down,
            };
            let mut state = SimulationState::new(&config, 0);
            let mut backend = RecordingBackend::new();
            let mut stats = FrameStats::new(frames as usize);
            let mut clicks_left = clicks;

            // Looking and editing both need the mouse captured first.
            let mut events = EventQueue::new(state.capture);
            if clicks > 0 || look_dx != 0.0 || look_dy != 0.0 {
                events.push(InputEvent::MouseButtonDown);
            }

            let mut rendered = 0;
            for frame in 1..=u64::from(frames) {
                if look_dx != 0.0 || look_dy != 0.0 {
                    events.push(InputEvent::MouseMotion {
                        dx: look_dx,
                        dy: look_dy,
                    });
                }
                if frame > 1 && clicks_left > 0 {
                    events.push(InputEvent::MouseButtonDown);
                    clicks_left -= 1;
                }

                let report = step_frame(
                    &mut state,
                    &mut backend,
                    FrameInput {
                        now_ms: frame * frame_ms,
                        events: events.events(),
                        movement,
                    },
                );
                events.clear(state.capture);

                stats.record(report.delta_seconds);
                match report.outcome {
                    FrameOutcome::Rendered => rendered += 1,
                    FrameOutcome::Skipped(err) => tracing::warn!(frame, "skipped: {err}"),
                    FrameOutcome::Quit => break,
                }
            }

            let cam = &state.camera;
            println!("frames: {frames} ({rendered} rendered)");
            println!("position: {:?}", cam.position);
            println!("direction: {:?}", cam.direction());
            println!("edits: {}", state.edit_count());
            println!("filled cells: {}", state.grid.filled_count());
            println!(
                "uploads: voxels={} uniforms={} draws={} presents={}",
                backend.voxel_uploads(),
                backend.uniform_uploads(),
                backend.draws(),
                backend.count(BackendCall::Present)
            );
            println!(
                "frame time: avg={:.2}ms max={:.2}ms fps={:.1}",
                stats.average_ms(),
                stats.max_ms(),
                stats.fps()
            );
        }
    }

    Ok(())
}
