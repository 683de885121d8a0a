//! Viewer Kernel: simulation state and the per-frame update/render driver.
//!
//! # Invariants
//! - All mutable state lives in one [`SimulationState`] owned by the frame loop.
//! - The camera direction stays unit length after every rotation.
//! - Every voxel edit dirties the whole GPU mirror; uploads are full-buffer.
//! - Within a frame, state is resolved before uploads, and uploads precede the draw.

pub mod camera;
pub mod clock;
pub mod frame;
pub mod grid;
pub mod state;
pub mod stats;

pub use camera::Camera;
pub use clock::FrameClock;
pub use frame::{FrameInput, FrameOutcome, FrameReport, step_frame};
pub use grid::VoxelGrid;
pub use state::{PlatformRequest, SimulationState};
pub use stats::FrameStats;
