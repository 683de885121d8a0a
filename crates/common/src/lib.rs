//! Shared types for the kostka voxel viewer.
//!
//! # Invariants
//! - The voxel grid is a fixed `GRID_DIM`³ cube for the whole process lifetime.
//! - A packed color of zero always means "empty".

pub mod config;
pub mod types;

pub use config::{ConfigError, ViewerConfig};
pub use types::{CellCoord, GRID_CELLS, GRID_DIM, UP, VoxelColor};
