use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Fixed world-up axis used for yaw and for the camera's right vector.
pub const UP: Vec3 = Vec3::Y;

/// Edge length of the voxel grid, in cells.
pub const GRID_DIM: usize = 16;

/// Total number of cells in the voxel grid.
pub const GRID_CELLS: usize = GRID_DIM * GRID_DIM * GRID_DIM;

/// A packed `0x00RRGGBB` voxel color. Zero is the empty cell.
#[repr(transparent)]
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Pod, Zeroable,
)]
pub struct VoxelColor(pub u32);

impl VoxelColor {
    pub const EMPTY: Self = Self(0);
    pub const RED: Self = Self(0x00FF_0000);
    pub const GREEN: Self = Self(0x0000_FF00);
    pub const BLUE: Self = Self(0x0000_00FF);
    /// Color written by click edits.
    pub const MARKER: Self = Self(0x00FF_00FF);

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

/// An unconstrained integer cell coordinate.
///
/// Coordinates are not clamped to the grid; [`CellCoord::linear_index`] wraps
/// each axis into range instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellCoord {
    pub x: i64,
    pub y: i64,
    pub z: i64,
}

impl CellCoord {
    pub fn new(x: i64, y: i64, z: i64) -> Self {
        Self { x, y, z }
    }

    /// Truncate a world-space position toward zero on each axis.
    pub fn from_position(pos: Vec3) -> Self {
        Self {
            x: pos.x as i64,
            y: pos.y as i64,
            z: pos.z as i64,
        }
    }

    /// Wrap each axis into `0..dim`.
    pub fn wrapped(self, dim: usize) -> Self {
        let d = dim as i64;
        Self {
            x: self.x.rem_euclid(d),
            y: self.y.rem_euclid(d),
            z: self.z.rem_euclid(d),
        }
    }

    /// Flat `x + y*dim + z*dim*dim` index of the wrapped cell, always in `0..dim³`.
    pub fn linear_index(self, dim: usize) -> usize {
        let d = dim as i64;
        let w = self.wrapped(dim);
        (w.x + w.y * d + w.z * d * d) as usize
    }
}
