use kostka_common::{CellCoord, GRID_CELLS, GRID_DIM, VoxelColor};
use kostka_render::FrameBackend;

/// Dense `GRID_DIM`³ voxel grid with a GPU mirror dirty flag.
///
/// Any `set` dirties the whole mirror. [`VoxelGrid::sync_if_dirty`] uploads
/// every cell, never a sub-range.
#[derive(Debug, Clone)]
pub struct VoxelGrid {
    cells: Vec<VoxelColor>,
    dirty: bool,
}

impl Default for VoxelGrid {
    fn default() -> Self {
        Self::new()
    }
}

impl VoxelGrid {
    /// All-empty grid with a clean mirror.
    pub fn new() -> Self {
        Self {
            cells: vec![VoxelColor::EMPTY; GRID_CELLS],
            dirty: false,
        }
    }

    /// Red, green and blue cells at flat indices 1, 2 and 3; dirty so the
    /// first frame uploads them.
    pub fn seeded() -> Self {
        let mut grid = Self::new();
        grid.set(CellCoord::new(1, 0, 0), VoxelColor::RED);
        grid.set(CellCoord::new(2, 0, 0), VoxelColor::GREEN);
        grid.set(CellCoord::new(3, 0, 0), VoxelColor::BLUE);
        grid
    }

    /// Write one cell. Coordinates outside the grid wrap per axis.
    pub fn set(&mut self, coord: CellCoord, color: VoxelColor) {
        let index = coord.linear_index(GRID_DIM);
        self.cells[index] = color;
        self.dirty = true;
        tracing::trace!(?coord, index, color = color.0, "voxel set");
    }

    pub fn get(&self, coord: CellCoord) -> VoxelColor {
        self.cells[coord.linear_index(GRID_DIM)]
    }

    /// Flat cell storage in upload order.
    pub fn cells(&self) -> &[VoxelColor] {
        &self.cells
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Number of non-empty cells.
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|c| !c.is_empty()).count()
    }

    /// Upload the full grid if anything changed since the last upload.
    /// Returns whether an upload happened.
    pub fn sync_if_dirty<B: FrameBackend + ?Sized>(&mut self, backend: &mut B) -> bool {
        if !self.dirty {
            return false;
        }
        backend.upload_voxels(&self.cells);
        self.dirty = false;
        tracing::debug!(cells = self.cells.len(), "voxel grid uploaded");
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kostka_render::RecordingBackend;

    #[test]
    fn new_grid_is_empty_and_clean() {
        let grid = VoxelGrid::new();
        assert_eq!(grid.cells().len(), GRID_CELLS);
        assert_eq!(grid.filled_count(), 0);
        assert!(!grid.is_dirty());
    }

    #[test]
    fn seeded_grid_has_three_colors_at_flat_indices() {
        let grid = VoxelGrid::seeded();
        assert_eq!(grid.cells()[1], VoxelColor::RED);
        assert_eq!(grid.cells()[2], VoxelColor::GREEN);
        assert_eq!(grid.cells()[3], VoxelColor::BLUE);
        assert_eq!(grid.filled_count(), 3);
        assert!(grid.is_dirty());
    }

    #[test]
    fn set_then_get() {
        let mut grid = VoxelGrid::new();
        let coord = CellCoord::new(5, 6, 7);
        grid.set(coord, VoxelColor::MARKER);
        assert_eq!(grid.get(coord), VoxelColor::MARKER);
        assert_eq!(grid.cells()[5 + 6 * 16 + 7 * 256], VoxelColor::MARKER);
    }

    #[test]
    fn out_of_range_edits_wrap() {
        let d = GRID_DIM as i64;
        let mut grid = VoxelGrid::new();
        grid.set(CellCoord::new(2 + d, 4, 9), VoxelColor::GREEN);
        assert_eq!(grid.get(CellCoord::new(2, 4, 9)), VoxelColor::GREEN);

        grid.set(CellCoord::new(-1, -1, -1), VoxelColor::BLUE);
        assert_eq!(grid.get(CellCoord::new(d - 1, d - 1, d - 1)), VoxelColor::BLUE);
        assert_eq!(grid.cells()[GRID_CELLS - 1], VoxelColor::BLUE);
    }

    #[test]
    fn sync_is_noop_until_first_set() {
        let mut grid = VoxelGrid::new();
        let mut backend = RecordingBackend::new();
        assert!(!grid.sync_if_dirty(&mut backend));
        assert!(!grid.sync_if_dirty(&mut backend));
        assert_eq!(backend.voxel_uploads(), 0);
    }

    #[test]
    fn one_upload_per_dirty_period() {
        let mut grid = VoxelGrid::new();
        let mut backend = RecordingBackend::new();

        grid.set(CellCoord::new(0, 0, 0), VoxelColor::RED);
        grid.set(CellCoord::new(1, 0, 0), VoxelColor::RED);
        assert!(grid.sync_if_dirty(&mut backend));
        assert!(!grid.is_dirty());
        assert!(!grid.sync_if_dirty(&mut backend));
        assert_eq!(backend.voxel_uploads(), 1);
        assert_eq!(backend.voxels().len(), GRID_CELLS);
        assert_eq!(backend.voxels()[1], VoxelColor::RED);

        grid.set(CellCoord::new(2, 0, 0), VoxelColor::BLUE);
        assert!(grid.sync_if_dirty(&mut backend));
        assert_eq!(backend.voxel_uploads(), 2);
    }

    #[test]
    fn overwrite_with_same_color_still_dirties() {
        let mut grid = VoxelGrid::new();
        grid.set(CellCoord::new(0, 0, 0), VoxelColor::EMPTY);
        assert!(grid.is_dirty());
    }
}
