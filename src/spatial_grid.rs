/*
 * Spatial Grid Module
 *
 * This module defines the SpatialGrid struct for neighbor lookups.
 * It divides the arena into square cells at least as wide as the neighbor
 * radius, so every agent within that radius sits in the query cell or one of
 * its eight neighbors. Candidates come back sorted by slot index, which keeps
 * the order the linear scan would use and so leaves the flocking sums
 * unchanged.
 *
 * Very large arenas get coarser cells so the cell count stays under
 * MAX_CELLS. A wider cell still holds every neighbor within the radius.
 */

use glam::Vec2;

pub const MAX_CELLS: usize = 1 << 16;

pub struct SpatialGrid {
    pub cell_size: f32,
    pub columns: usize,
    pub rows: usize,
    grid: Vec<Vec<usize>>,
}

impl SpatialGrid {
    pub fn new(cell_size: f32, bounds: Vec2) -> Self {
        let (cell_size, columns, rows) = SpatialGrid::layout(cell_size, bounds);

        Self {
            cell_size,
            columns,
            rows,
            grid: vec![Vec::new(); columns * rows],
        }
    }

    // Whether the grid was built for this cell size and arena
    pub fn matches(&self, cell_size: f32, bounds: Vec2) -> bool {
        (self.cell_size, self.columns, self.rows) == SpatialGrid::layout(cell_size, bounds)
    }

    // Smallest cell size, starting from the requested one, that keeps the
    // grid within MAX_CELLS
    fn layout(cell_size: f32, bounds: Vec2) -> (f32, usize, usize) {
        let mut cell_size = cell_size;
        let (mut columns, mut rows) = SpatialGrid::dimensions(cell_size, bounds);
        while columns.saturating_mul(rows) > MAX_CELLS {
            cell_size *= 2.0;
            (columns, rows) = SpatialGrid::dimensions(cell_size, bounds);
        }
        (cell_size, columns, rows)
    }

    fn dimensions(cell_size: f32, bounds: Vec2) -> (usize, usize) {
        let columns = ((bounds.x / cell_size).ceil() as usize).max(1);
        let rows = ((bounds.y / cell_size).ceil() as usize).max(1);
        (columns, rows)
    }

    #[inline]
    fn cell_coords(&self, pos: Vec2) -> (usize, usize) {
        let x = (pos.x / self.cell_size).clamp(0.0, self.columns as f32 - 1.0) as usize;
        let y = (pos.y / self.cell_size).clamp(0.0, self.rows as f32 - 1.0) as usize;
        (x, y)
    }

    // Convert arena coordinates to grid cell index
    #[inline]
    pub fn pos_to_cell_index(&self, pos: Vec2) -> usize {
        let (x, y) = self.cell_coords(pos);
        y * self.columns + x
    }

    pub fn clear(&mut self) {
        for cell in &mut self.grid {
            cell.clear();
        }
    }

    #[inline]
    pub fn insert(&mut self, slot: usize, position: Vec2) {
        let cell_index = self.pos_to_cell_index(position);
        self.grid[cell_index].push(slot);
    }

    /// Move `slot` from the cell of `from` to the cell of `to`.
    pub fn relocate(&mut self, slot: usize, from: Vec2, to: Vec2) {
        let old_cell = self.pos_to_cell_index(from);
        let new_cell = self.pos_to_cell_index(to);
        if old_cell == new_cell {
            return;
        }

        if let Some(i) = self.grid[old_cell].iter().position(|&s| s == slot) {
            self.grid[old_cell].swap_remove(i);
        }
        self.grid[new_cell].push(slot);
    }

    /// Slots in the 3x3 block of cells around `position`, ascending.
    pub fn get_nearby_indices(&self, position: Vec2) -> Vec<usize> {
        let (grid_x, grid_y) = self.cell_coords(position);
        let mut result = Vec::new();

        // Check the cell and its neighbors (3x3 grid)
        for check_y in grid_y.saturating_sub(1)..=(grid_y + 1).min(self.rows - 1) {
            let y_index = check_y * self.columns;

            for check_x in grid_x.saturating_sub(1)..=(grid_x + 1).min(self.columns - 1) {
                result.extend_from_slice(&self.grid[y_index + check_x]);
            }
        }

        result.sort_unstable();
        result
    }
}
