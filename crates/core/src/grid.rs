//! Grid module - the 12x20 board and its floating mask
//!
//! The grid stores every visible block, including the piece that is still
//! falling. A parallel boolean mask marks which cells belong to that floating
//! piece, so moving it is a matter of rewriting the marked cells.
//!
//! Both layers use flat row-major arrays (`y * WIDTH + x`) with no allocation.
//! Coordinates: x ranges 0..11 (left to right), y ranges 0..19 (top to bottom).

use crate::types::{BlockType, GRID_CELLS, GRID_HEIGHT, GRID_WIDTH};

/// Board cells plus the floating-piece mask.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridState {
    cells: [BlockType; GRID_CELLS],
    floating: [bool; GRID_CELLS],
}

impl GridState {
    /// Create an empty grid with no floating cells
    pub fn new() -> Self {
        Self {
            cells: [BlockType::Empty; GRID_CELLS],
            floating: [false; GRID_CELLS],
        }
    }

    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= GRID_WIDTH as i8 || y < 0 || y >= GRID_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * (GRID_WIDTH as usize) + (x as usize))
    }

    #[inline(always)]
    fn coords(idx: usize) -> (i8, i8) {
        let w = GRID_WIDTH as usize;
        ((idx % w) as i8, (idx / w) as i8)
    }

    pub fn width(&self) -> u8 {
        GRID_WIDTH
    }

    pub fn height(&self) -> u8 {
        GRID_HEIGHT
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<BlockType> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, kind: BlockType) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = kind;
                true
            }
            None => false,
        }
    }

    /// In bounds and holding no block
    pub fn is_empty_at(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(BlockType::Empty))
    }

    pub fn is_out_of_bounds(&self, x: i8, y: i8) -> bool {
        Self::index(x, y).is_none()
    }

    pub fn is_floating(&self, x: i8, y: i8) -> bool {
        Self::index(x, y).is_some_and(|idx| self.floating[idx])
    }

    /// Mark or unmark a cell as part of the floating piece
    /// Returns false if out of bounds
    pub fn set_floating(&mut self, x: i8, y: i8, floating: bool) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.floating[idx] = floating;
                true
            }
            None => false,
        }
    }

    /// Positions of all floating cells, row-major.
    pub fn floating_cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        self.floating
            .iter()
            .enumerate()
            .filter(|&(_, &f)| f)
            .map(|(idx, _)| Self::coords(idx))
    }

    pub fn floating_count(&self) -> usize {
        self.floating.iter().filter(|&&f| f).count()
    }

    pub fn has_floating(&self) -> bool {
        self.floating.iter().any(|&f| f)
    }

    /// Unmark every cell; block values stay where they are.
    pub fn clear_floating_mask(&mut self) {
        self.floating.fill(false);
    }

    /// Write `Empty` into every floating cell (the mask is kept).
    pub fn lift_floating(&mut self) {
        self.fill_floating(BlockType::Empty);
    }

    /// Write `kind` into every floating cell.
    pub fn fill_floating(&mut self, kind: BlockType) {
        for (cell, &f) in self.cells.iter_mut().zip(self.floating.iter()) {
            if f {
                *cell = kind;
            }
        }
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= GRID_HEIGHT as usize {
            return false;
        }
        let start = y * GRID_WIDTH as usize;
        let end = start + GRID_WIDTH as usize;
        self.cells[start..end].iter().all(|cell| !cell.is_empty())
    }

    /// Remove row `y`: every row above moves down by one and the top row is
    /// cleared across all columns. Only block values move, the floating mask
    /// is left untouched.
    pub fn clear_row(&mut self, y: usize) -> bool {
        if y >= GRID_HEIGHT as usize {
            return false;
        }

        let width = GRID_WIDTH as usize;

        for row in (1..=y).rev() {
            let src_start = (row - 1) * width;
            let dst_start = row * width;
            self.cells
                .copy_within(src_start..src_start + width, dst_start);
        }

        self.cells[..width].fill(BlockType::Empty);
        true
    }

    /// Fill row `y` with `kind` in every column except those in `holes`.
    /// Board setup for tests and benches.
    #[doc(hidden)]
    pub fn fill_row(&mut self, y: i8, kind: BlockType, holes: &[i8]) {
        for x in 0..GRID_WIDTH as i8 {
            if !holes.contains(&x) {
                self.set(x, y, kind);
            }
        }
    }

    pub fn cells(&self) -> &[BlockType] {
        &self.cells
    }

    pub fn floating_mask(&self) -> &[bool] {
        &self.floating
    }

    /// Reset every cell to `Empty` and drop the floating mask
    pub fn clear(&mut self) {
        self.cells.fill(BlockType::Empty);
        self.floating.fill(false);
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| !c.is_empty()).count()
    }

    /// Write cell codes into a fixed 2D array (for snapshots).
    pub fn write_u8_grid(&self, out: &mut [[u8; GRID_WIDTH as usize]; GRID_HEIGHT as usize]) {
        let width = GRID_WIDTH as usize;
        for (y, row) in out.iter_mut().enumerate() {
            for (x, v) in row.iter_mut().enumerate() {
                *v = self.cells[y * width + x].code();
            }
        }
    }

    pub fn write_floating_grid(
        &self,
        out: &mut [[bool; GRID_WIDTH as usize]; GRID_HEIGHT as usize],
    ) {
        let width = GRID_WIDTH as usize;
        for (y, row) in out.iter_mut().enumerate() {
            row.copy_from_slice(&self.floating[y * width..(y + 1) * width]);
        }
    }
}

impl Default for GridState {
    fn default() -> Self {
        Self::new()
    }
}
