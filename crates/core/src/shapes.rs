//! Shape library - piece footprints for every block type and rotation
//!
//! Each block type has one unrotated base shape. The library derives all four
//! rotations from it once and never changes afterwards, so a single table is
//! shared (read-only) by every engine in the process.
//!
//! Shapes are addressed in local coordinates `(x, y)`, x to the right and y
//! downwards, with the top-left corner of the matrix at `(0, 0)`.

use std::sync::{Arc, OnceLock};

use arrayvec::ArrayVec;

use crate::types::{BlockType, PIECE_CELLS, ROTATION_COUNT};

/// Largest side length of any shape matrix
pub const MAX_SHAPE_SIZE: usize = 4;

/// Offset of an occupied cell from the shape origin
pub type LocalCell = (i8, i8);

/// Occupied cells of a shape, in row-major scan order
pub type ShapeCells = ArrayVec<LocalCell, { MAX_SHAPE_SIZE * MAX_SHAPE_SIZE }>;

/// Occupancy grid for one block type in one rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShapeMatrix {
    width: u8,
    height: u8,
    /// Row-major occupancy, `cells[y][x]`
    cells: [[bool; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE],
}

impl ShapeMatrix {
    /// Build from rows of 0/1 values (outer slice = rows, top to bottom).
    fn from_rows(rows: &[&[u8]]) -> Self {
        let height = rows.len();
        let width = rows.first().map_or(0, |row| row.len());
        debug_assert!(height <= MAX_SHAPE_SIZE && width <= MAX_SHAPE_SIZE);
        debug_assert!(rows.iter().all(|row| row.len() == width));

        let mut cells = [[false; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        for (y, row) in rows.iter().enumerate() {
            for (x, &v) in row.iter().enumerate() {
                cells[y][x] = v != 0;
            }
        }

        Self {
            width: width as u8,
            height: height as u8,
            cells,
        }
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn height(&self) -> u8 {
        self.height
    }

    /// Whether local cell `(x, y)` is occupied; false outside the matrix.
    pub fn is_filled(&self, x: u8, y: u8) -> bool {
        x < self.width && y < self.height && self.cells[y as usize][x as usize]
    }

    /// All occupied local cells.
    pub fn occupied(&self) -> ShapeCells {
        let mut out = ShapeCells::new();
        for y in 0..self.height {
            for x in 0..self.width {
                if self.is_filled(x, y) {
                    out.push((x as i8, y as i8));
                }
            }
        }
        out
    }

    pub fn filled_count(&self) -> usize {
        self.occupied().len()
    }

    /// Transform the base shape into rotation `rotation` (0..=3).
    ///
    /// Rotations 0 and 2 swap width and height. Index 1 is the base shape
    /// itself; stepping the index by one is always a quarter turn.
    fn rotated(&self, rotation: u8) -> Self {
        let (w, h) = (self.width, self.height);
        let (out_w, out_h) = if rotation % 2 == 0 { (h, w) } else { (w, h) };

        let mut cells = [[false; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        for y in 0..out_h {
            for x in 0..out_w {
                let (sx, sy) = match rotation % ROTATION_COUNT {
                    0 => (w - 1 - y, x),
                    1 => (x, y),
                    2 => (y, h - 1 - x),
                    _ => (w - 1 - x, h - 1 - y),
                };
                cells[y as usize][x as usize] = self.is_filled(sx, sy);
            }
        }

        Self {
            width: out_w,
            height: out_h,
            cells,
        }
    }
}

/// Unrotated shape rows for each block type.
fn base_rows(kind: BlockType) -> &'static [&'static [u8]] {
    match kind {
        BlockType::Empty => &[&[0]],
        BlockType::Block => &[&[1, 1], &[1, 1]],
        BlockType::Triangle => &[&[0, 1, 0], &[1, 1, 0], &[0, 1, 0]],
        BlockType::Line => &[&[0, 0, 0, 0], &[1, 1, 1, 1], &[0, 0, 0, 0]],
        BlockType::RightT => &[&[1, 1, 1], &[1, 0, 0]],
        BlockType::LeftT => &[&[1, 0, 0], &[1, 1, 1]],
        BlockType::RightShape => &[&[0, 1], &[1, 1], &[1, 0]],
        BlockType::LeftShape => &[&[1, 0], &[1, 1], &[0, 1]],
    }
}

/// Precomputed table of every (block type, rotation) footprint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapeLibrary {
    table: [[ShapeMatrix; ROTATION_COUNT as usize]; BlockType::ALL.len()],
}

impl ShapeLibrary {
    /// Derive all rotations from the base shapes.
    pub fn build() -> Self {
        let table = BlockType::ALL.map(|kind| {
            let base = ShapeMatrix::from_rows(base_rows(kind));
            [0u8, 1, 2, 3].map(|rotation| base.rotated(rotation))
        });

        let library = Self { table };
        debug_assert!(library.is_well_formed());
        library
    }

    /// Process-wide library, built on first use.
    pub fn shared() -> Arc<Self> {
        static SHARED: OnceLock<Arc<ShapeLibrary>> = OnceLock::new();
        Arc::clone(SHARED.get_or_init(|| Arc::new(Self::build())))
    }

    /// Footprint of `kind` in `rotation` (taken modulo 4).
    pub fn shape(&self, kind: BlockType, rotation: u8) -> &ShapeMatrix {
        &self.table[kind.code() as usize][(rotation % ROTATION_COUNT) as usize]
    }

    /// Unrotated footprint, as shown in the next-piece preview.
    pub fn base_shape(kind: BlockType) -> ShapeMatrix {
        ShapeMatrix::from_rows(base_rows(kind))
    }

    /// Every piece has exactly four cells in every rotation; `Empty` has none.
    pub fn is_well_formed(&self) -> bool {
        BlockType::ALL.iter().all(|&kind| {
            let expected = if kind.is_empty() { 0 } else { PIECE_CELLS };
            (0..ROTATION_COUNT).all(|r| self.shape(kind, r).filled_count() == expected)
        })
    }
}

impl Default for ShapeLibrary {
    fn default() -> Self {
        Self::build()
    }
}
