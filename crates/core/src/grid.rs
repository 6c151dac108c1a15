//! The settled-cell matrix.
//!
//! Stored row-major in one fixed array, `x` growing rightward and `y` downward
//! from row 0 at the top. A cell is `None` when empty, otherwise the palette color
//! of the piece that settled there. Everything above row 0 counts as open sky:
//! pieces may spawn and turn there but nothing is ever stored.

use crate::piece::Piece;
use crate::types::{Cell, BOARD_HEIGHT, BOARD_WIDTH};

const COLS: usize = BOARD_WIDTH as usize;
const ROWS: usize = BOARD_HEIGHT as usize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    cells: [Cell; COLS * ROWS],
}

impl Grid {
    pub fn new() -> Self {
        Self {
            cells: [None; COLS * ROWS],
        }
    }

    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        let (x, y) = (usize::try_from(x).ok()?, usize::try_from(y).ok()?);
        (x < COLS && y < ROWS).then_some(y * COLS + x)
    }

    #[inline]
    fn row(&self, y: usize) -> &[Cell] {
        &self.cells[y * COLS..(y + 1) * COLS]
    }

    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// `None` off the grid, `Some(cell)` on it.
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Stores `cell` and reports whether `(x, y)` was on the grid.
    pub fn set_cell(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        let Some(idx) = Self::index(x, y) else {
            return false;
        };
        self.cells[idx] = cell;
        true
    }

    /// On the grid and holding a color.
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// Collision query for a single cell.
    ///
    /// Side walls and the floor block; the open space above row 0 never does.
    pub fn is_blocked(&self, x: i8, y: i8) -> bool {
        if x < 0 || x >= BOARD_WIDTH as i8 || y >= BOARD_HEIGHT as i8 {
            return true;
        }
        if y < 0 {
            return false;
        }
        self.is_occupied(x, y)
    }

    /// Every column of row `y` holds a color. Rows off the grid are never full.
    pub fn is_row_full(&self, y: usize) -> bool {
        y < ROWS && self.row(y).iter().all(Option::is_some)
    }

    /// Remove every full row and return how many went.
    ///
    /// Rows that survive keep their order and settle at the bottom, with the
    /// same number of empty rows opening at the top. One bottom-up pass with a
    /// write cursor, so adjacent full rows are handled together.
    pub fn clear_full_rows(&mut self) -> usize {
        let mut write_y = ROWS;

        for read_y in (0..ROWS).rev() {
            if self.is_row_full(read_y) {
                continue;
            }
            write_y -= 1;
            if write_y != read_y {
                let src = read_y * COLS;
                self.cells.copy_within(src..src + COLS, write_y * COLS);
            }
        }

        self.cells[..write_y * COLS].fill(None);
        write_y
    }

    /// Settle a piece: its color goes into every covered cell on the grid.
    /// Cells still in the sky are lost.
    pub fn merge(&mut self, piece: &Piece) {
        for (x, y) in piece.occupied_cells() {
            self.set_cell(x, y, Some(piece.color));
        }
    }

    pub fn filled_count(&self) -> usize {
        self.cells.iter().flatten().count()
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Export as color ids, 0 for empty.
    pub fn write_u8_grid(&self, out: &mut [[u8; COLS]; ROWS]) {
        for (y, dst_row) in out.iter_mut().enumerate() {
            for (dst, src) in dst_row.iter_mut().zip(self.row(y)) {
                *dst = src.map_or(0, |c| c.get());
            }
        }
    }

    pub fn clear(&mut self) {
        self.cells.fill(None);
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}
