//! Shapes module - the shape catalog and matrix rotation
//!
//! A shape is a small boolean matrix (at most 4x4) holding the occupied cells of
//! a piece in its current orientation. Rotation produces a new matrix; shapes are
//! never edited in place.

use serde::{Deserialize, Serialize};

use crate::types::PieceKind;

/// Largest supported shape side
pub const MAX_SHAPE_SIDE: usize = 4;

/// Occupancy matrix of one orientation.
///
/// Only the top-left `height x width` corner of `cells` is meaningful; the rest is
/// always `false` so that equality compares orientations exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Shape {
    width: u8,
    height: u8,
    cells: [[bool; MAX_SHAPE_SIDE]; MAX_SHAPE_SIDE],
}

const fn mask(width: u8, height: u8, rows: [[u8; MAX_SHAPE_SIDE]; MAX_SHAPE_SIDE]) -> Shape {
    let mut cells = [[false; MAX_SHAPE_SIDE]; MAX_SHAPE_SIDE];
    let mut r = 0;
    while r < height as usize {
        let mut c = 0;
        while c < width as usize {
            cells[r][c] = rows[r][c] != 0;
            c += 1;
        }
        r += 1;
    }
    Shape {
        width,
        height,
        cells,
    }
}

const I_SHAPE: Shape = mask(4, 1, [[1, 1, 1, 1], [0; 4], [0; 4], [0; 4]]);
const O_SHAPE: Shape = mask(2, 2, [[1, 1, 0, 0], [1, 1, 0, 0], [0; 4], [0; 4]]);
const T_SHAPE: Shape = mask(3, 2, [[1, 1, 1, 0], [0, 1, 0, 0], [0; 4], [0; 4]]);
const Z_SHAPE: Shape = mask(3, 2, [[1, 1, 0, 0], [0, 1, 1, 0], [0; 4], [0; 4]]);
const S_SHAPE: Shape = mask(3, 2, [[0, 1, 1, 0], [1, 1, 0, 0], [0; 4], [0; 4]]);
const L_SHAPE: Shape = mask(3, 2, [[1, 1, 1, 0], [1, 0, 0, 0], [0; 4], [0; 4]]);
const J_SHAPE: Shape = mask(3, 2, [[1, 1, 1, 0], [0, 0, 1, 0], [0; 4], [0; 4]]);

/// Rotation-0 shape for a piece kind
pub fn spawn_shape(kind: PieceKind) -> Shape {
    match kind {
        PieceKind::I => I_SHAPE,
        PieceKind::O => O_SHAPE,
        PieceKind::T => T_SHAPE,
        PieceKind::Z => Z_SHAPE,
        PieceKind::S => S_SHAPE,
        PieceKind::L => L_SHAPE,
        PieceKind::J => J_SHAPE,
    }
}

impl Shape {
    /// Build a shape from 0/1 rows.
    ///
    /// Returns `None` for empty, ragged or oversized input.
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_core::Shape;
    ///
    /// let bar = Shape::from_rows(&[&[1, 1, 1, 1]]).unwrap();
    /// assert_eq!((bar.width(), bar.height()), (4, 1));
    /// assert!(Shape::from_rows(&[&[1, 1], &[1]]).is_none());
    /// ```
    pub fn from_rows(rows: &[&[u8]]) -> Option<Self> {
        let height = rows.len();
        let width = rows.first()?.len();
        if width == 0 || width > MAX_SHAPE_SIDE || height > MAX_SHAPE_SIDE {
            return None;
        }
        if rows.iter().any(|row| row.len() != width) {
            return None;
        }

        let mut cells = [[false; MAX_SHAPE_SIDE]; MAX_SHAPE_SIDE];
        for (r, row) in rows.iter().enumerate() {
            for (c, &v) in row.iter().enumerate() {
                cells[r][c] = v != 0;
            }
        }
        Some(Self {
            width: width as u8,
            height: height as u8,
            cells,
        })
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn height(&self) -> u8 {
        self.height
    }

    pub fn is_filled(&self, dx: u8, dy: u8) -> bool {
        dx < self.width && dy < self.height && self.cells[dy as usize][dx as usize]
    }

    /// Occupied cells as `(dx, dy)` offsets from the bounding box's top-left corner.
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        (0..self.height).flat_map(move |dy| {
            (0..self.width)
                .filter(move |&dx| self.cells[dy as usize][dx as usize])
                .map(move |dx| (dx as i8, dy as i8))
        })
    }

    /// Rows as 0/1 vectors, for display and debugging.
    pub fn to_rows(&self) -> Vec<Vec<u8>> {
        (0..self.height)
            .map(|r| {
                (0..self.width)
                    .map(|c| u8::from(self.is_filled(c, r)))
                    .collect()
            })
            .collect()
    }
}

/// Rotate a shape 90° clockwise (transpose, then reverse each row).
///
/// Row `r` of the result is column `r` of the input read bottom to top.
pub fn rotate_clockwise(shape: &Shape) -> Shape {
    let (w, h) = (shape.width, shape.height);
    let mut cells = [[false; MAX_SHAPE_SIDE]; MAX_SHAPE_SIDE];
    for r in 0..w {
        for c in 0..h {
            cells[r as usize][c as usize] = shape.is_filled(r, h - 1 - c);
        }
    }
    Shape {
        width: shape.height,
        height: shape.width,
        cells,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_has_four_cells_each() {
        for kind in PieceKind::ALL {
            assert_eq!(spawn_shape(kind).cells().count(), 4, "{kind:?}");
        }
    }

    #[test]
    fn test_is_filled_reads_offsets_and_clips() {
        let t = spawn_shape(PieceKind::T);
        assert!(t.is_filled(1, 0));
        assert!(!t.is_filled(0, 1));
        assert!(t.is_filled(1, 1));
        assert!(!t.is_filled(2, 1));
        assert!(!t.is_filled(3, 0));
        assert!(!t.is_filled(0, 2));
    }

    #[test]
    fn test_rotate_t_clockwise() {
        let rotated = rotate_clockwise(&spawn_shape(PieceKind::T));
        assert_eq!(rotated.to_rows(), vec![vec![0, 1], vec![1, 1], vec![0, 1]]);
    }

    #[test]
    fn test_rotate_l_clockwise() {
        let rotated = rotate_clockwise(&spawn_shape(PieceKind::L));
        assert_eq!(rotated.to_rows(), vec![vec![1, 1], vec![0, 1], vec![0, 1]]);
    }

    #[test]
    fn test_rotate_i_swaps_dimensions() {
        let rotated = rotate_clockwise(&spawn_shape(PieceKind::I));
        assert_eq!((rotated.width(), rotated.height()), (1, 4));
        assert_eq!(rotated.cells().count(), 4);
    }

    #[test]
    fn test_o_is_rotation_invariant() {
        let o = spawn_shape(PieceKind::O);
        assert_eq!(rotate_clockwise(&o), o);
    }

    #[test]
    fn test_from_rows_matches_catalog() {
        let z = Shape::from_rows(&[&[1, 1, 0], &[0, 1, 1]]).unwrap();
        assert_eq!(z, spawn_shape(PieceKind::Z));
    }
}
