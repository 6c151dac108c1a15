//! Piece module - the falling piece and its kinematics
//!
//! A piece is a shape placed on the grid at an origin (top-left of its bounding
//! box) with a palette color. Movement and rotation are all-or-nothing: a
//! candidate that collides is discarded and the piece keeps its previous state.

use serde::{Deserialize, Serialize};

use crate::grid::Grid;
use crate::shape::{rotate_clockwise, spawn_shape, Shape};
use crate::types::{ColorId, PieceKind, BOARD_WIDTH};

/// Active falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub kind: PieceKind,
    pub shape: Shape,
    pub color: ColorId,
    pub x: i8,
    pub y: i8,
}

impl Piece {
    /// Create a piece in its spawn orientation, horizontally centered on row 0.
    pub fn spawn(kind: PieceKind, color: ColorId) -> Self {
        let shape = spawn_shape(kind);
        Self {
            kind,
            shape,
            color,
            x: spawn_x(&shape),
            y: 0,
        }
    }

    /// Absolute grid coordinates of every occupied cell
    pub fn occupied_cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        self.shape
            .cells()
            .map(move |(dx, dy)| (self.x + dx, self.y + dy))
    }

    /// True if any occupied cell hits a wall, the floor or a filled grid cell.
    ///
    /// Cells above row 0 only collide with the side walls.
    pub fn collides(&self, grid: &Grid) -> bool {
        self.occupied_cells().any(|(x, y)| grid.is_blocked(x, y))
    }

    /// Shift by `(dx, dy)` if the result is collision-free.
    ///
    /// Returns false and leaves the piece unchanged otherwise.
    pub fn try_move(&mut self, dx: i8, dy: i8, grid: &Grid) -> bool {
        self.x += dx;
        self.y += dy;
        if self.collides(grid) {
            self.x -= dx;
            self.y -= dy;
            return false;
        }
        true
    }

    /// Rotate 90° clockwise about the same origin.
    ///
    /// Only the single in-place orientation is tried; there are no kick offsets.
    pub fn rotate(&mut self, grid: &Grid) -> bool {
        let candidate = Piece {
            shape: rotate_clockwise(&self.shape),
            ..*self
        };
        if candidate.collides(grid) {
            return false;
        }
        self.shape = candidate.shape;
        true
    }

    /// Landing position if dropped straight down, computed on a copy.
    pub fn ghost(&self, grid: &Grid) -> Piece {
        let mut ghost = *self;
        while ghost.try_move(0, 1, grid) {}
        ghost
    }

    /// Row the ghost piece lands on
    pub fn ghost_y(&self, grid: &Grid) -> i8 {
        self.ghost(grid).y
    }
}

/// Spawn column: `floor(Cols / 2) - ceil(width / 2)`.
fn spawn_x(shape: &Shape) -> i8 {
    (BOARD_WIDTH / 2) as i8 - shape.width().div_ceil(2) as i8
}
