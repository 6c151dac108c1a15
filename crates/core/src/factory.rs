//! Piece factory module - where new pieces come from
//!
//! [`PieceFactory`] draws shape and color independently and uniformly at random
//! (no bag, no history). [`ScriptedPieces`] replays a fixed sequence, which makes
//! sessions reproducible for demos and tests.
//!
//! Neither checks the spawn position: the session tests the new piece against the
//! grid itself to detect a top-out.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::piece::Piece;
use crate::types::{ColorId, PieceKind, PALETTE};

/// Anything that can hand the session its next piece.
pub trait PieceSource {
    fn next_piece(&mut self) -> Piece;
}

/// Uniform random piece generator
#[derive(Debug, Clone)]
pub struct PieceFactory {
    rng: StdRng,
}

impl PieceFactory {
    /// Create a deterministic factory from a seed
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Create a factory seeded from OS entropy
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Draw a shape and a color independently, both uniformly.
    pub fn create(&mut self) -> Piece {
        let kind = PieceKind::ALL[self.rng.gen_range(0..PieceKind::ALL.len())];
        let color = ColorId::nth(self.rng.gen_range(0..PALETTE.len()));
        Piece::spawn(kind, color)
    }
}

impl PieceSource for PieceFactory {
    fn next_piece(&mut self) -> Piece {
        self.create()
    }
}

/// Cycles through a fixed list of pieces
#[derive(Debug, Clone)]
pub struct ScriptedPieces {
    script: Vec<(PieceKind, ColorId)>,
    cursor: usize,
}

impl ScriptedPieces {
    /// Replay `script` in order, wrapping around at the end.
    ///
    /// An empty script yields I pieces in the first palette color.
    pub fn new(script: Vec<(PieceKind, ColorId)>) -> Self {
        Self { script, cursor: 0 }
    }

    /// Script of the given kinds, colored by catalog position.
    pub fn kinds(kinds: &[PieceKind]) -> Self {
        Self::new(
            kinds
                .iter()
                .map(|&k| (k, ColorId::nth(k as usize)))
                .collect(),
        )
    }

    /// Number of pieces handed out so far
    pub fn drawn(&self) -> usize {
        self.cursor
    }
}

impl PieceSource for ScriptedPieces {
    fn next_piece(&mut self) -> Piece {
        let (kind, color) = if self.script.is_empty() {
            (PieceKind::I, ColorId::nth(0))
        } else {
            self.script[self.cursor % self.script.len()]
        };
        self.cursor += 1;
        Piece::spawn(kind, color)
    }
}
