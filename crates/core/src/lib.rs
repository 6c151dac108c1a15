//! Core game logic - pure, deterministic, and testable
//!
//! Everything here is free of terminal, device and file I/O. Time is an input
//! ([`GameSession::tick`]), randomness is injected ([`PieceSource`]) and
//! persistence sits behind a trait ([`StatsStore`]), so a session runs the same
//! in a terminal, a test or a headless replay.
//!
//! # Module Structure
//!
//! - [`grid`]: 10x20 occupancy grid, collision and row removal
//! - [`shape`]: shape catalog and clockwise matrix rotation
//! - [`piece`]: falling piece movement, rotation and ghost projection
//! - [`factory`]: random and scripted piece sources
//! - [`line_clear`]: scoring, levels and gravity speed
//! - [`session`]: the game state machine
//! - [`clock`]: frame timing for hosts
//! - [`snapshot`]: read-only render view
//! - [`stats`]: persistent counters and the store seam
//!
//! # Example
//!
//! ```
//! use blockfall_core::{GameSession, Intent, Phase};
//!
//! let mut session = GameSession::new(12345);
//! session.apply_intent(Intent::ToggleStartPause);
//! assert_eq!(session.phase(), Phase::Running);
//!
//! session.apply_intent(Intent::MoveRight);
//! session.apply_intent(Intent::HardDrop);
//! assert_eq!(session.grid().filled_count(), 4);
//! ```

pub mod clock;
pub mod factory;
pub mod grid;
pub mod line_clear;
pub mod piece;
pub mod session;
pub mod shape;
pub mod snapshot;
pub mod stats;

pub use blockfall_types as types;

pub use clock::{FrameClock, FrameDriver};
pub use factory::{PieceFactory, PieceSource, ScriptedPieces};
pub use grid::Grid;
pub use line_clear::{clear_lines, drop_interval_ms, line_score, ClearOutcome, Progress};
pub use piece::Piece;
pub use session::{GameSession, Step};
pub use shape::{rotate_clockwise, spawn_shape, Shape};
pub use snapshot::{ActiveSnapshot, RenderSnapshot};
pub use stats::{MemoryStatsStore, NullStatsStore, Stats, StatsStore};
pub use types::{Cell, ColorId, Intent, Phase, PieceKind, Rgb};
