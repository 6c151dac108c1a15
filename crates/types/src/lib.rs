//! Shared types module - constants and plain data used across the workspace
//!
//! Everything here is pure data with no behavior beyond conversions, so the
//! same definitions can be used by the rules engine, the input layer and the
//! terminal renderer.
//!
//! # Grid Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19, row 0 at the top)
//!
//! # Timing and Scoring Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `BASE_DROP_MS` | 1000 | Gravity interval at level 1 |
//! | `DROP_STEP_MS` | 100 | Interval reduction per level |
//! | `MIN_DROP_MS` | 100 | Gravity interval floor |
//! | `LEVEL_SCORE_STEP` | 1000 | Score per level threshold |
//! | `FRAME_MS` | 16 | Nominal frame period (~60 FPS) |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{ColorId, Intent, Phase, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//!
//! assert_eq!(PieceKind::ALL.len(), 7);
//! assert_eq!(ColorId::new(0), None);
//! assert_eq!(ColorId::new(3).map(ColorId::get), Some(3));
//!
//! assert_eq!(Intent::from_str("hardDrop"), Some(Intent::HardDrop));
//! assert!(!Phase::Paused.accepts(Intent::MoveLeft));
//! assert!(Phase::Paused.accepts(Intent::ToggleStartPause));
//! ```

use std::num::NonZeroU8;

use serde::{Deserialize, Serialize};

/// Grid width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Grid height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Nominal frame period in milliseconds (16ms ≈ 60 FPS)
pub const FRAME_MS: u32 = 16;

/// Gravity interval at level 1 (1000ms = 1 second per row)
pub const BASE_DROP_MS: u32 = 1000;

/// Gravity interval reduction per level above 1
pub const DROP_STEP_MS: u32 = 100;

/// Gravity interval floor (100ms)
pub const MIN_DROP_MS: u32 = 100;

/// Score needed per level: advancing from level `n` requires `score >= n * LEVEL_SCORE_STEP`
pub const LEVEL_SCORE_STEP: u32 = 1000;

/// Points for a single clear event by number of rows removed (before the level multiplier).
///
/// Index 4 also covers anything above four rows.
pub const LINE_SCORES: [u32; 5] = [0, 100, 300, 500, 800];

/// Minimum time between two firings of the same gamepad button
pub const DEFAULT_GAMEPAD_COOLDOWN_MS: u32 = 120;

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// The fixed piece palette. `ColorId(n)` refers to `PALETTE[n - 1]`.
pub const PALETTE: [Rgb; 7] = [
    Rgb::new(0xFF, 0x0D, 0x72),
    Rgb::new(0x0D, 0xC2, 0xFF),
    Rgb::new(0x0D, 0xFF, 0x72),
    Rgb::new(0xF5, 0x38, 0xFF),
    Rgb::new(0xFF, 0x8E, 0x0D),
    Rgb::new(0xFF, 0xE1, 0x38),
    Rgb::new(0x38, 0x77, 0xFF),
];

/// A 1-based palette index.
///
/// Pieces carry their color id from creation; it is never re-derived from an RGB
/// value, so two palette entries that happen to look alike stay distinct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct ColorId(NonZeroU8);

impl ColorId {
    /// Number of entries in the palette.
    pub const COUNT: u8 = PALETTE.len() as u8;

    /// Build a color id, returning `None` for 0 or anything past the palette.
    pub fn new(id: u8) -> Option<Self> {
        if id as usize > PALETTE.len() {
            return None;
        }
        NonZeroU8::new(id).map(Self)
    }

    /// Palette entry at a 0-based index, wrapping around the palette length.
    pub fn nth(index: usize) -> Self {
        Self(NonZeroU8::MIN.saturating_add((index % PALETTE.len()) as u8))
    }

    /// Raw 1-based value (as stored in a `u8` grid snapshot).
    pub fn get(self) -> u8 {
        self.0.get()
    }

    pub fn rgb(self) -> Rgb {
        PALETTE[(self.0.get() - 1) as usize]
    }

    /// Iterate every palette entry in order.
    pub fn all() -> impl Iterator<Item = ColorId> {
        (1..=Self::COUNT).filter_map(ColorId::new)
    }
}

impl TryFrom<u8> for ColorId {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        ColorId::new(value).ok_or_else(|| format!("color id {value} outside palette"))
    }
}

impl From<ColorId> for u8 {
    fn from(value: ColorId) -> Self {
        value.get()
    }
}

/// A cell on the grid
///
/// - `None`: Empty cell
/// - `Some(ColorId)`: Cell filled with the given palette color
pub type Cell = Option<ColorId>;

/// The shape catalog, in catalog order.
///
/// - **I**: 1x4 bar
/// - **O**: 2x2 square
/// - **T**: T-shaped
/// - **Z** / **S**: skew pieces
/// - **L** / **J**: hook pieces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    I,
    O,
    T,
    Z,
    S,
    L,
    J,
}

impl PieceKind {
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::Z,
        PieceKind::S,
        PieceKind::L,
        PieceKind::J,
    ];

    /// Uppercase letter for display
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::I.as_str(), "I");
    /// assert_eq!(PieceKind::J.as_str(), "J");
    /// ```
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "I",
            PieceKind::O => "O",
            PieceKind::T => "T",
            PieceKind::Z => "Z",
            PieceKind::S => "S",
            PieceKind::L => "L",
            PieceKind::J => "J",
        }
    }
}

/// Device-independent user intents.
///
/// Every input source (keyboard, swipe, gamepad) is reduced to these before it
/// reaches a game session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Intent {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Move piece one cell down, locking it if it cannot move
    SoftDrop,
    /// Rotate piece 90° clockwise in place
    Rotate,
    /// Drop piece to its landing row and lock it
    HardDrop,
    /// Start a new game when idle or over, otherwise pause/resume
    ToggleStartPause,
}

impl Intent {
    /// Parse an intent from its camelCase name (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::Intent;
    ///
    /// assert_eq!(Intent::from_str("moveLeft"), Some(Intent::MoveLeft));
    /// assert_eq!(Intent::from_str("ROTATE"), Some(Intent::Rotate));
    /// assert_eq!(Intent::from_str("hold"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(Intent::MoveLeft),
            "moveright" => Some(Intent::MoveRight),
            "softdrop" => Some(Intent::SoftDrop),
            "rotate" => Some(Intent::Rotate),
            "harddrop" => Some(Intent::HardDrop),
            "togglestartpause" => Some(Intent::ToggleStartPause),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::MoveLeft => "moveLeft",
            Intent::MoveRight => "moveRight",
            Intent::SoftDrop => "softDrop",
            Intent::Rotate => "rotate",
            Intent::HardDrop => "hardDrop",
            Intent::ToggleStartPause => "toggleStartPause",
        }
    }

    /// True for intents that act on the falling piece.
    pub fn is_gameplay(&self) -> bool {
        !matches!(self, Intent::ToggleStartPause)
    }
}

/// Session lifecycle.
///
/// `Idle → Running ⇄ Paused`, `Running → Over → Running` (restart).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Phase {
    #[default]
    Idle,
    Running,
    Paused,
    Over,
}

impl Phase {
    /// Whether an intent has any effect in this phase.
    ///
    /// Gameplay intents only act while running; start/pause is accepted everywhere.
    pub fn accepts(&self, intent: Intent) -> bool {
        match self {
            Phase::Running => true,
            Phase::Idle | Phase::Paused | Phase::Over => !intent.is_gameplay(),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::Running => "running",
            Phase::Paused => "paused",
            Phase::Over => "over",
        }
    }
}
