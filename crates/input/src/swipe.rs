//! Touch gesture mapping.
//!
//! Gestures arrive already recognized (one event per gesture), so there is no
//! debouncing here.

use crate::types::Intent;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Swipe {
    Left,
    Right,
    Down,
    Up,
    Tap,
}

impl Swipe {
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "swipeleft" | "left" => Some(Self::Left),
            "swiperight" | "right" => Some(Self::Right),
            "swipedown" | "down" => Some(Self::Down),
            "swipeup" | "up" => Some(Self::Up),
            "tap" => Some(Self::Tap),
            _ => None,
        }
    }

    /// Classify a pointer drag by its displacement (screen y grows downward).
    ///
    /// Drags shorter than `threshold` on both axes are taps; otherwise the
    /// dominant axis wins, horizontal on a tie.
    pub fn from_drag(dx: i32, dy: i32, threshold: i32) -> Self {
        if dx.abs() < threshold && dy.abs() < threshold {
            Self::Tap
        } else if dx.abs() >= dy.abs() {
            if dx < 0 {
                Self::Left
            } else {
                Self::Right
            }
        } else if dy > 0 {
            Self::Down
        } else {
            Self::Up
        }
    }
}

/// Map a gesture to an intent.
///
/// Swipe down is a hard drop; taps and upward swipes rotate.
pub fn swipe_intent(swipe: Swipe) -> Intent {
    match swipe {
        Swipe::Left => Intent::MoveLeft,
        Swipe::Right => Intent::MoveRight,
        Swipe::Down => Intent::HardDrop,
        Swipe::Up | Swipe::Tap => Intent::Rotate,
    }
}
