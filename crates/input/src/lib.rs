//! Input module (device-facing).
//!
//! Maps raw events from each device class into [`Intent`]s. Keyboard events
//! come from `crossterm`; swipes and gamepad samples are plain values so any
//! host can feed them. Only the gamepad needs debouncing, and its cooldown state
//! lives entirely in [`GamepadPoller`].

pub mod dispatcher;
pub mod gamepad;
pub mod map;
pub mod swipe;

pub use blockfall_types as types;

pub use dispatcher::{InputDispatcher, IntentQueue, INTENT_QUEUE_CAPACITY};
pub use gamepad::{GamepadButton, GamepadPoller, GamepadState};
pub use map::{handle_key_event, should_quit};
pub use swipe::{swipe_intent, Swipe};
pub use types::Intent;
