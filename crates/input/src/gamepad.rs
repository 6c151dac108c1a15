//! Gamepad polling with per-button cooldown.
//!
//! A pad is sampled once per frame and reports which buttons are held, not when
//! they were pressed. Holding a button would otherwise fire an intent every
//! frame, so each button may only fire again after its cooldown window.

use arrayvec::ArrayVec;

use crate::types::{Intent, DEFAULT_GAMEPAD_COOLDOWN_MS};

/// Buttons the game listens to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GamepadButton {
    DpadLeft,
    DpadRight,
    DpadDown,
    /// Bottom face button (A on most layouts)
    South,
    /// Right face button (B on most layouts)
    East,
    Start,
}

impl GamepadButton {
    pub const ALL: [GamepadButton; 6] = [
        GamepadButton::DpadLeft,
        GamepadButton::DpadRight,
        GamepadButton::DpadDown,
        GamepadButton::South,
        GamepadButton::East,
        GamepadButton::Start,
    ];

    pub const COUNT: usize = Self::ALL.len();

    fn bit(self) -> u8 {
        1 << (self as u8)
    }

    pub fn intent(self) -> Intent {
        match self {
            GamepadButton::DpadLeft => Intent::MoveLeft,
            GamepadButton::DpadRight => Intent::MoveRight,
            GamepadButton::DpadDown => Intent::SoftDrop,
            GamepadButton::South => Intent::Rotate,
            GamepadButton::East => Intent::HardDrop,
            GamepadButton::Start => Intent::ToggleStartPause,
        }
    }
}

/// Held buttons in one sample
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GamepadState {
    pressed: u8,
}

impl GamepadState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, button: GamepadButton) -> Self {
        self.press(button);
        self
    }

    pub fn press(&mut self, button: GamepadButton) {
        self.pressed |= button.bit();
    }

    pub fn release(&mut self, button: GamepadButton) {
        self.pressed &= !button.bit();
    }

    pub fn is_pressed(&self, button: GamepadButton) -> bool {
        self.pressed & button.bit() != 0
    }

    pub fn is_empty(&self) -> bool {
        self.pressed == 0
    }
}

impl FromIterator<GamepadButton> for GamepadState {
    fn from_iter<T: IntoIterator<Item = GamepadButton>>(iter: T) -> Self {
        iter.into_iter().fold(Self::new(), Self::with)
    }
}

/// Turns held-button samples into discrete intents
#[derive(Debug, Clone)]
pub struct GamepadPoller {
    cooldown_ms: u32,
    last_fired: [Option<u64>; GamepadButton::COUNT],
}

impl GamepadPoller {
    pub fn new() -> Self {
        Self::with_cooldown_ms(DEFAULT_GAMEPAD_COOLDOWN_MS)
    }

    pub fn with_cooldown_ms(cooldown_ms: u32) -> Self {
        Self {
            cooldown_ms,
            last_fired: [None; GamepadButton::COUNT],
        }
    }

    pub fn cooldown_ms(&self) -> u32 {
        self.cooldown_ms
    }

    /// Emit an intent for each held button whose cooldown has elapsed.
    ///
    /// Buttons are reported in [`GamepadButton::ALL`] order.
    pub fn poll(
        &mut self,
        state: GamepadState,
        now_ms: u64,
    ) -> ArrayVec<Intent, { GamepadButton::COUNT }> {
        let mut out = ArrayVec::new();
        for button in GamepadButton::ALL {
            if !state.is_pressed(button) {
                continue;
            }
            let slot = &mut self.last_fired[button as usize];
            let ready = match *slot {
                Some(last) => now_ms.saturating_sub(last) >= u64::from(self.cooldown_ms),
                None => true,
            };
            if ready {
                *slot = Some(now_ms);
                out.push(button.intent());
            }
        }
        out
    }
}

impl Default for GamepadPoller {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_held_button_respects_cooldown() {
        let mut poller = GamepadPoller::with_cooldown_ms(120);
        let held = GamepadState::new().with(GamepadButton::DpadLeft);

        assert_eq!(poller.poll(held, 0).as_slice(), &[Intent::MoveLeft]);
        assert!(poller.poll(held, 16).is_empty());
        assert!(poller.poll(held, 119).is_empty());
        assert_eq!(poller.poll(held, 120).as_slice(), &[Intent::MoveLeft]);
    }

    #[test]
    fn test_buttons_cool_down_independently() {
        let mut poller = GamepadPoller::new();
        let left = GamepadState::new().with(GamepadButton::DpadLeft);
        poller.poll(left, 1000);

        let both: GamepadState = [GamepadButton::DpadLeft, GamepadButton::East]
            .into_iter()
            .collect();
        assert_eq!(poller.poll(both, 1016).as_slice(), &[Intent::HardDrop]);
    }

    #[test]
    fn test_button_mapping() {
        assert_eq!(GamepadButton::South.intent(), Intent::Rotate);
        assert_eq!(GamepadButton::DpadDown.intent(), Intent::SoftDrop);
        assert_eq!(GamepadButton::Start.intent(), Intent::ToggleStartPause);
    }

    #[test]
    fn test_state_bits() {
        let mut state = GamepadState::new();
        assert!(state.is_empty());
        state.press(GamepadButton::Start);
        assert!(state.is_pressed(GamepadButton::Start));
        assert!(!state.is_pressed(GamepadButton::South));
        state.release(GamepadButton::Start);
        assert!(state.is_empty());
    }
}
