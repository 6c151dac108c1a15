//! Input dispatcher: every device funnels into one intent queue.
//!
//! Keyboard and swipe events are pushed as they arrive; the gamepad is sampled
//! once per frame. The host drains the queue before ticking the session, so
//! intents always land ahead of that frame's gravity step.

use arrayvec::ArrayVec;
use crossterm::event::KeyEvent;

use crate::gamepad::{GamepadPoller, GamepadState};
use crate::map::handle_key_event;
use crate::swipe::{swipe_intent, Swipe};
use crate::types::{Intent, Phase};

/// Maximum intents buffered between two drains
pub const INTENT_QUEUE_CAPACITY: usize = 32;

/// Fixed-capacity FIFO of intents
#[derive(Debug, Clone, Default)]
pub struct IntentQueue {
    items: ArrayVec<Intent, INTENT_QUEUE_CAPACITY>,
}

impl IntentQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an intent; returns false (and drops it) when the queue is full.
    pub fn push(&mut self, intent: Intent) -> bool {
        if self.items.try_push(intent).is_err() {
            tracing::debug!(intent = intent.as_str(), "intent queue full, dropping");
            return false;
        }
        true
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Take everything in arrival order
    pub fn take(&mut self) -> ArrayVec<Intent, INTENT_QUEUE_CAPACITY> {
        std::mem::take(&mut self.items)
    }
}

/// Normalizes keyboard, swipe and gamepad input into intents
#[derive(Debug, Clone, Default)]
pub struct InputDispatcher {
    queue: IntentQueue,
    gamepad: GamepadPoller,
}

impl InputDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_gamepad_cooldown_ms(cooldown_ms: u32) -> Self {
        Self {
            queue: IntentQueue::new(),
            gamepad: GamepadPoller::with_cooldown_ms(cooldown_ms),
        }
    }

    /// Queue the intent for a key press; returns whether the key mapped to one.
    pub fn push_key(&mut self, key: KeyEvent) -> bool {
        match handle_key_event(key) {
            Some(intent) => self.queue.push(intent),
            None => false,
        }
    }

    pub fn push_swipe(&mut self, swipe: Swipe) -> bool {
        self.queue.push(swipe_intent(swipe))
    }

    /// Queue an already-mapped intent (scripts, replays).
    pub fn push_intent(&mut self, intent: Intent) -> bool {
        self.queue.push(intent)
    }

    /// Sample the gamepad for this frame; returns how many intents it queued.
    pub fn poll_gamepad(&mut self, state: GamepadState, now_ms: u64) -> usize {
        self.gamepad
            .poll(state, now_ms)
            .into_iter()
            .filter(|&intent| self.queue.push(intent))
            .count()
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Empty the queue, keeping only what `phase` accepts.
    ///
    /// Rejected intents are dropped here rather than carried into a later phase.
    pub fn drain(&mut self, phase: Phase) -> ArrayVec<Intent, INTENT_QUEUE_CAPACITY> {
        let mut items = self.queue.take();
        items.retain(|intent| phase.accepts(*intent));
        items
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gamepad::GamepadButton;
    use crossterm::event::KeyCode;

    #[test]
    fn test_devices_share_one_queue_in_order() {
        let mut dispatcher = InputDispatcher::new();
        assert!(dispatcher.push_key(KeyEvent::from(KeyCode::Left)));
        assert!(dispatcher.push_swipe(Swipe::Tap));
        assert_eq!(
            dispatcher.poll_gamepad(GamepadState::new().with(GamepadButton::East), 0),
            1
        );

        let drained = dispatcher.drain(Phase::Running);
        assert_eq!(
            drained.as_slice(),
            &[Intent::MoveLeft, Intent::Rotate, Intent::HardDrop]
        );
        assert_eq!(dispatcher.pending(), 0);
    }

    #[test]
    fn test_unmapped_key_queues_nothing() {
        let mut dispatcher = InputDispatcher::new();
        assert!(!dispatcher.push_key(KeyEvent::from(KeyCode::Char('x'))));
        assert_eq!(dispatcher.pending(), 0);
    }

    #[test]
    fn test_drain_filters_by_phase() {
        let mut dispatcher = InputDispatcher::new();
        dispatcher.push_intent(Intent::HardDrop);
        dispatcher.push_intent(Intent::ToggleStartPause);
        dispatcher.push_intent(Intent::MoveRight);

        let drained = dispatcher.drain(Phase::Paused);
        assert_eq!(drained.as_slice(), &[Intent::ToggleStartPause]);
        assert!(dispatcher.drain(Phase::Running).is_empty());
    }

    #[test]
    fn test_queue_capacity() {
        let mut queue = IntentQueue::new();
        for _ in 0..INTENT_QUEUE_CAPACITY {
            assert!(queue.push(Intent::SoftDrop));
        }
        assert!(!queue.push(Intent::SoftDrop));
        assert_eq!(queue.len(), INTENT_QUEUE_CAPACITY);
        assert_eq!(queue.take().len(), INTENT_QUEUE_CAPACITY);
        assert!(queue.is_empty());
    }
}
