//! Frame clock - turns wall-clock timestamps into session ticks
//!
//! The session itself never reads a clock. A host calls
//! [`FrameDriver::frame`] once per rendered frame with a monotonic timestamp;
//! the driver applies queued intents, then feeds the elapsed time to
//! [`GameSession::tick`].

use crate::session::{GameSession, Step};
use crate::types::{Intent, Phase};

/// Millisecond delta tracker
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameClock {
    last_ms: Option<u64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget the previous timestamp and start measuring from `now_ms`.
    pub fn rebaseline(&mut self, now_ms: u64) {
        self.last_ms = Some(now_ms);
    }

    /// Elapsed time since the previous call (0 on the first call).
    ///
    /// Timestamps that go backwards yield 0; deltas saturate at `u32::MAX`.
    pub fn advance(&mut self, now_ms: u64) -> u32 {
        let delta = match self.last_ms {
            Some(last) => now_ms.saturating_sub(last),
            None => 0,
        };
        self.last_ms = Some(now_ms);
        u32::try_from(delta).unwrap_or(u32::MAX)
    }
}

/// Per-frame driver for one session
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameDriver {
    clock: FrameClock,
    was_running: bool,
}

impl FrameDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run one frame: intents first, then gravity.
    ///
    /// While the session is not running the clock is rebaselined every frame. The
    /// frame in which it starts (or resumes) running applies no delta, so a long
    /// pause never turns into a burst of elapsed time.
    pub fn frame<I>(&mut self, session: &mut GameSession, intents: I, now_ms: u64) -> Step
    where
        I: IntoIterator<Item = Intent>,
    {
        for intent in intents {
            session.apply_intent(intent);
        }

        let running = session.phase() == Phase::Running;
        let resumed = running && !self.was_running;
        self.was_running = running;

        if !running || resumed {
            self.clock.rebaseline(now_ms);
            return Step::Ignored;
        }

        let elapsed = self.clock.advance(now_ms);
        session.tick(elapsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factory::ScriptedPieces;
    use crate::stats::NullStatsStore;
    use crate::types::PieceKind;

    const NO_INPUT: [Intent; 0] = [];

    fn session() -> GameSession {
        GameSession::with_parts(
            Box::new(ScriptedPieces::kinds(&[PieceKind::O])),
            Box::new(NullStatsStore),
        )
    }

    #[test]
    fn test_clock_deltas() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.advance(1_000), 0);
        assert_eq!(clock.advance(1_016), 16);
        assert_eq!(clock.advance(1_010), 0);
        clock.rebaseline(5_000);
        assert_eq!(clock.advance(5_033), 33);
    }

    #[test]
    fn test_driver_applies_intents_then_gravity() {
        let mut session = session();
        let mut driver = FrameDriver::new();

        assert_eq!(
            driver.frame(&mut session, [Intent::ToggleStartPause], 0),
            Step::Ignored
        );
        assert_eq!(session.phase(), Phase::Running);

        assert_eq!(driver.frame(&mut session, NO_INPUT, 600), Step::Pending);
        assert_eq!(driver.frame(&mut session, NO_INPUT, 1_001), Step::Moved);
        assert_eq!(session.current().unwrap().y, 1);
    }

    #[test]
    fn test_pause_gap_is_not_applied_on_resume() {
        let mut session = session();
        let mut driver = FrameDriver::new();
        driver.frame(&mut session, [Intent::ToggleStartPause], 0);
        driver.frame(&mut session, NO_INPUT, 900);

        driver.frame(&mut session, [Intent::ToggleStartPause], 950);
        assert_eq!(session.phase(), Phase::Paused);
        driver.frame(&mut session, NO_INPUT, 60_000);

        // Resume frame: no delta.
        let step = driver.frame(&mut session, [Intent::ToggleStartPause], 120_000);
        assert_eq!(step, Step::Ignored);
        assert_eq!(session.current().unwrap().y, 0);
        assert_eq!(session.drop_accumulator_ms(), 900);

        assert_eq!(driver.frame(&mut session, NO_INPUT, 120_016), Step::Pending);
        assert_eq!(driver.frame(&mut session, NO_INPUT, 120_101), Step::Moved);
    }
}
