//! Stats module - cumulative play statistics and the store seam
//!
//! The session keeps a [`Stats`] value, updates it on every mutating event and
//! hands it to a [`StatsStore`]. Stores are infallible at this seam: a store that
//! cannot read or write logs the fault and carries on, so storage trouble never
//! reaches the game loop.

use std::cell::RefCell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

/// Counters that survive across sessions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Stats {
    pub games_played: u32,
    pub high_score: u32,
    pub total_score: u64,
    pub lines_cleared: u64,
    pub pieces_placed: u64,
    pub rotations: u64,
    pub hard_drops: u64,
    pub longest_game_secs: u64,
}

impl Stats {
    /// Mean final score over finished games (0 before the first game ends).
    pub fn average_score(&self) -> u32 {
        if self.games_played == 0 {
            return 0;
        }
        (self.total_score / u64::from(self.games_played)) as u32
    }

    /// Fold a finished game into the totals.
    pub fn record_game(&mut self, score: u32, duration_secs: u64) {
        self.games_played = self.games_played.saturating_add(1);
        self.total_score = self.total_score.saturating_add(u64::from(score));
        self.high_score = self.high_score.max(score);
        self.longest_game_secs = self.longest_game_secs.max(duration_secs);
    }
}

/// Persistent home for [`Stats`].
///
/// `load` is called once when a session is created; `save` after every event
/// that changed the counters.
pub trait StatsStore {
    fn load(&mut self) -> Stats;
    fn save(&mut self, stats: &Stats);
}

/// Store that keeps nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NullStatsStore;

impl StatsStore for NullStatsStore {
    fn load(&mut self) -> Stats {
        Stats::default()
    }

    fn save(&mut self, _stats: &Stats) {}
}

#[derive(Debug, Default)]
struct MemoryInner {
    stats: Stats,
    saves: u32,
}

/// In-memory store with a shared handle.
///
/// Clones observe the same data, so a caller can hand one clone to a session
/// and inspect what it saved through another.
#[derive(Debug, Clone, Default)]
pub struct MemoryStatsStore {
    inner: Rc<RefCell<MemoryInner>>,
}

impl MemoryStatsStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with existing counters
    pub fn with_stats(stats: Stats) -> Self {
        let store = Self::default();
        store.inner.borrow_mut().stats = stats;
        store
    }

    /// Last saved (or seeded) counters
    pub fn stats(&self) -> Stats {
        self.inner.borrow().stats
    }

    /// Number of `save` calls so far
    pub fn save_count(&self) -> u32 {
        self.inner.borrow().saves
    }
}

impl StatsStore for MemoryStatsStore {
    fn load(&mut self) -> Stats {
        self.inner.borrow().stats
    }

    fn save(&mut self, stats: &Stats) {
        let mut inner = self.inner.borrow_mut();
        inner.stats = *stats;
        inner.saves += 1;
    }
}
