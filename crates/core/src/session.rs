//! Game session module - the state machine tying the core together
//!
//! A [`GameSession`] owns the grid, the current and next piece, score/level/gravity,
//! the piece source and the stats store. There is no process-wide state: any
//! number of sessions can run side by side.
//!
//! Lifecycle: `Idle → Running ⇄ Paused`, `Running → Over`, `Over → Running` on restart.
//!
//! Time only advances through [`GameSession::tick`], fed by an external driver
//! with the elapsed milliseconds since the previous frame. The session never
//! schedules itself.

use std::fmt;

use crate::factory::{PieceFactory, PieceSource};
use crate::grid::Grid;
use crate::line_clear::{clear_lines, ClearOutcome, Progress};
use crate::piece::Piece;
use crate::snapshot::{ActiveSnapshot, RenderSnapshot};
use crate::stats::{NullStatsStore, Stats, StatsStore};
use crate::types::{Intent, Phase};

/// What a gravity step or drop did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Session not running; nothing happened
    Ignored,
    /// Time accumulated, no gravity step yet
    Pending,
    /// Piece moved down one row
    Moved,
    /// Piece locked and the next piece took its place
    Locked { lines: u32 },
    /// Piece locked and the next piece had no room: the game ended
    ToppedOut,
}

/// One game on one grid
pub struct GameSession {
    grid: Grid,
    current: Option<Piece>,
    next: Option<Piece>,
    progress: Progress,
    lines: u32,
    drop_accumulator_ms: u32,
    /// Running time of the current game (paused time excluded).
    play_time_ms: u64,
    phase: Phase,
    last_clear: Option<ClearOutcome>,
    source: Box<dyn PieceSource>,
    store: Box<dyn StatsStore>,
    stats: Stats,
}

impl GameSession {
    /// Create an idle session with a seeded random piece factory and no persistence
    pub fn new(seed: u64) -> Self {
        Self::with_parts(Box::new(PieceFactory::new(seed)), Box::new(NullStatsStore))
    }

    /// Create an idle session from an explicit piece source and stats store.
    ///
    /// Stats are loaded from the store here, once.
    pub fn with_parts(source: Box<dyn PieceSource>, mut store: Box<dyn StatsStore>) -> Self {
        let stats = store.load();
        Self {
            grid: Grid::new(),
            current: None,
            next: None,
            progress: Progress::new(),
            lines: 0,
            drop_accumulator_ms: 0,
            play_time_ms: 0,
            phase: Phase::Idle,
            last_clear: None,
            source,
            store,
            stats,
        }
    }

    /// Replace the piece source (takes effect from the next spawn)
    pub fn with_source(mut self, source: Box<dyn PieceSource>) -> Self {
        self.source = source;
        self
    }

    /// Replace the stats store and load stats from it
    pub fn with_stats_store(mut self, mut store: Box<dyn StatsStore>) -> Self {
        self.stats = store.load();
        self.store = store;
        self
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_over(&self) -> bool {
        self.phase == Phase::Over
    }

    pub fn score(&self) -> u32 {
        self.progress.score
    }

    pub fn level(&self) -> u32 {
        self.progress.level
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn drop_interval_ms(&self) -> u32 {
        self.progress.drop_interval_ms
    }

    pub fn drop_accumulator_ms(&self) -> u32 {
        self.drop_accumulator_ms
    }

    pub fn play_time_ms(&self) -> u64 {
        self.play_time_ms
    }

    pub fn progress(&self) -> Progress {
        self.progress
    }

    pub fn current(&self) -> Option<Piece> {
        self.current
    }

    pub fn next(&self) -> Option<Piece> {
        self.next
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Mutable grid access for setting up positions (puzzles, replays, tests).
    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    /// Outcome of the most recent lock's line clear
    pub fn last_clear(&self) -> Option<ClearOutcome> {
        self.last_clear
    }

    /// Landing row of the current piece
    pub fn ghost_y(&self) -> Option<i8> {
        self.current.map(|p| p.ghost_y(&self.grid))
    }

    /// Begin a fresh game. Only valid from `Idle` or `Over`.
    pub fn start(&mut self) -> bool {
        if !matches!(self.phase, Phase::Idle | Phase::Over) {
            return false;
        }

        self.grid.clear();
        self.progress = Progress::new();
        self.lines = 0;
        self.drop_accumulator_ms = 0;
        self.play_time_ms = 0;
        self.last_clear = None;
        self.current = Some(self.source.next_piece());
        self.next = Some(self.source.next_piece());
        self.phase = Phase::Running;

        tracing::info!(games_played = self.stats.games_played, "game started");
        if self.current.is_some_and(|p| p.collides(&self.grid)) {
            self.game_over();
        }
        true
    }

    /// Pause a running game or resume a paused one. No-op otherwise.
    pub fn toggle_pause(&mut self) -> bool {
        self.phase = match self.phase {
            Phase::Running => Phase::Paused,
            Phase::Paused => Phase::Running,
            Phase::Idle | Phase::Over => return false,
        };
        tracing::debug!(phase = self.phase.as_str(), "pause toggled");
        true
    }

    /// Advance time by `elapsed_ms`.
    ///
    /// Gravity fires once the accumulated time exceeds the drop interval; the
    /// accumulator then restarts from zero, so at most one row per call.
    pub fn tick(&mut self, elapsed_ms: u32) -> Step {
        if self.phase != Phase::Running {
            return Step::Ignored;
        }

        self.play_time_ms = self.play_time_ms.saturating_add(u64::from(elapsed_ms));
        self.drop_accumulator_ms = self.drop_accumulator_ms.saturating_add(elapsed_ms);
        if self.drop_accumulator_ms <= self.progress.drop_interval_ms {
            return Step::Pending;
        }

        self.drop_accumulator_ms = 0;
        if self.shift(0, 1) {
            Step::Moved
        } else {
            self.lock_current()
        }
    }

    /// Apply a device-independent intent.
    ///
    /// Intents the current phase does not accept are ignored. Returns whether the
    /// intent changed anything.
    pub fn apply_intent(&mut self, intent: Intent) -> bool {
        if !self.phase.accepts(intent) {
            return false;
        }

        match intent {
            Intent::MoveLeft => self.shift(-1, 0),
            Intent::MoveRight => self.shift(1, 0),
            Intent::SoftDrop => self.soft_drop() != Step::Ignored,
            Intent::Rotate => self.rotate(),
            Intent::HardDrop => self.hard_drop() != Step::Ignored,
            Intent::ToggleStartPause => match self.phase {
                Phase::Idle | Phase::Over => self.start(),
                Phase::Running | Phase::Paused => self.toggle_pause(),
            },
        }
    }

    pub fn on_move_left(&mut self) -> bool {
        self.apply_intent(Intent::MoveLeft)
    }

    pub fn on_move_right(&mut self) -> bool {
        self.apply_intent(Intent::MoveRight)
    }

    pub fn on_soft_drop(&mut self) -> bool {
        self.apply_intent(Intent::SoftDrop)
    }

    pub fn on_rotate(&mut self) -> bool {
        self.apply_intent(Intent::Rotate)
    }

    pub fn on_hard_drop(&mut self) -> bool {
        self.apply_intent(Intent::HardDrop)
    }

    pub fn on_toggle_start_pause(&mut self) -> bool {
        self.apply_intent(Intent::ToggleStartPause)
    }

    /// End the game and fold it into the stats. Only valid while a game is in progress.
    pub fn game_over(&mut self) {
        if !matches!(self.phase, Phase::Running | Phase::Paused) {
            return;
        }
        self.phase = Phase::Over;
        self.stats
            .record_game(self.progress.score, self.play_time_ms / 1000);
        self.store.save(&self.stats);

        tracing::info!(
            score = self.progress.score,
            level = self.progress.level,
            lines = self.lines,
            play_time_ms = self.play_time_ms,
            "game over"
        );
    }

    /// Fill `out` with the current render state (no allocation).
    pub fn snapshot_into(&self, out: &mut RenderSnapshot) {
        self.grid.write_u8_grid(&mut out.board);

        let live = self.phase != Phase::Idle;
        out.active = self.current.filter(|_| live).map(ActiveSnapshot::from);
        out.ghost_y = if matches!(self.phase, Phase::Running | Phase::Paused) {
            self.ghost_y()
        } else {
            None
        };
        out.next = self.next.filter(|_| live).map(ActiveSnapshot::from);
        out.score = self.progress.score;
        out.level = self.progress.level;
        out.lines = self.lines;
        out.high_score = self.stats.high_score.max(self.progress.score);
        out.phase = self.phase;
    }

    pub fn snapshot(&self) -> RenderSnapshot {
        let mut s = RenderSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Try to move the current piece
    fn shift(&mut self, dx: i8, dy: i8) -> bool {
        match self.current.as_mut() {
            Some(piece) => piece.try_move(dx, dy, &self.grid),
            None => false,
        }
    }

    fn rotate(&mut self) -> bool {
        let Some(piece) = self.current.as_mut() else {
            return false;
        };
        if !piece.rotate(&self.grid) {
            return false;
        }
        self.stats.rotations += 1;
        self.store.save(&self.stats);
        true
    }

    /// One row down; lock if the piece cannot move.
    fn soft_drop(&mut self) -> Step {
        if self.current.is_none() {
            return Step::Ignored;
        }
        let step = if self.shift(0, 1) {
            Step::Moved
        } else {
            self.lock_current()
        };
        self.drop_accumulator_ms = 0;
        step
    }

    /// Drop to the landing row and lock.
    fn hard_drop(&mut self) -> Step {
        if self.current.is_none() {
            return Step::Ignored;
        }
        while self.shift(0, 1) {}
        self.stats.hard_drops += 1;
        self.lock_current()
    }

    /// Merge, clear, promote, spawn-check.
    ///
    /// Shared by gravity, soft drop and hard drop; completes before returning so
    /// no caller can observe a half-merged grid.
    fn lock_current(&mut self) -> Step {
        let Some(piece) = self.current.take() else {
            return Step::Ignored;
        };

        self.grid.merge(&piece);
        self.stats.pieces_placed += 1;

        let outcome = clear_lines(&mut self.grid, &mut self.progress);
        self.lines += outcome.lines;
        self.stats.lines_cleared += u64::from(outcome.lines);
        self.last_clear = Some(outcome);

        let promoted = match self.next.take() {
            Some(next) => next,
            None => self.source.next_piece(),
        };
        self.next = Some(self.source.next_piece());
        self.current = Some(promoted);
        self.drop_accumulator_ms = 0;

        tracing::debug!(
            kind = piece.kind.as_str(),
            x = piece.x,
            y = piece.y,
            lines = outcome.lines,
            score = self.progress.score,
            "piece locked"
        );

        if promoted.collides(&self.grid) {
            self.game_over();
            return Step::ToppedOut;
        }

        self.store.save(&self.stats);
        Step::Locked {
            lines: outcome.lines,
        }
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new(1)
    }
}

impl fmt::Debug for GameSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameSession")
            .field("phase", &self.phase)
            .field("current", &self.current)
            .field("next", &self.next)
            .field("progress", &self.progress)
            .field("lines", &self.lines)
            .field("drop_accumulator_ms", &self.drop_accumulator_ms)
            .field("play_time_ms", &self.play_time_ms)
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}
