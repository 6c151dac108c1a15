//! Line clear module - row removal, scoring and level progression
//!
//! Scoring rules:
//! - A single clear event scores `LINE_SCORES[min(lines, 4)] * level`
//!   (100 / 300 / 500 / 800 before the multiplier).
//! - After scoring, if `score >= level * LEVEL_SCORE_STEP`, the level advances by
//!   exactly one and gravity speeds up. The check runs once per clear event, so a
//!   very large jump still advances a single level; later clears catch up.
//! - Locks that clear nothing leave score and level untouched.

use serde::{Deserialize, Serialize};

use crate::grid::Grid;
use crate::types::{BASE_DROP_MS, DROP_STEP_MS, LEVEL_SCORE_STEP, LINE_SCORES, MIN_DROP_MS};

/// Score, level and gravity for one session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    pub score: u32,
    pub level: u32,
    pub drop_interval_ms: u32,
}

impl Progress {
    /// Fresh session values: score 0, level 1, 1000ms gravity
    pub fn new() -> Self {
        Self {
            score: 0,
            level: 1,
            drop_interval_ms: drop_interval_ms(1),
        }
    }
}

impl Default for Progress {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of one clear event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ClearOutcome {
    pub lines: u32,
    pub points: u32,
    pub leveled_up: bool,
}

/// Base points for clearing `lines` rows at once
pub fn line_score(lines: usize) -> u32 {
    LINE_SCORES[lines.min(LINE_SCORES.len() - 1)]
}

/// Gravity interval for a level: `max(100, 1000 - (level - 1) * 100)`
pub fn drop_interval_ms(level: u32) -> u32 {
    let steps = level.saturating_sub(1).saturating_mul(DROP_STEP_MS);
    BASE_DROP_MS.saturating_sub(steps).max(MIN_DROP_MS)
}

/// Remove full rows from `grid` and fold the result into `progress`.
pub fn clear_lines(grid: &mut Grid, progress: &mut Progress) -> ClearOutcome {
    let lines = grid.clear_full_rows();
    if lines == 0 {
        return ClearOutcome::default();
    }

    let points = line_score(lines).saturating_mul(progress.level);
    progress.score = progress.score.saturating_add(points);

    let leveled_up = progress.score >= progress.level.saturating_mul(LEVEL_SCORE_STEP);
    if leveled_up {
        progress.level += 1;
        progress.drop_interval_ms = drop_interval_ms(progress.level);
        tracing::debug!(
            level = progress.level,
            drop_interval_ms = progress.drop_interval_ms,
            "level up"
        );
    }

    ClearOutcome {
        lines: lines as u32,
        points,
        leveled_up,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ColorId, BOARD_WIDTH};

    fn fill_rows(grid: &mut Grid, rows: std::ops::RangeInclusive<i8>) {
        for y in rows {
            for x in 0..BOARD_WIDTH as i8 {
                grid.set_cell(x, y, ColorId::new(2));
            }
        }
    }

    #[test]
    fn test_line_scores() {
        assert_eq!(line_score(0), 0);
        assert_eq!(line_score(1), 100);
        assert_eq!(line_score(2), 300);
        assert_eq!(line_score(3), 500);
        assert_eq!(line_score(4), 800);
        assert_eq!(line_score(6), 800);
    }

    #[test]
    fn test_drop_intervals() {
        assert_eq!(drop_interval_ms(1), 1000);
        assert_eq!(drop_interval_ms(2), 900);
        assert_eq!(drop_interval_ms(9), 200);
        assert_eq!(drop_interval_ms(10), 100);
        assert_eq!(drop_interval_ms(25), 100);
    }

    #[test]
    fn test_clear_scores_with_level_multiplier() {
        let mut grid = Grid::new();
        fill_rows(&mut grid, 18..=19);
        let mut progress = Progress {
            score: 0,
            level: 3,
            drop_interval_ms: drop_interval_ms(3),
        };

        let outcome = clear_lines(&mut grid, &mut progress);
        assert_eq!(outcome.lines, 2);
        assert_eq!(outcome.points, 900);
        assert!(!outcome.leveled_up);
        assert_eq!(progress.score, 900);
    }

    #[test]
    fn test_level_up_once_per_event() {
        let mut grid = Grid::new();
        fill_rows(&mut grid, 16..=19);
        let mut progress = Progress {
            score: 2900,
            level: 1,
            drop_interval_ms: 1000,
        };

        let outcome = clear_lines(&mut grid, &mut progress);
        assert_eq!(progress.score, 3700);
        assert!(outcome.leveled_up);
        assert_eq!(progress.level, 2);
        assert_eq!(progress.drop_interval_ms, 900);
    }

    #[test]
    fn test_no_clear_no_change() {
        let mut grid = Grid::new();
        let mut progress = Progress {
            score: 5000,
            level: 1,
            drop_interval_ms: 1000,
        };
        let outcome = clear_lines(&mut grid, &mut progress);
        assert_eq!(outcome, ClearOutcome::default());
        assert_eq!(progress.level, 1);
    }
}
