//! Scoring module - line clear points, level and fall pacing
//!
//! Level is always derived from score (`score / 1000 + 1`) and the fall
//! interval from level, so the three never disagree.

use crate::types::{
    BASE_FALL_INTERVAL_MS, FALL_INTERVAL_MIN_MS, FALL_INTERVAL_STEP_MS,
    HARD_DROP_POINTS_PER_ROW, LINE_SCORES, POINTS_PER_LEVEL,
};

/// Points for clearing `lines` rows in one landing
///
/// Clears beyond four (possible once frozen rows thaw together) score as
/// batches of four plus the remainder.
pub fn calculate_line_score(lines: usize) -> u32 {
    let batches = (lines / 4) as u32;
    let rest = lines % 4;
    LINE_SCORES[4]
        .saturating_mul(batches)
        .saturating_add(LINE_SCORES[rest])
}

/// Hard drop score: one point per row descended
pub fn calculate_drop_score(rows: u32) -> u32 {
    rows.saturating_mul(HARD_DROP_POINTS_PER_ROW)
}

/// Level for a score (1-based)
pub fn calculate_level(score: u32) -> u32 {
    score / POINTS_PER_LEVEL + 1
}

/// Milliseconds per one-row descent at `level`
pub fn get_fall_interval_ms(level: u32) -> u32 {
    let speedup = level
        .saturating_sub(1)
        .saturating_mul(FALL_INTERVAL_STEP_MS);
    BASE_FALL_INTERVAL_MS
        .saturating_sub(speedup)
        .max(FALL_INTERVAL_MIN_MS)
}

/// Score, level and fall interval for one session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreState {
    score: u32,
    level: u32,
    fall_interval_ms: u32,
}

impl ScoreState {
    pub fn new() -> Self {
        Self {
            score: 0,
            level: 1,
            fall_interval_ms: BASE_FALL_INTERVAL_MS,
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn fall_interval_ms(&self) -> u32 {
        self.fall_interval_ms
    }

    /// Award points for a landing that cleared `lines` rows; returns the points
    pub fn apply_line_clear(&mut self, lines: usize) -> u32 {
        let points = calculate_line_score(lines);
        self.add_points(points);
        points
    }

    /// Award the hard drop bonus for `rows` descended; returns the points
    pub fn apply_drop_bonus(&mut self, rows: u32) -> u32 {
        let points = calculate_drop_score(rows);
        self.add_points(points);
        points
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    fn add_points(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
        self.level = calculate_level(self.score);
        self.fall_interval_ms = get_fall_interval_ms(self.level);
    }
}

impl Default for ScoreState {
    fn default() -> Self {
        Self::new()
    }
}
