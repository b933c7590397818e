use serde::{Deserialize, Serialize};

use super::scoring::ScoringPolicy;

/// Largest number of lines a single lock can clear (the tallest piece is
/// four cells high).
pub const MAX_LINES_PER_LOCK: usize = 4;

/// Game statistics tracking score, lines cleared, and piece count.
///
/// - **Score**: points earned from line clears, never decreasing
/// - **Completed pieces**: total number of pieces locked
/// - **Line clear distribution**: how many locks cleared 0, 1, 2, 3 or 4 lines
///
/// # Example
///
/// ```
/// use herotris_engine::{GameStats, ScoringPolicy};
///
/// let policy = ScoringPolicy::default();
/// let mut stats = GameStats::new();
/// stats.complete_piece_drop(4, &policy);
///
/// assert_eq!(stats.score(), 1600);
/// assert_eq!(stats.total_cleared_lines(), 4);
/// assert_eq!(stats.line_cleared_counter()[4], 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStats {
    score: usize,
    completed_pieces: usize,
    total_cleared_lines: usize,
    line_cleared_counter: [usize; MAX_LINES_PER_LOCK + 1],
}

impl Default for GameStats {
    fn default() -> Self {
        Self::new()
    }
}

impl GameStats {
    /// Creates a new game statistics tracker with all counters at zero.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            score: 0,
            completed_pieces: 0,
            total_cleared_lines: 0,
            line_cleared_counter: [0; MAX_LINES_PER_LOCK + 1],
        }
    }

    #[must_use]
    pub const fn score(&self) -> usize {
        self.score
    }

    /// Returns the total number of pieces that have been locked into place.
    #[must_use]
    pub const fn completed_pieces(&self) -> usize {
        self.completed_pieces
    }

    #[must_use]
    pub const fn total_cleared_lines(&self) -> usize {
        self.total_cleared_lines
    }

    /// Returns a histogram of locks by number of lines cleared.
    ///
    /// Index `n` counts the locks that cleared exactly `n` lines.
    #[must_use]
    pub const fn line_cleared_counter(&self) -> &[usize; MAX_LINES_PER_LOCK + 1] {
        &self.line_cleared_counter
    }

    /// Updates statistics after a piece lock that cleared `cleared_lines`
    /// lines.
    pub fn complete_piece_drop(&mut self, cleared_lines: usize, policy: &ScoringPolicy) {
        self.completed_pieces += 1;
        self.total_cleared_lines += cleared_lines;
        if let Some(count) = self.line_cleared_counter.get_mut(cleared_lines) {
            *count += 1;
        }
        self.score += policy.score_for(cleared_lines);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_clear_leaves_score() {
        let policy = ScoringPolicy::default();
        let mut stats = GameStats::new();
        stats.complete_piece_drop(0, &policy);
        assert_eq!(stats.score(), 0);
        assert_eq!(stats.completed_pieces(), 1);
        assert_eq!(stats.line_cleared_counter(), &[1, 0, 0, 0, 0]);
    }

    #[test]
    fn test_accumulates_over_drops() {
        let policy = ScoringPolicy::default();
        let mut stats = GameStats::new();
        for lines in [1, 2, 0, 1, 3] {
            stats.complete_piece_drop(lines, &policy);
        }
        assert_eq!(stats.score(), 100 + 400 + 100 + 900);
        assert_eq!(stats.total_cleared_lines(), 7);
        assert_eq!(stats.completed_pieces(), 5);
        assert_eq!(stats.line_cleared_counter(), &[1, 2, 1, 1, 0]);
    }

    #[test]
    fn test_stats_serialization() {
        let policy = ScoringPolicy::default();
        let mut stats = GameStats::new();
        stats.complete_piece_drop(2, &policy);
        let json = serde_json::to_string(&stats).unwrap();
        let back: GameStats = serde_json::from_str(&json).unwrap();
        assert_eq!(back, stats);
    }
}
