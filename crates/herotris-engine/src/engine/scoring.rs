use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Line-clear scoring and speed progression.
///
/// Clearing `n` lines at once awards `n * line_clear_base * n` points (100,
/// 400, 900, 1600 for one to four lines with the default base) and shortens
/// the drop interval by `n * drop_interval_step`, never below
/// `min_drop_interval`. Clearing no lines changes nothing.
///
/// # Example
///
/// ```
/// use std::time::Duration;
///
/// use herotris_engine::ScoringPolicy;
///
/// let policy = ScoringPolicy::default();
/// assert_eq!(policy.score_for(4), 1600);
///
/// let interval = policy.next_drop_interval(Duration::from_millis(1000), 2);
/// assert_eq!(interval, Duration::from_millis(900));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringPolicy {
    /// Points for a single cleared line; multi-line clears scale quadratically.
    pub line_clear_base: usize,
    /// Drop interval at game start and after reset.
    #[serde(with = "millis")]
    pub initial_drop_interval: Duration,
    /// Floor of the drop interval.
    #[serde(with = "millis")]
    pub min_drop_interval: Duration,
    /// Interval decrement per cleared line.
    #[serde(with = "millis")]
    pub drop_interval_step: Duration,
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        Self {
            line_clear_base: 100,
            initial_drop_interval: Duration::from_millis(1000),
            min_drop_interval: Duration::from_millis(200),
            drop_interval_step: Duration::from_millis(50),
        }
    }
}

impl ScoringPolicy {
    /// Points awarded for clearing `cleared_lines` lines at once.
    #[must_use]
    pub fn score_for(&self, cleared_lines: usize) -> usize {
        cleared_lines * self.line_clear_base * cleared_lines
    }

    /// Drop interval after clearing `cleared_lines` lines at once.
    #[must_use]
    pub fn next_drop_interval(&self, current: Duration, cleared_lines: usize) -> Duration {
        if cleared_lines == 0 {
            return current;
        }
        let step = u32::try_from(cleared_lines)
            .ok()
            .and_then(|n| self.drop_interval_step.checked_mul(n))
            .unwrap_or(Duration::MAX);
        current.saturating_sub(step).max(self.min_drop_interval)
    }
}

mod millis {
    use std::time::Duration;

    use serde::{Deserialize as _, Deserializer, Serializer};

    pub(super) fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(u64::try_from(duration.as_millis()).unwrap_or(u64::MAX))
    }

    pub(super) fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}
