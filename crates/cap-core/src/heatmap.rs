//! Load heatmap bucketing.
//!
//! Maps a `(used, available)` pair to a discrete bucket for color-coding.
//! Thresholds are fixed: 0, 0.5, 0.8 and 1.0, with boundary values
//! belonging to the higher bucket. Comparisons use integer arithmetic so
//! the boundaries are exact.

use serde::{Deserialize, Serialize};

/// Discrete load category for a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadBucket {
    /// No capacity or nothing scheduled.
    None,
    /// Below half load.
    Low,
    /// At least half, below 0.8.
    Medium,
    /// At least 0.8, below full.
    High,
    /// At or over full load.
    Over,
}

impl LoadBucket {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Over => "over",
        }
    }

    /// Single-character glyph for terminal rendering.
    #[must_use]
    pub const fn glyph(self) -> char {
        match self {
            Self::None => ' ',
            Self::Low => '░',
            Self::Medium => '▒',
            Self::High => '▓',
            Self::Over => '█',
        }
    }
}

/// Buckets a used/total pair.
///
/// `total` is the number of slots actually available for work (leave and
/// holidays already subtracted), not the raw span capacity.
#[must_use]
pub const fn bucket(used: u32, total: u32) -> LoadBucket {
    if total == 0 || used == 0 {
        return LoadBucket::None;
    }
    let used = used as u64;
    let total = total as u64;
    if used * 10 < total * 5 {
        LoadBucket::Low
    } else if used * 10 < total * 8 {
        LoadBucket::Medium
    } else if used < total {
        LoadBucket::High
    } else {
        LoadBucket::Over
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_total_and_zero_used_are_none() {
        assert_eq!(bucket(0, 0), LoadBucket::None);
        assert_eq!(bucket(0, 10), LoadBucket::None);
        assert_eq!(bucket(5, 0), LoadBucket::None);
    }

    #[test]
    fn boundaries_belong_to_the_higher_bucket() {
        // Exactly 0.5 is the medium lower bound, not low.
        assert_eq!(bucket(5, 10), LoadBucket::Medium);
        // Exactly 0.8 is the high lower bound.
        assert_eq!(bucket(8, 10), LoadBucket::High);
        // Exactly 1.0 is over.
        assert_eq!(bucket(10, 10), LoadBucket::Over);
    }

    #[test]
    fn interior_values() {
        assert_eq!(bucket(1, 10), LoadBucket::Low);
        assert_eq!(bucket(4, 10), LoadBucket::Low);
        assert_eq!(bucket(7, 10), LoadBucket::Medium);
        assert_eq!(bucket(9, 10), LoadBucket::High);
        assert_eq!(bucket(12, 10), LoadBucket::Over);
    }

    #[test]
    fn odd_totals_round_exactly() {
        // 3/7 ≈ 0.43 → low; 4/7 ≈ 0.57 → medium; 6/7 ≈ 0.86 → high.
        assert_eq!(bucket(3, 7), LoadBucket::Low);
        assert_eq!(bucket(4, 7), LoadBucket::Medium);
        assert_eq!(bucket(6, 7), LoadBucket::High);
    }
}
