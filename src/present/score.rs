#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::{f64::consts::PI, fmt::Display};

use crate::constants::{GOOD_TIER_PERCENT, SCORE_RING_RADIUS, WARNING_TIER_PERCENT};

/// Severity bucket of a score percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    /// 75% and above.
    Good,
    /// From 40% up to, not including, 75%.
    Warning,
    /// Below 40%.
    Critical,
}

impl Tier {
    /// Picks the tier for a percentage in `0.0..=100.0`.
    pub fn for_percentage(percentage: f64) -> Self {
        if percentage >= GOOD_TIER_PERCENT {
            Tier::Good
        } else if percentage >= WARNING_TIER_PERCENT {
            Tier::Warning
        } else {
            Tier::Critical
        }
    }

    /// Lowercase name, also used as a CSS class.
    pub fn as_str(self) -> &'static str {
        match self {
            Tier::Good => "good",
            Tier::Warning => "warning",
            Tier::Critical => "critical",
        }
    }
}

impl Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything needed to draw the score ring.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreGauge {
    /// Points awarded.
    pub score:      u32,
    /// Rubric ceiling.
    pub max_score:  u32,
    /// `score / max_score * 100`, or 0 when the ceiling is 0.
    pub percentage: f64,
    /// Severity bucket of `percentage`.
    pub tier:       Tier,
}

impl ScoreGauge {
    /// Builds the gauge for a score.
    pub fn new(score: u32, max_score: u32) -> Self {
        let percentage = if max_score > 0 {
            f64::from(score) / f64::from(max_score) * 100.0
        } else {
            0.0
        };
        Self {
            score,
            max_score,
            percentage,
            tier: Tier::for_percentage(percentage),
        }
    }

    /// Circumference of the ring.
    pub fn circumference(&self) -> f64 {
        2.0 * PI * SCORE_RING_RADIUS
    }

    /// Stroke dash offset leaving the unearned share of the ring empty.
    pub fn dash_offset(&self) -> f64 {
        let circumference = self.circumference();
        circumference - (self.percentage.clamp(0.0, 100.0) / 100.0) * circumference
    }
}

impl Display for ScoreGauge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.score, self.max_score)
    }
}
