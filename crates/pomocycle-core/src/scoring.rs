//! End-of-session scoring.
//!
//! A session score is built from four terms:
//!
//! | Term | Range | Source |
//! |------|-------|--------|
//! | Base | 0..60 | study completion, capped at 100% |
//! | Cycle bonus | 0..25 | completed cycles / planned cycles |
//! | Break penalty | 0.. | break time above 30% of study time |
//! | Overachievement | 0..15 | study completion above 100% |
//!
//! The sum is clamped to `0..=100` and rounded.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::timer::SessionStats;

const BASE_WEIGHT: f64 = 60.0;
const CYCLE_WEIGHT: f64 = 25.0;
const BREAK_ALLOWANCE: f64 = 0.3;
const BREAK_PENALTY_WEIGHT: f64 = 20.0;
const OVERACHIEVEMENT_WEIGHT: f64 = 10.0;
const OVERACHIEVEMENT_CAP: f64 = 15.0;

/// Qualitative band a score falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ScoreLabel {
    #[serde(rename = "Keep going!")]
    KeepGoing,
    #[serde(rename = "Good effort!")]
    GoodEffort,
    #[serde(rename = "Great work!")]
    GreatWork,
    #[serde(rename = "Excellent!")]
    Excellent,
    #[serde(rename = "Outstanding!")]
    Outstanding,
}

impl ScoreLabel {
    pub fn for_score(score: u8) -> Self {
        match score {
            90.. => ScoreLabel::Outstanding,
            75..=89 => ScoreLabel::Excellent,
            60..=74 => ScoreLabel::GreatWork,
            40..=59 => ScoreLabel::GoodEffort,
            _ => ScoreLabel::KeepGoing,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ScoreLabel::Outstanding => "Outstanding!",
            ScoreLabel::Excellent => "Excellent!",
            ScoreLabel::GreatWork => "Great work!",
            ScoreLabel::GoodEffort => "Good effort!",
            ScoreLabel::KeepGoing => "Keep going!",
        }
    }
}

impl fmt::Display for ScoreLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub value: u8,
    pub label: ScoreLabel,
}

impl Score {
    fn new(value: u8) -> Self {
        Self {
            value,
            label: ScoreLabel::for_score(value),
        }
    }
}

/// Score a session from its accumulated statistics.
///
/// Sessions with no planned study time score zero.
pub fn score(stats: &SessionStats, total_cycles: u32) -> Score {
    if stats.planned_study_time == 0 {
        return Score::new(0);
    }

    let actual = stats.actual_study_time as f64;
    let completion = actual / stats.planned_study_time as f64;

    let base = completion.min(1.0) * BASE_WEIGHT;
    let cycle_bonus = stats.completed_cycles as f64 / total_cycles.max(1) as f64 * CYCLE_WEIGHT;

    let break_ratio = stats.total_break_time as f64 / actual.max(1.0);
    let break_penalty = if break_ratio > BREAK_ALLOWANCE {
        (break_ratio - BREAK_ALLOWANCE) * BREAK_PENALTY_WEIGHT
    } else {
        0.0
    };

    let overachievement = if completion > 1.0 {
        ((completion - 1.0) * OVERACHIEVEMENT_WEIGHT).min(OVERACHIEVEMENT_CAP)
    } else {
        0.0
    };

    let raw = base + cycle_bonus - break_penalty + overachievement;
    Score::new(raw.clamp(0.0, 100.0).round() as u8)
}
