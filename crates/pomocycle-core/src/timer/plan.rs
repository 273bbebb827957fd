use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Study,
    Break,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Study => "study",
            Mode::Break => "break",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A user-editable field of a [`SessionPlan`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanField {
    StudyHours,
    StudyMinutes,
    StudySeconds,
    BreakMinutes,
    BreakSeconds,
    Cycles,
}

impl PlanField {
    pub const ALL: [PlanField; 6] = [
        PlanField::StudyHours,
        PlanField::StudyMinutes,
        PlanField::StudySeconds,
        PlanField::BreakMinutes,
        PlanField::BreakSeconds,
        PlanField::Cycles,
    ];

    /// Largest value the field accepts.
    pub fn max(&self) -> u32 {
        match self {
            PlanField::StudyHours => 23,
            PlanField::Cycles => 99,
            _ => 59,
        }
    }

    /// Smallest value the field accepts.
    pub fn min(&self) -> u32 {
        match self {
            PlanField::Cycles => 1,
            _ => 0,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            PlanField::StudyHours => "hours",
            PlanField::StudyMinutes => "minutes",
            PlanField::StudySeconds => "seconds",
            PlanField::BreakMinutes => "break-minutes",
            PlanField::BreakSeconds => "break-seconds",
            PlanField::Cycles => "cycles",
        }
    }

    /// Coerce raw user input into a value for this field.
    ///
    /// Non-digit characters are dropped, an empty result reads as zero, and
    /// the number is clamped into `min()..=max()`. Digit runs too long for a
    /// `u64` are treated as over the maximum.
    pub fn sanitize(&self, raw: &str) -> u32 {
        let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
        let value = if digits.is_empty() {
            0
        } else {
            digits.parse::<u64>().unwrap_or(u64::MAX)
        };
        value.clamp(self.min() as u64, self.max() as u64) as u32
    }
}

impl fmt::Display for PlanField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Study/break durations and cycle count for one session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionPlan {
    #[serde(default)]
    pub study_hours: u32,
    #[serde(default = "default_study_minutes")]
    pub study_minutes: u32,
    #[serde(default)]
    pub study_seconds: u32,
    #[serde(default = "default_break_minutes")]
    pub break_minutes: u32,
    #[serde(default)]
    pub break_seconds: u32,
    #[serde(default = "default_total_cycles")]
    pub total_cycles: u32,
    #[serde(default)]
    pub is_infinite: bool,
}

fn default_study_minutes() -> u32 {
    25
}
fn default_break_minutes() -> u32 {
    5
}
fn default_total_cycles() -> u32 {
    4
}

impl Default for SessionPlan {
    fn default() -> Self {
        Self {
            study_hours: 0,
            study_minutes: default_study_minutes(),
            study_seconds: 0,
            break_minutes: default_break_minutes(),
            break_seconds: 0,
            total_cycles: default_total_cycles(),
            is_infinite: false,
        }
    }
}

impl SessionPlan {
    /// Study segment length in seconds.
    pub fn study_duration_secs(&self) -> u64 {
        self.study_hours as u64 * 3600 + self.study_minutes as u64 * 60 + self.study_seconds as u64
    }

    /// Break segment length in seconds.
    pub fn break_duration_secs(&self) -> u64 {
        self.break_minutes as u64 * 60 + self.break_seconds as u64
    }

    /// Study time the session is expected to contain.
    ///
    /// Infinite sessions plan a single study segment.
    pub fn planned_study_secs(&self) -> u64 {
        let cycles = if self.is_infinite {
            1
        } else {
            self.total_cycles as u64
        };
        self.study_duration_secs() * cycles
    }

    pub fn get(&self, field: PlanField) -> u32 {
        match field {
            PlanField::StudyHours => self.study_hours,
            PlanField::StudyMinutes => self.study_minutes,
            PlanField::StudySeconds => self.study_seconds,
            PlanField::BreakMinutes => self.break_minutes,
            PlanField::BreakSeconds => self.break_seconds,
            PlanField::Cycles => self.total_cycles,
        }
    }

    /// Sanitize `raw` for `field`, store it and return the stored value.
    pub fn set_raw(&mut self, field: PlanField, raw: &str) -> u32 {
        let value = field.sanitize(raw);
        self.set(field, value);
        value
    }

    fn set(&mut self, field: PlanField, value: u32) {
        let slot = match field {
            PlanField::StudyHours => &mut self.study_hours,
            PlanField::StudyMinutes => &mut self.study_minutes,
            PlanField::StudySeconds => &mut self.study_seconds,
            PlanField::BreakMinutes => &mut self.break_minutes,
            PlanField::BreakSeconds => &mut self.break_seconds,
            PlanField::Cycles => &mut self.total_cycles,
        };
        *slot = value;
    }

    /// Clamp every field into its valid range.
    ///
    /// Used for plans that did not come through [`SessionPlan::set_raw`],
    /// e.g. ones read from a preferences file.
    pub fn sanitized(mut self) -> Self {
        for field in PlanField::ALL {
            let value = self.get(field).clamp(field.min(), field.max());
            self.set(field, value);
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_plan_is_25_5_4() {
        let plan = SessionPlan::default();
        assert_eq!(plan.study_duration_secs(), 1500);
        assert_eq!(plan.break_duration_secs(), 300);
        assert_eq!(plan.total_cycles, 4);
        assert_eq!(plan.planned_study_secs(), 6000);
    }

    #[test]
    fn infinite_plan_counts_one_segment() {
        let plan = SessionPlan {
            is_infinite: true,
            ..SessionPlan::default()
        };
        assert_eq!(plan.planned_study_secs(), 1500);
    }

    #[test]
    fn sanitize_strips_non_digits() {
        assert_eq!(PlanField::StudyMinutes.sanitize("1a2"), 12);
        assert_eq!(PlanField::StudyMinutes.sanitize("-7"), 7);
        assert_eq!(PlanField::StudySeconds.sanitize("abc"), 0);
        assert_eq!(PlanField::StudySeconds.sanitize(""), 0);
    }

    #[test]
    fn sanitize_clamps_to_field_max() {
        assert_eq!(PlanField::StudyHours.sanitize("24"), 23);
        assert_eq!(PlanField::BreakMinutes.sanitize("75"), 59);
        assert_eq!(PlanField::Cycles.sanitize("150"), 99);
        assert_eq!(PlanField::StudyMinutes.sanitize("99999999999999999999999"), 59);
    }

    #[test]
    fn cycles_never_drop_below_one() {
        assert_eq!(PlanField::Cycles.sanitize("0"), 1);
        assert_eq!(PlanField::Cycles.sanitize(""), 1);
    }

    #[test]
    fn sanitized_clamps_out_of_range_plan() {
        let plan = SessionPlan {
            study_hours: 40,
            study_minutes: 61,
            total_cycles: 0,
            ..SessionPlan::default()
        }
        .sanitized();
        assert_eq!(plan.study_hours, 23);
        assert_eq!(plan.study_minutes, 59);
        assert_eq!(plan.total_cycles, 1);
    }
}
