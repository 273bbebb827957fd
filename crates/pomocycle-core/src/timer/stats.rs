use serde::{Deserialize, Serialize};

use super::plan::Mode;

/// Time accounting for a single session, in seconds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStats {
    pub planned_study_time: u64,
    pub actual_study_time: u64,
    pub total_break_time: u64,
    pub completed_cycles: u32,
}

impl SessionStats {
    /// Fresh accounting for a session planned to contain `planned_study_time`.
    pub fn planned(planned_study_time: u64) -> Self {
        Self {
            planned_study_time,
            ..Self::default()
        }
    }

    /// Credit `secs` to the counter belonging to `mode`.
    pub fn credit(&mut self, mode: Mode, secs: u64) {
        match mode {
            Mode::Study => self.actual_study_time = self.actual_study_time.saturating_add(secs),
            Mode::Break => self.total_break_time = self.total_break_time.saturating_add(secs),
        }
    }
}
