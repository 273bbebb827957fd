//! Clock-face helpers for front ends.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Hours/minutes/seconds as shown on the countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayTime {
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

impl DisplayTime {
    pub fn from_secs(total: u64) -> Self {
        Self {
            hours: total / 3600,
            minutes: (total % 3600) / 60,
            seconds: total % 60,
        }
    }
}

impl fmt::Display for DisplayTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}:{:02}", self.hours, self.minutes, self.seconds)
    }
}

/// Compact human duration: `1h 2m 3s`, `4m 5s`, `6s`.
pub fn format_duration(secs: u64) -> String {
    let t = DisplayTime::from_secs(secs);
    if t.hours > 0 {
        format!("{}h {}m {}s", t.hours, t.minutes, t.seconds)
    } else if t.minutes > 0 {
        format!("{}m {}s", t.minutes, t.seconds)
    } else {
        format!("{}s", t.seconds)
    }
}
