use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use uuid::Uuid;

use crate::scoring::{self, ScoreLabel};
use crate::timer::{Mode, Phase, SessionPlan, SessionStats};

/// Every state change of the session engine produces an Event.
/// Front ends render from them; nothing else flows back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    /// Emitted on every tick and every phase transition.
    StateChanged {
        snapshot: SessionSnapshot,
        at: DateTime<Utc>,
    },
    /// A study or break segment ran out. Drives the audible cue.
    SegmentComplete {
        /// The mode of the segment that just finished.
        mode: Mode,
        cycle: u32,
        at: DateTime<Utc>,
    },
    SessionComplete {
        summary: SessionSummary,
        at: DateTime<Utc>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub phase: Phase,
    pub mode: Mode,
    pub remaining_secs: u64,
    pub current_cycle: u32,
    /// `None` for infinite sessions.
    pub total_cycles: Option<u32>,
    pub stats: SessionStats,
}

/// End-of-session report handed to the front end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub session_id: Option<Uuid>,
    pub score: u8,
    pub label: ScoreLabel,
    pub planned_study_time: u64,
    pub actual_study_time: u64,
    pub total_break_time: u64,
    pub completed_cycles: u32,
    pub total_cycles: u32,
    pub is_infinite: bool,
}

impl SessionSummary {
    pub fn new(session_id: Option<Uuid>, plan: &SessionPlan, stats: &SessionStats) -> Self {
        let score = scoring::score(stats, plan.total_cycles);
        Self {
            session_id,
            score: score.value,
            label: score.label,
            planned_study_time: stats.planned_study_time,
            actual_study_time: stats.actual_study_time,
            total_break_time: stats.total_break_time,
            completed_cycles: stats.completed_cycles,
            total_cycles: plan.total_cycles,
            is_infinite: plan.is_infinite,
        }
    }

    /// Denominator shown next to `completed_cycles`.
    ///
    /// Infinite sessions have no target, so they count against themselves.
    pub fn cycle_target(&self) -> u32 {
        if self.is_infinite {
            self.completed_cycles
        } else {
            self.total_cycles
        }
    }
}

/// Receiver for engine events.
pub trait EventSink {
    fn emit(&mut self, event: Event);
}

impl EventSink for Vec<Event> {
    fn emit(&mut self, event: Event) {
        self.push(event);
    }
}

impl EventSink for mpsc::UnboundedSender<Event> {
    fn emit(&mut self, event: Event) {
        // A dropped receiver means nobody is rendering any more.
        if self.send(event).is_err() {
            tracing::trace!("event receiver dropped");
        }
    }
}
