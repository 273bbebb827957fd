//! Session engine implementation.
//!
//! The engine is a tick-driven state machine. It owns no timer of its own:
//! the caller invokes `tick()` once per elapsed second while the session is
//! running (see [`super::ticker`] and [`super::driver`]).
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Running <-> Paused
//!         Running -> Complete
//! (any) -> Idle            via reset()
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! let mut engine = SessionEngine::new(SessionPlan::default());
//! engine.start();
//! // once per second:
//! for event in engine.tick() { render(event); }
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use super::plan::{Mode, PlanField, SessionPlan};
use super::stats::SessionStats;
use crate::display::DisplayTime;
use crate::events::{Event, SessionSnapshot, SessionSummary};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Idle,
    Running,
    Paused,
    Complete,
}

/// Core session engine.
///
/// Owns the plan, the countdown state and the accumulated statistics.
/// Every command returns the events it produced; an empty vector means the
/// command did not apply in the current phase.
#[derive(Debug, Clone)]
pub struct SessionEngine {
    plan: SessionPlan,
    phase: Phase,
    mode: Mode,
    remaining_secs: u64,
    current_cycle: u32,
    stats: SessionStats,
    session_id: Option<Uuid>,
}

impl SessionEngine {
    /// Create an idle engine. Out-of-range plan fields are clamped.
    pub fn new(plan: SessionPlan) -> Self {
        Self {
            plan: plan.sanitized(),
            phase: Phase::Idle,
            mode: Mode::Study,
            remaining_secs: 0,
            current_cycle: 1,
            stats: SessionStats::default(),
            session_id: None,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn remaining_secs(&self) -> u64 {
        self.remaining_secs
    }

    pub fn current_cycle(&self) -> u32 {
        self.current_cycle
    }

    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    pub fn plan(&self) -> &SessionPlan {
        &self.plan
    }

    pub fn session_id(&self) -> Option<Uuid> {
        self.session_id
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    /// Whether `start()` would do anything right now.
    pub fn can_start(&self) -> bool {
        self.plan.study_duration_secs() > 0
            && matches!(self.phase, Phase::Idle | Phase::Paused)
    }

    /// The clock face: the configured study time while idle, otherwise the
    /// countdown.
    pub fn current_display(&self) -> DisplayTime {
        match self.phase {
            Phase::Idle => DisplayTime {
                hours: self.plan.study_hours as u64,
                minutes: self.plan.study_minutes as u64,
                seconds: self.plan.study_seconds as u64,
            },
            _ => DisplayTime::from_secs(self.remaining_secs),
        }
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            phase: self.phase,
            mode: self.mode,
            remaining_secs: self.remaining_secs,
            current_cycle: self.current_cycle,
            total_cycles: (!self.plan.is_infinite).then_some(self.plan.total_cycles),
            stats: self.stats,
        }
    }

    /// Summary of the statistics accumulated so far.
    pub fn summary(&self) -> SessionSummary {
        SessionSummary::new(self.session_id, &self.plan, &self.stats)
    }

    // ── Configuration ────────────────────────────────────────────────

    /// Update one plan field from raw user input.
    ///
    /// Returns the value actually stored, or `None` when the session is not
    /// idle and the plan is locked.
    pub fn configure(&mut self, field: PlanField, raw: &str) -> Option<u32> {
        if self.phase != Phase::Idle {
            debug!(%field, "plan locked outside idle, ignoring");
            return None;
        }
        let value = self.plan.set_raw(field, raw);
        debug!(%field, value, "plan field updated");
        Some(value)
    }

    /// Flip the infinite flag. Returns the new value, or `None` when not idle.
    pub fn toggle_infinite(&mut self) -> Option<bool> {
        if self.phase != Phase::Idle {
            return None;
        }
        self.plan.is_infinite = !self.plan.is_infinite;
        Some(self.plan.is_infinite)
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub fn start(&mut self) -> Vec<Event> {
        if !self.can_start() {
            return Vec::new();
        }

        if self.phase == Phase::Idle {
            let session_id = Uuid::new_v4();
            self.session_id = Some(session_id);
            self.stats = SessionStats::planned(self.plan.planned_study_secs());
            self.current_cycle = 1;
            self.mode = Mode::Study;
            self.remaining_secs = self.plan.study_duration_secs();
            info!(
                %session_id,
                study_secs = self.plan.study_duration_secs(),
                break_secs = self.plan.break_duration_secs(),
                cycles = self.plan.total_cycles,
                infinite = self.plan.is_infinite,
                "session started"
            );
        } else {
            debug!(remaining_secs = self.remaining_secs, "session resumed");
        }

        self.phase = Phase::Running;
        vec![self.state_changed()]
    }

    pub fn pause(&mut self) -> Vec<Event> {
        if self.phase != Phase::Running {
            return Vec::new();
        }
        self.phase = Phase::Paused;
        debug!(remaining_secs = self.remaining_secs, "session paused");
        vec![self.state_changed()]
    }

    pub fn reset(&mut self) -> Vec<Event> {
        self.phase = Phase::Idle;
        self.mode = Mode::Study;
        self.remaining_secs = 0;
        self.current_cycle = 1;
        self.stats = SessionStats::default();
        self.session_id = None;
        debug!("session reset");
        vec![self.state_changed()]
    }

    /// Advance one second. Only acts while running.
    pub fn tick(&mut self) -> Vec<Event> {
        if self.phase != Phase::Running {
            return Vec::new();
        }

        if self.remaining_secs > 1 {
            self.remaining_secs -= 1;
            self.stats.credit(self.mode, 1);
            return vec![self.state_changed()];
        }

        let mut events = vec![Event::SegmentComplete {
            mode: self.mode,
            cycle: self.current_cycle,
            at: Utc::now(),
        }];

        match self.mode {
            Mode::Study => {
                // The whole segment is credited on top of the per-second
                // increments already applied.
                self.stats.credit(Mode::Study, self.plan.study_duration_secs());

                if !self.plan.is_infinite && self.current_cycle >= self.plan.total_cycles {
                    self.stats.completed_cycles = self.current_cycle;
                    self.phase = Phase::Complete;
                    let summary = self.summary();
                    info!(
                        session_id = ?self.session_id,
                        score = summary.score,
                        completed_cycles = summary.completed_cycles,
                        "session complete"
                    );
                    events.push(self.state_changed());
                    events.push(Event::SessionComplete {
                        summary,
                        at: Utc::now(),
                    });
                    return events;
                }

                self.mode = Mode::Break;
                self.remaining_secs = self.plan.break_duration_secs();
            }
            Mode::Break => {
                self.stats.credit(Mode::Break, self.plan.break_duration_secs());
                self.stats.completed_cycles = self.current_cycle;
                self.current_cycle += 1;
                self.mode = Mode::Study;
                self.remaining_secs = self.plan.study_duration_secs();
            }
        }

        debug!(
            mode = %self.mode,
            cycle = self.current_cycle,
            remaining_secs = self.remaining_secs,
            "segment boundary"
        );
        events.push(self.state_changed());
        events
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn state_changed(&self) -> Event {
        Event::StateChanged {
            snapshot: self.snapshot(),
            at: Utc::now(),
        }
    }
}

impl Default for SessionEngine {
    fn default() -> Self {
        Self::new(SessionPlan::default())
    }
}
