//! # pomocycle Core Library
//!
//! Business logic for a study/break cycle timer. Front ends (the
//! `pomocycle` CLI, or anything else) drive a [`SessionEngine`] with commands
//! and ticks, and render from the [`Event`]s it returns.
//!
//! ## Architecture
//!
//! - **Session Engine**: tick-driven state machine over a [`SessionPlan`],
//!   accumulating [`SessionStats`] as time passes
//! - **Tick Sources**: [`TickSource`] abstracts the one-second schedule; a
//!   tokio interval for real use, a scripted count for tests and simulation
//! - **Scoring**: pure end-of-session score and label
//! - **Storage**: TOML preferences holding the default plan
//!
//! ## Key Components
//!
//! - [`SessionEngine`]: Core state machine
//! - [`drive`]: Cooperative loop feeding ticks into an engine
//! - [`score`]: Session scoring
//! - [`Config`]: Application configuration management

pub mod display;
pub mod error;
pub mod events;
pub mod scoring;
pub mod storage;
pub mod timer;

pub use display::{format_duration, DisplayTime};
pub use error::{ConfigError, CoreError};
pub use events::{Event, EventSink, SessionSnapshot, SessionSummary};
pub use scoring::{score, Score, ScoreLabel};
pub use storage::Config;
pub use timer::{
    drive, IntervalTicks, Mode, Phase, PlanField, ScriptedTicks, SessionEngine, SessionPlan,
    SessionStats, TickSource,
};
