mod driver;
mod engine;
mod plan;
mod stats;
mod ticker;

pub use driver::drive;
pub use engine::{Phase, SessionEngine};
pub use plan::{Mode, PlanField, SessionPlan};
pub use stats::SessionStats;
pub use ticker::{IntervalTicks, ScriptedTicks, TickSource};
