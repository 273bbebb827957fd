pub mod config;
pub mod run;
pub mod score;
pub mod simulate;

use clap::Args;
use pomocycle_core::{Config, PlanField, SessionEngine};

/// Plan overrides shared by `run` and `simulate`.
///
/// Values are taken as raw text and coerced the same way the engine coerces
/// any user input: stray characters are dropped and numbers are clamped.
#[derive(Args, Debug, Default)]
pub struct PlanArgs {
    /// Study hours (0-23)
    #[arg(long, allow_hyphen_values = true)]
    pub hours: Option<String>,
    /// Study minutes (0-59)
    #[arg(long, allow_hyphen_values = true)]
    pub minutes: Option<String>,
    /// Study seconds (0-59)
    #[arg(long, allow_hyphen_values = true)]
    pub seconds: Option<String>,
    /// Break minutes (0-59)
    #[arg(long, allow_hyphen_values = true)]
    pub break_minutes: Option<String>,
    /// Break seconds (0-59)
    #[arg(long, allow_hyphen_values = true)]
    pub break_seconds: Option<String>,
    /// Number of study/break cycles (1-99)
    #[arg(long, allow_hyphen_values = true)]
    pub cycles: Option<String>,
    /// Keep cycling until stopped
    #[arg(long)]
    pub infinite: bool,
}

impl PlanArgs {
    /// Build an idle engine from the saved defaults plus these overrides.
    pub fn engine(&self, config: &Config) -> SessionEngine {
        let mut engine = SessionEngine::new(config.session.clone());
        let overrides = [
            (PlanField::StudyHours, &self.hours),
            (PlanField::StudyMinutes, &self.minutes),
            (PlanField::StudySeconds, &self.seconds),
            (PlanField::BreakMinutes, &self.break_minutes),
            (PlanField::BreakSeconds, &self.break_seconds),
            (PlanField::Cycles, &self.cycles),
        ];
        for (field, raw) in overrides {
            if let Some(raw) = raw {
                engine.configure(field, raw);
            }
        }
        if self.infinite && !engine.plan().is_infinite {
            engine.toggle_infinite();
        }
        engine
    }
}
