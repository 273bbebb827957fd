use clap::Args;
use pomocycle_core::{drive, Config, Event, EventSink, ScriptedTicks};

use super::PlanArgs;

#[derive(Args, Debug)]
pub struct SimulateArgs {
    #[command(flatten)]
    pub plan: PlanArgs,
    /// Stop after this many ticks (required for infinite sessions)
    #[arg(long)]
    pub ticks: Option<u64>,
    /// Print every event as a JSON line before the summary
    #[arg(long)]
    pub events: bool,
}

pub fn run(args: SimulateArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let mut engine = args.plan.engine(&config);

    if !engine.can_start() {
        return Err("study duration is zero, nothing to simulate".into());
    }
    let budget = match (args.ticks, engine.plan().is_infinite) {
        (Some(ticks), _) => ticks,
        (None, true) => return Err("infinite sessions need --ticks".into()),
        (None, false) => u64::MAX,
    };

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()?;

    let mut printer = EventPrinter {
        enabled: args.events,
    };
    for event in engine.start() {
        printer.emit(event);
    }
    let mut ticks = ScriptedTicks::new(budget);
    let consumed = runtime.block_on(drive(&mut engine, &mut ticks, &mut printer));
    tracing::debug!(consumed, phase = ?engine.phase(), "simulation finished");

    println!("{}", serde_json::to_string_pretty(&engine.summary())?);
    Ok(())
}

/// Writes each event as a JSON line when enabled, drops it otherwise.
struct EventPrinter {
    enabled: bool,
}

impl EventSink for EventPrinter {
    fn emit(&mut self, event: Event) {
        if !self.enabled {
            return;
        }
        match serde_json::to_string(&event) {
            Ok(line) => println!("{line}"),
            Err(e) => tracing::warn!("failed to encode event: {e}"),
        }
    }
}
