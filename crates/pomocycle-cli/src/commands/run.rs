use std::io::Write;

use clap::Args;
use pomocycle_core::{
    format_duration, Config, DisplayTime, Event, EventSink, IntervalTicks, Mode, Phase,
    SessionEngine, SessionSnapshot, SessionSummary, TickSource,
};
use tokio::io::{AsyncBufReadExt, BufReader};

use super::PlanArgs;

#[derive(Args, Debug)]
pub struct RunArgs {
    #[command(flatten)]
    pub plan: PlanArgs,
    /// Print events as JSON lines instead of the countdown
    #[arg(long)]
    pub json: bool,
    /// Do not ring the terminal bell between segments
    #[arg(long)]
    pub no_bell: bool,
}

pub fn run(args: RunArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let engine = args.plan.engine(&config);
    if !engine.can_start() {
        return Err("study duration is zero, nothing to run".into());
    }

    let terminal = Terminal {
        json: args.json,
        bell: config.notifications.bell && !args.no_bell,
    };

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let result = runtime.block_on(session_loop(engine, terminal));
    // A pending stdin read would otherwise hold up shutdown.
    runtime.shutdown_background();
    result
}

async fn session_loop(
    mut engine: SessionEngine,
    mut terminal: Terminal,
) -> Result<(), Box<dyn std::error::Error>> {
    if !terminal.json {
        eprintln!("commands: [s]tart/resume  [p]ause  [r]eset  [q]uit (then Enter)");
    }

    let mut ticks = IntervalTicks::every_second();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;

    terminal.emit_all(engine.start());

    loop {
        if !stdin_open && !engine.is_running() {
            break;
        }

        tokio::select! {
            _ = ticks.next_tick(), if engine.is_running() => {
                let events = engine.tick();
                let finished = events
                    .iter()
                    .any(|e| matches!(e, Event::SessionComplete { .. }));
                terminal.emit_all(events);
                if finished {
                    return Ok(());
                }
            }
            line = lines.next_line(), if stdin_open => {
                let Some(line) = line? else {
                    stdin_open = false;
                    continue;
                };
                match line.trim() {
                    "s" | "start" => {
                        let events = engine.start();
                        if !events.is_empty() {
                            ticks.restart();
                        }
                        terminal.emit_all(events);
                    }
                    "p" | "pause" => terminal.emit_all(engine.pause()),
                    "r" | "reset" => terminal.emit_all(engine.reset()),
                    "q" | "quit" => break,
                    "" => {}
                    other => eprintln!("unknown command: {other}"),
                }
            }
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    // Quitting early still reports what was accumulated.
    if engine.phase() != Phase::Idle {
        terminal.print_summary(&engine.summary());
    }
    Ok(())
}

/// Terminal renderer for engine events.
struct Terminal {
    json: bool,
    bell: bool,
}

impl Terminal {
    fn emit_all(&mut self, events: Vec<Event>) {
        for event in events {
            self.emit(event);
        }
    }

    fn render_state(&self, snapshot: &SessionSnapshot) {
        let cycles = match snapshot.total_cycles {
            Some(total) => total.to_string(),
            None => "∞".to_string(),
        };
        let badge = match snapshot.mode {
            Mode::Study => "Study",
            Mode::Break => "Break",
        };
        let line = match snapshot.phase {
            Phase::Idle => "reset, [s] to start again".to_string(),
            Phase::Paused => format!(
                "{badge}  cycle {}/{cycles}  {}  (paused)",
                snapshot.current_cycle,
                DisplayTime::from_secs(snapshot.remaining_secs)
            ),
            Phase::Running | Phase::Complete => format!(
                "{badge}  cycle {}/{cycles}  {}",
                snapshot.current_cycle,
                DisplayTime::from_secs(snapshot.remaining_secs)
            ),
        };
        print!("\r\x1b[2K{line}");
        let _ = std::io::stdout().flush();
    }

    fn print_summary(&self, summary: &SessionSummary) {
        if self.json {
            if let Ok(json) = serde_json::to_string(summary) {
                println!("{json}");
            }
            return;
        }
        println!();
        println!("Session summary");
        println!("  Score:    {} ({})", summary.score, summary.label);
        println!("  Planned:  {}", format_duration(summary.planned_study_time));
        println!("  Studied:  {}", format_duration(summary.actual_study_time));
        println!("  Break:    {}", format_duration(summary.total_break_time));
        println!(
            "  Cycles:   {} / {}",
            summary.completed_cycles,
            summary.cycle_target()
        );
    }
}

impl EventSink for Terminal {
    fn emit(&mut self, event: Event) {
        if self.json {
            match serde_json::to_string(&event) {
                Ok(json) => println!("{json}"),
                Err(e) => tracing::warn!("cannot encode event: {e}"),
            }
            if self.bell && matches!(event, Event::SegmentComplete { .. }) {
                eprint!("\x07");
            }
            return;
        }

        match event {
            Event::StateChanged { snapshot, .. } => self.render_state(&snapshot),
            Event::SegmentComplete { mode, cycle, .. } => {
                if self.bell {
                    print!("\x07");
                }
                println!();
                println!("{mode} segment of cycle {cycle} complete");
            }
            Event::SessionComplete { summary, .. } => self.print_summary(&summary),
        }
    }
}
