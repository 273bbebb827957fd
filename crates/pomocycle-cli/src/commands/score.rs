use clap::Args;
use pomocycle_core::{score, SessionStats};

#[derive(Args, Debug)]
pub struct ScoreArgs {
    /// Planned study time in seconds
    #[arg(long)]
    pub planned: u64,
    /// Actual study time in seconds
    #[arg(long)]
    pub actual: u64,
    /// Total break time in seconds
    #[arg(long, default_value = "0")]
    pub break_time: u64,
    /// Completed cycles
    #[arg(long, default_value = "0")]
    pub completed: u32,
    /// Planned cycles
    #[arg(long, default_value = "1")]
    pub cycles: u32,
}

pub fn run(args: ScoreArgs) -> Result<(), Box<dyn std::error::Error>> {
    let stats = SessionStats {
        planned_study_time: args.planned,
        actual_study_time: args.actual,
        total_break_time: args.break_time,
        completed_cycles: args.completed,
    };
    let result = score(&stats, args.cycles);
    let json = serde_json::json!({
        "score": result.value,
        "label": result.label,
    });
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
