use clap::Args;
use serde_json::Value;

use finmath_core::dispatch::{self, Extraction, Problem};

use crate::input;

/// Arguments for solving a tagged problem record
#[derive(Args)]
pub struct SolveArgs {
    /// Path to JSON or YAML problem record with a `type` (or `tipo`) tag
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_solve(args: SolveArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let record: Value = input::require(args.input.as_deref(), "solve")?;
    let problem = Problem::from_value(record)?;
    tracing::info!(problem_type = %problem.problem_type(), "dispatching problem");
    let solution = dispatch::solve(&problem)?;
    Ok(serde_json::to_value(solution)?)
}

/// Arguments for analysing an extraction (reasoning + problem)
#[derive(Args)]
pub struct AnalyzeArgs {
    /// Path to JSON or YAML extraction with `reasoning` and `problem`
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_analyze(args: AnalyzeArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let extraction: Extraction = input::require(args.input.as_deref(), "analyze")?;
    let report = dispatch::analyze(&extraction)?;
    Ok(serde_json::to_value(report)?)
}
