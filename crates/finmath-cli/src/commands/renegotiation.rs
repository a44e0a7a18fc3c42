use clap::Args;
use serde_json::Value;

use finmath_core::equation_of_value::{self, RenegotiationInput};

use crate::input;

/// Arguments for a debt renegotiation (equation of value)
#[derive(Args)]
pub struct RenegotiateArgs {
    /// Path to JSON or YAML input file
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_renegotiate(args: RenegotiateArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let problem: RenegotiationInput = input::require(args.input.as_deref(), "renegotiation")?;
    let result = equation_of_value::solve_renegotiation(&problem)?;
    Ok(serde_json::to_value(result)?)
}
