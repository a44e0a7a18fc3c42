use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use finmath_core::simple_interest::{self, SimpleInterestInput};
use finmath_core::types::{Frequency, Target};

use super::rate_from_flags;
use crate::input;

/// Arguments for a simple-interest problem
#[derive(Args)]
pub struct SimpleInterestArgs {
    /// Path to JSON or YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Unknown to solve for: capital, amount, rate, time or interest
    #[arg(long)]
    pub target: Option<String>,

    /// Principal C
    #[arg(long)]
    pub capital: Option<Decimal>,

    /// Future amount M
    #[arg(long)]
    pub amount: Option<Decimal>,

    /// Interest earned I
    #[arg(long)]
    pub interest: Option<Decimal>,

    /// Rate as a decimal fraction (0.12 for 12%)
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Period the rate is quoted in (e.g. annual, mensual)
    #[arg(long)]
    pub rate_period: Option<String>,

    /// Elapsed time in months
    #[arg(long)]
    pub months: Option<Decimal>,

    /// Period to report a computed rate in
    #[arg(long)]
    pub report_period: Option<String>,
}

pub fn run_simple_interest(args: SimpleInterestArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let problem: SimpleInterestInput = match input::load(args.input.as_deref())? {
        Some(problem) => problem,
        None => {
            let target = args
                .target
                .as_deref()
                .ok_or("--target is required (or provide --input)")?;
            SimpleInterestInput {
                capital: args.capital,
                amount: args.amount,
                interest: args.interest,
                rate: rate_from_flags(args.rate, args.rate_period.as_deref(), false, None),
                months: args.months,
                target: parse_target(target)?,
                requested_rate_period: args.report_period.as_deref().map(Frequency::from_name),
            }
        }
    };

    let result = simple_interest::solve_simple_interest(&problem)?;
    Ok(serde_json::to_value(result)?)
}

/// Parses a target name in English or Spanish.
pub(crate) fn parse_target(name: &str) -> Result<Target, Box<dyn std::error::Error>> {
    serde_json::from_value(Value::String(name.to_lowercase()))
        .map_err(|_| format!("Unknown target '{name}'").into())
}
