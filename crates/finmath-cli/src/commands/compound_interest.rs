use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use finmath_core::compound_interest::{self, CompoundInterestInput};
use finmath_core::types::Frequency;

use super::rate_from_flags;
use super::simple_interest::parse_target;
use crate::input;

/// Arguments for a compound-interest problem
#[derive(Args)]
pub struct CompoundInterestArgs {
    /// Path to JSON or YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Unknown to solve for: capital or amount
    #[arg(long)]
    pub target: Option<String>,

    /// Principal C
    #[arg(long)]
    pub capital: Option<Decimal>,

    /// Future amount M
    #[arg(long)]
    pub amount: Option<Decimal>,

    /// Rate as a decimal fraction (0.12 for 12%)
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Period the rate is quoted in
    #[arg(long)]
    pub rate_period: Option<String>,

    /// Treat the rate as nominal, split over the compounding frequency
    #[arg(long)]
    pub nominal: bool,

    /// Compounding frequency (e.g. quarterly, trimestral)
    #[arg(long)]
    pub compounding: Option<String>,

    /// Elapsed time in months
    #[arg(long)]
    pub months: Option<Decimal>,
}

pub fn run_compound_interest(
    args: CompoundInterestArgs,
) -> Result<Value, Box<dyn std::error::Error>> {
    let problem: CompoundInterestInput = match input::load(args.input.as_deref())? {
        Some(problem) => problem,
        None => {
            let target = args
                .target
                .as_deref()
                .ok_or("--target is required (or provide --input)")?;
            let compounding = args
                .compounding
                .as_deref()
                .ok_or("--compounding is required (or provide --input)")?;
            CompoundInterestInput {
                capital: args.capital,
                amount: args.amount,
                rate: rate_from_flags(
                    args.rate,
                    args.rate_period.as_deref(),
                    args.nominal,
                    Some(compounding),
                ),
                months: args.months,
                compounding: Frequency::from_name(compounding),
                target: parse_target(target)?,
            }
        }
    };

    let result = compound_interest::solve_compound_interest(&problem)?;
    Ok(serde_json::to_value(result)?)
}
