use clap::Args;
use rust_decimal::Decimal;
use serde_json::{json, Value};

use finmath_core::rates::humanize_months;

/// Arguments for rendering a month count as years, months and days
#[derive(Args)]
pub struct HumanizeArgs {
    /// Duration in months (fractions allowed)
    #[arg(long, allow_hyphen_values = true)]
    pub months: Decimal,
}

pub fn run_humanize(args: HumanizeArgs) -> Result<Value, Box<dyn std::error::Error>> {
    Ok(json!({
        "months": args.months,
        "human": humanize_months(args.months),
    }))
}
