use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::FinMathError;
use crate::rates::{
    checked_div, checked_mul, effective_rate_for_period, growth_factor, months_per_period,
};
use crate::types::*;
use crate::FinMathResult;

/// A compound-interest problem over one explicit compounding frequency.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompoundInterestInput {
    #[serde(default)]
    pub capital: Option<Money>,
    #[serde(default, alias = "monto_futuro")]
    pub amount: Option<Money>,
    #[serde(default, alias = "tasa")]
    pub rate: Option<InterestRate>,
    #[serde(default, alias = "tiempo_meses")]
    pub months: Option<Months>,
    /// Conversion (compounding) frequency; never inferred
    #[serde(alias = "capitalizacion")]
    pub compounding: Frequency,
    #[serde(alias = "incognita")]
    pub target: Target,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompoundInterestOutput {
    pub target: Target,
    pub formula: String,
    /// Solved value, rounded to cents
    pub result: Money,
    /// Number of compounding periods n
    pub periods: Periods,
    /// Effective rate per compounding period i
    pub periodic_rate: Rate,
}

/// Closed-form compound growth (`M = C(1+i)^n`) or discount (`C = M/(1+i)^n`).
pub fn solve_compound_interest(
    input: &CompoundInterestInput,
) -> FinMathResult<ComputationOutput<CompoundInterestOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    if input.compounding == Frequency::Unrecognized {
        warnings.push("Unrecognized compounding frequency treated as annual".into());
    }

    let months = input.months.ok_or_else(|| missing_operand("time in months"))?;
    let n = checked_div(months, months_per_period(input.compounding), "compounding periods")?;
    let i = effective_rate_for_period(input.rate.as_ref(), input.compounding);
    if input.rate.is_none() {
        warnings.push("No rate supplied; solved with a zero rate".into());
    }

    tracing::debug!(periods = %n, periodic_rate = %i, unknown = %input.target, "compound interest");

    let factor = growth_factor(i, n, "compound growth factor")?;

    let (formula, value) = match input.target {
        Target::Amount => {
            let c = input.capital.ok_or_else(|| missing_operand("capital"))?;
            ("M = C * (1 + i)^n", checked_mul(c, factor, "compound growth")?)
        }
        Target::Capital => {
            let m = input.amount.ok_or_else(|| missing_operand("amount"))?;
            ("C = M / (1 + i)^n", checked_div(m, factor, "compound discount factor")?)
        }
        other => {
            return Err(FinMathError::InvalidInput {
                field: "target".into(),
                reason: format!("compound interest solves for Capital or Amount, not {other}"),
            });
        }
    };

    let output = CompoundInterestOutput {
        target: input.target,
        formula: formula.to_string(),
        result: value.round_dp(2),
        periods: n,
        periodic_rate: i,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        &format!("Compound interest: {formula}"),
        input,
        warnings,
        elapsed,
        output,
    ))
}

fn missing_operand(what: &str) -> FinMathError {
    FinMathError::InsufficientData(format!(
        "missing operand for compound-interest target: {what}"
    ))
}
