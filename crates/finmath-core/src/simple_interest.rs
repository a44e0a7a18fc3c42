use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::FinMathError;
use crate::rates::{
    checked_add, checked_div, checked_mul, humanize_months, months_per_period, periods_per_year,
};
use crate::types::*;
use crate::FinMathResult;

// ---------------------------------------------------------------------------
// Input / Output types
// ---------------------------------------------------------------------------

/// A simple-interest problem: any subset of C, M, I, rate and time, plus the unknown.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimpleInterestInput {
    /// Principal (present value)
    #[serde(default)]
    pub capital: Option<Money>,
    /// Final amount (future value)
    #[serde(default, alias = "monto_futuro")]
    pub amount: Option<Money>,
    /// Interest earned in money terms
    #[serde(default, alias = "interes_ganado")]
    pub interest: Option<Money>,
    #[serde(default, alias = "tasa")]
    pub rate: Option<InterestRate>,
    /// Elapsed time in months
    #[serde(default, alias = "tiempo_meses")]
    pub months: Option<Months>,
    #[serde(alias = "incognita")]
    pub target: Target,
    /// Period the caller wants a computed rate expressed in
    #[serde(default, alias = "periodo_tasa_solicitada")]
    pub requested_rate_period: Option<Frequency>,
}

/// The principal / interest / amount triangle. Any one side follows from the other two.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MonetaryTriangle {
    pub capital: Option<Money>,
    pub amount: Option<Money>,
    pub interest: Option<Money>,
}

/// One side of the monetary triangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Capital,
    Amount,
    Interest,
}

impl Side {
    fn name(self) -> &'static str {
        match self {
            Side::Capital => "capital",
            Side::Amount => "amount",
            Side::Interest => "interest",
        }
    }
}

impl MonetaryTriangle {
    /// Derives the missing side when exactly two are known.
    pub fn fill(&mut self) -> FinMathResult<()> {
        let missing = match (self.capital, self.amount, self.interest) {
            (Some(_), Some(_), None) => Side::Interest,
            (None, Some(_), Some(_)) => Side::Capital,
            (Some(_), None, Some(_)) => Side::Amount,
            _ => return Ok(()),
        };
        self.rederive(missing)?;
        Ok(())
    }

    /// Recomputes `side` from the other two so that `C + I = M`.
    ///
    /// Returns the value it overwrote when that value disagreed. Does nothing
    /// while either of the other two sides is unknown.
    pub fn rederive(&mut self, side: Side) -> FinMathResult<Option<Money>> {
        let derived = match (side, self.capital, self.amount, self.interest) {
            (Side::Capital, _, Some(m), Some(i)) => checked_add(m, -i, "capital (M - I)")?,
            (Side::Amount, Some(c), _, Some(i)) => checked_add(c, i, "amount (C + I)")?,
            (Side::Interest, Some(c), Some(m), _) => checked_add(m, -c, "interest (M - C)")?,
            _ => return Ok(None),
        };
        Ok(self.set(side, derived))
    }

    pub fn get(&self, side: Side) -> Option<Money> {
        match side {
            Side::Capital => self.capital,
            Side::Amount => self.amount,
            Side::Interest => self.interest,
        }
    }

    /// Stores `value` on `side`, returning the previous value when it differed.
    pub fn set(&mut self, side: Side, value: Money) -> Option<Money> {
        let slot = match side {
            Side::Capital => &mut self.capital,
            Side::Amount => &mut self.amount,
            Side::Interest => &mut self.interest,
        };
        slot.replace(value).filter(|old| *old != value)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputedRate {
    /// Rate per `period`
    pub value: Rate,
    pub period: Frequency,
    /// e.g. "1.5% Trimestral"
    pub label: String,
    /// `value * periods_per_year(period)`
    pub annual: Rate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputedTime {
    /// Number of rate periods, rounded to 4 dp
    pub periods: Periods,
    pub unit: Frequency,
    pub months: Months,
    pub human: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateSummary {
    /// Nominal annual rate r = i * m
    pub nominal_annual: Rate,
    /// Effective rate per period i
    pub periodic: Rate,
    pub frequency: Frequency,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeSummary {
    pub human: String,
    pub periods: Periods,
    pub unit: Frequency,
}

/// Consolidated view of the operation once every variable is known.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinancialSummary {
    pub capital: Money,
    pub interest: Money,
    pub amount: Money,
    pub rate: RateSummary,
    pub time: TimeSummary,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimpleInterestOutput {
    pub target: Target,
    pub formula: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub computed_rate: Option<ComputedRate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub computed_time: Option<ComputedTime>,
    pub summary: FinancialSummary,
}

// ---------------------------------------------------------------------------
// Solver
// ---------------------------------------------------------------------------

/// Solves a simple-interest problem for its declared target.
///
/// Order matters: the C/M/I triangle is filled first, then the time base is
/// fixed from the rate's period, then the target is derived, then the side that
/// depends on it is re-derived so `C + I = M` holds. A supplied value that had
/// to be replaced is reported in the warnings.
pub fn solve_simple_interest(
    input: &SimpleInterestInput,
) -> FinMathResult<ComputationOutput<SimpleInterestOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let mut triangle = MonetaryTriangle {
        capital: input.capital,
        amount: input.amount,
        interest: input.interest,
    };
    triangle.fill()?;

    // Time base: periods of the rate's own length, or plain months without a rate.
    let mut months = input.months;
    let mut rate: Option<Rate> = None;
    let mut periods: Option<Periods> = None;
    if let Some(r) = &input.rate {
        if r.period == Frequency::Unrecognized {
            warnings.push("Unrecognized rate period treated as annual".into());
        }
        rate = Some(r.value);
        if let Some(t) = months {
            periods = Some(checked_div(t, months_per_period(r.period), "period count")?);
        }
    } else if let Some(t) = months {
        periods = Some(t);
    }

    tracing::debug!(unknown = %input.target, ?rate, ?periods, ?months, "simple interest time base");

    let mut computed_rate = None;
    let mut computed_time = None;

    // Each arm yields its formula and the triangle side that now depends on the solved value.
    let (formula, dependent) = match input.target {
        Target::Rate => {
            let (Some(interest), Some(capital), Some(t)) =
                (triangle.interest, triangle.capital, months)
            else {
                return Err(insufficient(Target::Rate, "interest, capital and time"));
            };
            if checked_mul(capital, t, "rate derivation (C * t)")?.is_zero() {
                return Err(FinMathError::DivisionByZero {
                    context: "rate derivation (C * t)".into(),
                });
            }
            let period = input.requested_rate_period.unwrap_or(Frequency::Monthly);
            let n = checked_div(t, months_per_period(period), "requested period count")?;
            let base = checked_mul(capital, n, "rate derivation (C * n)")?;
            let i = checked_div(interest, base, "rate derivation (C * n)")?;
            let annual = checked_mul(i, Decimal::from(periods_per_year(period)), "annualized rate")?;
            computed_rate = Some(ComputedRate {
                value: i,
                period,
                label: rate_label(i, period),
                annual,
            });
            rate = Some(i);
            ("i = I / (C * n)", Side::Amount)
        }
        Target::Time => {
            let (Some(interest), Some(capital), Some(i), Some(quoted)) =
                (triangle.interest, triangle.capital, rate, input.rate.as_ref())
            else {
                return Err(insufficient(Target::Time, "interest, capital and rate"));
            };
            let base = checked_mul(capital, i, "time derivation (C * i)")?;
            let n = checked_div(interest, base, "time derivation (C * i)")?;
            let t = checked_mul(n, months_per_period(quoted.period), "time in months")?;
            computed_time = Some(ComputedTime {
                periods: n.round_dp(4),
                unit: quoted.period,
                months: t,
                human: humanize_months(t),
            });
            periods = Some(n);
            months = Some(t);
            ("n = I / (C * i)", Side::Amount)
        }
        Target::Capital => {
            // {M, i, n} takes precedence over {I, i, n} when both are available.
            let (formula, capital, dependent) =
                match (triangle.amount, triangle.interest, rate, periods) {
                    (Some(m), _, Some(i), Some(n)) => {
                        let growth = checked_add(
                            Decimal::ONE,
                            checked_mul(i, n, "capital derivation (i*n)")?,
                            "capital derivation (1 + i*n)",
                        )?;
                        (
                            "C = M / (1 + i*n)",
                            checked_div(m, growth, "capital derivation (1 + i*n)")?,
                            Side::Interest,
                        )
                    }
                    (_, Some(interest), Some(i), Some(n)) => (
                        "C = I / (i*n)",
                        checked_div(
                            interest,
                            checked_mul(i, n, "capital derivation (i*n)")?,
                            "capital derivation (i*n)",
                        )?,
                        Side::Amount,
                    ),
                    _ => {
                        return Err(insufficient(
                            Target::Capital,
                            "amount, rate and time, or interest, rate and time",
                        ))
                    }
                };
            if let Some(old) = triangle.set(Side::Capital, capital) {
                warnings.push(replaced(Side::Capital, old, capital));
            }
            (formula, dependent)
        }
        Target::Amount => {
            let (Some(c), Some(i), Some(n)) = (triangle.capital, rate, periods) else {
                return Err(insufficient(Target::Amount, "capital, rate and time"));
            };
            let growth = checked_add(
                Decimal::ONE,
                checked_mul(i, n, "amount derivation (i*n)")?,
                "amount derivation (1 + i*n)",
            )?;
            let amount = checked_mul(c, growth, "amount derivation C * (1 + i*n)")?;
            if let Some(old) = triangle.set(Side::Amount, amount) {
                warnings.push(replaced(Side::Amount, old, amount));
            }
            ("M = C * (1 + i*n)", Side::Interest)
        }
        Target::Interest => {
            let (Some(c), Some(i), Some(n)) = (triangle.capital, rate, periods) else {
                return Err(insufficient(Target::Interest, "capital, rate and time"));
            };
            let interest = checked_mul(
                checked_mul(c, i, "interest derivation (C * i)")?,
                n,
                "interest derivation (C * i * n)",
            )?;
            if let Some(old) = triangle.set(Side::Interest, interest) {
                warnings.push(replaced(Side::Interest, old, interest));
            }
            ("I = C * i * n", Side::Amount)
        }
        Target::Discount | Target::FaceValue => {
            return Err(FinMathError::InvalidInput {
                field: "target".into(),
                reason: format!("{} is not a simple-interest unknown", input.target),
            });
        }
    };

    // Over-specified inputs leave a stale side behind; bring it back in line with C + I = M.
    if let Some(old) = triangle.rederive(dependent)? {
        if let Some(new) = triangle.get(dependent) {
            warnings.push(replaced(dependent, old, new));
        }
    }
    triangle.fill()?;

    let (Some(capital), Some(amount), Some(interest)) =
        (triangle.capital, triangle.amount, triangle.interest)
    else {
        return Err(FinMathError::InsufficientData(
            "capital, amount and interest could not all be resolved".into(),
        ));
    };

    // Reporting frequency: the rate's own period, else the requested one, else monthly.
    let frequency = input
        .rate
        .as_ref()
        .map(|r| r.period)
        .or(input.requested_rate_period)
        .unwrap_or(Frequency::Monthly);
    // Without a quoted rate, n is the plain month count.
    let time_unit = input.rate.as_ref().map(|r| r.period).unwrap_or(Frequency::Monthly);
    let m = Decimal::from(periods_per_year(frequency));
    let periodic = rate.unwrap_or(Decimal::ZERO);
    let period_count = periods.unwrap_or(Decimal::ZERO);
    let human = match months {
        Some(t) if !t.is_zero() => humanize_months(t),
        _ => humanize_months(checked_mul(period_count, months_per_period(time_unit), "time in months")?),
    };

    let output = SimpleInterestOutput {
        target: input.target,
        formula: formula.to_string(),
        computed_rate,
        computed_time,
        summary: FinancialSummary {
            capital,
            interest,
            amount,
            rate: RateSummary {
                nominal_annual: checked_mul(periodic, m, "nominal annual rate")?,
                periodic,
                frequency,
            },
            time: TimeSummary {
                human,
                periods: period_count,
                unit: time_unit,
            },
        },
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        &format!("Simple interest: {formula}"),
        input,
        warnings,
        elapsed,
        output,
    ))
}

fn insufficient(target: Target, needs: &str) -> FinMathError {
    FinMathError::InsufficientData(format!("target {target} requires {needs}"))
}

fn replaced(side: Side, old: Money, new: Money) -> String {
    format!("{} {} replaced by {} to keep C + I = M", side.name(), old, new)
}

fn rate_label(rate: Rate, period: Frequency) -> String {
    format!("{}% {}", (rate * Decimal::ONE_HUNDRED).round_dp(4).normalize(), period)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn problem(target: Target) -> SimpleInterestInput {
        SimpleInterestInput {
            capital: None,
            amount: None,
            interest: None,
            rate: None,
            months: None,
            target,
            requested_rate_period: None,
        }
    }

    #[test]
    fn test_triangle_fill() {
        let mut t = MonetaryTriangle {
            capital: Some(dec!(1000)),
            amount: Some(dec!(1060)),
            interest: None,
        };
        t.fill().unwrap();
        assert_eq!(t.interest, Some(dec!(60)));

        let mut t = MonetaryTriangle {
            capital: None,
            amount: Some(dec!(1060)),
            interest: Some(dec!(60)),
        };
        t.fill().unwrap();
        assert_eq!(t.capital, Some(dec!(1000)));
    }

    #[test]
    fn test_rederive_reports_stale_side() {
        let mut t = MonetaryTriangle {
            capital: Some(dec!(1000)),
            amount: Some(dec!(1060)),
            interest: Some(dec!(1000)),
        };
        assert_eq!(t.rederive(Side::Interest).unwrap(), Some(dec!(1000)));
        assert_eq!(t.interest, Some(dec!(60)));
        // Already consistent: nothing reported
        assert_eq!(t.rederive(Side::Amount).unwrap(), None);
    }

    #[test]
    fn test_amount_overflow_is_typed_failure() {
        let input = SimpleInterestInput {
            capital: Some(Decimal::MAX),
            rate: Some(InterestRate::effective(dec!(10), Frequency::Annual)),
            months: Some(dec!(12)),
            ..problem(Target::Amount)
        };
        let err = solve_simple_interest(&input).unwrap_err();
        assert!(matches!(err, FinMathError::NumericOverflow { .. }));
    }

    #[test]
    fn test_amount_from_annual_rate() {
        let input = SimpleInterestInput {
            capital: Some(dec!(1000)),
            rate: Some(InterestRate::effective(dec!(0.12), Frequency::Annual)),
            months: Some(dec!(6)),
            ..problem(Target::Amount)
        };
        let out = solve_simple_interest(&input).unwrap().result;
        assert_eq!(out.summary.amount.round_dp(2), dec!(1060.00));
        assert_eq!(out.summary.interest.round_dp(2), dec!(60.00));
        assert_eq!(out.summary.time.periods, dec!(0.5));
        assert_eq!(out.summary.time.human, "6 mes(es)");
    }

    #[test]
    fn test_rate_zero_capital_is_division_by_zero() {
        let input = SimpleInterestInput {
            capital: Some(dec!(0)),
            interest: Some(dec!(50)),
            months: Some(dec!(4)),
            ..problem(Target::Rate)
        };
        let err = solve_simple_interest(&input).unwrap_err();
        assert!(matches!(err, FinMathError::DivisionByZero { .. }));
    }

    #[test]
    fn test_capital_missing_data() {
        let input = SimpleInterestInput {
            amount: Some(dec!(5000)),
            ..problem(Target::Capital)
        };
        let err = solve_simple_interest(&input).unwrap_err();
        assert!(matches!(err, FinMathError::InsufficientData(_)));
        assert!(err.to_string().contains("Capital"));
    }

    #[test]
    fn test_rate_label() {
        assert_eq!(rate_label(dec!(0.015), Frequency::Quarterly), "1.5% Trimestral");
    }
}
