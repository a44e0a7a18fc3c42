//! Debt renegotiation through an equation of value.
//!
//! Every original debt and every proposed payment is moved to a single focal
//! date with one effective monthly rate. Payments may be fixed amounts or
//! multiples of one unknown payment `x`; the equation
//!
//! ```text
//! Σ debts(ff) = Σ known payments(ff) + x · Σ coefficients(ff)
//! ```
//!
//! is linear in `x`.
//!
//! Offsets are always `ff - event_month`: positive exponents accumulate an
//! earlier cash flow forward, negative exponents discount a later one back.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::FinMathError;
use crate::rates::{
    checked_add, checked_div, checked_mul, effective_monthly_rate, growth_factor,
    periods_per_year, MONTHS_PER_YEAR,
};
use crate::types::*;
use crate::FinMathResult;

// ---------------------------------------------------------------------------
// Input types
// ---------------------------------------------------------------------------

/// An original obligation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Debt {
    #[serde(alias = "monto")]
    pub amount: Money,
    /// Months from today until the debt falls due; negative if already overdue
    #[serde(alias = "vencimiento_meses")]
    pub maturity_months: Months,
}

/// What a proposed payment is worth.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PaymentValue {
    /// A known amount of money.
    Fixed(Money),
    /// `proportion · x` for the unknown payment x ("2x" has proportion 2).
    Proportional(Decimal),
}

/// A proposed payment. Carries exactly one of a fixed amount or an unknown proportion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PaymentRecord", into = "PaymentRecord")]
pub struct Payment {
    pub month: Months,
    pub value: PaymentValue,
}

impl Payment {
    pub fn fixed(amount: Money, month: Months) -> Self {
        Self {
            month,
            value: PaymentValue::Fixed(amount),
        }
    }

    pub fn proportional(proportion: Decimal, month: Months) -> Self {
        Self {
            month,
            value: PaymentValue::Proportional(proportion),
        }
    }

    /// Builds a payment from the optional fields of a wire record.
    pub fn new(
        amount: Option<Money>,
        month: Months,
        unknown_proportion: Option<Decimal>,
    ) -> FinMathResult<Self> {
        match (amount, unknown_proportion) {
            (Some(a), None) => Ok(Self::fixed(a, month)),
            (None, Some(p)) => Ok(Self::proportional(p, month)),
            (Some(_), Some(_)) => Err(FinMathError::InvalidInput {
                field: "payment".into(),
                reason: format!("payment at month {month} has both an amount and an unknown proportion"),
            }),
            (None, None) => Err(FinMathError::InvalidInput {
                field: "payment".into(),
                reason: format!("payment at month {month} has neither an amount nor an unknown proportion"),
            }),
        }
    }
}

/// Wire shape of a payment, as produced by the extractor.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct PaymentRecord {
    #[serde(default, alias = "monto", skip_serializing_if = "Option::is_none")]
    amount: Option<Money>,
    #[serde(alias = "mes")]
    month: Months,
    #[serde(default, alias = "proporcion_incognita", skip_serializing_if = "Option::is_none")]
    unknown_proportion: Option<Decimal>,
}

impl TryFrom<PaymentRecord> for Payment {
    type Error = FinMathError;

    fn try_from(record: PaymentRecord) -> Result<Self, Self::Error> {
        Payment::new(record.amount, record.month, record.unknown_proportion)
    }
}

impl From<Payment> for PaymentRecord {
    fn from(payment: Payment) -> Self {
        let (amount, unknown_proportion) = match payment.value {
            PaymentValue::Fixed(a) => (Some(a), None),
            PaymentValue::Proportional(p) => (None, Some(p)),
        };
        PaymentRecord {
            amount,
            month: payment.month,
            unknown_proportion,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenegotiationInput {
    #[serde(alias = "deudas_originales")]
    pub debts: Vec<Debt>,
    #[serde(alias = "pagos_propuestos")]
    pub payments: Vec<Payment>,
    #[serde(alias = "tasa_referencia")]
    pub reference_rate: InterestRate,
    /// Month where both sides are compared; today when omitted
    #[serde(default, alias = "fecha_focal_mes")]
    pub focal_month: Months,
}

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

/// Both sides of the equation at the focal date.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EquationBalance {
    pub debts_at_focal: Money,
    pub proposal_at_focal: Money,
    /// Expected to be zero up to rounding
    pub difference: Money,
}

/// The reference rate as it is reported, in its own compounding period.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportingRate {
    pub base_frequency: String,
    pub periods_per_year: u32,
    /// Rate per base period, in percent (4 dp)
    pub periodic_rate_pct: Decimal,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebtAtFocal {
    pub original_amount: Money,
    pub maturity_month: Months,
    /// Offset to the focal date in compounding periods (4 dp)
    pub periods: Periods,
    pub value_at_focal: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PaymentAtFocal {
    Known {
        amount: Money,
        month: Months,
        periods: Periods,
        value_at_focal: Money,
    },
    Unknown {
        proportion: Decimal,
        month: Months,
        periods: Periods,
        /// Coefficient of x at the focal date (4 dp)
        factor_at_focal: Decimal,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenegotiationOutput {
    /// Value of all original debts today; informational only
    pub present_value_of_debts: Money,
    /// The unknown payment x
    pub x: Money,
    pub balance: EquationBalance,
    /// Effective monthly rate every flow was moved with
    pub monthly_rate: Rate,
    pub reporting_rate: ReportingRate,
    pub debt_breakdown: Vec<DebtAtFocal>,
    pub payment_breakdown: Vec<PaymentAtFocal>,
}

// ---------------------------------------------------------------------------
// Solver
// ---------------------------------------------------------------------------

/// Value at `to_month` of `amount` falling at `from_month`, at an effective monthly rate.
pub fn move_to(
    amount: Money,
    from_month: Months,
    to_month: Months,
    monthly_rate: Rate,
) -> FinMathResult<Money> {
    let factor = growth_factor(monthly_rate, to_month - from_month, "focal date factor")?;
    checked_mul(amount, factor, "focal date move")
}

/// Solves the equation of value for the unknown payment `x`.
pub fn solve_renegotiation(
    input: &RenegotiationInput,
) -> FinMathResult<ComputationOutput<RenegotiationOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    for (idx, debt) in input.debts.iter().enumerate() {
        if debt.amount <= Decimal::ZERO {
            return Err(FinMathError::InvalidInput {
                field: format!("debts[{idx}].amount"),
                reason: "Debt amount must be positive".into(),
            });
        }
    }

    let monthly_rate = effective_monthly_rate(&input.reference_rate)?;
    let ff = input.focal_month;
    let reporting_rate = reporting_rate(&input.reference_rate, monthly_rate);
    let period_factor = Decimal::from(reporting_rate.periods_per_year) / MONTHS_PER_YEAR;

    tracing::debug!(%monthly_rate, focal_month = %ff, "equation of value");

    // Present value today, reported but not part of the equation.
    let mut present_value = Decimal::ZERO;
    for debt in &input.debts {
        let today = move_to(debt.amount, debt.maturity_months, Decimal::ZERO, monthly_rate)?;
        present_value = checked_add(present_value, today, "present value of debts")?;
    }

    let mut debts_at_focal = Decimal::ZERO;
    let mut debt_breakdown = Vec::with_capacity(input.debts.len());
    for debt in &input.debts {
        let value = move_to(debt.amount, debt.maturity_months, ff, monthly_rate)?;
        debts_at_focal = checked_add(debts_at_focal, value, "debts at focal date")?;
        debt_breakdown.push(DebtAtFocal {
            original_amount: debt.amount,
            maturity_month: debt.maturity_months,
            periods: ((ff - debt.maturity_months) * period_factor).round_dp(4),
            value_at_focal: value.round_dp(2),
        });
    }

    let mut known_at_focal = Decimal::ZERO;
    let mut coefficient_sum = Decimal::ZERO;
    let mut payment_breakdown = Vec::with_capacity(input.payments.len());
    for payment in &input.payments {
        let periods = ((ff - payment.month) * period_factor).round_dp(4);
        match payment.value {
            PaymentValue::Fixed(amount) => {
                let value = move_to(amount, payment.month, ff, monthly_rate)?;
                known_at_focal = checked_add(known_at_focal, value, "known payments at focal date")?;
                payment_breakdown.push(PaymentAtFocal::Known {
                    amount,
                    month: payment.month,
                    periods,
                    value_at_focal: value.round_dp(2),
                });
            }
            PaymentValue::Proportional(proportion) => {
                let coefficient = move_to(proportion, payment.month, ff, monthly_rate)?;
                coefficient_sum =
                    checked_add(coefficient_sum, coefficient, "unknown payment coefficients")?;
                payment_breakdown.push(PaymentAtFocal::Unknown {
                    proportion,
                    month: payment.month,
                    periods,
                    factor_at_focal: coefficient.round_dp(4),
                });
            }
        }
    }

    if coefficient_sum.is_zero() {
        return Err(FinMathError::NoSolution(
            "no unknown payment x to solve for".into(),
        ));
    }

    let outstanding = checked_add(debts_at_focal, -known_at_focal, "outstanding debt at focal date")?;
    let x = checked_div(outstanding, coefficient_sum, "unknown payment coefficients")?;
    let proposal_at_focal = checked_add(
        known_at_focal,
        checked_mul(coefficient_sum, x, "unknown payments at focal date")?,
        "proposal at focal date",
    )?;
    let difference = checked_add(debts_at_focal, -proposal_at_focal, "equation balance")?;

    tracing::debug!(%debts_at_focal, %known_at_focal, %coefficient_sum, %x, "solved equation of value");

    if x <= Decimal::ZERO {
        warnings.push("Known payments already cover the debts; x is not positive".into());
    }

    let output = RenegotiationOutput {
        present_value_of_debts: present_value.round_dp(2),
        x: x.round_dp(2),
        balance: EquationBalance {
            debts_at_focal: debts_at_focal.round_dp(2),
            proposal_at_focal: proposal_at_focal.round_dp(2),
            difference: difference.round_dp(4),
        },
        monthly_rate,
        reporting_rate,
        debt_breakdown,
        payment_breakdown,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Equation of value: x = (Σ debts(ff) - Σ known payments(ff)) / Σ coefficients(ff)",
        input,
        warnings,
        elapsed,
        output,
    ))
}

/// Describes the reference rate in its native period for reports. The
/// solve itself always uses the monthly rate.
fn reporting_rate(rate: &InterestRate, monthly_rate: Rate) -> ReportingRate {
    if rate.is_nominal {
        let compounding = rate.compounding.unwrap_or(rate.period);
        let m = periods_per_year(compounding);
        let pct = (rate.value / Decimal::from(m) * Decimal::ONE_HUNDRED).round_dp(4);
        ReportingRate {
            base_frequency: compounding.to_string(),
            periods_per_year: m,
            periodic_rate_pct: pct,
            message: format!("Tasa {compounding} del {}%", pct.normalize()),
        }
    } else {
        let pct = (monthly_rate * Decimal::ONE_HUNDRED).round_dp(4);
        ReportingRate {
            base_frequency: "Mensual (efectiva)".into(),
            periods_per_year: 12,
            periodic_rate_pct: pct,
            message: format!("Tasa Efectiva Mensual del {}%", pct.normalize()),
        }
    }
}
