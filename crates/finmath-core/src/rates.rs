//! Frequency and rate normalization shared by every solver.
//!
//! Time is measured in months throughout; a commercial year of 360 days
//! (30-day months) is assumed when months are turned into readable text.

use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use rust_decimal_macros::dec;

use crate::error::FinMathError;
use crate::types::{Frequency, InterestRate, Months, Rate};
use crate::FinMathResult;

pub const MONTHS_PER_YEAR: Decimal = dec!(12);
pub const COMMERCIAL_DAYS_PER_MONTH: Decimal = dec!(30);

pub const NEGATIVE_TIME_MARKER: &str = "Tiempo negativo (?)";
pub const ZERO_TIME_MARKER: &str = "0 días";

/// Number of periods of `freq` in one year (m).
///
/// [`Frequency::Unrecognized`] counts as annual. This is a fallback, not a
/// validation: callers must not use it to detect bad input.
pub fn periods_per_year(freq: Frequency) -> u32 {
    match freq {
        Frequency::Annual => 1,
        Frequency::Semiannual => 2,
        Frequency::FourMonthly => 3,
        Frequency::Quarterly => 4,
        Frequency::Bimonthly => 6,
        Frequency::Monthly => 12,
        Frequency::Biweekly => 24,
        Frequency::Weekly => 52,
        Frequency::Daily => 360,
        Frequency::Unrecognized => 1,
    }
}

/// Length of one period of `freq`, in months.
pub fn months_per_period(freq: Frequency) -> Months {
    MONTHS_PER_YEAR / Decimal::from(periods_per_year(freq))
}

/// Effective rate per compounding period.
///
/// A nominal rate is split over its own compounding frequency, or over
/// `fallback_compounding` when the rate does not name one. An effective rate
/// is returned unchanged. No rate at all yields zero.
pub fn effective_rate_for_period(
    rate: Option<&InterestRate>,
    fallback_compounding: Frequency,
) -> Rate {
    let Some(rate) = rate else {
        return Decimal::ZERO;
    };
    if rate.is_nominal {
        let compounding = rate.compounding.unwrap_or(fallback_compounding);
        rate.value / Decimal::from(periods_per_year(compounding))
    } else {
        rate.value
    }
}

/// Converts a rate to the equivalent effective monthly rate:
/// `(1 + i_period)^(1 / months_per_period) - 1`.
///
/// A nominal rate without a compounding frequency is split over its own
/// quoted period.
pub fn effective_monthly_rate(rate: &InterestRate) -> FinMathResult<Rate> {
    let (periodic, freq) = if rate.is_nominal {
        let compounding = rate.compounding.unwrap_or_else(|| {
            tracing::warn!(
                period = %rate.period,
                "nominal rate without compounding frequency, using its quoted period"
            );
            rate.period
        });
        (
            rate.value / Decimal::from(periods_per_year(compounding)),
            compounding,
        )
    } else {
        (rate.value, rate.period)
    };

    let exponent = checked_div(Decimal::ONE, months_per_period(freq), "monthly rate exponent")?;
    let factor = growth_factor(periodic, exponent, "effective monthly rate")?;
    Ok(factor - Decimal::ONE)
}

/// `(1 + rate)^exponent` for any real exponent.
pub fn growth_factor(rate: Rate, exponent: Decimal, context: &str) -> FinMathResult<Decimal> {
    let base = Decimal::ONE + rate;
    if base <= Decimal::ZERO {
        return Err(FinMathError::InvalidInput {
            field: "rate".into(),
            reason: format!("Rate must be greater than -100% ({context})"),
        });
    }
    base.checked_powd(exponent)
        .ok_or_else(|| FinMathError::NumericOverflow {
            context: context.to_string(),
        })
}

/// Division that reports a zero divisor instead of panicking.
pub fn checked_div(numerator: Decimal, denominator: Decimal, context: &str) -> FinMathResult<Decimal> {
    if denominator.is_zero() {
        return Err(FinMathError::DivisionByZero {
            context: context.to_string(),
        });
    }
    numerator
        .checked_div(denominator)
        .ok_or_else(|| FinMathError::NumericOverflow {
            context: context.to_string(),
        })
}

/// Multiplication that reports overflow instead of panicking.
pub fn checked_mul(lhs: Decimal, rhs: Decimal, context: &str) -> FinMathResult<Decimal> {
    lhs.checked_mul(rhs).ok_or_else(|| FinMathError::NumericOverflow {
        context: context.to_string(),
    })
}

/// Addition that reports overflow instead of panicking.
pub fn checked_add(lhs: Decimal, rhs: Decimal, context: &str) -> FinMathResult<Decimal> {
    lhs.checked_add(rhs).ok_or_else(|| FinMathError::NumericOverflow {
        context: context.to_string(),
    })
}

/// Renders a month count as years, months and commercial days,
/// e.g. `22.2` -> `"1 año(s), 10 mes(es), 6 día(s)"`.
pub fn humanize_months(total_months: Months) -> String {
    if total_months.is_sign_negative() && !total_months.is_zero() {
        return NEGATIVE_TIME_MARKER.to_string();
    }

    let years = (total_months / MONTHS_PER_YEAR).floor();
    let remainder = total_months % MONTHS_PER_YEAR;
    let months = remainder.trunc();
    let days = ((remainder - months) * COMMERCIAL_DAYS_PER_MONTH).round();

    let mut parts = Vec::with_capacity(3);
    if years > Decimal::ZERO {
        parts.push(format!("{} año(s)", years.normalize()));
    }
    if months > Decimal::ZERO {
        parts.push(format!("{} mes(es)", months.normalize()));
    }
    if days > Decimal::ZERO {
        parts.push(format!("{} día(s)", days.normalize()));
    }

    if parts.is_empty() {
        ZERO_TIME_MARKER.to_string()
    } else {
        parts.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_periods_per_year_table() {
        let expected = [360, 52, 24, 12, 6, 4, 3, 2, 1];
        for (freq, m) in Frequency::ALL.iter().zip(expected) {
            assert_eq!(periods_per_year(*freq), m, "{freq:?}");
        }
        assert_eq!(periods_per_year(Frequency::Unrecognized), 1);
    }

    #[test]
    fn test_months_per_period() {
        assert_eq!(months_per_period(Frequency::Quarterly), dec!(3));
        assert_eq!(months_per_period(Frequency::Biweekly), dec!(0.5));
        assert_eq!(months_per_period(Frequency::Annual), dec!(12));
    }

    #[test]
    fn test_effective_rate_for_period_nominal_uses_fallback() {
        let rate = InterestRate {
            value: dec!(0.24),
            period: Frequency::Annual,
            is_nominal: true,
            compounding: None,
        };
        assert_eq!(
            effective_rate_for_period(Some(&rate), Frequency::Quarterly),
            dec!(0.06)
        );
        assert_eq!(effective_rate_for_period(None, Frequency::Monthly), Decimal::ZERO);
    }

    #[test]
    fn test_effective_monthly_rate_from_annual_effective() {
        // (1.12)^(1/12) - 1 = 0.009488...
        let rate = InterestRate::effective(dec!(0.12), Frequency::Annual);
        let monthly = effective_monthly_rate(&rate).unwrap();
        assert!(monthly > dec!(0.0094) && monthly < dec!(0.0095), "got {monthly}");
    }

    #[test]
    fn test_effective_monthly_rate_from_nominal_monthly() {
        let rate = InterestRate::nominal(dec!(0.12), Frequency::Monthly);
        let monthly = effective_monthly_rate(&rate).unwrap();
        assert!((monthly - dec!(0.01)).abs() < dec!(0.0000000001));
    }

    #[test]
    fn test_checked_div_zero() {
        let err = checked_div(dec!(1), Decimal::ZERO, "test").unwrap_err();
        assert!(matches!(err, FinMathError::DivisionByZero { .. }));
    }

    #[test]
    fn test_checked_mul_overflow() {
        let err = checked_mul(Decimal::MAX, dec!(2), "test").unwrap_err();
        assert!(matches!(err, FinMathError::NumericOverflow { .. }));
        assert_eq!(checked_add(dec!(1), dec!(2), "test").unwrap(), dec!(3));
    }

    #[test]
    fn test_growth_factor_rejects_total_loss_rate() {
        assert!(growth_factor(dec!(-1), dec!(2), "test").is_err());
    }

    #[test]
    fn test_humanize_months() {
        assert_eq!(humanize_months(dec!(22.2)), "1 año(s), 10 mes(es), 6 día(s)");
        assert_eq!(humanize_months(dec!(0)), "0 días");
        assert_eq!(humanize_months(dec!(-3)), "Tiempo negativo (?)");
        assert_eq!(humanize_months(dec!(24)), "2 año(s)");
        assert_eq!(humanize_months(dec!(0.5)), "15 día(s)");
    }
}
