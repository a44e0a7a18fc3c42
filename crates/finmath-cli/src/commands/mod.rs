pub mod compound_interest;
pub mod humanize;
pub mod renegotiation;
pub mod simple_interest;
pub mod solve;

use finmath_core::types::{Frequency, InterestRate};
use rust_decimal::Decimal;

/// Builds a rate from the shared `--rate/--rate-period/--nominal/--compounding` flags.
pub(crate) fn rate_from_flags(
    value: Option<Decimal>,
    period: Option<&str>,
    nominal: bool,
    compounding: Option<&str>,
) -> Option<InterestRate> {
    value.map(|value| InterestRate {
        value,
        period: period.map(Frequency::from_name).unwrap_or_default(),
        is_nominal: nominal,
        compounding: compounding.map(Frequency::from_name),
    })
}
