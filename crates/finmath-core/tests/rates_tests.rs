use finmath_core::rates::{
    effective_monthly_rate, effective_rate_for_period, humanize_months, months_per_period,
    periods_per_year,
};
use finmath_core::types::{Frequency, InterestRate};
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ===========================================================================
// Frequency table
// ===========================================================================

#[test]
fn test_every_frequency_has_a_period_count() {
    let total: u32 = Frequency::ALL.iter().map(|f| periods_per_year(*f)).sum();
    // 360 + 52 + 24 + 12 + 6 + 4 + 3 + 2 + 1
    assert_eq!(total, 464);
}

#[test]
fn test_unrecognized_frequency_falls_back_to_annual() {
    let freq = Frequency::from_name("lunar");
    assert_eq!(freq, Frequency::Unrecognized);
    assert_eq!(periods_per_year(freq), 1);
    assert_eq!(months_per_period(freq), dec!(12));
}

#[test]
fn test_spanish_frequency_names() {
    assert_eq!(Frequency::from_name("Cuatrimestral"), Frequency::FourMonthly);
    assert_eq!(Frequency::from_name("quincenal"), Frequency::Biweekly);
    assert_eq!(Frequency::from_name("diaria"), Frequency::Daily);
}

// ===========================================================================
// Rate normalization
// ===========================================================================

#[test]
fn test_nominal_rate_split_over_own_compounding() {
    let rate = InterestRate::nominal(dec!(0.18), Frequency::Bimonthly);
    assert_eq!(
        effective_rate_for_period(Some(&rate), Frequency::Monthly),
        dec!(0.03)
    );
}

#[test]
fn test_effective_rate_passes_through() {
    let rate = InterestRate::effective(dec!(0.025), Frequency::Quarterly);
    assert_eq!(
        effective_rate_for_period(Some(&rate), Frequency::Annual),
        dec!(0.025)
    );
}

#[test]
fn test_monthly_rate_from_quarterly_effective() {
    // (1.030301)^(1/3) - 1 = 0.01
    let rate = InterestRate::effective(dec!(0.030301), Frequency::Quarterly);
    let monthly = effective_monthly_rate(&rate).unwrap();
    assert!(
        (monthly - dec!(0.01)).abs() < dec!(0.000001),
        "expected ~1% monthly, got {monthly}"
    );
}

#[test]
fn test_monthly_rate_from_biweekly_nominal() {
    // 24% nominal biweekly: 1% per half month, (1.01)^2 - 1 per month
    let rate = InterestRate::nominal(dec!(0.24), Frequency::Biweekly);
    let monthly = effective_monthly_rate(&rate).unwrap();
    assert!((monthly - dec!(0.0201)).abs() < dec!(0.000001), "got {monthly}");
}

// ===========================================================================
// Time humanization
// ===========================================================================

#[test]
fn test_humanize_reference_values() {
    assert_eq!(humanize_months(dec!(22.2)), "1 año(s), 10 mes(es), 6 día(s)");
    assert_eq!(humanize_months(Decimal::ZERO), "0 días");
}

#[test]
fn test_humanize_negative_is_marker_not_panic() {
    assert_eq!(humanize_months(dec!(-0.5)), "Tiempo negativo (?)");
}

#[test]
fn test_humanize_months_and_days_only() {
    assert_eq!(humanize_months(dec!(7.1)), "7 mes(es), 3 día(s)");
    assert_eq!(humanize_months(dec!(12)), "1 año(s)");
}
