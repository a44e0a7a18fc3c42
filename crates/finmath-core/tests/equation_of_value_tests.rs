use finmath_core::equation_of_value::{
    move_to, solve_renegotiation, Debt, Payment, PaymentAtFocal, RenegotiationInput,
};
use finmath_core::rates::effective_monthly_rate;
use finmath_core::types::{Frequency, InterestRate};
use finmath_core::FinMathError;
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn three_debts() -> RenegotiationInput {
    RenegotiationInput {
        debts: vec![
            Debt { amount: dec!(100000), maturity_months: dec!(2) },
            Debt { amount: dec!(250000), maturity_months: dec!(1) },
            Debt { amount: dec!(500000), maturity_months: dec!(6) },
        ],
        payments: vec![
            Payment::fixed(dec!(50000), dec!(0)),
            Payment::proportional(dec!(1), dec!(12)),
            Payment::proportional(dec!(1), dec!(24)),
        ],
        reference_rate: InterestRate::nominal(dec!(0.19), Frequency::Monthly),
        focal_month: Decimal::ZERO,
    }
}

// ===========================================================================
// Focal-date moves
// ===========================================================================

#[test]
fn test_move_to_round_trip() {
    let rate = effective_monthly_rate(&InterestRate::effective(dec!(0.18), Frequency::Annual)).unwrap();
    for (amount, maturity) in [
        (dec!(100000), dec!(2)),
        (dec!(2500.50), dec!(7.5)),
        (dec!(1000), dec!(-3)),
    ] {
        let today = move_to(amount, maturity, Decimal::ZERO, rate).unwrap();
        let back = move_to(today, Decimal::ZERO, maturity, rate).unwrap();
        assert!(
            (back - amount).abs() < dec!(0.0001),
            "{amount} @ {maturity} came back as {back}"
        );
    }
}

#[test]
fn test_overdue_debt_accumulates() {
    let moved = move_to(dec!(1000), dec!(-3), Decimal::ZERO, dec!(0.01)).unwrap();
    assert!(moved > dec!(1000));
    assert_eq!(moved.round_dp(2), dec!(1030.30));
}

// ===========================================================================
// Solver
// ===========================================================================

#[test]
fn test_three_debt_renegotiation() {
    let out = solve_renegotiation(&three_debts()).unwrap();
    let r = &out.result;
    assert!(r.x > Decimal::ZERO);
    // Roughly 748k of debt left today, spread over discount factors summing to ~1.514
    assert!(r.x > dec!(480000) && r.x < dec!(510000), "x = {}", r.x);
    assert!(r.balance.difference.abs() < dec!(0.000001));
    assert!(out.warnings.is_empty());

    // With the focal date at zero, the focal side equals the present value.
    assert_eq!(r.present_value_of_debts, r.balance.debts_at_focal);

    assert_eq!(r.debt_breakdown.len(), 3);
    assert_eq!(r.payment_breakdown.len(), 3);
    assert!(matches!(r.payment_breakdown[0], PaymentAtFocal::Known { .. }));
    assert!(matches!(r.payment_breakdown[2], PaymentAtFocal::Unknown { .. }));
    assert_eq!(r.reporting_rate.base_frequency, "Mensual");
    assert_eq!(r.reporting_rate.message, "Tasa Mensual del 1.5833%");
}

#[test]
fn test_focal_date_does_not_change_x() {
    let at_zero = solve_renegotiation(&three_debts()).unwrap().result.x;
    let at_twelve = solve_renegotiation(&RenegotiationInput {
        focal_month: dec!(12),
        ..three_debts()
    })
    .unwrap()
    .result
    .x;
    assert!((at_zero - at_twelve).abs() <= dec!(0.01), "{at_zero} vs {at_twelve}");
}

#[test]
fn test_known_payments_exceeding_debts_warns() {
    let input = RenegotiationInput {
        debts: vec![Debt { amount: dec!(1000), maturity_months: dec!(0) }],
        payments: vec![
            Payment::fixed(dec!(1500), dec!(0)),
            Payment::proportional(dec!(1), dec!(6)),
        ],
        reference_rate: InterestRate::effective(dec!(0.01), Frequency::Monthly),
        focal_month: Decimal::ZERO,
    };
    let out = solve_renegotiation(&input).unwrap();
    assert!(out.result.x < Decimal::ZERO);
    assert_eq!(out.warnings.len(), 1);
}

#[test]
fn test_zero_coefficients_is_no_solution() {
    let mut input = three_debts();
    input.payments.retain(|p| p.month == Decimal::ZERO);
    let err = solve_renegotiation(&input).unwrap_err();
    assert!(matches!(err, FinMathError::NoSolution(_)));
}

#[test]
fn test_non_positive_debt_rejected() {
    let mut input = three_debts();
    input.debts[1].amount = Decimal::ZERO;
    match solve_renegotiation(&input) {
        Err(FinMathError::InvalidInput { field, .. }) => assert_eq!(field, "debts[1].amount"),
        other => panic!("expected InvalidInput, got {other:?}"),
    }
}

#[test]
fn test_spanish_record_deserializes() {
    let input: RenegotiationInput = serde_json::from_str(
        r#"{
            "deudas_originales": [{"monto": 1000, "vencimiento_meses": 6}],
            "pagos_propuestos": [{"mes": 6, "proporcion_incognita": 1}],
            "tasa_referencia": {"valor": 0.24, "es_nominal": true, "capitalizacion": "mensual"},
            "fecha_focal_mes": 6
        }"#,
    )
    .unwrap();
    let out = solve_renegotiation(&input).unwrap().result;
    assert_eq!(out.x, dec!(1000.00));
}
