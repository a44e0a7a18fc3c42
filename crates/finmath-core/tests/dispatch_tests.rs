use finmath_core::dispatch::{analyze, solve, Extraction, Problem, ProblemType, ReportStatus, Solution};
use finmath_core::error::Severity;
use finmath_core::types::{Frequency, Target};
use finmath_core::FinMathError;
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::json;

fn extraction(problem: serde_json::Value) -> Extraction {
    serde_json::from_value(json!({
        "razonamiento": "El enunciado pide el monto al final del plazo.",
        "problema": problem
    }))
    .unwrap()
}

// ===========================================================================
// Routing
// ===========================================================================

#[test]
fn test_spanish_simple_interest_routes_and_solves() {
    let problem = Problem::from_value(json!({
        "tipo": "interes_simple",
        "capital": 5000,
        "interes_ganado": 300,
        "tiempo_meses": 6,
        "incognita": "tasa",
        "periodo_tasa_solicitada": "mensual"
    }))
    .unwrap();
    assert_eq!(problem.problem_type(), ProblemType::SimpleInterest);

    match solve(&problem).unwrap() {
        Solution::SimpleInterest(out) => {
            let rate = out.result.computed_rate.unwrap();
            assert_eq!(rate.value, dec!(0.01));
            assert_eq!(rate.period, Frequency::Monthly);
            assert_eq!(rate.label, "1% Mensual");
            assert_eq!(out.result.target, Target::Rate);
        }
        other => panic!("wrong solver: {other:?}"),
    }
}

#[test]
fn test_english_tag_routes_compound_interest() {
    let problem = Problem::from_value(json!({
        "type": "compound_interest",
        "capital": 1000,
        "rate": {"value": 0.01, "period": "monthly"},
        "months": 12,
        "compounding": "monthly",
        "target": "amount"
    }))
    .unwrap();
    match solve(&problem).unwrap() {
        Solution::CompoundInterest(out) => assert_eq!(out.result.result, dec!(1126.83)),
        other => panic!("wrong solver: {other:?}"),
    }
}

#[test]
fn test_solver_failures_pass_through() {
    let problem = Problem::from_value(json!({
        "tipo": "renegociacion_deuda",
        "deudas_originales": [{"monto": 1000, "vencimiento_meses": 3}],
        "pagos_propuestos": [{"monto": 1000, "mes": 3}],
        "tasa_referencia": {"valor": 0.02, "periodo": "mensual"}
    }))
    .unwrap();
    let err = solve(&problem).unwrap_err();
    assert!(matches!(err, FinMathError::NoSolution(_)));
    assert_eq!(err.severity(), Severity::NoSolution);
}

// ===========================================================================
// Analysis envelope
// ===========================================================================

#[test]
fn test_analyze_success_carries_reasoning() {
    let report = analyze(&extraction(json!({
        "tipo": "interes_simple",
        "capital": 1000,
        "tasa": {"valor": 0.12, "periodo": "anual"},
        "tiempo_meses": 6,
        "incognita": "monto"
    })))
    .unwrap();
    assert_eq!(report.status, ReportStatus::Success);
    assert_eq!(report.problem_type, ProblemType::SimpleInterest);
    assert_eq!(report.reasoning, "El enunciado pide el monto al final del plazo.");
    assert!(report.message.is_none());

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["status"], "success");
    let amount: Decimal = json["financial_data"]["result"]["summary"]["amount"]
        .as_str()
        .unwrap()
        .parse()
        .unwrap();
    assert_eq!(amount, dec!(1060));
}

#[test]
fn test_analyze_bank_discount_is_warning() {
    let report = analyze(&extraction(json!({
        "tipo": "descuento_bancario",
        "valor_nominal": 20000,
        "tasa_descuento": {"valor": 0.3, "periodo": "anual"},
        "tiempo_meses": 3,
        "incognita": "descuento"
    })))
    .unwrap();
    assert_eq!(report.status, ReportStatus::Warning);
    assert_eq!(report.problem_type, ProblemType::BankDiscount);
    assert!(report.financial_data.is_none());
    assert!(report.message.unwrap().contains("bank_discount"));
    assert!(!report.reasoning.is_empty());
}

#[test]
fn test_analyze_rejects_insufficient_data() {
    let err = analyze(&extraction(json!({
        "tipo": "interes_simple",
        "capital": 1000,
        "incognita": "monto"
    })))
    .unwrap_err();
    assert_eq!(err.severity(), Severity::Rejected);
}
