use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use crate::compound_interest::{solve_compound_interest, CompoundInterestInput, CompoundInterestOutput};
use crate::equation_of_value::{solve_renegotiation, RenegotiationInput, RenegotiationOutput};
use crate::error::{FinMathError, Severity};
use crate::simple_interest::{solve_simple_interest, SimpleInterestInput, SimpleInterestOutput};
use crate::types::*;
use crate::FinMathResult;

// ---------------------------------------------------------------------------
// Problem records
// ---------------------------------------------------------------------------

/// A bank-discount problem. Parsed so it can be recognised, not yet solved.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BankDiscountInput {
    #[serde(default, alias = "valor_nominal")]
    pub face_value: Option<Money>,
    #[serde(default, alias = "valor_recibido")]
    pub received_value: Option<Money>,
    #[serde(default, alias = "descuento_importe")]
    pub discount_amount: Option<Money>,
    #[serde(default, alias = "tasa_descuento")]
    pub discount_rate: Option<InterestRate>,
    #[serde(default, alias = "tiempo_meses")]
    pub months: Option<Months>,
    #[serde(alias = "incognita")]
    pub target: Target,
}

/// A problem tagged by its `type` field.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Problem {
    #[serde(alias = "interes_simple")]
    SimpleInterest(SimpleInterestInput),
    #[serde(alias = "interes_compuesto")]
    CompoundInterest(CompoundInterestInput),
    #[serde(alias = "descuento_bancario")]
    BankDiscount(BankDiscountInput),
    #[serde(alias = "renegociacion_deuda")]
    DebtRenegotiation(RenegotiationInput),
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProblemType {
    SimpleInterest,
    CompoundInterest,
    BankDiscount,
    DebtRenegotiation,
    Unknown,
}

impl fmt::Display for ProblemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ProblemType::SimpleInterest => "simple_interest",
            ProblemType::CompoundInterest => "compound_interest",
            ProblemType::BankDiscount => "bank_discount",
            ProblemType::DebtRenegotiation => "debt_renegotiation",
            ProblemType::Unknown => "unknown",
        };
        write!(f, "{name}")
    }
}

impl Problem {
    pub fn problem_type(&self) -> ProblemType {
        match self {
            Problem::SimpleInterest(_) => ProblemType::SimpleInterest,
            Problem::CompoundInterest(_) => ProblemType::CompoundInterest,
            Problem::BankDiscount(_) => ProblemType::BankDiscount,
            Problem::DebtRenegotiation(_) => ProblemType::DebtRenegotiation,
            Problem::Unknown => ProblemType::Unknown,
        }
    }

    /// Parses a problem record, accepting the extractor's `tipo` tag as well as `type`.
    pub fn from_value(mut value: serde_json::Value) -> FinMathResult<Self> {
        if let Some(map) = value.as_object_mut() {
            if !map.contains_key("type") {
                if let Some(tag) = map.remove("tipo") {
                    map.insert("type".into(), tag);
                }
            }
        }
        Ok(serde_json::from_value(value)?)
    }
}

fn deserialize_problem<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Problem, D::Error> {
    let value = serde_json::Value::deserialize(deserializer)?;
    Problem::from_value(value).map_err(D::Error::custom)
}

// ---------------------------------------------------------------------------
// Solutions
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Solution {
    SimpleInterest(ComputationOutput<SimpleInterestOutput>),
    CompoundInterest(ComputationOutput<CompoundInterestOutput>),
    DebtRenegotiation(ComputationOutput<RenegotiationOutput>),
}

/// Routes a problem to its solver.
///
/// Bank discount and unrecognised problem types are reported as
/// [`FinMathError::UnsupportedProblemType`]. Arithmetic overflow on extreme
/// inputs surfaces from the solvers as [`FinMathError::NumericOverflow`].
pub fn solve(problem: &Problem) -> FinMathResult<Solution> {
    let _span = tracing::debug_span!("solve", problem_type = %problem.problem_type()).entered();

    match problem {
        Problem::SimpleInterest(p) => solve_simple_interest(p).map(Solution::SimpleInterest),
        Problem::CompoundInterest(p) => solve_compound_interest(p).map(Solution::CompoundInterest),
        Problem::DebtRenegotiation(p) => solve_renegotiation(p).map(Solution::DebtRenegotiation),
        Problem::BankDiscount(_) => Err(FinMathError::UnsupportedProblemType(
            "bank discount solving is not yet implemented".into(),
        )),
        Problem::Unknown => Err(FinMathError::UnsupportedProblemType(
            "unrecognized problem type".into(),
        )),
    }
}

// ---------------------------------------------------------------------------
// Analysis envelope
// ---------------------------------------------------------------------------

/// Output of the upstream extraction step: its reasoning text and the problem it found.
#[derive(Debug, Clone, Deserialize)]
pub struct Extraction {
    #[serde(alias = "razonamiento")]
    pub reasoning: String,
    #[serde(alias = "problema", deserialize_with = "deserialize_problem")]
    pub problem: Problem,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    Success,
    Warning,
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub status: ReportStatus,
    pub problem_type: ProblemType,
    /// Passed through untouched from the extractor
    pub reasoning: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub financial_data: Option<Solution>,
}

/// Solves an extracted problem and wraps the outcome for presentation.
///
/// Unsupported problem types become a `warning` report that still carries
/// the reasoning; every other failure is returned as an error.
pub fn analyze(extraction: &Extraction) -> FinMathResult<AnalysisReport> {
    let problem_type = extraction.problem.problem_type();
    match solve(&extraction.problem) {
        Ok(solution) => Ok(AnalysisReport {
            status: ReportStatus::Success,
            problem_type,
            reasoning: extraction.reasoning.clone(),
            message: None,
            financial_data: Some(solution),
        }),
        Err(e) if e.severity() == Severity::Warning => {
            tracing::warn!(%problem_type, error = %e, "problem type not supported");
            Ok(AnalysisReport {
                status: ReportStatus::Warning,
                problem_type,
                reasoning: extraction.reasoning.clone(),
                message: Some(format!(
                    "Problem type '{problem_type}' detected but not supported by the solving engine"
                )),
                financial_data: None,
            })
        }
        Err(e) => Err(e),
    }
}
