use thiserror::Error;

#[derive(Debug, Error)]
pub enum FinMathError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    #[error("Division by zero in {context}")]
    DivisionByZero { context: String },

    #[error("No solution: {0}")]
    NoSolution(String),

    #[error("Unsupported problem type: {0}")]
    UnsupportedProblemType(String),

    #[error("Numeric overflow in {context}")]
    NumericOverflow { context: String },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

/// How a caller should surface a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// The request itself is missing data or malformed (a 4xx-style rejection).
    Rejected,
    /// The equation is degenerate and has no solution.
    NoSolution,
    /// The problem was understood but cannot be solved by this engine.
    Warning,
    /// Anything unexpected (a 5xx-style failure).
    Internal,
}

impl FinMathError {
    pub fn severity(&self) -> Severity {
        match self {
            FinMathError::InvalidInput { .. } | FinMathError::InsufficientData(_) => {
                Severity::Rejected
            }
            FinMathError::DivisionByZero { .. } | FinMathError::NoSolution(_) => {
                Severity::NoSolution
            }
            FinMathError::UnsupportedProblemType(_) => Severity::Warning,
            FinMathError::NumericOverflow { .. } | FinMathError::SerializationError(_) => {
                Severity::Internal
            }
        }
    }
}

impl From<serde_json::Error> for FinMathError {
    fn from(e: serde_json::Error) -> Self {
        FinMathError::SerializationError(e.to_string())
    }
}
