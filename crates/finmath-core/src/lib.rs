//! Decimal solvers for classroom financial-mathematics problems: simple
//! interest, compound interest and debt renegotiation through an equation
//! of value, plus a dispatcher that routes extracted problem records.

pub mod compound_interest;
pub mod dispatch;
pub mod equation_of_value;
pub mod error;
pub mod rates;
pub mod simple_interest;
pub mod types;

pub use error::FinMathError;
pub use types::*;

/// Standard result type for all finmath operations
pub type FinMathResult<T> = Result<T, FinMathError>;
