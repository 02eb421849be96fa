//! Error types for the evaluation engine.

use thiserror::Error;

/// Errors raised by the evaluation core.
///
/// All variants are fatal to the run that raised them: the engine never
/// returns a partially-populated result. Undefined ratios are not errors;
/// they are reported as `None` in the summary types.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvalError {
    #[error("no transactions to evaluate")]
    EmptyInput,

    #[error("transaction {id} has no model score; ranked evaluation requires a score for every transaction")]
    MissingScore { id: String },

    #[error("bootstrap trial count must be at least 1, got {0}")]
    InvalidTrialCount(usize),

    #[error("transaction {id} has invalid amount {amount}; amounts must be finite and non-negative")]
    InvalidAmount { id: String, amount: f64 },

    #[error("invalid period key: {0}")]
    InvalidPeriod(String),
}
