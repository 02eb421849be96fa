//! Type definitions for the evaluation engine

pub mod summary;
pub mod transaction;

pub use summary::{
    BootstrapSummary, EvaluationSummary, PeriodOutcome, PeriodReport, TrialResult,
};
pub use transaction::{Period, Transaction};
