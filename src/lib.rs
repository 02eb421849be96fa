//! Capacity-Constrained Fraud-Prevention Evaluation
//!
//! Estimates how much monetary fraud loss a risk model prevents when a
//! fixed monthly investigation capacity is allocated by model-ranked score,
//! compared against a bootstrap baseline of random investigation.

pub mod config;
pub mod dataset;
pub mod error;
pub mod evaluation;
pub mod types;

pub use config::AppConfig;
pub use error::EvalError;
pub use evaluation::{
    BootstrapBaselineEstimator, ComparisonReporter, PeriodIndex, RankedEvaluator,
};
pub use types::{EvaluationSummary, Period, Transaction, TrialResult};
