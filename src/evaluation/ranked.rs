//! Point-estimate evaluation of the score-ranked investigation policy.

use crate::error::EvalError;
use crate::evaluation::allocator;
use crate::evaluation::loss;
use crate::evaluation::periods::PeriodIndex;
use crate::types::{Transaction, TrialResult};
use std::collections::BTreeMap;
use tracing::debug;

/// Evaluates the "investigate the top-K scored transactions per period"
/// policy in a single deterministic pass.
pub struct RankedEvaluator {
    capacity_per_period: usize,
}

impl RankedEvaluator {
    pub fn new(capacity_per_period: usize) -> Self {
        Self { capacity_per_period }
    }

    /// Run the ranked policy over every period.
    ///
    /// Fails with [`EvalError::MissingScore`] before any per-period work if
    /// any transaction lacks a score, and with [`EvalError::EmptyInput`] on
    /// an empty table. On failure no partial result is produced.
    pub fn evaluate(&self, transactions: &[Transaction]) -> Result<TrialResult, EvalError> {
        if let Some(tx) = transactions.iter().find(|tx| tx.score.is_none()) {
            return Err(EvalError::MissingScore { id: tx.id.clone() });
        }

        let index = PeriodIndex::build(transactions)?;

        let mut periods = BTreeMap::new();
        for (period, bucket) in index.iter() {
            let selected = allocator::select_ranked(bucket, self.capacity_per_period)?;
            let outcome = loss::score_selection(bucket, &selected);

            debug!(
                period = %period,
                bucket_size = bucket.len(),
                investigated = outcome.investigated_count,
                amount_prevented = outcome.amount_prevented,
                amount_lost = outcome.amount_lost,
                "Ranked policy evaluated for period"
            );

            periods.insert(*period, outcome);
        }

        Ok(TrialResult { periods })
    }
}
