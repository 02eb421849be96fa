//! Final comparison between the ranked policy and the random baseline.

use crate::error::EvalError;
use crate::evaluation::periods::PeriodIndex;
use crate::types::{BootstrapSummary, EvaluationSummary, PeriodReport, Transaction, TrialResult};
use tracing::info;

/// Two-sided 95% normal quantile used for the baseline interval.
const Z_95: f64 = 1.96;

/// Combines the ranked point estimate and the bootstrap summary into the
/// persisted [`EvaluationSummary`].
///
/// The run identifier is supplied by the caller; the reporter holds no
/// process-wide state. Ratios with a zero denominator are reported as
/// `None`, never raised.
pub struct ComparisonReporter {
    run_id: String,
}

impl ComparisonReporter {
    pub fn new(run_id: impl Into<String>) -> Self {
        Self {
            run_id: run_id.into(),
        }
    }

    pub fn report(
        &self,
        transactions: &[Transaction],
        capacity_per_period: usize,
        ranked: &TrialResult,
        bootstrap: &BootstrapSummary,
    ) -> Result<EvaluationSummary, EvalError> {
        let index = PeriodIndex::build(transactions)?;

        let total_fraud_amount = ranked.total_fraud_amount();
        let ranked_prevented = ranked.total_amount_prevented();
        let random_mean = bootstrap.amount_prevented_mean;
        let random_std_dev = bootstrap.amount_prevented_std_dev;

        let pct_of_total =
            |amount: f64| (total_fraud_amount > 0.0).then(|| amount / total_fraud_amount * 100.0);

        // Prevented amounts are non-negative, so the interval is truncated
        // at zero.
        let ci_lower = (random_mean - Z_95 * random_std_dev).max(0.0);
        let ci_upper = random_mean + Z_95 * random_std_dev;

        let uplift_ratio = (random_mean > 0.0).then(|| ranked_prevented / random_mean);
        let uplift_ratio_lower_bound = (ci_upper > 0.0).then(|| ranked_prevented / ci_upper);

        let periods = ranked
            .periods
            .iter()
            .map(|(period, outcome)| {
                let bucket = index.bucket(period).unwrap_or(&[]);
                PeriodReport {
                    period: *period,
                    transaction_count: bucket.len(),
                    fraud_count: bucket.iter().filter(|tx| tx.is_fraud).count(),
                    fraud_amount: outcome.fraud_amount(),
                    ranked_amount_prevented: outcome.amount_prevented,
                    ranked_amount_lost: outcome.amount_lost,
                    ranked_investigated: outcome.investigated_count,
                    ranked_prevented_ratio: outcome.prevented_ratio(),
                    random_amount_prevented_mean: bootstrap
                        .per_period_prevented_mean
                        .get(period)
                        .copied()
                        .unwrap_or(0.0),
                }
            })
            .collect();

        info!(
            run_id = %self.run_id,
            total_fraud_amount,
            ranked_prevented,
            random_mean,
            random_std_dev,
            uplift = uplift_ratio.unwrap_or(f64::NAN),
            "Evaluation summary assembled"
        );

        Ok(EvaluationSummary {
            run_id: self.run_id.clone(),
            capacity_per_period,
            bootstrap_trials: bootstrap.trial_count,
            total_fraud_amount,
            ranked_amount_prevented: ranked_prevented,
            ranked_amount_lost: ranked.total_amount_lost(),
            ranked_prevented_pct: pct_of_total(ranked_prevented),
            random_amount_prevented_mean: random_mean,
            random_amount_prevented_std_dev: random_std_dev,
            random_prevented_pct: pct_of_total(random_mean),
            random_ci95_lower: ci_lower,
            random_ci95_upper: ci_upper,
            uplift_ratio,
            uplift_ratio_lower_bound,
            periods,
        })
    }
}
