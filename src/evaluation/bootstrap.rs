//! Monte Carlo estimate of the no-signal random investigation baseline.

use crate::error::EvalError;
use crate::evaluation::allocator;
use crate::evaluation::loss;
use crate::evaluation::periods::PeriodIndex;
use crate::types::{BootstrapSummary, Period, Transaction, TrialResult};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;
use std::collections::BTreeMap;
use tracing::info;

/// Estimates how much fraud a policy with no predictive signal would
/// prevent, by repeated random selection under the same capacity constraint.
///
/// Trials are statistically independent and run on a worker pool: each trial
/// owns its own generator, derived from the base seed and the trial index,
/// so results are reproducible regardless of scheduling order.
pub struct BootstrapBaselineEstimator {
    capacity_per_period: usize,
    trial_count: usize,
    seed: Option<u64>,
}

impl BootstrapBaselineEstimator {
    /// Create an estimator drawing randomness from OS entropy.
    pub fn new(capacity_per_period: usize, trial_count: usize) -> Self {
        Self {
            capacity_per_period,
            trial_count,
            seed: None,
        }
    }

    /// Fix the base seed for reproducible runs.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Run `trial_count` independent random-policy trials and aggregate them.
    ///
    /// Fails with [`EvalError::InvalidTrialCount`] for a zero trial count and
    /// [`EvalError::EmptyInput`] for an empty table, before any trial runs.
    pub fn estimate(&self, transactions: &[Transaction]) -> Result<BootstrapSummary, EvalError> {
        if self.trial_count == 0 {
            return Err(EvalError::InvalidTrialCount(self.trial_count));
        }
        let index = PeriodIndex::build(transactions)?;

        info!(
            trials = self.trial_count,
            capacity_per_period = self.capacity_per_period,
            periods = index.period_count(),
            seeded = self.seed.is_some(),
            "Running bootstrap baseline"
        );

        let acc = (0..self.trial_count)
            .into_par_iter()
            .map(|trial| self.run_trial(&index, trial))
            .fold(TrialAccumulator::default, |mut acc, trial| {
                acc.absorb(&trial);
                acc
            })
            .reduce(TrialAccumulator::default, TrialAccumulator::merge);

        Ok(acc.summarize())
    }

    fn run_trial(&self, index: &PeriodIndex<'_>, trial: usize) -> TrialResult {
        let mut rng = self.trial_rng(trial);

        let mut periods = BTreeMap::new();
        for (period, bucket) in index.iter() {
            let selected = allocator::select_random(bucket, self.capacity_per_period, &mut rng);
            periods.insert(*period, loss::score_selection(bucket, &selected));
        }
        TrialResult { periods }
    }

    fn trial_rng(&self, trial: usize) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(trial as u64)),
            None => StdRng::from_entropy(),
        }
    }
}

/// Running sums over trials. `merge` is associative and commutative, so
/// partial accumulators from parallel workers can be combined in any order.
#[derive(Debug, Default)]
struct TrialAccumulator {
    trials: usize,
    prevented_sum: f64,
    prevented_sum_sq: f64,
    fraud_count_sum: u64,
    ratio_trials: usize,
    ratio_sum: f64,
    ratio_sum_sq: f64,
    per_period_prevented: BTreeMap<Period, f64>,
}

impl TrialAccumulator {
    fn absorb(&mut self, trial: &TrialResult) {
        self.trials += 1;

        let prevented = trial.total_amount_prevented();
        self.prevented_sum += prevented;
        self.prevented_sum_sq += prevented * prevented;
        self.fraud_count_sum += trial.total_fraud_count_prevented();

        if let Some(ratio) = trial.mean_period_prevented_ratio() {
            self.ratio_trials += 1;
            self.ratio_sum += ratio;
            self.ratio_sum_sq += ratio * ratio;
        }

        for (period, outcome) in &trial.periods {
            *self.per_period_prevented.entry(*period).or_insert(0.0) +=
                outcome.amount_prevented;
        }
    }

    fn merge(mut self, other: Self) -> Self {
        self.trials += other.trials;
        self.prevented_sum += other.prevented_sum;
        self.prevented_sum_sq += other.prevented_sum_sq;
        self.fraud_count_sum += other.fraud_count_sum;
        self.ratio_trials += other.ratio_trials;
        self.ratio_sum += other.ratio_sum;
        self.ratio_sum_sq += other.ratio_sum_sq;
        for (period, sum) in other.per_period_prevented {
            *self.per_period_prevented.entry(period).or_insert(0.0) += sum;
        }
        self
    }

    fn summarize(self) -> BootstrapSummary {
        let n = self.trials as f64;

        let (ratio_mean, ratio_std_dev) = if self.ratio_trials > 0 {
            (
                Some(self.ratio_sum / self.ratio_trials as f64),
                Some(sample_std_dev(self.ratio_trials, self.ratio_sum, self.ratio_sum_sq)),
            )
        } else {
            (None, None)
        };

        BootstrapSummary {
            trial_count: self.trials,
            amount_prevented_mean: self.prevented_sum / n,
            amount_prevented_std_dev: sample_std_dev(
                self.trials,
                self.prevented_sum,
                self.prevented_sum_sq,
            ),
            fraud_count_prevented_mean: self.fraud_count_sum as f64 / n,
            period_ratio_mean: ratio_mean,
            period_ratio_std_dev: ratio_std_dev,
            per_period_prevented_mean: self
                .per_period_prevented
                .into_iter()
                .map(|(period, sum)| (period, sum / n))
                .collect(),
        }
    }
}

/// Sample standard deviation (n-1 divisor) from running sums.
///
/// Returns 0.0 with fewer than two samples; the subtraction is clamped at
/// zero to absorb floating-point cancellation.
fn sample_std_dev(n: usize, sum: f64, sum_sq: f64) -> f64 {
    if n < 2 {
        return 0.0;
    }
    let n = n as f64;
    let variance = (sum_sq - sum * sum / n) / (n - 1.0);
    variance.max(0.0).sqrt()
}
