//! Result records produced by the evaluation engine.

use crate::types::transaction::Period;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Outcome of investigating one period's selection under some policy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PeriodOutcome {
    /// Fraud amount caught by the investigated subset.
    pub amount_prevented: f64,
    /// Fraud amount that slipped through.
    pub amount_lost: f64,
    /// Number of fraudulent transactions in the investigated subset.
    pub fraud_count_prevented: u64,
    /// Number of transactions actually investigated.
    pub investigated_count: usize,
}

impl PeriodOutcome {
    /// Total fraud amount in the period. Prevented and lost always sum to it.
    pub fn fraud_amount(&self) -> f64 {
        self.amount_prevented + self.amount_lost
    }

    /// Prevented share of the period's fraud amount.
    ///
    /// `None` when the period carries no fraud; such periods are excluded
    /// from ratio aggregation but still counted in absolute sums.
    pub fn prevented_ratio(&self) -> Option<f64> {
        let total = self.fraud_amount();
        (total > 0.0).then(|| self.amount_prevented / total)
    }
}

/// One full pass of a selection policy over every period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrialResult {
    pub periods: BTreeMap<Period, PeriodOutcome>,
}

impl TrialResult {
    pub fn total_amount_prevented(&self) -> f64 {
        self.periods.values().map(|o| o.amount_prevented).sum()
    }

    pub fn total_amount_lost(&self) -> f64 {
        self.periods.values().map(|o| o.amount_lost).sum()
    }

    pub fn total_fraud_amount(&self) -> f64 {
        self.periods.values().map(|o| o.fraud_amount()).sum()
    }

    pub fn total_fraud_count_prevented(&self) -> u64 {
        self.periods.values().map(|o| o.fraud_count_prevented).sum()
    }

    /// Mean of the per-period prevented ratios.
    ///
    /// Periods without fraud have no defined ratio and are skipped; returns
    /// `None` when no period carries any fraud.
    pub fn mean_period_prevented_ratio(&self) -> Option<f64> {
        let ratios: Vec<f64> = self
            .periods
            .values()
            .filter_map(|o| o.prevented_ratio())
            .collect();
        if ratios.is_empty() {
            return None;
        }
        Some(ratios.iter().sum::<f64>() / ratios.len() as f64)
    }
}

/// Aggregate statistics over independent random-baseline trials.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BootstrapSummary {
    /// Number of trials aggregated.
    pub trial_count: usize,
    /// Mean total fraud amount prevented across trials.
    pub amount_prevented_mean: f64,
    /// Sample standard deviation (n-1 divisor; 0.0 with fewer than two trials).
    pub amount_prevented_std_dev: f64,
    /// Mean number of fraudulent transactions caught per trial.
    pub fraud_count_prevented_mean: f64,
    /// Mean of the per-trial mean period prevented ratio; `None` when the
    /// input has no fraud at all.
    pub period_ratio_mean: Option<f64>,
    /// Sample standard deviation of the per-trial ratio metric.
    pub period_ratio_std_dev: Option<f64>,
    /// Per-period mean fraud amount prevented across trials.
    pub per_period_prevented_mean: BTreeMap<Period, f64>,
}

/// Per-period slice of the final report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodReport {
    pub period: Period,
    pub transaction_count: usize,
    pub fraud_count: usize,
    pub fraud_amount: f64,
    pub ranked_amount_prevented: f64,
    pub ranked_amount_lost: f64,
    pub ranked_investigated: usize,
    /// Ranked prevented share of the period's fraud amount; `None` for
    /// fraud-free periods.
    pub ranked_prevented_ratio: Option<f64>,
    pub random_amount_prevented_mean: f64,
}

/// The persisted comparison between the ranked policy and the random
/// baseline. This is the sole artifact the engine hands to downstream
/// persistence; every ratio field is `None` (JSON `null`) when its
/// denominator is zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationSummary {
    /// Run identifier supplied by the caller.
    pub run_id: String,
    /// Investigative capacity per period the evaluation ran with.
    pub capacity_per_period: usize,
    /// Number of random-baseline trials.
    pub bootstrap_trials: usize,

    /// Total fraud amount observed across all periods.
    pub total_fraud_amount: f64,
    /// Fraud amount prevented by the score-ranked policy.
    pub ranked_amount_prevented: f64,
    pub ranked_amount_lost: f64,
    /// Ranked prevented amount as a percentage of total fraud.
    pub ranked_prevented_pct: Option<f64>,

    /// Mean fraud amount prevented by the random baseline.
    pub random_amount_prevented_mean: f64,
    pub random_amount_prevented_std_dev: f64,
    pub random_prevented_pct: Option<f64>,
    /// Normal-approximation 95% interval for the baseline's prevented amount.
    pub random_ci95_lower: f64,
    pub random_ci95_upper: f64,

    /// Ranked prevented over random mean prevented.
    pub uplift_ratio: Option<f64>,
    /// Conservative uplift: ranked prevented over the upper 95% bound of the
    /// random baseline.
    pub uplift_ratio_lower_bound: Option<f64>,

    pub periods: Vec<PeriodReport>,
}
