//! Fraud-Prevention Evaluation - Main Entry Point
//!
//! Loads the labeled, scored transaction table, evaluates the ranked
//! investigation policy against a random bootstrap baseline, and writes the
//! comparison summary as JSON.

use anyhow::{Context, Result};
use fraud_prevention_eval::{
    config::AppConfig,
    dataset,
    evaluation::{BootstrapBaselineEstimator, ComparisonReporter, RankedEvaluator},
};
use std::fs;
use tracing::info;
use uuid::Uuid;

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("fraud_prevention_eval=info".parse()?),
        )
        .init();

    info!("Starting fraud-prevention evaluation");

    // Load configuration
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "config/config.toml".to_string());
    let config = AppConfig::load_from_path(&config_path)?;
    info!(
        capacity_per_period = config.evaluation.capacity_per_period,
        trial_count = config.evaluation.trial_count,
        seed = ?config.evaluation.seed,
        "Configuration loaded"
    );

    // Load and join the transaction table
    let transactions = dataset::load_transactions(&config.data)?;

    let run_id = Uuid::new_v4().to_string();
    info!(run_id = %run_id, "Evaluating ranked policy");

    let ranked =
        RankedEvaluator::new(config.evaluation.capacity_per_period).evaluate(&transactions)?;
    info!(
        amount_prevented = ranked.total_amount_prevented(),
        amount_lost = ranked.total_amount_lost(),
        "Ranked evaluation complete"
    );

    let mut estimator = BootstrapBaselineEstimator::new(
        config.evaluation.capacity_per_period,
        config.evaluation.trial_count,
    );
    if let Some(seed) = config.evaluation.seed {
        estimator = estimator.with_seed(seed);
    }
    let bootstrap = estimator.estimate(&transactions)?;
    info!(
        mean = bootstrap.amount_prevented_mean,
        std_dev = bootstrap.amount_prevented_std_dev,
        "Bootstrap baseline complete"
    );

    // Combine both policies into the persisted summary
    let summary = ComparisonReporter::new(run_id).report(
        &transactions,
        config.evaluation.capacity_per_period,
        &ranked,
        &bootstrap,
    )?;

    let json = serde_json::to_string_pretty(&summary)?;
    fs::write(&config.data.summary_path, json)
        .with_context(|| format!("Failed to write summary to {}", config.data.summary_path))?;

    info!(
        summary_path = %config.data.summary_path,
        total_fraud_amount = summary.total_fraud_amount,
        ranked_prevented = summary.ranked_amount_prevented,
        random_mean_prevented = summary.random_amount_prevented_mean,
        uplift = summary.uplift_ratio.unwrap_or(f64::NAN),
        "Evaluation summary written"
    );

    Ok(())
}
