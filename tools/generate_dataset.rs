//! Synthetic Dataset Generator
//!
//! Writes a transactions/labels/scores CSV triple for exercising the
//! evaluation pipeline without the proprietary dataset. Scores are
//! informative but noisy, so the ranked policy should comfortably beat the
//! random baseline without being perfect.

use anyhow::{Context, Result};
use rand::Rng;
use std::fs;
use tracing::info;

/// One generated transaction with its label and model score.
struct GeneratedTransaction {
    event_id: String,
    transaction_time: String,
    amount: f64,
    merchant_id: String,
    mcc: String,
    is_fraud: bool,
    score: f64,
}

/// Transaction generator for testing
struct TransactionGenerator {
    rng: rand::rngs::ThreadRng,
    transaction_counter: u64,
    months: u32,
}

impl TransactionGenerator {
    fn new(months: u32) -> Self {
        Self {
            rng: rand::thread_rng(),
            transaction_counter: 0,
            months,
        }
    }

    fn generate(&mut self, fraud_rate: f64) -> GeneratedTransaction {
        self.transaction_counter += 1;
        let is_fraud = self.rng.gen_bool(fraud_rate);

        let month = self.rng.gen_range(1..=self.months);
        let transaction_time = format!(
            "2017-{:02}-{:02}T{:02}:{:02}:{:02}",
            month,
            self.rng.gen_range(1..=28),
            self.rng.gen_range(0..24),
            self.rng.gen_range(0..60),
            self.rng.gen_range(0..60),
        );

        let amount = if is_fraud {
            self.rng.gen_range(50.0..2000.0) // frauds skew large
        } else {
            self.rng.gen_range(1.0..500.0)
        };

        // Squaring a uniform draw pushes mass towards 0; mirroring it pushes
        // towards 1. Frauds mostly score high, legitimates mostly low, with
        // enough overlap to keep the ranking imperfect.
        let noise: f64 = self.rng.gen::<f64>() * self.rng.gen::<f64>();
        let score = if is_fraud { 1.0 - noise } else { noise };

        GeneratedTransaction {
            event_id: format!("tx_{:012}", self.transaction_counter),
            transaction_time,
            amount,
            merchant_id: format!("merchant_{}", self.rng.gen_range(1..1000)),
            mcc: self.random_choice(&["5411", "5812", "5541", "5912", "5999"]).to_string(),
            is_fraud,
            score,
        }
    }

    fn random_choice<'a>(&mut self, choices: &[&'a str]) -> &'a str {
        choices[self.rng.gen_range(0..choices.len())]
    }
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("generate_dataset=info".parse()?),
        )
        .init();

    info!("Starting synthetic dataset generator");

    // Parse arguments
    let args: Vec<String> = std::env::args().collect();
    let count: u64 = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(10_000);
    let fraud_rate: f64 = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(0.02);
    let months: u32 = args.get(3).and_then(|s| s.parse().ok()).unwrap_or(12);
    let out_dir = args.get(4).map(|s| s.as_str()).unwrap_or("data");

    info!(
        count = count,
        fraud_rate = fraud_rate,
        months = months,
        out_dir = %out_dir,
        "Configuration loaded"
    );

    fs::create_dir_all(format!("{out_dir}/raw"))
        .with_context(|| format!("Failed to create {out_dir}/raw"))?;

    let transactions_path = format!("{out_dir}/raw/transactions.csv");
    let labels_path = format!("{out_dir}/raw/labels.csv");
    let scores_path = format!("{out_dir}/predictions.csv");

    let mut transactions = csv::Writer::from_path(&transactions_path)
        .with_context(|| format!("Failed to create {transactions_path}"))?;
    let mut labels = csv::Writer::from_path(&labels_path)
        .with_context(|| format!("Failed to create {labels_path}"))?;
    let mut scores = csv::Writer::from_path(&scores_path)
        .with_context(|| format!("Failed to create {scores_path}"))?;

    transactions.write_record([
        "eventId",
        "transactionTime",
        "transactionAmount",
        "merchantId",
        "mcc",
    ])?;
    labels.write_record(["reportedTime", "eventId"])?;
    scores.write_record(["eventId", "score"])?;

    let mut generator = TransactionGenerator::new(months);
    let mut fraud_count = 0u64;

    for _ in 0..count {
        let tx = generator.generate(fraud_rate);

        let amount = format!("{:.2}", tx.amount);
        let score = format!("{:.6}", tx.score);

        transactions.write_record([
            tx.event_id.as_str(),
            tx.transaction_time.as_str(),
            amount.as_str(),
            tx.merchant_id.as_str(),
            tx.mcc.as_str(),
        ])?;
        scores.write_record([tx.event_id.as_str(), score.as_str()])?;

        if tx.is_fraud {
            fraud_count += 1;
            labels.write_record([tx.transaction_time.as_str(), tx.event_id.as_str()])?;
        }
    }

    transactions.flush()?;
    labels.flush()?;
    scores.flush()?;

    info!(
        "Completed! Wrote {} transactions ({} fraudulent) to {}",
        count, fraud_count, out_dir
    );

    Ok(())
}
