//! CSV loading and joining of transactions, fraud labels and model scores.
//!
//! The evaluation core consumes an in-memory table; this module is the
//! upstream edge that builds it. A transaction is fraudulent iff its id
//! appears in the labels file; scores are joined by id and may be absent
//! (the ranked evaluator enforces their presence itself).

use crate::config::DataConfig;
use crate::types::{Period, Transaction};
use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::Read;
use tracing::{info, warn};

/// Raw transaction row as it appears in the source CSV. The file carries
/// more columns (merchant, POS entry mode, ...); only these three matter
/// for evaluation and the rest are ignored on deserialization.
#[derive(Debug, Deserialize)]
struct TransactionRow {
    #[serde(rename = "eventId")]
    event_id: String,
    #[serde(rename = "transactionTime")]
    transaction_time: String,
    #[serde(rename = "transactionAmount")]
    transaction_amount: f64,
}

#[derive(Debug, Deserialize)]
struct LabelRow {
    #[serde(rename = "eventId")]
    event_id: String,
}

#[derive(Debug, Deserialize)]
struct ScoreRow {
    #[serde(rename = "eventId")]
    event_id: String,
    score: f64,
}

const TIMESTAMP_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

fn parse_timestamp(raw: &str) -> Result<NaiveDateTime> {
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .with_context(|| format!("Unrecognized transaction timestamp: {raw}"))
}

/// Load the full labeled, scored transaction table described by `data`.
pub fn load_transactions(data: &DataConfig) -> Result<Vec<Transaction>> {
    let fraud_ids = read_fraud_labels(open(&data.labels_path)?)
        .with_context(|| format!("Failed to read labels from {}", data.labels_path))?;
    let scores = read_scores(open(&data.scores_path)?)
        .with_context(|| format!("Failed to read scores from {}", data.scores_path))?;
    let transactions = read_transactions(open(&data.transactions_path)?, &fraud_ids, &scores)
        .with_context(|| {
            format!("Failed to read transactions from {}", data.transactions_path)
        })?;

    info!(
        transactions = transactions.len(),
        frauds = transactions.iter().filter(|tx| tx.is_fraud).count(),
        labels = fraud_ids.len(),
        scores = scores.len(),
        "Loaded transaction table"
    );

    Ok(transactions)
}

fn open(path: &str) -> Result<File> {
    File::open(path).with_context(|| format!("Failed to open {path}"))
}

fn read_fraud_labels<R: Read>(reader: R) -> Result<HashSet<String>> {
    let mut reader = csv::Reader::from_reader(reader);
    let mut ids = HashSet::new();
    for row in reader.deserialize() {
        let row: LabelRow = row.context("Malformed label row")?;
        ids.insert(row.event_id);
    }
    Ok(ids)
}

fn read_scores<R: Read>(reader: R) -> Result<HashMap<String, f64>> {
    let mut reader = csv::Reader::from_reader(reader);
    let mut scores = HashMap::new();
    for row in reader.deserialize() {
        let row: ScoreRow = row.context("Malformed score row")?;
        scores.insert(row.event_id, row.score);
    }
    Ok(scores)
}

fn read_transactions<R: Read>(
    reader: R,
    fraud_ids: &HashSet<String>,
    scores: &HashMap<String, f64>,
) -> Result<Vec<Transaction>> {
    let mut reader = csv::Reader::from_reader(reader);
    let mut transactions = Vec::new();
    let mut unscored = 0usize;

    for row in reader.deserialize() {
        let row: TransactionRow = row.context("Malformed transaction row")?;
        let timestamp = parse_timestamp(&row.transaction_time)?;
        let period = Period::from_naive_datetime(&timestamp);

        let is_fraud = fraud_ids.contains(&row.event_id);
        let score = scores.get(&row.event_id).copied();
        if score.is_none() {
            unscored += 1;
        }

        transactions.push(Transaction::new(
            row.event_id,
            period,
            row.transaction_amount,
            is_fraud,
            score,
        )?);
    }

    if unscored > 0 {
        warn!(
            unscored,
            "Transactions without a model score; ranked evaluation will reject this table"
        );
    }

    Ok(transactions)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TRANSACTIONS_CSV: &str = "\
eventId,transactionTime,transactionAmount,merchantId,mcc
tx-1,2017-01-05T10:30:00,25.50,m-1,5411
tx-2,2017-01-20T23:59:59,100.00,m-2,5812
tx-3,2017-02-01T00:00:00,7.25,m-1,5411
";

    const LABELS_CSV: &str = "\
reportedTime,eventId
2017-02-03T09:00:00,tx-2
";

    const SCORES_CSV: &str = "\
eventId,score
tx-1,0.12
tx-2,0.87
";

    #[test]
    fn test_join_produces_labeled_scored_transactions() {
        let fraud_ids = read_fraud_labels(LABELS_CSV.as_bytes()).unwrap();
        let scores = read_scores(SCORES_CSV.as_bytes()).unwrap();
        let txns =
            read_transactions(TRANSACTIONS_CSV.as_bytes(), &fraud_ids, &scores).unwrap();

        assert_eq!(txns.len(), 3);

        assert_eq!(txns[0].id, "tx-1");
        assert_eq!(txns[0].period, Period::new(2017, 1).unwrap());
        assert_eq!(txns[0].amount, 25.5);
        assert!(!txns[0].is_fraud);
        assert_eq!(txns[0].score, Some(0.12));

        assert!(txns[1].is_fraud);
        assert_eq!(txns[1].score, Some(0.87));

        // tx-3 has no prediction: joined as unscored.
        assert_eq!(txns[2].period, Period::new(2017, 2).unwrap());
        assert_eq!(txns[2].score, None);
    }

    #[test]
    fn test_timestamp_formats() {
        assert!(parse_timestamp("2017-01-05T10:30:00").is_ok());
        assert!(parse_timestamp("2017-01-05 10:30:00").is_ok());
        assert!(parse_timestamp("2017-01-05T10:30:00.123").is_ok());
        assert!(parse_timestamp("2017-01-05").is_err());
        assert!(parse_timestamp("garbage").is_err());
    }

    #[test]
    fn test_malformed_amount_is_an_error() {
        let csv = "eventId,transactionTime,transactionAmount\ntx-1,2017-01-05T10:30:00,not-a-number\n";
        let err = read_transactions(csv.as_bytes(), &HashSet::new(), &HashMap::new());
        assert!(err.is_err());
    }

    #[test]
    fn test_negative_amount_is_rejected() {
        let csv = "eventId,transactionTime,transactionAmount\ntx-1,2017-01-05T10:30:00,-5.0\n";
        let err = read_transactions(csv.as_bytes(), &HashSet::new(), &HashMap::new());
        assert!(err.is_err());
    }
}
