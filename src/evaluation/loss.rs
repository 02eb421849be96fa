//! Fraud amount prevented / lost accounting for one period.

use crate::types::{PeriodOutcome, Transaction};
use std::collections::HashSet;

/// Score one period's investigated selection.
///
/// Fraud amounts split into prevented (selected) and lost (not selected);
/// non-fraud transactions contribute zero to both sums. Investigating a
/// legitimate transaction reduces no loss; that simplification is part of
/// the evaluation's contract and is kept as is.
pub fn score_selection(bucket: &[&Transaction], selected: &[usize]) -> PeriodOutcome {
    let selected: HashSet<usize> = selected.iter().copied().collect();

    let mut outcome = PeriodOutcome {
        amount_prevented: 0.0,
        amount_lost: 0.0,
        fraud_count_prevented: 0,
        investigated_count: selected.len(),
    };

    for (idx, tx) in bucket.iter().enumerate() {
        if !tx.is_fraud {
            continue;
        }
        if selected.contains(&idx) {
            outcome.amount_prevented += tx.amount;
            outcome.fraud_count_prevented += 1;
        } else {
            outcome.amount_lost += tx.amount;
        }
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Period;

    fn tx(id: &str, amount: f64, is_fraud: bool) -> Transaction {
        Transaction::new(id, Period::new(2017, 1).unwrap(), amount, is_fraud, None).unwrap()
    }

    #[test]
    fn test_splits_fraud_into_prevented_and_lost() {
        let txns = [
            tx("a", 10.0, true),
            tx("b", 20.0, false),
            tx("c", 30.0, true),
            tx("d", 40.0, true),
        ];
        let bucket: Vec<&Transaction> = txns.iter().collect();

        let outcome = score_selection(&bucket, &[0, 1]);
        assert_eq!(outcome.amount_prevented, 10.0);
        assert_eq!(outcome.amount_lost, 70.0);
        assert_eq!(outcome.fraud_count_prevented, 1);
        assert_eq!(outcome.investigated_count, 2);
    }

    #[test]
    fn test_conservation() {
        let txns = [tx("a", 12.5, true), tx("b", 7.5, true), tx("c", 99.0, false)];
        let bucket: Vec<&Transaction> = txns.iter().collect();
        let total_fraud = 20.0;

        for selected in [vec![], vec![0], vec![1], vec![0, 1], vec![0, 1, 2]] {
            let outcome = score_selection(&bucket, &selected);
            assert!((outcome.amount_prevented + outcome.amount_lost - total_fraud).abs() < 1e-9);
        }
    }

    #[test]
    fn test_non_fraud_contributes_nothing() {
        let txns = [tx("a", 100.0, false), tx("b", 200.0, false)];
        let bucket: Vec<&Transaction> = txns.iter().collect();

        let outcome = score_selection(&bucket, &[0, 1]);
        assert_eq!(outcome.amount_prevented, 0.0);
        assert_eq!(outcome.amount_lost, 0.0);
        assert_eq!(outcome.fraud_count_prevented, 0);
        assert_eq!(outcome.investigated_count, 2);
    }

    #[test]
    fn test_empty_selection() {
        let txns = [tx("a", 10.0, true)];
        let bucket: Vec<&Transaction> = txns.iter().collect();

        let outcome = score_selection(&bucket, &[]);
        assert_eq!(outcome.amount_prevented, 0.0);
        assert_eq!(outcome.amount_lost, 10.0);
        assert_eq!(outcome.investigated_count, 0);
    }
}
