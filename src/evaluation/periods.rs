//! Grouping of transactions into per-period buckets.

use crate::error::EvalError;
use crate::types::{Period, Transaction};
use std::collections::BTreeMap;

/// Per-period view over a transaction table.
///
/// Every transaction lands in exactly one bucket, so the union of all
/// buckets reconstructs the input with no duplication or loss. Iteration
/// visits periods in chronological order regardless of input order.
#[derive(Debug)]
pub struct PeriodIndex<'a> {
    buckets: BTreeMap<Period, Vec<&'a Transaction>>,
}

impl<'a> PeriodIndex<'a> {
    /// Group transactions by period.
    ///
    /// Fails with [`EvalError::EmptyInput`] when there are no transactions:
    /// an empty table has no periods to evaluate.
    pub fn build(transactions: &'a [Transaction]) -> Result<Self, EvalError> {
        if transactions.is_empty() {
            return Err(EvalError::EmptyInput);
        }

        let mut buckets: BTreeMap<Period, Vec<&Transaction>> = BTreeMap::new();
        for tx in transactions {
            buckets.entry(tx.period).or_default().push(tx);
        }
        Ok(Self { buckets })
    }

    /// Iterate buckets in chronological period order.
    pub fn iter(&self) -> impl Iterator<Item = (&Period, &[&'a Transaction])> + '_ {
        self.buckets.iter().map(|(period, bucket)| (period, bucket.as_slice()))
    }

    /// The bucket for one period, if any transaction fell into it.
    pub fn bucket(&self, period: &Period) -> Option<&[&'a Transaction]> {
        self.buckets.get(period).map(|bucket| bucket.as_slice())
    }

    pub fn period_count(&self) -> usize {
        self.buckets.len()
    }

    pub fn transaction_count(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    /// Total fraud amount across all periods.
    pub fn total_fraud_amount(&self) -> f64 {
        self.buckets
            .values()
            .flatten()
            .filter(|tx| tx.is_fraud)
            .map(|tx| tx.amount)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tx(id: &str, month: u32, amount: f64, is_fraud: bool) -> Transaction {
        Transaction::new(id, Period::new(2017, month).unwrap(), amount, is_fraud, None)
            .unwrap()
    }

    #[test]
    fn test_empty_input_is_an_error() {
        assert_eq!(PeriodIndex::build(&[]).unwrap_err(), EvalError::EmptyInput);
    }

    #[test]
    fn test_buckets_partition_the_input() {
        let txns = vec![
            tx("a", 2, 10.0, false),
            tx("b", 1, 20.0, true),
            tx("c", 2, 30.0, true),
            tx("d", 1, 40.0, false),
        ];
        let index = PeriodIndex::build(&txns).unwrap();

        assert_eq!(index.period_count(), 2);
        assert_eq!(index.transaction_count(), txns.len());

        // Each transaction is in exactly the bucket for its own period.
        for t in &txns {
            let bucket = index.bucket(&t.period).unwrap();
            assert_eq!(bucket.iter().filter(|b| b.id == t.id).count(), 1);
        }
    }

    #[test]
    fn test_iteration_is_chronological() {
        let txns = vec![tx("a", 12, 1.0, false), tx("b", 1, 1.0, false), tx("c", 6, 1.0, false)];
        let index = PeriodIndex::build(&txns).unwrap();

        let months: Vec<u32> = index.iter().map(|(p, _)| p.month()).collect();
        assert_eq!(months, vec![1, 6, 12]);
    }

    #[test]
    fn test_total_fraud_amount() {
        let txns = vec![
            tx("a", 1, 10.0, true),
            tx("b", 1, 99.0, false),
            tx("c", 2, 30.0, true),
        ];
        let index = PeriodIndex::build(&txns).unwrap();
        assert_eq!(index.total_fraud_amount(), 40.0);
    }
}
