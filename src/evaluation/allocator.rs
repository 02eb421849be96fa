//! Capacity-constrained selection policies.
//!
//! Both policies return indices into the period bucket they were given and
//! always select exactly `min(capacity, bucket_len)` transactions. Capacity
//! zero is a valid request for an empty selection, not an error.

use crate::error::EvalError;
use crate::types::Transaction;
use rand::Rng;
use std::cmp::Ordering;

/// Select up to `capacity` transactions by descending risk score.
///
/// The ordering is a stable, deterministic total order: score descending,
/// then amount descending, then id ascending. Repeated calls over the same
/// bucket return the same selection.
pub fn select_ranked(
    bucket: &[&Transaction],
    capacity: usize,
) -> Result<Vec<usize>, EvalError> {
    if let Some(tx) = bucket.iter().find(|tx| tx.score.is_none()) {
        return Err(EvalError::MissingScore { id: tx.id.clone() });
    }

    let take = capacity.min(bucket.len());
    if take == 0 {
        return Ok(Vec::new());
    }

    let mut order: Vec<usize> = (0..bucket.len()).collect();
    order.sort_by(|&a, &b| rank_order(bucket[a], bucket[b]));
    order.truncate(take);
    Ok(order)
}

// Scores are all present once select_ranked has validated the bucket; the
// NEG_INFINITY fallback keeps the comparator total either way.
fn rank_order(a: &Transaction, b: &Transaction) -> Ordering {
    let score_a = a.score.unwrap_or(f64::NEG_INFINITY);
    let score_b = b.score.unwrap_or(f64::NEG_INFINITY);
    score_b
        .total_cmp(&score_a)
        .then_with(|| b.amount.total_cmp(&a.amount))
        .then_with(|| a.id.cmp(&b.id))
}

/// Select `min(capacity, bucket_len)` transactions uniformly at random
/// without replacement, consuming randomness from the caller's generator.
pub fn select_random<R: Rng>(
    bucket: &[&Transaction],
    capacity: usize,
    rng: &mut R,
) -> Vec<usize> {
    let take = capacity.min(bucket.len());
    if take == 0 {
        return Vec::new();
    }
    rand::seq::index::sample(rng, bucket.len(), take).into_vec()
}
