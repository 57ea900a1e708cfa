//! Ranking utilities.

use ordered_float::NotNan;
use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// The `k` highest scores as `(page, score)`, best first.
///
/// Equal scores are ordered by lower page index. Non-finite scores are skipped.
pub fn top_k(scores: &[f64], k: usize) -> Vec<(usize, f64)> {
    if k == 0 || scores.is_empty() {
        return Vec::new();
    }
    // Min-heap on (score, Reverse(index)): the root is the weakest kept entry.
    let mut heap = BinaryHeap::with_capacity(k + 1);
    for (i, &score) in scores.iter().enumerate() {
        let s = match NotNan::new(score) {
            Ok(s) if score.is_finite() => s,
            _ => continue,
        };
        let entry = Reverse((s, Reverse(i)));
        if heap.len() < k {
            heap.push(entry);
        } else if let Some(weakest) = heap.peek() {
            if entry < *weakest {
                heap.pop();
                heap.push(entry);
            }
        }
    }
    let mut results: Vec<(usize, f64)> = heap
        .into_iter()
        .map(|Reverse((s, Reverse(i)))| (i, s.into_inner()))
        .collect();
    results.sort_unstable_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
    results
}
