//! Ranked neighborhood search.
//!
//! ## Purpose
//!
//! This module finds, for one query sample, every other sample ordered by
//! aggregate distance under the active metric, labeling each neighbor as a
//! hit (same class as the query) or a miss (different class). The resulting
//! neighbor set is transient: it lives for one sample's weight-update step
//! and its buffer is reused for the next.
//!
//! ## Design notes
//!
//! * **Brute-force scan**: Policies consume the *whole* ranking and the
//!   iterative engine changes the metric every pass, so a spatial index
//!   would be rebuilt per pass for no asymptotic win at this scale.
//! * **Stable ordering**: Candidates are generated in index order and the
//!   sort is stable, so distance ties resolve to the lower sample index.
//! * **Buffer reuse**: Callers own the neighbor vector and pass it back in,
//!   avoiding per-sample allocation.
//!
//! ## Invariants
//!
//! * The query sample never appears in its own neighbor set.
//! * Identical inputs produce the identical ranking on every call.

// External dependencies
use num_traits::Float;
use std::cmp::Ordering;

// Internal dependencies
use crate::math::distance::{row, WeightedMetric};

// ============================================================================
// Neighbor Set
// ============================================================================

/// One entry of a neighbor set.
#[derive(Debug, Clone, Copy)]
pub struct Neighbor<T> {
    /// Sample index of the neighbor.
    pub index: usize,
    /// Aggregate distance to the query sample.
    pub distance: T,
    /// Whether the neighbor shares the query's class label.
    pub hit: bool,
}

// ============================================================================
// Search
// ============================================================================

/// Collect every other sample with its distance and hit/miss label, in
/// sample-index order (unranked).
pub fn collect_neighbors<T, C>(
    query: usize,
    data: &[T],
    target: &[C],
    metric: &WeightedMetric<'_, T>,
    out: &mut Vec<Neighbor<T>>,
) where
    T: Float,
    C: PartialEq,
{
    let features = metric.model().features();
    let query_row = row(data, features, query);
    out.clear();
    for (index, label) in target.iter().enumerate() {
        if index == query {
            continue;
        }
        out.push(Neighbor {
            index,
            distance: metric.distance(query_row, row(data, features, index)),
            hit: *label == target[query],
        });
    }
}

/// Collect and rank every other sample by ascending aggregate distance.
/// Ties resolve to the lower sample index.
pub fn rank_neighbors<T, C>(
    query: usize,
    data: &[T],
    target: &[C],
    metric: &WeightedMetric<'_, T>,
    out: &mut Vec<Neighbor<T>>,
) where
    T: Float,
    C: PartialEq,
{
    collect_neighbors(query, data, target, metric, out);
    out.sort_by(|a, b| a.distance.partial_cmp(&b.distance).unwrap_or(Ordering::Equal));
}

/// Walk a ranked neighbor set and collect the indices of up to `k` nearest
/// hits and up to `k` nearest misses.
pub fn class_split<T: Float>(
    ranked: &[Neighbor<T>],
    k: usize,
    hits: &mut Vec<usize>,
    misses: &mut Vec<usize>,
) {
    hits.clear();
    misses.clear();
    for neighbor in ranked {
        if neighbor.hit {
            if hits.len() < k {
                hits.push(neighbor.index);
            }
        } else if misses.len() < k {
            misses.push(neighbor.index);
        }
        if hits.len() == k && misses.len() == k {
            break;
        }
    }
}
