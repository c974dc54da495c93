//! Feature ranking and selection.
//!
//! ## Purpose
//!
//! This module converts a weight vector into an ordinal feature ranking
//! (rank 1 = most relevant) and a boolean mask selecting the top-n ranked
//! columns, the form downstream feature selection consumes.
//!
//! ## Design notes
//!
//! * **Ordinal ranks**: Every column gets a distinct rank; ties resolve to
//!   the lower column index (stable sort over index-ordered columns).

// External dependencies
use num_traits::Float;
use std::cmp::Ordering;

/// Ordinal 1-based ranks over a weight vector, descending: the highest
/// weight receives rank 1.
pub fn rank_descending<T: Float>(weights: &[T]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..weights.len()).collect();
    order.sort_by(|&a, &b| {
        weights[b]
            .partial_cmp(&weights[a])
            .unwrap_or(Ordering::Equal)
    });

    let mut ranks = vec![0; weights.len()];
    for (position, &column) in order.iter().enumerate() {
        ranks[column] = position + 1;
    }
    ranks
}

/// Boolean mask over columns, true where the rank is within the best
/// `n_select`.
pub fn selection_mask(ranks: &[usize], n_select: usize) -> Vec<bool> {
    ranks.iter().map(|&rank| rank <= n_select).collect()
}
