//! Result type for feature-weighting runs.
//!
//! ## Purpose
//!
//! This module defines the single output artifact every processor returns:
//! the per-feature weight vector, its ordinal ranking, and optional
//! refinement diagnostics.

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::evaluation::ranking::rank_descending;

/// Output of one feature-weighting run.
#[derive(Debug, Clone)]
pub struct ReliefResult<T> {
    /// Per-feature relevance weights, one per dataset column.
    pub weights: Vec<T>,
    /// 1-based ordinal ranks over the weights: the highest weight gets
    /// rank 1, ties resolve to the lower column index.
    pub ranks: Vec<usize>,
    /// Number of refinement passes actually executed (iterative engine
    /// only).
    pub iterations_run: Option<usize>,
    /// Weight vector after each refinement pass, when requested via
    /// `return_history` (iterative engine only).
    pub history: Option<Vec<Vec<T>>>,
}

impl<T: Float> ReliefResult<T> {
    /// Build a result from a finished weight vector, computing the ranks.
    pub fn from_weights(weights: Vec<T>) -> Self {
        let ranks = rank_descending(&weights);
        Self {
            weights,
            ranks,
            iterations_run: None,
            history: None,
        }
    }

    /// Indices of the `n` best-ranked features, ordered by rank.
    pub fn top_features(&self, n: usize) -> Vec<usize> {
        let mut selected: Vec<usize> = self
            .ranks
            .iter()
            .enumerate()
            .filter(|(_, &rank)| rank <= n)
            .map(|(column, _)| column)
            .collect();
        selected.sort_by_key(|&column| self.ranks[column]);
        selected
    }
}
