//! Weight-accumulation executor.
//!
//! ## Purpose
//!
//! This module implements the core of every weighting algorithm: one pass
//! over all samples in which each sample contributes a per-feature delta,
//! and the deltas are folded into a single weight vector. The three update
//! policies that turn a ranked neighborhood into a delta live here as well.
//!
//! ## Design notes
//!
//! * **Fold, not shared state**: Per-sample deltas are independent and
//!   read-only over the dataset; the accumulator is an explicit fold.
//! * **Deterministic parallelism**: The parallel path maps samples with
//!   rayon, collects the deltas in sample order, and folds them
//!   sequentially, so parallel and sequential runs are bit-identical.
//! * **Buffer reuse**: Each worker carries a scratch set (neighbor vector,
//!   diff buffer, class-split vectors) reused across its samples.
//!
//! ## Invariants
//!
//! * Each per-sample delta component lies in [-1, 1].
//! * The final weights are the delta sum divided by the sample count, so
//!   they also lie in [-1, 1] regardless of dataset size.
//!
//! ## Non-goals
//!
//! * This module does not validate inputs (handled by `primitives`).
//! * This module does not iterate; multi-pass refinement lives in the
//!   algorithms layer.

// Feature-gated imports
#[cfg(feature = "cpu")]
use rayon::prelude::*;

// External dependencies
use num_traits::Float;
use std::fmt;
use std::str::FromStr;

// Internal dependencies
use crate::math::distance::{row, DistanceModel, WeightedMetric};
use crate::math::kernel::RankKernel;
use crate::math::neighborhood::{class_split, rank_neighbors, Neighbor};
use crate::primitives::errors::ReliefError;

// ============================================================================
// Update Policy
// ============================================================================

/// Strategy converting one sample's ranked neighborhood into a feature
/// weight delta.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdatePolicy {
    /// Average difference to the k nearest misses minus the average
    /// difference to the k nearest hits.
    KNearest,
    /// Signed difference accumulated over every other sample, positive for
    /// misses and negative for hits.
    Diff,
    /// Same sign convention as `Diff`, with each neighbor weighted by the
    /// exponential rank-decay kernel and the sum normalized by the total
    /// kernel mass.
    ExpRank,
}

impl FromStr for UpdatePolicy {
    type Err = ReliefError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        match tag {
            "k_nearest" => Ok(UpdatePolicy::KNearest),
            "diff" => Ok(UpdatePolicy::Diff),
            "exp_rank" => Ok(UpdatePolicy::ExpRank),
            other => Err(ReliefError::InvalidMode(other.to_string())),
        }
    }
}

impl fmt::Display for UpdatePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpdatePolicy::KNearest => write!(f, "k_nearest"),
            UpdatePolicy::Diff => write!(f, "diff"),
            UpdatePolicy::ExpRank => write!(f, "exp_rank"),
        }
    }
}

// ============================================================================
// Pass Context & Scratch
// ============================================================================

/// Read-only state shared by every per-sample computation of one pass.
pub struct PassContext<'a, T, C> {
    pub data: &'a [T],
    pub target: &'a [C],
    pub samples: usize,
    pub features: usize,
    pub model: &'a DistanceModel<T>,
    /// Feature weights biasing the metric; `None` for uniform weighting.
    pub metric_weights: Option<&'a [T]>,
}

/// Per-worker scratch buffers, reused across samples.
pub struct Scratch<T> {
    pub ranked: Vec<Neighbor<T>>,
    pub diff: Vec<T>,
    pub hits: Vec<usize>,
    pub misses: Vec<usize>,
}

impl<T: Float> Scratch<T> {
    pub fn new(samples: usize, features: usize) -> Self {
        Self {
            ranked: Vec::with_capacity(samples.saturating_sub(1)),
            diff: vec![T::zero(); features],
            hits: Vec::new(),
            misses: Vec::new(),
        }
    }
}

// ============================================================================
// Accumulation Pass
// ============================================================================

/// Run one full pass: compute every sample's delta, fold the deltas, and
/// divide by the sample count.
///
/// The parallel path collects deltas in sample order before folding, so it
/// reproduces the sequential result exactly.
pub fn accumulate_pass<T, F>(samples: usize, features: usize, parallel: bool, delta_fn: F) -> Vec<T>
where
    T: Float + Send + Sync,
    F: Fn(usize, &mut Scratch<T>, &mut [T]) + Sync,
{
    #[cfg(feature = "cpu")]
    if parallel {
        let deltas: Vec<Vec<T>> = (0..samples)
            .into_par_iter()
            .map_init(
                || Scratch::new(samples, features),
                |scratch, i| {
                    let mut delta = vec![T::zero(); features];
                    delta_fn(i, scratch, &mut delta);
                    delta
                },
            )
            .collect();

        let mut acc = vec![T::zero(); features];
        for delta in &deltas {
            for (a, &d) in acc.iter_mut().zip(delta.iter()) {
                *a = *a + d;
            }
        }
        return finalize(acc, samples);
    }

    let _ = parallel;
    let mut scratch = Scratch::new(samples, features);
    let mut acc = vec![T::zero(); features];
    let mut delta = vec![T::zero(); features];
    for i in 0..samples {
        for d in delta.iter_mut() {
            *d = T::zero();
        }
        delta_fn(i, &mut scratch, &mut delta);
        for (a, &d) in acc.iter_mut().zip(delta.iter()) {
            *a = *a + d;
        }
    }
    finalize(acc, samples)
}

fn finalize<T: Float>(mut acc: Vec<T>, samples: usize) -> Vec<T> {
    let n = T::from(samples).unwrap();
    for a in acc.iter_mut() {
        *a = *a / n;
    }
    acc
}

// ============================================================================
// Policy Deltas
// ============================================================================

/// Compute one sample's delta under the selected update policy. The
/// neighborhood is ranked under the context's metric weights (uniform for
/// the single-pass engines).
pub fn policy_delta<T, C>(
    ctx: &PassContext<'_, T, C>,
    policy: UpdatePolicy,
    k: usize,
    kernel: &RankKernel<T>,
    sample: usize,
    scratch: &mut Scratch<T>,
    delta: &mut [T],
) where
    T: Float,
    C: PartialEq,
{
    let metric = WeightedMetric::new(ctx.model, ctx.metric_weights);
    rank_neighbors(sample, ctx.data, ctx.target, &metric, &mut scratch.ranked);

    match policy {
        UpdatePolicy::KNearest => k_nearest_delta(ctx, k, sample, scratch, delta),
        UpdatePolicy::Diff => diff_delta(ctx, sample, scratch, delta),
        UpdatePolicy::ExpRank => exp_rank_delta(ctx, kernel, sample, scratch, delta),
    }
}

/// Mean difference to the k nearest misses minus the mean difference to the
/// k nearest hits. A side with no neighbors contributes nothing.
fn k_nearest_delta<T, C>(
    ctx: &PassContext<'_, T, C>,
    k: usize,
    sample: usize,
    scratch: &mut Scratch<T>,
    delta: &mut [T],
) where
    T: Float,
    C: PartialEq,
{
    let Scratch {
        ranked,
        diff,
        hits,
        misses,
    } = scratch;
    class_split(ranked, k, hits, misses);

    let query_row = row(ctx.data, ctx.features, sample);
    for (indices, sign) in [(&*misses, T::one()), (&*hits, -T::one())] {
        if indices.is_empty() {
            continue;
        }
        let scale = sign / T::from(indices.len()).unwrap();
        for &index in indices.iter() {
            ctx.model
                .per_feature_diff(query_row, row(ctx.data, ctx.features, index), diff);
            for (d, &v) in delta.iter_mut().zip(diff.iter()) {
                *d = *d + v * scale;
            }
        }
    }
}

/// Signed difference over every other sample, averaged over the N-1
/// comparisons.
fn diff_delta<T, C>(
    ctx: &PassContext<'_, T, C>,
    sample: usize,
    scratch: &mut Scratch<T>,
    delta: &mut [T],
) where
    T: Float,
    C: PartialEq,
{
    let Scratch { ranked, diff, .. } = scratch;
    let query_row = row(ctx.data, ctx.features, sample);
    let comparisons = T::from(ctx.samples - 1).unwrap();

    for neighbor in ranked.iter() {
        let sign = if neighbor.hit { -T::one() } else { T::one() };
        ctx.model.per_feature_diff(
            query_row,
            row(ctx.data, ctx.features, neighbor.index),
            diff,
        );
        for (d, &v) in delta.iter_mut().zip(diff.iter()) {
            *d = *d + sign * v / comparisons;
        }
    }
}

/// Signed difference weighted by the rank-decay kernel and normalized by the
/// total kernel mass. Zero mass (fully decayed kernel) yields a zero delta.
fn exp_rank_delta<T, C>(
    ctx: &PassContext<'_, T, C>,
    kernel: &RankKernel<T>,
    sample: usize,
    scratch: &mut Scratch<T>,
    delta: &mut [T],
) where
    T: Float,
    C: PartialEq,
{
    let Scratch { ranked, diff, .. } = scratch;

    let mut mass = T::zero();
    for rank in 1..=ranked.len() {
        mass = mass + kernel.evaluate(rank);
    }
    if mass <= T::zero() {
        return;
    }

    let query_row = row(ctx.data, ctx.features, sample);
    for (position, neighbor) in ranked.iter().enumerate() {
        let weight = kernel.evaluate(position + 1) / mass;
        let sign = if neighbor.hit { -T::one() } else { T::one() };
        ctx.model.per_feature_diff(
            query_row,
            row(ctx.data, ctx.features, neighbor.index),
            diff,
        );
        for (d, &v) in delta.iter_mut().zip(diff.iter()) {
            *d = *d + sign * weight * v;
        }
    }
}

/// Nearest-hit/nearest-miss delta: the difference to the single nearest
/// miss minus the difference to the single nearest hit, under the context's
/// (possibly weighted) metric. Used by the iterative refinement loop.
pub fn nearest_hit_miss_delta<T, C>(
    ctx: &PassContext<'_, T, C>,
    sample: usize,
    scratch: &mut Scratch<T>,
    delta: &mut [T],
) where
    T: Float,
    C: PartialEq,
{
    let metric = WeightedMetric::new(ctx.model, ctx.metric_weights);
    rank_neighbors(sample, ctx.data, ctx.target, &metric, &mut scratch.ranked);

    let Scratch { ranked, diff, .. } = scratch;
    let query_row = row(ctx.data, ctx.features, sample);

    let nearest_hit = ranked.iter().find(|n| n.hit);
    let nearest_miss = ranked.iter().find(|n| !n.hit);

    for (neighbor, sign) in [(nearest_miss, T::one()), (nearest_hit, -T::one())] {
        if let Some(neighbor) = neighbor {
            ctx.model.per_feature_diff(
                query_row,
                row(ctx.data, ctx.features, neighbor.index),
                diff,
            );
            for (d, &v) in delta.iter_mut().zip(diff.iter()) {
                *d = *d + sign * v;
            }
        }
    }
}
