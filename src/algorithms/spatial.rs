//! Threshold-based Relief variants: SURF, SURF*, MultiSURF.
//!
//! ## Purpose
//!
//! This module provides the spatially uniform Relief family. Instead of a
//! fixed neighbor count, these variants select neighbors by a distance
//! radius: SURF uses the global mean pairwise distance, SURF* additionally
//! exploits the far zone with inverted contributions, and MultiSURF derives
//! a per-sample radius with a dead band of half the distance standard
//! deviation.
//!
//! ## Key concepts
//!
//! * **Global radius (SURF/SURF*)**: One threshold, the mean aggregate
//!   distance over all sample pairs.
//! * **Far-zone inversion (SURF*)**: Beyond the radius, hits increase and
//!   misses decrease a weight, mirroring the near-zone convention.
//! * **Per-sample radius (MultiSURF)**: Mean distance from the sample minus
//!   half the standard deviation; only neighbors inside count.
//!
//! ## Invariants
//!
//! * A sample with an empty zone contributes a zero delta.
//! * Deltas average over the contributing neighbors, keeping the final
//!   weights in [-1, 1].

// Feature-gated imports
#[cfg(feature = "cpu")]
use rayon::prelude::*;

// External dependencies
use num_traits::Float;
use std::fmt::Debug;

// Internal dependencies
use crate::engine::executor::{accumulate_pass, PassContext, Scratch};
use crate::engine::output::ReliefResult;
use crate::input::{ClassInput, ReliefInput};
use crate::math::distance::{row, DistanceModel, FeatureType, WeightedMetric};
use crate::math::neighborhood::collect_neighbors;
use crate::primitives::errors::{ReliefError, Result};
use crate::primitives::validation::check_inputs;

// ============================================================================
// Variant Selection
// ============================================================================

/// Which member of the spatial Relief family to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpatialVariant {
    /// Global mean-distance radius, near zone only.
    Surf,
    /// Global radius plus inverted far-zone contributions.
    SurfStar,
    /// Per-sample radius with a half-standard-deviation dead band.
    MultiSurf,
}

// ============================================================================
// Spatial Relief Builder
// ============================================================================

/// Builder for the spatial Relief processor.
#[derive(Debug, Clone)]
pub struct SpatialReliefBuilder<T> {
    /// Which family member to run.
    pub variant: SpatialVariant,
    /// Declared feature type; required, no default.
    pub feature_type: Option<FeatureType>,
    /// Parallel execution of the per-sample work.
    pub parallel: bool,
    marker: std::marker::PhantomData<T>,
}

impl<T: Float + Debug + Send + Sync> SpatialReliefBuilder<T> {
    pub fn new(variant: SpatialVariant) -> Self {
        Self {
            variant,
            feature_type: None,
            parallel: true,
            marker: std::marker::PhantomData,
        }
    }

    /// Set the declared feature type.
    pub fn feature_type(mut self, feature_type: FeatureType) -> Self {
        self.feature_type = Some(feature_type);
        self
    }

    /// Set parallel execution mode.
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Validate the configuration and build the processor.
    pub fn build(self) -> Result<SpatialReliefProcessor<T>> {
        let feature_type = self
            .feature_type
            .ok_or_else(|| ReliefError::InvalidFeatureType("<unset>".to_string()))?;

        Ok(SpatialReliefProcessor {
            variant: self.variant,
            feature_type,
            parallel: self.parallel,
            marker: std::marker::PhantomData,
        })
    }
}

// ============================================================================
// Spatial Relief Processor
// ============================================================================

/// Threshold-based Relief processor.
#[derive(Debug)]
pub struct SpatialReliefProcessor<T> {
    variant: SpatialVariant,
    feature_type: FeatureType,
    parallel: bool,
    marker: std::marker::PhantomData<T>,
}

impl<T: Float + Debug + Send + Sync> SpatialReliefProcessor<T> {
    /// Compute per-feature relevance weights for the dataset.
    pub fn fit<I, G, C>(self, data: &I, target: &G) -> Result<ReliefResult<T>>
    where
        I: ReliefInput<T> + ?Sized,
        G: ClassInput<C> + ?Sized,
        C: PartialEq + Sync,
    {
        let data_slice = data.as_relief_slice()?;
        let target_slice = target.as_class_slice()?;
        let samples = target_slice.len();
        let features = check_inputs(data_slice, data.shape(), samples)?;

        let model = DistanceModel::fit(data_slice, samples, features, self.feature_type);
        let ctx = PassContext {
            data: data_slice,
            target: target_slice,
            samples,
            features,
            model: &model,
            metric_weights: None,
        };

        let radius = match self.variant {
            SpatialVariant::Surf | SpatialVariant::SurfStar => {
                Some(mean_pairwise_distance(&ctx, self.parallel))
            }
            SpatialVariant::MultiSurf => None,
        };

        let variant = self.variant;
        let weights = accumulate_pass(samples, features, self.parallel, |i, scratch, delta| {
            spatial_delta(&ctx, variant, radius, i, scratch, delta)
        });

        Ok(ReliefResult::from_weights(weights))
    }
}

// ============================================================================
// Radius & Deltas
// ============================================================================

/// Mean aggregate distance over all sample pairs. Partial sums are computed
/// per sample (over higher indices only) and folded in sample order, so the
/// parallel and sequential results agree exactly.
fn mean_pairwise_distance<T, C>(ctx: &PassContext<'_, T, C>, parallel: bool) -> T
where
    T: Float + Send + Sync,
    C: PartialEq + Sync,
{
    let metric = WeightedMetric::new(ctx.model, None);
    let pair_sum = |i: usize| -> T {
        let a = row(ctx.data, ctx.features, i);
        let mut sum = T::zero();
        for j in (i + 1)..ctx.samples {
            sum = sum + metric.distance(a, row(ctx.data, ctx.features, j));
        }
        sum
    };

    #[cfg(feature = "cpu")]
    let partials: Vec<T> = if parallel {
        (0..ctx.samples).into_par_iter().map(pair_sum).collect()
    } else {
        (0..ctx.samples).map(pair_sum).collect()
    };
    #[cfg(not(feature = "cpu"))]
    let partials: Vec<T> = {
        let _ = parallel;
        (0..ctx.samples).map(pair_sum).collect()
    };

    let total = partials.iter().fold(T::zero(), |acc, &s| acc + s);
    let pairs = T::from(ctx.samples * (ctx.samples - 1) / 2).unwrap();
    total / pairs
}

/// One sample's delta under the selected spatial variant.
fn spatial_delta<T, C>(
    ctx: &PassContext<'_, T, C>,
    variant: SpatialVariant,
    radius: Option<T>,
    sample: usize,
    scratch: &mut Scratch<T>,
    delta: &mut [T],
) where
    T: Float,
    C: PartialEq,
{
    let metric = WeightedMetric::new(ctx.model, None);
    collect_neighbors(sample, ctx.data, ctx.target, &metric, &mut scratch.ranked);

    let threshold = match variant {
        SpatialVariant::Surf | SpatialVariant::SurfStar => radius.unwrap(),
        SpatialVariant::MultiSurf => {
            let count = T::from(scratch.ranked.len()).unwrap();
            let mean = scratch
                .ranked
                .iter()
                .fold(T::zero(), |acc, n| acc + n.distance)
                / count;
            let variance = scratch.ranked.iter().fold(T::zero(), |acc, n| {
                let dev = n.distance - mean;
                acc + dev * dev
            }) / count;
            mean - variance.sqrt() / T::from(2.0).unwrap()
        }
    };

    let Scratch { ranked, diff, .. } = scratch;
    let query_row = row(ctx.data, ctx.features, sample);

    match variant {
        SpatialVariant::Surf | SpatialVariant::MultiSurf => {
            let near = ranked.iter().filter(|n| n.distance < threshold).count();
            if near == 0 {
                return;
            }
            let scale = T::one() / T::from(near).unwrap();
            for neighbor in ranked.iter().filter(|n| n.distance < threshold) {
                let sign = if neighbor.hit { -T::one() } else { T::one() };
                ctx.model.per_feature_diff(
                    query_row,
                    row(ctx.data, ctx.features, neighbor.index),
                    diff,
                );
                for (d, &v) in delta.iter_mut().zip(diff.iter()) {
                    *d = *d + sign * v * scale;
                }
            }
        }
        SpatialVariant::SurfStar => {
            let scale = T::one() / T::from(ranked.len()).unwrap();
            for neighbor in ranked.iter() {
                let near = neighbor.distance < threshold;
                let sign = match (near, neighbor.hit) {
                    (true, false) | (false, true) => T::one(),
                    (true, true) | (false, false) => -T::one(),
                };
                ctx.model.per_feature_diff(
                    query_row,
                    row(ctx.data, ctx.features, neighbor.index),
                    diff,
                );
                for (d, &v) in delta.iter_mut().zip(diff.iter()) {
                    *d = *d + sign * v * scale;
                }
            }
        }
    }
}
