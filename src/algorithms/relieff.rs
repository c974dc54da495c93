//! Single-pass ReliefF weighting.
//!
//! ## Purpose
//!
//! This module provides the builder and processor for the classic ReliefF
//! pass: every sample contributes a feature-weight delta derived from its
//! ranked neighborhood under a uniform metric, with one of three update
//! policies turning the neighborhood into the delta.
//!
//! ## Key concepts
//!
//! * **Update policies**: `KNearest` (hit/miss averaging), `Diff` (raw
//!   pairwise accumulation), `ExpRank` (rank-decayed accumulation).
//! * **Fail fast**: Configuration errors surface at `build()`, data errors
//!   at the top of `fit()`, always before any neighbor search.
//! * **Bounded weights**: Per-sample deltas are averages of [0, 1]
//!   differences, and the pass divides by the sample count, so the final
//!   weights lie in [-1, 1].
//!
//! ## Non-goals
//!
//! * This processor does not refine the metric across passes (use the
//!   iterative engine).
//! * This processor does not classify or predict.

// External dependencies
use num_traits::Float;
use std::fmt::Debug;

// Internal dependencies
use crate::engine::executor::{accumulate_pass, policy_delta, PassContext, UpdatePolicy};
use crate::engine::output::ReliefResult;
use crate::input::{ClassInput, ReliefInput};
use crate::math::distance::{DistanceModel, FeatureType};
use crate::math::kernel::RankKernel;
use crate::primitives::errors::{ReliefError, Result};
use crate::primitives::validation::{check_inputs, check_neighbor_count};

// ============================================================================
// ReliefF Builder
// ============================================================================

/// Builder for the single-pass ReliefF processor.
#[derive(Debug, Clone)]
pub struct ReliefFBuilder<T> {
    /// Declared feature type; required, no default.
    pub feature_type: Option<FeatureType>,
    /// Selected update policy.
    pub policy: UpdatePolicy,
    /// Neighbor count; required by the `KNearest` policy.
    pub neighbors: Option<usize>,
    /// Decay constant for the `ExpRank` kernel.
    pub decay: T,
    /// Parallel execution of the per-sample work.
    pub parallel: bool,
}

impl<T: Float + Debug + Send + Sync> ReliefFBuilder<T> {
    /// Set the declared feature type.
    pub fn feature_type(mut self, feature_type: FeatureType) -> Self {
        self.feature_type = Some(feature_type);
        self
    }

    /// Set the update policy.
    pub fn update_policy(mut self, policy: UpdatePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Set the neighbor count used by the `KNearest` policy.
    pub fn neighbors(mut self, k: usize) -> Self {
        self.neighbors = Some(k);
        self
    }

    /// Set the rank-decay constant used by the `ExpRank` policy.
    pub fn decay(mut self, sigma: T) -> Self {
        self.decay = sigma;
        self
    }

    /// Set parallel execution mode.
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Validate the configuration and build the processor.
    pub fn build(self) -> Result<ReliefFProcessor<T>> {
        let feature_type = self
            .feature_type
            .ok_or_else(|| ReliefError::InvalidFeatureType("<unset>".to_string()))?;

        if self.decay <= T::zero() {
            return Err(ReliefError::InvalidInput(
                "decay constant must be positive".to_string(),
            ));
        }

        let neighbors = match self.policy {
            UpdatePolicy::KNearest => match self.neighbors {
                Some(k) if k >= 1 => k,
                other => {
                    return Err(ReliefError::InvalidNeighborCount {
                        k: other.unwrap_or(0),
                        samples: 0,
                    })
                }
            },
            _ => self.neighbors.unwrap_or(0),
        };

        Ok(ReliefFProcessor {
            feature_type,
            policy: self.policy,
            neighbors,
            decay: self.decay,
            parallel: self.parallel,
        })
    }
}

// ============================================================================
// ReliefF Processor
// ============================================================================

/// Single-pass ReliefF processor.
#[derive(Debug)]
pub struct ReliefFProcessor<T> {
    feature_type: FeatureType,
    policy: UpdatePolicy,
    neighbors: usize,
    decay: T,
    parallel: bool,
}

impl<T: Float + Debug + Send + Sync> ReliefFProcessor<T> {
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

        if self.policy == UpdatePolicy::KNearest {
            check_neighbor_count(self.neighbors, samples)?;
        }

        let model = DistanceModel::fit(data_slice, samples, features, self.feature_type);
        let kernel = RankKernel::new(self.decay);
        let ctx = PassContext {
            data: data_slice,
            target: target_slice,
            samples,
            features,
            model: &model,
            metric_weights: None,
        };

        let weights = accumulate_pass(samples, features, self.parallel, |i, scratch, delta| {
            policy_delta(&ctx, self.policy, self.neighbors, &kernel, i, scratch, delta)
        });

        Ok(ReliefResult::from_weights(weights))
    }
}
