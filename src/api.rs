//! High-level API for feature weighting.
//!
//! ## Purpose
//!
//! This module provides the primary user-facing surface: a fluent builder
//! for configuring a run and choosing an algorithm (ReliefF, iterative
//! Relief, or the SURF family), plus free functions for the two common
//! one-shot invocations.
//!
//! ## Design notes
//!
//! * **Ergonomic**: Fluent builder with sensible defaults for every knob
//!   except the feature type, which must be stated explicitly.
//! * **Polymorphic**: Marker types transition the shared builder into
//!   specialized per-algorithm builders.
//! * **Validated**: Configuration is validated when `build()` is called on
//!   the specialized builder, data when `fit()` runs.
//!
//! ### Configuration Flow
//!
//! 1. Create a [`ReliefBuilder`] via `Relief::new()`.
//! 2. Chain configuration methods (`.feature_type()`, `.neighbors()`, ...).
//! 3. Select an algorithm via `.algorithm(Algorithm::ReliefF)` to get a
//!    specialized builder, then `.build()?.fit(&data, &target)?`.

// External dependencies
use num_traits::Float;
use std::fmt::Debug;

// Internal dependencies
use crate::algorithms::iterative::{
    IterativeReliefBuilder, DEFAULT_ITERATIONS, DEFAULT_TOLERANCE,
};
use crate::algorithms::relieff::ReliefFBuilder;
use crate::algorithms::spatial::{SpatialReliefBuilder, SpatialVariant};
use crate::engine::executor::UpdatePolicy;
use crate::math::distance::FeatureType;
use crate::math::kernel::DEFAULT_DECAY;
use crate::primitives::errors::Result;

// ============================================================================
// Algorithm Module
// ============================================================================

/// Algorithm selection namespace.
#[allow(non_snake_case)]
pub mod Algorithm {
    pub use super::{IterativeRelief, MultiSurf, ReliefF, Surf, SurfStar};
}

// ============================================================================
// Relief Builder
// ============================================================================

/// Entry point for configuring a feature-weighting run.
#[derive(Debug, Clone, Copy)]
pub struct Relief;

impl Relief {
    /// Create a new builder with default parameters.
    #[allow(clippy::new_ret_no_self)]
    pub fn new<T: Float>() -> ReliefBuilder<T> {
        ReliefBuilder::default()
    }
}

/// Shared configuration builder, converted into a specialized builder by
/// [`ReliefBuilder::algorithm`].
#[derive(Debug, Clone)]
pub struct ReliefBuilder<T> {
    /// Declared feature type; required, no default.
    pub feature_type: Option<FeatureType>,
    /// ReliefF update policy; defaults to `ExpRank`.
    pub policy: Option<UpdatePolicy>,
    /// Neighbor count for the `KNearest` policy; required by that policy.
    pub neighbors: Option<usize>,
    /// Rank-decay constant for the `ExpRank` policy.
    pub decay: Option<T>,
    /// Pass budget for the iterative engine.
    pub iterations: Option<usize>,
    /// Convergence tolerance for the iterative engine.
    pub tolerance: Option<T>,
    /// Record per-pass weight vectors (iterative engine).
    pub return_history: Option<bool>,
    /// Parallel execution of the per-sample work.
    pub parallel: Option<bool>,
}

impl<T> Default for ReliefBuilder<T> {
    fn default() -> Self {
        Self {
            feature_type: None,
            policy: None,
            neighbors: None,
            decay: None,
            iterations: None,
            tolerance: None,
            return_history: None,
            parallel: None,
        }
    }
}

impl<T: Float> ReliefBuilder<T> {
    /// Set the declared feature type (required).
    pub fn feature_type(mut self, feature_type: FeatureType) -> Self {
        self.feature_type = Some(feature_type);
        self
    }

    /// Set the ReliefF update policy.
    pub fn update_policy(mut self, policy: UpdatePolicy) -> Self {
        self.policy = Some(policy);
        self
    }

    /// Set the neighbor count used by the `KNearest` policy.
    pub fn neighbors(mut self, k: usize) -> Self {
        self.neighbors = Some(k);
        self
    }

    /// Set the rank-decay constant used by the `ExpRank` policy.
    pub fn decay(mut self, sigma: T) -> Self {
        self.decay = Some(sigma);
        self
    }

    /// Set the pass budget for the iterative engine.
    pub fn iterations(mut self, iterations: usize) -> Self {
        self.iterations = Some(iterations);
        self
    }

    /// Set the convergence tolerance for the iterative engine.
    pub fn tolerance(mut self, tolerance: T) -> Self {
        self.tolerance = Some(tolerance);
        self
    }

    /// Record per-pass weight vectors in the result (iterative engine).
    pub fn return_history(mut self, enabled: bool) -> Self {
        self.return_history = Some(enabled);
        self
    }

    /// Set parallel execution mode.
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = Some(parallel);
        self
    }

    /// Transition to the specialized builder for the chosen algorithm.
    pub fn algorithm<A: ReliefAlgorithm<T>>(self, _algorithm: A) -> A::Output {
        A::convert(self)
    }
}

// ============================================================================
// Algorithm Marker Types
// ============================================================================

/// Conversion from the shared builder into an algorithm-specific builder.
pub trait ReliefAlgorithm<T: Float> {
    type Output;

    fn convert(builder: ReliefBuilder<T>) -> Self::Output;
}

/// Marker for the single-pass ReliefF engine.
#[derive(Debug, Clone, Copy)]
pub struct ReliefF;

impl<T: Float + Debug + Send + Sync> ReliefAlgorithm<T> for ReliefF {
    type Output = ReliefFBuilder<T>;

    fn convert(builder: ReliefBuilder<T>) -> Self::Output {
        ReliefFBuilder {
            feature_type: builder.feature_type,
            policy: builder.policy.unwrap_or(UpdatePolicy::ExpRank),
            neighbors: builder.neighbors,
            decay: builder
                .decay
                .unwrap_or_else(|| T::from(DEFAULT_DECAY).unwrap()),
            parallel: builder.parallel.unwrap_or(true),
        }
    }
}

/// Marker for the iterative metric-refinement engine.
#[derive(Debug, Clone, Copy)]
pub struct IterativeRelief;

impl<T: Float + Debug + Send + Sync> ReliefAlgorithm<T> for IterativeRelief {
    type Output = IterativeReliefBuilder<T>;

    fn convert(builder: ReliefBuilder<T>) -> Self::Output {
        IterativeReliefBuilder {
            feature_type: builder.feature_type,
            iterations: builder.iterations.unwrap_or(DEFAULT_ITERATIONS),
            tolerance: builder
                .tolerance
                .unwrap_or_else(|| T::from(DEFAULT_TOLERANCE).unwrap()),
            return_history: builder.return_history.unwrap_or(false),
            parallel: builder.parallel.unwrap_or(true),
        }
    }
}

/// Marker for the SURF engine (global mean-distance radius).
#[derive(Debug, Clone, Copy)]
pub struct Surf;

impl<T: Float + Debug + Send + Sync> ReliefAlgorithm<T> for Surf {
    type Output = SpatialReliefBuilder<T>;

    fn convert(builder: ReliefBuilder<T>) -> Self::Output {
        spatial_builder(builder, SpatialVariant::Surf)
    }
}

/// Marker for the SURF* engine (near and inverted far zones).
#[derive(Debug, Clone, Copy)]
pub struct SurfStar;

impl<T: Float + Debug + Send + Sync> ReliefAlgorithm<T> for SurfStar {
    type Output = SpatialReliefBuilder<T>;

    fn convert(builder: ReliefBuilder<T>) -> Self::Output {
        spatial_builder(builder, SpatialVariant::SurfStar)
    }
}

/// Marker for the MultiSURF engine (per-sample radius with dead band).
#[derive(Debug, Clone, Copy)]
pub struct MultiSurf;

impl<T: Float + Debug + Send + Sync> ReliefAlgorithm<T> for MultiSurf {
    type Output = SpatialReliefBuilder<T>;

    fn convert(builder: ReliefBuilder<T>) -> Self::Output {
        spatial_builder(builder, SpatialVariant::MultiSurf)
    }
}

fn spatial_builder<T: Float + Debug + Send + Sync>(
    builder: ReliefBuilder<T>,
    variant: SpatialVariant,
) -> SpatialReliefBuilder<T> {
    let mut spatial = SpatialReliefBuilder::new(variant);
    spatial.feature_type = builder.feature_type;
    spatial.parallel = builder.parallel.unwrap_or(true);
    spatial
}

// ============================================================================
// One-Shot Functions
// ============================================================================

/// Compute ReliefF feature weights in one call.
///
/// `k` is required by the `KNearest` policy and ignored by the others.
pub fn relieff<T, C>(
    data: &[T],
    target: &[C],
    policy: UpdatePolicy,
    feature_type: FeatureType,
    k: Option<usize>,
) -> Result<Vec<T>>
where
    T: Float + Debug + Send + Sync,
    C: PartialEq + Sync,
{
    let mut builder = Relief::new()
        .feature_type(feature_type)
        .update_policy(policy);
    if let Some(k) = k {
        builder = builder.neighbors(k);
    }
    builder
        .algorithm(Algorithm::ReliefF)
        .build()?
        .fit(data, target)
        .map(|result| result.weights)
}

/// Compute iteratively refined Relief feature weights in one call.
pub fn iterative_relief<T, C>(
    data: &[T],
    target: &[C],
    feature_type: FeatureType,
    iterations: Option<usize>,
) -> Result<Vec<T>>
where
    T: Float + Debug + Send + Sync,
    C: PartialEq + Sync,
{
    let mut builder = Relief::new().feature_type(feature_type);
    if let Some(iterations) = iterations {
        builder = builder.iterations(iterations);
    }
    builder
        .algorithm(Algorithm::IterativeRelief)
        .build()?
        .fit(data, target)
        .map(|result| result.weights)
}
