//! Iterative Relief with metric feedback.
//!
//! ## Purpose
//!
//! This module provides the multi-pass refinement engine: the weight vector
//! estimated in pass *t* biases the distance metric used for neighbor
//! search in pass *t+1*. The loop is a state machine whose state is the
//! current weight vector; one transition is a full dataset pass
//! accumulating nearest-hit/nearest-miss deltas under the weighted metric,
//! followed by clamping to non-negative values and renormalization to unit
//! sum. This feedback makes the result genuinely different from a single
//! ReliefF pass.
//!
//! ## Key concepts
//!
//! * **Uniform start**: Weights initialize to 1/M per feature.
//! * **Termination**: A fixed pass budget, with early exit once the largest
//!   per-feature change drops below the tolerance.
//! * **Sequential outer loop**: Passes depend on each other and cannot be
//!   parallelized; the per-sample work inside one pass can be.
//!
//! ## Invariants
//!
//! * The state is always a valid metric: non-negative weights summing to 1
//!   (uniform fallback when an estimate collapses to all-zero).
//! * `iterations_run` reports the number of transitions actually taken.

// External dependencies
use num_traits::Float;
use std::fmt::Debug;

// Internal dependencies
use crate::engine::executor::{accumulate_pass, nearest_hit_miss_delta, PassContext};
use crate::engine::output::ReliefResult;
use crate::input::{ClassInput, ReliefInput};
use crate::math::distance::{DistanceModel, FeatureType};
use crate::primitives::errors::{ReliefError, Result};
use crate::primitives::validation::check_inputs;

/// Default pass budget.
pub const DEFAULT_ITERATIONS: usize = 20;

/// Default convergence tolerance on the max per-feature weight change.
pub const DEFAULT_TOLERANCE: f64 = 1e-6;

// ============================================================================
// Iterative Relief Builder
// ============================================================================

/// Builder for the iterative Relief processor.
#[derive(Debug, Clone)]
pub struct IterativeReliefBuilder<T> {
    /// Declared feature type; required, no default.
    pub feature_type: Option<FeatureType>,
    /// Maximum number of refinement passes.
    pub iterations: usize,
    /// Convergence tolerance on the max per-feature weight change.
    pub tolerance: T,
    /// Record the weight vector after every pass.
    pub return_history: bool,
    /// Parallel execution of the per-sample work inside one pass.
    pub parallel: bool,
}

impl<T: Float + Debug + Send + Sync> IterativeReliefBuilder<T> {
    /// Set the declared feature type.
    pub fn feature_type(mut self, feature_type: FeatureType) -> Self {
        self.feature_type = Some(feature_type);
        self
    }

    /// Set the maximum number of refinement passes.
    pub fn iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    /// Set the convergence tolerance.
    pub fn tolerance(mut self, tolerance: T) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Record the weight vector after every pass in the result.
    pub fn return_history(mut self, enabled: bool) -> Self {
        self.return_history = enabled;
        self
    }

    /// Set parallel execution mode.
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Validate the configuration and build the processor.
    pub fn build(self) -> Result<IterativeReliefProcessor<T>> {
        let feature_type = self
            .feature_type
            .ok_or_else(|| ReliefError::InvalidFeatureType("<unset>".to_string()))?;

        if self.iterations == 0 {
            return Err(ReliefError::InvalidInput(
                "at least 1 refinement pass is required".to_string(),
            ));
        }
        if self.tolerance < T::zero() {
            return Err(ReliefError::InvalidInput(
                "tolerance must be non-negative".to_string(),
            ));
        }

        Ok(IterativeReliefProcessor {
            feature_type,
            iterations: self.iterations,
            tolerance: self.tolerance,
            return_history: self.return_history,
            parallel: self.parallel,
        })
    }
}

// ============================================================================
// Iterative Relief Processor
// ============================================================================

/// Multi-pass Relief processor with metric feedback.
#[derive(Debug)]
pub struct IterativeReliefProcessor<T> {
    feature_type: FeatureType,
    iterations: usize,
    tolerance: T,
    return_history: bool,
    parallel: bool,
}

impl<T: Float + Debug + Send + Sync> IterativeReliefProcessor<T> {
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
        let uniform = T::one() / T::from(features).unwrap();

        let mut weights = vec![uniform; features];
        let mut history = if self.return_history {
            Some(Vec::with_capacity(self.iterations))
        } else {
            None
        };
        let mut iterations_run = 0;

        for _ in 0..self.iterations {
            let estimate = {
                let ctx = PassContext {
                    data: data_slice,
                    target: target_slice,
                    samples,
                    features,
                    model: &model,
                    metric_weights: Some(&weights),
                };
                accumulate_pass(samples, features, self.parallel, |i, scratch, delta| {
                    nearest_hit_miss_delta(&ctx, i, scratch, delta)
                })
            };

            let next = normalize_state(&estimate, uniform);
            let change = weights
                .iter()
                .zip(next.iter())
                .fold(T::zero(), |acc, (&a, &b)| acc.max((a - b).abs()));

            weights = next;
            iterations_run += 1;
            if let Some(history) = history.as_mut() {
                history.push(weights.clone());
            }
            if change < self.tolerance {
                break;
            }
        }

        let mut result = ReliefResult::from_weights(weights);
        result.iterations_run = Some(iterations_run);
        result.history = history;
        Ok(result)
    }
}

/// Clamp an estimate to non-negative values and renormalize to unit sum,
/// falling back to the uniform vector when everything clamps to zero.
fn normalize_state<T: Float>(estimate: &[T], uniform: T) -> Vec<T> {
    let mut next: Vec<T> = estimate
        .iter()
        .map(|&w| if w > T::zero() { w } else { T::zero() })
        .collect();

    let total = next.iter().fold(T::zero(), |acc, &w| acc + w);
    if total > T::zero() {
        for w in next.iter_mut() {
            *w = *w / total;
        }
    } else {
        for w in next.iter_mut() {
            *w = uniform;
        }
    }
    next
}
