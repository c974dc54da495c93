//! Error types for Relief feature weighting.
//!
//! ## Purpose
//!
//! This module defines the error taxonomy surfaced by every public entry
//! point. All variants describe caller-input mistakes: they are detected
//! before any weight computation begins, never retried, and never
//! accompanied by partial results.
//!
//! ## Design notes
//!
//! * **Typed failures**: Errors are enum variants, not numeric sentinels.
//! * **Deterministic**: Identical inputs always produce the identical error.
//! * **Comparable**: `PartialEq` so tests can match on exact variants.

use std::fmt;

/// Errors produced while configuring or running a feature-weighting pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReliefError {
    /// The feature-type tag is not one of `continuous` / `discrete`,
    /// or no feature type was configured before `build()`.
    InvalidFeatureType(String),
    /// The update-policy tag is not one of `k_nearest` / `diff` / `exp_rank`.
    InvalidMode(String),
    /// The neighbor count is missing, zero, or not below the sample count.
    InvalidNeighborCount { k: usize, samples: usize },
    /// The dataset row count and the target length disagree.
    MismatchedInputs { rows: usize, targets: usize },
    /// The input data is structurally unusable (ragged flat buffer,
    /// non-contiguous array, non-finite values, or too few samples).
    InvalidInput(String),
}

impl fmt::Display for ReliefError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReliefError::InvalidFeatureType(tag) => {
                write!(
                    f,
                    "invalid feature type `{}` (expected `continuous` or `discrete`)",
                    tag
                )
            }
            ReliefError::InvalidMode(tag) => {
                write!(
                    f,
                    "invalid update policy `{}` (expected `k_nearest`, `diff`, or `exp_rank`)",
                    tag
                )
            }
            ReliefError::InvalidNeighborCount { k, samples } => {
                write!(
                    f,
                    "invalid neighbor count k = {} for {} samples (requires 1 <= k < samples)",
                    k, samples
                )
            }
            ReliefError::MismatchedInputs { rows, targets } => {
                write!(
                    f,
                    "dataset has {} rows but the target has {} entries",
                    rows, targets
                )
            }
            ReliefError::InvalidInput(msg) => write!(f, "invalid input: {}", msg),
        }
    }
}

impl std::error::Error for ReliefError {}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ReliefError>;
