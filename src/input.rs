//! Input abstractions for feature weighting.
//!
//! ## Purpose
//!
//! This module provides a unified abstraction over sample-matrix and target
//! inputs, allowing `fit` to process multiple data formats (slices,
//! vectors, ndarray) through a single interface.
//!
//! ## Design notes
//!
//! * **Zero-copy where possible**: Provides direct slice access to
//!   underlying data buffers.
//! * **Interoperability**: Bridges standard Rust collections with
//!   specialized numerical libraries.
//! * **Fail-fast validation**: Ensures memory continuity for
//!   multi-dimensional types before processing.
//!
//! ## Key concepts
//!
//! * **ReliefInput Trait**: Row-major contiguous view of the sample matrix.
//!   Shape-carrying inputs (2-D arrays) report `(rows, cols)`; flat inputs
//!   leave the feature count to be inferred from the target length.
//! * **ClassInput Trait**: Contiguous view of the aligned target vector;
//!   labels are any equality-comparable type.
//!
//! ## Non-goals
//!
//! * This module does not perform data cleaning or imputation.
//! * This module does not handle reshaping or dimensionality reduction.

// Feature-gated imports
#[cfg(feature = "cpu")]
use ndarray::{ArrayBase, Data, Ix1, Ix2};

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::primitives::errors::{ReliefError, Result};

/// Trait for types usable as the sample matrix.
pub trait ReliefInput<T: Float> {
    /// Convert the input to a contiguous row-major slice.
    fn as_relief_slice(&self) -> Result<&[T]>;

    /// `(rows, cols)` when the input carries its own shape.
    fn shape(&self) -> Option<(usize, usize)> {
        None
    }
}

impl<T: Float> ReliefInput<T> for [T] {
    fn as_relief_slice(&self) -> Result<&[T]> {
        Ok(self)
    }
}

impl<T: Float> ReliefInput<T> for Vec<T> {
    fn as_relief_slice(&self) -> Result<&[T]> {
        Ok(self.as_slice())
    }
}

#[cfg(feature = "cpu")]
impl<T: Float, S> ReliefInput<T> for ArrayBase<S, Ix1>
where
    S: Data<Elem = T>,
{
    fn as_relief_slice(&self) -> Result<&[T]> {
        self.as_slice().ok_or_else(|| {
            ReliefError::InvalidInput("ndarray input must be contiguous in memory".to_string())
        })
    }
}

#[cfg(feature = "cpu")]
impl<T: Float, S> ReliefInput<T> for ArrayBase<S, Ix2>
where
    S: Data<Elem = T>,
{
    fn as_relief_slice(&self) -> Result<&[T]> {
        self.as_slice().ok_or_else(|| {
            ReliefError::InvalidInput(
                "ndarray input must be contiguous and in standard (row-major) layout".to_string(),
            )
        })
    }

    fn shape(&self) -> Option<(usize, usize)> {
        Some(self.dim())
    }
}

/// Trait for types usable as the target vector.
pub trait ClassInput<C> {
    /// Convert the input to a contiguous slice of class labels.
    fn as_class_slice(&self) -> Result<&[C]>;
}

impl<C> ClassInput<C> for [C] {
    fn as_class_slice(&self) -> Result<&[C]> {
        Ok(self)
    }
}

impl<C> ClassInput<C> for Vec<C> {
    fn as_class_slice(&self) -> Result<&[C]> {
        Ok(self.as_slice())
    }
}

#[cfg(feature = "cpu")]
impl<C, S> ClassInput<C> for ArrayBase<S, Ix1>
where
    S: Data<Elem = C>,
{
    fn as_class_slice(&self) -> Result<&[C]> {
        self.as_slice().ok_or_else(|| {
            ReliefError::InvalidInput("ndarray target must be contiguous in memory".to_string())
        })
    }
}
