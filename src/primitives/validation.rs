//! Fail-fast input validation.
//!
//! ## Purpose
//!
//! This module centralizes the structural checks every processor performs
//! before touching the data: sample/target alignment, feature-count
//! inference for flat row-major buffers, finiteness, and neighbor-count
//! bounds. Validation happens once, up front, so no partial computation
//! ever precedes a reported error.
//!
//! ## Invariants
//!
//! * At least 2 samples and 1 feature are required.
//! * Flat inputs must divide evenly into `samples` rows.
//! * A shape-carrying input (ndarray) is authoritative for both dimensions.
//! * All sample values must be finite.

use num_traits::Float;

use crate::primitives::errors::{ReliefError, Result};

/// Check a row-major sample buffer against the target length and return the
/// number of features per row.
///
/// `shape` is `Some((rows, cols))` when the input carried its own shape
/// (e.g. a 2-D array); otherwise the feature count is inferred from the
/// buffer length.
pub fn check_inputs<T: Float>(
    data: &[T],
    shape: Option<(usize, usize)>,
    targets: usize,
) -> Result<usize> {
    if targets < 2 {
        return Err(ReliefError::InvalidInput(format!(
            "at least 2 samples are required, got {}",
            targets
        )));
    }

    let features = match shape {
        Some((rows, cols)) => {
            if rows != targets {
                return Err(ReliefError::MismatchedInputs {
                    rows,
                    targets,
                });
            }
            cols
        }
        None => {
            if data.len() % targets != 0 {
                return Err(ReliefError::InvalidInput(format!(
                    "flat buffer of length {} does not divide into {} rows",
                    data.len(),
                    targets
                )));
            }
            data.len() / targets
        }
    };

    if features == 0 {
        return Err(ReliefError::InvalidInput(
            "at least 1 feature per sample is required".to_string(),
        ));
    }

    if data.len() != targets * features {
        return Err(ReliefError::MismatchedInputs {
            rows: data.len() / features,
            targets,
        });
    }

    if !data.iter().all(|v| v.is_finite()) {
        return Err(ReliefError::InvalidInput(
            "sample values must be finite".to_string(),
        ));
    }

    Ok(features)
}

/// Check the neighbor count against the sample count.
pub fn check_neighbor_count(k: usize, samples: usize) -> Result<()> {
    if k == 0 || k >= samples {
        return Err(ReliefError::InvalidNeighborCount { k, samples });
    }
    Ok(())
}
