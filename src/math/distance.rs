//! Per-feature distance model.
//!
//! ## Purpose
//!
//! This module computes the per-feature "difference" between two samples,
//! the quantity every weighting policy aggregates. Continuous features use
//! an absolute difference normalized by the observed column range so every
//! feature contributes on the same [0, 1] scale; discrete features use an
//! equality indicator.
//!
//! ## Design notes
//!
//! * **Fitted once**: Column ranges are computed in one O(N·M) pass and
//!   shared read-only across all per-sample work.
//! * **Degenerate columns**: A column with no spread gets a unit range, so
//!   its differences are exactly zero instead of NaN.
//! * **Weighted metric**: The aggregate distance is the sum of per-feature
//!   differences, optionally biased element-wise by a feature-weight vector.
//!
//! ## Invariants
//!
//! * Every per-feature difference lies in [0, 1].
//! * The aggregate distance of a sample to itself is zero.

// External dependencies
use num_traits::Float;
use std::fmt;
use std::str::FromStr;

// Internal dependencies
use crate::primitives::errors::ReliefError;

// ============================================================================
// Feature Type
// ============================================================================

/// Declared type of the dataset's features. The whole dataset is treated
/// uniformly by one declared type per run; there is no per-column inference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureType {
    /// Real-valued features, compared by range-normalized absolute difference.
    Continuous,
    /// Categorical features, compared by an equality indicator.
    Discrete,
}

impl FromStr for FeatureType {
    type Err = ReliefError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        match tag {
            "continuous" => Ok(FeatureType::Continuous),
            "discrete" => Ok(FeatureType::Discrete),
            other => Err(ReliefError::InvalidFeatureType(other.to_string())),
        }
    }
}

impl fmt::Display for FeatureType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeatureType::Continuous => write!(f, "continuous"),
            FeatureType::Discrete => write!(f, "discrete"),
        }
    }
}

// ============================================================================
// Row Access
// ============================================================================

/// View one row of a row-major sample buffer.
#[inline]
pub fn row<T>(data: &[T], features: usize, index: usize) -> &[T] {
    &data[index * features..(index + 1) * features]
}

// ============================================================================
// Distance Model
// ============================================================================

/// Per-feature difference model fitted to one dataset.
#[derive(Debug, Clone)]
pub struct DistanceModel<T> {
    feature_type: FeatureType,
    features: usize,
    inv_ranges: Vec<T>,
}

impl<T: Float> DistanceModel<T> {
    /// Fit the model to a row-major dataset, computing the observed range of
    /// every column. Discrete models skip range computation entirely.
    pub fn fit(data: &[T], samples: usize, features: usize, feature_type: FeatureType) -> Self {
        let inv_ranges = match feature_type {
            FeatureType::Discrete => Vec::new(),
            FeatureType::Continuous => {
                let mut mins = vec![T::infinity(); features];
                let mut maxs = vec![T::neg_infinity(); features];
                for i in 0..samples {
                    for (j, &val) in row(data, features, i).iter().enumerate() {
                        if val < mins[j] {
                            mins[j] = val;
                        }
                        if val > maxs[j] {
                            maxs[j] = val;
                        }
                    }
                }
                mins.iter()
                    .zip(maxs.iter())
                    .map(|(&lo, &hi)| {
                        let range = hi - lo;
                        if range > T::epsilon() {
                            T::one() / range
                        } else {
                            T::one()
                        }
                    })
                    .collect()
            }
        };

        Self {
            feature_type,
            features,
            inv_ranges,
        }
    }

    /// Declared feature type of the fitted dataset.
    pub fn feature_type(&self) -> FeatureType {
        self.feature_type
    }

    /// Number of features per sample.
    pub fn features(&self) -> usize {
        self.features
    }

    /// Difference of feature `j` between two values.
    #[inline]
    pub fn diff_at(&self, j: usize, a: T, b: T) -> T {
        match self.feature_type {
            FeatureType::Continuous => (a - b).abs() * self.inv_ranges[j],
            FeatureType::Discrete => {
                if a == b {
                    T::zero()
                } else {
                    T::one()
                }
            }
        }
    }

    /// Write the per-feature differences between two rows into `out`.
    pub fn per_feature_diff(&self, a: &[T], b: &[T], out: &mut [T]) {
        for j in 0..self.features {
            out[j] = self.diff_at(j, a[j], b[j]);
        }
    }
}

// ============================================================================
// Weighted Metric
// ============================================================================

/// Aggregate distance calculator over a fitted model, with an optional
/// feature-weight bias. Uniform weighting is the `None` case.
pub struct WeightedMetric<'a, T> {
    model: &'a DistanceModel<T>,
    weights: Option<&'a [T]>,
}

impl<'a, T: Float> WeightedMetric<'a, T> {
    pub fn new(model: &'a DistanceModel<T>, weights: Option<&'a [T]>) -> Self {
        Self { model, weights }
    }

    /// The underlying per-feature model.
    pub fn model(&self) -> &DistanceModel<T> {
        self.model
    }

    /// Aggregate distance between two rows: the sum of per-feature
    /// differences, each multiplied by its feature weight when present.
    pub fn distance(&self, a: &[T], b: &[T]) -> T {
        let mut total = T::zero();
        for j in 0..self.model.features {
            let diff = self.model.diff_at(j, a[j], b[j]);
            total = total
                + match self.weights {
                    Some(w) => diff * w[j],
                    None => diff,
                };
        }
        total
    }
}
