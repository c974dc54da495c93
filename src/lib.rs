//! Relief-family feature weighting.
//!
//! ## Purpose
//!
//! This crate computes per-feature relevance weights for supervised
//! learning datasets using the Relief family of algorithms: nearest
//! neighbors of each sample are classified as hits (same class) or misses
//! (different class), and each feature is scored by how consistently it
//! separates misses while staying stable across hits.
//!
//! ## Algorithms
//!
//! * **ReliefF**: one pass, with three interchangeable update policies:
//!   k-nearest hit/miss averaging, raw pairwise accumulation, and
//!   exponential rank-decayed accumulation.
//! * **IterativeRelief**: multi-pass refinement in which each pass's
//!   weight estimate biases the distance metric of the next.
//! * **SURF / SURF\* / MultiSURF**: threshold-based variants selecting
//!   neighbors by distance radius instead of count.
//!
//! ## Layers
//!
//! ```text
//! Layer 6: API          (builder, algorithm markers, one-shot functions)
//! Layer 5: Algorithms   (per-algorithm builders and processors)
//! Layer 4: Engine       (weight-accumulation pass, update policies)
//! Layer 3: Evaluation   (feature ranking, selection masks)
//! Layer 2: Math         (distance model, rank kernel, neighborhood search)
//! Layer 1: Primitives   (errors, validation)
//! ```
//!
//! ## Example
//!
//! ```
//! use relief_rs::prelude::*;
//!
//! // 4 samples x 2 features, row-major; class = whether col 0 exceeds col 1.
//! let data = vec![
//!     0.9, 0.1,
//!     0.8, 0.3,
//!     0.2, 0.7,
//!     0.1, 0.6,
//! ];
//! let target = vec![1, 1, 0, 0];
//!
//! let result = Relief::new()
//!     .feature_type(Continuous)
//!     .update_policy(Diff)
//!     .algorithm(Algorithm::ReliefF)
//!     .build()?
//!     .fit(&data, &target)?;
//!
//! assert_eq!(result.weights.len(), 2);
//! # Ok::<(), ReliefError>(())
//! ```

/// Layer 6: high-level builder API and one-shot functions.
pub mod api;

/// Layer 5: per-algorithm builders and processors.
pub mod algorithms;

/// Layer 4: weight-accumulation engine.
pub mod engine;

/// Layer 3: ranking and selection over weight vectors.
pub mod evaluation;

/// Input abstractions (slices, vectors, ndarray).
pub mod input;

/// Layer 2: distance model, rank kernel, neighborhood search.
pub mod math;

/// Layer 1: errors and validation.
pub mod primitives;

/// Commonly used items, importable in one line.
pub mod prelude {
    pub use crate::api::{
        iterative_relief, relieff, Algorithm, IterativeRelief, MultiSurf, Relief, ReliefBuilder,
        ReliefF, Surf, SurfStar,
    };
    pub use crate::engine::executor::UpdatePolicy::{self, Diff, ExpRank, KNearest};
    pub use crate::engine::output::ReliefResult;
    pub use crate::evaluation::ranking::{rank_descending, selection_mask};
    pub use crate::input::{ClassInput, ReliefInput};
    pub use crate::math::distance::FeatureType::{self, Continuous, Discrete};
    pub use crate::primitives::errors::ReliefError;
}
