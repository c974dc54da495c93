//! Layer 5: Algorithms
//!
//! ## Purpose
//!
//! This layer provides the per-algorithm builders and processors: single-pass
//! ReliefF with its three update policies, the iterative metric-refinement
//! engine, and the threshold-based SURF family. Each builder validates its
//! configuration at `build()` and its data at `fit()`, then delegates the
//! pass itself to the engine.
//!
//! ## Architecture
//!
//! ```text
//! Layer 6: API
//!   ↓
//! Layer 5: Algorithms ← You are here
//!   ↓
//! Layer 4: Engine
//!   ↓
//! Layer 3: Evaluation
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// Single-pass ReliefF weighting.
pub mod relieff;

/// Iterative Relief with metric feedback.
pub mod iterative;

/// SURF, SURF*, and MultiSURF threshold-based weighting.
pub mod spatial;
