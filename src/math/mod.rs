//! Layer 2: Math
//!
//! ## Purpose
//!
//! This layer provides the numerical building blocks of the weighting
//! engines: the per-feature distance model, the rank-decay kernel, and the
//! neighborhood search.
//!
//! ## Architecture
//!
//! ```text
//! Layer 6: API
//!   ↓
//! Layer 5: Algorithms
//!   ↓
//! Layer 4: Engine
//!   ↓
//! Layer 3: Evaluation
//!   ↓
//! Layer 2: Math ← You are here
//!   ↓
//! Layer 1: Primitives
//! ```

/// Per-feature difference model and weighted aggregate distance.
pub mod distance;

/// Exponential rank-decay kernel.
pub mod kernel;

/// Ranked neighborhood search with hit/miss labeling.
pub mod neighborhood;
