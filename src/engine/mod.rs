//! Layer 4: Engine
//!
//! ## Purpose
//!
//! This layer runs the weight-accumulation pass: for every sample it ranks
//! the neighborhood, applies the selected update policy, and folds the
//! per-sample deltas into one weight vector, with interchangeable parallel
//! and sequential execution.
//!
//! ## Architecture
//!
//! ```text
//! Layer 6: API
//!   ↓
//! Layer 5: Algorithms
//!   ↓
//! Layer 4: Engine ← You are here
//!   ↓
//! Layer 3: Evaluation
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// Weight-accumulation pass and update policies.
pub mod executor;

/// Result type returned by every processor.
pub mod output;
