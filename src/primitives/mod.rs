//! Layer 1: Primitives
//!
//! ## Purpose
//!
//! This layer provides the foundational types shared by every other layer:
//! the error taxonomy and the fail-fast input validation helpers.
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
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives ← You are here
//! ```

/// Error taxonomy for feature-weighting runs.
pub mod errors;

/// Fail-fast validation of datasets, targets, and configuration.
pub mod validation;
