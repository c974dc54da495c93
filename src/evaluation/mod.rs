//! Layer 3: Evaluation
//!
//! ## Purpose
//!
//! This layer turns computed weight vectors into consumable artifacts:
//! ordinal feature rankings and top-n selection masks.
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
//! Layer 3: Evaluation ← You are here
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// Ordinal ranking and selection masks over weight vectors.
pub mod ranking;
