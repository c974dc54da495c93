//! Exponential rank-decay kernel.
//!
//! ## Purpose
//!
//! This module maps a neighbor's distance rank to a contribution multiplier
//! for the `ExpRank` update policy. The kernel is `exp(-(rank / sigma)^2)`,
//! a smooth interpolation between a hard k-nearest cutoff and flat pairwise
//! accumulation: nearer ranks dominate, distant ranks fade out.
//!
//! ## Key concepts
//!
//! * **Rank**: 1-based position in the full ascending-distance ranking.
//! * **Decay constant**: `sigma` controls the reach of the kernel. The
//!   default of 10 leaves non-negligible mass on roughly the 30 nearest
//!   ranks.

use num_traits::Float;

/// Default decay constant for the rank kernel.
pub const DEFAULT_DECAY: f64 = 10.0;

/// Exponential rank-decay kernel `exp(-(rank / sigma)^2)`.
#[derive(Debug, Clone, Copy)]
pub struct RankKernel<T> {
    sigma: T,
}

impl<T: Float> RankKernel<T> {
    /// Create a kernel with the given decay constant. `sigma` must be
    /// positive; the builders validate this before construction.
    pub fn new(sigma: T) -> Self {
        Self { sigma }
    }

    /// Decay constant in use.
    pub fn sigma(&self) -> T {
        self.sigma
    }

    /// Contribution multiplier for a 1-based rank.
    #[inline]
    pub fn evaluate(&self, rank: usize) -> T {
        let r = T::from(rank).unwrap() / self.sigma;
        (-(r * r)).exp()
    }
}

impl<T: Float> Default for RankKernel<T> {
    fn default() -> Self {
        Self::new(T::from(DEFAULT_DECAY).unwrap())
    }
}
