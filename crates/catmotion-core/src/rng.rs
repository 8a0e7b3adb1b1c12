//! Deterministic RNG wrapper using PCG32.
//!
//! Every random decision the body makes (head jitter, wander intervals,
//! wander offsets, random targets) draws from this source, so a body built
//! from the same seed and fed the same inputs replays identically.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Wrapper around PCG32 for deterministic random number generation.
#[derive(Debug, Clone)]
pub struct DeterministicRng {
    inner: Pcg32,
}

impl DeterministicRng {
    /// Create a new RNG from a 32-bit seed.
    ///
    /// The seed is expanded to 64 bits by duplicating the bits.
    pub fn new(seed: u32) -> Self {
        let seed64 = (seed as u64) | ((seed as u64) << 32);
        Self {
            inner: Pcg32::seed_from_u64(seed64),
        }
    }

    /// Generate a random f64 in the range [0.0, 1.0).
    #[inline]
    pub fn gen_f64(&mut self) -> f64 {
        self.inner.gen::<f64>()
    }

    /// Generate a random f64 uniformly in `[lo, hi]`.
    ///
    /// Returns `lo` when the range is empty or degenerate instead of panicking.
    /// Ranges too wide for `hi - lo` to be finite are sampled by
    /// interpolating between the ends.
    #[inline]
    pub fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        if !(hi > lo) {
            return lo;
        }
        if (hi - lo).is_finite() {
            return self.inner.gen_range(lo..=hi);
        }
        let t = self.gen_f64();
        (lo * (1.0 - t) + hi * t).clamp(lo, hi)
    }

    /// Returns true with probability `p` (clamped to [0, 1]).
    #[inline]
    pub fn chance(&mut self, p: f64) -> bool {
        self.gen_f64() < p.clamp(0.0, 1.0)
    }
}
