//! Horizontal jitter for scatter overlays.
//!
//! ## Purpose
//!
//! Observations of one group share an x position; jitter spreads them
//! horizontally so overlapping points stay visible.
//!
//! ## Design notes
//!
//! * **Injectable**: Every draw takes the generator as an argument, so a
//!   seeded `StdRng` reproduces a figure exactly.
//!
//! ## Invariants
//!
//! * Every offset lies in `[-magnitude, magnitude)`.

// External dependencies
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

// ============================================================================
// Jitter
// ============================================================================

/// Uniform horizontal jitter of a fixed magnitude.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Jitter {
    magnitude: f64,
}

impl Jitter {
    /// Jitter of at most `magnitude` in either direction.
    pub fn new(magnitude: f64) -> Self {
        Self {
            magnitude: magnitude.abs(),
        }
    }

    /// Maximum offset.
    pub fn magnitude(&self) -> f64 {
        self.magnitude
    }

    /// One offset `magnitude * (2u - 1)` with `u` uniform in `[0, 1)`.
    #[inline]
    pub fn offset<R: Rng>(&self, rng: &mut R) -> f64 {
        let u: f64 = rng.random();
        self.magnitude * (2.0 * u - 1.0)
    }

    /// `n` jittered copies of `center`.
    pub fn spread<R: Rng>(&self, center: f64, n: usize, rng: &mut R) -> Vec<f64> {
        (0..n).map(|_| center + self.offset(rng)).collect()
    }
}

/// Generator for a plot: seeded when `seed` is set, OS-seeded otherwise.
pub fn plot_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}
