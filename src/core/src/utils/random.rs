use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// The single pseudorandom source threaded through every simulation call.
pub type SimRng = ChaCha8Rng;

pub struct RandomSource;

impl RandomSource {
    pub fn seeded(seed: u64) -> SimRng {
        ChaCha8Rng::seed_from_u64(seed)
    }

    pub fn from_entropy() -> SimRng {
        ChaCha8Rng::from_entropy()
    }
}

pub struct IntegerUtils;

impl IntegerUtils {
    /// Uniform integer in `[min, max)`; returns `min` for an empty range.
    pub fn random<R: Rng + ?Sized>(rng: &mut R, min: i32, max: i32) -> i32 {
        if max <= min {
            return min;
        }

        rng.gen_range(min..max)
    }
}

pub struct FloatUtils;

impl FloatUtils {
    /// Uniform float in `[-spread, spread]`.
    pub fn symmetric_noise<R: Rng + ?Sized>(rng: &mut R, spread: f64) -> f64 {
        if spread <= 0.0 {
            return 0.0;
        }

        rng.gen_range(-spread..=spread)
    }
}
