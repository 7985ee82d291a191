use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::sync::Mutex;

/// Probabilistic gate deciding whether an observation is transmitted.
///
/// The generator is per-instance state, seeded once at construction and
/// shared by all callers, so repeated draws form one independent sequence.
/// Statistical quality only; nothing here is cryptographic.
pub struct Sampler {
    rng: Mutex<SmallRng>,
}

impl Sampler {
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(SmallRng::from_entropy()),
        }
    }

    /// Returns whether a send at `rate` should proceed.
    ///
    /// `rate <= 0.0` always suppresses without consuming randomness,
    /// `rate >= 1.0` always sends; in between, one uniform draw in `[0, 1)`
    /// decides. The lock guards only the draw, so unrelated sends are not
    /// serialized around network I/O.
    pub fn should_send(&self, rate: f64) -> bool {
        if rate <= 0.0 {
            return false;
        }
        if rate >= 1.0 {
            return true;
        }
        let draw: f64 = self
            .rng
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .gen();
        draw <= rate
    }
}

impl Default for Sampler {
    fn default() -> Self {
        Self::new()
    }
}
