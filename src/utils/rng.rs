//! Simple random number generator for reproducibility.
//!
//! A lightweight xorshift64 generator that plugs into the `rand` ecosystem
//! through [`RngCore`] and [`SeedableRng`]. It is injected explicitly into
//! weight initialization and data set shuffling, so two runs seeded alike
//! produce identical networks and identical sample orders.

use rand::{RngCore, SeedableRng};
use std::time::{SystemTime, UNIX_EPOCH};

const FALLBACK_STATE: u64 = 0x9e3779b97f4a7c15;

/// Xorshift64 RNG.
///
/// # Example
///
/// ```
/// use feedforward_nn::utils::SimpleRng;
/// use rand::Rng;
///
/// let mut a = SimpleRng::new(42);
/// let mut b = SimpleRng::new(42);
/// assert_eq!(a.gen::<f64>(), b.gen::<f64>());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimpleRng {
    state: u64,
}

impl SimpleRng {
    /// Create a new RNG with explicit seed (if zero, use a fixed value).
    pub fn new(seed: u64) -> Self {
        let state = if seed == 0 { FALLBACK_STATE } else { seed };
        Self { state }
    }

    /// Create an RNG seeded from the current time.
    pub fn from_time() -> Self {
        let mut rng = Self::new(0);
        rng.reseed_from_time();
        rng
    }

    /// Reseed based on the current time.
    pub fn reseed_from_time(&mut self) {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos() as u64;
        self.state = if nanos == 0 { FALLBACK_STATE } else { nanos };
    }

    fn step(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }
}

impl RngCore for SimpleRng {
    fn next_u32(&mut self) -> u32 {
        (self.step() >> 32) as u32
    }

    fn next_u64(&mut self) -> u64 {
        self.step()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(8) {
            let bytes = self.step().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl SeedableRng for SimpleRng {
    type Seed = [u8; 8];

    fn from_seed(seed: Self::Seed) -> Self {
        Self::new(u64::from_le_bytes(seed))
    }

    fn seed_from_u64(state: u64) -> Self {
        Self::new(state)
    }
}
