//! Test data generators for benchmarks

use fir_core::Sample;
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

/// Default seed shared by the driver and fixtures
pub const DEFAULT_SEED: u64 = 42;

/// Seeded source of uniform samples in `[-1.0, 1.0]`.
///
/// Each instance owns its RNG, so two generators built from the same seed
/// produce the same stream regardless of what else runs in the process.
#[derive(Debug, Clone)]
pub struct SignalGenerator {
    rng: ChaCha8Rng,
    seed: u64,
}

impl SignalGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Seed this generator was created with
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Overwrite `buffer` with the next values of the stream
    pub fn fill(&mut self, buffer: &mut [Sample]) {
        for x in buffer.iter_mut() {
            *x = self.rng.random_range(-1.0..=1.0);
        }
    }

    /// Allocate and fill a new buffer
    pub fn generate(&mut self, len: usize) -> Vec<Sample> {
        let mut buffer = vec![0.0; len];
        self.fill(&mut buffer);
        buffer
    }
}

impl Default for SignalGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}

/// Generate reproducible signal buffer
pub fn generate_signal(len: usize, seed: u64) -> Vec<Sample> {
    SignalGenerator::new(seed).generate(len)
}

/// Generate impulse buffer
pub fn generate_impulse(len: usize) -> Vec<Sample> {
    let mut buf = vec![0.0; len];
    if !buf.is_empty() {
        buf[0] = 1.0;
    }
    buf
}

/// Filter lengths swept by default
pub const FILTER_LENGTHS: &[usize] = &[4, 8, 16, 32, 64, 128, 256, 512, 1024];

/// Default input stream size (1M samples)
pub const INPUT_SIZE: usize = 1 << 20;
