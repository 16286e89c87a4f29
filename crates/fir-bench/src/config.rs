//! Benchmark configuration

use crate::generators::{DEFAULT_SEED, FILTER_LENGTHS, INPUT_SIZE};
use fir_core::{FirError, FirResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Configuration for a benchmark sweep
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BenchConfig {
    /// Filter lengths (tap counts) to sweep, in order
    pub filter_lengths: Vec<usize>,

    /// Output samples per invocation; lengths >= this are skipped
    pub input_size: usize,

    /// Seed for signal and coefficient generation
    pub seed: u64,

    /// Timed invocations per engine and length
    pub iterations: usize,

    /// Untimed invocations before measuring
    pub warmup: usize,

    /// Compare vector output against the scalar reference
    pub verify: bool,

    /// Scaled error allowed per tap when verifying
    pub tolerance: f64,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            filter_lengths: FILTER_LENGTHS.to_vec(),
            input_size: INPUT_SIZE,
            seed: DEFAULT_SEED,
            iterations: 1,
            warmup: 0,
            verify: true,
            tolerance: 1e-4,
        }
    }
}

impl BenchConfig {
    /// Create a quick config for CI and tests
    pub fn quick() -> Self {
        Self {
            filter_lengths: vec![1, 3, 4, 5, 8, 16, 17],
            input_size: 4096,
            iterations: 2,
            warmup: 1,
            ..Default::default()
        }
    }

    /// Load a JSON config; missing fields take their defaults
    pub fn load<P: AsRef<Path>>(path: P) -> FirResult<Self> {
        let text = fs::read_to_string(path)?;
        let config: Self =
            serde_json::from_str(&text).map_err(|e| FirError::Serialization(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Write this config as pretty JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> FirResult<()> {
        let text =
            serde_json::to_string_pretty(self).map_err(|e| FirError::Serialization(e.to_string()))?;
        fs::write(path, text)?;
        Ok(())
    }

    /// Reject configs the runner cannot execute
    pub fn validate(&self) -> FirResult<()> {
        if self.filter_lengths.is_empty() {
            return Err(FirError::InvalidConfig("filter_lengths is empty".into()));
        }
        if self.input_size == 0 {
            return Err(FirError::InvalidConfig("input_size must be > 0".into()));
        }
        if self.iterations == 0 {
            return Err(FirError::InvalidConfig("iterations must be > 0".into()));
        }
        if !(self.tolerance.is_finite() && self.tolerance > 0.0) {
            return Err(FirError::InvalidConfig(format!(
                "tolerance must be positive, got {}",
                self.tolerance
            )));
        }
        Ok(())
    }

    /// Builder: set filter lengths
    pub fn with_filter_lengths(mut self, lengths: impl Into<Vec<usize>>) -> Self {
        self.filter_lengths = lengths.into();
        self
    }

    /// Builder: set input size
    pub fn with_input_size(mut self, size: usize) -> Self {
        self.input_size = size;
        self
    }

    /// Builder: set seed for reproducibility
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Builder: set timed iterations
    pub fn with_iterations(mut self, n: usize) -> Self {
        self.iterations = n;
        self
    }

    /// Builder: set warmup runs
    pub fn with_warmup(mut self, n: usize) -> Self {
        self.warmup = n;
        self
    }

    /// Builder: enable or disable verification
    pub fn with_verify(mut self, verify: bool) -> Self {
        self.verify = verify;
        self
    }

    /// Builder: set verification tolerance
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }
}
