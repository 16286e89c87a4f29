//! Benchmark utilities

use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// Throughput metrics for one timed engine invocation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThroughputMetrics {
    /// Mean wall time per invocation in nanoseconds
    pub duration_ns: u64,
    /// Output samples produced per second
    pub samples_per_sec: f64,
    /// Multiply-accumulates per second, in millions
    pub mmacs: f64,
    /// Time per output sample in nanoseconds
    pub ns_per_sample: f64,
}

impl ThroughputMetrics {
    /// Calculate metrics from benchmark results
    pub fn from_benchmark(outputs: usize, taps: usize, duration: Duration) -> Self {
        let secs = duration.as_secs_f64().max(f64::MIN_POSITIVE);
        let samples_per_sec = outputs as f64 / secs;
        let mmacs = (outputs as f64 * taps as f64) / secs / 1_000_000.0;
        let ns_per_sample = if outputs == 0 {
            0.0
        } else {
            duration.as_nanos() as f64 / outputs as f64
        };

        Self {
            duration_ns: duration.as_nanos() as u64,
            samples_per_sec,
            mmacs,
            ns_per_sample,
        }
    }

    /// Mean duration per invocation
    pub fn duration(&self) -> Duration {
        Duration::from_nanos(self.duration_ns)
    }

    /// Print summary
    pub fn summary(&self) -> String {
        format!(
            "{:.3}ms, {:.2} MS/s ({:.2}ns/sample), {:.0} MMAC/s",
            self.duration_ns as f64 / 1_000_000.0,
            self.samples_per_sec / 1_000_000.0,
            self.ns_per_sample,
            self.mmacs
        )
    }
}

/// Simple benchmark runner for quick measurements
#[derive(Debug, Clone, Copy)]
pub struct QuickBench {
    iterations: usize,
    warmup: usize,
}

impl QuickBench {
    pub fn new(iterations: usize) -> Self {
        Self {
            iterations: iterations.max(1),
            warmup: 0,
        }
    }

    /// Builder: untimed runs before measuring
    pub fn with_warmup(mut self, warmup: usize) -> Self {
        self.warmup = warmup;
        self
    }

    /// Run benchmark and return average duration
    pub fn run<F>(&self, mut f: F) -> Duration
    where
        F: FnMut(),
    {
        for _ in 0..self.warmup {
            f();
        }

        let start = Instant::now();
        for _ in 0..self.iterations {
            f();
        }
        start.elapsed() / self.iterations as u32
    }

    /// Run benchmark with throughput metrics
    pub fn run_with_metrics<F>(&self, outputs: usize, taps: usize, f: F) -> ThroughputMetrics
    where
        F: FnMut(),
    {
        let avg_duration = self.run(f);
        ThroughputMetrics::from_benchmark(outputs, taps, avg_duration)
    }
}

/// Black box to prevent compiler optimizations
#[inline(never)]
pub fn black_box<T>(x: T) -> T {
    std::hint::black_box(x)
}

/// How many times faster `measured` ran than `baseline`
pub fn speedup(baseline: Duration, measured: Duration) -> f64 {
    let measured_ns = measured.as_nanos() as f64;
    if measured_ns == 0.0 {
        return f64::INFINITY;
    }
    baseline.as_nanos() as f64 / measured_ns
}

/// Largest difference between two outputs, scaled by `1 + |reference|`.
///
/// Returns `f64::INFINITY` when lengths differ or a value is not finite.
pub fn max_scaled_error(reference: &[f32], candidate: &[f32]) -> f64 {
    if reference.len() != candidate.len() {
        return f64::INFINITY;
    }

    let mut max_err = 0.0f64;
    for (&a, &b) in reference.iter().zip(candidate) {
        if !a.is_finite() || !b.is_finite() {
            return f64::INFINITY;
        }
        let err = (a as f64 - b as f64).abs() / (1.0 + (a as f64).abs());
        max_err = max_err.max(err);
    }
    max_err
}

/// Error budget for a filter of `taps` taps: grows with the tap count.
pub fn error_budget(tolerance: f64, taps: usize) -> f64 {
    tolerance * taps.max(1) as f64
}
