//! Benchmark runner: sweeps filter lengths and times both engines

use crate::config::BenchConfig;
use crate::generators::SignalGenerator;
use crate::report::{BenchReport, LengthOutcome, LengthResult, Measurement};
use crate::utils::{black_box, error_budget, max_scaled_error, speedup, QuickBench, ThroughputMetrics};
use fir_core::{FirResult, Sample};
use fir_dsp::{FirEngine, ScalarFir, VectorFir};

/// Input buffers for one filter length
#[derive(Debug, Clone)]
pub struct FilterInputs {
    pub signal: Vec<Sample>,
    pub coefficients: Vec<Sample>,
}

impl FilterInputs {
    /// Signal of `input_size + taps` samples followed by `taps` coefficients,
    /// both drawn from one generator seeded with `seed`.
    ///
    /// The coefficients continue the signal's stream rather than reseeding,
    /// so they are not a copy of the signal prefix.
    pub fn generate(input_size: usize, taps: usize, seed: u64) -> Self {
        let mut generator = SignalGenerator::new(seed);
        let signal = generator.generate(input_size + taps);
        log::debug!("Input data generated ({} samples)", signal.len());
        let coefficients = generator.generate(taps);
        log::debug!("Coeffs data generated ({} taps)", coefficients.len());
        Self {
            signal,
            coefficients,
        }
    }
}

/// Drives the scalar and vector engines across the configured lengths
pub struct BenchRunner {
    config: BenchConfig,
    scalar: ScalarFir,
    vector: VectorFir,
}

impl BenchRunner {
    /// Create a runner; fails if the config does not validate
    pub fn new(config: BenchConfig) -> FirResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            scalar: ScalarFir,
            vector: VectorFir::new(),
        })
    }

    /// Use a specific vector engine (e.g. a forced SIMD level)
    pub fn with_vector(mut self, vector: VectorFir) -> Self {
        self.vector = vector;
        self
    }

    pub fn config(&self) -> &BenchConfig {
        &self.config
    }

    /// Run the full sweep
    pub fn run(&self) -> FirResult<BenchReport> {
        let mut report = BenchReport::new(
            "FIR Scalar vs SIMD",
            self.vector.level().name(),
            self.config.input_size,
            self.config.seed,
        );

        log::info!(
            "Sweeping {} filter lengths, input {} samples, vector engine {}",
            self.config.filter_lengths.len(),
            self.config.input_size,
            self.vector.name()
        );

        for &taps in &self.config.filter_lengths {
            let result = self.run_length(taps)?;
            report.add_result(result);
        }

        Ok(report)
    }

    /// Measure one filter length, or skip it when it does not fit the input
    pub fn run_length(&self, taps: usize) -> FirResult<LengthResult> {
        log::info!("Filter length: {}", taps);

        let input_size = self.config.input_size;
        if taps >= input_size {
            let reason = format!("filter length {} too long for input of {}", taps, input_size);
            log::warn!("Skipping: {}", reason);
            return Ok(LengthResult {
                filter_length: taps,
                outcome: LengthOutcome::Skipped { reason },
            });
        }

        let inputs = FilterInputs::generate(input_size, taps, self.config.seed);
        let mut out_scalar = vec![0.0; input_size];
        let mut out_vector = vec![0.0; input_size];

        let scalar = self.measure(&self.scalar, &inputs, &mut out_scalar)?;
        let vector = self.measure(&self.vector, &inputs, &mut out_vector)?;

        let max_error = self
            .config
            .verify
            .then(|| max_scaled_error(&out_scalar, &out_vector));

        let measurement = Measurement {
            vector_engine: self.vector.name().to_string(),
            speedup: speedup(scalar.duration(), vector.duration()),
            scalar,
            vector,
            max_error,
            error_budget: error_budget(self.config.tolerance, taps),
        };

        log::info!("  {}: {}", self.scalar.name(), measurement.scalar.summary());
        log::info!("  {}: {}", self.vector.name(), measurement.vector.summary());
        log::info!("  speedup: {:.2}x", measurement.speedup);
        if !measurement.passed() {
            log::warn!(
                "  verification failed: max error {:.3e} exceeds {:.3e}",
                measurement.max_error.unwrap_or(f64::INFINITY),
                measurement.error_budget
            );
        }

        Ok(LengthResult {
            filter_length: taps,
            outcome: LengthOutcome::Measured(measurement),
        })
    }

    fn measure(
        &self,
        engine: &dyn FirEngine,
        inputs: &FilterInputs,
        output: &mut [Sample],
    ) -> FirResult<ThroughputMetrics> {
        let bench = QuickBench::new(self.config.iterations).with_warmup(self.config.warmup);
        let outputs = output.len();
        let taps = inputs.coefficients.len();

        let mut status = Ok(());
        let metrics = bench.run_with_metrics(outputs, taps, || {
            if status.is_ok() {
                status = engine.filter(black_box(&inputs.signal), black_box(&inputs.coefficients), output);
            }
        });
        status?;
        black_box(&*output);

        Ok(metrics)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fir_dsp::SimdLevel;

    #[test]
    fn test_inputs_sizes_and_determinism() {
        let a = FilterInputs::generate(100, 8, 42);
        let b = FilterInputs::generate(100, 8, 42);
        assert_eq!(a.signal.len(), 108);
        assert_eq!(a.coefficients.len(), 8);
        assert_eq!(a.signal, b.signal);
        assert_eq!(a.coefficients, b.coefficients);
    }

    #[test]
    fn test_coefficients_continue_signal_stream() {
        let inputs = FilterInputs::generate(100, 8, 42);
        assert_ne!(inputs.coefficients[..], inputs.signal[..8]);

        let mut generator = SignalGenerator::new(42);
        generator.generate(108);
        assert_eq!(inputs.coefficients, generator.generate(8));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = BenchConfig::quick().with_iterations(0);
        assert!(BenchRunner::new(config).is_err());
    }

    #[test]
    fn test_skips_oversized_lengths() {
        let config = BenchConfig::quick()
            .with_input_size(16)
            .with_filter_lengths([4, 16, 32])
            .with_iterations(1);
        let report = BenchRunner::new(config).unwrap().run().unwrap();

        assert_eq!(report.results.len(), 3);
        assert_eq!(report.summary.measured, 1);
        assert_eq!(report.summary.skipped, 2);
        assert!(matches!(report.results[1].outcome, LengthOutcome::Skipped { .. }));
        assert!(report.all_passed());
    }

    #[test]
    fn test_quick_sweep_verifies() {
        let report = BenchRunner::new(BenchConfig::quick()).unwrap().run().unwrap();
        assert_eq!(report.summary.measured, BenchConfig::quick().filter_lengths.len());
        assert!(report.all_passed(), "{}", report.to_text());
        for (_, m) in report.measurements() {
            assert!(m.max_error.is_some());
            assert!(m.speedup > 0.0);
        }
    }

    #[test]
    fn test_forced_portable_vector() {
        let config = BenchConfig::quick().with_filter_lengths([7]);
        let runner = BenchRunner::new(config)
            .unwrap()
            .with_vector(VectorFir::with_level(SimdLevel::Portable));
        let report = runner.run().unwrap();

        assert_eq!(report.simd_level, "Portable");
        let (_, m) = report.measurements().next().unwrap();
        assert_eq!(m.vector_engine, "simd-portable");
        assert!(m.passed());
    }

    #[test]
    fn test_no_verify() {
        let config = BenchConfig::quick().with_filter_lengths([4]).with_verify(false);
        let report = BenchRunner::new(config).unwrap().run().unwrap();
        let (_, m) = report.measurements().next().unwrap();
        assert!(m.max_error.is_none());
    }
}
