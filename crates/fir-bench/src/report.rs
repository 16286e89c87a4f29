//! Report generation for benchmark sweeps

use crate::utils::ThroughputMetrics;
use fir_core::{FirError, FirResult};
use serde::{Deserialize, Serialize, Serializer};
use std::fs;
use std::path::Path;

/// Timings and verification for one measured filter length
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Measurement {
    /// Engine label of the vectorized run (e.g. `simd-sse`)
    pub vector_engine: String,
    pub scalar: ThroughputMetrics,
    pub vector: ThroughputMetrics,
    /// Scalar time divided by vector time
    #[serde(serialize_with = "serialize_clamped")]
    pub speedup: f64,
    /// Largest scaled difference from the scalar output, when verified
    #[serde(serialize_with = "serialize_clamped_opt")]
    pub max_error: Option<f64>,
    /// Allowed scaled difference for this length
    pub error_budget: f64,
}

impl Measurement {
    /// Verification passed, or was not requested
    pub fn passed(&self) -> bool {
        self.max_error.is_none_or(|err| err <= self.error_budget)
    }
}

/// Stand-in for infinity and NaN in JSON, which has neither. Large enough
/// that a non-finite error still reloads as a failure; exactly parseable.
pub const NON_FINITE_SENTINEL: f64 = 1e300;

fn clamp_finite(value: f64) -> f64 {
    if value.is_nan() {
        NON_FINITE_SENTINEL
    } else {
        value.clamp(-NON_FINITE_SENTINEL, NON_FINITE_SENTINEL)
    }
}

fn serialize_clamped<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(clamp_finite(*value))
}

fn serialize_clamped_opt<S: Serializer>(value: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error> {
    match value {
        Some(v) => serializer.serialize_some(&clamp_finite(*v)),
        None => serializer.serialize_none(),
    }
}

/// What happened for one filter length
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum LengthOutcome {
    Skipped { reason: String },
    Measured(Measurement),
}

/// Result for a single filter length
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LengthResult {
    pub filter_length: usize,
    pub outcome: LengthOutcome,
}

impl LengthResult {
    pub fn passed(&self) -> bool {
        match &self.outcome {
            LengthOutcome::Skipped { .. } => true,
            LengthOutcome::Measured(m) => m.passed(),
        }
    }
}

/// Summary statistics
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BenchSummary {
    pub measured: usize,
    pub skipped: usize,
    pub failed: usize,
    /// Geometric mean of per-length speedups
    pub mean_speedup: Option<f64>,
}

/// Benchmark report for a full sweep
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchReport {
    pub title: String,
    /// SIMD level name used by the vector engine
    pub simd_level: String,
    pub input_size: usize,
    pub seed: u64,
    pub results: Vec<LengthResult>,
    pub summary: BenchSummary,
}

impl BenchReport {
    /// Create a new report
    pub fn new(title: impl Into<String>, simd_level: impl Into<String>, input_size: usize, seed: u64) -> Self {
        Self {
            title: title.into(),
            simd_level: simd_level.into(),
            input_size,
            seed,
            results: Vec::new(),
            summary: BenchSummary::default(),
        }
    }

    /// Add a per-length result and refresh the summary
    pub fn add_result(&mut self, result: LengthResult) {
        match &result.outcome {
            LengthOutcome::Skipped { .. } => self.summary.skipped += 1,
            LengthOutcome::Measured(m) => {
                self.summary.measured += 1;
                if !m.passed() {
                    self.summary.failed += 1;
                }
            }
        }
        self.results.push(result);
        self.summary.mean_speedup = self.geometric_mean_speedup();
    }

    fn geometric_mean_speedup(&self) -> Option<f64> {
        let logs: Vec<f64> = self
            .measurements()
            .map(|(_, m)| m.speedup)
            .filter(|s| s.is_finite() && *s > 0.0)
            .map(f64::ln)
            .collect();
        if logs.is_empty() {
            return None;
        }
        Some((logs.iter().sum::<f64>() / logs.len() as f64).exp())
    }

    /// Measured lengths with their measurement
    pub fn measurements(&self) -> impl Iterator<Item = (usize, &Measurement)> {
        self.results.iter().filter_map(|r| match &r.outcome {
            LengthOutcome::Measured(m) => Some((r.filter_length, m)),
            LengthOutcome::Skipped { .. } => None,
        })
    }

    /// Check if every measured length passed verification
    pub fn all_passed(&self) -> bool {
        self.summary.failed == 0
    }

    /// Generate text report
    pub fn to_text(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!("{}\n", self.title));
        output.push_str(&format!("{}\n\n", "=".repeat(self.title.len())));
        output.push_str(&format!(
            "SIMD: {}  Input: {} samples  Seed: {}\n\n",
            self.simd_level, self.input_size, self.seed
        ));

        output.push_str(&format!(
            "{:>6}  {:>12}  {:>12}  {:>8}  {:>10}  {}\n",
            "taps", "scalar ms", "simd ms", "speedup", "max err", "status"
        ));
        output.push_str(&"-".repeat(64));
        output.push('\n');

        for result in &self.results {
            match &result.outcome {
                LengthOutcome::Skipped { reason } => {
                    output.push_str(&format!("{:>6}  skipped: {}\n", result.filter_length, reason));
                }
                LengthOutcome::Measured(m) => {
                    let err = m
                        .max_error
                        .map(|e| format!("{:.2e}", e))
                        .unwrap_or_else(|| "-".into());
                    let status = if m.passed() { "PASS" } else { "FAIL" };
                    output.push_str(&format!(
                        "{:>6}  {:>12.3}  {:>12.3}  {:>7.2}x  {:>10}  {}\n",
                        result.filter_length,
                        m.scalar.duration_ns as f64 / 1_000_000.0,
                        m.vector.duration_ns as f64 / 1_000_000.0,
                        m.speedup,
                        err,
                        status
                    ));
                }
            }
        }

        output.push('\n');
        output.push_str(&format!(
            "Summary: {} measured, {} skipped, {} failed",
            self.summary.measured, self.summary.skipped, self.summary.failed
        ));
        if let Some(mean) = self.summary.mean_speedup {
            output.push_str(&format!(", mean speedup {:.2}x", mean));
        }
        output.push('\n');

        output
    }

    /// Generate JSON report
    pub fn to_json(&self) -> FirResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| FirError::Serialization(e.to_string()))
    }

    /// Generate markdown report
    pub fn to_markdown(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!("# {}\n\n", self.title));
        output.push_str(&format!(
            "**SIMD:** {} | **Input:** {} samples | **Seed:** {}\n\n",
            self.simd_level, self.input_size, self.seed
        ));

        output.push_str("| Taps | Scalar (ms) | SIMD (ms) | Speedup | Max error | Status |\n");
        output.push_str("|------|-------------|-----------|---------|-----------|--------|\n");
        for result in &self.results {
            match &result.outcome {
                LengthOutcome::Skipped { reason } => {
                    output.push_str(&format!(
                        "| {} | - | - | - | - | skipped ({}) |\n",
                        result.filter_length, reason
                    ));
                }
                LengthOutcome::Measured(m) => {
                    output.push_str(&format!(
                        "| {} | {:.3} | {:.3} | {:.2}x | {} | {} |\n",
                        result.filter_length,
                        m.scalar.duration_ns as f64 / 1_000_000.0,
                        m.vector.duration_ns as f64 / 1_000_000.0,
                        m.speedup,
                        m.max_error.map(|e| format!("{:.2e}", e)).unwrap_or_else(|| "-".into()),
                        if m.passed() { "pass" } else { "FAIL" }
                    ));
                }
            }
        }

        output
    }

    /// Save report to file
    pub fn save<P: AsRef<Path>>(&self, path: P, format: ReportFormat) -> FirResult<()> {
        let content = match format {
            ReportFormat::Text => self.to_text(),
            ReportFormat::Json => self.to_json()?,
            ReportFormat::Markdown => self.to_markdown(),
        };
        fs::write(path, content)?;
        Ok(())
    }
}

/// Report output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Text,
    Json,
    Markdown,
}

impl ReportFormat {
    /// Pick a format from a file extension, defaulting to text
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => ReportFormat::Json,
            Some("md") => ReportFormat::Markdown,
            _ => ReportFormat::Text,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn make_measurement(speedup: f64, max_error: Option<f64>) -> Measurement {
        let scalar = ThroughputMetrics::from_benchmark(1000, 8, Duration::from_micros(400));
        let vector = ThroughputMetrics::from_benchmark(1000, 8, Duration::from_micros(100));
        Measurement {
            vector_engine: "simd-portable".into(),
            scalar,
            vector,
            speedup,
            max_error,
            error_budget: 8e-4,
        }
    }

    fn measured(taps: usize, m: Measurement) -> LengthResult {
        LengthResult {
            filter_length: taps,
            outcome: LengthOutcome::Measured(m),
        }
    }

    #[test]
    fn test_report_summary() {
        let mut report = BenchReport::new("FIR", "SSE", 1000, 42);
        report.add_result(measured(4, make_measurement(2.0, Some(1e-6))));
        report.add_result(measured(8, make_measurement(8.0, Some(1.0))));
        report.add_result(LengthResult {
            filter_length: 2048,
            outcome: LengthOutcome::Skipped {
                reason: "too long".into(),
            },
        });

        assert_eq!(report.summary.measured, 2);
        assert_eq!(report.summary.skipped, 1);
        assert_eq!(report.summary.failed, 1);
        assert!(!report.all_passed());
        let mean = report.summary.mean_speedup.unwrap();
        assert!((mean - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_unverified_measurement_passes() {
        assert!(make_measurement(3.0, None).passed());
    }

    #[test]
    fn test_text_report() {
        let mut report = BenchReport::new("FIR Sweep", "NEON", 1000, 42);
        report.add_result(measured(16, make_measurement(3.5, Some(0.0))));

        let text = report.to_text();
        assert!(text.contains("FIR Sweep"));
        assert!(text.contains("PASS"));
        assert!(text.contains("3.50x"));
        assert!(report.all_passed());
    }

    #[test]
    fn test_markdown_report() {
        let mut report = BenchReport::new("FIR Sweep", "SSE", 1000, 42);
        report.add_result(measured(4, make_measurement(1.5, None)));
        let md = report.to_markdown();
        assert!(md.contains("# FIR Sweep"));
        assert!(md.contains("| Taps |"));
    }

    #[test]
    fn test_json_tags_outcome() {
        let mut report = BenchReport::new("FIR", "SSE", 10, 1);
        report.add_result(LengthResult {
            filter_length: 10,
            outcome: LengthOutcome::Skipped {
                reason: "too long".into(),
            },
        });
        let json = report.to_json().unwrap();
        assert!(json.contains("\"status\": \"skipped\""));

        let parsed: BenchReport = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.summary.skipped, 1);
    }

    #[test]
    fn test_non_finite_values_survive_json() {
        let mut report = BenchReport::new("FIR", "SSE", 1000, 42);
        report.add_result(measured(4, make_measurement(f64::INFINITY, Some(f64::INFINITY))));
        report.add_result(measured(8, make_measurement(2.0, Some(f64::NAN))));
        assert_eq!(report.summary.failed, 2);

        let json = report.to_json().unwrap();
        let parsed: BenchReport = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.summary.failed, 2);
        assert!(!parsed.all_passed());
        for (_, m) in parsed.measurements() {
            assert_eq!(m.max_error, Some(NON_FINITE_SENTINEL));
            assert!(!m.passed());
        }
        let (_, first) = parsed.measurements().next().unwrap();
        assert_eq!(first.speedup, NON_FINITE_SENTINEL);
    }

    #[test]
    fn test_save_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");
        let report = BenchReport::new("FIR", "SSE", 10, 1);

        report.save(&path, ReportFormat::from_path(&path)).unwrap();
        let content = fs::read_to_string(&path).unwrap();
        assert!(content.trim_start().starts_with('{'));
        assert_eq!(ReportFormat::from_path(Path::new("out.md")), ReportFormat::Markdown);
        assert_eq!(ReportFormat::from_path(Path::new("out.txt")), ReportFormat::Text);
    }
}
