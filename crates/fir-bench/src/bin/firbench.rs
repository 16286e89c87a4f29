//! FIR benchmark CLI
//!
//! Usage:
//!   firbench                              - Default sweep (1M samples, 4..1024 taps)
//!   firbench --lengths 5,7,17             - Custom filter lengths
//!   firbench --config bench.json          - Load settings, flags override
//!   firbench --report out.json            - Save report (.json / .md / text)

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use fir_bench::{BenchConfig, BenchRunner, ReportFormat};
use fir_dsp::{SimdLevel, VectorFir};

#[derive(Parser)]
#[command(name = "firbench", about = "Benchmark scalar vs SIMD FIR filtering")]
struct Cli {
    /// JSON config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Filter lengths to sweep (comma separated)
    #[arg(short, long, value_delimiter = ',')]
    lengths: Option<Vec<usize>>,

    /// Output samples per invocation
    #[arg(long)]
    input_size: Option<usize>,

    /// Seed for input generation
    #[arg(long)]
    seed: Option<u64>,

    /// Timed runs per engine and length
    #[arg(short, long)]
    iterations: Option<usize>,

    /// Untimed runs before measuring
    #[arg(long)]
    warmup: Option<usize>,

    /// Verification tolerance per tap
    #[arg(long)]
    tolerance: Option<f64>,

    /// Skip comparing SIMD output against scalar
    #[arg(long)]
    no_verify: bool,

    /// Force a SIMD kernel instead of auto-detection
    #[arg(long, value_enum)]
    simd: Option<SimdArg>,

    /// Write the report to a file (.json, .md, anything else is text)
    #[arg(short, long)]
    report: Option<PathBuf>,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, ValueEnum)]
enum SimdArg {
    Portable,
    Sse,
    Neon,
}

impl From<SimdArg> for SimdLevel {
    fn from(arg: SimdArg) -> Self {
        match arg {
            SimdArg::Portable => SimdLevel::Portable,
            SimdArg::Sse => SimdLevel::Sse,
            SimdArg::Neon => SimdLevel::Neon,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let config = build_config(&cli)?;
    let mut runner = BenchRunner::new(config).context("invalid benchmark configuration")?;

    if let Some(simd) = cli.simd {
        let vector = VectorFir::with_level(simd.into());
        if vector.level() != SimdLevel::from(simd) {
            log::warn!("Requested SIMD level unavailable, using {}", vector.level());
        }
        runner = runner.with_vector(vector);
    }

    let report = runner.run().context("benchmark run failed")?;
    println!("\n{}", report.to_text());

    if let Some(path) = &cli.report {
        report
            .save(path, ReportFormat::from_path(path))
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        log::info!("Report written to {}", path.display());
    }

    if !report.all_passed() {
        bail!(
            "SIMD output diverged from scalar for {} filter length(s)",
            report.summary.failed
        );
    }

    Ok(())
}

fn build_config(cli: &Cli) -> Result<BenchConfig> {
    let mut config = match &cli.config {
        Some(path) => BenchConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => BenchConfig::default(),
    };

    if let Some(lengths) = &cli.lengths {
        config.filter_lengths = lengths.clone();
    }
    if let Some(size) = cli.input_size {
        config.input_size = size;
    }
    if let Some(seed) = cli.seed {
        config.seed = seed;
    }
    if let Some(n) = cli.iterations {
        config.iterations = n;
    }
    if let Some(n) = cli.warmup {
        config.warmup = n;
    }
    if let Some(tolerance) = cli.tolerance {
        config.tolerance = tolerance;
    }
    if cli.no_verify {
        config.verify = false;
    }

    Ok(config)
}
