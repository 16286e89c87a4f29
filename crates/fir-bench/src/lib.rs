//! # fir-bench
//!
//! Scalar vs SIMD FIR benchmark driver.
//!
//! ## Components
//!
//! - **Generators**: seeded uniform `[-1, 1]` signal and coefficient buffers
//! - **Runner**: sweeps filter lengths, times both engines, verifies output
//! - **Report**: text, markdown and JSON summaries of a sweep
//!
//! ## Running
//!
//! ```bash
//! # Full sweep (1M samples, 4..1024 taps)
//! cargo run --release -p fir-bench --bin firbench
//!
//! # Custom lengths, JSON report
//! cargo run --release -p fir-bench --bin firbench -- --lengths 5,7,17 --report report.json
//!
//! # Criterion benches
//! cargo bench -p fir-bench
//! ```

pub mod config;
pub mod generators;
pub mod report;
pub mod runner;
pub mod utils;

pub use config::BenchConfig;
pub use generators::*;
pub use report::{BenchReport, BenchSummary, LengthOutcome, LengthResult, Measurement, ReportFormat};
pub use runner::{BenchRunner, FilterInputs};
pub use utils::*;
