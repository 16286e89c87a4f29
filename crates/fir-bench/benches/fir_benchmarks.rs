//! FIR Scalar vs SIMD Benchmarks
//!
//! Compares the reference and vectorized engines across filter lengths to
//! measure SIMD speedup. Throughput is reported in multiply-accumulates.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use fir_bench::{FilterInputs, DEFAULT_SEED};
use fir_dsp::{fir_scalar, fir_simd};

/// Outputs per invocation; smaller than the CLI default to keep criterion fast
const OUTPUT_LEN: usize = 16_384;

const TAPS: &[usize] = &[4, 7, 16, 64, 256, 1024];

fn bench_fir_scalar_vs_simd(c: &mut Criterion) {
    let mut group = c.benchmark_group("fir_scalar_vs_simd");

    for &taps in TAPS {
        group.throughput(Throughput::Elements((OUTPUT_LEN * taps) as u64));

        let inputs = FilterInputs::generate(OUTPUT_LEN, taps, DEFAULT_SEED);
        let mut output = vec![0.0f32; OUTPUT_LEN];

        group.bench_with_input(BenchmarkId::new("scalar", taps), &taps, |b, _| {
            b.iter(|| {
                fir_scalar(black_box(&inputs.signal), black_box(&inputs.coefficients), &mut output)
                    .unwrap();
                black_box(&output);
            })
        });

        group.bench_with_input(BenchmarkId::new("simd", taps), &taps, |b, _| {
            b.iter(|| {
                fir_simd(black_box(&inputs.signal), black_box(&inputs.coefficients), &mut output)
                    .unwrap();
                black_box(&output);
            })
        });
    }

    group.finish();
}

fn bench_remainder_cost(c: &mut Criterion) {
    // 64 taps is block-aligned; 65..67 add 1..3 scalar tail taps
    let mut group = c.benchmark_group("fir_simd_remainder");

    for taps in 64..=67usize {
        let inputs = FilterInputs::generate(OUTPUT_LEN, taps, DEFAULT_SEED);
        let mut output = vec![0.0f32; OUTPUT_LEN];

        group.throughput(Throughput::Elements((OUTPUT_LEN * taps) as u64));
        group.bench_with_input(BenchmarkId::from_parameter(taps), &taps, |b, _| {
            b.iter(|| {
                fir_simd(black_box(&inputs.signal), black_box(&inputs.coefficients), &mut output)
                    .unwrap();
                black_box(&output);
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_fir_scalar_vs_simd, bench_remainder_cost);
criterion_main!(benches);
