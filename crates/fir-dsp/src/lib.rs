//! fir-dsp: FIR filter engines
//!
//! A scalar reference engine and a 4-lane vectorized engine computing the
//! same sliding inner product over caller-owned buffers.
//!
//! ## Modules
//! - `fir` - Engine entry points, length validation, `FirEngine` trait
//! - `simd` - SIMD level detection and the vectorized kernels

pub mod fir;
pub mod simd;

pub use fir::{check_lengths, fir_scalar, fir_simd, fir_simd_with, FirEngine, ScalarFir, VectorFir};
pub use simd::{detect_simd_level, simd_level, FirDispatch, SimdLevel};
