//! SIMD Dispatch for the vectorized FIR kernel
//!
//! Runtime feature detection with a lazily built dispatch table.
//! Every kernel works on 4 f32 lanes (SSE, NEON, or the portable `wide`
//! fallback) and uses plain multiply + add, never FMA, so all of them
//! round identically.
//!
//! # Design
//! - Detection happens once, on first use
//! - The dispatch table is a static function pointer
//! - Kernels are crate-private; callers go through the length-checked
//!   entry points in [`crate::fir`]

use fir_core::{block_taps, Sample, LANES};
use std::sync::OnceLock;
use wide::f32x4;

// ============ SIMD Level Detection ============

/// Detected SIMD capability level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum SimdLevel {
    /// Lane-emulated fallback (`wide::f32x4`)
    Portable = 0,
    /// x86_64 SSE (128-bit, 4 f32s)
    Sse = 1,
    /// ARM NEON (128-bit, 4 f32s)
    Neon = 2,
}

impl SimdLevel {
    /// All levels, in dispatch preference order (lowest first)
    pub const ALL: [SimdLevel; 3] = [SimdLevel::Portable, SimdLevel::Sse, SimdLevel::Neon];

    /// Accumulator width in f32 elements
    pub const fn width(self) -> usize {
        LANES
    }

    /// Get human-readable name
    pub const fn name(self) -> &'static str {
        match self {
            SimdLevel::Portable => "Portable",
            SimdLevel::Sse => "SSE",
            SimdLevel::Neon => "NEON",
        }
    }

    /// Whether this level can run on the current CPU
    pub fn is_available(self) -> bool {
        match self {
            SimdLevel::Portable => true,
            SimdLevel::Sse => {
                #[cfg(target_arch = "x86_64")]
                {
                    is_x86_feature_detected!("sse")
                }
                #[cfg(not(target_arch = "x86_64"))]
                {
                    false
                }
            }
            // NEON is always available on aarch64
            SimdLevel::Neon => cfg!(target_arch = "aarch64"),
        }
    }
}

impl std::fmt::Display for SimdLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Global SIMD level detection (computed once)
static DETECTED_SIMD_LEVEL: OnceLock<SimdLevel> = OnceLock::new();

/// Detect the best available SIMD level
pub fn detect_simd_level() -> SimdLevel {
    *DETECTED_SIMD_LEVEL.get_or_init(|| {
        let level = [SimdLevel::Neon, SimdLevel::Sse]
            .into_iter()
            .find(|level| level.is_available())
            .unwrap_or(SimdLevel::Portable);
        log::debug!("FIR SIMD level detected: {}", level);
        level
    })
}

/// Get the current SIMD level (cached)
#[inline]
pub fn simd_level() -> SimdLevel {
    detect_simd_level()
}

// ============ Dispatch Table ============

/// Function pointer type for the vectorized FIR kernel.
///
/// Arguments are `(signal, coefficients, output)`; lengths must already
/// satisfy `signal.len() >= output.len() + coefficients.len() - 1`.
pub(crate) type FirKernelFn = fn(&[Sample], &[Sample], &mut [Sample]);

/// Dispatch table for the vectorized FIR kernel
#[derive(Clone, Copy)]
pub struct FirDispatch {
    /// Vectorized FIR kernel
    pub(crate) fir: FirKernelFn,
    /// SIMD level used
    pub level: SimdLevel,
}

impl std::fmt::Debug for FirDispatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FirDispatch").field("level", &self.level).finish()
    }
}

impl FirDispatch {
    /// Get the global dispatch table
    pub fn get() -> &'static Self {
        static DISPATCH: OnceLock<FirDispatch> = OnceLock::new();
        DISPATCH.get_or_init(|| Self::for_level(detect_simd_level()))
    }

    /// Create dispatch table for a specific SIMD level.
    ///
    /// Falls back to the portable kernel when `level` is not available here.
    pub fn for_level(level: SimdLevel) -> Self {
        if !level.is_available() {
            log::debug!("{} not available, using portable FIR kernel", level);
            return Self {
                fir: fir_portable,
                level: SimdLevel::Portable,
            };
        }

        match level {
            SimdLevel::Sse => Self {
                fir: fir_sse,
                level,
            },
            SimdLevel::Neon => Self {
                fir: fir_neon,
                level,
            },
            SimdLevel::Portable => Self {
                fir: fir_portable,
                level,
            },
        }
    }
}

// ============ Portable Implementation (Fallback) ============

fn fir_portable(signal: &[Sample], coeffs: &[Sample], output: &mut [Sample]) {
    let taps = coeffs.len();
    let block = block_taps(taps);

    for (i, out) in output.iter_mut().enumerate() {
        let window = &signal[i..i + taps];
        let mut acc = f32x4::splat(0.0);

        for (s, c) in window[..block]
            .chunks_exact(LANES)
            .zip(coeffs[..block].chunks_exact(LANES))
        {
            let s = f32x4::new([s[0], s[1], s[2], s[3]]);
            let c = f32x4::new([c[0], c[1], c[2], c[3]]);
            acc = acc + s * c;
        }

        // Horizontal sum
        let lanes = acc.to_array();
        let mut total = lanes[0] + lanes[1] + lanes[2] + lanes[3];

        // Remainder taps
        for j in block..taps {
            total += window[j] * coeffs[j];
        }

        *out = total;
    }
}

// ============ x86_64 SIMD Implementations ============

#[cfg(target_arch = "x86_64")]
mod x86_impl {
    use super::*;
    use std::arch::x86_64::*;

    // --- SSE (128-bit, 4 f32s) ---

    #[target_feature(enable = "sse")]
    pub unsafe fn fir_sse_impl(signal: &[Sample], coeffs: &[Sample], output: &mut [Sample]) {
        let taps = coeffs.len();
        let block = block_taps(taps);
        assert!(
            output.is_empty() || signal.len() + 1 >= output.len() + taps,
            "SSE FIR signal too short"
        );

        let sig_ptr = signal.as_ptr();
        let coef_ptr = coeffs.as_ptr();

        for i in 0..output.len() {
            // Safety: i + j + LANES <= i + block <= signal.len() for every block load
            let mut lanes = [0.0f32; LANES];
            unsafe {
                let mut acc = _mm_setzero_ps();
                let mut j = 0;
                while j < block {
                    let s = _mm_loadu_ps(sig_ptr.add(i + j));
                    let c = _mm_loadu_ps(coef_ptr.add(j));
                    acc = _mm_add_ps(acc, _mm_mul_ps(s, c));
                    j += LANES;
                }
                _mm_storeu_ps(lanes.as_mut_ptr(), acc);
            }

            let mut total = lanes[0] + lanes[1] + lanes[2] + lanes[3];
            for j in block..taps {
                total += signal[i + j] * coeffs[j];
            }
            output[i] = total;
        }
    }
}

// ============ ARM NEON Implementations ============

#[cfg(target_arch = "aarch64")]
mod arm_impl {
    use super::*;
    use std::arch::aarch64::*;

    pub unsafe fn fir_neon_impl(signal: &[Sample], coeffs: &[Sample], output: &mut [Sample]) {
        let taps = coeffs.len();
        let block = block_taps(taps);
        assert!(
            output.is_empty() || signal.len() + 1 >= output.len() + taps,
            "NEON FIR signal too short"
        );

        let sig_ptr = signal.as_ptr();
        let coef_ptr = coeffs.as_ptr();

        for i in 0..output.len() {
            let mut lanes = [0.0f32; LANES];
            unsafe {
                let mut acc = vdupq_n_f32(0.0);
                let mut j = 0;
                while j < block {
                    let s = vld1q_f32(sig_ptr.add(i + j));
                    let c = vld1q_f32(coef_ptr.add(j));
                    // No vfmaq: keep rounding identical to the other kernels
                    acc = vaddq_f32(acc, vmulq_f32(s, c));
                    j += LANES;
                }
                vst1q_f32(lanes.as_mut_ptr(), acc);
            }

            let mut total = lanes[0] + lanes[1] + lanes[2] + lanes[3];
            for j in block..taps {
                total += signal[i + j] * coeffs[j];
            }
            output[i] = total;
        }
    }
}

// ============ Safe Wrapper Functions ============

#[cfg(target_arch = "x86_64")]
fn fir_sse(signal: &[Sample], coeffs: &[Sample], output: &mut [Sample]) {
    unsafe { x86_impl::fir_sse_impl(signal, coeffs, output) }
}

#[cfg(target_arch = "aarch64")]
fn fir_neon(signal: &[Sample], coeffs: &[Sample], output: &mut [Sample]) {
    unsafe { arm_impl::fir_neon_impl(signal, coeffs, output) }
}

// Fallback stubs for non-matching architectures
#[cfg(not(target_arch = "x86_64"))]
fn fir_sse(signal: &[Sample], coeffs: &[Sample], output: &mut [Sample]) {
    fir_portable(signal, coeffs, output)
}

#[cfg(not(target_arch = "aarch64"))]
fn fir_neon(signal: &[Sample], coeffs: &[Sample], output: &mut [Sample]) {
    fir_portable(signal, coeffs, output)
}

// ============ Tests ============
