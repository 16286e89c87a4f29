//! FIR convolution engines
//!
//! Both engines compute the sliding inner product
//!
//! ```text
//! output[i] = Σ signal[i + j] * coefficients[j],   j in 0..taps
//! ```
//!
//! Coefficients are read forward, paired with `signal[i + j]`; the kernel is
//! not flipped. The scalar engine accumulates taps in index order and is
//! the reference. The vector engine sums full blocks of 4 taps into a
//! 4-lane accumulator, reduces the lanes, then adds the remaining taps, so
//! its results differ from the scalar engine by rounding only.

use fir_core::{output_len_for, required_signal_len, FirError, FirResult, Sample};

use crate::simd::{FirDispatch, SimdLevel};

/// Validate buffer lengths before any output is written.
pub fn check_lengths(
    signal: &[Sample],
    coefficients: &[Sample],
    output: &[Sample],
) -> FirResult<()> {
    let required = required_signal_len(output.len(), coefficients.len());
    if signal.len() < required {
        return Err(FirError::LengthMismatch {
            signal: signal.len(),
            output: output.len(),
            taps: coefficients.len(),
            required,
        });
    }
    Ok(())
}

/// Reference FIR: one multiply-accumulate per tap, in tap order.
pub fn fir_scalar(
    signal: &[Sample],
    coefficients: &[Sample],
    output: &mut [Sample],
) -> FirResult<()> {
    check_lengths(signal, coefficients, output)?;

    let taps = coefficients.len();
    for (i, out) in output.iter_mut().enumerate() {
        let window = &signal[i..i + taps];
        let mut acc = 0.0;
        for (s, c) in window.iter().zip(coefficients) {
            acc += s * c;
        }
        *out = acc;
    }

    Ok(())
}

/// Vectorized FIR using the best SIMD kernel for this CPU.
pub fn fir_simd(
    signal: &[Sample],
    coefficients: &[Sample],
    output: &mut [Sample],
) -> FirResult<()> {
    check_lengths(signal, coefficients, output)?;
    (FirDispatch::get().fir)(signal, coefficients, output);
    Ok(())
}

/// Vectorized FIR forced onto a specific kernel.
///
/// Levels the CPU cannot run fall back to the portable kernel.
pub fn fir_simd_with(
    level: SimdLevel,
    signal: &[Sample],
    coefficients: &[Sample],
    output: &mut [Sample],
) -> FirResult<()> {
    check_lengths(signal, coefficients, output)?;
    (FirDispatch::for_level(level).fir)(signal, coefficients, output);
    Ok(())
}

// ============ Engine Trait ============

/// A FIR implementation the benchmark driver can time and compare.
pub trait FirEngine: Send + Sync {
    /// Short label used in logs and reports
    fn name(&self) -> &'static str;

    /// Filter `signal` with `coefficients` into `output`.
    ///
    /// `output` is fully overwritten. Fails with
    /// [`FirError::LengthMismatch`] before writing anything when
    /// `signal.len() < output.len() + coefficients.len() - 1`.
    fn filter(
        &self,
        signal: &[Sample],
        coefficients: &[Sample],
        output: &mut [Sample],
    ) -> FirResult<()>;

    /// Filter every full window of `signal`, allocating the output.
    fn filter_full(&self, signal: &[Sample], coefficients: &[Sample]) -> FirResult<Vec<Sample>> {
        let len = output_len_for(signal.len(), coefficients.len()).ok_or(
            FirError::LengthMismatch {
                signal: signal.len(),
                output: 1,
                taps: coefficients.len(),
                required: coefficients.len(),
            },
        )?;
        let mut output = vec![0.0; len];
        self.filter(signal, coefficients, &mut output)?;
        Ok(output)
    }
}

/// Scalar reference engine
#[derive(Debug, Clone, Copy, Default)]
pub struct ScalarFir;

impl FirEngine for ScalarFir {
    fn name(&self) -> &'static str {
        "scalar"
    }

    fn filter(
        &self,
        signal: &[Sample],
        coefficients: &[Sample],
        output: &mut [Sample],
    ) -> FirResult<()> {
        fir_scalar(signal, coefficients, output)
    }
}

/// Vectorized engine bound to one dispatch table
#[derive(Debug, Clone, Copy)]
pub struct VectorFir {
    dispatch: FirDispatch,
}

impl VectorFir {
    /// Engine using the detected SIMD level
    pub fn new() -> Self {
        Self {
            dispatch: *FirDispatch::get(),
        }
    }

    /// Engine forced onto `level` (portable if unavailable)
    pub fn with_level(level: SimdLevel) -> Self {
        Self {
            dispatch: FirDispatch::for_level(level),
        }
    }

    /// SIMD level actually in use
    pub fn level(&self) -> SimdLevel {
        self.dispatch.level
    }
}

impl Default for VectorFir {
    fn default() -> Self {
        Self::new()
    }
}

impl FirEngine for VectorFir {
    fn name(&self) -> &'static str {
        match self.dispatch.level {
            SimdLevel::Portable => "simd-portable",
            SimdLevel::Sse => "simd-sse",
            SimdLevel::Neon => "simd-neon",
        }
    }

    fn filter(
        &self,
        signal: &[Sample],
        coefficients: &[Sample],
        output: &mut [Sample],
    ) -> FirResult<()> {
        check_lengths(signal, coefficients, output)?;
        (self.dispatch.fir)(signal, coefficients, output);
        Ok(())
    }
}
