//! fir-core: Shared types for the FIR benchmark workspace
//!
//! Sample type, lane width, buffer length rules and the error type used by
//! the engines in `fir-dsp` and the driver in `fir-bench`.

mod error;
mod sample;

pub use error::*;
pub use sample::*;
