//! Error types for the FIR engines and benchmark tooling

use thiserror::Error;

/// Core error type
#[derive(Error, Debug)]
pub enum FirError {
    /// Signal too short to produce every requested output sample.
    #[error(
        "Length mismatch: signal has {signal} samples, need at least {required} \
         for {output} outputs with {taps} taps"
    )]
    LengthMismatch {
        signal: usize,
        output: usize,
        taps: usize,
        required: usize,
    },

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl FirError {
    /// Returns true for the engine precondition failure
    pub fn is_length_mismatch(&self) -> bool {
        matches!(self, FirError::LengthMismatch { .. })
    }
}

/// Result type alias
pub type FirResult<T> = Result<T, FirError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_mismatch_message() {
        let err = FirError::LengthMismatch {
            signal: 4,
            output: 3,
            taps: 3,
            required: 5,
        };
        let msg = err.to_string();
        assert!(msg.contains("signal has 4"));
        assert!(msg.contains("at least 5"));
        assert!(err.is_length_mismatch());
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: FirError = io.into();
        assert!(matches!(err, FirError::Io(_)));
        assert!(!err.is_length_mismatch());
    }
}
