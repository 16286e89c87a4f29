//! Sample type and buffer length helpers

/// Type alias for filter samples and taps (single precision throughout)
pub type Sample = f32;

/// Parallel width of the vectorized accumulator, in samples
pub const LANES: usize = 4;

/// Minimum signal length needed to compute `output_len` outputs with `taps` taps.
///
/// `output_len + taps - 1`, saturating at zero.
#[inline]
pub const fn required_signal_len(output_len: usize, taps: usize) -> usize {
    (output_len + taps).saturating_sub(1)
}

/// Largest output length a signal of `signal_len` samples supports.
///
/// Inverse of [`required_signal_len`]. Returns `None` when the filter is
/// longer than the signal.
#[inline]
pub const fn output_len_for(signal_len: usize, taps: usize) -> Option<usize> {
    if taps > signal_len {
        None
    } else {
        Some(signal_len + 1 - taps)
    }
}

/// Number of taps covered by full lane blocks
#[inline]
pub const fn block_taps(taps: usize) -> usize {
    taps - (taps % LANES)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_len() {
        assert_eq!(required_signal_len(3, 3), 5);
        assert_eq!(required_signal_len(10, 1), 10);
        assert_eq!(required_signal_len(10, 0), 9);
        assert_eq!(required_signal_len(0, 4), 3);
        assert_eq!(required_signal_len(0, 0), 0);
    }

    #[test]
    fn test_output_len_for() {
        assert_eq!(output_len_for(5, 3), Some(3));
        assert_eq!(output_len_for(5, 5), Some(1));
        assert_eq!(output_len_for(5, 6), None);
        assert_eq!(output_len_for(5, 0), Some(6));
        assert_eq!(output_len_for(0, 0), Some(1));
    }

    #[test]
    fn test_block_taps() {
        assert_eq!(block_taps(0), 0);
        assert_eq!(block_taps(3), 0);
        assert_eq!(block_taps(4), 4);
        assert_eq!(block_taps(7), 4);
        assert_eq!(block_taps(17), 16);
    }
}
