//! Error types for the transform, convolution and blur stages.

use thiserror::Error;

/// Errors that can occur while configuring or running a blur.
///
/// `InvalidLength` and `LengthMismatch` signal a broken invariant in the
/// caller; the blur pipeline derives every buffer length itself and never
/// produces them.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BlurError {
    /// A transform length that is not a power of two.
    #[error("transform length {length} is not a power of two")]
    InvalidLength {
        /// The rejected length.
        length: usize,
    },

    /// A buffer handed to a transform or convolution has the wrong length.
    #[error("buffer length mismatch: expected {expected}, got real={real} imag={imag}")]
    LengthMismatch {
        /// The configured transform length.
        expected: usize,
        /// Length of the real buffer.
        real: usize,
        /// Length of the imaginary buffer.
        imag: usize,
    },

    /// The blur radius is zero, negative or not finite.
    #[error("invalid blur radius {radius} (must be finite and > 0)")]
    InvalidRadius {
        /// The rejected radius.
        radius: f64,
    },

    /// The image dimensions are invalid (zero or too large).
    #[error("invalid dimensions: {width}x{height} ({reason})")]
    InvalidDimensions {
        /// The width value.
        width: u32,
        /// The height value.
        height: u32,
        /// Why the dimensions are invalid.
        reason: &'static str,
    },

    /// A raw pixel buffer does not hold `width * height * 3` bytes.
    #[error("pixel buffer length {actual} does not match expected {expected}")]
    BufferSize {
        /// The expected byte count.
        expected: usize,
        /// The actual byte count.
        actual: usize,
    },
}
