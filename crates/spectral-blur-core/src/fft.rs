//! In-place radix-2 FFT over split real/imaginary buffers.
//!
//! An [`Fft`] is planned for exactly one length. Planning precomputes the
//! twiddle factors (`cos`/`sin` of `2*pi*i/L` for `i < L/2`) and the
//! bit-reversal permutation, so a transform is a permutation followed by the
//! iterative decimation-in-time butterfly network with no allocation.
//!
//! Neither direction is normalized. [`Fft::transform`] followed by
//! [`Fft::inverse_transform`] returns the input scaled by `L`.

use std::f64::consts::PI;

use crate::error::BlurError;

/// A radix-2 transform planned for one power-of-two length.
#[derive(Debug, Clone)]
pub struct Fft {
    length: usize,
    cos_table: Vec<f64>,
    sin_table: Vec<f64>,
    bit_rev: Vec<usize>,
}

impl Fft {
    /// Plan a transform of `length` samples.
    ///
    /// # Errors
    ///
    /// Returns [`BlurError::InvalidLength`] unless `length` is a power of two.
    ///
    /// # Examples
    ///
    /// ```
    /// use spectral_blur_core::fft::Fft;
    /// assert!(Fft::new(16).is_ok());
    /// assert!(Fft::new(12).is_err());
    /// ```
    pub fn new(length: usize) -> Result<Self, BlurError> {
        if !length.is_power_of_two() {
            return Err(BlurError::InvalidLength { length });
        }
        let levels = length.trailing_zeros();

        let half = length / 2;
        let (cos_table, sin_table): (Vec<f64>, Vec<f64>) = (0..half)
            .map(|i| {
                let angle = 2.0 * PI * i as f64 / length as f64;
                (angle.cos(), angle.sin())
            })
            .unzip();

        // A zero-level table would need a full-width shift; every index maps to 0 there.
        let bit_rev = (0..length)
            .map(|i| i.reverse_bits().checked_shr(usize::BITS - levels).unwrap_or(0))
            .collect();

        Ok(Self {
            length,
            cos_table,
            sin_table,
            bit_rev,
        })
    }

    /// The planned transform length.
    #[inline]
    pub fn len(&self) -> usize {
        self.length
    }

    /// Always `false`: the smallest plannable length is 1.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Unnormalized forward DFT of `(real, imag)`, computed in place.
    ///
    /// # Errors
    ///
    /// Returns [`BlurError::LengthMismatch`] if either buffer is not exactly
    /// [`len`](Self::len) samples long.
    pub fn transform(&self, real: &mut [f64], imag: &mut [f64]) -> Result<(), BlurError> {
        self.check_lengths(real, imag)?;

        for (i, &j) in self.bit_rev.iter().enumerate() {
            if j > i {
                real.swap(i, j);
                imag.swap(i, j);
            }
        }

        let n = self.length;
        let mut size = 2;
        while size <= n {
            let half = size / 2;
            let table_step = n / size;
            for start in (0..n).step_by(size) {
                for (j, k) in (start..start + half).zip((0..).step_by(table_step)) {
                    let (c, s) = (self.cos_table[k], self.sin_table[k]);
                    let tpre = real[j + half] * c + imag[j + half] * s;
                    let tpim = -real[j + half] * s + imag[j + half] * c;
                    real[j + half] = real[j] - tpre;
                    imag[j + half] = imag[j] - tpim;
                    real[j] += tpre;
                    imag[j] += tpim;
                }
            }
            size *= 2;
        }

        Ok(())
    }

    /// Unnormalized inverse DFT of `(real, imag)`, computed in place.
    ///
    /// Implemented as the forward transform with the buffer roles swapped,
    /// which conjugates on the way in and out. The result is scaled by `L`.
    ///
    /// # Errors
    ///
    /// Same as [`transform`](Self::transform).
    ///
    /// # Examples
    ///
    /// ```
    /// use spectral_blur_core::fft::Fft;
    /// let fft = Fft::new(4).unwrap();
    /// let mut re = [1.0, 2.0, 3.0, 4.0];
    /// let mut im = [0.0; 4];
    /// fft.transform(&mut re, &mut im).unwrap();
    /// fft.inverse_transform(&mut re, &mut im).unwrap();
    /// assert!((re[2] - 12.0).abs() < 1e-12);
    /// ```
    #[inline]
    pub fn inverse_transform(&self, real: &mut [f64], imag: &mut [f64]) -> Result<(), BlurError> {
        self.transform(imag, real)
    }

    fn check_lengths(&self, real: &[f64], imag: &[f64]) -> Result<(), BlurError> {
        if real.len() != self.length || imag.len() != self.length {
            return Err(BlurError::LengthMismatch {
                expected: self.length,
                real: real.len(),
                imag: imag.len(),
            });
        }
        Ok(())
    }
}

/// Smallest power of two that holds a linear convolution of `extent`
/// samples with a kernel spanning `-(extent-1)..=extent-1`.
///
/// That is `next_pow2(2 * extent - 1)`, so no sample wraps around to the
/// opposite edge of the line.
///
/// # Examples
///
/// ```
/// use spectral_blur_core::fft::padded_length;
/// assert_eq!(padded_length(5), 16);
/// assert_eq!(padded_length(1), 1);
/// ```
#[inline]
pub fn padded_length(extent: usize) -> usize {
    (2 * extent.max(1) - 1).next_power_of_two()
}
