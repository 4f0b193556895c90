//! Cyclic convolution against one cached kernel spectrum.

use crate::error::BlurError;
use crate::fft::Fft;

/// Convolves lines of a fixed power-of-two length with one kernel.
///
/// The kernel is transformed once at construction and its spectrum reused
/// for every line, so the kernel FFT is paid once per axis rather than once
/// per row or column.
#[derive(Debug, Clone)]
pub struct CyclicConvolver {
    fft: Fft,
    kernel_real: Vec<f64>,
    kernel_imag: Vec<f64>,
}

impl CyclicConvolver {
    /// Plan a convolver for a spatial-domain `kernel`.
    ///
    /// # Errors
    ///
    /// Returns [`BlurError::InvalidLength`] if the kernel length is not a
    /// power of two.
    pub fn new(kernel: Vec<f64>) -> Result<Self, BlurError> {
        let fft = Fft::new(kernel.len())?;
        let mut kernel_real = kernel;
        let mut kernel_imag = vec![0.0; kernel_real.len()];
        fft.transform(&mut kernel_real, &mut kernel_imag)?;
        Ok(Self {
            fft,
            kernel_real,
            kernel_imag,
        })
    }

    /// Line length this convolver accepts.
    #[inline]
    pub fn len(&self) -> usize {
        self.fft.len()
    }

    /// Always `false`: the smallest kernel is one tap.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.fft.is_empty()
    }

    /// Replace `(real, imag)` with its cyclic convolution with the kernel.
    ///
    /// The result is not normalized: it is `L` times the true convolution,
    /// where `L` is [`len`](Self::len).
    ///
    /// # Errors
    ///
    /// Returns [`BlurError::LengthMismatch`] if either buffer is not `L`
    /// samples long.
    ///
    /// # Examples
    ///
    /// ```
    /// use spectral_blur_core::convolve::CyclicConvolver;
    /// let conv = CyclicConvolver::new(vec![1.0, 0.5, 0.0, 0.5]).unwrap();
    /// let mut re = vec![1.0, 0.0, 0.0, 0.0];
    /// let mut im = vec![0.0; 4];
    /// conv.convolve(&mut re, &mut im).unwrap();
    /// assert!((re[1] - 2.0).abs() < 1e-12);
    /// ```
    pub fn convolve(&self, real: &mut [f64], imag: &mut [f64]) -> Result<(), BlurError> {
        self.fft.transform(real, imag)?;
        let spectrum = self.kernel_real.iter().zip(&self.kernel_imag);
        for ((re, im), (&kr, &ki)) in real.iter_mut().zip(imag.iter_mut()).zip(spectrum) {
            let product_re = *re * kr - *im * ki;
            *im = *im * kr + *re * ki;
            *re = product_re;
        }
        self.fft.inverse_transform(real, imag)
    }
}
