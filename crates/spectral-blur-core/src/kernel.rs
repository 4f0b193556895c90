//! Spatial-domain Gaussian kernels laid out for cyclic convolution.

/// Build an unnormalized Gaussian kernel of `length` samples.
///
/// Taps cover offsets `-(extent-1)..=extent-1`; negative offsets wrap to the
/// end of the buffer so the kernel is centred on index 0. Every other sample
/// is zero. The weight at offset `i` is `exp(-i^2 / (2 * radius^2))`.
///
/// `length` must be at least `2 * extent - 1` (see
/// [`padded_length`](crate::fft::padded_length)).
///
/// # Examples
///
/// ```
/// use spectral_blur_core::kernel::gaussian_kernel;
/// let k = gaussian_kernel(2, 4, 1.0);
/// assert_eq!(k[0], 1.0);
/// assert_eq!(k[1], k[3]);
/// assert_eq!(k[2], 0.0);
/// ```
pub fn gaussian_kernel(extent: usize, length: usize, radius: f64) -> Vec<f64> {
    debug_assert!(length + 1 >= 2 * extent);
    let scale = -1.0 / (2.0 * radius * radius);
    let mut kernel = vec![0.0; length];
    let reach = extent.saturating_sub(1) as isize;
    for i in -reach..=reach {
        let idx = (i + length as isize) as usize % length;
        kernel[idx] = (scale * (i * i) as f64).exp();
    }
    kernel
}
