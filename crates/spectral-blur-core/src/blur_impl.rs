//! Separable Gaussian blur in linear light.
//!
//! The blur runs as one horizontal and one vertical pass. Each pass builds a
//! single [`CyclicConvolver`] for its axis, zero-pads every row (or column)
//! to [`padded_length`] so the cyclic convolution never wraps pixels from
//! the far edge, and drops the convolver when the pass ends. Nothing is
//! cached between passes or between images.
//!
//! Edges need no special case: the weight plane of the [`ChannelSet`] is
//! blurred alongside the colour planes, and dividing by it afterwards
//! renormalizes the truncated kernel at the borders.

use tracing::debug;

use crate::channels::ChannelSet;
use crate::convolve::CyclicConvolver;
use crate::error::BlurError;
use crate::fft::padded_length;
use crate::image::{PixelSurface, RgbImage};
use crate::kernel::gaussian_kernel;

/// Blur radius used when none is configured.
pub const DEFAULT_RADIUS: f64 = 4.5;

/// Parameters for [`blur`] and friends.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlurOptions {
    radius: f64,
}

impl Default for BlurOptions {
    fn default() -> Self {
        Self {
            radius: DEFAULT_RADIUS,
        }
    }
}

impl BlurOptions {
    /// Options with the default radius.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the Gaussian radius (standard deviation, in pixels).
    #[must_use]
    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius = radius;
        self
    }

    /// Returns the Gaussian radius.
    #[must_use]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Check that the radius describes a Gaussian.
    ///
    /// # Errors
    ///
    /// Returns [`BlurError::InvalidRadius`] if the radius is not finite or
    /// not strictly positive.
    pub fn validate(&self) -> Result<(), BlurError> {
        if !self.radius.is_finite() || self.radius <= 0.0 {
            return Err(BlurError::InvalidRadius {
                radius: self.radius,
            });
        }
        Ok(())
    }
}

/// One axis of the separable blur: a kernel spectrum sized for `extent`.
struct AxisPass {
    extent: usize,
    convolver: CyclicConvolver,
}

impl AxisPass {
    fn new(extent: usize, radius: f64) -> Result<Self, BlurError> {
        let length = padded_length(extent);
        let convolver = CyclicConvolver::new(gaussian_kernel(extent, length, radius))?;
        Ok(Self { extent, convolver })
    }

    fn len(&self) -> usize {
        self.convolver.len()
    }

    /// Blur each contiguous run of `extent` samples.
    fn blur_rows(&self, plane: &mut [f64]) -> Result<(), BlurError> {
        let mut real = vec![0.0; self.len()];
        let mut imag = vec![0.0; self.len()];
        for row in plane.chunks_exact_mut(self.extent) {
            real[..self.extent].copy_from_slice(row);
            real[self.extent..].fill(0.0);
            imag.fill(0.0);
            self.convolver.convolve(&mut real, &mut imag)?;
            row.copy_from_slice(&real[..self.extent]);
        }
        Ok(())
    }

    /// Blur each column of a row-major plane `width` samples wide.
    fn blur_columns(&self, plane: &mut [f64], width: usize) -> Result<(), BlurError> {
        let mut real = vec![0.0; self.len()];
        let mut imag = vec![0.0; self.len()];
        for x in 0..width {
            for (y, slot) in real[..self.extent].iter_mut().enumerate() {
                *slot = plane[y * width + x];
            }
            real[self.extent..].fill(0.0);
            imag.fill(0.0);
            self.convolver.convolve(&mut real, &mut imag)?;
            for (y, &value) in real[..self.extent].iter().enumerate() {
                plane[y * width + x] = value;
            }
        }
        Ok(())
    }
}

/// Blur all four planes of `channels` in place.
///
/// The planes are left unnormalized; [`ChannelSet::pack_into`] divides by
/// the weight plane.
///
/// # Errors
///
/// Returns [`BlurError::InvalidRadius`] for an invalid radius.
pub fn blur_channels(channels: &mut ChannelSet, options: &BlurOptions) -> Result<(), BlurError> {
    options.validate()?;
    let (width, height) = (channels.width(), channels.height());

    let horizontal = AxisPass::new(width, options.radius)?;
    debug!(
        axis = "horizontal",
        extent = width,
        length = horizontal.len(),
        "blurring axis"
    );
    channels.for_each_plane(|plane| horizontal.blur_rows(plane))?;
    drop(horizontal);

    let vertical = AxisPass::new(height, options.radius)?;
    debug!(
        axis = "vertical",
        extent = height,
        length = vertical.len(),
        "blurring axis"
    );
    channels.for_each_plane(|plane| vertical.blur_columns(plane, width))?;

    Ok(())
}

/// Blur a surface in place. Dimensions are unchanged.
///
/// # Errors
///
/// Returns [`BlurError::InvalidRadius`] for an invalid radius and
/// [`BlurError::InvalidDimensions`] for an empty surface.
pub fn blur_in_place<S: PixelSurface + ?Sized>(
    surface: &mut S,
    options: &BlurOptions,
) -> Result<(), BlurError> {
    options.validate()?;
    let mut channels = ChannelSet::unpack(&*surface)?;
    blur_channels(&mut channels, options)?;
    channels.pack_into(surface);
    Ok(())
}

/// Return a blurred copy of `surface`.
///
/// # Errors
///
/// Same as [`blur_in_place`].
///
/// # Examples
///
/// ```
/// use spectral_blur_core::{blur, BlurOptions, PixelSurface, RgbImage};
/// let img = RgbImage::filled(4, 4, 0x808080);
/// let out = blur(&img, &BlurOptions::default()).unwrap();
/// assert_eq!(out.get_pixel(1, 2), 0x808080);
/// ```
pub fn blur<S: PixelSurface + Clone>(surface: &S, options: &BlurOptions) -> Result<S, BlurError> {
    let mut out = surface.clone();
    blur_in_place(&mut out, options)?;
    Ok(out)
}

/// Blur a flat row-major RGB byte buffer (3 bytes per pixel).
///
/// # Errors
///
/// Returns [`BlurError::BufferSize`] if `pixels.len() != width * height * 3`,
/// plus everything [`blur_in_place`] can return.
pub fn blur_rgb(
    pixels: &[u8],
    width: u32,
    height: u32,
    options: &BlurOptions,
) -> Result<Vec<u8>, BlurError> {
    let mut image = RgbImage::from_raw(width, height, pixels.to_vec())?;
    blur_in_place(&mut image, options)?;
    Ok(image.into_raw())
}
