//! Linear-light channel planes for the blur pipeline.
//!
//! A [`ChannelSet`] holds red, green and blue in linear light plus a weight
//! (coverage) plane that starts at 1.0 everywhere. Every operation touches
//! all four planes the same way, so after blurring the weight plane holds
//! exactly the normalization the colour planes need at each pixel, edges
//! included.

use crate::color::{gamma_decode, gamma_encode};
use crate::error::BlurError;
use crate::image::{pack_rgb, unpack_rgb, PixelSurface};

/// Four parallel `width * height` planes: R, G, B and weight.
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelSet {
    width: usize,
    height: usize,
    // red, green, blue, weight
    planes: [Vec<f64>; 4],
}

impl ChannelSet {
    /// Convert a surface into linear-light planes with a uniform weight.
    ///
    /// # Errors
    ///
    /// Returns [`BlurError::InvalidDimensions`] if the surface is empty or
    /// its pixel count overflows.
    pub fn unpack<S: PixelSurface + ?Sized>(surface: &S) -> Result<Self, BlurError> {
        let (w, h) = (surface.width(), surface.height());
        if w == 0 || h == 0 {
            return Err(BlurError::InvalidDimensions {
                width: w,
                height: h,
                reason: "width and height must be > 0",
            });
        }
        let count = (w as usize)
            .checked_mul(h as usize)
            .ok_or(BlurError::InvalidDimensions {
                width: w,
                height: h,
                reason: "dimensions overflow buffer size calculation",
            })?;

        let mut red = Vec::with_capacity(count);
        let mut green = Vec::with_capacity(count);
        let mut blue = Vec::with_capacity(count);
        for y in 0..h {
            for x in 0..w {
                let [r, g, b] = unpack_rgb(surface.get_pixel(x, y));
                red.push(gamma_encode(r));
                green.push(gamma_encode(g));
                blue.push(gamma_encode(b));
            }
        }

        Ok(Self {
            width: w as usize,
            height: h as usize,
            planes: [red, green, blue, vec![1.0; count]],
        })
    }

    /// Plane width in samples.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Plane height in samples.
    pub fn height(&self) -> usize {
        self.height
    }

    pub fn red(&self) -> &[f64] {
        &self.planes[0]
    }

    pub fn green(&self) -> &[f64] {
        &self.planes[1]
    }

    pub fn blue(&self) -> &[f64] {
        &self.planes[2]
    }

    /// The coverage weight plane.
    pub fn weight(&self) -> &[f64] {
        &self.planes[3]
    }

    /// Run `op` on each of the four planes, stopping at the first error.
    ///
    /// With the `parallel` feature the planes are processed concurrently.
    pub fn for_each_plane<F>(&mut self, op: F) -> Result<(), BlurError>
    where
        F: Fn(&mut [f64]) -> Result<(), BlurError> + Sync + Send,
    {
        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;
            self.planes
                .as_mut_slice()
                .par_iter_mut()
                .try_for_each(|plane| op(plane.as_mut_slice()))
        }

        #[cfg(not(feature = "parallel"))]
        {
            self.planes
                .iter_mut()
                .try_for_each(|plane| op(plane.as_mut_slice()))
        }
    }

    /// Normalize by weight, convert back to 8-bit and write every pixel of `surface`.
    ///
    /// `surface` must have the dimensions this set was unpacked from.
    pub fn pack_into<S: PixelSurface + ?Sized>(&self, surface: &mut S) {
        debug_assert_eq!(surface.width() as usize, self.width);
        debug_assert_eq!(surface.height() as usize, self.height);

        let [red, green, blue, weight] = &self.planes;
        for y in 0..self.height {
            for x in 0..self.width {
                let i = y * self.width + x;
                let w = weight[i];
                let rgb = pack_rgb(
                    gamma_decode(red[i] / w),
                    gamma_decode(green[i] / w),
                    gamma_decode(blue[i] / w),
                );
                surface.set_pixel(x as u32, y as u32, rgb);
            }
        }
    }
}
