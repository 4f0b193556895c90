//! Pixel-addressable RGB surfaces.

use crate::error::BlurError;

/// Pack 8-bit channels into `0xRRGGBB`.
#[inline]
pub fn pack_rgb(r: u8, g: u8, b: u8) -> u32 {
    (r as u32) << 16 | (g as u32) << 8 | b as u32
}

/// Split `0xRRGGBB` into `[r, g, b]`. The top byte is ignored.
#[inline]
pub fn unpack_rgb(rgb: u32) -> [u8; 3] {
    [(rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8]
}

/// Anything the filters can read pixels from and write pixels into.
///
/// Coordinates are always in range `0..width` and `0..height`; callers never
/// change the dimensions of a surface.
pub trait PixelSurface {
    /// Width in pixels.
    fn width(&self) -> u32;

    /// Height in pixels.
    fn height(&self) -> u32;

    /// Pixel at `(x, y)` packed as `0xRRGGBB`.
    fn get_pixel(&self, x: u32, y: u32) -> u32;

    /// Overwrite the pixel at `(x, y)` with a packed `0xRRGGBB` value.
    fn set_pixel(&mut self, x: u32, y: u32, rgb: u32);
}

/// An owned, row-major RGB8 image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RgbImage {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl RgbImage {
    /// A black image.
    pub fn new(width: u32, height: u32) -> Self {
        Self::filled(width, height, 0)
    }

    /// An image where every pixel is `rgb` (`0xRRGGBB`).
    pub fn filled(width: u32, height: u32, rgb: u32) -> Self {
        let count = width as usize * height as usize;
        let data = unpack_rgb(rgb).repeat(count);
        Self {
            width,
            height,
            data,
        }
    }

    /// Wrap a flat RGB byte buffer (3 bytes per pixel, row-major).
    ///
    /// # Errors
    ///
    /// Returns [`BlurError::BufferSize`] if `data.len() != width * height * 3`,
    /// or [`BlurError::InvalidDimensions`] if that product overflows.
    ///
    /// # Examples
    ///
    /// ```
    /// use spectral_blur_core::{PixelSurface, RgbImage};
    /// let img = RgbImage::from_raw(2, 1, vec![255, 0, 0, 0, 0, 255]).unwrap();
    /// assert_eq!(img.get_pixel(1, 0), 0x0000ff);
    /// ```
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> Result<Self, BlurError> {
        let expected = rgb_buffer_len(width, height)?;
        if data.len() != expected {
            return Err(BlurError::BufferSize {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// The flat RGB bytes.
    pub fn as_raw(&self) -> &[u8] {
        &self.data
    }

    /// Consume the image, returning its flat RGB bytes.
    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    /// `width * height`.
    pub fn total_pixels(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    #[inline]
    fn offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * 3
    }
}

impl PixelSurface for RgbImage {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn get_pixel(&self, x: u32, y: u32) -> u32 {
        let i = self.offset(x, y);
        pack_rgb(self.data[i], self.data[i + 1], self.data[i + 2])
    }

    fn set_pixel(&mut self, x: u32, y: u32, rgb: u32) {
        let i = self.offset(x, y);
        self.data[i..i + 3].copy_from_slice(&unpack_rgb(rgb));
    }
}

/// Byte length of a `width x height` RGB8 buffer, with overflow checking.
pub(crate) fn rgb_buffer_len(width: u32, height: u32) -> Result<usize, BlurError> {
    (width as u64)
        .checked_mul(height as u64)
        .and_then(|v| v.checked_mul(3))
        .and_then(|v| usize::try_from(v).ok())
        .ok_or(BlurError::InvalidDimensions {
            width,
            height,
            reason: "dimensions overflow buffer size calculation",
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pack_unpack() {
        assert_eq!(pack_rgb(0x12, 0x34, 0x56), 0x123456);
        assert_eq!(unpack_rgb(0x123456), [0x12, 0x34, 0x56]);
        assert_eq!(unpack_rgb(0xff00_00ff), [0, 0, 0xff]);
    }

    #[test]
    fn test_filled() {
        let img = RgbImage::filled(3, 2, 0x804020);
        assert_eq!(img.as_raw().len(), 18);
        for y in 0..2 {
            for x in 0..3 {
                assert_eq!(img.get_pixel(x, y), 0x804020);
            }
        }
    }

    #[test]
    fn test_set_pixel_row_major() {
        let mut img = RgbImage::new(3, 2);
        img.set_pixel(2, 1, 0xabcdef);
        assert_eq!(&img.as_raw()[15..18], &[0xab, 0xcd, 0xef]);
        assert_eq!(img.get_pixel(2, 1), 0xabcdef);
        assert_eq!(img.get_pixel(1, 1), 0);
    }

    #[test]
    fn test_from_raw_validates_length() {
        assert_eq!(
            RgbImage::from_raw(2, 2, vec![0; 11]).unwrap_err(),
            BlurError::BufferSize {
                expected: 12,
                actual: 11
            }
        );
        assert!(RgbImage::from_raw(2, 2, vec![0; 12]).is_ok());
    }

    #[test]
    fn test_total_pixels() {
        assert_eq!(RgbImage::new(640, 480).total_pixels(), 307_200);
        assert_eq!(RgbImage::new(0, 10).total_pixels(), 0);
    }
}
