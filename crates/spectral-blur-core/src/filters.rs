//! Single-pass per-pixel filters.

use crate::error::BlurError;
use crate::image::{pack_rgb, unpack_rgb, PixelSurface, RgbImage};

fn map_pixels<S, F>(surface: &mut S, f: F)
where
    S: PixelSurface + ?Sized,
    F: Fn([u8; 3]) -> [u8; 3],
{
    for y in 0..surface.height() {
        for x in 0..surface.width() {
            let [r, g, b] = f(unpack_rgb(surface.get_pixel(x, y)));
            surface.set_pixel(x, y, pack_rgb(r, g, b));
        }
    }
}

#[inline]
fn grey_of([r, g, b]: [u8; 3]) -> [u8; 3] {
    let grey = ((r as u16 + g as u16 + b as u16) / 3) as u8;
    [grey; 3]
}

#[inline]
fn inverse_of([r, g, b]: [u8; 3]) -> [u8; 3] {
    [255 - r, 255 - g, 255 - b]
}

/// Replace every pixel with the unweighted mean of its channels.
pub fn grayscale<S: PixelSurface + ?Sized>(surface: &mut S) {
    map_pixels(surface, grey_of);
}

/// Replace every channel `c` with `255 - c`.
pub fn invert<S: PixelSurface + ?Sized>(surface: &mut S) {
    map_pixels(surface, inverse_of);
}

/// Grayscale copy of `surface`.
pub fn grayscale_copy<S: PixelSurface + Clone>(surface: &S) -> S {
    let mut out = surface.clone();
    grayscale(&mut out);
    out
}

/// Inverted copy of `surface`.
///
/// # Examples
///
/// ```
/// use spectral_blur_core::{filters::invert_copy, PixelSurface, RgbImage};
/// let img = RgbImage::filled(1, 1, 0x00ff80);
/// assert_eq!(invert_copy(&img).get_pixel(0, 0), 0xff007f);
/// ```
pub fn invert_copy<S: PixelSurface + Clone>(surface: &S) -> S {
    let mut out = surface.clone();
    invert(&mut out);
    out
}

/// Grayscale a flat row-major RGB byte buffer.
///
/// # Errors
///
/// Returns [`BlurError::BufferSize`] if `pixels.len() != width * height * 3`.
pub fn grayscale_rgb(pixels: &[u8], width: u32, height: u32) -> Result<Vec<u8>, BlurError> {
    let mut image = RgbImage::from_raw(width, height, pixels.to_vec())?;
    grayscale(&mut image);
    Ok(image.into_raw())
}

/// Invert a flat row-major RGB byte buffer.
///
/// # Errors
///
/// Returns [`BlurError::BufferSize`] if `pixels.len() != width * height * 3`.
pub fn invert_rgb(pixels: &[u8], width: u32, height: u32) -> Result<Vec<u8>, BlurError> {
    let mut image = RgbImage::from_raw(width, height, pixels.to_vec())?;
    invert(&mut image);
    Ok(image.into_raw())
}
