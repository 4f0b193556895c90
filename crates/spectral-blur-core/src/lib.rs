//! # spectral-blur-core
//!
//! Frequency-domain Gaussian blur for RGB images in pure Rust.
//!
//! The blur is separable: rows and then columns are convolved with a 1D
//! Gaussian through a radix-2 FFT, in linear light (gamma 2.2), with a
//! coverage plane that renormalizes the kernel at the image borders. The
//! crate also carries the simple per-pixel filters and colour statistics
//! used by the `spectral-blur` command-line tool.
//!
//! ## Quick Start
//!
//! ```
//! use spectral_blur_core::{blur, BlurOptions, PixelSurface, RgbImage};
//!
//! let mut img = RgbImage::new(8, 8);
//! img.set_pixel(4, 4, 0xffffff);
//!
//! let blurred = blur(&img, &BlurOptions::new().with_radius(1.5)).unwrap();
//! assert_eq!((blurred.width(), blurred.height()), (8, 8));
//! assert!(blurred.get_pixel(3, 4) > 0);
//! ```
//!
//! ## Features
//!
//! * `parallel` - blur the four channel planes concurrently with rayon.

pub mod channels;
pub mod color;
pub mod convolve;
pub mod error;
pub mod fft;
pub mod filters;
pub mod histogram;
pub mod image;
pub mod kernel;

mod blur_impl;

// Re-export primary types and functions at crate root.
pub use blur_impl::{blur, blur_channels, blur_in_place, blur_rgb, BlurOptions, DEFAULT_RADIUS};
pub use channels::ChannelSet;
pub use error::BlurError;
pub use filters::{grayscale, invert};
pub use histogram::{ColorCount, ColorHistogram};
pub use image::{pack_rgb, unpack_rgb, PixelSurface, RgbImage};
