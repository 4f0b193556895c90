use spectral_blur_core::convolve::CyclicConvolver;
use spectral_blur_core::fft::{padded_length, Fft};
use spectral_blur_core::kernel::gaussian_kernel;
use spectral_blur_core::{
    blur, blur_rgb, filters, pack_rgb, unpack_rgb, BlurError, BlurOptions, ColorHistogram,
    PixelSurface, RgbImage,
};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Horizontal red ramp, vertical green ramp, constant blue.
fn gradient_image(width: u32, height: u32) -> RgbImage {
    let mut img = RgbImage::new(width, height);
    for y in 0..height {
        for x in 0..width {
            let r = ((x as f64 / width as f64) * 255.0) as u8;
            let g = ((y as f64 / height as f64) * 255.0) as u8;
            img.set_pixel(x, y, pack_rgb(r, g, 128));
        }
    }
    img
}

/// Sum of absolute differences between horizontally adjacent pixels.
fn horizontal_variation(img: &RgbImage) -> u64 {
    let mut total = 0u64;
    for y in 0..img.height() {
        for x in 1..img.width() {
            let a = unpack_rgb(img.get_pixel(x - 1, y));
            let b = unpack_rgb(img.get_pixel(x, y));
            total += a.iter().zip(b).map(|(&p, q)| p.abs_diff(q) as u64).sum::<u64>();
        }
    }
    total
}

// ===========================================================================
// Transform and convolution laws
// ===========================================================================

#[test]
fn transform_roundtrip_scales_by_length() {
    let fft = Fft::new(64).expect("power of two");
    let original: Vec<f64> = (0..64).map(|i| ((i * 37) % 11) as f64 - 5.0).collect();
    let mut re = original.clone();
    let mut im = vec![0.0; 64];
    fft.transform(&mut re, &mut im).unwrap();
    fft.inverse_transform(&mut re, &mut im).unwrap();
    for (got, want) in re.iter().zip(&original) {
        assert!((got - want * 64.0).abs() < 1e-9);
    }
    assert!(im.iter().all(|v| v.abs() < 1e-9));
}

#[test]
fn impulse_convolution_returns_scaled_kernel() {
    let length = padded_length(7);
    let kernel = gaussian_kernel(7, length, 4.5);
    let conv = CyclicConvolver::new(kernel.clone()).unwrap();
    let mut re = vec![0.0; length];
    let mut im = vec![0.0; length];
    re[0] = 1.0;
    conv.convolve(&mut re, &mut im).unwrap();
    for (got, k) in re.iter().zip(&kernel) {
        let want = k * length as f64;
        assert!((got - want).abs() <= 1e-9 * want.max(1.0));
    }
}

#[test]
fn constant_line_gain_is_length_times_kernel_sum() {
    let length = padded_length(10);
    let kernel = gaussian_kernel(10, length, 2.0);
    let sum: f64 = kernel.iter().sum();
    let conv = CyclicConvolver::new(kernel).unwrap();
    let mut re = vec![2.5; length];
    let mut im = vec![0.0; length];
    conv.convolve(&mut re, &mut im).unwrap();
    let want = 2.5 * length as f64 * sum;
    assert!(re.iter().all(|v| ((v - want) / want).abs() < 1e-9));
}

#[test]
fn padding_length_boundary() {
    assert_eq!(padded_length(5), 16);
}

#[test]
fn configuration_errors_are_typed() {
    assert_eq!(
        Fft::new(24).unwrap_err(),
        BlurError::InvalidLength { length: 24 }
    );
    let conv = CyclicConvolver::new(vec![1.0; 4]).unwrap();
    let mut re = vec![0.0; 4];
    let mut im = vec![0.0; 3];
    assert!(matches!(
        conv.convolve(&mut re, &mut im),
        Err(BlurError::LengthMismatch { .. })
    ));
}

// ===========================================================================
// Blur pipeline
// ===========================================================================

#[test]
fn flat_grey_4x4_survives_default_blur() {
    let img = RgbImage::filled(4, 4, 0x808080);
    let out = blur(&img, &BlurOptions::default()).expect("blur ok");
    for y in 0..4 {
        for x in 0..4 {
            for c in unpack_rgb(out.get_pixel(x, y)) {
                assert!(c.abs_diff(128) <= 1, "pixel ({x},{y}) channel {c}");
            }
        }
    }
}

#[test]
fn checkerboard_2x2_with_small_radius() {
    let pixels = vec![255, 255, 255, 0, 0, 0, 0, 0, 0, 255, 255, 255];
    let out = blur_rgb(&pixels, 2, 2, &BlurOptions::new().with_radius(0.5)).unwrap();
    let lum: Vec<u8> = out.chunks(3).map(|px| px[0]).collect();
    assert!(lum.iter().all(|&v| v > 0 && v < 255), "got {lum:?}");
    assert!(lum[0] > lum[1] && lum[0] > lum[2]);
    assert!(lum[3] > lum[1] && lum[3] > lum[2]);
}

#[test]
fn blur_preserves_dimensions() {
    for (w, h) in [(1, 1), (5, 3), (3, 5), (33, 17)] {
        let img = gradient_image(w, h);
        let out = blur(&img, &BlurOptions::default()).unwrap();
        assert_eq!((out.width(), out.height()), (w, h));
        assert_eq!(out.as_raw().len(), img.as_raw().len());
    }
}

#[test]
fn blur_smooths_noise() {
    let mut img = RgbImage::new(32, 8);
    for y in 0..8 {
        for x in 0..32 {
            if (x + y) % 2 == 0 {
                img.set_pixel(x, y, 0xffffff);
            }
        }
    }
    let out = blur(&img, &BlurOptions::new().with_radius(2.0)).unwrap();
    assert!(horizontal_variation(&out) * 10 < horizontal_variation(&img));
}

#[test]
fn larger_radius_blurs_more() {
    let img = gradient_image(24, 24);
    let mut spiky = img.clone();
    spiky.set_pixel(12, 12, 0xffffff);
    let soft = blur(&spiky, &BlurOptions::new().with_radius(1.0)).unwrap();
    let softer = blur(&spiky, &BlurOptions::new().with_radius(4.0)).unwrap();
    assert!(horizontal_variation(&softer) < horizontal_variation(&soft));
}

#[test]
fn blur_is_deterministic() {
    let img = gradient_image(20, 12);
    let a = blur(&img, &BlurOptions::default()).unwrap();
    let b = blur(&img, &BlurOptions::default()).unwrap();
    assert_eq!(a, b);
}

#[test]
fn blur_rejects_bad_input() {
    let img = gradient_image(4, 4);
    assert!(matches!(
        blur(&img, &BlurOptions::new().with_radius(0.0)),
        Err(BlurError::InvalidRadius { .. })
    ));
    assert!(matches!(
        blur(&RgbImage::new(4, 0), &BlurOptions::default()),
        Err(BlurError::InvalidDimensions { .. })
    ));
    assert!(matches!(
        blur_rgb(&[0; 10], 2, 2, &BlurOptions::default()),
        Err(BlurError::BufferSize { expected: 12, actual: 10 })
    ));
}

// ===========================================================================
// Filters and statistics
// ===========================================================================

#[test]
fn grayscale_then_histogram() {
    let img = gradient_image(16, 16);
    let grey = filters::grayscale_copy(&img);
    let histogram = ColorHistogram::from_surface(&grey);
    assert_eq!(histogram.total(), 256);
    for bucket in histogram.top(usize::MAX) {
        let [r, g, b] = unpack_rgb(bucket.color);
        assert!(r == g && g == b, "non-grey colour {}", bucket.hex());
    }
}

#[test]
fn inverted_histogram_mirrors_original() {
    let img = gradient_image(8, 8);
    let inv = filters::invert_copy(&img);
    let a = ColorHistogram::from_surface(&img);
    let b = ColorHistogram::from_surface(&inv);
    for bucket in a.top(usize::MAX) {
        assert_eq!(b.count(!bucket.color & 0xffffff), bucket.count);
    }
}
