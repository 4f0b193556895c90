//! Gamma 2.2 conversion between 8-bit pixel values and linear light.
//!
//! Blurring averages light, so samples are decoded to linear intensity
//! before convolution and re-encoded afterwards. The 8-bit to linear
//! direction has only 256 inputs and is served from a table built at
//! compile time.

/// Display gamma applied to stored pixel values.
pub const GAMMA: f64 = 2.2;

/// `x^2.2` in const context, using `x^2.2 = x^2 * x^(1/5)`.
const fn const_gamma_pow(base: f64) -> f64 {
    if base <= 0.0 {
        return 0.0;
    }
    base * base * const_nth_root(base, 5)
}

/// Compute the nth root of `value` using Newton's method in const context.
const fn const_nth_root(value: f64, n: u32) -> f64 {
    if value <= 0.0 {
        return 0.0;
    }
    if value == 1.0 {
        return 1.0;
    }
    // x_{k+1} = ((n-1)*x_k + value / x_k^(n-1)) / n
    let mut x = if value < 1.0 { 1.0 } else { value };
    let nf = n as f64;
    let nm1 = (n - 1) as f64;
    let mut i = 0;
    while i < 100 {
        let mut xpow = 1.0;
        let mut j = 0;
        while j < n - 1 {
            xpow *= x;
            j += 1;
        }
        let x_new = (nm1 * x + value / xpow) / nf;
        let diff = if x_new > x { x_new - x } else { x - x_new };
        if diff < 1e-15 {
            return x_new;
        }
        x = x_new;
        i += 1;
    }
    x
}

const fn build_gamma_encode_lut() -> [f64; 256] {
    let mut lut = [0.0f64; 256];
    let mut i = 0;
    while i < 256 {
        lut[i] = const_gamma_pow(i as f64 / 255.0);
        i += 1;
    }
    lut
}

static GAMMA_ENCODE_LUT: [f64; 256] = build_gamma_encode_lut();

/// Convert an 8-bit channel value to linear light in `[0.0, 1.0]`.
///
/// # Examples
///
/// ```
/// use spectral_blur_core::color::gamma_encode;
/// assert_eq!(gamma_encode(0), 0.0);
/// assert!((gamma_encode(255) - 1.0).abs() < 1e-12);
/// ```
#[inline]
pub fn gamma_encode(value: u8) -> f64 {
    GAMMA_ENCODE_LUT[value as usize]
}

/// Convert linear light back to an 8-bit channel value.
///
/// Computes `round(value^(1/2.2) * 255)` clamped to `[0, 255]`. Negative
/// inputs and NaN map to 0.
///
/// # Examples
///
/// ```
/// use spectral_blur_core::color::{gamma_decode, gamma_encode};
/// assert_eq!(gamma_decode(gamma_encode(128)), 128);
/// assert_eq!(gamma_decode(1.5), 255);
/// ```
#[inline]
pub fn gamma_decode(value: f64) -> u8 {
    if value.is_nan() || value <= 0.0 {
        return 0;
    }
    (value.powf(1.0 / GAMMA) * 255.0).round().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_boundaries() {
        assert_eq!(gamma_encode(0), 0.0);
        assert!((gamma_encode(255) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_encode_matches_powf() {
        for v in 0..=255u8 {
            let want = (v as f64 / 255.0).powf(GAMMA);
            let got = gamma_encode(v);
            assert!((got - want).abs() < 1e-12, "v={v}: {got} vs {want}");
        }
    }

    #[test]
    fn test_encode_monotonic() {
        let mut prev = gamma_encode(0);
        for v in 1..=255u8 {
            let curr = gamma_encode(v);
            assert!(curr > prev, "not monotonic at {v}");
            prev = curr;
        }
    }

    #[test]
    fn test_roundtrip_exact() {
        for v in 0..=255u8 {
            assert_eq!(gamma_decode(gamma_encode(v)), v);
        }
    }

    #[test]
    fn test_decode_clamps() {
        assert_eq!(gamma_decode(-0.25), 0);
        assert_eq!(gamma_decode(f64::NAN), 0);
        assert_eq!(gamma_decode(2.0), 255);
        assert_eq!(gamma_decode(f64::INFINITY), 255);
    }

    #[test]
    fn test_mid_grey_is_dark_in_linear_light() {
        // 128 is roughly 22% of full intensity under gamma 2.2.
        let linear = gamma_encode(128);
        assert!((linear - 0.2195).abs() < 1e-3, "got {linear}");
    }
}
