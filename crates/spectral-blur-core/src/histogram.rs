//! Exact colour histograms and most-common-colour queries.

use std::collections::HashMap;

use crate::image::{pack_rgb, PixelSurface};

/// Number of colours reported when no limit is given.
pub const DEFAULT_TOP_COLORS: usize = 15;

/// One histogram bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorCount {
    /// Packed `0xRRGGBB` colour.
    pub color: u32,
    /// Number of pixels with exactly this colour.
    pub count: u64,
}

impl ColorCount {
    /// The colour as `#rrggbb`.
    pub fn hex(&self) -> String {
        format!("#{:06x}", self.color & 0x00ff_ffff)
    }

    /// Share of `total` pixels, in percent. Zero when `total` is zero.
    pub fn percent_of(&self, total: u64) -> f64 {
        if total == 0 {
            return 0.0;
        }
        self.count as f64 * 100.0 / total as f64
    }
}

/// Pixel counts per distinct RGB colour.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColorHistogram {
    counts: HashMap<u32, u64>,
}

impl ColorHistogram {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count every pixel of `surface`.
    pub fn from_surface<S: PixelSurface + ?Sized>(surface: &S) -> Self {
        let mut histogram = Self::new();
        for y in 0..surface.height() {
            for x in 0..surface.width() {
                histogram.add(surface.get_pixel(x, y));
            }
        }
        histogram
    }

    /// Count every pixel of a flat RGB byte buffer. A trailing partial
    /// pixel is ignored.
    pub fn from_rgb(pixels: &[u8]) -> Self {
        let mut histogram = Self::new();
        for px in pixels.chunks_exact(3) {
            histogram.add(pack_rgb(px[0], px[1], px[2]));
        }
        histogram
    }

    #[inline]
    pub fn add(&mut self, rgb: u32) {
        *self.counts.entry(rgb & 0x00ff_ffff).or_insert(0) += 1;
    }

    /// Fold another histogram's counts into this one.
    pub fn merge(&mut self, other: &ColorHistogram) {
        for (&color, &count) in &other.counts {
            *self.counts.entry(color).or_insert(0) += count;
        }
    }

    /// Total pixels counted.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Number of distinct colours seen.
    pub fn distinct(&self) -> usize {
        self.counts.len()
    }

    /// Pixel count for one colour.
    pub fn count(&self, rgb: u32) -> u64 {
        self.counts.get(&(rgb & 0x00ff_ffff)).copied().unwrap_or(0)
    }

    /// The `k` most frequent colours, most frequent first.
    ///
    /// Ties are ordered by ascending colour value so the result is
    /// deterministic.
    ///
    /// # Examples
    ///
    /// ```
    /// use spectral_blur_core::histogram::ColorHistogram;
    /// let h = ColorHistogram::from_rgb(&[0, 0, 0, 255, 255, 255, 0, 0, 0]);
    /// let top = h.top(1);
    /// assert_eq!(top[0].hex(), "#000000");
    /// assert_eq!(top[0].count, 2);
    /// ```
    pub fn top(&self, k: usize) -> Vec<ColorCount> {
        let mut buckets: Vec<ColorCount> = self
            .counts
            .iter()
            .map(|(&color, &count)| ColorCount { color, count })
            .collect();
        buckets.sort_unstable_by(|a, b| b.count.cmp(&a.count).then(a.color.cmp(&b.color)));
        buckets.truncate(k);
        buckets
    }
}
