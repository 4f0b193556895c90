//! Terminal and JSON output for `list` and `histogram`.

use std::io::Write;

use colored::Colorize;
use serde::Serialize;
use spectral_blur_core::{unpack_rgb, ColorCount, PixelSurface};

use crate::collection::ImageCollection;
use crate::error::CliError;

/// `1234567` -> `"1,234,567"`.
pub fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

fn write_err(e: std::io::Error) -> CliError {
    CliError::io("failed to write output", e)
}

pub fn print_list(out: &mut impl Write, collection: &ImageCollection) -> Result<(), CliError> {
    writeln!(
        out,
        "{} images loaded at {}",
        collection.len(),
        collection.loaded_at()
    )
    .map_err(write_err)?;
    for (i, image) in collection.iter().enumerate() {
        writeln!(
            out,
            "{:>4}. {} ({}x{})",
            i + 1,
            image.name().bold(),
            image.pixels().width(),
            image.pixels().height()
        )
        .map_err(write_err)?;
    }
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct JsonColor {
    pub hex: String,
    pub rgb: [u8; 3],
    pub count: u64,
    pub percent: f64,
}

#[derive(Debug, Serialize)]
pub struct JsonHistogram {
    pub images: usize,
    pub total_pixels: u64,
    pub distinct_colors: usize,
    pub colors: Vec<JsonColor>,
}

impl JsonHistogram {
    pub fn new(images: usize, total: u64, distinct: usize, top: &[ColorCount]) -> Self {
        Self {
            images,
            total_pixels: total,
            distinct_colors: distinct,
            colors: top
                .iter()
                .map(|c| JsonColor {
                    hex: c.hex(),
                    rgb: unpack_rgb(c.color),
                    count: c.count,
                    percent: c.percent_of(total),
                })
                .collect(),
        }
    }
}

/// One line per colour: swatch, hex code, count and share of `total`.
pub fn print_histogram(
    out: &mut impl Write,
    top: &[ColorCount],
    total: u64,
) -> Result<(), CliError> {
    writeln!(
        out,
        "Top {} colors over {} pixels:",
        top.len(),
        group_thousands(total)
    )
    .map_err(write_err)?;
    for entry in top {
        let [r, g, b] = unpack_rgb(entry.color);
        writeln!(
            out,
            "{} {} {:>14} {:>7.2}%",
            "           ".on_truecolor(r, g, b),
            entry.hex(),
            group_thousands(entry.count),
            entry.percent_of(total)
        )
        .map_err(write_err)?;
    }
    Ok(())
}
