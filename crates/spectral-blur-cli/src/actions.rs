//! Image transformations that write a new file next to the source.

use std::path::{Path, PathBuf};

use spectral_blur_core::{blur, filters, BlurOptions, PixelSurface, RgbImage};
use tracing::info;

use crate::collection::ImageFile;
use crate::error::CliError;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Filter {
    Blur(BlurOptions),
    Grayscale,
    Invert,
}

impl Filter {
    /// Suffix appended to the file stem of the output.
    pub fn suffix(&self) -> &'static str {
        match self {
            Filter::Blur(_) => "blurred",
            Filter::Grayscale => "grey",
            Filter::Invert => "inverted",
        }
    }

    pub fn apply(&self, pixels: &RgbImage) -> Result<RgbImage, CliError> {
        Ok(match self {
            Filter::Blur(options) => blur(pixels, options)?,
            Filter::Grayscale => filters::grayscale_copy(pixels),
            Filter::Invert => filters::invert_copy(pixels),
        })
    }
}

/// `<out_dir>/<stem>_<suffix>.<ext>`, keeping the source extension.
pub fn output_path(image: &ImageFile, filter: &Filter, out_dir: &Path) -> PathBuf {
    let mut name = format!("{}_{}", image.stem(), filter.suffix());
    if !image.extension().is_empty() {
        name.push('.');
        name.push_str(image.extension());
    }
    out_dir.join(name)
}

/// Encode RGB8 pixels, picking the format from the path's extension.
pub fn write_rgb(path: &Path, pixels: &RgbImage) -> Result<(), CliError> {
    image::save_buffer(
        path,
        pixels.as_raw(),
        pixels.width(),
        pixels.height(),
        image::ColorType::Rgb8,
    )
    .map_err(|source| CliError::Encode {
        path: path.to_path_buf(),
        source,
    })
}

/// Apply `filter` to one image and write the result. Returns the output path.
pub fn process(image: &ImageFile, filter: &Filter, out_dir: &Path) -> Result<PathBuf, CliError> {
    let output = filter.apply(image.pixels())?;
    let path = output_path(image, filter, out_dir);
    write_rgb(&path, &output)?;
    info!(
        input = %image.path().display(),
        output = %path.display(),
        filter = filter.suffix(),
        "wrote image"
    );
    Ok(path)
}
