//! Loading a folder of images and addressing them by position.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;
use clap::ValueEnum;
use image::{ColorType, ImageFormat, ImageReader};
use spectral_blur_core::{ColorHistogram, RgbImage};
use tracing::{debug, info, warn};

use crate::error::CliError;
use crate::metadata::{read_exif, ExifEntry};

/// Extensions picked up when none are given.
pub const DEFAULT_EXTENSIONS: &str = "png,jpg,jpeg";

/// Ordering applied to the collection.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum SortKey {
    /// File name, case-insensitive
    Name,
    /// File extension, case-insensitive
    Extension,
}

/// One decoded image file.
#[derive(Debug, Clone)]
pub struct ImageFile {
    path: PathBuf,
    name: String,
    extension: String,
    format: Option<ImageFormat>,
    color_type: ColorType,
    file_size: u64,
    exif: Vec<ExifEntry>,
    pixels: RgbImage,
}

impl ImageFile {
    /// Decode `path` into RGB8 pixels.
    pub fn open(path: &Path) -> Result<Self, CliError> {
        let reader = ImageReader::open(path)
            .map_err(|e| CliError::io(format!("failed to open '{}'", path.display()), e))?
            .with_guessed_format()
            .map_err(|e| CliError::io(format!("failed to read '{}'", path.display()), e))?;
        let format = reader.format();
        let decoded = reader.decode().map_err(|source| CliError::Decode {
            path: path.to_path_buf(),
            source,
        })?;
        let color_type = decoded.color();
        let rgb = decoded.to_rgb8();
        let (width, height) = rgb.dimensions();
        let pixels = RgbImage::from_raw(width, height, rgb.into_raw())?;

        let file_size = fs::metadata(path)
            .map_err(|e| CliError::io(format!("failed to stat '{}'", path.display()), e))?
            .len();

        Ok(Self {
            path: path.to_path_buf(),
            name: path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
            extension: path
                .extension()
                .map(|e| e.to_string_lossy().into_owned())
                .unwrap_or_default(),
            format,
            color_type,
            file_size,
            exif: read_exif(path),
            pixels,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File name including the extension.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// File name without the extension.
    pub fn stem(&self) -> String {
        self.path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.name.clone())
    }

    /// Extension as written on disk (case preserved).
    pub fn extension(&self) -> &str {
        &self.extension
    }

    pub fn format(&self) -> Option<ImageFormat> {
        self.format
    }

    /// Colour layout of the file before conversion to RGB8.
    pub fn color_type(&self) -> ColorType {
        self.color_type
    }

    pub fn file_size(&self) -> u64 {
        self.file_size
    }

    /// EXIF fields in file order; empty when the file carries none.
    pub fn exif(&self) -> &[ExifEntry] {
        &self.exif
    }

    pub fn pixels(&self) -> &RgbImage {
        &self.pixels
    }

    pub fn total_pixels(&self) -> u64 {
        self.pixels.total_pixels()
    }
}

/// The images loaded from one directory, in display order.
#[derive(Debug, Clone)]
pub struct ImageCollection {
    images: Vec<ImageFile>,
    loaded_at: String,
}

impl ImageCollection {
    /// Load every readable image in `dir` whose extension is in `extensions`.
    ///
    /// Files that fail to decode are skipped with a warning. The result is
    /// sorted by name.
    pub fn load(dir: &Path, extensions: &[String]) -> Result<Self, CliError> {
        let extensions: Vec<String> = extensions.iter().map(|e| e.to_lowercase()).collect();

        let entries = fs::read_dir(dir).map_err(|e| {
            CliError::io(format!("failed to read directory '{}'", dir.display()), e)
        })?;

        let mut paths = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| CliError::io("failed to read directory entry", e))?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let ext = path
                .extension()
                .and_then(|e| e.to_str())
                .map(|e| e.to_lowercase())
                .unwrap_or_default();
            if extensions.contains(&ext) {
                paths.push(path);
            } else {
                debug!(path = %path.display(), "ignoring file with unlisted extension");
            }
        }
        paths.sort();

        let mut images = Vec::with_capacity(paths.len());
        for path in paths {
            match ImageFile::open(&path) {
                Ok(image) => images.push(image),
                Err(e) => warn!(path = %path.display(), error = %e, "skipping unreadable image"),
            }
        }
        info!(dir = %dir.display(), count = images.len(), "loaded images");

        let mut collection = Self::from_images(images);
        collection.sort(SortKey::Name);
        Ok(collection)
    }

    /// Wrap already-decoded images, stamping the current local time.
    pub fn from_images(images: Vec<ImageFile>) -> Self {
        Self {
            images,
            loaded_at: Local::now().format("%H:%M:%S").to_string(),
        }
    }

    /// Local time (`HH:MM:SS`) at which the collection was filled.
    pub fn loaded_at(&self) -> &str {
        &self.loaded_at
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ImageFile> {
        self.images.iter()
    }

    /// Stable, case-insensitive sort.
    pub fn sort(&mut self, key: SortKey) {
        match key {
            SortKey::Name => self.images.sort_by_cached_key(|i| i.name.to_lowercase()),
            SortKey::Extension => self
                .images
                .sort_by_cached_key(|i| i.extension.to_lowercase()),
        }
    }

    fn check_index(&self, index: usize) -> Result<usize, CliError> {
        if index == 0 || index > self.images.len() {
            return Err(CliError::IndexOutOfRange {
                index,
                len: self.images.len(),
            });
        }
        Ok(index - 1)
    }

    /// The image at 1-based `index`.
    pub fn get(&self, index: usize) -> Result<&ImageFile, CliError> {
        let i = self.check_index(index)?;
        Ok(&self.images[i])
    }

    /// Remove and return the image at 1-based `index`.
    pub fn remove(&mut self, index: usize) -> Result<ImageFile, CliError> {
        let i = self.check_index(index)?;
        Ok(self.images.remove(i))
    }

    /// Remove several 1-based indices, all interpreted against the current
    /// order. Fails without removing anything if any index is out of range.
    pub fn remove_many(&mut self, indices: &[usize]) -> Result<(), CliError> {
        let mut sorted = indices.to_vec();
        sorted.sort_unstable();
        sorted.dedup();
        for &index in &sorted {
            self.check_index(index)?;
        }
        for &index in sorted.iter().rev() {
            let removed = self.remove(index)?;
            debug!(index, name = removed.name(), "removed image from collection");
        }
        Ok(())
    }

    /// Keep only the image at 1-based `index`.
    pub fn retain_only(&mut self, index: usize) -> Result<(), CliError> {
        let keep = self.remove(index)?;
        self.images = vec![keep];
        Ok(())
    }

    /// Pixel count over all images.
    pub fn total_pixels(&self) -> u64 {
        self.images.iter().map(ImageFile::total_pixels).sum()
    }

    /// Exact colour histogram over all images.
    pub fn histogram(&self) -> ColorHistogram {
        let mut total = ColorHistogram::new();
        for image in &self.images {
            total.merge(&ColorHistogram::from_surface(image.pixels()));
        }
        total
    }
}
