//! Per-image metadata, as text or JSON.

use std::fmt;
use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde::Serialize;
use spectral_blur_core::PixelSurface;
use tracing::{debug, info};

use crate::collection::ImageFile;
use crate::error::CliError;

/// Name of the file written by `info --save`.
pub const METADATA_FILE: &str = "metadata.txt";

/// One EXIF field, rendered for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExifEntry {
    pub tag: String,
    pub value: String,
}

/// Read every EXIF field of the file at `path`.
///
/// Files without EXIF, or with EXIF that cannot be parsed, give an empty list.
pub fn read_exif(path: &Path) -> Vec<ExifEntry> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) => {
            debug!(path = %path.display(), error = %e, "cannot open file for EXIF");
            return Vec::new();
        }
    };
    let mut reader = BufReader::new(file);
    match exif::Reader::new().read_from_container(&mut reader) {
        Ok(exif) => exif
            .fields()
            .map(|field| ExifEntry {
                tag: field.tag.to_string(),
                value: field.display_value().with_unit(&exif).to_string(),
            })
            .collect(),
        Err(exif::Error::NotFound(_)) => Vec::new(),
        Err(e) => {
            debug!(path = %path.display(), error = %e, "ignoring unreadable EXIF");
            Vec::new()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageMetadata {
    pub name: String,
    pub path: String,
    pub format: String,
    pub extension: String,
    pub width: u32,
    pub height: u32,
    pub color_type: String,
    pub total_pixels: u64,
    pub file_size: u64,
    pub exif: Vec<ExifEntry>,
}

impl ImageMetadata {
    pub fn of(image: &ImageFile) -> Self {
        Self {
            name: image.name().to_string(),
            path: image.path().display().to_string(),
            format: image
                .format()
                .map(|f| format!("{f:?}"))
                .unwrap_or_else(|| "unknown".to_string()),
            extension: image.extension().to_string(),
            width: image.pixels().width(),
            height: image.pixels().height(),
            color_type: format!("{:?}", image.color_type()),
            total_pixels: image.total_pixels(),
            file_size: image.file_size(),
            exif: image.exif().to_vec(),
        }
    }
}

/// `key: value` lines under a heading, EXIF fields indented below.
impl fmt::Display for ImageMetadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Metadata for {}:", self.name)?;
        writeln!(f, "  path: {}", self.path)?;
        writeln!(f, "  format: {}", self.format)?;
        writeln!(f, "  extension: {}", self.extension)?;
        writeln!(f, "  width: {}", self.width)?;
        writeln!(f, "  height: {}", self.height)?;
        writeln!(f, "  color type: {}", self.color_type)?;
        writeln!(f, "  total pixels: {}", self.total_pixels)?;
        writeln!(f, "  file size: {} bytes", self.file_size)?;
        if self.exif.is_empty() {
            return writeln!(f, "  exif: none");
        }
        writeln!(f, "  exif:")?;
        for entry in &self.exif {
            writeln!(f, "    {}: {}", entry.tag, entry.value)?;
        }
        Ok(())
    }
}

/// Render several entries separated by blank lines.
pub fn render_all(entries: &[ImageMetadata]) -> String {
    entries
        .iter()
        .map(ImageMetadata::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Write the rendered entries to `<dir>/metadata.txt`, replacing any
/// previous file. Returns the path written.
pub fn save(entries: &[ImageMetadata], dir: &Path) -> Result<PathBuf, CliError> {
    let path = dir.join(METADATA_FILE);
    fs::write(&path, render_all(entries))
        .map_err(|e| CliError::io(format!("failed to write '{}'", path.display()), e))?;
    info!(path = %path.display(), entries = entries.len(), "saved metadata");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collection::tests::write_png;

    /// Big-endian TIFF block holding a single ASCII `Make` field, "ACM".
    const EXIF_MAKE_ACM: &[u8] = &[
        b'E', b'x', b'i', b'f', 0, 0, // APP1 identifier
        b'M', b'M', 0x00, 0x2a, 0x00, 0x00, 0x00, 0x08, // TIFF header
        0x00, 0x01, // one entry
        0x01, 0x0f, 0x00, 0x02, 0x00, 0x00, 0x00, 0x04, b'A', b'C', b'M', 0,
        0x00, 0x00, 0x00, 0x00, // no next IFD
    ];

    /// Write an 8x8 JPEG with an APP1 EXIF segment right after SOI.
    fn write_jpeg_with_exif(dir: &Path, name: &str) {
        let path = dir.join(name);
        let data = vec![120u8; 8 * 8 * 3];
        image::save_buffer(&path, &data, 8, 8, image::ColorType::Rgb8).unwrap();
        let jpeg = fs::read(&path).unwrap();
        assert_eq!(&jpeg[..2], &[0xff, 0xd8]);

        let segment_len = (EXIF_MAKE_ACM.len() + 2) as u16;
        let mut spliced = jpeg[..2].to_vec();
        spliced.extend_from_slice(&[0xff, 0xe1]);
        spliced.extend_from_slice(&segment_len.to_be_bytes());
        spliced.extend_from_slice(EXIF_MAKE_ACM);
        spliced.extend_from_slice(&jpeg[2..]);
        fs::write(&path, spliced).unwrap();
    }

    fn sample() -> ImageMetadata {
        ImageMetadata {
            name: "cat.png".into(),
            path: "img/cat.png".into(),
            format: "Png".into(),
            extension: "png".into(),
            width: 4,
            height: 3,
            color_type: "Rgb8".into(),
            total_pixels: 12,
            file_size: 99,
            exif: Vec::new(),
        }
    }

    #[test]
    fn test_render_lines() {
        let text = sample().to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Metadata for cat.png:");
        assert!(lines.contains(&"  width: 4"));
        assert!(lines.contains(&"  total pixels: 12"));
        assert!(lines.contains(&"  file size: 99 bytes"));
        assert_eq!(lines.last(), Some(&"  exif: none"));
        assert_eq!(lines.len(), 10);
    }

    #[test]
    fn test_render_exif_fields() {
        let meta = ImageMetadata {
            exif: vec![
                ExifEntry {
                    tag: "Make".into(),
                    value: "\"ACM\"".into(),
                },
                ExifEntry {
                    tag: "XResolution".into(),
                    value: "72 pixels per inch".into(),
                },
            ],
            ..sample()
        };
        let text = meta.to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert!(lines.contains(&"  exif:"));
        assert!(lines.contains(&"    Make: \"ACM\""));
        assert!(lines.contains(&"    XResolution: 72 pixels per inch"));
    }

    #[test]
    fn test_json_fields() {
        let value = serde_json::to_value(sample()).unwrap();
        assert_eq!(value["name"], "cat.png");
        assert_eq!(value["width"], 4);
        assert_eq!(value["color_type"], "Rgb8");
        assert_eq!(value["exif"], serde_json::json!([]));
    }

    #[test]
    fn test_read_exif_from_jpeg() {
        let dir = tempfile::tempdir().unwrap();
        write_jpeg_with_exif(dir.path(), "shot.jpg");

        let entries = read_exif(&dir.path().join("shot.jpg"));
        let make = entries.iter().find(|e| e.tag == "Make").expect("Make field");
        assert!(make.value.contains("ACM"), "value {:?}", make.value);

        let image = ImageFile::open(&dir.path().join("shot.jpg")).unwrap();
        let meta = ImageMetadata::of(&image);
        assert_eq!(meta.exif, entries);
        assert!(meta.to_string().contains("    Make: "));
    }

    #[test]
    fn test_no_exif_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        write_png(dir.path(), "plain.png", 2, 2, [1, 2, 3]);
        assert!(read_exif(&dir.path().join("plain.png")).is_empty());
        assert!(read_exif(&dir.path().join("missing.png")).is_empty());
    }

    #[test]
    fn test_of_and_save() {
        let dir = tempfile::tempdir().unwrap();
        write_png(dir.path(), "a.png", 6, 2, [10, 20, 30]);
        write_jpeg_with_exif(dir.path(), "b.jpg");
        let a = ImageMetadata::of(&ImageFile::open(&dir.path().join("a.png")).unwrap());
        let b = ImageMetadata::of(&ImageFile::open(&dir.path().join("b.jpg")).unwrap());
        assert_eq!(a.format, "Png");
        assert_eq!((a.width, a.height, a.total_pixels), (6, 2, 12));
        assert!(a.exif.is_empty());

        let path = save(&[a, b], dir.path()).unwrap();
        let written = fs::read_to_string(path).unwrap();
        assert!(written.contains("Metadata for a.png:"));
        assert!(written.contains("  exif: none"));
        assert!(written.contains("Metadata for b.jpg:"));
        assert!(written.contains("    Make: "));
    }
}
