//! Errors surfaced by the command-line tool.

use std::path::PathBuf;

use spectral_blur_core::BlurError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode '{}': {source}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("failed to write '{}': {source}", .path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error(transparent)]
    Blur(#[from] BlurError),

    /// Indices are 1-based, as printed by `list`.
    #[error("image index {index} out of range (collection holds {len} images)")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("no images with extensions [{extensions}] found in '{}'", .dir.display())]
    EmptyCollection { dir: PathBuf, extensions: String },

    /// Reported after `--keep-going` finished the remaining images.
    #[error("{failed} of {total} images failed")]
    Partial { failed: usize, total: usize },

    #[error("failed to serialize JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to initialise logging: {0}")]
    Logging(#[from] tracing_subscriber::util::TryInitError),
}

impl CliError {
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        CliError::Io {
            context: context.into(),
            source,
        }
    }
}
