use std::path::PathBuf;

use thiserror::Error;

/// Errors from reading or writing image files.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Failed to read file '{path}': {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write file '{path}': {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Missing file extension: '{0}'")]
    MissingExtension(PathBuf),

    #[error("Unsupported image extension: '{extension}'")]
    UnsupportedExtension { extension: String },

    #[error("Failed to decode image '{path}': {source}")]
    Decode {
        path: PathBuf,
        source: image::ImageError,
    },

    #[error("Failed to encode image '{path}': {source}")]
    Encode {
        path: PathBuf,
        source: image::ImageError,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
