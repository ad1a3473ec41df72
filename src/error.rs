use image::{ColorType, ImageError};
use std::num::ParseIntError;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConvertError>;

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Image codec error on {}: {source}", .path.display())]
    Image {
        path: PathBuf,
        #[source]
        source: ImageError,
    },

    #[error("Unsupported channel layout {0:?}: need 3 or 4 channels of 8 bits")]
    UnsupportedLayout(ColorType),

    #[error("Line {line}: invalid hex byte {token:?}: {source}")]
    InvalidHex {
        line: usize,
        token: String,
        #[source]
        source: ParseIntError,
    },

    #[error("Not enough data: need {expected} bytes, got {actual}")]
    InsufficientData { expected: usize, actual: usize },

    #[error("Invalid image dimensions {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },
}

impl ConvertError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn image(path: impl Into<PathBuf>, source: ImageError) -> Self {
        Self::Image {
            path: path.into(),
            source,
        }
    }
}
