//! Error types for betaguide library.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for betaguide operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while building or writing documents.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The file format is not recognized as PDF or DOCX.
    #[error("Unknown file format: not a generated PDF or DOCX")]
    UnknownFormat,

    /// The PDF version is not supported.
    #[error("Unsupported PDF version: {0}")]
    UnsupportedVersion(String),

    /// Error decoding or embedding an image.
    #[error("Image error: {0}")]
    Image(String),

    /// Error assembling PDF output.
    #[error("PDF writing error: {0}")]
    Pdf(String),

    /// Error assembling the DOCX package.
    #[error("DOCX packaging error: {0}")]
    Docx(String),

    /// Error during rendering (text, JSON).
    #[error("Rendering error: {0}")]
    Render(String),

    /// Invalid guide configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A color string could not be parsed.
    #[error("Invalid color: {0}")]
    InvalidColor(String),

    /// A written file turned out to be empty.
    #[error("Output file is empty: {}", .0.display())]
    EmptyOutput(PathBuf),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl From<image::ImageError> for Error {
    fn from(err: image::ImageError) -> Self {
        match err {
            image::ImageError::IoError(e) => Error::Io(e),
            _ => Error::Image(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::UnknownFormat;
        assert_eq!(
            err.to_string(),
            "Unknown file format: not a generated PDF or DOCX"
        );

        let err = Error::EmptyOutput(PathBuf::from("guide.pdf"));
        assert_eq!(err.to_string(), "Output file is empty: guide.pdf");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
