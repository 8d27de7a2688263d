//! Embedded image resources.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// An embedded resource in the document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Resource {
    /// Raw encoded bytes, as read from disk
    #[serde(skip)]
    pub data: Vec<u8>,

    /// MIME type (e.g., "image/png")
    pub mime_type: String,

    /// Original filename if known
    pub filename: Option<String>,

    /// Width in pixels
    pub width: u32,

    /// Height in pixels
    pub height: u32,
}

impl Resource {
    /// Create an image resource from encoded bytes.
    ///
    /// The bytes are decoded once to validate them and read the pixel
    /// dimensions.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        let mime_type = Self::detect_mime_type(&data)
            .ok_or_else(|| Error::Image("unsupported image format".into()))?;
        let decoded = image::load_from_memory(&data)?;

        Ok(Self {
            data,
            mime_type: mime_type.to_string(),
            filename: None,
            width: decoded.width(),
            height: decoded.height(),
        })
    }

    /// Read and validate an image file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let data = std::fs::read(path)?;
        let mut resource = Self::from_bytes(data)?;
        resource.filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned());
        Ok(resource)
    }

    /// Height divided by width, for scaling to a fixed width.
    pub fn aspect_ratio(&self) -> f32 {
        if self.width == 0 {
            1.0
        } else {
            self.height as f32 / self.width as f32
        }
    }

    /// Detect MIME type from data magic bytes.
    pub fn detect_mime_type(data: &[u8]) -> Option<&'static str> {
        if data.len() < 8 {
            return None;
        }

        // JPEG: FF D8 FF
        if data.starts_with(&[0xFF, 0xD8, 0xFF]) {
            return Some("image/jpeg");
        }

        // PNG: 89 50 4E 47 0D 0A 1A 0A
        if data.starts_with(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]) {
            return Some("image/png");
        }

        None
    }
}
