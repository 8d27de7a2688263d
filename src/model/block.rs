//! Content blocks.

use super::{Alignment, Paragraph};
use serde::{Deserialize, Serialize};

/// Points per inch.
pub const POINTS_PER_INCH: f32 = 72.0;

/// A content block in the document sequence.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    /// A paragraph of text (headings are paragraphs with a heading style)
    Paragraph(Paragraph),

    /// An image reference
    Image {
        /// Resource ID for the image
        resource_id: String,
        /// Alternative text
        alt_text: Option<String>,
        /// Rendered width in points
        width: f32,
        /// Rendered height in points
        height: f32,
        /// Horizontal placement
        alignment: Alignment,
    },

    /// Fixed vertical space
    Spacer {
        /// Height in points
        height: f32,
    },

    /// Forces the following content onto a new page
    PageBreak,
}

impl Block {
    /// Create a centered image block with dimensions in points.
    pub fn image(resource_id: impl Into<String>, width: f32, height: f32) -> Self {
        Block::Image {
            resource_id: resource_id.into(),
            alt_text: None,
            width,
            height,
            alignment: Alignment::Center,
        }
    }

    /// Create a spacer measured in points.
    pub fn spacer(height: f32) -> Self {
        Block::Spacer {
            height: height.max(0.0),
        }
    }

    /// Create a spacer measured in inches.
    pub fn spacer_inches(inches: f32) -> Self {
        Self::spacer(inches * POINTS_PER_INCH)
    }

    /// Check if this block is a paragraph.
    pub fn is_paragraph(&self) -> bool {
        matches!(self, Block::Paragraph(_))
    }

    /// Check if this block is an image.
    pub fn is_image(&self) -> bool {
        matches!(self, Block::Image { .. })
    }

    /// Check if this block is a page break.
    pub fn is_page_break(&self) -> bool {
        matches!(self, Block::PageBreak)
    }

    /// Get the paragraph if this block is one.
    pub fn as_paragraph(&self) -> Option<&Paragraph> {
        match self {
            Block::Paragraph(p) => Some(p),
            _ => None,
        }
    }
}

impl From<Paragraph> for Block {
    fn from(paragraph: Paragraph) -> Self {
        Block::Paragraph(paragraph)
    }
}
