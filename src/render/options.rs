//! Rendering options and configuration.

use crate::model::POINTS_PER_INCH;
use crate::style::StyleSheet;

/// Page size in points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSize {
    /// Width in points
    pub width: f32,
    /// Height in points
    pub height: f32,
}

impl PageSize {
    /// US Letter (8.5 x 11 inches).
    pub const LETTER: PageSize = PageSize {
        width: 612.0,
        height: 792.0,
    };

    /// A4 (210 x 297 mm).
    pub const A4: PageSize = PageSize {
        width: 595.0,
        height: 842.0,
    };

    /// Check if the page is in landscape orientation.
    pub fn is_landscape(&self) -> bool {
        self.width > self.height
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self::LETTER
    }
}

/// Page margins in points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Margins {
    /// Top margin
    pub top: f32,
    /// Right margin
    pub right: f32,
    /// Bottom margin
    pub bottom: f32,
    /// Left margin
    pub left: f32,
}

impl Margins {
    /// Same margin on every side.
    pub fn uniform(points: f32) -> Self {
        Self {
            top: points,
            right: points,
            bottom: points,
            left: points,
        }
    }
}

impl Default for Margins {
    fn default() -> Self {
        Self::uniform(0.75 * POINTS_PER_INCH)
    }
}

/// Options for rendering a document to PDF or DOCX.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Page size
    pub page_size: PageSize,

    /// Page margins
    pub margins: Margins,

    /// Style sheet resolving paragraph style labels
    pub styles: StyleSheet,

    /// Compress PDF content and image streams
    pub compress: bool,

    /// Indent per list nesting level, in points
    pub list_indent: f32,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the page size.
    pub fn with_page_size(mut self, size: PageSize) -> Self {
        self.page_size = size;
        self
    }

    /// Set the page margins.
    pub fn with_margins(mut self, margins: Margins) -> Self {
        self.margins = margins;
        self
    }

    /// Set the style sheet.
    pub fn with_styles(mut self, styles: StyleSheet) -> Self {
        self.styles = styles;
        self
    }

    /// Enable or disable stream compression.
    pub fn with_compression(mut self, compress: bool) -> Self {
        self.compress = compress;
        self
    }

    /// Set the indent per list level.
    pub fn with_list_indent(mut self, points: f32) -> Self {
        self.list_indent = points.max(0.0);
        self
    }

    /// Width available for content between the margins.
    pub fn content_width(&self) -> f32 {
        (self.page_size.width - self.margins.left - self.margins.right).max(0.0)
    }

    /// Height available for content between the margins.
    pub fn content_height(&self) -> f32 {
        (self.page_size.height - self.margins.top - self.margins.bottom).max(0.0)
    }

    /// Shrink an image size to fit the content area, keeping its aspect
    /// ratio. Images that already fit are returned unchanged.
    pub fn fit_image(&self, width: f32, height: f32) -> (f32, f32) {
        let mut scale = 1.0f32;
        if width > self.content_width() {
            scale = self.content_width() / width;
        }
        if height * scale > self.content_height() {
            scale = self.content_height() / height;
        }
        (width * scale, height * scale)
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            page_size: PageSize::LETTER,
            margins: Margins::default(),
            styles: StyleSheet::default(),
            compress: true,
            list_indent: 18.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = RenderOptions::default();
        assert_eq!(options.page_size, PageSize::LETTER);
        assert_eq!(options.margins.left, 54.0);
        assert_eq!(options.content_width(), 504.0);
        assert_eq!(options.content_height(), 684.0);
        assert!(options.compress);
    }

    #[test]
    fn test_builder() {
        let options = RenderOptions::new()
            .with_page_size(PageSize::A4)
            .with_margins(Margins::uniform(36.0))
            .with_compression(false)
            .with_list_indent(-5.0);

        assert_eq!(options.page_size, PageSize::A4);
        assert_eq!(options.content_width(), 523.0);
        assert!(!options.compress);
        assert_eq!(options.list_indent, 0.0);
        assert!(!options.page_size.is_landscape());
    }

    #[test]
    fn test_fit_image() {
        let options = RenderOptions::default();
        assert_eq!(options.fit_image(216.0, 216.0), (216.0, 216.0));
        assert_eq!(options.fit_image(1008.0, 100.0), (504.0, 50.0));
        assert_eq!(options.fit_image(100.0, 1368.0), (50.0, 684.0));
    }
}
