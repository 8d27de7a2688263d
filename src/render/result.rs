//! Rendering result with statistics.

use crate::export::OutputFormat;
use crate::model::DocumentStats;

/// Result of rendering a document: the encoded bytes plus statistics.
#[derive(Debug, Clone)]
pub struct RenderOutput {
    /// Encoded document
    pub data: Vec<u8>,

    /// Output format of `data`
    pub format: OutputFormat,

    /// Laid-out page count (PDF only; Word paginates on open)
    pub page_count: Option<u32>,

    /// Block counts of the source document
    pub stats: DocumentStats,
}

impl RenderOutput {
    /// Create a new render output.
    pub fn new(data: Vec<u8>, format: OutputFormat, stats: DocumentStats) -> Self {
        Self {
            data,
            format,
            page_count: None,
            stats,
        }
    }

    /// Set the page count.
    pub fn with_page_count(mut self, pages: u32) -> Self {
        self.page_count = Some(pages);
        self
    }

    /// Get the content length in bytes.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if nothing was produced.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
