//! Document-level types.

use super::{Block, Paragraph, Resource};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// An ordered sequence of content blocks plus the resources they reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Document metadata (title, author, etc.)
    pub metadata: Metadata,

    /// Content blocks in render order
    pub blocks: Vec<Block>,

    /// Embedded resources (images)
    pub resources: HashMap<String, Resource>,
}

impl Document {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self {
            metadata: Metadata::default(),
            blocks: Vec::new(),
            resources: HashMap::new(),
        }
    }

    /// Append a block.
    pub fn push(&mut self, block: impl Into<Block>) {
        self.blocks.push(block.into());
    }

    /// Append a paragraph.
    pub fn add_paragraph(&mut self, paragraph: Paragraph) {
        self.blocks.push(Block::Paragraph(paragraph));
    }

    /// Add a resource to the document.
    pub fn add_resource(&mut self, id: impl Into<String>, resource: Resource) {
        self.resources.insert(id.into(), resource);
    }

    /// Get a resource by ID.
    pub fn get_resource(&self, id: &str) -> Option<&Resource> {
        self.resources.get(id)
    }

    /// Number of blocks.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Check if the document has any blocks.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Iterate over paragraphs in order.
    pub fn paragraphs(&self) -> impl Iterator<Item = &Paragraph> {
        self.blocks.iter().filter_map(Block::as_paragraph)
    }

    /// Get plain text content of the entire document.
    pub fn plain_text(&self) -> String {
        self.paragraphs()
            .map(Paragraph::plain_text)
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// Count blocks by kind.
    pub fn stats(&self) -> DocumentStats {
        let mut stats = DocumentStats::default();
        for block in &self.blocks {
            match block {
                Block::Paragraph(p) => {
                    stats.paragraph_count += 1;
                    if p.is_heading() {
                        stats.heading_count += 1;
                    }
                    if p.is_list_item() {
                        stats.list_item_count += 1;
                    }
                    stats.word_count += p.plain_text().split_whitespace().count() as u32;
                }
                Block::Image { .. } => stats.image_count += 1,
                Block::Spacer { .. } => stats.spacer_count += 1,
                Block::PageBreak => stats.page_break_count += 1,
            }
        }
        stats
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

/// Document metadata written into the PDF info dictionary and DOCX core
/// properties.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Metadata {
    /// Document title
    pub title: Option<String>,

    /// Document author
    pub author: Option<String>,

    /// Document subject
    pub subject: Option<String>,

    /// Keywords
    pub keywords: Option<String>,

    /// Creator application
    pub creator: Option<String>,

    /// Creation date
    pub created: Option<DateTime<Utc>>,
}

/// Block counts for a document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentStats {
    /// Number of paragraphs (headings included)
    pub paragraph_count: u32,

    /// Number of heading paragraphs
    pub heading_count: u32,

    /// Number of list items
    pub list_item_count: u32,

    /// Number of images
    pub image_count: u32,

    /// Number of spacers
    pub spacer_count: u32,

    /// Number of explicit page breaks
    pub page_break_count: u32,

    /// Whitespace-separated words across all paragraphs
    pub word_count: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::StyleName;

    #[test]
    fn test_document_new() {
        let doc = Document::new();
        assert!(doc.is_empty());
        assert_eq!(doc.len(), 0);
    }

    #[test]
    fn test_document_order_and_text() {
        let mut doc = Document::new();
        doc.add_paragraph(Paragraph::styled(StyleName::Title, "Welcome"));
        doc.push(Block::spacer(12.0));
        doc.add_paragraph(Paragraph::with_text("Body text"));

        assert_eq!(doc.len(), 3);
        assert_eq!(doc.plain_text(), "Welcome\n\nBody text");
    }

    #[test]
    fn test_stats() {
        let mut doc = Document::new();
        doc.add_paragraph(Paragraph::heading("Quick Start Guide", 1));
        doc.add_paragraph(Paragraph::numbered(1, "Open the <b>App Store</b>"));
        doc.push(Block::spacer(7.2));
        doc.push(Block::PageBreak);
        doc.push(Block::image("qr", 216.0, 216.0));

        let stats = doc.stats();
        assert_eq!(stats.paragraph_count, 2);
        assert_eq!(stats.heading_count, 1);
        assert_eq!(stats.list_item_count, 1);
        assert_eq!(stats.image_count, 1);
        assert_eq!(stats.spacer_count, 1);
        assert_eq!(stats.page_break_count, 1);
        assert_eq!(stats.word_count, 7);
    }
}
