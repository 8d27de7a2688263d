//! Plain text rendering.
//!
//! This is the text-extraction view of a document: every paragraph with
//! its list marker, image alt text, and a form feed for each page break.

use crate::error::Result;
use crate::model::{Block, Document};

/// Convert a document to plain text.
pub fn to_text(doc: &Document) -> Result<String> {
    let mut chunks: Vec<String> = Vec::new();

    for block in &doc.blocks {
        match block {
            Block::Paragraph(p) => {
                if p.is_empty() {
                    continue;
                }
                let text = p.plain_text().replace('\u{a0}', " ");
                let chunk = match p.style.list_info {
                    Some(ref info) => format!(
                        "{}{} {}",
                        "  ".repeat(info.level as usize),
                        info.marker(),
                        text.trim()
                    ),
                    None => text.trim().to_string(),
                };
                chunks.push(chunk);
            }
            Block::Image {
                resource_id,
                alt_text,
                ..
            } => chunks.push(format!(
                "[image: {}]",
                alt_text.as_deref().unwrap_or(resource_id)
            )),
            Block::PageBreak => chunks.push("\u{c}".to_string()),
            Block::Spacer { .. } => {}
        }
    }

    Ok(chunks.join("\n"))
}
