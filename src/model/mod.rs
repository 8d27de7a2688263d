//! Document model types.
//!
//! A document is an ordered sequence of blocks (paragraphs, images,
//! spacers, page breaks). Each paragraph carries a style label that the
//! renderers resolve through a [`crate::style::StyleSheet`].

mod block;
mod document;
mod paragraph;
mod resource;

pub use block::{Block, POINTS_PER_INCH};
pub use document::{Document, DocumentStats, Metadata};
pub use paragraph::{
    Alignment, InlineContent, ListInfo, ListStyle, Paragraph, ParagraphStyle, TextRun, TextStyle,
};
pub use resource::Resource;
