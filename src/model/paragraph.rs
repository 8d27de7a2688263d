//! Paragraph and text-level types.

use crate::markup;
use crate::style::{Color, StyleName};
use serde::{Deserialize, Serialize};

/// A paragraph of text content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paragraph {
    /// Text runs in the paragraph
    pub content: Vec<InlineContent>,

    /// Paragraph style
    pub style: ParagraphStyle,
}

impl Paragraph {
    /// Create a new empty body paragraph.
    pub fn new() -> Self {
        Self {
            content: Vec::new(),
            style: ParagraphStyle::default(),
        }
    }

    /// Create a body paragraph with plain text.
    pub fn with_text(text: impl Into<String>) -> Self {
        let mut p = Self::new();
        p.add_text(text);
        p
    }

    /// Create a paragraph with plain text and a style label.
    pub fn styled(name: StyleName, text: impl Into<String>) -> Self {
        let mut p = Self::with_text(text);
        p.style.name = name;
        p
    }

    /// Create a paragraph from inline markup (`<b>`, `<i>`, `<a href>`).
    pub fn markup(name: StyleName, source: &str) -> Self {
        Self {
            content: markup::parse(source),
            style: ParagraphStyle::named(name),
        }
    }

    /// Create a heading paragraph.
    ///
    /// Level 1 maps to [`StyleName::Heading`], level 2 to
    /// [`StyleName::Subheading`] and anything deeper to [`StyleName::Label`].
    pub fn heading(text: impl Into<String>, level: u8) -> Self {
        let name = match level {
            0 | 1 => StyleName::Heading,
            2 => StyleName::Subheading,
            _ => StyleName::Label,
        };
        Self::styled(name, text)
    }

    /// Create a numbered list item from markup.
    pub fn numbered(number: u32, source: &str) -> Self {
        Self::markup(StyleName::Body, source).in_list(ListInfo::numbered(0, number))
    }

    /// Create a bulleted list item from markup.
    pub fn bullet(level: u8, source: &str) -> Self {
        Self::markup(StyleName::Body, source).in_list(ListInfo::bullet(level))
    }

    /// Override the style's alignment.
    pub fn aligned(mut self, alignment: Alignment) -> Self {
        self.style.alignment = Some(alignment);
        self
    }

    /// Attach list information.
    pub fn in_list(mut self, info: ListInfo) -> Self {
        self.style.list_info = Some(info);
        self
    }

    /// Add plain text to the paragraph.
    pub fn add_text(&mut self, text: impl Into<String>) {
        self.content.push(InlineContent::Text(TextRun {
            text: text.into(),
            style: TextStyle::default(),
        }));
    }

    /// Add a styled text run.
    pub fn add_run(&mut self, run: TextRun) {
        self.content.push(InlineContent::Text(run));
    }

    /// Add a hyperlink.
    pub fn add_link(&mut self, text: impl Into<String>, url: impl Into<String>) {
        self.content.push(InlineContent::Link {
            text: text.into(),
            url: url.into(),
        });
    }

    /// Add a line break.
    pub fn add_line_break(&mut self) {
        self.content.push(InlineContent::LineBreak);
    }

    /// Get plain text content of the paragraph.
    pub fn plain_text(&self) -> String {
        self.content
            .iter()
            .map(|c| match c {
                InlineContent::Text(run) => run.text.clone(),
                InlineContent::LineBreak => "\n".to_string(),
                InlineContent::Link { text, .. } => text.clone(),
            })
            .collect()
    }

    /// Check if the paragraph is empty.
    pub fn is_empty(&self) -> bool {
        self.content.is_empty() || self.plain_text().trim().is_empty()
    }

    /// Check if this is a heading.
    pub fn is_heading(&self) -> bool {
        self.style.name.is_heading()
    }

    /// Check if this is a list item.
    pub fn is_list_item(&self) -> bool {
        self.style.list_info.is_some()
    }
}

impl Default for Paragraph {
    fn default() -> Self {
        Self::new()
    }
}

/// Inline content within a paragraph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InlineContent {
    /// A text run with styling
    Text(TextRun),

    /// A line break
    LineBreak,

    /// A hyperlink
    Link {
        /// Link text
        text: String,
        /// Link URL
        url: String,
    },
}

/// A run of text with consistent styling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextRun {
    /// The text content
    pub text: String,

    /// Text styling
    pub style: TextStyle,
}

impl TextRun {
    /// Create a new text run with default style.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: TextStyle::default(),
        }
    }

    /// Create a bold text run.
    pub fn bold(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: TextStyle {
                bold: true,
                ..Default::default()
            },
        }
    }

    /// Create an italic text run.
    pub fn italic(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: TextStyle {
                italic: true,
                ..Default::default()
            },
        }
    }

    /// Check if this run is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Run-level overrides on top of the paragraph style.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    /// Bold text
    pub bold: bool,

    /// Italic text
    pub italic: bool,

    /// Font size in points
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f32>,

    /// Text color
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
}

impl TextStyle {
    /// Check if any styling is applied.
    pub fn has_styling(&self) -> bool {
        self.bold || self.italic || self.font_size.is_some() || self.color.is_some()
    }
}

/// The style label of a paragraph plus per-paragraph overrides.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParagraphStyle {
    /// Style label resolved through the style sheet
    pub name: StyleName,

    /// Alignment override
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alignment: Option<Alignment>,

    /// List information if this is a list item
    #[serde(skip_serializing_if = "Option::is_none")]
    pub list_info: Option<ListInfo>,
}

impl ParagraphStyle {
    /// Style with the given label and no overrides.
    pub fn named(name: StyleName) -> Self {
        Self {
            name,
            ..Default::default()
        }
    }
}

/// Text alignment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    /// Left alignment (default)
    #[default]
    Left,
    /// Center alignment
    Center,
    /// Right alignment
    Right,
    /// Justified alignment
    Justify,
}

/// Information about a list item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListInfo {
    /// List style (ordered or unordered)
    pub style: ListStyle,

    /// Nesting level (0 = top level)
    pub level: u8,

    /// Item number for ordered lists
    pub item_number: Option<u32>,
}

impl ListInfo {
    /// Create a new bulleted list item.
    pub fn bullet(level: u8) -> Self {
        Self {
            style: ListStyle::Unordered { marker: '•' },
            level,
            item_number: None,
        }
    }

    /// Create a new numbered list item.
    pub fn numbered(level: u8, number: u32) -> Self {
        Self {
            style: ListStyle::Ordered,
            level,
            item_number: Some(number),
        }
    }

    /// Check if this is an ordered list item.
    pub fn is_ordered(&self) -> bool {
        matches!(self.style, ListStyle::Ordered)
    }

    /// The marker rendered in front of the item text ("3." or "•").
    pub fn marker(&self) -> String {
        match self.style {
            ListStyle::Ordered => format!("{}.", self.item_number.unwrap_or(1)),
            ListStyle::Unordered { marker } => marker.to_string(),
        }
    }
}

/// List style.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ListStyle {
    /// Ordered (decimal) list
    Ordered,
    /// Unordered (bulleted) list
    Unordered {
        /// Bullet character
        marker: char,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paragraph_plain_text() {
        let mut p = Paragraph::new();
        p.add_text("Hello ");
        p.add_run(TextRun::bold("world"));
        p.add_text("!");

        assert_eq!(p.plain_text(), "Hello world!");
    }

    #[test]
    fn test_heading_levels() {
        assert_eq!(Paragraph::heading("A", 1).style.name, StyleName::Heading);
        assert_eq!(Paragraph::heading("B", 2).style.name, StyleName::Subheading);
        assert_eq!(Paragraph::heading("C", 4).style.name, StyleName::Label);
        assert!(Paragraph::heading("A", 1).is_heading());
        assert!(!Paragraph::with_text("body").is_heading());
    }

    #[test]
    fn test_markup_paragraph() {
        let p = Paragraph::numbered(2, "Search for <b>\"Expo Go\"</b>");
        assert_eq!(p.plain_text(), "Search for \"Expo Go\"");
        assert!(p.is_list_item());
        assert_eq!(p.style.list_info.as_ref().unwrap().marker(), "2.");
    }

    #[test]
    fn test_text_style() {
        let style = TextStyle::default();
        assert!(!style.has_styling());

        let bold_style = TextStyle {
            bold: true,
            ..Default::default()
        };
        assert!(bold_style.has_styling());
    }

    #[test]
    fn test_list_info() {
        let bullet = ListInfo::bullet(1);
        assert_eq!(bullet.level, 1);
        assert_eq!(bullet.marker(), "•");
        assert!(!bullet.is_ordered());

        let numbered = ListInfo::numbered(0, 5);
        assert_eq!(numbered.item_number, Some(5));
        assert!(numbered.is_ordered());
    }
}
