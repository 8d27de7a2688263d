//! Line breaking and pagination.
//!
//! Turns the block sequence into absolutely positioned items on pages.
//! Coordinates use PDF user space: points, origin at the bottom-left
//! corner of the page.

use super::fonts::{self, FontKey};
use crate::error::{Error, Result};
use crate::model::{Alignment, Block, Document, InlineContent, Paragraph};
use crate::render::RenderOptions;
use crate::style::{Color, StyleDef};
use log::warn;

const EPSILON: f32 = 0.01;

/// A positioned drawing instruction.
#[derive(Debug, Clone, PartialEq)]
pub enum Item {
    /// Encoded text drawn from a baseline origin
    Text {
        x: f32,
        y: f32,
        font: FontKey,
        size: f32,
        color: Color,
        text: Vec<u8>,
        word_spacing: f32,
    },
    /// Filled rectangle (bottom-left origin)
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        color: Color,
    },
    /// Image placement (bottom-left origin)
    Image {
        resource_id: String,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    },
    /// Clickable URI area
    Link {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        url: String,
    },
}

/// Items placed on one page, in painting order.
#[derive(Debug, Clone, Default)]
pub struct PageLayout {
    pub items: Vec<Item>,
}

impl PageLayout {
    /// Check if nothing was placed on the page.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Lay out a document. Always returns at least one page.
pub fn layout(doc: &Document, options: &RenderOptions) -> Result<Vec<PageLayout>> {
    let mut engine = LayoutEngine::new(options);

    for block in &doc.blocks {
        match block {
            Block::Paragraph(paragraph) => engine.paragraph(paragraph),
            Block::Image {
                resource_id,
                width,
                height,
                alignment,
                ..
            } => {
                if doc.get_resource(resource_id).is_none() {
                    return Err(Error::Image(format!(
                        "missing image resource: {}",
                        resource_id
                    )));
                }
                engine.image(resource_id, *width, *height, *alignment);
            }
            Block::Spacer { height } => engine.spacer(*height),
            Block::PageBreak => engine.page_break(),
        }
    }

    Ok(engine.finish())
}

/// A run of glyphs sharing one face, size, color and link target.
#[derive(Debug, Clone)]
struct Piece {
    font: FontKey,
    size: f32,
    color: Color,
    link: Option<String>,
    bytes: Vec<u8>,
}

impl Piece {
    fn width(&self) -> f32 {
        self.font.text_width(&self.bytes, self.size)
    }

    fn same_face(&self, other: &Piece) -> bool {
        self.font == other.font
            && self.size == other.size
            && self.color == other.color
            && self.link == other.link
    }

    fn with_bytes(&self, bytes: Vec<u8>) -> Piece {
        Piece {
            font: self.font,
            size: self.size,
            color: self.color,
            link: self.link.clone(),
            bytes,
        }
    }

    fn space_count(&self) -> usize {
        self.bytes.iter().filter(|&&b| b == b' ').count()
    }
}

enum Token {
    Word(Vec<Piece>),
    Space(Piece),
    Break,
}

#[derive(Debug, Default)]
struct Line {
    pieces: Vec<Piece>,
    width: f32,
}

impl Line {
    fn push(&mut self, piece: Piece) {
        self.width += piece.width();
        match self.pieces.last_mut() {
            Some(last) if last.same_face(&piece) => last.bytes.extend(piece.bytes),
            _ => self.pieces.push(piece),
        }
    }

    fn trim_end(&mut self) {
        while let Some(last) = self.pieces.last_mut() {
            while last.bytes.last() == Some(&b' ') {
                last.bytes.pop();
            }
            if last.bytes.is_empty() {
                self.pieces.pop();
            } else {
                break;
            }
        }
        self.width = self.pieces.iter().map(Piece::width).sum();
    }

    fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    fn space_count(&self) -> usize {
        self.pieces.iter().map(Piece::space_count).sum()
    }

    fn max_size(&self) -> f32 {
        self.pieces.iter().map(|p| p.size).fold(0.0, f32::max)
    }

    fn height(&self, def: &StyleDef) -> f32 {
        def.leading.max(self.max_size() * 1.2)
    }
}

fn flush_word(tokens: &mut Vec<Token>, word: &mut Vec<Piece>) {
    if !word.is_empty() {
        tokens.push(Token::Word(std::mem::take(word)));
    }
}

fn tokenize(paragraph: &Paragraph, def: &StyleDef) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut word: Vec<Piece> = Vec::new();

    for inline in &paragraph.content {
        let (text, style, link) = match inline {
            InlineContent::Text(run) => (run.text.as_str(), Some(&run.style), None),
            InlineContent::Link { text, url } => (text.as_str(), None, Some(url.clone())),
            InlineContent::LineBreak => {
                flush_word(&mut tokens, &mut word);
                tokens.push(Token::Break);
                continue;
            }
        };

        let template = Piece {
            font: FontKey::new(
                def.font,
                def.bold || style.is_some_and(|s| s.bold),
                def.italic || style.is_some_and(|s| s.italic),
            ),
            size: style.and_then(|s| s.font_size).unwrap_or(def.size),
            color: style.and_then(|s| s.color).unwrap_or(def.color),
            link,
            bytes: Vec::new(),
        };

        for (i, segment) in text.split('\n').enumerate() {
            if i > 0 {
                flush_word(&mut tokens, &mut word);
                tokens.push(Token::Break);
            }
            for byte in fonts::encode(segment) {
                if byte == b' ' {
                    flush_word(&mut tokens, &mut word);
                    tokens.push(Token::Space(template.with_bytes(vec![b' '])));
                    continue;
                }
                match word.last_mut() {
                    Some(last) if last.same_face(&template) => last.bytes.push(byte),
                    _ => word.push(template.with_bytes(vec![byte])),
                }
            }
        }
    }

    flush_word(&mut tokens, &mut word);
    tokens
}

/// Greedy line breaking. Words wider than a full line are split between
/// glyphs.
fn break_lines(tokens: Vec<Token>, avail: f32) -> Vec<Line> {
    let mut lines = Vec::new();
    let mut line = Line::default();

    for token in tokens {
        match token {
            Token::Break => {
                line.trim_end();
                lines.push(std::mem::take(&mut line));
            }
            Token::Space(piece) => {
                if !line.is_empty() {
                    line.push(piece);
                }
            }
            Token::Word(pieces) => {
                let width: f32 = pieces.iter().map(Piece::width).sum();
                if !line.is_empty() && line.width + width > avail + EPSILON {
                    line.trim_end();
                    lines.push(std::mem::take(&mut line));
                }
                if width <= avail + EPSILON {
                    for piece in pieces {
                        line.push(piece);
                    }
                    continue;
                }
                for piece in &pieces {
                    for &byte in &piece.bytes {
                        let glyph = piece.with_bytes(vec![byte]);
                        if !line.is_empty() && line.width + glyph.width() > avail + EPSILON {
                            lines.push(std::mem::take(&mut line));
                        }
                        line.push(glyph);
                    }
                }
            }
        }
    }

    line.trim_end();
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

struct LayoutEngine<'a> {
    options: &'a RenderOptions,
    pages: Vec<PageLayout>,
    page: PageLayout,
    cursor: f32,
    /// Nothing has been placed on the current page yet
    fresh: bool,
}

impl<'a> LayoutEngine<'a> {
    fn new(options: &'a RenderOptions) -> Self {
        Self {
            options,
            pages: Vec::new(),
            page: PageLayout::default(),
            cursor: options.page_size.height - options.margins.top,
            fresh: true,
        }
    }

    fn remaining(&self) -> f32 {
        self.cursor - self.options.margins.bottom
    }

    fn new_page(&mut self) {
        let page = std::mem::take(&mut self.page);
        self.pages.push(page);
        self.cursor = self.options.page_size.height - self.options.margins.top;
        self.fresh = true;
    }

    /// Move to a new page unless `height` fits. Content taller than an
    /// empty page is placed anyway and overflows the bottom margin.
    fn ensure(&mut self, height: f32) {
        if height > self.remaining() + EPSILON && !self.fresh {
            self.new_page();
        }
    }

    fn finish(self) -> Vec<PageLayout> {
        let LayoutEngine {
            mut pages, page, ..
        } = self;
        if !page.is_empty() || pages.is_empty() {
            pages.push(page);
        }
        pages
    }

    fn paragraph(&mut self, paragraph: &Paragraph) {
        if paragraph.is_empty() {
            return;
        }

        let def = self.options.styles.get(paragraph.style.name);
        let alignment = paragraph.style.alignment.unwrap_or(def.alignment);
        let padding = if def.background.is_some() {
            def.border_padding
        } else {
            0.0
        };
        let margins = self.options.margins;

        let mut left = margins.left + def.left_indent + padding;
        let right =
            margins.left + self.options.content_width() - def.right_indent - padding;

        let mut marker = None;
        if let Some(info) = &paragraph.style.list_info {
            let indent = self.options.list_indent;
            let marker_x = left + indent * info.level as f32;
            left = marker_x + indent;
            marker = Some((marker_x, fonts::encode(&info.marker())));
        }

        let avail = (right - left).max(1.0);
        let lines = break_lines(tokenize(paragraph, &def), avail);
        if lines.is_empty() {
            return;
        }

        if !self.fresh {
            self.cursor -= def.space_before;
        }

        if let Some(color) = def.background {
            let total: f32 = lines.iter().map(|l| l.height(&def)).sum::<f32>() + 2.0 * padding;
            self.ensure(total);
            self.page.items.push(Item::Rect {
                x: margins.left + def.left_indent,
                y: self.cursor - total,
                width: self.options.content_width() - def.left_indent - def.right_indent,
                height: total,
                color,
            });
            self.cursor -= padding;
        }

        let last = lines.len() - 1;
        for (i, line) in lines.iter().enumerate() {
            let height = line.height(&def);
            if def.background.is_none() {
                self.ensure(height);
            }
            let baseline = self.cursor - height * 0.8;

            if i == 0 {
                if let Some((x, text)) = marker.take() {
                    self.page.items.push(Item::Text {
                        x,
                        y: baseline,
                        font: FontKey::new(def.font, def.bold, def.italic),
                        size: def.size,
                        color: def.color,
                        text,
                        word_spacing: 0.0,
                    });
                }
            }

            self.place_line(line, left, avail, baseline, alignment, i == last);
            self.cursor -= height;
            self.fresh = false;
        }

        self.cursor -= padding + def.space_after;
    }

    fn place_line(
        &mut self,
        line: &Line,
        left: f32,
        avail: f32,
        baseline: f32,
        alignment: Alignment,
        last: bool,
    ) {
        let slack = (avail - line.width).max(0.0);
        let spaces = line.space_count();
        let (mut x, word_spacing) = match alignment {
            Alignment::Left => (left, 0.0),
            Alignment::Center => (left + slack / 2.0, 0.0),
            Alignment::Right => (left + slack, 0.0),
            Alignment::Justify if !last && spaces > 0 => (left, slack / spaces as f32),
            Alignment::Justify => (left, 0.0),
        };

        for piece in &line.pieces {
            let width = piece.width() + word_spacing * piece.space_count() as f32;
            self.page.items.push(Item::Text {
                x,
                y: baseline,
                font: piece.font,
                size: piece.size,
                color: piece.color,
                text: piece.bytes.clone(),
                word_spacing,
            });
            if let Some(url) = &piece.link {
                self.page.items.push(Item::Link {
                    x,
                    y: baseline - piece.size * 0.25,
                    width,
                    height: piece.size * 1.2,
                    url: url.clone(),
                });
            }
            x += width;
        }
    }

    fn image(&mut self, resource_id: &str, width: f32, height: f32, alignment: Alignment) {
        if width <= 0.0 || height <= 0.0 {
            warn!("Skipping image {} with empty size", resource_id);
            return;
        }

        let max_width = self.options.content_width();
        let (width, height) = self.options.fit_image(width, height);

        self.ensure(height);
        let left = self.options.margins.left;
        let x = match alignment {
            Alignment::Left | Alignment::Justify => left,
            Alignment::Center => left + (max_width - width) / 2.0,
            Alignment::Right => left + max_width - width,
        };
        self.page.items.push(Item::Image {
            resource_id: resource_id.to_string(),
            x,
            y: self.cursor - height,
            width,
            height,
        });
        self.cursor -= height;
        self.fresh = false;
    }

    /// A spacer that does not fit ends the page and is dropped.
    fn spacer(&mut self, height: f32) {
        if height > self.remaining() + EPSILON && !self.fresh {
            self.new_page();
            return;
        }
        self.cursor -= height.min(self.remaining().max(0.0));
        self.fresh = false;
    }

    fn page_break(&mut self) {
        if !self.fresh {
            self.new_page();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Paragraph, Resource};
    use crate::style::StyleName;

    fn text_items(page: &PageLayout) -> Vec<(f32, f32, String)> {
        page.items
            .iter()
            .filter_map(|item| match item {
                Item::Text { x, y, text, .. } => {
                    Some((*x, *y, String::from_utf8_lossy(text).into_owned()))
                }
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_single_paragraph() {
        let mut doc = Document::new();
        doc.add_paragraph(Paragraph::with_text("Hello world"));

        let options = RenderOptions::default();
        let pages = layout(&doc, &options).unwrap();
        assert_eq!(pages.len(), 1);

        let texts = text_items(&pages[0]);
        assert_eq!(texts.len(), 1);
        assert_eq!(texts[0].0, options.margins.left);
        assert_eq!(texts[0].2, "Hello world");
    }

    #[test]
    fn test_empty_document_has_one_page() {
        let pages = layout(&Document::new(), &RenderOptions::default()).unwrap();
        assert_eq!(pages.len(), 1);
        assert!(pages[0].is_empty());
    }

    #[test]
    fn test_page_breaks_collapse() {
        let mut doc = Document::new();
        doc.add_paragraph(Paragraph::with_text("one"));
        doc.push(Block::PageBreak);
        doc.push(Block::PageBreak);
        doc.add_paragraph(Paragraph::with_text("two"));
        doc.push(Block::PageBreak);

        let pages = layout(&doc, &RenderOptions::default()).unwrap();
        assert_eq!(pages.len(), 2);
        assert_eq!(text_items(&pages[1])[0].2, "two");
    }

    #[test]
    fn test_wrapping() {
        let mut doc = Document::new();
        doc.add_paragraph(Paragraph::with_text("word ".repeat(200)));

        let pages = layout(&doc, &RenderOptions::default()).unwrap();
        let texts = text_items(&pages[0]);
        assert!(texts.len() > 5);
        // Lines descend the page
        assert!(texts.windows(2).all(|w| w[1].1 < w[0].1));
        // No line ends with a space
        assert!(texts.iter().all(|t| !t.2.ends_with(' ')));
    }

    #[test]
    fn test_overflow_to_next_page() {
        let mut doc = Document::new();
        for i in 0..80 {
            doc.add_paragraph(Paragraph::with_text(format!("Paragraph {}", i)));
        }

        let options = RenderOptions::default();
        let pages = layout(&doc, &options).unwrap();
        assert!(pages.len() > 1);
        for page in &pages {
            for (_, y, _) in text_items(page) {
                assert!(y >= options.margins.bottom);
            }
        }
    }

    #[test]
    fn test_centered_title() {
        let mut doc = Document::new();
        doc.add_paragraph(Paragraph::styled(StyleName::Title, "GatherSync"));

        let options = RenderOptions::default();
        let pages = layout(&doc, &options).unwrap();
        let (x, _, _) = text_items(&pages[0])[0].clone();
        assert!(x > options.margins.left + 100.0);
    }

    #[test]
    fn test_background_panel_and_link() {
        let mut doc = Document::new();
        let mut p = Paragraph::styled(StyleName::Code, "");
        p.content.clear();
        p.add_link("https://example.com", "https://example.com");
        doc.add_paragraph(p);

        let pages = layout(&doc, &RenderOptions::default()).unwrap();
        let items = &pages[0].items;
        assert!(matches!(items[0], Item::Rect { .. }));
        assert!(items.iter().any(
            |item| matches!(item, Item::Link { url, .. } if url == "https://example.com")
        ));
    }

    #[test]
    fn test_list_marker() {
        let mut doc = Document::new();
        doc.add_paragraph(Paragraph::numbered(3, "Enter the URL"));

        let options = RenderOptions::default();
        let pages = layout(&doc, &options).unwrap();
        let texts = text_items(&pages[0]);
        assert_eq!(texts[0].2, "3.");
        assert_eq!(texts[0].0, options.margins.left);
        assert_eq!(texts[1].0, options.margins.left + options.list_indent);
    }

    #[test]
    fn test_missing_image_resource() {
        let mut doc = Document::new();
        doc.push(Block::image("qr-code", 100.0, 100.0));
        assert!(matches!(
            layout(&doc, &RenderOptions::default()),
            Err(Error::Image(_))
        ));
    }

    #[test]
    fn test_image_scaled_to_content_width() {
        let mut doc = Document::new();
        doc.add_resource(
            "wide",
            Resource {
                data: Vec::new(),
                mime_type: "image/png".to_string(),
                filename: None,
                width: 2000,
                height: 1000,
            },
        );
        doc.push(Block::image("wide", 2000.0, 1000.0));

        let options = RenderOptions::default();
        let pages = layout(&doc, &options).unwrap();
        match &pages[0].items[0] {
            Item::Image { x, width, height, .. } => {
                assert_eq!(*x, options.margins.left);
                assert!((width - options.content_width()).abs() < 0.01);
                assert!((height - options.content_width() / 2.0).abs() < 0.01);
            }
            other => panic!("unexpected item: {:?}", other),
        }
    }
}
