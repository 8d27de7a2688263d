//! DOCX rendering.
//!
//! Paragraph styles come from the style sheet; page setup, list numbering,
//! page breaks and pictures are set per paragraph while walking the blocks.
//! Packaging is left to `docx-rs`.

mod numbering;
mod styles;

use self::numbering::{ListNumbering, MAX_LIST_LEVEL};
use self::styles::HYPERLINK_STYLE;
use crate::error::{Error, Result};
use crate::model::{
    Alignment, Block, Document, InlineContent, Metadata, Paragraph, Resource, TextStyle,
};
use crate::render::RenderOptions;
use chrono::SecondsFormat;
use docx_rs::{
    AlignmentType, BreakType, Docx, Hyperlink, HyperlinkType, IndentLevel, LineSpacing,
    LineSpacingType, NumberingId, PageMargin, Pic, Run,
};
use log::{debug, warn};
use std::io::Cursor;

/// Points to twentieths of a point.
fn twips(points: f32) -> i32 {
    (points * 20.0).round() as i32
}

/// Points to half-points (font sizes).
fn half_points(points: f32) -> usize {
    (points * 2.0).round().max(1.0) as usize
}

/// Points to English Metric Units (picture extents).
fn emu(points: f32) -> u32 {
    (points * 12700.0).round() as u32
}

fn alignment_type(alignment: Alignment) -> AlignmentType {
    match alignment {
        Alignment::Left => AlignmentType::Left,
        Alignment::Center => AlignmentType::Center,
        Alignment::Right => AlignmentType::Right,
        Alignment::Justify => AlignmentType::Both,
    }
}

/// Render a document to DOCX bytes.
pub fn to_docx(doc: &Document, options: &RenderOptions) -> Result<Vec<u8>> {
    let size = options.page_size;
    let margins = options.margins;
    let mut docx = Docx::new()
        .page_size(twips(size.width) as u32, twips(size.height) as u32)
        .page_margin(
            PageMargin::new()
                .top(twips(margins.top) as _)
                .right(twips(margins.right) as _)
                .bottom(twips(margins.bottom) as _)
                .left(twips(margins.left) as _),
        );
    docx = with_metadata(docx, &doc.metadata);
    docx = styles::add_styles(docx, &options.styles);

    let mut body = BodyWriter::new(doc, options);
    for block in &doc.blocks {
        body.block(block)?;
    }
    let BodyWriter {
        paragraphs,
        numbering,
        pictures,
        ..
    } = body;

    debug!(
        "Built DOCX body: {} paragraphs, {} numbering instances, {} pictures",
        paragraphs.len(),
        numbering.len(),
        pictures
    );
    docx = numbering.add_to(docx);
    docx = paragraphs
        .into_iter()
        .fold(docx, |docx, paragraph| docx.add_paragraph(paragraph));

    let mut buffer = Vec::new();
    docx.build()
        .pack(&mut Cursor::new(&mut buffer))
        .map_err(|e| Error::Docx(format!("failed to pack document: {}", e)))?;
    debug!("Packaged DOCX: {} bytes", buffer.len());
    Ok(buffer)
}

/// Creation dates go into the core properties, descriptive fields into
/// custom properties.
fn with_metadata(mut docx: Docx, metadata: &Metadata) -> Docx {
    if let Some(created) = metadata.created {
        let stamp = created.to_rfc3339_opts(SecondsFormat::Secs, true);
        docx = docx.created_at(&stamp).updated_at(&stamp);
    }
    let fields = [
        ("Title", &metadata.title),
        ("Author", &metadata.author),
        ("Subject", &metadata.subject),
        ("Keywords", &metadata.keywords),
        ("Creator", &metadata.creator),
    ];
    for (name, value) in fields {
        if let Some(value) = value {
            docx = docx.custom_property(name, value);
        }
    }
    docx
}

struct BodyWriter<'a> {
    doc: &'a Document,
    options: &'a RenderOptions,
    paragraphs: Vec<docx_rs::Paragraph>,
    numbering: ListNumbering,
    pictures: usize,
    pending_page_break: bool,
}

impl<'a> BodyWriter<'a> {
    fn new(doc: &'a Document, options: &'a RenderOptions) -> Self {
        Self {
            doc,
            options,
            paragraphs: Vec::new(),
            numbering: ListNumbering::new(options.list_indent),
            pictures: 0,
            pending_page_break: false,
        }
    }

    fn block(&mut self, block: &Block) -> Result<()> {
        match block {
            Block::Paragraph(paragraph) => {
                if !paragraph.is_empty() {
                    self.paragraph(paragraph);
                }
            }
            Block::Image {
                resource_id,
                width,
                height,
                alignment,
                ..
            } => self.image(resource_id, *width, *height, *alignment)?,
            Block::Spacer { height } => self.spacer(*height),
            Block::PageBreak => {
                // Breaks before any content, or repeated breaks, add nothing.
                if !self.paragraphs.is_empty() {
                    self.pending_page_break = true;
                }
            }
        }
        Ok(())
    }

    /// Append a paragraph, carrying over a pending page break.
    fn push(&mut self, mut paragraph: docx_rs::Paragraph) {
        if std::mem::take(&mut self.pending_page_break) {
            paragraph = paragraph.page_break_before(true);
        }
        self.paragraphs.push(paragraph);
    }

    fn paragraph(&mut self, paragraph: &Paragraph) {
        let name = paragraph.style.name;
        let def = self.options.styles.get(name);

        let mut p = docx_rs::Paragraph::new().style(name.docx_style_id()).line_spacing(
            LineSpacing::new()
                .before(twips(def.space_before) as _)
                .after(twips(def.space_after) as _)
                .line(twips(def.leading) as _)
                .line_rule(LineSpacingType::AtLeast),
        );
        if name.is_heading() {
            p = p.keep_next(true);
        }
        if let Some(info) = &paragraph.style.list_info {
            let num_id = self.numbering.num_id(info);
            let level = (info.level as usize).min(MAX_LIST_LEVEL);
            p = p.numbering(NumberingId::new(num_id), IndentLevel::new(level));
        }
        if let Some(alignment) = paragraph.style.alignment {
            p = p.align(alignment_type(alignment));
        }

        for inline in &paragraph.content {
            match inline {
                InlineContent::Text(run) => {
                    if let Some(run) = text_run(&run.text, &run.style) {
                        p = p.add_run(run);
                    }
                }
                InlineContent::LineBreak => {
                    p = p.add_run(Run::new().add_break(BreakType::TextWrapping));
                }
                InlineContent::Link { text, url } => {
                    if let Some(run) = text_run(text, &TextStyle::default()) {
                        let link = Hyperlink::new(url, HyperlinkType::External)
                            .add_run(run.style(HYPERLINK_STYLE));
                        p = p.add_hyperlink(link);
                    }
                }
            }
        }
        self.push(p);
    }

    fn image(
        &mut self,
        resource_id: &str,
        width: f32,
        height: f32,
        alignment: Alignment,
    ) -> Result<()> {
        let resource = self
            .doc
            .get_resource(resource_id)
            .ok_or_else(|| Error::Image(format!("missing image resource: {}", resource_id)))?;
        if width <= 0.0 || height <= 0.0 {
            warn!("Skipping image {} with empty size", resource_id);
            return Ok(());
        }

        // Pic::new panics on bytes it cannot decode.
        if Resource::detect_mime_type(&resource.data).is_none() {
            return Err(Error::Image(format!(
                "unsupported image data for resource {}",
                resource_id
            )));
        }
        image::load_from_memory(&resource.data).map_err(|e| {
            Error::Image(format!("cannot decode resource {}: {}", resource_id, e))
        })?;

        let (width, height) = self.options.fit_image(width, height);
        let pic = Pic::new(&resource.data).size(emu(width), emu(height));
        self.pictures += 1;
        self.push(
            docx_rs::Paragraph::new()
                .align(alignment_type(alignment))
                .add_run(Run::new().add_image(pic)),
        );
        Ok(())
    }

    /// Empty paragraph with an exact line height.
    fn spacer(&mut self, height: f32) {
        let line = twips(height);
        if line <= 0 {
            return;
        }
        self.push(
            docx_rs::Paragraph::new().line_spacing(
                LineSpacing::new()
                    .before(0)
                    .after(0)
                    .line(line as _)
                    .line_rule(LineSpacingType::Exact),
            ),
        );
    }
}

/// A run for `text`, with line feeds turned into breaks. Empty text has no
/// run.
fn text_run(text: &str, style: &TextStyle) -> Option<Run> {
    if text.is_empty() {
        return None;
    }

    let mut run = Run::new();
    for (i, line) in text.split('\n').enumerate() {
        if i > 0 {
            run = run.add_break(BreakType::TextWrapping);
        }
        if !line.is_empty() {
            run = run.add_text(line);
        }
    }
    if style.bold {
        run = run.bold();
    }
    if style.italic {
        run = run.italic();
    }
    if let Some(color) = style.color {
        run = run.color(&color.to_hex());
    }
    if let Some(size) = style.font_size {
        run = run.size(half_points(size));
    }
    Some(run)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::StyleName;
    use std::io::Read;

    fn render(doc: &Document) -> Vec<u8> {
        to_docx(doc, &RenderOptions::default()).unwrap()
    }

    fn read_part(data: &[u8], name: &str) -> String {
        let mut archive = zip::ZipArchive::new(Cursor::new(data)).unwrap();
        let mut file = archive.by_name(name).unwrap();
        let mut content = String::new();
        file.read_to_string(&mut content).unwrap();
        content
    }

    fn png_bytes() -> Vec<u8> {
        let img = image::RgbImage::from_pixel(3, 3, image::Rgb([255, 255, 255]));
        let mut buf = Cursor::new(Vec::new());
        img.write_to(&mut buf, image::ImageFormat::Png).unwrap();
        buf.into_inner()
    }

    #[test]
    fn test_unit_conversions() {
        assert_eq!(twips(612.0), 12240);
        assert_eq!(half_points(11.0), 22);
        assert_eq!(emu(216.0), 2743200);
    }

    #[test]
    fn test_to_docx_package() {
        let mut doc = Document::new();
        doc.metadata.title = Some("Guide".to_string());
        doc.add_paragraph(Paragraph::styled(StyleName::Title, "GatherSync"));

        let data = render(&doc);
        assert!(data.starts_with(b"PK\x03\x04"));

        let archive = zip::ZipArchive::new(Cursor::new(&data[..])).unwrap();
        let names: Vec<&str> = archive.file_names().collect();
        for part in ["word/document.xml", "word/styles.xml", "docProps/core.xml"] {
            assert!(names.contains(&part), "missing {}", part);
        }

        let body = read_part(&data, "word/document.xml");
        assert!(body.contains(r#"w:val="Title""#));
        assert!(body.contains("GatherSync</w:t>"));
        assert!(body.contains(r#"w:w="12240""#));
        assert!(body.contains(r#"w:h="15840""#));

        let styles = read_part(&data, "word/styles.xml");
        assert!(styles.contains(r#"w:styleId="Title""#));
        assert!(styles.contains(r#"w:styleId="Hyperlink""#));
    }

    #[test]
    fn test_page_breaks_collapse() {
        let mut doc = Document::new();
        doc.push(Block::PageBreak);
        doc.add_paragraph(Paragraph::markup(StyleName::Body, "Tap <b>Connect</b> &amp; go"));
        doc.push(Block::PageBreak);
        doc.push(Block::PageBreak);
        doc.add_paragraph(Paragraph::with_text("next"));

        let body = read_part(&render(&doc), "word/document.xml");
        assert_eq!(body.matches("w:pageBreakBefore").count(), 1);
        assert!(body.contains("Connect</w:t>"));
        assert!(body.contains(" &amp; go</w:t>"));
    }

    #[test]
    fn test_numbering_part() {
        let mut doc = Document::new();
        doc.add_paragraph(Paragraph::numbered(1, "one"));
        doc.add_paragraph(Paragraph::numbered(2, "two"));
        doc.add_paragraph(Paragraph::with_text("aside"));
        doc.add_paragraph(Paragraph::numbered(3, "three"));
        doc.add_paragraph(Paragraph::numbered(1, "again"));
        doc.add_paragraph(Paragraph::bullet(0, "dot"));

        let data = render(&doc);
        let body = read_part(&data, "word/document.xml");
        assert_eq!(body.matches("<w:numPr>").count(), 5);

        let numbering = read_part(&data, "word/numbering.xml");
        assert!(numbering.contains(r#"w:val="decimal""#));
        assert!(numbering.contains(r#"w:val="bullet""#));
    }

    #[test]
    fn test_hyperlink() {
        let mut doc = Document::new();
        let mut p = Paragraph::new();
        p.add_link("the app", "https://example.com/?x=1&y=2");
        doc.add_paragraph(p);

        let data = render(&doc);
        let body = read_part(&data, "word/document.xml");
        assert!(body.contains("<w:hyperlink"));
        assert!(body.contains("the app</w:t>"));
        let rels = read_part(&data, "word/_rels/document.xml.rels");
        assert!(rels.contains("https://example.com/?x=1&amp;y=2"));
    }

    #[test]
    fn test_image_embedding() {
        let mut doc = Document::new();
        doc.add_resource("qr-code", Resource::from_bytes(png_bytes()).unwrap());
        doc.push(Block::image("qr-code", 216.0, 216.0));

        let data = render(&doc);
        let archive = zip::ZipArchive::new(Cursor::new(&data[..])).unwrap();
        assert!(archive.file_names().any(|n| n.starts_with("word/media/")));

        let body = read_part(&data, "word/document.xml");
        assert!(body.contains("<w:drawing>"));
        assert!(body.contains(r#"cx="2743200""#));
    }

    #[test]
    fn test_missing_image() {
        let mut doc = Document::new();
        doc.push(Block::image("nope", 10.0, 10.0));
        assert!(matches!(
            to_docx(&doc, &RenderOptions::default()),
            Err(Error::Image(_))
        ));
    }

    #[test]
    fn test_undecodable_image() {
        let mut truncated = png_bytes();
        truncated.truncate(24);
        let resources = [
            Resource {
                data: Vec::new(),
                mime_type: "image/png".to_string(),
                filename: None,
                width: 3,
                height: 3,
            },
            Resource {
                data: truncated,
                mime_type: "image/png".to_string(),
                filename: None,
                width: 3,
                height: 3,
            },
        ];

        for resource in resources {
            let mut doc = Document::new();
            doc.add_resource("qr-code", resource);
            doc.push(Block::image("qr-code", 72.0, 72.0));
            assert!(matches!(
                to_docx(&doc, &RenderOptions::default()),
                Err(Error::Image(_))
            ));
        }
    }

    #[test]
    fn test_image_after_json_round_trip() {
        let mut doc = Document::new();
        doc.add_resource("qr-code", Resource::from_bytes(png_bytes()).unwrap());
        doc.push(Block::image("qr-code", 72.0, 72.0));

        let json = serde_json::to_string(&doc).unwrap();
        let restored: Document = serde_json::from_str(&json).unwrap();
        assert!(matches!(
            to_docx(&restored, &RenderOptions::default()),
            Err(Error::Image(_))
        ));
    }

    #[test]
    fn test_line_break() {
        let mut p = Paragraph::with_text("first");
        p.add_line_break();
        p.add_text("second");
        let mut doc = Document::new();
        doc.add_paragraph(p);

        let body = read_part(&render(&doc), "word/document.xml");
        assert!(body.contains("<w:br"));
        assert!(body.contains("second</w:t>"));
    }

    #[test]
    fn test_spacer() {
        let mut doc = Document::new();
        doc.push(Block::spacer(18.0));
        doc.push(Block::spacer(0.0));

        let body = read_part(&render(&doc), "word/document.xml");
        assert_eq!(body.matches(r#"w:lineRule="exact""#).count(), 1);
        assert!(body.contains(r#"w:line="360""#));
    }
}
