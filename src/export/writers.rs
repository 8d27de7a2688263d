//! Writers for the built-in output formats.

use super::{DocumentWriter, OutputFormat};
use crate::error::Result;
use crate::model::Document;
use crate::render::{to_docx, to_json, to_pdf, to_text, JsonFormat, RenderOptions, RenderOutput};

/// PDF writer.
#[derive(Debug, Clone, Default)]
pub struct PdfWriter {
    _private: (),
}

impl PdfWriter {
    /// Create a new PDF writer.
    pub fn new() -> Self {
        Self { _private: () }
    }
}

impl DocumentWriter for PdfWriter {
    fn supported_extensions(&self) -> &[&str] {
        &["pdf"]
    }

    fn name(&self) -> &str {
        "pdf"
    }

    fn format(&self) -> OutputFormat {
        OutputFormat::Pdf
    }

    fn render(&self, doc: &Document, options: &RenderOptions) -> Result<RenderOutput> {
        let pdf = to_pdf(doc, options)?;
        Ok(RenderOutput::new(pdf.data, OutputFormat::Pdf, doc.stats())
            .with_page_count(pdf.page_count))
    }
}

/// Word document writer.
#[derive(Debug, Clone, Default)]
pub struct DocxWriter {
    _private: (),
}

impl DocxWriter {
    /// Create a new DOCX writer.
    pub fn new() -> Self {
        Self { _private: () }
    }
}

impl DocumentWriter for DocxWriter {
    fn supported_extensions(&self) -> &[&str] {
        &["docx"]
    }

    fn name(&self) -> &str {
        "docx"
    }

    fn format(&self) -> OutputFormat {
        OutputFormat::Docx
    }

    fn render(&self, doc: &Document, options: &RenderOptions) -> Result<RenderOutput> {
        let data = to_docx(doc, options)?;
        Ok(RenderOutput::new(data, OutputFormat::Docx, doc.stats()))
    }
}

/// Plain text writer; page breaks become form feeds.
#[derive(Debug, Clone, Default)]
pub struct TextWriter {
    _private: (),
}

impl TextWriter {
    /// Create a new text writer.
    pub fn new() -> Self {
        Self { _private: () }
    }
}

impl DocumentWriter for TextWriter {
    fn supported_extensions(&self) -> &[&str] {
        &["txt", "text"]
    }

    fn name(&self) -> &str {
        "text"
    }

    fn format(&self) -> OutputFormat {
        OutputFormat::Text
    }

    fn render(&self, doc: &Document, _options: &RenderOptions) -> Result<RenderOutput> {
        let mut text = to_text(doc)?;
        text.push('\n');
        Ok(RenderOutput::new(
            text.into_bytes(),
            OutputFormat::Text,
            doc.stats(),
        ))
    }
}

/// JSON writer for the document model.
#[derive(Debug, Clone, Default)]
pub struct JsonWriter {
    format: JsonFormat,
}

impl JsonWriter {
    /// Create a pretty-printing JSON writer.
    pub fn new() -> Self {
        Self {
            format: JsonFormat::Pretty,
        }
    }

    /// Create a JSON writer without extra whitespace.
    pub fn compact() -> Self {
        Self {
            format: JsonFormat::Compact,
        }
    }
}

impl DocumentWriter for JsonWriter {
    fn supported_extensions(&self) -> &[&str] {
        &["json"]
    }

    fn name(&self) -> &str {
        "json"
    }

    fn format(&self) -> OutputFormat {
        OutputFormat::Json
    }

    fn render(&self, doc: &Document, _options: &RenderOptions) -> Result<RenderOutput> {
        let json = to_json(doc, self.format)?;
        Ok(RenderOutput::new(
            json.into_bytes(),
            OutputFormat::Json,
            doc.stats(),
        ))
    }
}
