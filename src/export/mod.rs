//! Document writers with a registry that dispatches on output extension.
//!
//! Each writer renders a [`Document`] into one output format. The registry
//! maps file extensions and writer names to writers, so callers can write
//! to any supported path without matching on the format themselves.
//!
//! # Example
//!
//! ```no_run
//! use betaguide::export::WriterRegistry;
//! use betaguide::{build_guide, GuideConfig, RenderOptions};
//! use std::path::Path;
//!
//! fn main() -> betaguide::Result<()> {
//!     let registry = WriterRegistry::with_defaults();
//!     let doc = build_guide(&GuideConfig::default());
//!     registry.write(&doc, Path::new("guide.docx"), &RenderOptions::default())?;
//!     Ok(())
//! }
//! ```

mod writers;

pub use writers::{DocxWriter, JsonWriter, PdfWriter, TextWriter};

use crate::error::{Error, Result};
use crate::model::Document;
use crate::render::{RenderOptions, RenderOutput};
use log::info;
use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

/// Output format of a writer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum OutputFormat {
    /// Portable Document Format
    #[default]
    Pdf,

    /// Word (Office Open XML) document
    Docx,

    /// Plain text
    Text,

    /// JSON dump of the document model
    Json,
}

impl OutputFormat {
    /// Default file extension, without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Pdf => "pdf",
            OutputFormat::Docx => "docx",
            OutputFormat::Text => "txt",
            OutputFormat::Json => "json",
        }
    }

    /// MIME type of the output.
    pub fn mime_type(self) -> &'static str {
        match self {
            OutputFormat::Pdf => "application/pdf",
            OutputFormat::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
            OutputFormat::Text => "text/plain",
            OutputFormat::Json => "application/json",
        }
    }

    /// Look up a format by file extension (case-insensitive).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "pdf" => Some(OutputFormat::Pdf),
            "docx" => Some(OutputFormat::Docx),
            "txt" | "text" => Some(OutputFormat::Text),
            "json" => Some(OutputFormat::Json),
            _ => None,
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            OutputFormat::Pdf => "PDF",
            OutputFormat::Docx => "DOCX",
            OutputFormat::Text => "Text",
            OutputFormat::Json => "JSON",
        };
        f.write_str(label)
    }
}

/// Trait for document writers.
///
/// Implement this trait to add support for a new output format.
pub trait DocumentWriter: Send + Sync {
    /// Get the supported file extensions for this writer.
    ///
    /// Extensions should be lowercase without the leading dot (e.g., `["pdf"]`).
    fn supported_extensions(&self) -> &[&str];

    /// Get the name of this writer.
    fn name(&self) -> &str;

    /// Get the output format.
    fn format(&self) -> OutputFormat;

    /// Render a document to bytes.
    fn render(&self, doc: &Document, options: &RenderOptions) -> Result<RenderOutput>;

    /// Render a document and write it to `path`.
    fn write_to(
        &self,
        doc: &Document,
        path: &Path,
        options: &RenderOptions,
    ) -> Result<RenderOutput> {
        let output = self.render(doc, options)?;
        if output.is_empty() {
            return Err(Error::EmptyOutput(path.to_path_buf()));
        }
        std::fs::write(path, &output.data)?;
        info!(
            "Wrote {} ({} bytes) to {}",
            self.format(),
            output.len(),
            path.display()
        );
        Ok(output)
    }

    /// Check if this writer supports the given extension.
    fn supports_extension(&self, ext: &str) -> bool {
        let ext_lower = ext.to_lowercase();
        self.supported_extensions().iter().any(|e| *e == ext_lower)
    }
}

/// Registry for document writers.
///
/// The registry maps file extensions to writers and provides
/// convenient methods for writing documents.
pub struct WriterRegistry {
    writers: HashMap<String, Arc<dyn DocumentWriter>>,
    by_name: HashMap<String, Arc<dyn DocumentWriter>>,
}

impl WriterRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            writers: HashMap::new(),
            by_name: HashMap::new(),
        }
    }

    /// Create a registry with the PDF, DOCX, text and JSON writers.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(PdfWriter::new()));
        registry.register(Arc::new(DocxWriter::new()));
        registry.register(Arc::new(TextWriter::new()));
        registry.register(Arc::new(JsonWriter::new()));
        registry
    }

    /// Register a writer.
    ///
    /// The writer will be registered for all its supported extensions.
    pub fn register(&mut self, writer: Arc<dyn DocumentWriter>) {
        for ext in writer.supported_extensions() {
            self.writers.insert(ext.to_lowercase(), writer.clone());
        }
        self.by_name.insert(writer.name().to_lowercase(), writer);
    }

    /// Get a writer by file extension.
    pub fn get_by_extension(&self, ext: &str) -> Option<Arc<dyn DocumentWriter>> {
        self.writers.get(&ext.to_lowercase()).cloned()
    }

    /// Get a writer by name.
    pub fn get_by_name(&self, name: &str) -> Option<Arc<dyn DocumentWriter>> {
        self.by_name.get(&name.to_lowercase()).cloned()
    }

    /// Check if an extension is supported.
    pub fn supports(&self, ext: &str) -> bool {
        self.writers.contains_key(&ext.to_lowercase())
    }

    /// Get all supported extensions.
    pub fn supported_extensions(&self) -> Vec<&str> {
        self.writers.keys().map(|s| s.as_str()).collect()
    }

    /// Write a document using the writer matching the path's extension.
    pub fn write(
        &self,
        doc: &Document,
        path: &Path,
        options: &RenderOptions,
    ) -> Result<RenderOutput> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| Error::Other("File has no extension".into()))?;

        let writer = self
            .get_by_extension(ext)
            .ok_or_else(|| Error::Other(format!("No writer for extension: {}", ext)))?;

        writer.write_to(doc, path, options)
    }
}

impl Default for WriterRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
