//! Integration tests for the writer registry.

use std::path::Path;
use std::sync::Arc;

use betaguide::error::{Error, Result};
use betaguide::export::{DocumentWriter, OutputFormat, WriterRegistry};
use betaguide::{
    build_guide, verify_output, Document, GuideConfig, Paragraph, RenderOptions, RenderOutput,
};

/// Mock writer for testing.
struct MockWriter {
    extensions: Vec<&'static str>,
    name: &'static str,
}

impl MockWriter {
    fn new(extensions: Vec<&'static str>, name: &'static str) -> Self {
        Self { extensions, name }
    }
}

impl DocumentWriter for MockWriter {
    fn supported_extensions(&self) -> &[&str] {
        &self.extensions
    }

    fn name(&self) -> &str {
        self.name
    }

    fn format(&self) -> OutputFormat {
        OutputFormat::Text
    }

    fn render(&self, doc: &Document, _options: &RenderOptions) -> Result<RenderOutput> {
        Ok(RenderOutput::new(
            format!("{} blocks by {}", doc.len(), self.name).into_bytes(),
            OutputFormat::Text,
            doc.stats(),
        ))
    }
}

fn offline_guide() -> Document {
    build_guide(&GuideConfig {
        qr_image: "no-such-dir/qr.png".into(),
        ..Default::default()
    })
}

#[test]
fn test_registry_new_is_empty() {
    let registry = WriterRegistry::new();
    assert!(registry.supported_extensions().is_empty());
    assert!(!registry.supports("pdf"));
}

#[test]
fn test_registry_register_custom() {
    let mut registry = WriterRegistry::new();
    registry.register(Arc::new(MockWriter::new(vec!["md", "markdown"], "mock")));

    assert!(registry.supports("md"));
    assert!(registry.supports("MARKDOWN"));
    assert_eq!(registry.get_by_name("Mock").unwrap().name(), "mock");

    let mut extensions = registry.supported_extensions();
    extensions.sort_unstable();
    assert_eq!(extensions, vec!["markdown", "md"]);
}

#[test]
fn test_registry_custom_writer_overrides_default() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("guide.txt");

    let mut registry = WriterRegistry::with_defaults();
    registry.register(Arc::new(MockWriter::new(vec!["txt"], "mock")));

    let mut doc = Document::new();
    doc.add_paragraph(Paragraph::with_text("one"));
    registry
        .write(&doc, &path, &RenderOptions::default())
        .unwrap();

    assert_eq!(std::fs::read_to_string(&path).unwrap(), "1 blocks by mock");
}

#[test]
fn test_registry_writes_every_format() {
    let dir = tempfile::tempdir().unwrap();
    let registry = WriterRegistry::with_defaults();
    let doc = offline_guide();
    let options = RenderOptions::default();

    for format in [
        OutputFormat::Pdf,
        OutputFormat::Docx,
        OutputFormat::Text,
        OutputFormat::Json,
    ] {
        let path = dir.path().join(format!("guide.{}", format.extension()));
        let output = registry.write(&doc, &path, &options).unwrap();
        assert_eq!(output.format, format);
        assert_eq!(
            verify_output(&path, format).unwrap(),
            output.len() as u64,
            "{}",
            format
        );
    }
}

#[test]
fn test_text_output_has_form_feeds() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("guide.txt");

    WriterRegistry::with_defaults()
        .write(&offline_guide(), &path, &RenderOptions::default())
        .unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    assert_eq!(text.matches('\u{c}').count(), 3);
    assert!(text.contains("1. Open the Expo Go app"));
    assert!(text.contains("4. Tap \"Connect\""));
    assert!(text.contains("QR Code image not found: "));
}

#[test]
fn test_json_output_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("guide.json");
    let doc = offline_guide();

    WriterRegistry::with_defaults()
        .write(&doc, &path, &RenderOptions::default())
        .unwrap();

    let parsed: Document = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(parsed.len(), doc.len());
    assert_eq!(parsed.stats(), doc.stats());
}

#[test]
fn test_registry_unknown_extension() {
    let registry = WriterRegistry::with_defaults();
    let result = registry.write(
        &Document::new(),
        Path::new("guide.odt"),
        &RenderOptions::default(),
    );
    assert!(result.is_err());
}

/// Writer that never produces bytes.
struct EmptyWriter;

impl DocumentWriter for EmptyWriter {
    fn supported_extensions(&self) -> &[&str] {
        &["txt"]
    }

    fn name(&self) -> &str {
        "empty"
    }

    fn format(&self) -> OutputFormat {
        OutputFormat::Text
    }

    fn render(&self, doc: &Document, _options: &RenderOptions) -> Result<RenderOutput> {
        Ok(RenderOutput::new(Vec::new(), OutputFormat::Text, doc.stats()))
    }
}

#[test]
fn test_empty_output_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.txt");

    let mut registry = WriterRegistry::new();
    registry.register(Arc::new(EmptyWriter));

    let result = registry.write(&Document::new(), &path, &RenderOptions::default());
    assert!(matches!(result, Err(Error::EmptyOutput(_))));
    assert!(!path.exists());
}
