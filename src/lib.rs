//! # betaguide
//!
//! Generator for beta-tester onboarding guides.
//!
//! The guide content is assembled once as a [`Document`] (an ordered list of
//! styled paragraphs, spacers, page breaks and an embedded QR code) and then
//! rendered to PDF or Word. Both formats share the same style sheet, so the
//! two files look alike.
//!
//! ## Quick Start
//!
//! ```no_run
//! use betaguide::{generate_all, GuideConfig};
//!
//! fn main() -> betaguide::Result<()> {
//!     let config = GuideConfig::default();
//!     let files = generate_all(&config, ".")?;
//!     println!("Wrote {} and {}", files.pdf.display(), files.docx.display());
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **PDF output**: base-14 fonts, line wrapping, pagination, link annotations
//! - **Word output**: styles, numbered and bulleted lists, inline pictures
//! - **QR fallback**: a missing QR image becomes a placeholder note
//! - **Previews**: plain text and JSON dumps of the content model

pub mod detect;
pub mod error;
pub mod export;
pub mod guide;
pub mod markup;
pub mod model;
pub mod render;
pub mod style;

// Re-export commonly used types
pub use detect::{detect_format_from_bytes, detect_format_from_path, verify_output, DetectedFormat};
pub use error::{Error, Result};
pub use export::{
    DocumentWriter, DocxWriter, JsonWriter, OutputFormat, PdfWriter, TextWriter, WriterRegistry,
};
pub use guide::{build_guide, EventKind, GuideConfig, SampleEvent, QR_RESOURCE_ID};
pub use model::{
    Alignment, Block, Document, DocumentStats, InlineContent, ListInfo, ListStyle, Metadata,
    Paragraph, ParagraphStyle, Resource, TextRun, TextStyle,
};
pub use render::{JsonFormat, Margins, PageSize, RenderOptions, RenderOutput};
pub use style::{Color, FontFamily, StyleDef, StyleName, StyleSheet};

use chrono::Utc;
use std::path::{Path, PathBuf};

/// Build the guide and stamp it with the current time.
fn dated_guide(config: &GuideConfig) -> Document {
    let mut doc = build_guide(config);
    doc.metadata.created = Some(Utc::now());
    doc
}

/// Generate the PDF guide at `path`.
///
/// # Example
///
/// ```no_run
/// use betaguide::{generate_pdf, GuideConfig};
///
/// let config = GuideConfig::default();
/// let output = generate_pdf(&config, config.pdf_file_name()).unwrap();
/// println!("Pages: {:?}", output.page_count);
/// ```
pub fn generate_pdf<P: AsRef<Path>>(config: &GuideConfig, path: P) -> Result<RenderOutput> {
    generate_pdf_with_options(config, path, &RenderOptions::default())
}

/// Generate the PDF guide with custom render options.
pub fn generate_pdf_with_options<P: AsRef<Path>>(
    config: &GuideConfig,
    path: P,
    options: &RenderOptions,
) -> Result<RenderOutput> {
    PdfWriter::new().write_to(&dated_guide(config), path.as_ref(), options)
}

/// Generate the Word guide at `path`.
///
/// # Example
///
/// ```no_run
/// use betaguide::{generate_docx, GuideConfig};
///
/// let config = GuideConfig::default();
/// generate_docx(&config, config.docx_file_name()).unwrap();
/// ```
pub fn generate_docx<P: AsRef<Path>>(config: &GuideConfig, path: P) -> Result<RenderOutput> {
    generate_docx_with_options(config, path, &RenderOptions::default())
}

/// Generate the Word guide with custom render options.
pub fn generate_docx_with_options<P: AsRef<Path>>(
    config: &GuideConfig,
    path: P,
    options: &RenderOptions,
) -> Result<RenderOutput> {
    DocxWriter::new().write_to(&dated_guide(config), path.as_ref(), options)
}

/// Files written by [`generate_all`].
#[derive(Debug, Clone)]
pub struct GeneratedFiles {
    /// Path of the PDF guide
    pub pdf: PathBuf,
    /// Render result of the PDF guide
    pub pdf_output: RenderOutput,
    /// Path of the Word guide
    pub docx: PathBuf,
    /// Render result of the Word guide
    pub docx_output: RenderOutput,
}

/// Generate both guides into `dir` under their default file names.
///
/// The document is built once; the two formats render in parallel.
pub fn generate_all<P: AsRef<Path>>(config: &GuideConfig, dir: P) -> Result<GeneratedFiles> {
    generate_all_with_options(config, dir, &RenderOptions::default())
}

/// Generate both guides with custom render options.
pub fn generate_all_with_options<P: AsRef<Path>>(
    config: &GuideConfig,
    dir: P,
    options: &RenderOptions,
) -> Result<GeneratedFiles> {
    let dir = dir.as_ref();
    std::fs::create_dir_all(dir)?;

    let doc = dated_guide(config);
    let pdf = dir.join(config.pdf_file_name());
    let docx = dir.join(config.docx_file_name());

    let (pdf_output, docx_output) = rayon::join(
        || PdfWriter::new().write_to(&doc, &pdf, options),
        || DocxWriter::new().write_to(&doc, &docx, options),
    );

    Ok(GeneratedFiles {
        pdf,
        pdf_output: pdf_output?,
        docx,
        docx_output: docx_output?,
    })
}
