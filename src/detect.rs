//! Output format detection and verification.

use crate::error::{Error, Result};
use crate::export::OutputFormat;
use std::io::Cursor;
use std::path::Path;

/// PDF format information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PdfFormat {
    /// PDF version (e.g., "1.7", "2.0")
    pub version: String,
}

impl std::fmt::Display for PdfFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PDF {}", self.version)
    }
}

/// A recognized document file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetectedFormat {
    /// PDF with its header version
    Pdf(PdfFormat),
    /// Zip package containing `word/document.xml`
    Docx,
}

impl DetectedFormat {
    /// The matching output format.
    pub fn output_format(&self) -> OutputFormat {
        match self {
            DetectedFormat::Pdf(_) => OutputFormat::Pdf,
            DetectedFormat::Docx => OutputFormat::Docx,
        }
    }
}

impl std::fmt::Display for DetectedFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DetectedFormat::Pdf(pdf) => pdf.fmt(f),
            DetectedFormat::Docx => f.write_str("DOCX"),
        }
    }
}

/// PDF magic bytes: %PDF-
const PDF_MAGIC: &[u8] = b"%PDF-";
const PDF_MAGIC_LEN: usize = 5;
const VERSION_LEN: usize = 3; // e.g., "1.7"

/// Zip local file header signature.
const ZIP_MAGIC: &[u8] = b"PK\x03\x04";
const DOCX_MAIN_PART: &str = "word/document.xml";

/// Detect the format of a file.
///
/// # Example
/// ```no_run
/// use betaguide::detect::detect_format_from_path;
///
/// let format = detect_format_from_path("GatherSync-Instructions.docx").unwrap();
/// println!("Format: {}", format);
/// ```
pub fn detect_format_from_path<P: AsRef<Path>>(path: P) -> Result<DetectedFormat> {
    let data = std::fs::read(path)?;
    detect_format_from_bytes(&data)
}

/// Detect the format of a complete file held in memory.
///
/// # Returns
/// * `Ok(DetectedFormat)` for a PDF header or a Word package
/// * `Err(Error::UnknownFormat)` otherwise
pub fn detect_format_from_bytes(data: &[u8]) -> Result<DetectedFormat> {
    if data.starts_with(ZIP_MAGIC) {
        return if is_docx_package(data) {
            Ok(DetectedFormat::Docx)
        } else {
            Err(Error::UnknownFormat)
        };
    }

    if data.len() < PDF_MAGIC_LEN + VERSION_LEN || !data.starts_with(PDF_MAGIC) {
        return Err(Error::UnknownFormat);
    }

    // Extract version string (e.g., "1.7" from "%PDF-1.7")
    let version_bytes = &data[PDF_MAGIC_LEN..PDF_MAGIC_LEN + VERSION_LEN];
    let version = String::from_utf8_lossy(version_bytes).to_string();

    if !is_valid_version(&version) {
        return Err(Error::UnsupportedVersion(version));
    }

    Ok(DetectedFormat::Pdf(PdfFormat { version }))
}

fn is_docx_package(data: &[u8]) -> bool {
    match zip::ZipArchive::new(Cursor::new(data)) {
        Ok(archive) => archive.file_names().any(|name| name == DOCX_MAIN_PART),
        Err(_) => false,
    }
}

/// Check if a version string is valid.
fn is_valid_version(version: &str) -> bool {
    if version.len() != 3 {
        return false;
    }

    let chars: Vec<char> = version.chars().collect();
    chars[0].is_ascii_digit() && chars[1] == '.' && chars[2].is_ascii_digit()
}

/// Check that a generated file exists, is non-empty and has the expected
/// format. Returns the file size in bytes.
pub fn verify_output<P: AsRef<Path>>(path: P, expected: OutputFormat) -> Result<u64> {
    let path = path.as_ref();
    let data = std::fs::read(path)?;
    if data.is_empty() {
        return Err(Error::EmptyOutput(path.to_path_buf()));
    }

    let actual = match expected {
        OutputFormat::Pdf | OutputFormat::Docx => detect_format_from_bytes(&data)?.output_format(),
        OutputFormat::Text => {
            std::str::from_utf8(&data)
                .map_err(|e| Error::Other(format!("{} is not UTF-8 text: {}", path.display(), e)))?;
            OutputFormat::Text
        }
        OutputFormat::Json => {
            serde_json::from_slice::<serde_json::Value>(&data)
                .map_err(|e| Error::Other(format!("{} is not valid JSON: {}", path.display(), e)))?;
            OutputFormat::Json
        }
    };

    if actual != expected {
        return Err(Error::Other(format!(
            "{}: expected {} but found {}",
            path.display(),
            expected,
            actual
        )));
    }

    Ok(data.len() as u64)
}

/// Check if bytes start with a valid PDF header.
pub fn is_pdf_bytes(data: &[u8]) -> bool {
    matches!(detect_format_from_bytes(data), Ok(DetectedFormat::Pdf(_)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::SimpleFileOptions;

    fn zip_with(name: &str) -> Vec<u8> {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        writer
            .start_file(name, SimpleFileOptions::default())
            .unwrap();
        writer.write_all(b"<x/>").unwrap();
        writer.finish().unwrap().into_inner()
    }

    #[test]
    fn test_detect_valid_pdf() {
        let data = b"%PDF-1.7\n%\xe2\xe3\xcf\xd3";
        let format = detect_format_from_bytes(data).unwrap();
        assert_eq!(
            format,
            DetectedFormat::Pdf(PdfFormat {
                version: "1.7".to_string()
            })
        );
        assert_eq!(format.to_string(), "PDF 1.7");
    }

    #[test]
    fn test_detect_docx() {
        let format = detect_format_from_bytes(&zip_with("word/document.xml")).unwrap();
        assert_eq!(format, DetectedFormat::Docx);
        assert_eq!(format.output_format(), OutputFormat::Docx);
    }

    #[test]
    fn test_detect_plain_zip() {
        let result = detect_format_from_bytes(&zip_with("readme.txt"));
        assert!(matches!(result, Err(Error::UnknownFormat)));
    }

    #[test]
    fn test_detect_invalid_format() {
        let data = b"<!DOCTYPE html>";
        let result = detect_format_from_bytes(data);
        assert!(matches!(result, Err(Error::UnknownFormat)));
    }

    #[test]
    fn test_detect_too_short() {
        let data = b"%PDF";
        let result = detect_format_from_bytes(data);
        assert!(matches!(result, Err(Error::UnknownFormat)));
    }

    #[test]
    fn test_detect_bad_version() {
        let result = detect_format_from_bytes(b"%PDF-x.y\n");
        assert!(matches!(result, Err(Error::UnsupportedVersion(_))));
    }

    #[test]
    fn test_is_pdf_bytes() {
        assert!(is_pdf_bytes(b"%PDF-1.4\n"));
        assert!(!is_pdf_bytes(b"Not a PDF"));
    }

    #[test]
    fn test_version_validation() {
        assert!(is_valid_version("1.0"));
        assert!(is_valid_version("1.7"));
        assert!(is_valid_version("2.0"));
        assert!(!is_valid_version("10.0"));
        assert!(!is_valid_version("abc"));
    }

    #[test]
    fn test_verify_output() {
        let dir = tempfile::tempdir().unwrap();

        let pdf = dir.path().join("out.pdf");
        std::fs::write(&pdf, b"%PDF-1.7\n%%EOF").unwrap();
        assert_eq!(verify_output(&pdf, OutputFormat::Pdf).unwrap(), 14);
        assert!(matches!(
            verify_output(&pdf, OutputFormat::Docx),
            Err(Error::Other(_))
        ));

        let empty = dir.path().join("empty.pdf");
        std::fs::write(&empty, b"").unwrap();
        assert!(matches!(
            verify_output(&empty, OutputFormat::Pdf),
            Err(Error::EmptyOutput(_))
        ));

        let json = dir.path().join("out.json");
        std::fs::write(&json, b"{\"blocks\": []}").unwrap();
        assert!(verify_output(&json, OutputFormat::Json).is_ok());

        assert!(matches!(
            verify_output(dir.path().join("missing.pdf"), OutputFormat::Pdf),
            Err(Error::Io(_))
        ));
    }
}
