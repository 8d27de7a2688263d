//! Rendering module for converting documents to various output formats.

mod docx;
mod json;
mod options;
pub mod pdf;
mod result;
mod text;

pub use docx::to_docx;
pub use json::{to_json, JsonFormat};
pub use options::{Margins, PageSize, RenderOptions};
pub use pdf::{to_pdf, PdfOutput};
pub use result::RenderOutput;
pub use text::to_text;
