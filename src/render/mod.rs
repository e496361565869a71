//! Rendering module for turning document plans into output formats.

mod docx;
mod json;
mod options;
mod result;
mod text;

pub use docx::{to_docx, DocxRenderer};
pub use json::{to_json, JsonFormat};
pub use options::{PageGeometry, RenderOptions, DEFAULT_FILE_NAME, TWIPS_PER_INCH};
pub use result::{GeneratedDocument, LayoutStats, DOCX_MIME_TYPE};
pub use text::{to_text, COLUMN_BREAK_MARKER};
