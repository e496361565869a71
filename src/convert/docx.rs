//! DOCX upload source.

use crate::error::Result;
use crate::parser::DocxReader;
use std::path::Path;

use super::TextSource;

/// Reads the body paragraphs of a Word document.
#[derive(Debug, Clone, Default)]
pub struct DocxSource {
    _private: (),
}

impl DocxSource {
    /// Create a new DOCX source.
    pub fn new() -> Self {
        Self { _private: () }
    }
}

impl TextSource for DocxSource {
    fn supported_extensions(&self) -> &[&str] {
        &["docx"]
    }

    fn name(&self) -> &str {
        "docx"
    }

    fn read_path(&self, path: &Path) -> Result<String> {
        DocxReader::open(path)?.plain_text()
    }

    fn read_bytes(&self, bytes: &[u8]) -> Result<String> {
        DocxReader::from_bytes(bytes)?.plain_text()
    }
}
