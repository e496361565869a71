//! Plain text upload source.

use crate::error::{Error, Result};

use super::TextSource;

/// Reads UTF-8 text files, dropping a leading byte-order mark.
#[derive(Debug, Clone, Default)]
pub struct PlainTextSource {
    _private: (),
}

impl PlainTextSource {
    /// Create a new plain text source.
    pub fn new() -> Self {
        Self { _private: () }
    }
}

impl TextSource for PlainTextSource {
    fn supported_extensions(&self) -> &[&str] {
        &["txt", "text", "md"]
    }

    fn name(&self) -> &str {
        "text"
    }

    fn read_bytes(&self, bytes: &[u8]) -> Result<String> {
        let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
        let text = std::str::from_utf8(bytes)
            .map_err(|e| Error::Decode(format!("text upload is not valid UTF-8: {}", e)))?;
        Ok(text.to_string())
    }
}
