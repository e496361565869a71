//! Upload sources providing a plugin architecture for input formats.
//!
//! A source turns an uploaded file into the raw text the layout pipeline
//! consumes. The registry dispatches on file extension.
//!
//! # Example
//!
//! ```no_run
//! use twocol::convert::SourceRegistry;
//! use std::path::Path;
//!
//! fn main() -> twocol::Result<()> {
//!     let registry = SourceRegistry::with_defaults();
//!     let text = registry.read_path(Path::new("daf.docx"))?;
//!     println!("{}", text);
//!     Ok(())
//! }
//! ```

mod docx;
mod text;

pub use docx::DocxSource;
pub use text::PlainTextSource;

use crate::error::{Error, Result};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

/// Trait for upload sources.
///
/// Implement this trait to accept a new upload format.
pub trait TextSource: Send + Sync {
    /// Get the supported file extensions for this source.
    ///
    /// Extensions should be lowercase without the leading dot (e.g., `["docx"]`).
    fn supported_extensions(&self) -> &[&str];

    /// Get the name of this source.
    fn name(&self) -> &str;

    /// Extract text from bytes.
    fn read_bytes(&self, bytes: &[u8]) -> Result<String>;

    /// Extract text from a file at the given path.
    fn read_path(&self, path: &Path) -> Result<String> {
        let bytes = std::fs::read(path)?;
        self.read_bytes(&bytes)
    }

    /// Check if this source supports the given extension.
    fn supports_extension(&self, ext: &str) -> bool {
        let ext_lower = ext.to_lowercase();
        self.supported_extensions().iter().any(|e| *e == ext_lower)
    }
}

/// Registry for upload sources.
///
/// The registry maps file extensions to sources.
pub struct SourceRegistry {
    sources: HashMap<String, Arc<dyn TextSource>>,
    by_name: HashMap<String, Arc<dyn TextSource>>,
}

impl SourceRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            sources: HashMap::new(),
            by_name: HashMap::new(),
        }
    }

    /// Create a registry with default sources (DOCX and plain text).
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(DocxSource::new()));
        registry.register(Arc::new(PlainTextSource::new()));
        registry
    }

    /// Register a source.
    ///
    /// The source will be registered for all its supported extensions.
    pub fn register(&mut self, source: Arc<dyn TextSource>) {
        for ext in source.supported_extensions() {
            self.sources.insert(ext.to_lowercase(), source.clone());
        }
        self.by_name.insert(source.name().to_lowercase(), source);
    }

    /// Get a source by file extension.
    pub fn get_by_extension(&self, ext: &str) -> Option<Arc<dyn TextSource>> {
        self.sources.get(&ext.to_lowercase()).cloned()
    }

    /// Get a source by name.
    pub fn get_by_name(&self, name: &str) -> Option<Arc<dyn TextSource>> {
        self.by_name.get(&name.to_lowercase()).cloned()
    }

    /// Check if an extension is supported.
    pub fn supports(&self, ext: &str) -> bool {
        self.sources.contains_key(&ext.to_lowercase())
    }

    /// Get all supported extensions, sorted.
    pub fn supported_extensions(&self) -> Vec<&str> {
        let mut extensions: Vec<&str> = self.sources.keys().map(|s| s.as_str()).collect();
        extensions.sort_unstable();
        extensions
    }

    /// Read a file using the source registered for its extension.
    pub fn read_path(&self, path: &Path) -> Result<String> {
        let ext = extension_of(path)?;
        let source = self.source_for(ext)?;
        log::debug!("Reading {} with {} source", path.display(), source.name());
        source.read_path(path)
    }

    /// Read bytes using the given extension to pick the source.
    pub fn read_bytes(&self, bytes: &[u8], ext: &str) -> Result<String> {
        let source = self.source_for(ext)?;
        log::debug!("Reading {} bytes with {} source", bytes.len(), source.name());
        source.read_bytes(bytes)
    }

    /// Read an upload using the source registered for its file name.
    pub fn read_upload(&self, upload: &Upload) -> Result<String> {
        let ext = extension_of(Path::new(&upload.file_name))?;
        self.read_bytes(&upload.bytes, ext)
    }

    fn source_for(&self, ext: &str) -> Result<Arc<dyn TextSource>> {
        self.get_by_extension(ext)
            .ok_or_else(|| Error::UnsupportedExtension(ext.to_string()))
    }
}

impl Default for SourceRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

fn extension_of(path: &Path) -> Result<&str> {
    path.extension()
        .and_then(|e| e.to_str())
        .ok_or_else(|| Error::UnsupportedExtension(String::new()))
}

/// An uploaded file held in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upload {
    /// Original file name, used to pick the source
    pub file_name: String,

    /// File contents
    pub bytes: Vec<u8>,
}

impl Upload {
    /// Create an upload from a name and contents.
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
        }
    }

    /// Load an upload from disk.
    pub fn from_path(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(Self { file_name, bytes })
    }
}

/// Decide which text to lay out.
///
/// Typed text wins whenever it is non-empty; the upload only seeds the
/// input when nothing was typed. Whitespace-only typed text is still input.
/// Fails with [`Error::InputAbsent`] when there is neither, or when the
/// upload holds no text.
pub fn resolve_text(
    typed: &str,
    upload: Option<&Upload>,
    registry: &SourceRegistry,
) -> Result<String> {
    if !typed.is_empty() {
        return Ok(typed.to_string());
    }

    let Some(upload) = upload else {
        return Err(Error::InputAbsent);
    };

    let text = registry.read_upload(upload)?;
    if text.is_empty() {
        log::warn!("Upload {} contains no text", upload.file_name);
        return Err(Error::InputAbsent);
    }
    Ok(text)
}
