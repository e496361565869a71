//! Extraction options and configuration.

use super::delimiter::DEFAULT_DELIMITER;
use crate::error::{Error, Result};
use super::cleanup::{CleanupOptions, CleanupPipeline, CleanupPreset};

/// Options for extracting marked spans from text.
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// Inline delimiter that opens and closes a marked span
    delimiter: String,

    /// Text cleanup applied before extraction
    pub cleanup: Option<CleanupOptions>,
}

impl ExtractOptions {
    /// Create new extract options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the inline delimiter.
    ///
    /// Fails with [`Error::InvalidDelimiter`] if `delimiter` is empty.
    pub fn with_delimiter(mut self, delimiter: impl Into<String>) -> Result<Self> {
        let delimiter = delimiter.into();
        if delimiter.is_empty() {
            return Err(Error::InvalidDelimiter);
        }
        self.delimiter = delimiter;
        Ok(self)
    }

    /// Set cleanup options.
    pub fn with_cleanup(mut self, cleanup: CleanupOptions) -> Self {
        self.cleanup = Some(cleanup);
        self
    }

    /// Set cleanup preset.
    pub fn with_cleanup_preset(mut self, preset: CleanupPreset) -> Self {
        self.cleanup = Some(CleanupOptions::from_preset(preset));
        self
    }

    /// The configured delimiter.
    pub fn delimiter(&self) -> &str {
        &self.delimiter
    }

    pub(crate) fn cleanup_pipeline(&self) -> Option<CleanupPipeline> {
        self.cleanup.clone().map(CleanupPipeline::new)
    }
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER.to_string(),
            cleanup: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = ExtractOptions::default();
        assert_eq!(options.delimiter(), "**");
        assert!(options.cleanup.is_none());
    }

    #[test]
    fn test_extract_options_builder() {
        let options = ExtractOptions::new()
            .with_delimiter("__")
            .unwrap()
            .with_cleanup_preset(CleanupPreset::Standard);

        assert_eq!(options.delimiter(), "__");
        assert!(options.cleanup.is_some());
    }

    #[test]
    fn test_empty_delimiter_rejected() {
        let result = ExtractOptions::new().with_delimiter("");
        assert!(matches!(result, Err(Error::InvalidDelimiter)));
    }
}
