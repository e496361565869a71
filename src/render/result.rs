//! Generation result with layout statistics.

use crate::model::{Block, Column, DocumentPlan};
use serde::{Deserialize, Serialize};

/// MIME type of a WordprocessingML document.
pub const DOCX_MIME_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// A rendered document ready for download.
#[derive(Debug, Clone)]
pub struct GeneratedDocument {
    /// The DOCX package
    pub bytes: Vec<u8>,

    /// File name offered for download
    pub file_name: String,

    /// MIME type of `bytes`
    pub mime_type: &'static str,

    /// Layout statistics
    pub stats: LayoutStats,
}

impl GeneratedDocument {
    /// Create a new generation result.
    pub fn new(bytes: Vec<u8>, file_name: impl Into<String>, stats: LayoutStats) -> Self {
        Self {
            bytes,
            file_name: file_name.into(),
            mime_type: DOCX_MIME_TYPE,
            stats,
        }
    }

    /// Size of the package in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Check if the package is empty.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Statistics collected from a document plan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutStats {
    /// Number of marked spans in the header
    pub span_count: u32,

    /// Paragraphs in the first column
    pub column1_lines: u32,

    /// Paragraphs in the second column
    pub column2_lines: u32,

    /// Approximate word count (whitespace-separated tokens)
    pub word_count: u32,

    /// Character count (excluding whitespace)
    pub char_count: u32,
}

impl LayoutStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect statistics for a plan built from `span_count` spans.
    ///
    /// The span count is passed separately because the header joins spans
    /// into one paragraph.
    pub fn from_plan(plan: &DocumentPlan, span_count: usize) -> Self {
        let mut stats = Self {
            span_count: span_count as u32,
            ..Self::default()
        };

        for block in plan {
            match block {
                Block::Paragraph { column, text } => {
                    match column {
                        Column::First => stats.column1_lines += 1,
                        Column::Second => stats.column2_lines += 1,
                    }
                    stats.count_text(&text.text);
                }
                Block::Header(text) => stats.count_text(&text.text),
                Block::ColumnBreak { .. } => {}
            }
        }

        stats
    }

    /// Total body lines across both columns.
    pub fn body_lines(&self) -> u32 {
        self.column1_lines + self.column2_lines
    }

    /// Add word and character counts from text.
    pub fn count_text(&mut self, text: &str) {
        self.word_count += text.split_whitespace().count() as u32;
        self.char_count += text.chars().filter(|c| !c.is_whitespace()).count() as u32;
    }
}
