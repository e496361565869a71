//! Text parsing module: input cleanup, delimiter extraction, column splitting
//! and DOCX input.

pub mod cleanup;
pub mod columns;
pub mod delimiter;
mod docx_reader;
mod options;

pub use cleanup::{CleanupOptions, CleanupPipeline, CleanupPreset};
pub use columns::{split, ColumnAssignment};
pub use delimiter::{
    extract, extract_with_delimiter, extract_with_options, tokenize_line, Extraction, Segment,
    SegmentKind, DEFAULT_DELIMITER,
};
pub use docx_reader::{extract_plain_text, parse_body_paragraphs, DocxReader};
pub use options::ExtractOptions;
