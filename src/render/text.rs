//! Plain text rendering for document plans.

use crate::error::Result;
use crate::model::{Block, DocumentPlan};

/// Marker printed where the second column starts.
pub const COLUMN_BREAK_MARKER: &str = "-- column break --";

/// Convert a document plan to plain text.
///
/// The header comes first, separated by a blank line, then the first
/// column, a break marker and the second column. Styling is dropped.
pub fn to_text(plan: &DocumentPlan) -> Result<String> {
    let mut output = String::new();

    for block in plan {
        match block {
            Block::Header(text) => {
                output.push_str(&text.text);
                output.push_str("\n\n");
            }
            Block::Paragraph { text, .. } => {
                output.push_str(&text.text);
                output.push('\n');
            }
            Block::ColumnBreak { .. } => {
                output.push_str(COLUMN_BREAK_MARKER);
                output.push('\n');
            }
        }
    }

    Ok(output.trim_end().to_string())
}
