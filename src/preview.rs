//! Read-only projection of the extraction shown next to the editor.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::parser::{self, ExtractOptions, Extraction};

/// Separator between spans in the preview summary.
pub const SUMMARY_SPAN_SEPARATOR: &str = ", ";

/// What generation would extract from a text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preview {
    /// Marked spans, in order of appearance
    pub spans: Vec<String>,

    /// Body lines joined by newlines
    pub body: String,
}

impl Preview {
    /// Check if the text produced neither spans nor body.
    pub fn is_empty(&self) -> bool {
        self.spans.is_empty() && self.body.is_empty()
    }

    /// Text for the preview panel.
    ///
    /// ```
    /// let summary = twocol::preview("**Ref1** Hello\n**Ref2** World").summary();
    /// assert_eq!(summary, "Bold References:\nRef1, Ref2\n\nColumn Text:\n Hello\n World");
    /// ```
    pub fn summary(&self) -> String {
        let mut output = String::new();
        if !self.spans.is_empty() {
            output.push_str("Bold References:\n");
            output.push_str(&self.spans.join(SUMMARY_SPAN_SEPARATOR));
            output.push_str("\n\n");
        }
        output.push_str("Column Text:\n");
        output.push_str(&self.body);
        output
    }
}

impl From<Extraction> for Preview {
    fn from(extraction: Extraction) -> Self {
        let body = extraction.body();
        Self {
            spans: extraction.spans,
            body,
        }
    }
}

impl fmt::Display for Preview {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.summary())
    }
}

/// Preview `text` with the default extraction options.
pub fn preview(text: &str) -> Preview {
    parser::extract(text).into()
}

/// Preview `text` with custom extraction options.
pub fn preview_with_options(text: &str, options: &ExtractOptions) -> Preview {
    parser::extract_with_options(text, options).into()
}
