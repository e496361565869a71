//! Two-column splitting by line count.

use serde::{Deserialize, Serialize};

/// Body lines partitioned into two print columns.
///
/// `column1` holds the first `n / 2` lines and `column2` the rest, so the
/// second column is never shorter than the first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnAssignment {
    /// Lines of the first column
    pub column1: Vec<String>,

    /// Lines of the second column
    pub column2: Vec<String>,
}

impl ColumnAssignment {
    /// Total number of lines across both columns.
    pub fn line_count(&self) -> usize {
        self.column1.len() + self.column2.len()
    }

    /// Check if both columns are empty.
    pub fn is_empty(&self) -> bool {
        self.column1.is_empty() && self.column2.is_empty()
    }

    /// Rejoin the columns into the original line sequence.
    pub fn into_lines(self) -> Vec<String> {
        let mut lines = self.column1;
        lines.extend(self.column2);
        lines
    }
}

/// Split body lines into two columns at `len / 2`.
pub fn split(mut lines: Vec<String>) -> ColumnAssignment {
    let mid = lines.len() / 2;
    let column2 = lines.split_off(mid);
    ColumnAssignment {
        column1: lines,
        column2,
    }
}
