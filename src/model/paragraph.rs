//! Paragraph and text-level types.

use serde::{Deserialize, Serialize};

/// A single run of text with uniform styling.
///
/// Every block in a plan holds exactly one of these: the layout never mixes
/// bold and regular text inside a paragraph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyledText {
    /// The text content
    pub text: String,

    /// Bold text
    pub bold: bool,

    /// Font size in points
    pub font_size: u32,

    /// Paragraph alignment
    pub alignment: Alignment,
}

impl StyledText {
    /// Create a regular (non-bold) run.
    pub fn regular(text: impl Into<String>, font_size: u32, alignment: Alignment) -> Self {
        Self {
            text: text.into(),
            bold: false,
            font_size,
            alignment,
        }
    }

    /// Create a bold run.
    pub fn bold(text: impl Into<String>, font_size: u32, alignment: Alignment) -> Self {
        Self {
            text: text.into(),
            bold: true,
            font_size,
            alignment,
        }
    }

    /// Font size in half-points, the unit WordprocessingML uses.
    ///
    /// Widened to `u64` so any point size converts without overflow.
    pub fn half_points(&self) -> u64 {
        u64::from(self.font_size) * 2
    }

    /// Check if the run has no text.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Text alignment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    /// Left alignment (default)
    #[default]
    Left,
    /// Right alignment
    Right,
}

impl Alignment {
    /// Value of the `w:jc` attribute for this alignment.
    pub fn as_ooxml(&self) -> &'static str {
        match self {
            Alignment::Left => "left",
            Alignment::Right => "right",
        }
    }
}
