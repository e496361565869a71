//! Document plan types.

use super::{Alignment, StyledText};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An ordered list of styled blocks ready for rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentPlan {
    /// Blocks in document order
    pub blocks: Vec<Block>,
}

impl DocumentPlan {
    /// Create a new empty plan.
    pub fn new() -> Self {
        Self { blocks: Vec::new() }
    }

    /// Append a block.
    pub fn push(&mut self, block: Block) {
        self.blocks.push(block);
    }

    /// Number of blocks in the plan.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Check if the plan has no blocks.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Iterate over the blocks.
    pub fn iter(&self) -> std::slice::Iter<'_, Block> {
        self.blocks.iter()
    }

    /// The highlighted header, if the text had any marked spans.
    pub fn header(&self) -> Option<&StyledText> {
        self.blocks.iter().find_map(|b| match b {
            Block::Header(text) => Some(text),
            _ => None,
        })
    }

    /// Paragraph texts assigned to the given column, in order.
    pub fn column_lines(&self, column: Column) -> Vec<&str> {
        self.blocks
            .iter()
            .filter_map(|b| match b {
                Block::Paragraph { column: c, text } if *c == column => Some(text.text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Number of column breaks in the plan.
    pub fn column_break_count(&self) -> usize {
        self.blocks
            .iter()
            .filter(|b| matches!(b, Block::ColumnBreak { .. }))
            .count()
    }
}

impl<'a> IntoIterator for &'a DocumentPlan {
    type Item = &'a Block;
    type IntoIter = std::slice::Iter<'a, Block>;

    fn into_iter(self) -> Self::IntoIter {
        self.blocks.iter()
    }
}

/// Print column a paragraph belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Column {
    /// The first print column
    First,
    /// The second print column
    Second,
}

/// A styled block in a document plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    /// The highlighted references, bold, at the top of the document.
    Header(StyledText),

    /// A body line.
    Paragraph {
        /// Column the line was assigned to
        column: Column,
        /// Styled line text
        text: StyledText,
    },

    /// Ends the current print column; rendering continues in the next one.
    ColumnBreak {
        /// Paragraph alignment of the break marker
        alignment: Alignment,
    },
}

impl Block {
    /// Alignment of this block.
    pub fn alignment(&self) -> Alignment {
        match self {
            Block::Header(text) => text.alignment,
            Block::Paragraph { text, .. } => text.alignment,
            Block::ColumnBreak { alignment } => *alignment,
        }
    }

    /// Role of this block in the layout.
    pub fn role(&self) -> BlockRole {
        match self {
            Block::Header(_) => BlockRole::Header,
            Block::Paragraph {
                column: Column::First,
                ..
            } => BlockRole::FirstColumnParagraph,
            Block::Paragraph {
                column: Column::Second,
                ..
            } => BlockRole::SecondColumnParagraph,
            Block::ColumnBreak { .. } => BlockRole::ColumnBreak,
        }
    }

    /// Styled text of this block, if it carries any.
    pub fn text(&self) -> Option<&StyledText> {
        match self {
            Block::Header(text) | Block::Paragraph { text, .. } => Some(text),
            Block::ColumnBreak { .. } => None,
        }
    }
}

/// Role tag of a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockRole {
    /// Highlighted header
    Header,
    /// Paragraph in the first column
    FirstColumnParagraph,
    /// Paragraph in the second column
    SecondColumnParagraph,
    /// Column break marker
    ColumnBreak,
}

/// Document metadata written into the package properties.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    /// Document title
    pub title: Option<String>,

    /// Document author
    pub creator: Option<String>,

    /// Document subject
    pub subject: Option<String>,

    /// Creation date
    pub created: Option<DateTime<Utc>>,
}

impl Metadata {
    /// Create metadata with a title.
    pub fn with_title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Default::default()
        }
    }

    /// Check if no property is set.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.creator.is_none()
            && self.subject.is_none()
            && self.created.is_none()
    }
}
