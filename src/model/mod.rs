//! Layout model types.
//!
//! This module defines the intermediate representation that bridges markup
//! extraction and document rendering. A [`DocumentPlan`] is an ordered list of
//! styled blocks; renderers turn it into a concrete document format.

mod paragraph;
mod plan;
mod settings;

pub use paragraph::{Alignment, StyledText};
pub use plan::{Block, BlockRole, Column, DocumentPlan, Metadata};
pub use settings::{Direction, TypographySettings, MAX_FONT_SIZE, MIN_FONT_SIZE};
