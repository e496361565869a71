//! Layout pipeline: extraction, column splitting and plan assembly.
//!
//! Every function here is total: malformed markup and empty text still
//! produce a plan.

mod assembler;

pub use assembler::{assemble, SPAN_SEPARATOR};

use crate::model::{DocumentPlan, TypographySettings};
use crate::parser::{self, ExtractOptions, Extraction};

/// Lay out `text` with the default extraction options.
pub fn build_plan(text: &str, settings: &TypographySettings) -> DocumentPlan {
    plan_from_extraction(parser::extract(text), settings)
}

/// Lay out `text` with custom extraction options.
pub fn build_plan_with_options(
    text: &str,
    options: &ExtractOptions,
    settings: &TypographySettings,
) -> DocumentPlan {
    plan_from_extraction(parser::extract_with_options(text, options), settings)
}

/// Split the body of an extraction into columns and assemble the plan.
pub fn plan_from_extraction(extraction: Extraction, settings: &TypographySettings) -> DocumentPlan {
    let Extraction { spans, body_lines } = extraction;
    let columns = parser::split(body_lines);

    log::debug!(
        "Column split: {} / {} lines",
        columns.column1.len(),
        columns.column2.len()
    );

    assemble(&spans, &columns.column1, &columns.column2, settings)
}
