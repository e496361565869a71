//! Composition of spans and columns into a document plan.

use crate::model::{Alignment, Block, Column, DocumentPlan, StyledText, TypographySettings};

/// Separator placed between spans in the header.
pub const SPAN_SEPARATOR: &str = " ";

/// Build a document plan from extracted spans and the two columns.
///
/// The plan contains, in order: one bold header holding every span (only if
/// there are spans), the first column's paragraphs, a column break, and the
/// second column's paragraphs. The column break is emitted even when the
/// first column is empty, so the second column always starts a fresh print
/// column.
///
/// Font sizes are taken as given; range checks belong to the caller.
pub fn assemble(
    spans: &[String],
    column1: &[String],
    column2: &[String],
    settings: &TypographySettings,
) -> DocumentPlan {
    let alignment = settings.alignment();
    let mut plan = DocumentPlan::new();

    if !spans.is_empty() {
        plan.push(Block::Header(StyledText::bold(
            spans.join(SPAN_SEPARATOR),
            settings.bold_font_size,
            alignment,
        )));
    }

    let size = settings.main_font_size;
    push_column(&mut plan, Column::First, column1, size, alignment);
    plan.push(Block::ColumnBreak { alignment });
    push_column(&mut plan, Column::Second, column2, size, alignment);

    plan
}

fn push_column(
    plan: &mut DocumentPlan,
    column: Column,
    lines: &[String],
    font_size: u32,
    alignment: Alignment,
) {
    for line in lines {
        plan.push(Block::Paragraph {
            column,
            text: StyledText::regular(line.as_str(), font_size, alignment),
        });
    }
}
