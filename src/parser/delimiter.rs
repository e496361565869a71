//! Inline delimiter extraction.
//!
//! Marked spans are pulled out of each line with a single left-to-right scan
//! that produces a token stream of literal and marked segments. A span never
//! crosses a line boundary.
//!
//! An opening delimiter without a matching closer on the same line ends the
//! scan for that line: the remainder, dangling delimiter included, stays in
//! the body untouched.

use super::options::ExtractOptions;
use serde::{Deserialize, Serialize};

/// The delimiter used when none is configured.
pub const DEFAULT_DELIMITER: &str = "**";

/// Kind of a line segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    /// Text that stays in the body
    Literal,
    /// Text that was enclosed by a delimiter pair
    Marked,
}

/// A piece of a line produced by [`tokenize_line`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment<'a> {
    /// Segment kind
    pub kind: SegmentKind,
    /// Segment text, without delimiters
    pub text: &'a str,
    /// Byte offset of `text` within the line
    pub offset: usize,
}

impl<'a> Segment<'a> {
    fn literal(text: &'a str, offset: usize) -> Self {
        Self {
            kind: SegmentKind::Literal,
            text,
            offset,
        }
    }

    fn marked(text: &'a str, offset: usize) -> Self {
        Self {
            kind: SegmentKind::Marked,
            text,
            offset,
        }
    }

    /// Check if this segment was enclosed by delimiters.
    pub fn is_marked(&self) -> bool {
        self.kind == SegmentKind::Marked
    }
}

/// Split one line into literal and marked segments.
///
/// Empty literal segments are omitted; empty marked segments (adjacent
/// delimiters) are kept. An empty `delimiter` yields the whole line as one
/// literal.
pub fn tokenize_line<'a>(line: &'a str, delimiter: &str) -> Vec<Segment<'a>> {
    let mut segments = Vec::new();
    let mut cursor = 0;

    if delimiter.is_empty() {
        if !line.is_empty() {
            segments.push(Segment::literal(line, 0));
        }
        return segments;
    }

    while cursor < line.len() {
        let rest = &line[cursor..];

        let Some(open) = rest.find(delimiter) else {
            segments.push(Segment::literal(rest, cursor));
            break;
        };

        let inner_start = open + delimiter.len();
        let Some(close) = rest[inner_start..].find(delimiter) else {
            // Unterminated: leave the remainder as-is.
            segments.push(Segment::literal(rest, cursor));
            break;
        };

        if open > 0 {
            segments.push(Segment::literal(&rest[..open], cursor));
        }
        let inner_end = inner_start + close;
        segments.push(Segment::marked(
            &rest[inner_start..inner_end],
            cursor + inner_start,
        ));
        cursor += inner_end + delimiter.len();
    }

    segments
}

/// Result of extracting marked spans from a text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extraction {
    /// Marked spans in order of appearance
    pub spans: Vec<String>,

    /// Non-blank body lines with all marked regions removed
    pub body_lines: Vec<String>,
}

impl Extraction {
    /// Body text: the body lines joined with newlines.
    pub fn body(&self) -> String {
        self.body_lines.join("\n")
    }

    /// Check if at least one span was found.
    pub fn has_spans(&self) -> bool {
        !self.spans.is_empty()
    }

    /// Check if neither spans nor body lines were found.
    pub fn is_empty(&self) -> bool {
        self.spans.is_empty() && self.body_lines.is_empty()
    }
}

/// Extract marked spans from `text` with the default delimiter.
pub fn extract(text: &str) -> Extraction {
    extract_with_delimiter(text, DEFAULT_DELIMITER)
}

/// Extract marked spans from `text` using `options`.
///
/// Cleanup, when configured, runs before extraction.
pub fn extract_with_options(text: &str, options: &ExtractOptions) -> Extraction {
    match options.cleanup_pipeline() {
        Some(pipeline) => {
            let cleaned = pipeline.process(text);
            extract_with_delimiter(&cleaned, options.delimiter())
        }
        None => extract_with_delimiter(text, options.delimiter()),
    }
}

/// Extract marked spans from `text` using a specific delimiter.
pub fn extract_with_delimiter(text: &str, delimiter: &str) -> Extraction {
    let mut extraction = Extraction::default();

    for line in text.split('\n') {
        let mut body = String::with_capacity(line.len());
        for segment in tokenize_line(line, delimiter) {
            match segment.kind {
                SegmentKind::Marked => extraction.spans.push(segment.text.to_string()),
                SegmentKind::Literal => body.push_str(segment.text),
            }
        }
        if !body.trim().is_empty() {
            extraction.body_lines.push(body);
        }
    }

    log::debug!(
        "Extracted {} spans and {} body lines",
        extraction.spans.len(),
        extraction.body_lines.len()
    );

    extraction
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts<'a>(segments: &[Segment<'a>]) -> Vec<(bool, &'a str)> {
        segments.iter().map(|s| (s.is_marked(), s.text)).collect()
    }

    #[test]
    fn test_tokenize_plain_line() {
        let segments = tokenize_line("no markup here", "**");
        assert_eq!(texts(&segments), vec![(false, "no markup here")]);
    }

    #[test]
    fn test_tokenize_multiple_pairs() {
        let segments = tokenize_line("a **b** c **d**", "**");
        assert_eq!(
            texts(&segments),
            vec![(false, "a "), (true, "b"), (false, " c "), (true, "d")]
        );
        assert_eq!(segments[1].offset, 4);
        assert_eq!(segments[3].offset, 12);
    }

    #[test]
    fn test_tokenize_unterminated_after_pair() {
        let segments = tokenize_line("**x** tail **open", "**");
        assert_eq!(
            texts(&segments),
            vec![(true, "x"), (false, " tail **open")]
        );
    }

    #[test]
    fn test_tokenize_empty_span() {
        let segments = tokenize_line("before****after", "**");
        assert_eq!(
            texts(&segments),
            vec![(false, "before"), (true, ""), (false, "after")]
        );
    }

    #[test]
    fn test_tokenize_empty_delimiter() {
        let segments = tokenize_line("**x**", "");
        assert_eq!(texts(&segments), vec![(false, "**x**")]);
    }

    #[test]
    fn test_extract_example() {
        let extraction = extract("**Ref1** Hello\nWorld\n**Ref2** Foo");
        assert_eq!(extraction.spans, vec!["Ref1", "Ref2"]);
        assert_eq!(extraction.body_lines, vec![" Hello", "World", " Foo"]);
        assert_eq!(extraction.body(), " Hello\nWorld\n Foo");
    }

    #[test]
    fn test_extract_unterminated() {
        let extraction = extract("**unterminated text");
        assert!(extraction.spans.is_empty());
        assert_eq!(extraction.body_lines, vec!["**unterminated text"]);
    }

    #[test]
    fn test_extract_drops_blank_lines() {
        let extraction = extract("**only a span**\n\n   \nbody\n\t");
        assert_eq!(extraction.spans, vec!["only a span"]);
        assert_eq!(extraction.body_lines, vec!["body"]);
    }

    #[test]
    fn test_extract_span_does_not_cross_lines() {
        let extraction = extract("**open\nclose**");
        assert!(extraction.spans.is_empty());
        assert_eq!(extraction.body_lines, vec!["**open", "close**"]);
    }

    #[test]
    fn test_extract_keeps_duplicates_and_empty_spans() {
        let extraction = extract("**a** **a** ****");
        assert_eq!(extraction.spans, vec!["a", "a", ""]);
        assert_eq!(extraction.body_lines, Vec::<String>::new());
    }

    #[test]
    fn test_extract_hebrew() {
        let extraction = extract("**בראשית א** בראשית ברא אלהים");
        assert_eq!(extraction.spans, vec!["בראשית א"]);
        assert_eq!(extraction.body_lines, vec![" בראשית ברא אלהים"]);
    }

    #[test]
    fn test_extract_custom_delimiter() {
        let extraction = extract_with_delimiter("[[ref]] text", "[[");
        // Same delimiter opens and closes.
        assert!(extraction.spans.is_empty());

        let extraction = extract_with_delimiter("__ref__ text", "__");
        assert_eq!(extraction.spans, vec!["ref"]);
        assert_eq!(extraction.body_lines, vec![" text"]);
    }

    #[test]
    fn test_extract_empty_input() {
        let extraction = extract("");
        assert!(extraction.is_empty());
        assert!(!extraction.has_spans());
    }
}
