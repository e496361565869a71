//! Plain-text extraction from DOCX packages.
//!
//! Only body-level paragraphs are read, in document order. Styling is
//! discarded. Paragraphs nested in tables or text boxes are not part of the
//! body and are skipped.

use std::io::{Cursor, Read, Seek};
use std::path::Path;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::detect::detect_format_from_bytes;
use crate::error::{Error, Result};

/// Location of the main document part inside the package.
const DOCUMENT_PART: &str = "word/document.xml";

/// DOCX text reader.
#[derive(Debug, Clone)]
pub struct DocxReader {
    document_xml: String,
}

impl DocxReader {
    /// Open a DOCX file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data = std::fs::read(path)?;
        Self::from_bytes(&data)
    }

    /// Read a DOCX package from bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        detect_format_from_bytes(data)?;
        Self::from_seekable(Cursor::new(data))
    }

    /// Read a DOCX package from a reader.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::from_bytes(&data)
    }

    fn from_seekable<R: Read + Seek>(reader: R) -> Result<Self> {
        let mut archive = zip::ZipArchive::new(reader)?;
        let mut part = archive
            .by_name(DOCUMENT_PART)
            .map_err(|_| Error::Decode(format!("package has no {}", DOCUMENT_PART)))?;

        let mut document_xml = String::new();
        part.read_to_string(&mut document_xml)
            .map_err(|e| Error::Decode(format!("cannot read {}: {}", DOCUMENT_PART, e)))?;

        Ok(Self { document_xml })
    }

    /// Body paragraph texts, in order.
    pub fn paragraphs(&self) -> Result<Vec<String>> {
        let paragraphs = parse_body_paragraphs(&self.document_xml)?;
        if paragraphs.is_empty() {
            log::warn!("DOCX body has no paragraphs");
        }
        Ok(paragraphs)
    }

    /// Paragraph texts joined with newlines.
    pub fn plain_text(&self) -> Result<String> {
        Ok(self.paragraphs()?.join("\n"))
    }
}

/// Extract the plain text of a DOCX package held in memory.
pub fn extract_plain_text(data: &[u8]) -> Result<String> {
    DocxReader::from_bytes(data)?.plain_text()
}

/// Parse `word/document.xml` and return the text of each body paragraph.
pub fn parse_body_paragraphs(xml: &str) -> Result<Vec<String>> {
    let mut reader = Reader::from_str(xml);

    let mut stack: Vec<Vec<u8>> = Vec::new();
    let mut paragraphs = Vec::new();
    let mut current: Option<String> = None;
    let mut in_text = false;

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                let name = e.local_name().as_ref().to_vec();
                match name.as_slice() {
                    b"p" if parent_is(&stack, b"body") => current = Some(String::new()),
                    b"t" if in_body_run(&stack) => in_text = true,
                    _ => {}
                }
                stack.push(name);
            }
            Event::End(e) => {
                stack.pop();
                match e.local_name().as_ref() {
                    b"t" => in_text = false,
                    b"p" if parent_is(&stack, b"body") => {
                        if let Some(text) = current.take() {
                            paragraphs.push(text);
                        }
                    }
                    _ => {}
                }
            }
            Event::Empty(e) => match e.local_name().as_ref() {
                b"p" if parent_is(&stack, b"body") => paragraphs.push(String::new()),
                b"tab" if in_body_run(&stack) => push_char(&mut current, '\t'),
                b"br" if in_body_run(&stack) && is_line_break(&e) => push_char(&mut current, '\n'),
                b"cr" if in_body_run(&stack) => push_char(&mut current, '\n'),
                _ => {}
            },
            Event::Text(t) => {
                if in_text {
                    if let Some(text) = current.as_mut() {
                        let unescaped = t
                            .unescape()
                            .map_err(|e| Error::Decode(format!("bad text content: {}", e)))?;
                        text.push_str(&unescaped);
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(paragraphs)
}

fn parent_is(stack: &[Vec<u8>], name: &[u8]) -> bool {
    stack.last().map(|n| n.as_slice() == name).unwrap_or(false)
}

/// Whether the innermost open element is a run of a body paragraph.
fn in_body_run(stack: &[Vec<u8>]) -> bool {
    parent_is(stack, b"r") && stack.iter().filter(|n| n.as_slice() == b"p").count() == 1
}

/// A `w:br` without a type, or with `textWrapping`, is a line break.
/// Column and page breaks carry no text.
fn is_line_break(element: &BytesStart<'_>) -> bool {
    element
        .attributes()
        .flatten()
        .find(|attr| attr.key.local_name().as_ref() == b"type")
        .map(|attr| attr.value.as_ref() == b"textWrapping")
        .unwrap_or(true)
}

fn push_char(current: &mut Option<String>, c: char) {
    if let Some(text) = current.as_mut() {
        text.push(c);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NS: &str = r#"xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main""#;

    fn document(body: &str) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?><w:document {}><w:body>{}</w:body></w:document>"#,
            NS, body
        )
    }

    #[test]
    fn test_parse_simple_paragraphs() {
        let xml = document(
            "<w:p><w:r><w:t>Hello World</w:t></w:r></w:p>\
             <w:p><w:r><w:t>Second paragraph</w:t></w:r></w:p>",
        );
        let paragraphs = parse_body_paragraphs(&xml).unwrap();
        assert_eq!(paragraphs, vec!["Hello World", "Second paragraph"]);
    }

    #[test]
    fn test_parse_runs_are_concatenated_and_whitespace_kept() {
        let xml = document(
            r#"<w:p><w:r><w:rPr><w:b/></w:rPr><w:t>**Ref**</w:t></w:r><w:r><w:t xml:space="preserve"> body &amp; more</w:t></w:r></w:p>"#,
        );
        let paragraphs = parse_body_paragraphs(&xml).unwrap();
        assert_eq!(paragraphs, vec!["**Ref** body & more"]);
    }

    #[test]
    fn test_parse_empty_paragraphs_kept() {
        let xml = document("<w:p/><w:p><w:pPr/></w:p><w:p><w:r><w:t>x</w:t></w:r></w:p>");
        let paragraphs = parse_body_paragraphs(&xml).unwrap();
        assert_eq!(paragraphs, vec!["", "", "x"]);
    }

    #[test]
    fn test_parse_tabs_and_breaks() {
        let xml = document(
            "<w:p><w:pPr><w:tabs><w:tab w:val=\"left\" w:pos=\"720\"/></w:tabs></w:pPr>\
             <w:r><w:t>a</w:t><w:tab/><w:t>b</w:t><w:br/><w:t>c</w:t></w:r></w:p>",
        );
        let paragraphs = parse_body_paragraphs(&xml).unwrap();
        assert_eq!(paragraphs, vec!["a\tb\nc"]);
    }

    #[test]
    fn test_parse_column_break_carries_no_text() {
        let xml = document(
            r#"<w:p><w:r><w:br w:type="column"/></w:r></w:p><w:p><w:r><w:t>a</w:t><w:br w:type="textWrapping"/><w:t>b</w:t></w:r></w:p>"#,
        );
        let paragraphs = parse_body_paragraphs(&xml).unwrap();
        assert_eq!(paragraphs, vec!["", "a\nb"]);
    }

    #[test]
    fn test_parse_skips_table_paragraphs() {
        let xml = document(
            "<w:p><w:r><w:t>before</w:t></w:r></w:p>\
             <w:tbl><w:tr><w:tc><w:p><w:r><w:t>cell</w:t></w:r></w:p></w:tc></w:tr></w:tbl>\
             <w:p><w:r><w:t>after</w:t></w:r></w:p>",
        );
        let paragraphs = parse_body_paragraphs(&xml).unwrap();
        assert_eq!(paragraphs, vec!["before", "after"]);
    }

    #[test]
    fn test_parse_hyperlink_text_included() {
        let xml = document(
            "<w:p><w:r><w:t>see </w:t></w:r><w:hyperlink><w:r><w:t>link</w:t></w:r></w:hyperlink></w:p>",
        );
        let paragraphs = parse_body_paragraphs(&xml).unwrap();
        assert_eq!(paragraphs, vec!["see link"]);
    }

    #[test]
    fn test_from_bytes_rejects_non_zip() {
        let result = DocxReader::from_bytes(b"plain text, not a package");
        assert!(matches!(result, Err(Error::UnknownFormat)));
    }

    #[test]
    fn test_from_bytes_rejects_truncated_zip() {
        let result = DocxReader::from_bytes(b"PK\x03\x04garbage");
        assert!(result.is_err());
        assert!(result.unwrap_err().is_decode_failure());
    }
}
