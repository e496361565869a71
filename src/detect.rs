//! DOCX container detection and validation.

use crate::error::{Error, Result};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Container format information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocxFormat {
    /// Whether the first zip entry is `[Content_Types].xml`, as Word writes it
    pub content_types_first: bool,
}

impl std::fmt::Display for DocxFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "DOCX (Office Open XML)")
    }
}

/// Zip local file header magic: PK\x03\x04
const ZIP_MAGIC: &[u8] = b"PK\x03\x04";
const ZIP_MAGIC_LEN: usize = 4;
/// Offset of the file name length field in a local file header.
const NAME_LEN_OFFSET: usize = 26;
/// Size of the fixed part of a local file header.
const HEADER_LEN: usize = 30;
const CONTENT_TYPES: &[u8] = b"[Content_Types].xml";

/// Detect a DOCX container from a file path.
///
/// # Example
/// ```no_run
/// use twocol::detect::detect_format_from_path;
///
/// let format = detect_format_from_path("notes.docx").unwrap();
/// println!("{}", format);
/// ```
pub fn detect_format_from_path<P: AsRef<Path>>(path: P) -> Result<DocxFormat> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let mut header = Vec::with_capacity(64);
    reader.take(64).read_to_end(&mut header)?;
    detect_format_from_bytes(&header)
}

/// Detect a DOCX container from bytes.
///
/// # Returns
/// * `Ok(DocxFormat)` if the data starts with a zip local file header
/// * `Err(Error::UnknownFormat)` otherwise
pub fn detect_format_from_bytes(data: &[u8]) -> Result<DocxFormat> {
    if data.len() < ZIP_MAGIC_LEN || !data.starts_with(ZIP_MAGIC) {
        return Err(Error::UnknownFormat);
    }

    Ok(DocxFormat {
        content_types_first: first_entry_name(data) == Some(CONTENT_TYPES),
    })
}

/// Name of the first zip entry, if the header is complete.
fn first_entry_name(data: &[u8]) -> Option<&[u8]> {
    let len_bytes = data.get(NAME_LEN_OFFSET..NAME_LEN_OFFSET + 2)?;
    let name_len = u16::from_le_bytes([len_bytes[0], len_bytes[1]]) as usize;
    data.get(HEADER_LEN..HEADER_LEN + name_len)
}

/// Check if a file looks like a DOCX container.
pub fn is_docx<P: AsRef<Path>>(path: P) -> bool {
    detect_format_from_path(path).is_ok()
}

/// Check if bytes look like a DOCX container.
pub fn is_docx_bytes(data: &[u8]) -> bool {
    detect_format_from_bytes(data).is_ok()
}
