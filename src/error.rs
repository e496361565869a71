//! Error types for twocol library.

use std::io;
use thiserror::Error;

/// Result type alias for twocol operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while building or rendering a layout.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Neither text nor an uploaded document was supplied.
    #[error("No input: enter some text or upload a document first")]
    InputAbsent,

    /// The data is not a recognised document container.
    #[error("Unknown file format: not a valid DOCX package")]
    UnknownFormat,

    /// An uploaded document could not be decoded.
    #[error("Document decoding error: {0}")]
    Decode(String),

    /// No input source is registered for the file extension.
    #[error("Unsupported input extension: {0}")]
    UnsupportedExtension(String),

    /// A font size is outside the accepted range.
    #[error("{field} must be between {min} and {max} points, got {value}")]
    InvalidFontSize {
        /// Name of the offending setting
        field: &'static str,
        /// Supplied value
        value: u32,
        /// Smallest accepted value
        min: u32,
        /// Largest accepted value
        max: u32,
    },

    /// The inline delimiter is empty.
    #[error("Inline delimiter must not be empty")]
    InvalidDelimiter,

    /// Error during rendering (DOCX, JSON).
    #[error("Rendering error: {0}")]
    Render(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Check if this error means there was nothing to lay out.
    ///
    /// Hosts show this as a warning rather than a failure.
    pub fn is_input_absent(&self) -> bool {
        matches!(self, Error::InputAbsent)
    }

    /// Check if this error came from decoding an uploaded document.
    pub fn is_decode_failure(&self) -> bool {
        matches!(self, Error::Decode(_) | Error::UnknownFormat)
    }
}

impl From<zip::result::ZipError> for Error {
    fn from(err: zip::result::ZipError) -> Self {
        match err {
            zip::result::ZipError::FileNotFound => {
                Error::Decode("missing part in DOCX package".to_string())
            }
            _ => Error::Decode(format!("invalid DOCX container: {}", err)),
        }
    }
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Error::Decode(format!("XML error: {}", err))
    }
}
