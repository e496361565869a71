//! C-ABI FFI bindings for cross-language integration.
//!
//! This module provides a C-compatible API for using twocol from other
//! languages such as C#, Python, and Node.js.

use std::ffi::{c_char, CStr, CString};
use std::path::Path;
use std::ptr;

use crate::render::JsonFormat;
use crate::{extract_text_file, generate, plan, preview, render, Direction, TypographySettings};

/// Result structure returned by FFI functions.
#[repr(C)]
pub struct TwocolResult {
    /// Whether the operation succeeded.
    pub success: bool,
    /// The result data (null if failed). Must be freed with `twocol_free_result`.
    pub data: *mut c_char,
    /// Error message (null if succeeded). Must be freed with `twocol_free_result`.
    pub error: *mut c_char,
}

impl TwocolResult {
    /// Fails instead of truncating when `data` holds a NUL byte.
    fn success(data: String) -> Self {
        match CString::new(data) {
            Ok(data) => Self {
                success: true,
                data: data.into_raw(),
                error: ptr::null_mut(),
            },
            Err(e) => Self::error(format!(
                "Result contains a NUL byte at position {}",
                e.nul_position()
            )),
        }
    }

    fn error(message: String) -> Self {
        Self {
            success: false,
            data: ptr::null_mut(),
            error: c_message(message).into_raw(),
        }
    }
}

/// Error text as a C string, with NUL bytes stripped.
fn c_message(message: String) -> CString {
    CString::new(message.replace('\0', "")).unwrap_or_default()
}

/// Binary result returned by `twocol_generate`.
#[repr(C)]
pub struct TwocolBuffer {
    /// Whether the operation succeeded.
    pub success: bool,
    /// DOCX bytes (null if failed). Must be freed with `twocol_free_buffer`.
    pub data: *mut u8,
    /// Number of bytes in `data`.
    pub len: usize,
    /// Error message (null if succeeded). Must be freed with `twocol_free_buffer`.
    pub error: *mut c_char,
    /// Whether the failure means there was no input (a warning, not an error).
    pub input_absent: bool,
}

impl TwocolBuffer {
    fn success(bytes: Vec<u8>) -> Self {
        let boxed = bytes.into_boxed_slice();
        let len = boxed.len();
        Self {
            success: true,
            data: Box::into_raw(boxed) as *mut u8,
            len,
            error: ptr::null_mut(),
            input_absent: false,
        }
    }

    fn error(err: &crate::Error) -> Self {
        Self {
            success: false,
            data: ptr::null_mut(),
            len: 0,
            error: c_message(err.to_string()).into_raw(),
            input_absent: err.is_input_absent(),
        }
    }
}

/// Typography options via FFI.
#[repr(C)]
pub struct TwocolOptions {
    /// Body font size in points (8-72).
    pub main_font_size: u32,
    /// Header font size in points (8-72).
    pub bold_font_size: u32,
    /// "rtl", "ltr" or "auto" (null = "rtl").
    pub direction: *const c_char,
}

impl Default for TwocolOptions {
    fn default() -> Self {
        Self {
            main_font_size: 12,
            bold_font_size: 14,
            direction: ptr::null(),
        }
    }
}

unsafe fn c_str<'a>(value: *const c_char, what: &str) -> Result<&'a str, String> {
    if value.is_null() {
        return Err(format!("{} cannot be null", what));
    }
    CStr::from_ptr(value)
        .to_str()
        .map_err(|_| format!("Invalid UTF-8 {}", what.to_lowercase()))
}

unsafe fn settings_from(options: &TwocolOptions, text: &str) -> crate::Result<TypographySettings> {
    let direction = if options.direction.is_null() {
        Direction::default()
    } else {
        match CStr::from_ptr(options.direction).to_str() {
            Ok("auto") => Direction::detect(text),
            Ok(value) => value.parse()?,
            Err(_) => return Err(crate::Error::Other("Invalid UTF-8 direction".into())),
        }
    };

    Ok(TypographySettings::new()
        .with_main_font_size(options.main_font_size)
        .with_bold_font_size(options.bold_font_size)
        .with_direction(direction))
}

/// Generate a two-column DOCX package in memory.
///
/// # Safety
///
/// The `text` must be a valid null-terminated UTF-8 string, and
/// `options.direction` must be null or a valid null-terminated UTF-8 string.
/// The returned buffer must be freed with `twocol_free_buffer`.
#[no_mangle]
pub unsafe extern "C" fn twocol_generate(
    text: *const c_char,
    options: TwocolOptions,
) -> TwocolBuffer {
    let text = match c_str(text, "Text") {
        Ok(s) => s,
        Err(message) => return TwocolBuffer::error(&crate::Error::Other(message)),
    };

    let result = settings_from(&options, text).and_then(|settings| generate(text, &settings));
    match result {
        Ok(document) => TwocolBuffer::success(document.bytes),
        Err(e) => TwocolBuffer::error(&e),
    }
}

/// Generate a two-column DOCX and write it to `output_path`.
///
/// On success `data` holds the layout statistics as JSON.
///
/// # Safety
///
/// The `text` and `output_path` must be valid null-terminated UTF-8 strings.
/// The returned result must be freed with `twocol_free_result`.
#[no_mangle]
pub unsafe extern "C" fn twocol_generate_to_file(
    text: *const c_char,
    options: TwocolOptions,
    output_path: *const c_char,
) -> TwocolResult {
    let text = match c_str(text, "Text") {
        Ok(s) => s,
        Err(message) => return TwocolResult::error(message),
    };
    let output_path = match c_str(output_path, "Output path") {
        Ok(s) => s,
        Err(message) => return TwocolResult::error(message),
    };

    match settings_from(&options, text)
        .and_then(|settings| generate_to_file_internal(text, &settings, Path::new(output_path)))
    {
        Ok(stats) => TwocolResult::success(stats),
        Err(e) => TwocolResult::error(e.to_string()),
    }
}

fn generate_to_file_internal(
    text: &str,
    settings: &TypographySettings,
    output_path: &Path,
) -> crate::Result<String> {
    let document = generate(text, settings)?;
    std::fs::write(output_path, &document.bytes)?;
    serde_json::to_string(&document.stats)
        .map_err(|e| crate::Error::Render(format!("JSON serialization error: {}", e)))
}

/// Preview the spans and body of a text as JSON.
///
/// # Safety
///
/// The `text` must be a valid null-terminated UTF-8 string.
/// The returned result must be freed with `twocol_free_result`.
#[no_mangle]
pub unsafe extern "C" fn twocol_preview_json(text: *const c_char) -> TwocolResult {
    let text = match c_str(text, "Text") {
        Ok(s) => s,
        Err(message) => return TwocolResult::error(message),
    };

    match serde_json::to_string(&preview(text)) {
        Ok(json) => TwocolResult::success(json),
        Err(e) => TwocolResult::error(format!("JSON serialization error: {}", e)),
    }
}

/// Lay out a text and return the document plan as JSON.
///
/// # Safety
///
/// The `text` must be a valid null-terminated UTF-8 string, and
/// `options.direction` must be null or a valid null-terminated UTF-8 string.
/// The returned result must be freed with `twocol_free_result`.
#[no_mangle]
pub unsafe extern "C" fn twocol_plan_json(
    text: *const c_char,
    options: TwocolOptions,
    pretty: bool,
) -> TwocolResult {
    let text = match c_str(text, "Text") {
        Ok(s) => s,
        Err(message) => return TwocolResult::error(message),
    };

    let format = if pretty {
        JsonFormat::Pretty
    } else {
        JsonFormat::Compact
    };

    let result = settings_from(&options, text)
        .and_then(|settings| plan(text, &settings))
        .and_then(|plan| render::to_json(&plan, format));
    match result {
        Ok(json) => TwocolResult::success(json),
        Err(e) => TwocolResult::error(e.to_string()),
    }
}

/// Extract the plain text of an uploaded document.
///
/// # Safety
///
/// The `path` must be a valid null-terminated UTF-8 string.
/// The returned result must be freed with `twocol_free_result`.
#[no_mangle]
pub unsafe extern "C" fn twocol_extract_text(path: *const c_char) -> TwocolResult {
    let path = match c_str(path, "Path") {
        Ok(s) => s,
        Err(message) => return TwocolResult::error(message),
    };

    match extract_text_file(Path::new(path)) {
        Ok(text) => TwocolResult::success(text),
        Err(e) => TwocolResult::error(e.to_string()),
    }
}

/// Check if a file is a DOCX package.
///
/// # Safety
///
/// The `path` must be a valid null-terminated UTF-8 string.
#[no_mangle]
pub unsafe extern "C" fn twocol_is_docx(path: *const c_char) -> bool {
    match c_str(path, "Path") {
        Ok(path) => crate::detect::is_docx(Path::new(path)),
        Err(_) => false,
    }
}

/// Free a result returned by any twocol function.
///
/// # Safety
///
/// The `result` must have been returned by a twocol function.
/// This function should only be called once per result.
#[no_mangle]
pub unsafe extern "C" fn twocol_free_result(result: TwocolResult) {
    if !result.data.is_null() {
        drop(CString::from_raw(result.data));
    }
    if !result.error.is_null() {
        drop(CString::from_raw(result.error));
    }
}

/// Free a buffer returned by `twocol_generate`.
///
/// # Safety
///
/// The `buffer` must have been returned by `twocol_generate`.
/// This function should only be called once per buffer.
#[no_mangle]
pub unsafe extern "C" fn twocol_free_buffer(buffer: TwocolBuffer) {
    if !buffer.data.is_null() {
        let slice = ptr::slice_from_raw_parts_mut(buffer.data, buffer.len);
        drop(Box::from_raw(slice));
    }
    if !buffer.error.is_null() {
        drop(CString::from_raw(buffer.error));
    }
}

/// Free a string allocated by twocol.
///
/// # Safety
///
/// The `ptr` must have been allocated by twocol.
/// This function should only be called once per pointer.
#[no_mangle]
pub unsafe extern "C" fn twocol_free_string(ptr: *mut c_char) {
    if !ptr.is_null() {
        drop(CString::from_raw(ptr));
    }
}

/// Get the version of the twocol library.
///
/// # Safety
///
/// The returned string is statically allocated and should not be freed.
#[no_mangle]
pub extern "C" fn twocol_version() -> *const c_char {
    static VERSION: &[u8] = concat!(env!("CARGO_PKG_VERSION"), "\0").as_bytes();
    VERSION.as_ptr() as *const c_char
}
