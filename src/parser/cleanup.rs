//! Input text cleanup applied before extraction.
//!
//! Text pasted into an editor or pulled out of an uploaded document often
//! carries Windows line endings, a byte-order mark, decomposed Hebrew points
//! or stray control characters. None of this changes the markup semantics;
//! the pipeline only normalizes the raw text the extractor sees.

use regex::Regex;
use std::sync::OnceLock;
use unicode_normalization::UnicodeNormalization;

/// Cleanup preset levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CleanupPreset {
    /// Line endings and byte-order mark only
    Minimal,
    /// Minimal + NFC + control/replacement character removal + trailing whitespace
    #[default]
    Standard,
    /// Standard + Private Use Area removal + space collapsing
    Aggressive,
}

/// Options for text cleanup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanupOptions {
    /// Convert `\r\n` and lone `\r` to `\n`
    pub normalize_line_endings: bool,

    /// Remove a leading byte-order mark (U+FEFF)
    pub strip_bom: bool,

    /// Normalize Unicode to NFC form
    pub normalize_unicode: bool,

    /// Remove Unicode replacement character (U+FFFD)
    pub remove_replacement_char: bool,

    /// Remove C0 control characters other than tab and newline
    pub remove_control_chars: bool,

    /// Remove Private Use Area (PUA) characters
    pub remove_pua: bool,

    /// Strip spaces and tabs at the end of each line
    pub trim_trailing_whitespace: bool,

    /// Collapse runs of spaces and tabs into a single space
    pub collapse_spaces: bool,
}

impl CleanupOptions {
    /// Create options from a preset.
    pub fn from_preset(preset: CleanupPreset) -> Self {
        match preset {
            CleanupPreset::Minimal => Self::minimal(),
            CleanupPreset::Standard => Self::standard(),
            CleanupPreset::Aggressive => Self::aggressive(),
        }
    }

    /// Minimal cleanup options.
    pub fn minimal() -> Self {
        Self {
            normalize_line_endings: true,
            strip_bom: true,
            normalize_unicode: false,
            remove_replacement_char: false,
            remove_control_chars: false,
            remove_pua: false,
            trim_trailing_whitespace: false,
            collapse_spaces: false,
        }
    }

    /// Standard cleanup options.
    pub fn standard() -> Self {
        Self {
            normalize_unicode: true,
            remove_replacement_char: true,
            remove_control_chars: true,
            trim_trailing_whitespace: true,
            ..Self::minimal()
        }
    }

    /// Aggressive cleanup options.
    pub fn aggressive() -> Self {
        Self {
            remove_pua: true,
            collapse_spaces: true,
            ..Self::standard()
        }
    }
}

impl Default for CleanupOptions {
    fn default() -> Self {
        Self::standard()
    }
}

fn trailing_whitespace_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?m)[ \t]+$").expect("static pattern"))
}

fn space_run_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[ \t]{2,}").expect("static pattern"))
}

/// Text cleanup pipeline.
#[derive(Debug, Clone, Default)]
pub struct CleanupPipeline {
    options: CleanupOptions,
}

impl CleanupPipeline {
    /// Create a new cleanup pipeline with the given options.
    pub fn new(options: CleanupOptions) -> Self {
        Self { options }
    }

    /// Create a pipeline from a preset.
    pub fn from_preset(preset: CleanupPreset) -> Self {
        Self::new(CleanupOptions::from_preset(preset))
    }

    /// Process text through the cleanup pipeline.
    pub fn process(&self, text: &str) -> String {
        let mut result = text.to_string();

        if self.options.strip_bom {
            if let Some(stripped) = result.strip_prefix('\u{FEFF}') {
                result = stripped.to_string();
            }
        }

        if self.options.normalize_line_endings {
            result = result.replace("\r\n", "\n").replace('\r', "\n");
        }

        if self.options.normalize_unicode {
            result = result.nfc().collect();
        }

        if self.options.remove_replacement_char {
            result = result.replace('\u{FFFD}', "");
        }

        if self.options.remove_control_chars {
            result = remove_control_chars(&result);
        }

        if self.options.remove_pua {
            result = remove_pua_chars(&result);
        }

        if self.options.trim_trailing_whitespace {
            result = trailing_whitespace_regex()
                .replace_all(&result, "")
                .into_owned();
        }

        if self.options.collapse_spaces {
            result = space_run_regex().replace_all(&result, " ").into_owned();
        }

        result
    }
}

fn remove_control_chars(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_control() || *c == '\n' || *c == '\t')
        .collect()
}

fn remove_pua_chars(text: &str) -> String {
    text.chars()
        .filter(|c| {
            let code = *c as u32;
            !(0xE000..=0xF8FF).contains(&code)
                && !(0xF0000..=0xFFFFD).contains(&code)
                && !(0x100000..=0x10FFFD).contains(&code)
        })
        .collect()
}
