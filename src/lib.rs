//! # twocol
//!
//! Two-column document layout from lightly marked-up text.
//!
//! Text between paired `**` delimiters is lifted out of the body and
//! collected into a bold header; the remaining lines are split evenly into
//! two columns and written to a DOCX package, right- or left-aligned
//! according to the text direction.
//!
//! ## Quick Start
//!
//! ```no_run
//! use twocol::{generate, TypographySettings};
//!
//! fn main() -> twocol::Result<()> {
//!     let text = "**Gen 1:1** In the beginning\nGod created\nthe heaven and the earth";
//!     let document = generate(text, &TypographySettings::default())?;
//!     std::fs::write(&document.file_name, &document.bytes)?;
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Inline markup**: `**span**` pairs become a bold header, in order
//! - **Balanced columns**: body lines split by count, first half left
//! - **Direction**: right-to-left or left-to-right alignment
//! - **Uploads**: plain text extraction from DOCX and text files
//! - **Parallel processing**: uses Rayon for batch generation
//! - **Cleanup pipeline**: optional input normalization before extraction

pub mod convert;
pub mod detect;
pub mod error;
pub mod layout;
pub mod model;
pub mod parser;
pub mod preview;
pub mod render;

#[cfg(feature = "ffi")]
pub mod ffi;

// Re-export commonly used types
pub use convert::{resolve_text, SourceRegistry, TextSource, Upload};
pub use detect::{detect_format_from_bytes, detect_format_from_path, is_docx, DocxFormat};
pub use error::{Error, Result};
pub use model::{
    Alignment, Block, BlockRole, Column, Direction, DocumentPlan, Metadata, StyledText,
    TypographySettings, MAX_FONT_SIZE, MIN_FONT_SIZE,
};
pub use parser::{
    extract, CleanupOptions, CleanupPreset, ColumnAssignment, ExtractOptions, Extraction,
};
pub use preview::{preview, Preview};
pub use render::{
    GeneratedDocument, JsonFormat, LayoutStats, PageGeometry, RenderOptions, DOCX_MIME_TYPE,
};

use rayon::prelude::*;
use std::path::Path;

/// Generate a two-column DOCX from marked-up text.
///
/// # Errors
///
/// [`Error::InputAbsent`] if `text` is empty, [`Error::InvalidFontSize`] if
/// a font size is outside `[8, 72]`.
///
/// # Example
///
/// ```
/// use twocol::{generate, Direction, TypographySettings};
///
/// let settings = TypographySettings::default().with_direction(Direction::Ltr);
/// let document = generate("**Ref** Hello\nWorld", &settings).unwrap();
/// assert_eq!(document.file_name, "hebrew_layout.docx");
/// assert_eq!(document.stats.span_count, 1);
/// ```
pub fn generate(text: &str, settings: &TypographySettings) -> Result<GeneratedDocument> {
    generate_with_options(
        text,
        settings,
        &ExtractOptions::default(),
        &RenderOptions::default(),
    )
}

/// Generate a two-column DOCX with custom extraction and render options.
pub fn generate_with_options(
    text: &str,
    settings: &TypographySettings,
    extract_options: &ExtractOptions,
    render_options: &RenderOptions,
) -> Result<GeneratedDocument> {
    layout_text(text, settings, extract_options, render_options)?.to_docx()
}

/// Build the document plan for `text` without rendering it.
///
/// # Example
///
/// ```
/// use twocol::{plan, BlockRole, TypographySettings};
///
/// let plan = plan("**unterminated text", &TypographySettings::default()).unwrap();
/// assert_eq!(plan.blocks[0].role(), BlockRole::ColumnBreak);
/// ```
pub fn plan(text: &str, settings: &TypographySettings) -> Result<DocumentPlan> {
    let result = layout_text(
        text,
        settings,
        &ExtractOptions::default(),
        &RenderOptions::default(),
    )?;
    Ok(result.plan)
}

/// Extract the plain text of an uploaded file (DOCX or text).
///
/// # Example
///
/// ```no_run
/// use twocol::extract_text_file;
///
/// let text = extract_text_file("daf.docx").unwrap();
/// println!("{}", text);
/// ```
pub fn extract_text_file<P: AsRef<Path>>(path: P) -> Result<String> {
    SourceRegistry::with_defaults().read_path(path.as_ref())
}

/// One independent generation in a batch.
#[derive(Debug, Clone, Default)]
pub struct GenerationRequest {
    /// Marked-up input text
    pub text: String,
    /// Typography for this document
    pub settings: TypographySettings,
}

impl GenerationRequest {
    /// Create a new request.
    pub fn new(text: impl Into<String>, settings: TypographySettings) -> Self {
        Self {
            text: text.into(),
            settings,
        }
    }
}

/// Generate several documents in parallel.
///
/// Each request succeeds or fails on its own; results keep input order.
pub fn generate_batch(requests: &[GenerationRequest]) -> Vec<Result<GeneratedDocument>> {
    requests
        .par_iter()
        .map(|request| generate(&request.text, &request.settings))
        .collect()
}

fn layout_text(
    text: &str,
    settings: &TypographySettings,
    extract_options: &ExtractOptions,
    render_options: &RenderOptions,
) -> Result<TwocolResult> {
    if text.is_empty() {
        return Err(Error::InputAbsent);
    }
    settings.validate()?;

    let extraction = parser::extract_with_options(text, extract_options);
    let span_count = extraction.spans.len();
    let plan = layout::plan_from_extraction(extraction, settings);

    Ok(TwocolResult {
        stats: LayoutStats::from_plan(&plan, span_count),
        plan,
        render_options: render_options.clone(),
    })
}

/// Builder for laying out and rendering documents.
///
/// # Example
///
/// ```no_run
/// use twocol::{CleanupPreset, Direction, Twocol};
///
/// let document = Twocol::new()
///     .with_direction(Direction::Rtl)
///     .with_main_font_size(13)
///     .with_cleanup(CleanupPreset::Standard)
///     .with_title("Daf Yomi")
///     .layout("**Ref** text")?
///     .to_docx()?;
/// std::fs::write(&document.file_name, &document.bytes)?;
/// # Ok::<(), twocol::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Twocol {
    settings: TypographySettings,
    extract_options: ExtractOptions,
    render_options: RenderOptions,
}

impl Twocol {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace all typography settings.
    pub fn with_settings(mut self, settings: TypographySettings) -> Self {
        self.settings = settings;
        self
    }

    /// Set the body font size in points.
    pub fn with_main_font_size(mut self, size: u32) -> Self {
        self.settings = self.settings.with_main_font_size(size);
        self
    }

    /// Set the header font size in points.
    pub fn with_bold_font_size(mut self, size: u32) -> Self {
        self.settings = self.settings.with_bold_font_size(size);
        self
    }

    /// Set the text direction.
    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.settings = self.settings.with_direction(direction);
        self
    }

    /// Set the inline delimiter.
    ///
    /// Fails with [`Error::InvalidDelimiter`] if `delimiter` is empty.
    pub fn with_delimiter(mut self, delimiter: impl Into<String>) -> Result<Self> {
        self.extract_options = self.extract_options.with_delimiter(delimiter)?;
        Ok(self)
    }

    /// Set cleanup preset.
    pub fn with_cleanup(mut self, preset: CleanupPreset) -> Self {
        self.extract_options = self.extract_options.with_cleanup_preset(preset);
        self
    }

    /// Set the document title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.render_options = self.render_options.with_title(title);
        self
    }

    /// Set the document metadata.
    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.render_options = self.render_options.with_metadata(metadata);
        self
    }

    /// Set the font family.
    pub fn with_font_family(mut self, family: impl Into<String>) -> Self {
        self.render_options = self.render_options.with_font_family(family);
        self
    }

    /// Set the page geometry.
    pub fn with_geometry(mut self, geometry: PageGeometry) -> Self {
        self.render_options = self.render_options.with_geometry(geometry);
        self
    }

    /// Set the download file name.
    pub fn with_file_name(mut self, name: impl Into<String>) -> Self {
        self.render_options = self.render_options.with_file_name(name);
        self
    }

    /// Current typography settings.
    pub fn settings(&self) -> &TypographySettings {
        &self.settings
    }

    /// Preview what generation would extract from `text`.
    pub fn preview(&self, text: &str) -> Preview {
        preview::preview_with_options(text, &self.extract_options)
    }

    /// Lay out `text` and return a result wrapper.
    pub fn layout(&self, text: &str) -> Result<TwocolResult> {
        layout_text(
            text,
            &self.settings,
            &self.extract_options,
            &self.render_options,
        )
    }

    /// Lay out typed text, or the upload when nothing was typed.
    pub fn layout_input(&self, typed: &str, upload: Option<&Upload>) -> Result<TwocolResult> {
        let text = resolve_text(typed, upload, &SourceRegistry::with_defaults())?;
        self.layout(&text)
    }
}

/// Result of laying out a text.
#[derive(Debug, Clone)]
pub struct TwocolResult {
    /// The document plan
    pub plan: DocumentPlan,
    /// Statistics for the plan
    pub stats: LayoutStats,
    /// Render options to use
    render_options: RenderOptions,
}

impl TwocolResult {
    /// Render to a DOCX package.
    pub fn to_docx(&self) -> Result<GeneratedDocument> {
        let bytes = render::to_docx(&self.plan, &self.render_options)?;
        Ok(GeneratedDocument::new(
            bytes,
            self.render_options.file_name.clone(),
            self.stats,
        ))
    }

    /// Convert the plan to JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        render::to_json(&self.plan, format)
    }

    /// Convert the plan to plain text.
    pub fn to_text(&self) -> Result<String> {
        render::to_text(&self.plan)
    }

    /// Get the plan.
    pub fn plan(&self) -> &DocumentPlan {
        &self.plan
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_empty_text_is_input_absent() {
        let result = generate("", &TypographySettings::default());
        assert!(matches!(result, Err(Error::InputAbsent)));
    }

    #[test]
    fn test_generate_whitespace_text_still_generates() {
        let document = generate("   \n\t", &TypographySettings::default()).unwrap();
        assert!(!document.is_empty());
        assert_eq!(document.stats.body_lines(), 0);
    }

    #[test]
    fn test_generate_rejects_font_size() {
        let settings = TypographySettings::default().with_bold_font_size(73);
        let result = generate("text", &settings);
        assert!(matches!(
            result,
            Err(Error::InvalidFontSize {
                field: "bold_font_size",
                value: 73,
                ..
            })
        ));
    }

    #[test]
    fn test_generate_document() {
        let document = generate(
            "**Ref1** Hello\nWorld\n**Ref2** Foo",
            &TypographySettings::default(),
        )
        .unwrap();
        assert!(document.bytes.starts_with(b"PK\x03\x04"));
        assert_eq!(document.mime_type, DOCX_MIME_TYPE);
        assert_eq!(document.stats.span_count, 2);
        assert_eq!(document.stats.column1_lines, 1);
        assert_eq!(document.stats.column2_lines, 2);
    }

    #[test]
    fn test_plan_without_delimiters_starts_with_paragraph() {
        let plan = plan("one\ntwo", &TypographySettings::default()).unwrap();
        assert_eq!(plan.blocks[0].role(), BlockRole::FirstColumnParagraph);
    }

    #[test]
    fn test_generate_batch_keeps_order() {
        let requests = vec![
            GenerationRequest::new("a", TypographySettings::default()),
            GenerationRequest::new("", TypographySettings::default()),
            GenerationRequest::new(
                "**x** b\nc",
                TypographySettings::default().with_direction(Direction::Ltr),
            ),
        ];
        let results = generate_batch(&requests);
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].as_ref().unwrap().stats.span_count, 0);
        assert!(results[1].as_ref().unwrap_err().is_input_absent());
        assert_eq!(results[2].as_ref().unwrap().stats.span_count, 1);
    }

    // ==================== Builder Pattern Tests ====================

    #[test]
    fn test_twocol_builder() {
        let builder = Twocol::new()
            .with_main_font_size(10)
            .with_bold_font_size(20)
            .with_direction(Direction::Ltr)
            .with_cleanup(CleanupPreset::Standard)
            .with_title("Notes");

        assert_eq!(builder.settings().main_font_size, 10);
        assert_eq!(builder.settings().bold_font_size, 20);
        assert_eq!(builder.settings().direction, Direction::Ltr);
        assert!(builder.extract_options.cleanup.is_some());
        assert_eq!(builder.render_options.metadata.title.as_deref(), Some("Notes"));
    }

    #[test]
    fn test_twocol_builder_default() {
        let builder = Twocol::default();
        assert_eq!(builder.settings(), &TypographySettings::default());
        assert!(builder.extract_options.cleanup.is_none());
        assert_eq!(builder.render_options.file_name, "hebrew_layout.docx");
    }

    #[test]
    fn test_twocol_builder_empty_delimiter() {
        let result = Twocol::new().with_delimiter("");
        assert!(matches!(result, Err(Error::InvalidDelimiter)));
    }

    #[test]
    fn test_twocol_layout_outputs() {
        let result = Twocol::new()
            .with_file_name("out.docx")
            .layout("**Ref** body")
            .unwrap();

        let text = result.to_text().unwrap();
        assert!(text.starts_with("Ref\n\n"));

        let json = result.to_json(JsonFormat::Compact).unwrap();
        assert!(json.contains("\"type\":\"header\""));

        let document = result.to_docx().unwrap();
        assert_eq!(document.file_name, "out.docx");
    }

    #[test]
    fn test_twocol_cleanup_applies_before_extraction() {
        let result = Twocol::new()
            .with_cleanup(CleanupPreset::Minimal)
            .layout("**a** x\r\n**b** y")
            .unwrap();
        assert_eq!(result.plan().header().unwrap().text, "a b");
        assert_eq!(result.stats.body_lines(), 2);
        assert!(result
            .plan()
            .iter()
            .filter_map(|b| b.text())
            .all(|t| !t.text.contains('\r')));
    }

    #[test]
    fn test_twocol_layout_input_from_upload() {
        let upload = Upload::new("notes.txt", b"**Ref** uploaded".to_vec());
        let result = Twocol::new().layout_input("", Some(&upload)).unwrap();
        assert_eq!(result.plan().header().unwrap().text, "Ref");

        let result = Twocol::new().layout_input("", None);
        assert!(result.unwrap_err().is_input_absent());
    }

    #[test]
    fn test_twocol_preview() {
        let preview = Twocol::new().preview("**a** b");
        assert_eq!(preview.spans, vec!["a"]);
        assert_eq!(preview.body, " b");
    }
}
