//! Rendering options and configuration.

use crate::model::Metadata;

/// Default name offered for the generated file.
pub const DEFAULT_FILE_NAME: &str = "hebrew_layout.docx";

/// Twips per inch in WordprocessingML measurements.
pub const TWIPS_PER_INCH: u32 = 1440;

/// Options for rendering a document plan.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Page size, margins and column layout
    pub geometry: PageGeometry,

    /// Document properties written to `docProps/core.xml`
    pub metadata: Metadata,

    /// Font family applied to every run (None = application default)
    pub font_family: Option<String>,

    /// File name offered to hosts for download
    pub file_name: String,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the page geometry.
    pub fn with_geometry(mut self, geometry: PageGeometry) -> Self {
        self.geometry = geometry;
        self
    }

    /// Set the document metadata.
    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = metadata;
        self
    }

    /// Set the document title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.metadata.title = Some(title.into());
        self
    }

    /// Set the font family.
    pub fn with_font_family(mut self, family: impl Into<String>) -> Self {
        self.font_family = Some(family.into());
        self
    }

    /// Set the download file name.
    pub fn with_file_name(mut self, name: impl Into<String>) -> Self {
        self.file_name = name.into();
        self
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            geometry: PageGeometry::letter(),
            metadata: Metadata::default(),
            font_family: None,
            file_name: DEFAULT_FILE_NAME.to_string(),
        }
    }
}

/// Page and column geometry, in twips.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageGeometry {
    /// Page width
    pub width: u32,
    /// Page height
    pub height: u32,
    /// Top margin
    pub margin_top: u32,
    /// Right margin
    pub margin_right: u32,
    /// Bottom margin
    pub margin_bottom: u32,
    /// Left margin
    pub margin_left: u32,
    /// Number of text columns
    pub columns: u32,
    /// Gap between columns
    pub column_spacing: u32,
}

impl PageGeometry {
    /// US Letter (8.5in x 11in), 1in margins, two columns half an inch apart.
    pub const fn letter() -> Self {
        Self {
            width: 12240,
            height: 15840,
            margin_top: TWIPS_PER_INCH,
            margin_right: TWIPS_PER_INCH,
            margin_bottom: TWIPS_PER_INCH,
            margin_left: TWIPS_PER_INCH,
            columns: 2,
            column_spacing: 720,
        }
    }

    /// Same page with uniform margins.
    pub const fn with_margins(mut self, margin: u32) -> Self {
        self.margin_top = margin;
        self.margin_right = margin;
        self.margin_bottom = margin;
        self.margin_left = margin;
        self
    }
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self::letter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letter_geometry() {
        let geometry = PageGeometry::letter();
        assert_eq!(geometry.width, 12240);
        assert_eq!(geometry.height, 15840);
        assert_eq!(geometry.columns, 2);
        assert_eq!(geometry.column_spacing, 720);
        assert_eq!(geometry.margin_left, TWIPS_PER_INCH);
    }

    #[test]
    fn test_with_margins() {
        let geometry = PageGeometry::letter().with_margins(720);
        assert_eq!(geometry.margin_top, 720);
        assert_eq!(geometry.margin_right, 720);
        assert_eq!(geometry.width, 12240);
    }

    #[test]
    fn test_render_options_builder() {
        let options = RenderOptions::new()
            .with_title("Daf")
            .with_font_family("David")
            .with_file_name("out.docx");
        assert_eq!(options.metadata.title.as_deref(), Some("Daf"));
        assert_eq!(options.font_family.as_deref(), Some("David"));
        assert_eq!(options.file_name, "out.docx");
        assert_eq!(RenderOptions::default().file_name, DEFAULT_FILE_NAME);
    }
}
