//! DOCX rendering for document plans.
//!
//! The package is written by hand with `zip` and `quick-xml`: a content-types
//! manifest, package relationships, core and app properties, a style sheet
//! and the main document part. The body is one continuous section laid out
//! in columns; the column break block becomes a paragraph holding a
//! `w:br w:type="column"`.

use std::io::{Cursor, Write};

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::error::{Error, Result};
use crate::model::{Alignment, Block, DocumentPlan, Metadata, StyledText};

use super::{PageGeometry, RenderOptions};

const NS_W: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
const NS_R: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
const NS_PKG_RELS: &str = "http://schemas.openxmlformats.org/package/2006/relationships";
const NS_CONTENT_TYPES: &str = "http://schemas.openxmlformats.org/package/2006/content-types";
const NS_CORE: &str =
    "http://schemas.openxmlformats.org/package/2006/metadata/core-properties";
const NS_EXTENDED: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/extended-properties";

const REL_OFFICE_DOCUMENT: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument";
const REL_CORE: &str =
    "http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties";
const REL_EXTENDED: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/extended-properties";
const REL_STYLES: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles";

const CT_DOCUMENT: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml";
const CT_STYLES: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml";
const CT_CORE: &str = "application/vnd.openxmlformats-package.core-properties+xml";
const CT_EXTENDED: &str = "application/vnd.openxmlformats-officedocument.extended-properties+xml";
const CT_RELS: &str = "application/vnd.openxmlformats-package.relationships+xml";

/// Application name recorded in `docProps/app.xml`.
const APPLICATION: &str = "twocol";

/// Convert a document plan to a DOCX package.
pub fn to_docx(plan: &DocumentPlan, options: &RenderOptions) -> Result<Vec<u8>> {
    let renderer = DocxRenderer::new(options.clone());
    renderer.render(plan)
}

/// DOCX renderer.
pub struct DocxRenderer {
    options: RenderOptions,
}

impl DocxRenderer {
    /// Create a new DOCX renderer.
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    /// Render a plan to the bytes of a DOCX package.
    pub fn render(&self, plan: &DocumentPlan) -> Result<Vec<u8>> {
        let parts = [
            ("[Content_Types].xml", content_types()?),
            ("_rels/.rels", package_relationships()?),
            ("docProps/core.xml", core_properties(&self.options.metadata)?),
            ("docProps/app.xml", app_properties()?),
            ("word/_rels/document.xml.rels", document_relationships()?),
            ("word/styles.xml", self.styles()?),
            ("word/document.xml", self.document(plan)?),
        ];

        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        for (name, body) in parts {
            zip.start_file(name, file_options()).map_err(render_error)?;
            zip.write_all(&body).map_err(render_error)?;
        }
        let cursor = zip.finish().map_err(render_error)?;
        let bytes = cursor.into_inner();

        log::debug!(
            "Rendered {} blocks into {} byte DOCX package",
            plan.len(),
            bytes.len()
        );

        Ok(bytes)
    }

    fn document(&self, plan: &DocumentPlan) -> Result<Vec<u8>> {
        let mut xml = PartWriter::new()?;
        xml.start("w:document", &[("xmlns:w", NS_W), ("xmlns:r", NS_R)])?;
        xml.start("w:body", &[])?;

        for block in plan {
            match block {
                Block::Header(text) | Block::Paragraph { text, .. } => {
                    write_paragraph(&mut xml, text)?;
                }
                Block::ColumnBreak { alignment } => write_column_break(&mut xml, *alignment)?,
            }
        }

        write_section(&mut xml, &self.options.geometry)?;
        xml.end("w:body")?;
        xml.end("w:document")?;
        Ok(xml.finish())
    }

    fn styles(&self) -> Result<Vec<u8>> {
        let mut xml = PartWriter::new()?;
        xml.start("w:styles", &[("xmlns:w", NS_W)])?;

        xml.start("w:docDefaults", &[])?;
        xml.start("w:rPrDefault", &[])?;
        xml.start("w:rPr", &[])?;
        if let Some(family) = self.options.font_family.as_deref() {
            xml.empty(
                "w:rFonts",
                &[
                    ("w:ascii", family),
                    ("w:hAnsi", family),
                    ("w:eastAsia", family),
                    ("w:cs", family),
                ],
            )?;
        }
        xml.empty("w:sz", &[("w:val", "24")])?;
        xml.empty("w:szCs", &[("w:val", "24")])?;
        xml.end("w:rPr")?;
        xml.end("w:rPrDefault")?;
        xml.start("w:pPrDefault", &[])?;
        xml.start("w:pPr", &[])?;
        xml.empty("w:spacing", &[("w:after", "160"), ("w:line", "259"), ("w:lineRule", "auto")])?;
        xml.end("w:pPr")?;
        xml.end("w:pPrDefault")?;
        xml.end("w:docDefaults")?;

        xml.start(
            "w:style",
            &[("w:type", "paragraph"), ("w:default", "1"), ("w:styleId", "Normal")],
        )?;
        xml.empty("w:name", &[("w:val", "Normal")])?;
        xml.empty("w:qFormat", &[])?;
        xml.end("w:style")?;

        xml.end("w:styles")?;
        Ok(xml.finish())
    }
}

fn write_paragraph(xml: &mut PartWriter, text: &StyledText) -> Result<()> {
    let size = text.half_points().to_string();
    let size = size.as_str();

    xml.start("w:p", &[])?;
    write_paragraph_properties(xml, text.alignment)?;

    xml.start("w:r", &[])?;
    xml.start("w:rPr", &[])?;
    if text.bold {
        xml.empty("w:b", &[])?;
        xml.empty("w:bCs", &[])?;
    }
    xml.empty("w:sz", &[("w:val", size)])?;
    xml.empty("w:szCs", &[("w:val", size)])?;
    xml.end("w:rPr")?;
    write_run_content(xml, &text.text)?;
    xml.end("w:r")?;

    xml.end("w:p")
}

fn write_column_break(xml: &mut PartWriter, alignment: Alignment) -> Result<()> {
    xml.start("w:p", &[])?;
    write_paragraph_properties(xml, alignment)?;
    xml.start("w:r", &[])?;
    xml.empty("w:br", &[("w:type", "column")])?;
    xml.end("w:r")?;
    xml.end("w:p")
}

fn write_paragraph_properties(xml: &mut PartWriter, alignment: Alignment) -> Result<()> {
    xml.start("w:pPr", &[])?;
    xml.empty("w:jc", &[("w:val", alignment.as_ooxml())])?;
    xml.end("w:pPr")
}

/// Write run text, turning tabs into `w:tab` and line breaks into `w:br`.
fn write_run_content(xml: &mut PartWriter, text: &str) -> Result<()> {
    let mut pending = String::new();

    for c in text.chars() {
        match c {
            '\t' | '\n' | '\r' => {
                flush_text(xml, &mut pending)?;
                let name = if c == '\t' { "w:tab" } else { "w:br" };
                xml.empty(name, &[])?;
            }
            c if is_xml_char(c) => pending.push(c),
            _ => log::debug!("Dropping U+{:04X}: not allowed in XML", c as u32),
        }
    }

    flush_text(xml, &mut pending)
}

fn flush_text(xml: &mut PartWriter, pending: &mut String) -> Result<()> {
    if pending.is_empty() {
        return Ok(());
    }
    xml.leaf("w:t", &[("xml:space", "preserve")], pending)?;
    pending.clear();
    Ok(())
}

/// Characters allowed in XML 1.0 content (excluding the whitespace handled
/// separately).
fn is_xml_char(c: char) -> bool {
    !(c < '\u{20}' || c == '\u{FFFE}' || c == '\u{FFFF}')
}

fn write_section(xml: &mut PartWriter, geometry: &PageGeometry) -> Result<()> {
    let width = geometry.width.to_string();
    let height = geometry.height.to_string();
    let top = geometry.margin_top.to_string();
    let right = geometry.margin_right.to_string();
    let bottom = geometry.margin_bottom.to_string();
    let left = geometry.margin_left.to_string();
    let columns = geometry.columns.max(1).to_string();
    let spacing = geometry.column_spacing.to_string();

    xml.start("w:sectPr", &[])?;
    xml.empty("w:type", &[("w:val", "continuous")])?;
    xml.empty("w:pgSz", &[("w:w", width.as_str()), ("w:h", height.as_str())])?;
    xml.empty(
        "w:pgMar",
        &[
            ("w:top", top.as_str()),
            ("w:right", right.as_str()),
            ("w:bottom", bottom.as_str()),
            ("w:left", left.as_str()),
            ("w:header", "720"),
            ("w:footer", "720"),
            ("w:gutter", "0"),
        ],
    )?;
    xml.empty("w:cols", &[("w:num", columns.as_str()), ("w:space", spacing.as_str())])?;
    xml.end("w:sectPr")
}

fn content_types() -> Result<Vec<u8>> {
    let mut xml = PartWriter::new()?;
    xml.start("Types", &[("xmlns", NS_CONTENT_TYPES)])?;
    xml.empty("Default", &[("Extension", "rels"), ("ContentType", CT_RELS)])?;
    xml.empty("Default", &[("Extension", "xml"), ("ContentType", "application/xml")])?;
    for (part, content_type) in [
        ("/word/document.xml", CT_DOCUMENT),
        ("/word/styles.xml", CT_STYLES),
        ("/docProps/core.xml", CT_CORE),
        ("/docProps/app.xml", CT_EXTENDED),
    ] {
        xml.empty(
            "Override",
            &[("PartName", part), ("ContentType", content_type)],
        )?;
    }
    xml.end("Types")?;
    Ok(xml.finish())
}

fn package_relationships() -> Result<Vec<u8>> {
    relationships(&[
        ("rId1", REL_OFFICE_DOCUMENT, "word/document.xml"),
        ("rId2", REL_CORE, "docProps/core.xml"),
        ("rId3", REL_EXTENDED, "docProps/app.xml"),
    ])
}

fn document_relationships() -> Result<Vec<u8>> {
    relationships(&[("rId1", REL_STYLES, "styles.xml")])
}

fn relationships(entries: &[(&str, &str, &str)]) -> Result<Vec<u8>> {
    let mut xml = PartWriter::new()?;
    xml.start("Relationships", &[("xmlns", NS_PKG_RELS)])?;
    for &(id, kind, target) in entries {
        xml.empty(
            "Relationship",
            &[("Id", id), ("Type", kind), ("Target", target)],
        )?;
    }
    xml.end("Relationships")?;
    Ok(xml.finish())
}

fn core_properties(metadata: &Metadata) -> Result<Vec<u8>> {
    let mut xml = PartWriter::new()?;
    xml.start(
        "cp:coreProperties",
        &[
            ("xmlns:cp", NS_CORE),
            ("xmlns:dc", "http://purl.org/dc/elements/1.1/"),
            ("xmlns:dcterms", "http://purl.org/dc/terms/"),
            ("xmlns:dcmitype", "http://purl.org/dc/dcmitype/"),
            ("xmlns:xsi", "http://www.w3.org/2001/XMLSchema-instance"),
        ],
    )?;

    if let Some(title) = &metadata.title {
        xml.leaf("dc:title", &[], title)?;
    }
    if let Some(subject) = &metadata.subject {
        xml.leaf("dc:subject", &[], subject)?;
    }
    if let Some(creator) = &metadata.creator {
        xml.leaf("dc:creator", &[], creator)?;
    }
    if let Some(created) = &metadata.created {
        let stamp = created.to_rfc3339_opts(chrono::SecondsFormat::Secs, true);
        xml.leaf("dcterms:created", &[("xsi:type", "dcterms:W3CDTF")], &stamp)?;
        xml.leaf("dcterms:modified", &[("xsi:type", "dcterms:W3CDTF")], &stamp)?;
    }

    xml.end("cp:coreProperties")?;
    Ok(xml.finish())
}

fn app_properties() -> Result<Vec<u8>> {
    let mut xml = PartWriter::new()?;
    xml.start("Properties", &[("xmlns", NS_EXTENDED)])?;
    xml.leaf("Application", &[], APPLICATION)?;
    xml.end("Properties")?;
    Ok(xml.finish())
}

/// Zip entry options. The fixed timestamp keeps output byte-for-byte stable.
fn file_options() -> SimpleFileOptions {
    SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(zip::DateTime::default())
}

fn render_error<E: std::fmt::Display>(err: E) -> Error {
    Error::Render(format!("DOCX write error: {}", err))
}

/// Thin event writer for one package part.
struct PartWriter {
    writer: Writer<Vec<u8>>,
}

impl PartWriter {
    fn new() -> Result<Self> {
        let mut part = Self {
            writer: Writer::new(Vec::new()),
        };
        part.emit(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))?;
        Ok(part)
    }

    fn emit(&mut self, event: Event<'_>) -> Result<()> {
        self.writer.write_event(event).map_err(render_error)
    }

    fn element<'a>(name: &'a str, attributes: &[(&str, &str)]) -> BytesStart<'a> {
        let mut element = BytesStart::new(name);
        for &(key, value) in attributes {
            element.push_attribute((key, value));
        }
        element
    }

    fn start(&mut self, name: &str, attributes: &[(&str, &str)]) -> Result<()> {
        self.emit(Event::Start(Self::element(name, attributes)))
    }

    fn empty(&mut self, name: &str, attributes: &[(&str, &str)]) -> Result<()> {
        self.emit(Event::Empty(Self::element(name, attributes)))
    }

    fn end(&mut self, name: &str) -> Result<()> {
        self.emit(Event::End(BytesEnd::new(name)))
    }

    fn leaf(&mut self, name: &str, attributes: &[(&str, &str)], text: &str) -> Result<()> {
        self.start(name, attributes)?;
        self.emit(Event::Text(BytesText::new(text)))?;
        self.end(name)
    }

    fn finish(self) -> Vec<u8> {
        self.writer.into_inner()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::build_plan;
    use crate::model::{Direction, TypographySettings};
    use crate::parser::DocxReader;
    use std::io::Read;

    fn part(bytes: &[u8], name: &str) -> String {
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        let mut file = archive.by_name(name).unwrap();
        let mut content = String::new();
        file.read_to_string(&mut content).unwrap();
        content
    }

    fn sample_plan(direction: Direction) -> DocumentPlan {
        let settings = TypographySettings::default().with_direction(direction);
        build_plan("**Ref1** Hello\nWorld\n**Ref2** Foo", &settings)
    }

    #[test]
    fn test_package_parts_present() {
        let bytes = to_docx(&sample_plan(Direction::Rtl), &RenderOptions::default()).unwrap();
        let archive = zip::ZipArchive::new(Cursor::new(bytes.as_slice())).unwrap();
        let names: Vec<&str> = archive.file_names().collect();
        for expected in [
            "[Content_Types].xml",
            "_rels/.rels",
            "word/document.xml",
            "word/styles.xml",
            "word/_rels/document.xml.rels",
            "docProps/core.xml",
            "docProps/app.xml",
        ] {
            assert!(names.contains(&expected), "missing {}", expected);
        }
        assert!(bytes.starts_with(b"PK\x03\x04"));
    }

    #[test]
    fn test_document_layout_markup() {
        let bytes = to_docx(&sample_plan(Direction::Rtl), &RenderOptions::default()).unwrap();
        let xml = part(&bytes, "word/document.xml");

        assert!(xml.contains(r#"<w:pgSz w:w="12240" w:h="15840"/>"#));
        assert!(xml.contains(r#"<w:cols w:num="2" w:space="720"/>"#));
        assert!(xml.contains(r#"<w:type w:val="continuous"/>"#));
        assert_eq!(xml.matches(r#"<w:br w:type="column"/>"#).count(), 1);
        assert!(xml.contains("<w:b/><w:bCs/>"));
        assert!(xml.contains(r#"<w:sz w:val="28"/>"#));
        assert!(xml.contains(r#"<w:sz w:val="24"/>"#));
        assert!(xml.contains(r#"<w:jc w:val="right"/>"#));
        assert!(!xml.contains(r#"<w:jc w:val="left"/>"#));
        assert!(xml.contains(r#"<w:t xml:space="preserve"> Hello</w:t>"#));
    }

    #[test]
    fn test_ltr_alignment() {
        let bytes = to_docx(&sample_plan(Direction::Ltr), &RenderOptions::default()).unwrap();
        let xml = part(&bytes, "word/document.xml");
        assert!(xml.contains(r#"<w:jc w:val="left"/>"#));
        assert!(!xml.contains(r#"<w:jc w:val="right"/>"#));
    }

    #[test]
    fn test_text_is_escaped_and_readable() {
        let plan = build_plan("a < b & c\n\"q\"", &TypographySettings::default());
        let bytes = to_docx(&plan, &RenderOptions::default()).unwrap();
        let xml = part(&bytes, "word/document.xml");
        assert!(xml.contains("a &lt; b &amp; c"));

        let paragraphs = DocxReader::from_bytes(&bytes).unwrap().paragraphs().unwrap();
        assert_eq!(paragraphs, vec!["a < b & c", "", "\"q\""]);
    }

    #[test]
    fn test_tabs_and_control_chars() {
        let plan = build_plan("a\tb\u{0007}c", &TypographySettings::default());
        let bytes = to_docx(&plan, &RenderOptions::default()).unwrap();
        let xml = part(&bytes, "word/document.xml");
        assert!(xml.contains("<w:tab/>"));
        assert!(!xml.contains('\u{0007}'));
    }

    #[test]
    fn test_deterministic_output() {
        let plan = sample_plan(Direction::Rtl);
        let first = to_docx(&plan, &RenderOptions::default()).unwrap();
        let second = to_docx(&plan, &RenderOptions::default()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_metadata_and_font_family() {
        let options = RenderOptions::new()
            .with_title("Daf Yomi")
            .with_font_family("David");
        let bytes = to_docx(&sample_plan(Direction::Rtl), &options).unwrap();

        let core = part(&bytes, "docProps/core.xml");
        assert!(core.contains("<dc:title>Daf Yomi</dc:title>"));
        assert!(!core.contains("dcterms:created"));

        let styles = part(&bytes, "word/styles.xml");
        assert!(styles.contains(r#"w:cs="David""#));
    }

    #[test]
    fn test_huge_font_size_renders() {
        let settings = TypographySettings::default().with_main_font_size(u32::MAX / 2 + 1);
        let plan = build_plan("a\nb", &settings);
        let bytes = to_docx(&plan, &RenderOptions::default()).unwrap();
        let xml = part(&bytes, "word/document.xml");
        assert!(xml.contains(r#"<w:sz w:val="4294967296"/>"#));
    }

    #[test]
    fn test_custom_geometry() {
        let geometry = PageGeometry {
            columns: 3,
            ..PageGeometry::letter().with_margins(720)
        };
        let options = RenderOptions::new().with_geometry(geometry);
        let bytes = to_docx(&sample_plan(Direction::Rtl), &options).unwrap();
        let xml = part(&bytes, "word/document.xml");
        assert!(xml.contains(r#"<w:cols w:num="3" w:space="720"/>"#));
        assert!(xml.contains(r#"w:top="720""#));
    }
}
