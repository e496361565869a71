//! Tests that generated packages read back through the upload path.

use std::fs;
use std::io::{Cursor, Read};

use twocol::parser::{extract_plain_text, DocxReader};
use twocol::{
    detect, extract_text_file, generate, is_docx, Direction, Twocol, TypographySettings,
    DOCX_MIME_TYPE,
};

fn document_xml(bytes: &[u8]) -> String {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
    let mut part = archive.by_name("word/document.xml").unwrap();
    let mut xml = String::new();
    part.read_to_string(&mut xml).unwrap();
    xml
}

#[test]
fn test_generated_document_reads_back() {
    let text = "**Ref1** Hello\nWorld\n**Ref2** Foo";
    let document = generate(text, &TypographySettings::default()).unwrap();

    let paragraphs = DocxReader::from_bytes(&document.bytes)
        .unwrap()
        .paragraphs()
        .unwrap();
    // header, column 1, column break, column 2
    assert_eq!(paragraphs, vec!["Ref1 Ref2", " Hello", "", "World", " Foo"]);
}

#[test]
fn test_regenerating_from_upload_is_stable() {
    let text = "**Ref** alpha\nbeta\ngamma\ndelta";
    let first = generate(text, &TypographySettings::default()).unwrap();

    // The header comes back as plain text and the break as a blank line.
    let uploaded = extract_plain_text(&first.bytes).unwrap();
    assert_eq!(uploaded, "Ref\n alpha\nbeta\n\ngamma\ndelta");

    let second = generate(&uploaded, &TypographySettings::default()).unwrap();
    assert_eq!(second.stats.span_count, 0);
    assert_eq!(second.stats.body_lines(), 5);
}

#[test]
fn test_hebrew_text_preserved() {
    let text = "**בראשית א:א** בראשית ברא אלהים\nאת השמים ואת הארץ";
    let settings = TypographySettings::default().with_direction(Direction::Rtl);
    let document = generate(text, &settings).unwrap();

    let xml = document_xml(&document.bytes);
    assert!(xml.contains("בראשית א:א"));
    assert!(xml.contains(r#"<w:jc w:val="right"/>"#));

    let paragraphs = DocxReader::from_bytes(&document.bytes)
        .unwrap()
        .paragraphs()
        .unwrap();
    assert_eq!(paragraphs[0], "בראשית א:א");
    assert_eq!(paragraphs[1], " בראשית ברא אלהים");
}

#[test]
fn test_generated_package_detected_as_docx() {
    let document = generate("a\nb", &TypographySettings::default()).unwrap();
    assert_eq!(document.mime_type, DOCX_MIME_TYPE);
    assert!(detect::is_docx_bytes(&document.bytes));

    let format = detect::detect_format_from_bytes(&document.bytes).unwrap();
    assert!(format.content_types_first);
}

#[test]
fn test_write_and_extract_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("hebrew_layout.docx");

    let document = Twocol::new()
        .with_title("Round trip")
        .layout("**t** one\ntwo")
        .unwrap()
        .to_docx()
        .unwrap();
    fs::write(&path, &document.bytes).unwrap();

    assert!(is_docx(&path));
    let text = extract_text_file(&path).unwrap();
    assert_eq!(text, "t\n one\n\ntwo");

    let reader = DocxReader::open(&path).unwrap();
    assert_eq!(reader.plain_text().unwrap(), text);
}

#[test]
fn test_missing_document_part_is_decode_failure() {
    let mut buffer = Cursor::new(Vec::new());
    {
        let mut zip = zip::ZipWriter::new(&mut buffer);
        zip.start_file("readme.txt", zip::write::SimpleFileOptions::default())
            .unwrap();
        std::io::Write::write_all(&mut zip, b"not a word document").unwrap();
        zip.finish().unwrap();
    }

    let err = DocxReader::from_bytes(buffer.get_ref()).unwrap_err();
    assert!(err.is_decode_failure());
}
