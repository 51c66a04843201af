use std::io::{Cursor, Write};

use cfb::CompoundFile;
use flate2::Compression;
use flate2::write::DeflateEncoder;
use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, Stream, dictionary};
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

pub fn zip_archive(parts: &[(&str, &str)]) -> Vec<u8> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    for (name, content) in parts {
        writer
            .start_file(*name, SimpleFileOptions::default())
            .unwrap();
        writer.write_all(content.as_bytes()).unwrap();
    }
    writer.finish().unwrap().into_inner()
}

const W_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

/// Heading, body paragraph, styled list, numbered list, blank paragraph,
/// content control, 2x2 table, tabbed paragraph.
pub fn docx_fixture() -> Vec<u8> {
    let styles = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:styles xmlns:w="{W_NS}">
  <w:style w:type="paragraph" w:styleId="Heading1"><w:name w:val="heading 1"/></w:style>
  <w:style w:type="paragraph" w:styleId="ListParagraph"><w:name w:val="List Paragraph"/></w:style>
  <w:style w:type="paragraph" w:default="1" w:styleId="Normal"><w:name w:val="Normal"/></w:style>
</w:styles>"#
    );
    let document = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="{W_NS}"><w:body><w:p><w:pPr><w:pStyle w:val="Heading1"/></w:pPr><w:r><w:t>Project Plan</w:t></w:r></w:p><w:p><w:r><w:t xml:space="preserve">Intro </w:t></w:r><w:r><w:t>text</w:t></w:r></w:p><w:p><w:pPr><w:pStyle w:val="ListParagraph"/></w:pPr><w:r><w:t>First item</w:t></w:r></w:p><w:p><w:pPr><w:numPr><w:ilvl w:val="0"/><w:numId w:val="1"/></w:numPr><w:tabs><w:tab w:val="left" w:pos="720"/></w:tabs></w:pPr><w:r><w:t>Numbered</w:t></w:r></w:p><w:p><w:r><w:t xml:space="preserve">   </w:t></w:r></w:p><w:sdt><w:sdtContent><w:p><w:r><w:t>Cover note</w:t></w:r></w:p></w:sdtContent></w:sdt><w:tbl><w:tr><w:tc><w:p><w:r><w:t>A</w:t></w:r></w:p></w:tc><w:tc><w:p><w:r><w:t>B</w:t></w:r></w:p></w:tc></w:tr><w:tr><w:tc><w:p><w:r><w:t>C</w:t></w:r></w:p></w:tc><w:tc><w:p><w:r><w:t>D</w:t></w:r></w:p></w:tc></w:tr></w:tbl><w:p><w:r><w:t>Closing</w:t><w:tab/><w:t>end</w:t></w:r></w:p><w:sectPr/></w:body></w:document>"#
    );

    zip_archive(&[
        ("[Content_Types].xml", CONTENT_TYPES),
        ("word/styles.xml", &styles),
        ("word/document.xml", &document),
    ])
}

pub fn docx_without_body() -> Vec<u8> {
    zip_archive(&[("[Content_Types].xml", CONTENT_TYPES)])
}

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8"?><Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"/>"#;

pub fn slide_xml(paragraphs: &[&str]) -> String {
    let body: String = paragraphs
        .iter()
        .map(|p| {
            let runs: String = p
                .split('\n')
                .map(|line| format!("<a:r><a:t>{}</a:t></a:r>", line))
                .collect::<Vec<_>>()
                .join("<a:br/>");
            format!("<a:p>{}</a:p>", runs)
        })
        .collect();
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:sld xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main"><p:cSld><p:spTree><p:sp><p:txBody>{}<a:p/></p:txBody></p:sp></p:spTree></p:cSld></p:sld>"#,
        body
    )
}

/// Three slides; the second carries no text.
pub fn pptx_fixture() -> Vec<u8> {
    let first = slide_xml(&["Quarterly Review", "Agenda\nBudget"]);
    let second = slide_xml(&[]);
    let third = slide_xml(&["Next steps"]);
    zip_archive(&[
        ("[Content_Types].xml", CONTENT_TYPES),
        ("ppt/slides/slide1.xml", &first),
        ("ppt/slides/slide2.xml", &second),
        ("ppt/slides/slide3.xml", &third),
    ])
}

const HWPX_HEADER: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<hh:head xmlns:hh="http://www.hancom.co.kr/hwpml/2011/head"><hh:refList><hh:styles itemCnt="3"><hh:style id="0" type="PARA" name="바탕글" engName="Normal"/><hh:style id="1" type="PARA" name="개요 1" engName="Outline 1"/><hh:style id="2" type="PARA" name="글머리표" engName="Bullet"/></hh:styles></hh:refList></hh:head>"#;

const HWPX_SECTION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<hs:sec xmlns:hs="http://www.hancom.co.kr/hwpml/2011/section" xmlns:hp="http://www.hancom.co.kr/hwpml/2011/paragraph"><hp:p id="1" styleIDRef="1"><hp:run><hp:t>Overview</hp:t></hp:run></hp:p><hp:p id="2" styleIDRef="0"><hp:run><hp:t>First line</hp:t><hp:lineBreak/><hp:t>second line</hp:t></hp:run></hp:p><hp:p id="3" styleIDRef="2"><hp:run><hp:t>Bullet item</hp:t></hp:run></hp:p><hp:p id="4" styleIDRef="0"><hp:run><hp:tbl><hp:tr><hp:tc><hp:subList><hp:p><hp:run><hp:t>A</hp:t></hp:run></hp:p></hp:subList></hp:tc><hp:tc><hp:subList><hp:p><hp:run><hp:t>B</hp:t></hp:run></hp:p></hp:subList></hp:tc></hp:tr><hp:tr><hp:tc><hp:subList><hp:p><hp:run><hp:t>C</hp:t></hp:run></hp:p></hp:subList></hp:tc><hp:tc><hp:subList><hp:p><hp:run><hp:t>D</hp:t></hp:run></hp:p></hp:subList></hp:tc></hp:tr></hp:tbl></hp:run></hp:p></hs:sec>"#;

pub fn hwpx_fixture() -> Vec<u8> {
    zip_archive(&[
        ("mimetype", "application/hwp+zip"),
        ("Contents/header.xml", HWPX_HEADER),
        ("Contents/section0.xml", HWPX_SECTION),
    ])
}

const TAG_STYLE: u16 = 26;
const TAG_PARA_HEADER: u16 = 66;
const TAG_PARA_TEXT: u16 = 67;
const TAG_CTRL_HEADER: u16 = 71;
const TAG_LIST_HEADER: u16 = 72;

fn record(tag: u16, level: u16, payload: &[u8]) -> Vec<u8> {
    let header = u32::from(tag) | (u32::from(level) << 10) | ((payload.len() as u32) << 20);
    let mut bytes = header.to_le_bytes().to_vec();
    bytes.extend_from_slice(payload);
    bytes
}

fn utf16le(text: &str) -> Vec<u8> {
    text.encode_utf16().flat_map(u16::to_le_bytes).collect()
}

fn hwp_string(text: &str) -> Vec<u8> {
    let mut bytes = (text.encode_utf16().count() as u16).to_le_bytes().to_vec();
    bytes.extend(utf16le(text));
    bytes
}

fn style_record(local: &str, english: &str) -> Vec<u8> {
    let mut payload = hwp_string(local);
    payload.extend(hwp_string(english));
    payload.extend_from_slice(&[0; 10]);
    record(TAG_STYLE, 0, &payload)
}

fn para_header(level: u16, style: u8) -> Vec<u8> {
    let mut payload = vec![0u8; 22];
    payload[10] = style;
    record(TAG_PARA_HEADER, level, &payload)
}

/// `with_control` prefixes an extended control, as the anchor of a table does.
fn para_text(level: u16, text: &str, with_control: bool) -> Vec<u8> {
    let mut payload = Vec::new();
    if with_control {
        for unit in [11u16, 0, 0, 0, 0, 0, 0, 11] {
            payload.extend(unit.to_le_bytes());
        }
    }
    payload.extend(utf16le(text));
    payload.extend(13u16.to_le_bytes());
    record(TAG_PARA_TEXT, level, &payload)
}

fn ctrl_header(level: u16, id: &[u8; 4]) -> Vec<u8> {
    let mut payload = u32::from_be_bytes(*id).to_le_bytes().to_vec();
    payload.extend_from_slice(&[0; 8]);
    record(TAG_CTRL_HEADER, level, &payload)
}

fn cell_header(level: u16, column: u16, row: u16) -> Vec<u8> {
    let mut payload = vec![0u8; 8];
    payload.extend(column.to_le_bytes());
    payload.extend(row.to_le_bytes());
    payload.extend_from_slice(&[0; 4]);
    record(TAG_LIST_HEADER, level, &payload)
}

fn hwp_doc_info() -> Vec<u8> {
    [
        style_record("바탕글", "Normal"),
        style_record("개요 1", "Outline 1"),
    ]
    .concat()
}

/// Title, paragraph, table anchor, 2x2 table, footnote anchor and body, closing paragraph.
fn hwp_section0() -> Vec<u8> {
    let mut table = Vec::new();
    for (column, row, text) in [(0, 0, "A"), (1, 0, "B"), (0, 1, "C"), (1, 1, "D")] {
        table.extend(cell_header(2, column, row));
        table.extend(para_header(2, 0));
        table.extend(para_text(3, text, false));
    }

    [
        para_header(0, 1),
        para_text(1, "Introduction", false),
        para_header(0, 0),
        para_text(1, "Body text", false),
        para_header(0, 0),
        para_text(1, "Table follows", true),
        ctrl_header(1, b"tbl "),
        table,
        para_header(0, 0),
        para_text(1, "Note anchor", true),
        ctrl_header(1, b"fn  "),
        cell_header(2, 0, 0),
        para_header(2, 0),
        para_text(3, "Footnote body", false),
        para_header(0, 0),
        para_text(1, "Closing", false),
    ]
    .concat()
}

fn hwp_section1() -> Vec<u8> {
    [para_header(0, 0), para_text(1, "Appendix", false)].concat()
}

fn deflate(raw: &[u8]) -> Vec<u8> {
    let mut encoder = DeflateEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(raw).unwrap();
    encoder.finish().unwrap()
}

fn hwp_file_header(properties: u32) -> Vec<u8> {
    let mut header = vec![0u8; 256];
    header[..17].copy_from_slice(b"HWP Document File");
    header[32..36].copy_from_slice(&[0, 0, 1, 5]);
    header[36..40].copy_from_slice(&properties.to_le_bytes());
    header
}

fn write_stream(file: &mut CompoundFile<Cursor<Vec<u8>>>, path: &str, bytes: &[u8]) {
    let mut stream = file.create_stream(path).unwrap();
    stream.write_all(bytes).unwrap();
    stream.flush().unwrap();
}

/// HWP 5 compound file; `properties` bit 0 marks compressed streams.
pub fn hwp5_fixture_with_properties(properties: u32) -> Vec<u8> {
    let compressed = properties & 0x1 != 0;
    let encode = |raw: Vec<u8>| if compressed { deflate(&raw) } else { raw };

    let mut file = CompoundFile::create(Cursor::new(Vec::new())).unwrap();
    write_stream(&mut file, "/FileHeader", &hwp_file_header(properties));
    write_stream(&mut file, "/DocInfo", &encode(hwp_doc_info()));
    file.create_storage("/BodyText").unwrap();
    write_stream(&mut file, "/BodyText/Section1", &encode(hwp_section1()));
    write_stream(&mut file, "/BodyText/Section0", &encode(hwp_section0()));
    file.flush().unwrap();
    file.into_inner().into_inner()
}

pub fn hwp5_fixture(compressed: bool) -> Vec<u8> {
    hwp5_fixture_with_properties(u32::from(compressed))
}

/// A `pages`-page PDF with one line of text per page.
pub fn pdf_fixture(pages: usize) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    });

    let mut kids: Vec<Object> = Vec::new();
    for page in 0..pages {
        let content = Content {
            operations: vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 24.into()]),
                Operation::new("Td", vec![100.into(), 600.into()]),
                Operation::new(
                    "Tj",
                    vec![Object::string_literal(format!("Page {}", page + 1))],
                ),
                Operation::new("ET", vec![]),
            ],
        };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let pages_dict = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => pages as i64,
        "Resources" => resources_id,
        "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).unwrap();
    bytes
}
