use workroom_edge::application::ports::{DocumentParser, ParseError};
use workroom_edge::domain::{DocumentFormat, UnitType};
use workroom_edge::infrastructure::text_processing::DocxParser;

use crate::helpers::fixtures::{docx_fixture, docx_without_body, zip_archive};

#[test]
fn given_docx_parser_when_asked_for_format_then_returns_docx() {
    assert_eq!(DocxParser.format(), DocumentFormat::Docx);
}

#[test]
fn given_document_when_parsing_then_units_follow_body_order_with_types() {
    let units = DocxParser.parse(&docx_fixture()).unwrap();

    let summary: Vec<(Option<u32>, UnitType, &str)> = units
        .iter()
        .map(|u| (u.ordinal, u.unit_type, u.text.as_str()))
        .collect();
    assert_eq!(
        summary,
        vec![
            (Some(0), UnitType::Title, "Project Plan"),
            (Some(1), UnitType::Paragraph, "Intro text"),
            (Some(2), UnitType::List, "First item"),
            (Some(3), UnitType::List, "Numbered"),
            (None, UnitType::Other, "Cover note"),
            (Some(4), UnitType::Table, "A\tB\nC\tD"),
            (Some(5), UnitType::Paragraph, "Closing\tend"),
        ]
    );
}

#[test]
fn given_document_without_styles_part_when_parsing_then_style_ids_are_classified_directly() {
    let document = r#"<w:document xmlns:w="w"><w:body><w:p><w:pPr><w:pStyle w:val="Heading2"/></w:pPr><w:r><w:t>Scope</w:t></w:r></w:p></w:body></w:document>"#;
    let data = zip_archive(&[("word/document.xml", document)]);

    let units = DocxParser.parse(&data).unwrap();

    assert_eq!(units.len(), 1);
    assert_eq!(units[0].unit_type, UnitType::Title);
}

#[test]
fn given_archive_without_document_part_when_parsing_then_reports_missing_part() {
    let result = DocxParser.parse(&docx_without_body());

    assert!(matches!(result, Err(ParseError::MissingPart(part)) if part == "word/document.xml"));
}

#[test]
fn given_bytes_that_are_not_a_zip_when_parsing_then_reports_invalid_container() {
    let result = DocxParser.parse(b"plain text");

    assert!(matches!(result, Err(ParseError::InvalidContainer(_))));
}

#[test]
fn given_malformed_xml_when_parsing_then_reports_malformed_xml() {
    let data = zip_archive(&[(
        "word/document.xml",
        "<w:document><w:body><w:p></w:body></w:document>",
    )]);

    let result = DocxParser.parse(&data);

    assert!(matches!(result, Err(ParseError::MalformedXml(_))));
}
