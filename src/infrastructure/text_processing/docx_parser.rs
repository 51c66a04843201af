//! DOCX text extraction.
//!
//! DOCX files are ZIP archives in Open XML format. Body content lives in
//! `word/document.xml`; paragraph style ids resolve to display names through
//! `word/styles.xml`.

use std::collections::HashMap;

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::application::ports::{DocumentParser, ParseError};
use crate::domain::{DocumentFormat, TextUnit, UnitSequenceBuilder, UnitType};

use super::office_common::{
    TableText, classify_style, get_attribute, open_archive, read_part, require_part, xml_error,
};

const DOCUMENT_PART: &str = "word/document.xml";
const STYLES_PART: &str = "word/styles.xml";

pub struct DocxParser;

impl DocumentParser for DocxParser {
    fn format(&self) -> DocumentFormat {
        DocumentFormat::Docx
    }

    fn parse(&self, data: &[u8]) -> Result<Vec<TextUnit>, ParseError> {
        let mut archive = open_archive(data)?;

        let style_names = match read_part(&mut archive, STYLES_PART)? {
            Some(xml) => parse_style_names(&xml)?,
            None => HashMap::new(),
        };
        let document = require_part(&mut archive, DOCUMENT_PART)?;

        let units = parse_body(&document, &style_names)?;
        tracing::debug!(units = units.len(), "DOCX parsed");
        Ok(units)
    }
}

/// Maps `w:styleId` to the style's display name.
fn parse_style_names(xml: &str) -> Result<HashMap<String, String>, ParseError> {
    let mut reader = Reader::from_str(xml);
    let mut buf = Vec::new();
    let mut names = HashMap::new();
    let mut current_id: Option<String> = None;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e)) => {
                match e.local_name().as_ref() {
                    b"style" => current_id = get_attribute(e, "styleId"),
                    b"name" => {
                        if let (Some(id), Some(name)) = (&current_id, get_attribute(e, "val")) {
                            names.insert(id.clone(), name);
                        }
                    }
                    _ => {}
                }
            }
            Ok(Event::End(ref e)) if e.local_name().as_ref() == b"style" => current_id = None,
            Ok(Event::Eof) => break,
            Err(e) => return Err(xml_error(STYLES_PART, e)),
            _ => {}
        }
        buf.clear();
    }

    Ok(names)
}

enum Block {
    Paragraph {
        text: String,
        style_id: Option<String>,
        numbered: bool,
    },
    Table(TableText),
    /// Structured document tag; text is kept but not classified.
    Content(String),
}

impl Block {
    fn start(name: &[u8]) -> Option<Self> {
        match name {
            b"p" => Some(Block::Paragraph {
                text: String::new(),
                style_id: None,
                numbered: false,
            }),
            b"tbl" => Some(Block::Table(TableText::default())),
            b"sdt" => Some(Block::Content(String::new())),
            _ => None,
        }
    }

    fn push_text(&mut self, text: &str) {
        match self {
            Block::Paragraph { text: buf, .. } | Block::Content(buf) => buf.push_str(text),
            Block::Table(table) => table.push_text(text),
        }
    }

    fn on_start(&mut self, e: &BytesStart) {
        match (self, e.local_name().as_ref()) {
            (Block::Paragraph { style_id, .. }, b"pStyle") if style_id.is_none() => {
                *style_id = get_attribute(e, "val");
            }
            (Block::Paragraph { numbered, .. }, b"numPr") => *numbered = true,
            (Block::Table(table), b"tr") => table.start_row(),
            (Block::Table(table), b"tc") => table.start_cell(),
            (block, b"tab") => block.push_text("\t"),
            (block, b"br") | (block, b"cr") => block.push_text("\n"),
            _ => {}
        }
    }

    fn on_end(&mut self, name: &[u8]) {
        match (self, name) {
            (Block::Table(table), b"p") => table.end_paragraph(),
            (Block::Table(table), b"tc") => table.end_cell(),
            (Block::Content(text), b"p") => text.push('\n'),
            _ => {}
        }
    }

    fn finish(self, style_names: &HashMap<String, String>, units: &mut UnitSequenceBuilder) {
        match self {
            Block::Paragraph {
                text,
                style_id,
                numbered,
            } => {
                let style_name = style_id
                    .as_deref()
                    .map(|id| style_names.get(id).map(String::as_str).unwrap_or(id));
                let unit_type = match classify_style(style_name) {
                    UnitType::Paragraph if numbered => UnitType::List,
                    other => other,
                };
                units.push(unit_type, &text);
            }
            Block::Table(table) => units.push(UnitType::Table, &table.into_text()),
            Block::Content(text) => units.push(UnitType::Other, &text),
        }
    }
}

/// Walks the direct children of `w:body` in document order.
fn parse_body(
    xml: &str,
    style_names: &HashMap<String, String>,
) -> Result<Vec<TextUnit>, ParseError> {
    let mut reader = Reader::from_str(xml);
    let mut buf = Vec::new();
    let mut units = UnitSequenceBuilder::new();

    let mut depth = 0usize;
    let mut body_depth: Option<usize> = None;
    let mut block: Option<(Block, usize)> = None;
    let mut in_text = false;
    let mut in_tab_stops = false;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                depth += 1;
                let name = e.local_name();
                if let Some((current, _)) = block.as_mut() {
                    match name.as_ref() {
                        b"t" => in_text = true,
                        b"tabs" => in_tab_stops = true,
                        _ => current.on_start(e),
                    }
                } else if name.as_ref() == b"body" {
                    body_depth = Some(depth);
                } else if body_depth.is_some_and(|d| d + 1 == depth) {
                    block = Block::start(name.as_ref()).map(|b| (b, depth));
                }
            }
            Ok(Event::Empty(ref e)) => {
                if let Some((current, _)) = block.as_mut() {
                    if !in_tab_stops {
                        current.on_start(e);
                    }
                }
            }
            Ok(Event::Text(e)) => {
                if in_text {
                    if let Some((current, _)) = block.as_mut() {
                        let text = e.unescape().map_err(|e| xml_error(DOCUMENT_PART, e))?;
                        current.push_text(&text);
                    }
                }
            }
            Ok(Event::End(ref e)) => {
                let name = e.local_name();
                match name.as_ref() {
                    b"t" => in_text = false,
                    b"tabs" => in_tab_stops = false,
                    _ => {}
                }
                let closes_block = matches!(&block, Some((_, start)) if *start == depth);
                if closes_block {
                    if let Some((finished, _)) = block.take() {
                        finished.finish(style_names, &mut units);
                    }
                } else if let Some((current, _)) = block.as_mut() {
                    current.on_end(name.as_ref());
                }
                depth = depth.saturating_sub(1);
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(xml_error(DOCUMENT_PART, e)),
            _ => {}
        }
        buf.clear();
    }

    Ok(units.finish())
}
