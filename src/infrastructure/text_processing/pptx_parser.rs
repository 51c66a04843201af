use quick_xml::Reader;
use quick_xml::events::Event;

use crate::application::ports::{DocumentParser, ParseError};
use crate::domain::{DocumentFormat, TextUnit, UnitSequenceBuilder, UnitType};

use super::office_common::{numbered_parts, open_archive, require_part, xml_error};

/// One text unit per non-empty slide, numbered by slide position.
pub struct PptxParser;

impl DocumentParser for PptxParser {
    fn format(&self) -> DocumentFormat {
        DocumentFormat::Pptx
    }

    fn parse(&self, data: &[u8]) -> Result<Vec<TextUnit>, ParseError> {
        let mut archive = open_archive(data)?;
        let slides = numbered_parts(&archive, "ppt/slides/slide", ".xml");
        if slides.is_empty() {
            return Err(ParseError::MissingPart("ppt/slides/slide1.xml".to_string()));
        }

        let mut units = UnitSequenceBuilder::new();
        for (position, (_, part)) in slides.iter().enumerate() {
            let xml = require_part(&mut archive, part)?;
            let text = slide_text(&xml, part)?;
            units.push_numbered(UnitType::Slide, position as u32 + 1, &text);
        }

        tracing::debug!(slides = slides.len(), units = units.len(), "PPTX parsed");
        Ok(units.finish())
    }
}

/// Text runs of a slide, one line per non-empty paragraph.
fn slide_text(xml: &str, part: &str) -> Result<String, ParseError> {
    let mut reader = Reader::from_str(xml);
    let mut buf = Vec::new();
    let mut lines: Vec<String> = Vec::new();
    let mut paragraph = String::new();
    let mut in_text = false;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => match e.local_name().as_ref() {
                b"t" => in_text = true,
                b"p" => paragraph.clear(),
                _ => {}
            },
            Ok(Event::Empty(ref e)) if e.local_name().as_ref() == b"br" => paragraph.push('\n'),
            Ok(Event::Text(e)) => {
                if in_text {
                    let text = e.unescape().map_err(|e| xml_error(part, e))?;
                    paragraph.push_str(&text);
                }
            }
            Ok(Event::End(ref e)) => match e.local_name().as_ref() {
                b"t" => in_text = false,
                b"p" => {
                    let line = paragraph.trim();
                    if !line.is_empty() {
                        lines.push(line.to_string());
                    }
                    paragraph.clear();
                }
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(xml_error(part, e)),
            _ => {}
        }
        buf.clear();
    }

    Ok(lines.join("\n"))
}
