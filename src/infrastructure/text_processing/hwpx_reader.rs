use std::collections::HashMap;

use quick_xml::Reader;
use quick_xml::events::Event;

use crate::application::ports::ParseError;
use crate::domain::{TextUnit, UnitSequenceBuilder, UnitType};

use super::office_common::{
    TableText, classify_style, get_attribute, numbered_parts, open_archive, read_part,
    require_part, xml_error,
};

const HEADER_PART: &str = "Contents/header.xml";

pub(crate) fn parse_hwpx(data: &[u8]) -> Result<Vec<TextUnit>, ParseError> {
    let mut archive = open_archive(data)?;

    let styles = match read_part(&mut archive, HEADER_PART)? {
        Some(xml) => style_names(&xml)?,
        None => HashMap::new(),
    };

    let sections = numbered_parts(&archive, "Contents/section", ".xml");
    if sections.is_empty() {
        return Err(ParseError::MissingPart(
            "Contents/section0.xml".to_string(),
        ));
    }

    let mut units = UnitSequenceBuilder::new();
    for (_, part) in &sections {
        let xml = require_part(&mut archive, part)?;
        parse_section(&xml, part, &styles, &mut units)?;
    }
    Ok(units.finish())
}

/// `hh:style` id to "name engName".
fn style_names(xml: &str) -> Result<HashMap<String, String>, ParseError> {
    let mut reader = Reader::from_str(xml);
    let mut buf = Vec::new();
    let mut names = HashMap::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e))
                if e.local_name().as_ref() == b"style" =>
            {
                if let Some(id) = get_attribute(e, "id") {
                    let name = get_attribute(e, "name").unwrap_or_default();
                    let english = get_attribute(e, "engName").unwrap_or_default();
                    names.insert(id, format!("{} {}", name, english));
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(xml_error(HEADER_PART, e)),
            _ => {}
        }
        buf.clear();
    }

    Ok(names)
}

struct Paragraph {
    depth: usize,
    style_id: Option<String>,
    text: String,
}

struct SectionState<'a> {
    styles: &'a HashMap<String, String>,
    units: &'a mut UnitSequenceBuilder,
    paragraph: Option<Paragraph>,
    table: Option<TableText>,
    nested_tables: usize,
}

impl SectionState<'_> {
    fn push_text(&mut self, text: &str) {
        if let Some(table) = self.table.as_mut() {
            table.push_text(text);
        } else if let Some(paragraph) = self.paragraph.as_mut() {
            paragraph.text.push_str(text);
        }
    }

    /// Emits the text collected so far for the open top-level paragraph.
    fn flush_paragraph(&mut self) {
        if let Some(paragraph) = self.paragraph.as_mut() {
            let style_name = paragraph
                .style_id
                .as_deref()
                .and_then(|id| self.styles.get(id))
                .map(String::as_str);
            self.units.push(classify_style(style_name), &paragraph.text);
            paragraph.text.clear();
        }
    }

    fn start_table(&mut self) {
        if self.table.is_some() {
            self.nested_tables += 1;
            return;
        }
        self.flush_paragraph();
        self.table = Some(TableText::default());
    }

    fn end_table(&mut self) {
        if self.nested_tables > 0 {
            self.nested_tables -= 1;
        } else if let Some(table) = self.table.take() {
            self.units.push(UnitType::Table, &table.into_text());
        }
    }

    fn outer_table(&mut self) -> Option<&mut TableText> {
        if self.nested_tables == 0 {
            self.table.as_mut()
        } else {
            None
        }
    }
}

/// Top-level `hp:p` elements sit directly under the section root; tables are
/// anchored inside a paragraph's run.
fn parse_section(
    xml: &str,
    part: &str,
    styles: &HashMap<String, String>,
    units: &mut UnitSequenceBuilder,
) -> Result<(), ParseError> {
    let mut reader = Reader::from_str(xml);
    let mut buf = Vec::new();
    let mut state = SectionState {
        styles,
        units,
        paragraph: None,
        table: None,
        nested_tables: 0,
    };
    let mut depth = 0usize;
    let mut in_text = false;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                depth += 1;
                match e.local_name().as_ref() {
                    b"p" if depth == 2 => {
                        state.paragraph = Some(Paragraph {
                            depth,
                            style_id: get_attribute(e, "styleIDRef"),
                            text: String::new(),
                        });
                    }
                    b"tbl" if state.paragraph.is_some() => state.start_table(),
                    b"tr" => {
                        if let Some(table) = state.outer_table() {
                            table.start_row();
                        }
                    }
                    b"tc" => {
                        if let Some(table) = state.outer_table() {
                            table.start_cell();
                        }
                    }
                    b"t" => in_text = true,
                    _ => {}
                }
            }
            Ok(Event::Empty(ref e)) => match e.local_name().as_ref() {
                b"lineBreak" => state.push_text("\n"),
                b"tab" => state.push_text("\t"),
                _ => {}
            },
            Ok(Event::Text(e)) => {
                if in_text {
                    let text = e.unescape().map_err(|e| xml_error(part, e))?;
                    state.push_text(&text);
                }
            }
            Ok(Event::End(ref e)) => {
                match e.local_name().as_ref() {
                    b"t" => in_text = false,
                    b"tbl" if state.table.is_some() => state.end_table(),
                    b"tc" => {
                        if let Some(table) = state.outer_table() {
                            table.end_cell();
                        }
                    }
                    b"p" => {
                        let closes_paragraph =
                            matches!(&state.paragraph, Some(p) if p.depth == depth);
                        if closes_paragraph {
                            state.flush_paragraph();
                            state.paragraph = None;
                        } else if let Some(table) = state.table.as_mut() {
                            table.end_paragraph();
                        } else {
                            state.push_text(" ");
                        }
                    }
                    _ => {}
                }
                depth = depth.saturating_sub(1);
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(xml_error(part, e)),
            _ => {}
        }
        buf.clear();
    }

    Ok(())
}
