use std::io::{Cursor, Read};

use quick_xml::events::BytesStart;
use zip::ZipArchive;

use crate::application::ports::ParseError;
use crate::domain::UnitType;

pub(crate) type OfficeArchive<'a> = ZipArchive<Cursor<&'a [u8]>>;

pub(crate) fn open_archive(data: &[u8]) -> Result<OfficeArchive<'_>, ParseError> {
    ZipArchive::new(Cursor::new(data))
        .map_err(|e| ParseError::InvalidContainer(format!("failed to open archive: {}", e)))
}

/// Reads a UTF-8 part of the archive, or `None` when the part is absent.
pub(crate) fn read_part(
    archive: &mut OfficeArchive<'_>,
    name: &str,
) -> Result<Option<String>, ParseError> {
    let mut file = match archive.by_name(name) {
        Ok(file) => file,
        Err(zip::result::ZipError::FileNotFound) => return Ok(None),
        Err(e) => {
            return Err(ParseError::InvalidContainer(format!(
                "failed to open {}: {}",
                name, e
            )));
        }
    };

    let mut content = String::new();
    file.read_to_string(&mut content)
        .map_err(|e| ParseError::InvalidContainer(format!("failed to read {}: {}", name, e)))?;
    Ok(Some(content))
}

pub(crate) fn require_part(
    archive: &mut OfficeArchive<'_>,
    name: &str,
) -> Result<String, ParseError> {
    read_part(archive, name)?.ok_or_else(|| ParseError::MissingPart(name.to_string()))
}

/// Archive entries matching `{prefix}{N}{suffix}`, sorted by N.
pub(crate) fn numbered_parts(
    archive: &OfficeArchive<'_>,
    prefix: &str,
    suffix: &str,
) -> Vec<(u32, String)> {
    let mut parts: Vec<(u32, String)> = archive
        .file_names()
        .filter_map(|name| {
            let number = name.strip_prefix(prefix)?.strip_suffix(suffix)?;
            number.parse::<u32>().ok().map(|n| (n, name.to_string()))
        })
        .collect();
    parts.sort_by_key(|(n, _)| *n);
    parts
}

/// Attribute value by local name, ignoring the namespace prefix.
pub(crate) fn get_attribute(e: &BytesStart, name: &str) -> Option<String> {
    for attr in e.attributes().flatten() {
        if attr.key.local_name().as_ref() == name.as_bytes() {
            return Some(String::from_utf8_lossy(&attr.value).to_string());
        }
    }
    None
}

pub(crate) fn xml_error(part: &str, e: impl std::fmt::Display) -> ParseError {
    ParseError::MalformedXml(format!("{}: {}", part, e))
}

const TITLE_MARKERS: [&str; 3] = ["heading", "outline", "개요"];
const LIST_MARKERS: [&str; 3] = ["list", "bullet", "글머리"];

/// Classifies a paragraph by its style name; unknown styles are paragraphs.
pub(crate) fn classify_style(style_name: Option<&str>) -> UnitType {
    let Some(name) = style_name else {
        return UnitType::Paragraph;
    };
    let name = name.to_lowercase();
    if TITLE_MARKERS.iter().any(|m| name.contains(m)) {
        UnitType::Title
    } else if LIST_MARKERS.iter().any(|m| name.contains(m)) {
        UnitType::List
    } else {
        UnitType::Paragraph
    }
}

/// Accumulates table text: cells joined by tabs, rows by newlines.
#[derive(Debug, Default)]
pub(crate) struct TableText {
    rows: Vec<Vec<String>>,
    cell: String,
}

impl TableText {
    pub(crate) fn start_row(&mut self) {
        self.rows.push(Vec::new());
    }

    pub(crate) fn start_cell(&mut self) {
        self.cell.clear();
    }

    pub(crate) fn push_text(&mut self, text: &str) {
        self.cell.push_str(text);
    }

    /// Paragraphs within one cell are separated by a space.
    pub(crate) fn end_paragraph(&mut self) {
        if !self.cell.is_empty() && !self.cell.ends_with(' ') {
            self.cell.push(' ');
        }
    }

    pub(crate) fn end_cell(&mut self) {
        let text = self.cell.trim().to_string();
        self.cell.clear();
        match self.rows.last_mut() {
            Some(row) => row.push(text),
            None => self.rows.push(vec![text]),
        }
    }

    pub(crate) fn into_text(self) -> String {
        self.rows
            .into_iter()
            .filter(|row| row.iter().any(|cell| !cell.is_empty()))
            .map(|row| row.join("\t"))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
