//! HWP text extraction.
//!
//! Two containers are accepted: HWP 5.x, an OLE compound file whose
//! `BodyText/SectionN` streams hold tagged binary records, and HWPX, a ZIP
//! archive of XML parts. The container is picked from the magic bytes.

use std::io::{Cursor, Read, Seek};

use cfb::CompoundFile;
use flate2::read::DeflateDecoder;

use crate::application::ports::{DocumentParser, ParseError};
use crate::domain::{DocumentFormat, TextUnit, UnitSequenceBuilder, UnitType};

use super::hwpx_reader;
use super::office_common::{TableText, classify_style};

const CFB_MAGIC: [u8; 8] = [0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1];
const ZIP_MAGIC: [u8; 4] = [b'P', b'K', 0x03, 0x04];
const FILE_HEADER_SIGNATURE: &[u8] = b"HWP Document File";

const HWPTAG_BEGIN: u16 = 16;
const TAG_STYLE: u16 = HWPTAG_BEGIN + 10;
const TAG_PARA_HEADER: u16 = HWPTAG_BEGIN + 50;
const TAG_PARA_TEXT: u16 = HWPTAG_BEGIN + 51;
const TAG_CTRL_HEADER: u16 = HWPTAG_BEGIN + 55;
const TAG_LIST_HEADER: u16 = HWPTAG_BEGIN + 56;

const CTRL_TABLE: u32 = u32::from_be_bytes(*b"tbl ");
const PARA_HEADER_STYLE_OFFSET: usize = 10;
const CELL_ROW_OFFSET: usize = 10;
/// Inline and extended controls occupy eight code units in PARA_TEXT.
const CONTROL_WIDTH: usize = 8;

pub struct HwpParser;

impl DocumentParser for HwpParser {
    fn format(&self) -> DocumentFormat {
        DocumentFormat::Hwp
    }

    fn parse(&self, data: &[u8]) -> Result<Vec<TextUnit>, ParseError> {
        let units = if data.starts_with(&CFB_MAGIC) {
            parse_hwp5(data)?
        } else if data.starts_with(&ZIP_MAGIC) {
            hwpx_reader::parse_hwpx(data)?
        } else {
            return Err(ParseError::InvalidContainer(
                "neither an HWP 5 compound file nor an HWPX archive".to_string(),
            ));
        };

        tracing::debug!(units = units.len(), "HWP parsed");
        Ok(units)
    }
}

struct FileHeader {
    compressed: bool,
    encrypted: bool,
    distribution: bool,
}

impl FileHeader {
    fn parse(bytes: &[u8]) -> Result<Self, ParseError> {
        if !bytes.starts_with(FILE_HEADER_SIGNATURE) {
            return Err(ParseError::InvalidContainer(
                "missing HWP file header signature".to_string(),
            ));
        }
        let properties = read_u32(bytes, 36)
            .ok_or_else(|| ParseError::MalformedRecord("file header too short".to_string()))?;
        Ok(Self {
            compressed: properties & 0x1 != 0,
            encrypted: properties & 0x2 != 0,
            distribution: properties & 0x4 != 0,
        })
    }
}

fn parse_hwp5(data: &[u8]) -> Result<Vec<TextUnit>, ParseError> {
    let mut file = CompoundFile::open(Cursor::new(data))
        .map_err(|e| ParseError::InvalidContainer(format!("failed to open compound file: {}", e)))?;

    let header = FileHeader::parse(&read_stream(&mut file, "/FileHeader")?)?;
    if header.encrypted {
        return Err(ParseError::Unsupported("password-protected document".to_string()));
    }
    if header.distribution {
        return Err(ParseError::Unsupported("distribution document".to_string()));
    }

    let doc_info = inflate(read_stream(&mut file, "/DocInfo")?, header.compressed, "DocInfo")?;
    let styles = style_names(&doc_info)?;

    let mut sections: Vec<u32> = file
        .read_storage("/BodyText")
        .map_err(|_| ParseError::MissingPart("BodyText".to_string()))?
        .filter_map(|entry| entry.name().strip_prefix("Section")?.parse().ok())
        .collect();
    sections.sort_unstable();

    let mut units = UnitSequenceBuilder::new();
    for index in sections {
        let part = format!("/BodyText/Section{}", index);
        let section = inflate(read_stream(&mut file, &part)?, header.compressed, &part)?;
        SectionWalker::new(&styles, &mut units).walk(&records(&section)?);
    }

    Ok(units.finish())
}

fn read_stream<F: Read + Seek>(
    file: &mut CompoundFile<F>,
    path: &str,
) -> Result<Vec<u8>, ParseError> {
    let mut stream = file
        .open_stream(path)
        .map_err(|_| ParseError::MissingPart(path.trim_start_matches('/').to_string()))?;
    let mut bytes = Vec::new();
    stream
        .read_to_end(&mut bytes)
        .map_err(|e| ParseError::InvalidContainer(format!("failed to read {}: {}", path, e)))?;
    Ok(bytes)
}

/// HWP streams are raw deflate without a zlib header.
fn inflate(raw: Vec<u8>, compressed: bool, part: &str) -> Result<Vec<u8>, ParseError> {
    if !compressed {
        return Ok(raw);
    }
    let mut out = Vec::new();
    DeflateDecoder::new(raw.as_slice())
        .read_to_end(&mut out)
        .map_err(|e| ParseError::MalformedRecord(format!("{}: {}", part, e)))?;
    Ok(out)
}

struct Record<'a> {
    tag: u16,
    level: u16,
    payload: &'a [u8],
}

/// Splits a stream into records.
///
/// Header bits: tag 0..10, level 10..20, size 20..32. A size of 0xFFF means
/// the real size follows as a separate u32.
fn records(stream: &[u8]) -> Result<Vec<Record<'_>>, ParseError> {
    let mut records = Vec::new();
    let mut offset = 0;

    while offset < stream.len() {
        let header = read_u32(stream, offset)
            .ok_or_else(|| ParseError::MalformedRecord(format!("truncated header at {}", offset)))?;
        offset += 4;

        let tag = (header & 0x3FF) as u16;
        let level = ((header >> 10) & 0x3FF) as u16;
        let mut size = (header >> 20) as usize;
        if size == 0xFFF {
            size = read_u32(stream, offset).ok_or_else(|| {
                ParseError::MalformedRecord(format!("truncated size at {}", offset))
            })? as usize;
            offset += 4;
        }

        let payload = stream.get(offset..offset + size).ok_or_else(|| {
            ParseError::MalformedRecord(format!(
                "record tag {} at {} overruns stream ({} bytes)",
                tag, offset, size
            ))
        })?;
        offset += size;

        records.push(Record {
            tag,
            level,
            payload,
        });
    }

    Ok(records)
}

/// Style names indexed by style id, local and English names joined.
fn style_names(doc_info: &[u8]) -> Result<Vec<String>, ParseError> {
    Ok(records(doc_info)?
        .iter()
        .filter(|r| r.tag == TAG_STYLE)
        .map(|r| {
            let (local, rest) = read_hwp_string(r.payload).unwrap_or_default();
            let (english, _) = read_hwp_string(rest).unwrap_or_default();
            format!("{} {}", local, english)
        })
        .collect())
}

fn read_hwp_string(bytes: &[u8]) -> Option<(String, &[u8])> {
    let len = read_u16(bytes, 0)? as usize;
    let end = 2 + len * 2;
    let raw = bytes.get(2..end)?;
    let code_units: Vec<u16> = raw
        .chunks_exact(2)
        .map(|c| u16::from_le_bytes([c[0], c[1]]))
        .collect();
    Some((String::from_utf16_lossy(&code_units), &bytes[end..]))
}

/// Decodes PARA_TEXT, dropping control characters and their payloads.
fn decode_para_text(payload: &[u8]) -> String {
    let code_units: Vec<u16> = payload
        .chunks_exact(2)
        .map(|c| u16::from_le_bytes([c[0], c[1]]))
        .collect();

    let mut out: Vec<u16> = Vec::with_capacity(code_units.len());
    let mut i = 0;
    while i < code_units.len() {
        let c = code_units[i];
        match c {
            9 => {
                out.push(u16::from(b'\t'));
                i += CONTROL_WIDTH;
            }
            1..=8 | 11 | 12 | 14..=23 => i += CONTROL_WIDTH,
            10 => {
                out.push(u16::from(b'\n'));
                i += 1;
            }
            13 => break,
            24 => {
                out.push(u16::from(b'-'));
                i += 1;
            }
            30 | 31 => {
                out.push(u16::from(b' '));
                i += 1;
            }
            0..=31 => i += 1,
            _ => {
                out.push(c);
                i += 1;
            }
        }
    }

    String::from_utf16_lossy(&out)
}

struct TableState {
    text: TableText,
    level: u16,
    row: Option<u16>,
    cell_open: bool,
}

impl TableState {
    fn new(level: u16) -> Self {
        Self {
            text: TableText::default(),
            level,
            row: None,
            cell_open: false,
        }
    }

    fn start_cell(&mut self, row: Option<u16>) {
        if self.cell_open {
            self.text.end_cell();
        }
        if row != self.row || (row.is_none() && !self.cell_open) {
            self.text.start_row();
            self.row = row;
        }
        self.text.start_cell();
        self.cell_open = true;
    }

    fn finish(mut self) -> String {
        if self.cell_open {
            self.text.end_cell();
        }
        self.text.into_text()
    }
}

/// Turns one section's records into units.
///
/// Top-level paragraphs (level 0) are classified by style. Everything under a
/// table control becomes one table unit; paragraphs under other controls
/// (headers, footnotes, text boxes) are kept as unclassified text.
struct SectionWalker<'a> {
    styles: &'a [String],
    units: &'a mut UnitSequenceBuilder,
    style_id: Option<usize>,
    pending: Option<(UnitType, String)>,
    table: Option<TableState>,
}

impl<'a> SectionWalker<'a> {
    fn new(styles: &'a [String], units: &'a mut UnitSequenceBuilder) -> Self {
        Self {
            styles,
            units,
            style_id: None,
            pending: None,
            table: None,
        }
    }

    fn walk(mut self, records: &[Record<'_>]) {
        for record in records {
            if self.table.as_ref().is_some_and(|t| record.level <= t.level) {
                self.finish_table();
            }

            match record.tag {
                TAG_PARA_HEADER if record.level == 0 => {
                    self.flush_paragraph();
                    self.style_id = record
                        .payload
                        .get(PARA_HEADER_STYLE_OFFSET)
                        .map(|id| *id as usize);
                }
                TAG_PARA_TEXT => self.on_text(record),
                TAG_CTRL_HEADER if self.table.is_none() => {
                    if read_u32(record.payload, 0) == Some(CTRL_TABLE) {
                        self.flush_paragraph();
                        self.table = Some(TableState::new(record.level));
                    }
                }
                TAG_LIST_HEADER => {
                    if let Some(table) = self.table.as_mut() {
                        if record.level == table.level + 1 {
                            table.start_cell(read_u16(record.payload, CELL_ROW_OFFSET));
                        }
                    }
                }
                _ => {}
            }
        }

        self.finish_table();
        self.flush_paragraph();
    }

    fn on_text(&mut self, record: &Record<'_>) {
        let text = decode_para_text(record.payload);
        if let Some(table) = self.table.as_mut() {
            table.text.push_text(&text);
            table.text.end_paragraph();
        } else if record.level == 1 {
            let style_name = self
                .style_id
                .and_then(|id| self.styles.get(id))
                .map(String::as_str);
            self.pending = Some((classify_style(style_name), text));
        } else {
            self.flush_paragraph();
            self.units.push(UnitType::Other, &text);
        }
    }

    fn flush_paragraph(&mut self) {
        if let Some((unit_type, text)) = self.pending.take() {
            self.units.push(unit_type, &text);
        }
    }

    fn finish_table(&mut self) {
        if let Some(table) = self.table.take() {
            self.units.push(UnitType::Table, &table.finish());
        }
    }
}

fn read_u16(bytes: &[u8], offset: usize) -> Option<u16> {
    let raw = bytes.get(offset..offset + 2)?;
    Some(u16::from_le_bytes([raw[0], raw[1]]))
}

fn read_u32(bytes: &[u8], offset: usize) -> Option<u32> {
    let raw = bytes.get(offset..offset + 4)?;
    Some(u32::from_le_bytes([raw[0], raw[1], raw[2], raw[3]]))
}
