use chrono::{DateTime, Utc};
use serde_json::Value;

use super::{Embedding, FileId, OcrStatus, StorageKey, UnitType, WorkRoomId};

/// Row written for a DOCX/HWP/PPTX text unit.
#[derive(Debug, Clone, PartialEq)]
pub struct TextRecord {
    pub file_id: FileId,
    pub work_room_id: WorkRoomId,
    pub storage_key: StorageKey,
    pub position: Option<u32>,
    pub unit_type: UnitType,
    pub text: String,
    pub embedding: Option<Embedding>,
    pub created_at: DateTime<Utc>,
}

/// Row written for one OCR'd PDF page.
#[derive(Debug, Clone, PartialEq)]
pub struct OcrPageRecord {
    pub file_id: FileId,
    pub work_room_id: WorkRoomId,
    pub storage_key: StorageKey,
    pub bucket: String,
    pub file_name: String,
    /// 1-based, counted across all chunks of the source document.
    pub page_number: u32,
    pub text: String,
    pub status: OcrStatus,
    pub average_confidence: Option<f64>,
    pub converted_image_info: Option<Value>,
    pub raw_response: Value,
    pub embedding: Option<Embedding>,
    pub created_at: DateTime<Utc>,
}
