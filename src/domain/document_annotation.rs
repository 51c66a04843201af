use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{AnnotationId, FileId, UserId, WorkRoomId};

pub const DEFAULT_ANNOTATION_TYPE: &str = "manual";

/// Page region in the viewer's coordinate space: top-left corner plus size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AnnotationArea {
    #[serde(rename = "area_left")]
    pub left: f64,
    #[serde(rename = "area_top")]
    pub top: f64,
    #[serde(rename = "area_width")]
    pub width: f64,
    #[serde(rename = "area_height")]
    pub height: f64,
}

impl AnnotationArea {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Result<Self, String> {
        if !(left.is_finite() && top.is_finite() && width.is_finite() && height.is_finite()) {
            return Err("Annotation area must be finite".to_string());
        }
        if width < 0.0 || height < 0.0 {
            return Err("area_width and area_height must not be negative".to_string());
        }
        Ok(Self {
            left,
            top,
            width,
            height,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewDocumentAnnotation {
    pub document_id: Option<FileId>,
    pub parent_file_storage_key: String,
    pub work_room_id: WorkRoomId,
    pub page_number: u32,
    pub area: AnnotationArea,
    pub content: String,
    pub annotation_type: String,
    pub image_file_storage_key: Option<String>,
    pub is_ocr: bool,
    pub ocr_text: Option<String>,
    pub created_by: UserId,
}

/// A `document_annotations` row as returned to callers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentAnnotation {
    pub id: AnnotationId,
    pub document_id: Option<FileId>,
    pub parent_file_storage_key: String,
    pub work_room_id: WorkRoomId,
    pub page_number: u32,
    #[serde(flatten)]
    pub area: AnnotationArea,
    pub content: String,
    pub annotation_type: String,
    pub image_file_storage_key: Option<String>,
    pub is_ocr: bool,
    pub ocr_text: Option<String>,
    pub created_by: UserId,
    pub created_at: DateTime<Utc>,
}

impl DocumentAnnotation {
    pub fn from_new(new: NewDocumentAnnotation, now: DateTime<Utc>) -> Self {
        Self {
            id: AnnotationId::new(),
            document_id: new.document_id,
            parent_file_storage_key: new.parent_file_storage_key,
            work_room_id: new.work_room_id,
            page_number: new.page_number,
            area: new.area,
            content: new.content,
            annotation_type: new.annotation_type,
            image_file_storage_key: new.image_file_storage_key,
            is_ocr: new.is_ocr,
            ocr_text: new.ocr_text,
            created_by: new.created_by,
            created_at: now,
        }
    }
}
