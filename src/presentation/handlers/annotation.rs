use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

use crate::domain::{
    AnnotationArea, DEFAULT_ANNOTATION_TYPE, DocumentAnnotation, NewDocumentAnnotation, WorkRoomId,
};
use crate::presentation::edge::{ApiError, EdgeHandler, parse_id, present};
use crate::presentation::state::AppState;

/// Region given as top-left corner plus size. Corner-pair coordinates
/// (`x1`, `y1`, `x2`, `y2`) are not accepted.
#[derive(Debug, Default, Deserialize)]
pub struct PutDocumentAnnotationRequest {
    pub document_id: Option<String>,
    pub parent_file_storage_key: Option<String>,
    pub work_room_id: Option<String>,
    pub page_number: Option<u32>,
    pub area_left: Option<f64>,
    pub area_top: Option<f64>,
    pub area_width: Option<f64>,
    pub area_height: Option<f64>,
    pub content: Option<String>,
    pub annotation_type: Option<String>,
    pub image_file_storage_key: Option<String>,
    pub is_ocr: Option<bool>,
    pub ocr_text: Option<String>,
    pub created_by: Option<String>,
}

pub struct PutDocumentAnnotation;

#[async_trait]
impl EdgeHandler for PutDocumentAnnotation {
    const NAME: &'static str = "put_document_annotation";

    type Request = PutDocumentAnnotationRequest;
    type Input = NewDocumentAnnotation;
    type Output = Vec<DocumentAnnotation>;

    fn validate(request: PutDocumentAnnotationRequest) -> Result<NewDocumentAnnotation, ApiError> {
        let (
            Some(parent_file_storage_key),
            Some(work_room_id),
            Some(page_number),
            Some(left),
            Some(top),
            Some(width),
            Some(height),
            Some(content),
            Some(created_by),
        ) = (
            present(request.parent_file_storage_key),
            present(request.work_room_id),
            request.page_number,
            request.area_left,
            request.area_top,
            request.area_width,
            request.area_height,
            present(request.content),
            present(request.created_by),
        ) else {
            return Err(ApiError::Validation("Missing required parameters".to_string()));
        };

        let area = AnnotationArea::new(left, top, width, height).map_err(ApiError::Validation)?;
        let document_id = present(request.document_id)
            .map(|id| parse_id("document_id", &id))
            .transpose()?;

        Ok(NewDocumentAnnotation {
            document_id,
            parent_file_storage_key,
            work_room_id: parse_id("work_room_id", &work_room_id)?,
            page_number,
            area,
            content,
            annotation_type: present(request.annotation_type)
                .unwrap_or_else(|| DEFAULT_ANNOTATION_TYPE.to_string()),
            image_file_storage_key: present(request.image_file_storage_key),
            is_ocr: request.is_ocr.unwrap_or(false),
            ocr_text: present(request.ocr_text),
            created_by: parse_id("created_by", &created_by)?,
        })
    }

    async fn handle(
        state: &AppState,
        annotation: NewDocumentAnnotation,
    ) -> Result<Vec<DocumentAnnotation>, ApiError> {
        let inserted = state.annotations.insert(annotation).await?;
        tracing::info!(
            annotation_id = %inserted.id,
            page_number = inserted.page_number,
            "Document annotation created"
        );
        Ok(vec![inserted])
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct AnnotationsByWorkRoomRequest {
    pub work_room_id: Option<String>,
}

/// Answers with the stored procedure's rows as a bare array.
pub struct GetDocumentAnnotationsByWorkRoomId;

#[async_trait]
impl EdgeHandler for GetDocumentAnnotationsByWorkRoomId {
    const NAME: &'static str = "get_document_annotations_by_work_room_id";
    const ACCEPTS_QUERY: bool = true;

    type Request = AnnotationsByWorkRoomRequest;
    type Input = WorkRoomId;
    type Output = Value;

    fn validate(request: AnnotationsByWorkRoomRequest) -> Result<WorkRoomId, ApiError> {
        let work_room_id = present(request.work_room_id)
            .ok_or_else(|| ApiError::Validation("Missing work_room_id parameter".to_string()))?;
        parse_id("work_room_id", &work_room_id)
    }

    async fn handle(state: &AppState, work_room_id: WorkRoomId) -> Result<Value, ApiError> {
        Ok(state.annotations.list_by_work_room(work_room_id).await?)
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct AnnotationsByParentFileRequest {
    pub parent_file_storage_key: Option<String>,
}

pub struct GetDocumentAnnotationsByParentFileStorageKey;

#[async_trait]
impl EdgeHandler for GetDocumentAnnotationsByParentFileStorageKey {
    const NAME: &'static str = "get_document_annotations_by_parent_file_storage_key";
    const ACCEPTS_QUERY: bool = true;

    type Request = AnnotationsByParentFileRequest;
    type Input = String;
    type Output = Value;

    fn validate(request: AnnotationsByParentFileRequest) -> Result<String, ApiError> {
        present(request.parent_file_storage_key).ok_or_else(|| {
            ApiError::Validation("Missing parent_file_storage_key parameter".to_string())
        })
    }

    async fn handle(state: &AppState, parent_file_storage_key: String) -> Result<Value, ApiError> {
        Ok(state
            .annotations
            .list_by_parent_file(&parent_file_storage_key)
            .await?)
    }
}
