use async_trait::async_trait;
use serde_json::Value;

use crate::domain::{DocumentAnnotation, NewDocumentAnnotation, WorkRoomId};

use super::RepositoryError;

#[async_trait]
pub trait AnnotationRepository: Send + Sync {
    async fn insert(
        &self,
        annotation: NewDocumentAnnotation,
    ) -> Result<DocumentAnnotation, RepositoryError>;

    /// Result of the `get_document_annotations_by_work_room_id` stored procedure.
    async fn list_by_work_room(&self, work_room_id: WorkRoomId) -> Result<Value, RepositoryError>;

    /// Result of the `get_document_annotations_by_parent_file_storage_key` stored procedure.
    async fn list_by_parent_file(
        &self,
        parent_file_storage_key: &str,
    ) -> Result<Value, RepositoryError>;
}
