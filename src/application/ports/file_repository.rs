use async_trait::async_trait;
use serde_json::Value;

use crate::domain::{FileRecord, NewFileRecord, WorkRoomId};

use super::RepositoryError;

#[async_trait]
pub trait FileRepository: Send + Sync {
    async fn insert(&self, file: NewFileRecord) -> Result<FileRecord, RepositoryError>;

    async fn find_by_storage_key(
        &self,
        storage_key: &str,
    ) -> Result<Option<FileRecord>, RepositoryError>;

    /// Result of the `get_files_by_work_room_id` stored procedure.
    async fn list_by_work_room(&self, work_room_id: WorkRoomId) -> Result<Value, RepositoryError>;
}
