use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::{FileRecord, NewFileRecord, WorkRoomId};
use crate::presentation::edge::{ApiError, EdgeHandler, parse_id, present};
use crate::presentation::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct PutFileDataRequest {
    pub uploader_id: Option<String>,
    pub storage_key: Option<String>,
    pub file_name: Option<String>,
    pub file_type: Option<String>,
    pub work_room_id: Option<String>,
    pub description: Option<String>,
    pub chat_message_id: Option<String>,
}

/// Registers an uploaded file. Identical calls create distinct rows.
pub struct PutFileData;

#[async_trait]
impl EdgeHandler for PutFileData {
    const NAME: &'static str = "put_file_data";

    type Request = PutFileDataRequest;
    type Input = NewFileRecord;
    type Output = Vec<FileRecord>;

    fn validate(request: PutFileDataRequest) -> Result<NewFileRecord, ApiError> {
        let (
            Some(uploader_id),
            Some(storage_key),
            Some(file_name),
            Some(file_type),
            Some(work_room_id),
        ) = (
            present(request.uploader_id),
            present(request.storage_key),
            present(request.file_name),
            present(request.file_type),
            present(request.work_room_id),
        ) else {
            return Err(ApiError::Validation("Missing required fields".to_string()));
        };

        let chat_message_id = present(request.chat_message_id)
            .map(|id| parse_id("chat_message_id", &id))
            .transpose()?;

        Ok(NewFileRecord {
            uploader_id: parse_id("uploader_id", &uploader_id)?,
            storage_key,
            file_name,
            file_type,
            work_room_id: parse_id("work_room_id", &work_room_id)?,
            description: present(request.description),
            chat_message_id,
        })
    }

    async fn handle(state: &AppState, file: NewFileRecord) -> Result<Vec<FileRecord>, ApiError> {
        let inserted = state.files.insert(file).await?;
        tracing::info!(file_id = %inserted.id, "File record created");
        Ok(vec![inserted])
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct StorageKeyRequest {
    pub storage_key: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct FileDataResponse {
    pub data: FileRecord,
}

pub struct GetFileDataByStorageKey;

#[async_trait]
impl EdgeHandler for GetFileDataByStorageKey {
    const NAME: &'static str = "get_file_data_by_storage_key";

    type Request = StorageKeyRequest;
    type Input = String;
    type Output = FileDataResponse;

    fn validate(request: StorageKeyRequest) -> Result<String, ApiError> {
        present(request.storage_key).ok_or_else(|| {
            ApiError::Validation("Missing required parameter: storage_key".to_string())
        })
    }

    async fn handle(state: &AppState, storage_key: String) -> Result<FileDataResponse, ApiError> {
        let data = state
            .files
            .find_by_storage_key(&storage_key)
            .await?
            .ok_or_else(|| ApiError::NotFound("File not found.".to_string()))?;

        Ok(FileDataResponse { data })
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct WorkRoomRequest {
    pub work_room_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct WorkRoomFilesResponse {
    pub files: Value,
}

pub struct GetFilesByWorkRoomId;

#[async_trait]
impl EdgeHandler for GetFilesByWorkRoomId {
    const NAME: &'static str = "get_files_by_work_room_id";

    type Request = WorkRoomRequest;
    type Input = WorkRoomId;
    type Output = WorkRoomFilesResponse;

    fn validate(request: WorkRoomRequest) -> Result<Self::Input, ApiError> {
        let work_room_id = present(request.work_room_id)
            .ok_or_else(|| ApiError::Validation("Missing required parameters".to_string()))?;
        parse_id("work_room_id", &work_room_id)
    }

    async fn handle(
        state: &AppState,
        work_room_id: Self::Input,
    ) -> Result<WorkRoomFilesResponse, ApiError> {
        let files = state.files.list_by_work_room(work_room_id).await?;
        Ok(WorkRoomFilesResponse { files })
    }
}
