use super::{FileId, StorageKey, WorkRoomId};

pub const DEFAULT_BUCKET: &str = "work_room_files";
pub const UNKNOWN_FILE_NAME: &str = "Unknown";

/// One extraction run for a stored file.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionRequest {
    pub file_id: FileId,
    pub work_room_id: WorkRoomId,
    pub storage_key: StorageKey,
    pub bucket: String,
    pub file_name: Option<String>,
}

impl ExtractionRequest {
    pub fn new(file_id: FileId, work_room_id: WorkRoomId, storage_key: StorageKey) -> Self {
        Self {
            file_id,
            work_room_id,
            storage_key,
            bucket: DEFAULT_BUCKET.to_string(),
            file_name: None,
        }
    }

    pub fn with_bucket(mut self, bucket: impl Into<String>) -> Self {
        self.bucket = bucket.into();
        self
    }

    pub fn with_file_name(mut self, file_name: Option<String>) -> Self {
        self.file_name = file_name.filter(|n| !n.trim().is_empty());
        self
    }

    pub fn file_name_or_unknown(&self) -> &str {
        self.file_name.as_deref().unwrap_or(UNKNOWN_FILE_NAME)
    }
}
