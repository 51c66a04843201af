use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{ChatMessageId, FileId, UserId, WorkRoomId};

#[derive(Debug, Clone, PartialEq)]
pub struct NewFileRecord {
    pub uploader_id: UserId,
    pub storage_key: String,
    pub file_name: String,
    pub file_type: String,
    pub work_room_id: WorkRoomId,
    pub description: Option<String>,
    pub chat_message_id: Option<ChatMessageId>,
}

/// A `files` row as returned to callers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileRecord {
    pub id: FileId,
    pub uploader_id: UserId,
    pub storage_key: String,
    pub file_name: String,
    pub file_type: String,
    pub work_room_id: WorkRoomId,
    pub description: Option<String>,
    pub chat_message_id: Option<ChatMessageId>,
    pub is_text_extracted: bool,
    pub uploaded_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl FileRecord {
    pub fn from_new(new: NewFileRecord, now: DateTime<Utc>) -> Self {
        Self {
            id: FileId::new(),
            uploader_id: new.uploader_id,
            storage_key: new.storage_key,
            file_name: new.file_name,
            file_type: new.file_type,
            work_room_id: new.work_room_id,
            description: new.description,
            chat_message_id: new.chat_message_id,
            is_text_extracted: false,
            uploaded_at: now,
            updated_at: now,
        }
    }
}
