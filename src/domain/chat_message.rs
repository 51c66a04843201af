use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{ChatMessageId, UserId, WorkRoomId};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(into = "String")]
pub enum MessageType {
    #[default]
    Text,
    File,
    Image,
    Other(String),
}

impl MessageType {
    pub fn as_str(&self) -> &str {
        match self {
            MessageType::Text => "text",
            MessageType::File => "file",
            MessageType::Image => "image",
            MessageType::Other(s) => s.as_str(),
        }
    }

    pub fn carries_attachment(&self) -> bool {
        matches!(self, MessageType::File | MessageType::Image)
    }
}

impl FromStr for MessageType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "text" => MessageType::Text,
            "file" => MessageType::File,
            "image" => MessageType::Image,
            other => MessageType::Other(other.to_string()),
        })
    }
}

impl From<MessageType> for String {
    fn from(value: MessageType) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewChatMessage {
    pub work_room_id: WorkRoomId,
    pub sender_id: UserId,
    pub content: Option<String>,
    pub message_type: MessageType,
    pub attachment_file_storage_key: Option<String>,
    pub attachment_file_type: Option<String>,
}

impl NewChatMessage {
    pub fn has_attachments(&self) -> bool {
        self.attachment_file_storage_key.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatMessage {
    pub id: ChatMessageId,
    pub work_room_id: WorkRoomId,
    pub sender_id: UserId,
    pub content: Option<String>,
    pub message_type: MessageType,
    pub has_attachments: bool,
    pub attachment_file_storage_key: Option<String>,
    pub attachment_file_type: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ChatMessage {
    pub fn from_new(new: NewChatMessage, now: DateTime<Utc>) -> Self {
        let has_attachments = new.has_attachments();
        Self {
            id: ChatMessageId::new(),
            work_room_id: new.work_room_id,
            sender_id: new.sender_id,
            content: new.content,
            message_type: new.message_type,
            has_attachments,
            attachment_file_storage_key: new.attachment_file_storage_key,
            attachment_file_type: new.attachment_file_type,
            created_at: now,
            updated_at: now,
        }
    }
}
