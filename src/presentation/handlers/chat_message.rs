use async_trait::async_trait;
use serde::Deserialize;

use crate::domain::{ChatMessage, MessageType, NewChatMessage};
use crate::presentation::edge::{ApiError, EdgeHandler, parse_id, present};
use crate::presentation::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct PutChatMessageRequest {
    pub work_room_id: Option<String>,
    pub sender_id: Option<String>,
    pub content: Option<String>,
    pub message_type: Option<String>,
    pub attachment_file_storage_key: Option<String>,
    pub attachment_file_type: Option<String>,
}

/// Posts a chat message from a JSON or form body.
pub struct PutChatMessage;

#[async_trait]
impl EdgeHandler for PutChatMessage {
    const NAME: &'static str = "put_chat_message";
    const ACCEPTS_FORM: bool = true;

    type Request = PutChatMessageRequest;
    type Input = NewChatMessage;
    type Output = Vec<ChatMessage>;

    fn validate(request: PutChatMessageRequest) -> Result<NewChatMessage, ApiError> {
        let (Some(work_room_id), Some(sender_id)) =
            (present(request.work_room_id), present(request.sender_id))
        else {
            return Err(ApiError::Validation(
                "Missing required parameters".to_string(),
            ));
        };

        let message_type = present(request.message_type)
            .map(|t| t.parse::<MessageType>())
            .transpose()
            .map_err(ApiError::Validation)?
            .unwrap_or_default();
        let content = present(request.content);
        let attachment_file_storage_key = present(request.attachment_file_storage_key);

        if message_type == MessageType::Text && content.is_none() {
            return Err(ApiError::Validation(
                "Missing content for text message".to_string(),
            ));
        }
        if message_type.carries_attachment()
            && content.is_none()
            && attachment_file_storage_key.is_none()
        {
            return Err(ApiError::Validation(
                "Missing content and attachment for file/image message".to_string(),
            ));
        }

        Ok(NewChatMessage {
            work_room_id: parse_id("work_room_id", &work_room_id)?,
            sender_id: parse_id("sender_id", &sender_id)?,
            content,
            message_type,
            attachment_file_storage_key,
            attachment_file_type: present(request.attachment_file_type),
        })
    }

    async fn handle(
        state: &AppState,
        message: NewChatMessage,
    ) -> Result<Vec<ChatMessage>, ApiError> {
        let stored = state.chat_messages.insert(message).await?;
        tracing::info!(message_id = %stored.id, "Chat message stored");
        Ok(vec![stored])
    }
}
