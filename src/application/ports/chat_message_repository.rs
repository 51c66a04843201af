use async_trait::async_trait;

use crate::domain::{ChatMessage, NewChatMessage};

use super::RepositoryError;

#[async_trait]
pub trait ChatMessageRepository: Send + Sync {
    async fn insert(&self, message: NewChatMessage) -> Result<ChatMessage, RepositoryError>;
}
