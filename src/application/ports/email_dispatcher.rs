use async_trait::async_trait;

use crate::domain::FriendRequestEmail;

#[async_trait]
pub trait EmailDispatcher: Send + Sync {
    async fn send_friend_request_email(
        &self,
        email: &FriendRequestEmail,
    ) -> Result<(), EmailError>;
}

#[derive(Debug, thiserror::Error)]
pub enum EmailError {
    #[error("email request failed: {0}")]
    RequestFailed(String),
    #[error("Failed to send email: {0}")]
    Rejected(String),
}
