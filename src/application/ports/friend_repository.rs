use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::domain::{FriendRequestAnswer, Friendship, UserId};

use super::RepositoryError;

#[async_trait]
pub trait FriendRepository: Send + Sync {
    /// Result of the `put_friend_request` stored procedure.
    async fn create_request(
        &self,
        requester_id: UserId,
        recipient_email: &str,
    ) -> Result<Value, RepositoryError>;

    async fn find_username(&self, user_id: UserId) -> Result<Option<String>, RepositoryError>;

    /// Records the answer and returns the requester, or `None` when no request matched.
    async fn answer_request(
        &self,
        answer: &FriendRequestAnswer,
        responded_at: DateTime<Utc>,
    ) -> Result<Option<UserId>, RepositoryError>;

    async fn add_friendship(&self, friendship: &Friendship) -> Result<(), RepositoryError>;
}
