use std::sync::Arc;

use chrono::Utc;
use serde_json::Value;
use tracing::instrument;

use crate::application::ports::{EmailDispatcher, EmailError, FriendRepository, RepositoryError};
use crate::domain::{
    EmailType, FriendRequestAction, FriendRequestAnswer, FriendRequestEmail, Friendship, UserId,
};

#[derive(Debug, thiserror::Error)]
pub enum FriendshipError {
    #[error("repository: {0}")]
    Repository(#[from] RepositoryError),
    #[error("Failed to retrieve requester info")]
    RequesterNotFound,
    #[error("Friend request not found")]
    RequestNotFound,
    #[error("email: {0}")]
    Email(#[from] EmailError),
}

pub struct FriendshipService {
    repository: Arc<dyn FriendRepository>,
    email_dispatcher: Arc<dyn EmailDispatcher>,
}

impl FriendshipService {
    pub fn new(
        repository: Arc<dyn FriendRepository>,
        email_dispatcher: Arc<dyn EmailDispatcher>,
    ) -> Self {
        Self {
            repository,
            email_dispatcher,
        }
    }

    /// Creates the request and notifies the recipient by email.
    ///
    /// Returns the stored procedure's result unchanged.
    #[instrument(skip(self, recipient_email), fields(requester_id = %requester_id))]
    pub async fn send_request(
        &self,
        requester_id: UserId,
        recipient_email: &str,
    ) -> Result<Value, FriendshipError> {
        let created = self
            .repository
            .create_request(requester_id, recipient_email)
            .await?;

        let requester_name = self
            .repository
            .find_username(requester_id)
            .await?
            .ok_or(FriendshipError::RequesterNotFound)?;

        let email = FriendRequestEmail {
            recipient_email: recipient_email.to_string(),
            requester_name,
            email_type: EmailType::for_recipient(recipient_id_of(&created)),
        };
        self.email_dispatcher
            .send_friend_request_email(&email)
            .await?;

        tracing::info!(email_type = ?email.email_type, "Friend request created");
        Ok(created)
    }

    #[instrument(skip(self, answer), fields(
        request_id = %answer.request_id,
        recipient_id = %answer.recipient_id,
        action = %answer.action
    ))]
    pub async fn answer(&self, answer: &FriendRequestAnswer) -> Result<(), FriendshipError> {
        let now = Utc::now();
        let requester_id = self
            .repository
            .answer_request(answer, now)
            .await?
            .ok_or(FriendshipError::RequestNotFound)?;

        if answer.action == FriendRequestAction::Accepted {
            let friendship = Friendship {
                user_id1: requester_id,
                user_id2: answer.recipient_id,
                established_at: now,
            };
            self.repository.add_friendship(&friendship).await?;
            tracing::info!(requester_id = %requester_id, "Friendship established");
        }

        Ok(())
    }
}

/// `put_friend_request` may return a row or a one-row set.
fn recipient_id_of(created: &Value) -> Option<&str> {
    let row = match created {
        Value::Array(rows) => rows.first()?,
        other => other,
    };
    row.get("recipient_id").and_then(Value::as_str)
}
