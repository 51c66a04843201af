use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::{FriendRequestAction, FriendRequestAnswer, UserId};
use crate::presentation::edge::{ApiError, EdgeHandler, parse_id, present};
use crate::presentation::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct PutFriendRequestRequest {
    pub requester_id: Option<String>,
    pub recipient_email: Option<String>,
}

pub struct PutFriendRequest;

#[async_trait]
impl EdgeHandler for PutFriendRequest {
    const NAME: &'static str = "put_friend_request";

    type Request = PutFriendRequestRequest;
    type Input = (UserId, String);
    type Output = Value;

    fn validate(request: PutFriendRequestRequest) -> Result<(UserId, String), ApiError> {
        let (Some(requester_id), Some(recipient_email)) =
            (present(request.requester_id), present(request.recipient_email))
        else {
            return Err(ApiError::Validation(
                "Missing required parameters".to_string(),
            ));
        };

        Ok((
            parse_id("requester_id", &requester_id)?,
            recipient_email.trim().to_string(),
        ))
    }

    async fn handle(state: &AppState, input: (UserId, String)) -> Result<Value, ApiError> {
        let (requester_id, recipient_email) = input;
        Ok(state
            .friendships
            .send_request(requester_id, &recipient_email)
            .await?)
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct AnswerFriendRequestRequest {
    pub request_id: Option<String>,
    pub recipient_id: Option<String>,
    pub action: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

pub struct AnswerFriendRequest;

#[async_trait]
impl EdgeHandler for AnswerFriendRequest {
    const NAME: &'static str = "answer_friend_request";

    type Request = AnswerFriendRequestRequest;
    type Input = FriendRequestAnswer;
    type Output = MessageResponse;

    fn validate(request: AnswerFriendRequestRequest) -> Result<FriendRequestAnswer, ApiError> {
        let (Some(request_id), Some(recipient_id), Some(action)) = (
            present(request.request_id),
            present(request.recipient_id),
            present(request.action),
        ) else {
            return Err(ApiError::Validation(
                "Missing required parameters".to_string(),
            ));
        };

        let action = action
            .parse::<FriendRequestAction>()
            .map_err(ApiError::Validation)?;

        Ok(FriendRequestAnswer {
            request_id: parse_id("request_id", &request_id)?,
            recipient_id: parse_id("recipient_id", &recipient_id)?,
            action,
        })
    }

    async fn handle(
        state: &AppState,
        answer: FriendRequestAnswer,
    ) -> Result<MessageResponse, ApiError> {
        state.friendships.answer(&answer).await?;
        Ok(MessageResponse {
            message: "Friend request processed successfully.".to_string(),
        })
    }
}
