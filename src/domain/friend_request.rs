use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{FriendRequestId, UserId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FriendRequestAction {
    Accepted,
    Declined,
}

impl FriendRequestAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            FriendRequestAction::Accepted => "accepted",
            FriendRequestAction::Declined => "declined",
        }
    }
}

impl FromStr for FriendRequestAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "accepted" => Ok(FriendRequestAction::Accepted),
            "declined" => Ok(FriendRequestAction::Declined),
            _ => Err("Invalid action. Must be 'accepted' or 'declined'.".to_string()),
        }
    }
}

impl fmt::Display for FriendRequestAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FriendRequestAnswer {
    pub request_id: FriendRequestId,
    pub recipient_id: UserId,
    pub action: FriendRequestAction,
}

/// `user_id1` is the requester, `user_id2` the recipient who accepted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Friendship {
    pub user_id1: UserId,
    pub user_id2: UserId,
    pub established_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EmailType {
    FriendRequest,
    Invitation,
}

impl EmailType {
    /// Registered recipients get a friend request; unknown addresses get an invitation.
    pub fn for_recipient(recipient_id: Option<&str>) -> Self {
        match recipient_id {
            Some(id) if !id.is_empty() => EmailType::FriendRequest,
            _ => EmailType::Invitation,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FriendRequestEmail {
    pub recipient_email: String,
    pub requester_name: String,
    pub email_type: EmailType,
}
