use std::sync::Arc;

use workroom_edge::application::services::{FriendshipError, FriendshipService};
use workroom_edge::domain::{
    EmailType, FriendRequestAction, FriendRequestAnswer, FriendRequestId, UserId,
};
use workroom_edge::infrastructure::persistence::InMemoryFriendRepository;

use crate::helpers::fakes::RecordingEmailDispatcher;

struct Harness {
    service: FriendshipService,
    repository: Arc<InMemoryFriendRepository>,
    emails: Arc<RecordingEmailDispatcher>,
}

fn harness(emails: RecordingEmailDispatcher) -> Harness {
    let repository = Arc::new(InMemoryFriendRepository::new());
    let emails = Arc::new(emails);
    Harness {
        service: FriendshipService::new(repository.clone(), emails.clone()),
        repository,
        emails,
    }
}

#[tokio::test]
async fn given_registered_recipient_when_sending_request_then_emails_a_friend_request() {
    let harness = harness(RecordingEmailDispatcher::new());
    let requester = UserId::new();
    let recipient = UserId::new();
    harness.repository.add_user(requester, "mina", "mina@example.com").await;
    harness.repository.add_user(recipient, "joon", "joon@example.com").await;

    let created = harness
        .service
        .send_request(requester, "joon@example.com")
        .await
        .unwrap();

    assert_eq!(created[0]["recipient_id"], recipient.to_string());
    let emails = harness.emails.emails();
    assert_eq!(emails.len(), 1);
    assert_eq!(emails[0].recipient_email, "joon@example.com");
    assert_eq!(emails[0].requester_name, "mina");
    assert_eq!(emails[0].email_type, EmailType::FriendRequest);
}

#[tokio::test]
async fn given_unregistered_email_when_sending_request_then_emails_an_invitation() {
    let harness = harness(RecordingEmailDispatcher::new());
    let requester = UserId::new();
    harness.repository.add_user(requester, "mina", "mina@example.com").await;

    let created = harness
        .service
        .send_request(requester, "new@example.com")
        .await
        .unwrap();

    assert!(created[0]["recipient_id"].is_null());
    assert_eq!(harness.emails.emails()[0].email_type, EmailType::Invitation);
}

#[tokio::test]
async fn given_requester_without_username_when_sending_request_then_fails_without_email() {
    let harness = harness(RecordingEmailDispatcher::new());

    let result = harness
        .service
        .send_request(UserId::new(), "someone@example.com")
        .await;

    assert!(matches!(result, Err(FriendshipError::RequesterNotFound)));
    assert!(harness.emails.emails().is_empty());
}

#[tokio::test]
async fn given_email_function_rejects_when_sending_request_then_returns_email_error() {
    let harness = harness(RecordingEmailDispatcher::rejecting());
    let requester = UserId::new();
    harness.repository.add_user(requester, "mina", "mina@example.com").await;

    let result = harness
        .service
        .send_request(requester, "joon@example.com")
        .await;

    assert!(matches!(result, Err(FriendshipError::Email(_))));
}

#[tokio::test]
async fn given_accepted_answer_when_answering_then_records_status_and_friendship() {
    let harness = harness(RecordingEmailDispatcher::new());
    let requester = UserId::new();
    let recipient = UserId::new();
    let request_id = harness.repository.seed_request(requester, recipient).await;

    harness
        .service
        .answer(&FriendRequestAnswer {
            request_id,
            recipient_id: recipient,
            action: FriendRequestAction::Accepted,
        })
        .await
        .unwrap();

    let requests = harness.repository.requests().await;
    assert!(requests[0].is_answered_with(FriendRequestAction::Accepted));
    let friendships = harness.repository.friendships().await;
    assert_eq!(friendships.len(), 1);
    assert_eq!(friendships[0].user_id1, requester);
    assert_eq!(friendships[0].user_id2, recipient);
}

#[tokio::test]
async fn given_declined_answer_when_answering_then_no_friendship_is_created() {
    let harness = harness(RecordingEmailDispatcher::new());
    let requester = UserId::new();
    let recipient = UserId::new();
    let request_id = harness.repository.seed_request(requester, recipient).await;

    harness
        .service
        .answer(&FriendRequestAnswer {
            request_id,
            recipient_id: recipient,
            action: FriendRequestAction::Declined,
        })
        .await
        .unwrap();

    assert!(harness.repository.requests().await[0].is_answered_with(FriendRequestAction::Declined));
    assert!(harness.repository.friendships().await.is_empty());
}

#[tokio::test]
async fn given_answer_from_other_user_when_answering_then_request_is_not_found() {
    let harness = harness(RecordingEmailDispatcher::new());
    let request_id = harness
        .repository
        .seed_request(UserId::new(), UserId::new())
        .await;

    let result = harness
        .service
        .answer(&FriendRequestAnswer {
            request_id,
            recipient_id: UserId::new(),
            action: FriendRequestAction::Accepted,
        })
        .await;

    assert!(matches!(result, Err(FriendshipError::RequestNotFound)));
    assert!(harness.repository.friendships().await.is_empty());
}

#[tokio::test]
async fn given_unknown_request_id_when_answering_then_request_is_not_found() {
    let harness = harness(RecordingEmailDispatcher::new());

    let result = harness
        .service
        .answer(&FriendRequestAnswer {
            request_id: FriendRequestId::new(),
            recipient_id: UserId::new(),
            action: FriendRequestAction::Declined,
        })
        .await;

    assert!(matches!(result, Err(FriendshipError::RequestNotFound)));
}
