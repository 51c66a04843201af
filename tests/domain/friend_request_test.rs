use workroom_edge::domain::{EmailType, FriendRequestAction, UserId};

#[test]
fn given_known_actions_when_parsing_then_returns_action() {
    assert_eq!(
        "accepted".parse::<FriendRequestAction>(),
        Ok(FriendRequestAction::Accepted)
    );
    assert_eq!(
        "declined".parse::<FriendRequestAction>(),
        Ok(FriendRequestAction::Declined)
    );
}

#[test]
fn given_unknown_action_when_parsing_then_returns_validation_message() {
    let result = "maybe".parse::<FriendRequestAction>();

    assert_eq!(
        result,
        Err("Invalid action. Must be 'accepted' or 'declined'.".to_string())
    );
}

#[test]
fn given_action_in_other_case_when_parsing_then_is_rejected() {
    assert!("Accepted".parse::<FriendRequestAction>().is_err());
}

#[test]
fn given_recipient_id_when_choosing_email_type_then_sends_friend_request() {
    let id = UserId::new().to_string();
    assert_eq!(
        EmailType::for_recipient(Some(&id)),
        EmailType::FriendRequest
    );
}

#[test]
fn given_no_recipient_when_choosing_email_type_then_sends_invitation() {
    assert_eq!(EmailType::for_recipient(None), EmailType::Invitation);
    assert_eq!(EmailType::for_recipient(Some("")), EmailType::Invitation);
}

#[test]
fn given_email_type_when_serialized_then_uses_snake_case() {
    assert_eq!(
        serde_json::to_value(EmailType::FriendRequest).unwrap(),
        "friend_request"
    );
    assert_eq!(
        serde_json::to_value(EmailType::Invitation).unwrap(),
        "invitation"
    );
}

#[test]
fn given_malformed_user_id_when_parsing_then_error_names_the_field() {
    let error = "not-a-uuid".parse::<UserId>().unwrap_err();
    assert_eq!(error, "Invalid user id: not-a-uuid");
}
