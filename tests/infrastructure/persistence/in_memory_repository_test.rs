use chrono::Utc;

use workroom_edge::application::ports::{
    AnnotationRepository, FileRepository, FriendRepository, RepositoryError,
};
use workroom_edge::domain::{
    AnnotationArea, FriendRequestAction, FriendRequestAnswer, FriendRequestId, Friendship,
    NewDocumentAnnotation, NewFileRecord, UserId, WorkRoomId,
};
use workroom_edge::infrastructure::persistence::{
    InMemoryAnnotationRepository, InMemoryFileRepository, InMemoryFriendRepository,
};

fn new_file(work_room_id: WorkRoomId, storage_key: &str, file_name: &str) -> NewFileRecord {
    NewFileRecord {
        uploader_id: UserId::new(),
        storage_key: storage_key.to_string(),
        file_name: file_name.to_string(),
        file_type: "docx".to_string(),
        work_room_id,
        description: None,
        chat_message_id: None,
    }
}

#[tokio::test]
async fn given_duplicate_storage_keys_when_finding_then_returns_most_recent_upload() {
    let repository = InMemoryFileRepository::new();
    let room = WorkRoomId::new();
    repository
        .insert(new_file(room, "room/a.docx", "first.docx"))
        .await
        .unwrap();
    let second = repository
        .insert(new_file(room, "room/a.docx", "second.docx"))
        .await
        .unwrap();

    let found = repository.find_by_storage_key("room/a.docx").await.unwrap();

    assert_eq!(found.unwrap().id, second.id);
    assert_eq!(repository.files().await.len(), 2);
}

#[tokio::test]
async fn given_files_in_two_rooms_when_listing_then_returns_only_that_room() {
    let repository = InMemoryFileRepository::new();
    let room = WorkRoomId::new();
    repository
        .insert(new_file(room, "room/a.docx", "a.docx"))
        .await
        .unwrap();
    repository
        .insert(new_file(WorkRoomId::new(), "other/b.docx", "b.docx"))
        .await
        .unwrap();

    let listed = repository.list_by_work_room(room).await.unwrap();

    let rows = listed.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["file_name"], "a.docx");
    assert_eq!(rows[0]["is_text_extracted"], false);
}

fn new_annotation(
    work_room_id: WorkRoomId,
    parent_file_storage_key: &str,
    page_number: u32,
) -> NewDocumentAnnotation {
    NewDocumentAnnotation {
        document_id: None,
        parent_file_storage_key: parent_file_storage_key.to_string(),
        work_room_id,
        page_number,
        area: AnnotationArea::new(10.0, 20.0, 100.0, 40.0).unwrap(),
        content: format!("note on page {}", page_number),
        annotation_type: "manual".to_string(),
        image_file_storage_key: None,
        is_ocr: false,
        ocr_text: None,
        created_by: UserId::new(),
    }
}

#[tokio::test]
async fn given_annotations_in_two_rooms_when_listing_by_room_then_returns_only_that_room() {
    let repository = InMemoryAnnotationRepository::new();
    let room = WorkRoomId::new();
    repository
        .insert(new_annotation(room, "room/plan.pdf", 3))
        .await
        .unwrap();
    repository
        .insert(new_annotation(room, "room/plan.pdf", 1))
        .await
        .unwrap();
    repository
        .insert(new_annotation(WorkRoomId::new(), "other/deck.pdf", 1))
        .await
        .unwrap();

    let listed = repository.list_by_work_room(room).await.unwrap();

    let rows = listed.as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["page_number"], 1);
    assert_eq!(rows[1]["page_number"], 3);
    assert_eq!(rows[0]["area_width"], 100.0);
    assert_eq!(repository.annotations().await.len(), 3);
}

#[tokio::test]
async fn given_annotations_on_two_files_when_listing_by_parent_key_then_returns_that_file_only() {
    let repository = InMemoryAnnotationRepository::new();
    let room = WorkRoomId::new();
    let kept = repository
        .insert(new_annotation(room, "room/plan.pdf", 1))
        .await
        .unwrap();
    repository
        .insert(new_annotation(room, "room/budget.pdf", 1))
        .await
        .unwrap();

    let listed = repository.list_by_parent_file("room/plan.pdf").await.unwrap();

    let rows = listed.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["id"], kept.id.to_string());
}

#[tokio::test]
async fn given_no_annotations_when_listing_then_returns_empty_array() {
    let repository = InMemoryAnnotationRepository::new();

    let listed = repository.list_by_work_room(WorkRoomId::new()).await.unwrap();

    assert_eq!(listed, serde_json::json!([]));
}

#[tokio::test]
async fn given_registered_email_when_creating_request_then_row_carries_recipient() {
    let repository = InMemoryFriendRepository::new();
    let recipient = UserId::new();
    repository
        .add_user(recipient, "bora", "bora@example.com")
        .await;

    let created = repository
        .create_request(UserId::new(), "bora@example.com")
        .await
        .unwrap();

    assert_eq!(created[0]["recipient_id"], recipient.to_string());
    assert!(created[0]["request_id"].is_string());
}

#[tokio::test]
async fn given_unknown_email_when_creating_request_then_recipient_is_null() {
    let repository = InMemoryFriendRepository::new();

    let created = repository
        .create_request(UserId::new(), "nobody@example.com")
        .await
        .unwrap();

    assert!(created[0]["recipient_id"].is_null());
    assert_eq!(repository.requests().await[0].recipient_email, "nobody@example.com");
}

#[tokio::test]
async fn given_wrong_recipient_when_answering_then_no_request_matches() {
    let repository = InMemoryFriendRepository::new();
    let request_id = repository.seed_request(UserId::new(), UserId::new()).await;

    let answer = FriendRequestAnswer {
        request_id,
        recipient_id: UserId::new(),
        action: FriendRequestAction::Accepted,
    };
    let requester = repository.answer_request(&answer, Utc::now()).await.unwrap();

    assert_eq!(requester, None);
    assert_eq!(repository.requests().await[0].status, "pending");
}

#[tokio::test]
async fn given_unknown_request_when_answering_then_returns_none() {
    let repository = InMemoryFriendRepository::new();

    let answer = FriendRequestAnswer {
        request_id: FriendRequestId::new(),
        recipient_id: UserId::new(),
        action: FriendRequestAction::Declined,
    };

    assert_eq!(
        repository.answer_request(&answer, Utc::now()).await.unwrap(),
        None
    );
}

#[tokio::test]
async fn given_existing_friendship_when_adding_again_then_returns_constraint_violation() {
    let repository = InMemoryFriendRepository::new();
    let friendship = Friendship {
        user_id1: UserId::new(),
        user_id2: UserId::new(),
        established_at: Utc::now(),
    };
    repository.add_friendship(&friendship).await.unwrap();

    let result = repository.add_friendship(&friendship).await;

    assert!(matches!(
        result,
        Err(RepositoryError::ConstraintViolation(_))
    ));
}
