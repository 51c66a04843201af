use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::{Value, json};
use tokio::sync::Mutex;

use crate::application::ports::{
    AnnotationRepository, ChatMessageRepository, ExtractionRepository, FileRepository,
    FriendRepository, RepositoryError,
};
use crate::domain::{
    ChatMessage, DocumentAnnotation, DocumentFormat, FileId, FileRecord, FriendRequestAction,
    FriendRequestAnswer, FriendRequestId, Friendship, NewChatMessage, NewDocumentAnnotation,
    NewFileRecord, OcrPageRecord, TextRecord, UserId, WorkRoomId,
};

/// Extraction rows kept in memory; inserts can be made to fail.
#[derive(Default)]
pub struct InMemoryExtractionRepository {
    text_records: Mutex<Vec<(DocumentFormat, TextRecord)>>,
    ocr_records: Mutex<Vec<OcrPageRecord>>,
    extracted: Mutex<HashSet<FileId>>,
    flag_updates: Mutex<usize>,
    fail_inserts: bool,
}

impl InMemoryExtractionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_inserts() -> Self {
        Self {
            fail_inserts: true,
            ..Self::default()
        }
    }

    pub async fn text_records(&self) -> Vec<(DocumentFormat, TextRecord)> {
        self.text_records.lock().await.clone()
    }

    pub async fn ocr_records(&self) -> Vec<OcrPageRecord> {
        self.ocr_records.lock().await.clone()
    }

    pub async fn is_text_extracted(&self, file_id: FileId) -> bool {
        self.extracted.lock().await.contains(&file_id)
    }

    pub async fn flag_updates(&self) -> usize {
        *self.flag_updates.lock().await
    }

    fn check_insert(&self) -> Result<(), RepositoryError> {
        if self.fail_inserts {
            return Err(RepositoryError::QueryFailed("insert rejected".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl ExtractionRepository for InMemoryExtractionRepository {
    async fn insert_text_records(
        &self,
        format: DocumentFormat,
        records: &[TextRecord],
    ) -> Result<(), RepositoryError> {
        self.check_insert()?;
        self.text_records
            .lock()
            .await
            .extend(records.iter().cloned().map(|r| (format, r)));
        Ok(())
    }

    async fn insert_ocr_records(&self, records: &[OcrPageRecord]) -> Result<(), RepositoryError> {
        self.check_insert()?;
        self.ocr_records.lock().await.extend_from_slice(records);
        Ok(())
    }

    async fn mark_text_extracted(&self, file_id: FileId) -> Result<(), RepositoryError> {
        *self.flag_updates.lock().await += 1;
        self.extracted.lock().await.insert(file_id);
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryFileRepository {
    files: Mutex<Vec<FileRecord>>,
}

impl InMemoryFileRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn files(&self) -> Vec<FileRecord> {
        self.files.lock().await.clone()
    }
}

#[async_trait]
impl FileRepository for InMemoryFileRepository {
    async fn insert(&self, file: NewFileRecord) -> Result<FileRecord, RepositoryError> {
        let record = FileRecord::from_new(file, Utc::now());
        self.files.lock().await.push(record.clone());
        Ok(record)
    }

    async fn find_by_storage_key(
        &self,
        storage_key: &str,
    ) -> Result<Option<FileRecord>, RepositoryError> {
        Ok(self
            .files
            .lock()
            .await
            .iter()
            .rev()
            .find(|f| f.storage_key == storage_key)
            .cloned())
    }

    async fn list_by_work_room(&self, work_room_id: WorkRoomId) -> Result<Value, RepositoryError> {
        let files: Vec<FileRecord> = self
            .files
            .lock()
            .await
            .iter()
            .filter(|f| f.work_room_id == work_room_id)
            .cloned()
            .collect();
        serde_json::to_value(files).map_err(|e| RepositoryError::QueryFailed(e.to_string()))
    }
}

/// Annotations kept in memory, listed in the order the stored procedures sort them.
#[derive(Default)]
pub struct InMemoryAnnotationRepository {
    annotations: Mutex<Vec<DocumentAnnotation>>,
}

impl InMemoryAnnotationRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn annotations(&self) -> Vec<DocumentAnnotation> {
        self.annotations.lock().await.clone()
    }

    async fn listed<F>(&self, keep: F) -> Result<Value, RepositoryError>
    where
        F: Fn(&DocumentAnnotation) -> bool,
    {
        let mut annotations: Vec<DocumentAnnotation> = self
            .annotations
            .lock()
            .await
            .iter()
            .filter(|a| keep(a))
            .cloned()
            .collect();
        annotations.sort_by(|a, b| {
            (&a.parent_file_storage_key, a.page_number, a.created_at).cmp(&(
                &b.parent_file_storage_key,
                b.page_number,
                b.created_at,
            ))
        });
        serde_json::to_value(annotations).map_err(|e| RepositoryError::QueryFailed(e.to_string()))
    }
}

#[async_trait]
impl AnnotationRepository for InMemoryAnnotationRepository {
    async fn insert(
        &self,
        annotation: NewDocumentAnnotation,
    ) -> Result<DocumentAnnotation, RepositoryError> {
        let stored = DocumentAnnotation::from_new(annotation, Utc::now());
        self.annotations.lock().await.push(stored.clone());
        Ok(stored)
    }

    async fn list_by_work_room(&self, work_room_id: WorkRoomId) -> Result<Value, RepositoryError> {
        self.listed(|a| a.work_room_id == work_room_id).await
    }

    async fn list_by_parent_file(
        &self,
        parent_file_storage_key: &str,
    ) -> Result<Value, RepositoryError> {
        self.listed(|a| a.parent_file_storage_key == parent_file_storage_key)
            .await
    }
}

#[derive(Default)]
pub struct InMemoryChatMessageRepository {
    messages: Mutex<Vec<ChatMessage>>,
}

impl InMemoryChatMessageRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn messages(&self) -> Vec<ChatMessage> {
        self.messages.lock().await.clone()
    }
}

#[async_trait]
impl ChatMessageRepository for InMemoryChatMessageRepository {
    async fn insert(&self, message: NewChatMessage) -> Result<ChatMessage, RepositoryError> {
        let stored = ChatMessage::from_new(message, Utc::now());
        self.messages.lock().await.push(stored.clone());
        Ok(stored)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StoredFriendRequest {
    pub id: FriendRequestId,
    pub requester_id: UserId,
    pub recipient_id: Option<UserId>,
    pub recipient_email: String,
    pub status: String,
    pub responded_at: Option<DateTime<Utc>>,
}

/// Users are registered by email; requests to unknown emails get no recipient.
#[derive(Default)]
pub struct InMemoryFriendRepository {
    users: Mutex<HashMap<UserId, (String, String)>>,
    requests: Mutex<Vec<StoredFriendRequest>>,
    friendships: Mutex<Vec<Friendship>>,
}

impl InMemoryFriendRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn add_user(&self, id: UserId, username: &str, email: &str) {
        self.users
            .lock()
            .await
            .insert(id, (username.to_string(), email.to_string()));
    }

    /// Stores a pending request directly, as the stored procedure would.
    pub async fn seed_request(&self, requester_id: UserId, recipient_id: UserId) -> FriendRequestId {
        let id = FriendRequestId::new();
        self.requests.lock().await.push(StoredFriendRequest {
            id,
            requester_id,
            recipient_id: Some(recipient_id),
            recipient_email: String::new(),
            status: "pending".to_string(),
            responded_at: None,
        });
        id
    }

    pub async fn requests(&self) -> Vec<StoredFriendRequest> {
        self.requests.lock().await.clone()
    }

    pub async fn friendships(&self) -> Vec<Friendship> {
        self.friendships.lock().await.clone()
    }
}

#[async_trait]
impl FriendRepository for InMemoryFriendRepository {
    async fn create_request(
        &self,
        requester_id: UserId,
        recipient_email: &str,
    ) -> Result<Value, RepositoryError> {
        let recipient_id = self
            .users
            .lock()
            .await
            .iter()
            .find(|(_, (_, email))| email == recipient_email)
            .map(|(id, _)| *id);

        let request = StoredFriendRequest {
            id: FriendRequestId::new(),
            requester_id,
            recipient_id,
            recipient_email: recipient_email.to_string(),
            status: "pending".to_string(),
            responded_at: None,
        };
        let row = json!({
            "request_id": request.id,
            "recipient_id": request.recipient_id,
        });
        self.requests.lock().await.push(request);

        Ok(json!([row]))
    }

    async fn find_username(&self, user_id: UserId) -> Result<Option<String>, RepositoryError> {
        Ok(self
            .users
            .lock()
            .await
            .get(&user_id)
            .map(|(name, _)| name.clone()))
    }

    async fn answer_request(
        &self,
        answer: &FriendRequestAnswer,
        responded_at: DateTime<Utc>,
    ) -> Result<Option<UserId>, RepositoryError> {
        let mut requests = self.requests.lock().await;
        let Some(request) = requests
            .iter_mut()
            .find(|r| r.id == answer.request_id && r.recipient_id == Some(answer.recipient_id))
        else {
            return Ok(None);
        };

        request.status = answer.action.as_str().to_string();
        request.responded_at = Some(responded_at);
        Ok(Some(request.requester_id))
    }

    async fn add_friendship(&self, friendship: &Friendship) -> Result<(), RepositoryError> {
        let mut friendships = self.friendships.lock().await;
        let exists = friendships
            .iter()
            .any(|f| f.user_id1 == friendship.user_id1 && f.user_id2 == friendship.user_id2);
        if exists {
            return Err(RepositoryError::ConstraintViolation(
                "friendship already exists".to_string(),
            ));
        }
        friendships.push(friendship.clone());
        Ok(())
    }
}

impl StoredFriendRequest {
    pub fn is_answered_with(&self, action: FriendRequestAction) -> bool {
        self.status == action.as_str() && self.responded_at.is_some()
    }
}
