use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::postgres::PgRow;
use sqlx::types::Json;
use sqlx::{PgPool, Row};
use tracing::instrument;
use uuid::Uuid;

use crate::application::ports::{
    AnnotationRepository, ChatMessageRepository, FileRepository, FriendRepository,
    RepositoryError,
};
use crate::domain::{
    AnnotationId, ChatMessage, ChatMessageId, DocumentAnnotation, FileId, FileRecord,
    FriendRequestAnswer, Friendship, MessageType, NewChatMessage, NewDocumentAnnotation,
    NewFileRecord, UserId, WorkRoomId,
};

use super::pg_error::query_error;

fn column<'r, T>(row: &'r PgRow, name: &str) -> Result<T, RepositoryError>
where
    T: sqlx::Decode<'r, sqlx::Postgres> + sqlx::Type<sqlx::Postgres>,
{
    row.try_get(name)
        .map_err(|e| RepositoryError::QueryFailed(format!("column {}: {}", name, e)))
}

const FILE_COLUMNS: &str = "id, uploader_id, storage_key, file_name, file_type, work_room_id, \
     description, chat_message_id, is_text_extracted, uploaded_at, updated_at";

fn file_from_row(row: &PgRow) -> Result<FileRecord, RepositoryError> {
    Ok(FileRecord {
        id: FileId::from_uuid(column(row, "id")?),
        uploader_id: UserId::from_uuid(column(row, "uploader_id")?),
        storage_key: column(row, "storage_key")?,
        file_name: column(row, "file_name")?,
        file_type: column(row, "file_type")?,
        work_room_id: WorkRoomId::from_uuid(column(row, "work_room_id")?),
        description: column(row, "description")?,
        chat_message_id: column::<Option<Uuid>>(row, "chat_message_id")?
            .map(ChatMessageId::from_uuid),
        is_text_extracted: column(row, "is_text_extracted")?,
        uploaded_at: column(row, "uploaded_at")?,
        updated_at: column(row, "updated_at")?,
    })
}

pub struct PgFileRepository {
    pool: PgPool,
}

impl PgFileRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FileRepository for PgFileRepository {
    #[instrument(skip(self, file), fields(storage_key = %file.storage_key))]
    async fn insert(&self, file: NewFileRecord) -> Result<FileRecord, RepositoryError> {
        let sql = format!(
            r#"
            INSERT INTO files
                (uploader_id, storage_key, file_name, file_type, work_room_id, description, chat_message_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {}
            "#,
            FILE_COLUMNS
        );

        let row = sqlx::query(&sql)
            .bind(file.uploader_id.as_uuid())
            .bind(&file.storage_key)
            .bind(&file.file_name)
            .bind(&file.file_type)
            .bind(file.work_room_id.as_uuid())
            .bind(&file.description)
            .bind(file.chat_message_id.map(|id| id.as_uuid()))
            .fetch_one(&self.pool)
            .await
            .map_err(query_error)?;

        file_from_row(&row)
    }

    /// Storage keys are not unique; the most recent upload wins.
    #[instrument(skip(self))]
    async fn find_by_storage_key(
        &self,
        storage_key: &str,
    ) -> Result<Option<FileRecord>, RepositoryError> {
        let sql = format!(
            r#"
            SELECT {}
            FROM files
            WHERE storage_key = $1
            ORDER BY uploaded_at DESC
            LIMIT 1
            "#,
            FILE_COLUMNS
        );

        let row = sqlx::query(&sql)
            .bind(storage_key)
            .fetch_optional(&self.pool)
            .await
            .map_err(query_error)?;

        row.as_ref().map(file_from_row).transpose()
    }

    #[instrument(skip(self), fields(work_room_id = %work_room_id))]
    async fn list_by_work_room(&self, work_room_id: WorkRoomId) -> Result<Value, RepositoryError> {
        let files: Json<Value> = sqlx::query_scalar(
            r#"
            SELECT COALESCE(jsonb_agg(to_jsonb(f)), '[]'::jsonb)
            FROM get_files_by_work_room_id(work_room_id => $1) AS f
            "#,
        )
        .bind(work_room_id.as_uuid())
        .fetch_one(&self.pool)
        .await
        .map_err(query_error)?;

        Ok(files.0)
    }
}

pub struct PgChatMessageRepository {
    pool: PgPool,
}

impl PgChatMessageRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ChatMessageRepository for PgChatMessageRepository {
    #[instrument(skip(self, message), fields(
        work_room_id = %message.work_room_id,
        message_type = %message.message_type
    ))]
    async fn insert(&self, message: NewChatMessage) -> Result<ChatMessage, RepositoryError> {
        let has_attachments = message.has_attachments();

        let row = sqlx::query(
            r#"
            INSERT INTO chat_messages
                (work_room_id, sender_id, content, message_type, has_attachments,
                 attachment_file_storage_key, attachment_file_type)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, work_room_id, sender_id, content, message_type, has_attachments,
                      attachment_file_storage_key, attachment_file_type, created_at, updated_at
            "#,
        )
        .bind(message.work_room_id.as_uuid())
        .bind(message.sender_id.as_uuid())
        .bind(&message.content)
        .bind(message.message_type.as_str())
        .bind(has_attachments)
        .bind(&message.attachment_file_storage_key)
        .bind(&message.attachment_file_type)
        .fetch_one(&self.pool)
        .await
        .map_err(query_error)?;

        let message_type = column::<String>(&row, "message_type")?
            .parse::<MessageType>()
            .map_err(RepositoryError::QueryFailed)?;

        Ok(ChatMessage {
            id: ChatMessageId::from_uuid(column(&row, "id")?),
            work_room_id: WorkRoomId::from_uuid(column(&row, "work_room_id")?),
            sender_id: UserId::from_uuid(column(&row, "sender_id")?),
            content: column(&row, "content")?,
            message_type,
            has_attachments: column(&row, "has_attachments")?,
            attachment_file_storage_key: column(&row, "attachment_file_storage_key")?,
            attachment_file_type: column(&row, "attachment_file_type")?,
            created_at: column(&row, "created_at")?,
            updated_at: column(&row, "updated_at")?,
        })
    }
}

pub struct PgFriendRepository {
    pool: PgPool,
}

impl PgFriendRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FriendRepository for PgFriendRepository {
    #[instrument(skip(self, recipient_email), fields(requester_id = %requester_id))]
    async fn create_request(
        &self,
        requester_id: UserId,
        recipient_email: &str,
    ) -> Result<Value, RepositoryError> {
        let created: Json<Value> = sqlx::query_scalar(
            r#"
            SELECT COALESCE(jsonb_agg(to_jsonb(r)), '[]'::jsonb)
            FROM put_friend_request(requester_id => $1, recipient_email => $2) AS r
            "#,
        )
        .bind(requester_id.as_uuid())
        .bind(recipient_email)
        .fetch_one(&self.pool)
        .await
        .map_err(query_error)?;

        Ok(created.0)
    }

    #[instrument(skip(self), fields(user_id = %user_id))]
    async fn find_username(&self, user_id: UserId) -> Result<Option<String>, RepositoryError> {
        let username: Option<Option<String>> =
            sqlx::query_scalar("SELECT username FROM users WHERE id = $1")
                .bind(user_id.as_uuid())
                .fetch_optional(&self.pool)
                .await
                .map_err(query_error)?;

        Ok(username.flatten().filter(|name| !name.is_empty()))
    }

    #[instrument(skip(self, answer), fields(request_id = %answer.request_id))]
    async fn answer_request(
        &self,
        answer: &FriendRequestAnswer,
        responded_at: DateTime<Utc>,
    ) -> Result<Option<UserId>, RepositoryError> {
        let requester: Option<Uuid> = sqlx::query_scalar(
            r#"
            UPDATE friend_requests
            SET status = $1, responded_at = $2
            WHERE id = $3 AND recipient_id = $4
            RETURNING requester_id
            "#,
        )
        .bind(answer.action.as_str())
        .bind(responded_at)
        .bind(answer.request_id.as_uuid())
        .bind(answer.recipient_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(query_error)?;

        Ok(requester.map(UserId::from_uuid))
    }

    #[instrument(skip(self, friendship), fields(
        user_id1 = %friendship.user_id1,
        user_id2 = %friendship.user_id2
    ))]
    async fn add_friendship(&self, friendship: &Friendship) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO friends (user_id1, user_id2, established_at)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(friendship.user_id1.as_uuid())
        .bind(friendship.user_id2.as_uuid())
        .bind(friendship.established_at)
        .execute(&self.pool)
        .await
        .map_err(query_error)?;

        Ok(())
    }
}

pub struct PgAnnotationRepository {
    pool: PgPool,
}

impl PgAnnotationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AnnotationRepository for PgAnnotationRepository {
    #[instrument(skip(self, annotation), fields(
        work_room_id = %annotation.work_room_id,
        parent_file_storage_key = %annotation.parent_file_storage_key
    ))]
    async fn insert(
        &self,
        annotation: NewDocumentAnnotation,
    ) -> Result<DocumentAnnotation, RepositoryError> {
        let page_number = i32::try_from(annotation.page_number).map_err(|_| {
            RepositoryError::QueryFailed(format!(
                "page_number out of range: {}",
                annotation.page_number
            ))
        })?;

        let row = sqlx::query(
            r#"
            INSERT INTO document_annotations
                (document_id, parent_file_storage_key, work_room_id, page_number,
                 area_left, area_top, area_width, area_height, content, annotation_type,
                 image_file_storage_key, is_ocr, ocr_text, created_by)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            RETURNING id, created_at
            "#,
        )
        .bind(annotation.document_id.map(|id| id.as_uuid()))
        .bind(&annotation.parent_file_storage_key)
        .bind(annotation.work_room_id.as_uuid())
        .bind(page_number)
        .bind(annotation.area.left)
        .bind(annotation.area.top)
        .bind(annotation.area.width)
        .bind(annotation.area.height)
        .bind(&annotation.content)
        .bind(&annotation.annotation_type)
        .bind(&annotation.image_file_storage_key)
        .bind(annotation.is_ocr)
        .bind(&annotation.ocr_text)
        .bind(annotation.created_by.as_uuid())
        .fetch_one(&self.pool)
        .await
        .map_err(query_error)?;

        let id = AnnotationId::from_uuid(column(&row, "id")?);
        let created_at = column(&row, "created_at")?;
        let mut stored = DocumentAnnotation::from_new(annotation, created_at);
        stored.id = id;
        Ok(stored)
    }

    #[instrument(skip(self), fields(work_room_id = %work_room_id))]
    async fn list_by_work_room(&self, work_room_id: WorkRoomId) -> Result<Value, RepositoryError> {
        let annotations: Json<Value> = sqlx::query_scalar(
            r#"
            SELECT COALESCE(jsonb_agg(to_jsonb(a)), '[]'::jsonb)
            FROM get_document_annotations_by_work_room_id(_work_room_id => $1) AS a
            "#,
        )
        .bind(work_room_id.as_uuid())
        .fetch_one(&self.pool)
        .await
        .map_err(query_error)?;

        Ok(annotations.0)
    }

    #[instrument(skip(self))]
    async fn list_by_parent_file(
        &self,
        parent_file_storage_key: &str,
    ) -> Result<Value, RepositoryError> {
        let annotations: Json<Value> = sqlx::query_scalar(
            r#"
            SELECT COALESCE(jsonb_agg(to_jsonb(a)), '[]'::jsonb)
            FROM get_document_annotations_by_parent_file_storage_key(
                _parent_file_storage_key => $1
            ) AS a
            "#,
        )
        .bind(parent_file_storage_key)
        .fetch_one(&self.pool)
        .await
        .map_err(query_error)?;

        Ok(annotations.0)
    }
}
