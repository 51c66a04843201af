use async_trait::async_trait;
use pgvector::Vector;
use sqlx::types::Json;
use sqlx::{PgPool, Postgres, Transaction};
use tracing::instrument;

use crate::application::ports::{ExtractionRepository, RepositoryError};
use crate::domain::{DocumentFormat, FileId, OcrPageRecord, TextRecord};

use super::pg_error::query_error;

pub struct PgExtractionRepository {
    pool: PgPool,
}

impl PgExtractionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn begin(&self) -> Result<Transaction<'static, Postgres>, RepositoryError> {
        self.pool.begin().await.map_err(query_error)
    }
}

fn position_column(position: Option<u32>) -> Result<Option<i32>, RepositoryError> {
    position
        .map(|p| {
            i32::try_from(p)
                .map_err(|_| RepositoryError::QueryFailed(format!("position out of range: {}", p)))
        })
        .transpose()
}

#[async_trait]
impl ExtractionRepository for PgExtractionRepository {
    #[instrument(skip(self, records), fields(table = format.table_name(), rows = records.len()))]
    async fn insert_text_records(
        &self,
        format: DocumentFormat,
        records: &[TextRecord],
    ) -> Result<(), RepositoryError> {
        let mut tx = self.begin().await?;

        for record in records {
            let position = position_column(record.position)?;
            let embedding = record.embedding.clone().map(Vector::from);

            let query = match format {
                DocumentFormat::Pptx => sqlx::query(
                    r#"
                    INSERT INTO pptx_text
                        (file_table_id, work_room_id, storage_key, slide_number, text_content, embedding, created_at)
                    VALUES ($1, $2, $3, $4, $5, $6, $7)
                    "#,
                )
                .bind(record.file_id.as_uuid())
                .bind(record.work_room_id.as_uuid())
                .bind(record.storage_key.as_str())
                .bind(position)
                .bind(&record.text)
                .bind(embedding)
                .bind(record.created_at),
                DocumentFormat::Docx | DocumentFormat::Hwp => sqlx::query(text_insert_sql(format))
                    .bind(record.file_id.as_uuid())
                    .bind(record.work_room_id.as_uuid())
                    .bind(record.storage_key.as_str())
                    .bind(position)
                    .bind(record.unit_type.as_str())
                    .bind(&record.text)
                    .bind(embedding)
                    .bind(record.created_at),
            };

            query.execute(&mut *tx).await.map_err(query_error)?;
        }

        tx.commit().await.map_err(query_error)?;
        Ok(())
    }

    #[instrument(skip(self, records), fields(rows = records.len()))]
    async fn insert_ocr_records(&self, records: &[OcrPageRecord]) -> Result<(), RepositoryError> {
        let mut tx = self.begin().await?;

        for record in records {
            let page_number = position_column(Some(record.page_number))?;

            sqlx::query(
                r#"
                INSERT INTO pdf_ocr
                    (file_table_id, work_room_id, storage_key, bucket_name, file_name, page_number,
                     ocr_text, ocr_status, confidence_avg, converted_image_info, raw_response,
                     embedding, created_at)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
                "#,
            )
            .bind(record.file_id.as_uuid())
            .bind(record.work_room_id.as_uuid())
            .bind(record.storage_key.as_str())
            .bind(&record.bucket)
            .bind(&record.file_name)
            .bind(page_number)
            .bind(&record.text)
            .bind(record.status.as_str())
            .bind(record.average_confidence)
            .bind(record.converted_image_info.clone().map(Json))
            .bind(Json(&record.raw_response))
            .bind(record.embedding.clone().map(Vector::from))
            .bind(record.created_at)
            .execute(&mut *tx)
            .await
            .map_err(query_error)?;
        }

        tx.commit().await.map_err(query_error)?;
        Ok(())
    }

    #[instrument(skip(self), fields(file_id = %file_id))]
    async fn mark_text_extracted(&self, file_id: FileId) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r#"
            UPDATE files
            SET is_text_extracted = true, updated_at = now()
            WHERE id = $1
            "#,
        )
        .bind(file_id.as_uuid())
        .execute(&self.pool)
        .await
        .map_err(query_error)?;

        if result.rows_affected() == 0 {
            tracing::warn!("No file row matched, completion flag not stored");
        }
        Ok(())
    }
}

/// `docx_text` and `hwp_text` share one column layout.
fn text_insert_sql(format: DocumentFormat) -> &'static str {
    match format {
        DocumentFormat::Hwp => {
            r#"
            INSERT INTO hwp_text
                (file_table_id, work_room_id, storage_key, text_index, text_type, text_content, embedding, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#
        }
        _ => {
            r#"
            INSERT INTO docx_text
                (file_table_id, work_room_id, storage_key, text_index, text_type, text_content, embedding, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#
        }
    }
}
