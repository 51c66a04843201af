use async_trait::async_trait;

use crate::domain::{DocumentFormat, FileId, OcrPageRecord, TextRecord};

use super::RepositoryError;

#[async_trait]
pub trait ExtractionRepository: Send + Sync {
    /// Inserts every record or none of them.
    async fn insert_text_records(
        &self,
        format: DocumentFormat,
        records: &[TextRecord],
    ) -> Result<(), RepositoryError>;

    /// Inserts every record or none of them.
    async fn insert_ocr_records(&self, records: &[OcrPageRecord]) -> Result<(), RepositoryError>;

    async fn mark_text_extracted(&self, file_id: FileId) -> Result<(), RepositoryError>;
}
