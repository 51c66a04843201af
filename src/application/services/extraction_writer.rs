use std::sync::Arc;

use tracing::instrument;

use crate::application::ports::ExtractionRepository;
use crate::domain::{DocumentFormat, FileId, OcrPageRecord, TextRecord};

use super::ExtractionError;

/// Persists extraction output and flips `files.is_text_extracted`.
///
/// The flag update only runs after the insert has succeeded.
pub struct ExtractionWriter {
    repository: Arc<dyn ExtractionRepository>,
}

impl ExtractionWriter {
    pub fn new(repository: Arc<dyn ExtractionRepository>) -> Self {
        Self { repository }
    }

    #[instrument(skip(self, records), fields(file_id = %file_id, format = %format, rows = records.len()))]
    pub async fn write_text(
        &self,
        format: DocumentFormat,
        file_id: FileId,
        records: &[TextRecord],
    ) -> Result<(), ExtractionError> {
        if !records.is_empty() {
            self.repository.insert_text_records(format, records).await?;
        }
        self.repository.mark_text_extracted(file_id).await?;

        tracing::info!("Extracted text persisted");
        Ok(())
    }

    /// Returns whether the completion flag was set; only an all-SUCCESS run sets it.
    #[instrument(skip(self, records), fields(file_id = %file_id, rows = records.len()))]
    pub async fn write_ocr(
        &self,
        file_id: FileId,
        records: &[OcrPageRecord],
    ) -> Result<bool, ExtractionError> {
        if !records.is_empty() {
            self.repository.insert_ocr_records(records).await?;
        }

        let all_succeeded = records.iter().all(|r| r.status.is_success());
        if all_succeeded {
            self.repository.mark_text_extracted(file_id).await?;
        } else {
            tracing::warn!("Some pages were not recognized, completion flag left unset");
        }

        Ok(all_succeeded)
    }
}
