use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::application::services::OcrIngestionSummary;
use crate::domain::ExtractionRequest;
use crate::presentation::edge::{ApiError, EdgeHandler, present};
use crate::presentation::state::AppState;

use super::extract_text::extraction_request;

#[derive(Debug, Default, Deserialize)]
pub struct PdfOcrRequest {
    pub file_table_id: Option<String>,
    pub work_room_id: Option<String>,
    pub storage_key: Option<String>,
    pub bucket_name: Option<String>,
    pub file_name: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PdfOcrResponse {
    pub message: String,
    #[serde(flatten)]
    pub summary: OcrIngestionSummary,
}

pub struct PdfOcrFileChunk;

#[async_trait]
impl EdgeHandler for PdfOcrFileChunk {
    const NAME: &'static str = "pdf_ocr_file_chunk_kr_naver_clova";

    type Request = PdfOcrRequest;
    type Input = (ExtractionRequest, Option<String>);
    type Output = PdfOcrResponse;

    fn validate(request: PdfOcrRequest) -> Result<Self::Input, ApiError> {
        let extraction =
            extraction_request(request.file_table_id, request.work_room_id, request.storage_key)?
                .with_file_name(request.file_name);
        Ok((extraction, present(request.bucket_name)))
    }

    async fn handle(state: &AppState, input: Self::Input) -> Result<PdfOcrResponse, ApiError> {
        let (request, bucket) = input;
        let ocr = state.ocr_ingestion()?;
        let request = request.with_bucket(bucket.unwrap_or_else(|| state.default_bucket.clone()));

        let summary = ocr.ingest(&request).await?;
        Ok(PdfOcrResponse {
            message: "OCR processing started".to_string(),
            summary,
        })
    }
}
