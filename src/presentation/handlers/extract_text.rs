use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::application::services::TextExtractionSummary;
use crate::domain::{DocumentFormat, ExtractionRequest, StorageKey};
use crate::presentation::edge::{ApiError, EdgeHandler, parse_id, present};
use crate::presentation::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct ExtractTextRequest {
    pub file_table_id: Option<String>,
    pub work_room_id: Option<String>,
    pub storage_key: Option<String>,
    pub file_name: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ExtractTextResponse {
    pub message: String,
    #[serde(flatten)]
    pub summary: TextExtractionSummary,
}

/// Shared validation for the file-extraction handlers.
pub(super) fn extraction_request(
    file_table_id: Option<String>,
    work_room_id: Option<String>,
    storage_key: Option<String>,
) -> Result<ExtractionRequest, ApiError> {
    let (Some(file_table_id), Some(work_room_id), Some(storage_key)) = (
        present(file_table_id),
        present(work_room_id),
        present(storage_key),
    ) else {
        return Err(ApiError::Validation(
            "Missing required parameters".to_string(),
        ));
    };

    let storage_key = StorageKey::parse(storage_key).map_err(ApiError::Validation)?;
    Ok(ExtractionRequest::new(
        parse_id("file_table_id", &file_table_id)?,
        parse_id("work_room_id", &work_room_id)?,
        storage_key,
    ))
}

async fn extract(
    state: &AppState,
    format: DocumentFormat,
    request: ExtractionRequest,
) -> Result<ExtractTextResponse, ApiError> {
    let request = request.with_bucket(state.default_bucket.clone());
    let summary = state.text_extraction.extract(format, &request).await?;

    Ok(ExtractTextResponse {
        message: format!(
            "{} text extraction and embedding started",
            format.as_str().to_uppercase()
        ),
        summary,
    })
}

macro_rules! text_extraction_handler {
    ($handler:ident, $name:literal, $format:expr) => {
        pub struct $handler;

        #[async_trait]
        impl EdgeHandler for $handler {
            const NAME: &'static str = $name;

            type Request = ExtractTextRequest;
            type Input = ExtractionRequest;
            type Output = ExtractTextResponse;

            fn validate(request: ExtractTextRequest) -> Result<ExtractionRequest, ApiError> {
                extraction_request(
                    request.file_table_id,
                    request.work_room_id,
                    request.storage_key,
                )
                .map(|r| r.with_file_name(request.file_name))
            }

            async fn handle(
                state: &AppState,
                input: ExtractionRequest,
            ) -> Result<ExtractTextResponse, ApiError> {
                extract(state, $format, input).await
            }
        }
    };
}

text_extraction_handler!(ExtractDocxText, "extract_docx_text", DocumentFormat::Docx);
text_extraction_handler!(ExtractHwpText, "extract_hwp_text", DocumentFormat::Hwp);
text_extraction_handler!(ExtractPptxText, "extract_pptx_text", DocumentFormat::Pptx);
