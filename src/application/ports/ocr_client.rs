use async_trait::async_trait;
use serde_json::Value;

use crate::domain::{OcrPageResult, PdfChunk};

#[async_trait]
pub trait OcrClient: Send + Sync {
    /// Returns one result per page of the chunk, in page order.
    async fn recognize_pdf(&self, chunk: &PdfChunk) -> Result<Vec<OcrPageResult>, OcrError>;

    /// Sends a base64 PNG and returns the service response unchanged.
    async fn recognize_image(&self, image_base64: &str) -> Result<Value, OcrError>;
}

#[derive(Debug, thiserror::Error)]
pub enum OcrError {
    #[error("ocr api request failed: {0}")]
    ApiRequestFailed(String),
    #[error("ocr service returned {status}: {body}")]
    UpstreamStatus { status: u16, body: String },
    #[error("invalid ocr response: {0}")]
    InvalidResponse(String),
}
