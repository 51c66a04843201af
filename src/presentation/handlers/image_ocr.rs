use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

use crate::presentation::edge::{ApiError, EdgeHandler, present};
use crate::presentation::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct ImageOcrRequest {
    /// Base64-encoded PNG.
    pub image: Option<String>,
}

/// Forwards one image to the OCR service and relays its answer.
pub struct ImageOcr;

#[async_trait]
impl EdgeHandler for ImageOcr {
    const NAME: &'static str = "ocr_kr_naver_clova";

    type Request = ImageOcrRequest;
    type Input = String;
    type Output = Value;

    fn validate(request: ImageOcrRequest) -> Result<String, ApiError> {
        present(request.image).ok_or_else(|| ApiError::Validation("No image provided".to_string()))
    }

    async fn handle(state: &AppState, image: String) -> Result<Value, ApiError> {
        let client = state.ocr_client()?;
        Ok(client.recognize_image(&image).await?)
    }
}
