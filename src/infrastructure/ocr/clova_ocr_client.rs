use async_trait::async_trait;
use reqwest::{Client, multipart};
use serde::Serialize;
use serde_json::Value;
use tracing::instrument;
use uuid::Uuid;

use crate::application::ports::{OcrClient, OcrError};
use crate::domain::{OcrPageResult, OcrStatus, PdfChunk};
use crate::infrastructure::observability::sanitize_for_log;

const SECRET_HEADER: &str = "X-OCR-SECRET";
const API_VERSION: &str = "V2";

/// Client for the CLOVA general OCR API (V2 message format).
pub struct ClovaOcrClient {
    client: Client,
    invoke_url: String,
    secret_key: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct OcrMessage<'a> {
    version: &'static str,
    request_id: String,
    timestamp: i64,
    images: Vec<OcrImage<'a>>,
}

#[derive(Serialize)]
struct OcrImage<'a> {
    format: &'static str,
    name: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<&'a str>,
}

impl<'a> OcrMessage<'a> {
    fn new(image: OcrImage<'a>) -> Self {
        Self {
            version: API_VERSION,
            request_id: Uuid::new_v4().to_string(),
            timestamp: chrono::Utc::now().timestamp_millis(),
            images: vec![image],
        }
    }
}

impl ClovaOcrClient {
    pub fn new(invoke_url: &str, secret_key: &str) -> Self {
        Self {
            client: Client::new(),
            invoke_url: invoke_url.trim().to_string(),
            secret_key: secret_key.trim().to_string(),
        }
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<Value, OcrError> {
        let response = request
            .header(SECRET_HEADER, &self.secret_key)
            .send()
            .await
            .map_err(|e| OcrError::ApiRequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            tracing::warn!(
                status = status.as_u16(),
                body = %sanitize_for_log(&body),
                "OCR request failed"
            );
            return Err(OcrError::UpstreamStatus {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json()
            .await
            .map_err(|e| OcrError::InvalidResponse(e.to_string()))
    }
}

#[async_trait]
impl OcrClient for ClovaOcrClient {
    #[instrument(skip(self, chunk), fields(
        start_page = chunk.start_page + 1,
        page_count = chunk.page_count,
        bytes = chunk.size()
    ))]
    async fn recognize_pdf(&self, chunk: &PdfChunk) -> Result<Vec<OcrPageResult>, OcrError> {
        let file_part = multipart::Part::bytes(chunk.payload.clone())
            .file_name("document.pdf")
            .mime_str("application/pdf")
            .map_err(|e| OcrError::ApiRequestFailed(format!("mime: {}", e)))?;

        let message = OcrMessage::new(OcrImage {
            format: "pdf",
            name: "document",
            data: None,
        });
        let message_json = serde_json::to_string(&message)
            .map_err(|e| OcrError::ApiRequestFailed(format!("message: {}", e)))?;

        let form = multipart::Form::new()
            .text("message", message_json)
            .part("file", file_part);

        let body = self
            .send(self.client.post(&self.invoke_url).multipart(form))
            .await?;
        let pages = pages_from_response(body)?;

        tracing::info!(pages = pages.len(), "OCR chunk completed");
        Ok(pages)
    }

    #[instrument(skip(self, image_base64), fields(image_len = image_base64.len()))]
    async fn recognize_image(&self, image_base64: &str) -> Result<Value, OcrError> {
        let message = OcrMessage::new(OcrImage {
            format: "png",
            name: "ocr_image",
            data: Some(image_base64),
        });

        self.send(self.client.post(&self.invoke_url).json(&message))
            .await
    }
}

/// Maps each entry of `images` to a page result, keeping the entry as raw response.
fn pages_from_response(body: Value) -> Result<Vec<OcrPageResult>, OcrError> {
    let Value::Object(mut root) = body else {
        return Err(OcrError::InvalidResponse("expected a JSON object".to_string()));
    };
    let Some(Value::Array(images)) = root.remove("images") else {
        return Err(OcrError::InvalidResponse("missing images array".to_string()));
    };

    Ok(images.into_iter().map(page_from_image).collect())
}

fn page_from_image(image: Value) -> OcrPageResult {
    let fields: &[Value] = image
        .get("fields")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();

    let text = fields
        .iter()
        .filter_map(|f| f.get("inferText").and_then(Value::as_str))
        .collect::<Vec<_>>()
        .join("\n");

    let average_confidence = if fields.is_empty() {
        None
    } else {
        let total: f64 = fields
            .iter()
            .map(|f| f.get("inferConfidence").and_then(Value::as_f64).unwrap_or(0.0))
            .sum();
        Some(total / fields.len() as f64)
    };

    let status = OcrStatus::from_infer_result(image.get("inferResult").and_then(Value::as_str));
    let converted_image_info = image
        .get("convertedImageInfo")
        .filter(|v| !v.is_null())
        .cloned();

    OcrPageResult {
        text,
        status,
        average_confidence,
        converted_image_info,
        raw_response: image,
    }
}
