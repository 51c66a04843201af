use std::sync::Arc;

use crate::application::ports::{
    AnnotationRepository, ChatMessageRepository, Embedder, FileRepository, OcrClient,
};
use crate::application::services::{FriendshipService, OcrIngestionService, TextExtractionService};

use crate::presentation::edge::ApiError;

/// Collaborators shared by every edge handler.
///
/// Optional collaborators are absent when their configuration is missing;
/// the affected handlers answer 500 instead of the process refusing to start.
#[derive(Clone)]
pub struct AppState {
    pub text_extraction: Arc<TextExtractionService>,
    pub ocr_ingestion: Option<Arc<OcrIngestionService>>,
    pub ocr_client: Option<Arc<dyn OcrClient>>,
    pub openai_embedder: Option<Arc<dyn Embedder>>,
    pub files: Arc<dyn FileRepository>,
    pub chat_messages: Arc<dyn ChatMessageRepository>,
    pub annotations: Arc<dyn AnnotationRepository>,
    pub friendships: Arc<FriendshipService>,
    pub default_bucket: String,
}

impl AppState {
    pub fn ocr_ingestion(&self) -> Result<&OcrIngestionService, ApiError> {
        self.ocr_ingestion
            .as_deref()
            .ok_or_else(|| ApiError::Configuration(OCR_NOT_CONFIGURED.to_string()))
    }

    pub fn ocr_client(&self) -> Result<&dyn OcrClient, ApiError> {
        self.ocr_client
            .as_deref()
            .ok_or_else(|| ApiError::Configuration(OCR_NOT_CONFIGURED.to_string()))
    }

    pub fn openai_embedder(&self) -> Result<&dyn Embedder, ApiError> {
        self.openai_embedder.as_deref().ok_or_else(|| {
            ApiError::Configuration("Missing OpenAI API key in environment variables".to_string())
        })
    }
}

const OCR_NOT_CONFIGURED: &str = "Missing OCR API configuration (invoke URL or secret key)";
