use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::presentation::edge::{ApiError, EdgeHandler};
use crate::presentation::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct EmbeddingRequest {
    pub text: Option<Value>,
}

#[derive(Debug, Serialize)]
pub struct EmbeddingResponse {
    pub embedding: Vec<f32>,
}

pub struct OpenAiEmbedding;

#[async_trait]
impl EdgeHandler for OpenAiEmbedding {
    const NAME: &'static str = "get_embedding_from_openai";

    type Request = EmbeddingRequest;
    type Input = String;
    type Output = EmbeddingResponse;

    fn validate(request: EmbeddingRequest) -> Result<String, ApiError> {
        match request.text {
            Some(Value::String(text)) if !text.trim().is_empty() => Ok(text),
            _ => Err(ApiError::Validation(
                "Missing or invalid 'text' parameter".to_string(),
            )),
        }
    }

    async fn handle(state: &AppState, text: String) -> Result<EmbeddingResponse, ApiError> {
        let embedder = state.openai_embedder()?;
        let embedding = embedder
            .embed(&text)
            .await
            .map_err(|e| ApiError::upstream("Failed to generate embedding", &e))?;

        Ok(EmbeddingResponse {
            embedding: embedding.values,
        })
    }
}
