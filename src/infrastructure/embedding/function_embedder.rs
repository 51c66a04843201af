use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::application::ports::{Embedder, EmbedderError};
use crate::domain::Embedding;

/// Calls a deployed embedding function: `{text}` in, `{embedding}` out.
pub struct FunctionEmbedder {
    client: Client,
    url: String,
    bearer_token: String,
}

#[derive(Serialize)]
struct FunctionRequest<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct FunctionResponse {
    embedding: Vec<f32>,
}

impl FunctionEmbedder {
    pub fn new(url: &str, bearer_token: &str) -> Self {
        Self {
            client: Client::new(),
            url: url.trim().to_string(),
            bearer_token: bearer_token.to_string(),
        }
    }
}

#[async_trait]
impl Embedder for FunctionEmbedder {
    #[instrument(skip(self, text), fields(text_len = text.len()))]
    async fn embed(&self, text: &str) -> Result<Embedding, EmbedderError> {
        let response = self
            .client
            .post(&self.url)
            .bearer_auth(&self.bearer_token)
            .json(&FunctionRequest { text })
            .send()
            .await
            .map_err(|e| EmbedderError::ApiRequestFailed(e.to_string()))?;

        if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(EmbedderError::RateLimited);
        }

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(EmbedderError::ApiRequestFailed(format!(
                "HTTP {}: {}",
                status, body
            )));
        }

        let body: FunctionResponse = response
            .json()
            .await
            .map_err(|e| EmbedderError::InvalidResponse(e.to_string()))?;

        Ok(Embedding::new(body.embedding))
    }
}
