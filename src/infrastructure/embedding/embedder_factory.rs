use std::sync::Arc;

use crate::application::ports::Embedder;
use crate::presentation::config::{EmbeddingProvider, EmbeddingsSettings};

use super::{FunctionEmbedder, OpenAiEmbedder};

pub struct EmbedderFactory;

#[derive(Debug, thiserror::Error)]
pub enum EmbedderFactoryError {
    #[error("missing API key: OpenAI embedder requires embeddings.openai_api_key")]
    MissingApiKey,
    #[error("missing embedding function URL: embeddings.function_url is not set")]
    MissingFunctionUrl,
}

impl EmbedderFactory {
    /// `bearer_token` authenticates calls to the embedding function.
    pub fn create(
        settings: &EmbeddingsSettings,
        bearer_token: &str,
    ) -> Result<Arc<dyn Embedder>, EmbedderFactoryError> {
        match settings.provider {
            EmbeddingProvider::Function => {
                let url = non_blank(settings.function_url.as_deref())
                    .ok_or(EmbedderFactoryError::MissingFunctionUrl)?;
                tracing::info!(url = %url, "Using embedding function");
                Ok(Arc::new(FunctionEmbedder::new(url, bearer_token)))
            }
            EmbeddingProvider::OpenAi => {
                let embedder: Arc<dyn Embedder> = Self::create_openai(settings)?;
                Ok(embedder)
            }
        }
    }

    pub fn create_openai(
        settings: &EmbeddingsSettings,
    ) -> Result<Arc<OpenAiEmbedder>, EmbedderFactoryError> {
        let key = non_blank(settings.openai_api_key.as_deref())
            .ok_or(EmbedderFactoryError::MissingApiKey)?;
        tracing::info!(model = %settings.model, "Using OpenAI embedding model");
        Ok(Arc::new(OpenAiEmbedder::with_base_url(
            &settings.openai_base_url,
            key.to_string(),
            settings.model.clone(),
        )))
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
