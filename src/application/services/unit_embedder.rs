use std::sync::Arc;

use crate::application::ports::Embedder;
use crate::domain::Embedding;

use super::ExtractionError;

/// Whether, and with what, extracted units are embedded before persisting.
#[derive(Clone)]
pub enum EmbeddingMode {
    Disabled,
    Enabled(Arc<dyn Embedder>),
    /// Embeddings were requested but the provider could not be configured.
    Unavailable(String),
}

impl EmbeddingMode {
    pub fn is_enabled(&self) -> bool {
        !matches!(self, EmbeddingMode::Disabled)
    }
}

/// Embeds `texts` one at a time, in order.
///
/// Every text is sent, empty ones included. The first failure aborts and
/// carries the position of the offending text.
pub async fn embed_in_order(
    mode: &EmbeddingMode,
    texts: &[&str],
) -> Result<Vec<Option<Embedding>>, ExtractionError> {
    let embedder = match mode {
        EmbeddingMode::Disabled => return Ok(vec![None; texts.len()]),
        EmbeddingMode::Unavailable(reason) => {
            return Err(ExtractionError::Configuration(reason.clone()));
        }
        EmbeddingMode::Enabled(embedder) => embedder,
    };

    let mut embeddings = Vec::with_capacity(texts.len());
    for (position, text) in texts.iter().enumerate() {
        let embedding = embedder
            .embed(text)
            .await
            .map_err(|source| ExtractionError::Embedding { position, source })?;
        embeddings.push(Some(embedding));
    }

    tracing::debug!(count = embeddings.len(), "Units embedded");
    Ok(embeddings)
}
