use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use tracing::instrument;

use crate::application::ports::{DocumentParser, ObjectFetcher};
use crate::domain::{DocumentFormat, Embedding, ExtractionRequest, TextRecord, TextUnit};

use super::{EmbeddingMode, ExtractionError, ExtractionWriter, embed_in_order};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextExtractionSummary {
    pub format: String,
    pub units: usize,
    pub embedded: bool,
}

/// Download, parse, optionally embed, then persist a DOCX/HWP/PPTX file.
pub struct TextExtractionService {
    fetcher: Arc<dyn ObjectFetcher>,
    parsers: HashMap<DocumentFormat, Arc<dyn DocumentParser>>,
    embedding: EmbeddingMode,
    writer: ExtractionWriter,
}

impl TextExtractionService {
    pub fn new(
        fetcher: Arc<dyn ObjectFetcher>,
        parsers: Vec<Arc<dyn DocumentParser>>,
        embedding: EmbeddingMode,
        writer: ExtractionWriter,
    ) -> Self {
        let parsers = parsers
            .into_iter()
            .map(|parser| (parser.format(), parser))
            .collect();
        Self {
            fetcher,
            parsers,
            embedding,
            writer,
        }
    }

    #[instrument(skip(self, request), fields(
        format = %format,
        file_id = %request.file_id,
        storage_key = %request.storage_key
    ))]
    pub async fn extract(
        &self,
        format: DocumentFormat,
        request: &ExtractionRequest,
    ) -> Result<TextExtractionSummary, ExtractionError> {
        let parser = self.parsers.get(&format).cloned().ok_or_else(|| {
            ExtractionError::Configuration(format!("no parser registered for {}", format))
        })?;

        let data = self
            .fetcher
            .fetch(&request.bucket, &request.storage_key)
            .await?;
        tracing::debug!(bytes = data.len(), "File downloaded");

        let units = tokio::task::spawn_blocking(move || parser.parse(&data))
            .await
            .map_err(|e| ExtractionError::Worker(e.to_string()))??;
        tracing::info!(units = units.len(), "Document parsed");

        let texts: Vec<&str> = units.iter().map(|u| u.text.as_str()).collect();
        let embeddings = embed_in_order(&self.embedding, &texts).await?;

        let records = build_records(request, units, embeddings);
        let unit_count = records.len();
        self.writer
            .write_text(format, request.file_id, &records)
            .await?;

        Ok(TextExtractionSummary {
            format: format.to_string(),
            units: unit_count,
            embedded: self.embedding.is_enabled(),
        })
    }
}

fn build_records(
    request: &ExtractionRequest,
    units: Vec<TextUnit>,
    embeddings: Vec<Option<Embedding>>,
) -> Vec<TextRecord> {
    let created_at = Utc::now();
    units
        .into_iter()
        .zip(embeddings)
        .map(|(unit, embedding)| TextRecord {
            file_id: request.file_id,
            work_room_id: request.work_room_id,
            storage_key: request.storage_key.clone(),
            position: unit.ordinal,
            unit_type: unit.unit_type,
            text: unit.text,
            embedding,
            created_at,
        })
        .collect()
}
