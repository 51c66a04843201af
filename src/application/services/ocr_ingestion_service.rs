use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use tracing::instrument;

use crate::application::ports::{ObjectFetcher, OcrClient, PdfSplitter};
use crate::domain::{ChunkLimits, Embedding, ExtractionRequest, OcrPageRecord, OcrPageResult};

use super::{EmbeddingMode, ExtractionError, ExtractionWriter, embed_in_order};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OcrIngestionSummary {
    pub chunks: usize,
    pub pages: usize,
    pub text_extracted: bool,
}

/// Download a PDF, OCR it chunk by chunk, optionally embed each page, persist.
pub struct OcrIngestionService {
    fetcher: Arc<dyn ObjectFetcher>,
    splitter: Arc<dyn PdfSplitter>,
    ocr_client: Arc<dyn OcrClient>,
    embedding: EmbeddingMode,
    writer: ExtractionWriter,
    limits: ChunkLimits,
}

impl OcrIngestionService {
    pub fn new(
        fetcher: Arc<dyn ObjectFetcher>,
        splitter: Arc<dyn PdfSplitter>,
        ocr_client: Arc<dyn OcrClient>,
        embedding: EmbeddingMode,
        writer: ExtractionWriter,
        limits: ChunkLimits,
    ) -> Self {
        Self {
            fetcher,
            splitter,
            ocr_client,
            embedding,
            writer,
            limits,
        }
    }

    #[instrument(skip(self, request), fields(
        file_id = %request.file_id,
        bucket = %request.bucket,
        storage_key = %request.storage_key
    ))]
    pub async fn ingest(
        &self,
        request: &ExtractionRequest,
    ) -> Result<OcrIngestionSummary, ExtractionError> {
        let data = self
            .fetcher
            .fetch(&request.bucket, &request.storage_key)
            .await?;
        tracing::debug!(bytes = data.len(), "PDF downloaded");

        let splitter = Arc::clone(&self.splitter);
        let limits = self.limits;
        let chunks = tokio::task::spawn_blocking(move || splitter.split(&data, limits))
            .await
            .map_err(|e| ExtractionError::Worker(e.to_string()))??;

        let mut pages: Vec<OcrPageResult> = Vec::new();
        for chunk in &chunks {
            let results = self.ocr_client.recognize_pdf(chunk).await?;
            tracing::info!(
                start_page = chunk.start_page + 1,
                page_count = chunk.page_count,
                recognized = results.len(),
                "Chunk recognized"
            );
            pages.extend(results);
        }

        let texts: Vec<&str> = pages.iter().map(|p| p.text.as_str()).collect();
        let embeddings = embed_in_order(&self.embedding, &texts).await?;

        let records = build_records(request, pages, embeddings);
        let page_count = records.len();
        let text_extracted = self.writer.write_ocr(request.file_id, &records).await?;

        Ok(OcrIngestionSummary {
            chunks: chunks.len(),
            pages: page_count,
            text_extracted,
        })
    }
}

fn build_records(
    request: &ExtractionRequest,
    pages: Vec<OcrPageResult>,
    embeddings: Vec<Option<Embedding>>,
) -> Vec<OcrPageRecord> {
    let created_at = Utc::now();
    let file_name = request.file_name_or_unknown().to_string();
    pages
        .into_iter()
        .zip(embeddings)
        .enumerate()
        .map(|(index, (page, embedding))| OcrPageRecord {
            file_id: request.file_id,
            work_room_id: request.work_room_id,
            storage_key: request.storage_key.clone(),
            bucket: request.bucket.clone(),
            file_name: file_name.clone(),
            page_number: index as u32 + 1,
            text: page.text,
            status: page.status,
            average_confidence: page.average_confidence,
            converted_image_info: page.converted_image_info,
            raw_response: page.raw_response,
            embedding,
            created_at,
        })
        .collect()
}
