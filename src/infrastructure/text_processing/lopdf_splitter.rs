use lopdf::Document;

use crate::application::ports::{PdfSplitter, SplitError};
use crate::application::services::{PageSource, split_into_chunks};
use crate::domain::{ChunkLimits, PdfChunk};

/// Splits PDFs with `lopdf`, one clone of the source per attempted range.
pub struct LopdfSplitter;

impl PdfSplitter for LopdfSplitter {
    fn split(&self, data: &[u8], limits: ChunkLimits) -> Result<Vec<PdfChunk>, SplitError> {
        let source = LopdfPageSource::load(data)?;
        tracing::info!(pages = source.page_count(), "PDF loaded for splitting");
        split_into_chunks(&source, limits)
    }
}

pub struct LopdfPageSource {
    document: Document,
    page_numbers: Vec<u32>,
}

impl LopdfPageSource {
    pub fn load(data: &[u8]) -> Result<Self, SplitError> {
        let document = Document::load_mem(data)
            .map_err(|e| SplitError::InvalidPdf(format!("Failed to load PDF: {}", e)))?;
        let page_numbers: Vec<u32> = document.get_pages().keys().copied().collect();
        Ok(Self {
            document,
            page_numbers,
        })
    }
}

impl PageSource for LopdfPageSource {
    fn page_count(&self) -> usize {
        self.page_numbers.len()
    }

    fn serialize_range(&self, start: usize, count: usize) -> Result<Vec<u8>, SplitError> {
        let end = start + count;
        let outside: Vec<u32> = self
            .page_numbers
            .iter()
            .enumerate()
            .filter(|(index, _)| *index < start || *index >= end)
            .map(|(_, number)| *number)
            .collect();

        let mut chunk = self.document.clone();
        if !outside.is_empty() {
            chunk.delete_pages(&outside);
            chunk.prune_objects();
        }

        let mut payload = Vec::new();
        chunk
            .save_to(&mut payload)
            .map_err(|e| SplitError::Serialization {
                start: start + 1,
                end,
                reason: e.to_string(),
            })?;
        Ok(payload)
    }
}
