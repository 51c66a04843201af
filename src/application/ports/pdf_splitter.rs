use crate::domain::{ChunkLimits, PdfChunk};

pub trait PdfSplitter: Send + Sync {
    fn split(&self, data: &[u8], limits: ChunkLimits) -> Result<Vec<PdfChunk>, SplitError>;
}

#[derive(Debug, thiserror::Error)]
pub enum SplitError {
    #[error("invalid pdf: {0}")]
    InvalidPdf(String),
    #[error("failed to serialize pages {start}..{end}: {reason}")]
    Serialization {
        start: usize,
        end: usize,
        reason: String,
    },
    #[error("page {page} alone is {size} bytes, above the {limit} byte chunk limit")]
    ChunkTooLarge {
        page: usize,
        size: usize,
        limit: usize,
    },
}
