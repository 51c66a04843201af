use crate::application::ports::SplitError;
use crate::domain::{ChunkLimits, PdfChunk};

/// A loaded multi-page document that can serialize any contiguous page range.
pub trait PageSource {
    fn page_count(&self) -> usize;

    /// Serializes pages `[start, start + count)` (zero-based) as a standalone document.
    fn serialize_range(&self, start: usize, count: usize) -> Result<Vec<u8>, SplitError>;
}

/// Greedily packs pages into chunks bounded by `limits`.
///
/// Each chunk starts at the first unconsumed page and tries the page ceiling
/// first, shrinking one page at a time until the serialized size fits. A single
/// page that still exceeds the byte ceiling aborts the whole split.
pub fn split_into_chunks(
    source: &dyn PageSource,
    limits: ChunkLimits,
) -> Result<Vec<PdfChunk>, SplitError> {
    let total_pages = source.page_count();
    let max_pages = limits.max_pages.max(1);
    let mut chunks = Vec::new();
    let mut start = 0;

    while start < total_pages {
        let mut count = max_pages.min(total_pages - start);

        loop {
            let payload = source.serialize_range(start, count)?;
            tracing::debug!(
                start_page = start + 1,
                end_page = start + count,
                size = payload.len(),
                "Chunk attempt"
            );

            if payload.len() <= limits.max_bytes {
                chunks.push(PdfChunk {
                    payload,
                    start_page: start,
                    page_count: count,
                });
                start += count;
                break;
            }

            if count == 1 {
                return Err(SplitError::ChunkTooLarge {
                    page: start + 1,
                    size: payload.len(),
                    limit: limits.max_bytes,
                });
            }
            count -= 1;
        }
    }

    tracing::info!(
        total_pages = total_pages,
        chunks = chunks.len(),
        "PDF split into chunks"
    );

    Ok(chunks)
}
