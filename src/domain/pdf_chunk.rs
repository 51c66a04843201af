pub const DEFAULT_MAX_CHUNK_BYTES: usize = 50 * 1024 * 1024;
pub const DEFAULT_MAX_PAGES_PER_CHUNK: usize = 10;

/// A page-contiguous sub-document of a PDF, ready to be sent for OCR.
#[derive(Debug, Clone, PartialEq)]
pub struct PdfChunk {
    pub payload: Vec<u8>,
    /// Zero-based index of the first page in the source document.
    pub start_page: usize,
    pub page_count: usize,
}

impl PdfChunk {
    pub fn end_page(&self) -> usize {
        self.start_page + self.page_count
    }

    pub fn size(&self) -> usize {
        self.payload.len()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkLimits {
    pub max_bytes: usize,
    pub max_pages: usize,
}

impl ChunkLimits {
    pub fn new(max_bytes: usize, max_pages: usize) -> Self {
        Self {
            max_bytes,
            max_pages: max_pages.max(1),
        }
    }
}

impl Default for ChunkLimits {
    fn default() -> Self {
        Self {
            max_bytes: DEFAULT_MAX_CHUNK_BYTES,
            max_pages: DEFAULT_MAX_PAGES_PER_CHUNK,
        }
    }
}
