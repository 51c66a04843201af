mod extraction_error;
mod extraction_writer;
mod friendship_service;
mod ocr_ingestion_service;
mod pdf_chunker;
mod text_extraction_service;
mod unit_embedder;

pub use extraction_error::ExtractionError;
pub use extraction_writer::ExtractionWriter;
pub use friendship_service::{FriendshipError, FriendshipService};
pub use ocr_ingestion_service::{OcrIngestionService, OcrIngestionSummary};
pub use pdf_chunker::{PageSource, split_into_chunks};
pub use text_extraction_service::{TextExtractionService, TextExtractionSummary};
pub use unit_embedder::{EmbeddingMode, embed_in_order};
