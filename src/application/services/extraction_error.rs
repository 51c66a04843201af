use crate::application::ports::{
    EmbedderError, FetchError, OcrError, ParseError, RepositoryError, SplitError,
};

#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    #[error("configuration: {0}")]
    Configuration(String),
    #[error("retrieval: {0}")]
    Retrieval(#[from] FetchError),
    #[error("parsing: {0}")]
    Parse(#[from] ParseError),
    #[error("splitting: {0}")]
    Split(#[from] SplitError),
    #[error("ocr: {0}")]
    Ocr(#[from] OcrError),
    #[error("embedding unit {position}: {source}")]
    Embedding {
        position: usize,
        #[source]
        source: EmbedderError,
    },
    #[error("persistence: {0}")]
    Persistence(#[from] RepositoryError),
    #[error("worker: {0}")]
    Worker(String),
}
