use crate::domain::{DocumentFormat, TextUnit};

/// Decodes one office container format into ordered text units.
///
/// Parsing is CPU-bound and synchronous; callers run it off the async runtime.
pub trait DocumentParser: Send + Sync {
    fn format(&self) -> DocumentFormat;

    fn parse(&self, data: &[u8]) -> Result<Vec<TextUnit>, ParseError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("invalid container: {0}")]
    InvalidContainer(String),
    #[error("missing part: {0}")]
    MissingPart(String),
    #[error("malformed xml: {0}")]
    MalformedXml(String),
    #[error("malformed record: {0}")]
    MalformedRecord(String),
    #[error("unsupported document: {0}")]
    Unsupported(String),
}
