use async_trait::async_trait;

use crate::domain::StorageKey;

#[async_trait]
pub trait ObjectFetcher: Send + Sync {
    async fn fetch(&self, bucket: &str, key: &StorageKey) -> Result<Vec<u8>, FetchError>;
}

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("storage request failed: {0}")]
    RequestFailed(String),
    #[error("failed to download file: {status_text}")]
    UpstreamStatus { status: u16, status_text: String },
}
