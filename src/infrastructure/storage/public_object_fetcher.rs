use async_trait::async_trait;
use reqwest::Client;
use tracing::instrument;

use crate::application::ports::{FetchError, ObjectFetcher};
use crate::domain::StorageKey;

/// Downloads objects through the storage service's public object endpoint.
pub struct PublicObjectFetcher {
    client: Client,
    base_url: String,
    service_key: String,
}

impl PublicObjectFetcher {
    pub fn new(base_url: &str, service_key: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            service_key: service_key.to_string(),
        }
    }

    fn object_url(&self, bucket: &str, key: &StorageKey) -> String {
        format!("{}/{}", self.base_url, key.public_object_path(bucket))
    }
}

#[async_trait]
impl ObjectFetcher for PublicObjectFetcher {
    #[instrument(skip(self), fields(key = %key))]
    async fn fetch(&self, bucket: &str, key: &StorageKey) -> Result<Vec<u8>, FetchError> {
        let url = self.object_url(bucket, key);
        tracing::debug!(url = %url, "Downloading object");

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.service_key)
            .send()
            .await
            .map_err(|e| FetchError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::UpstreamStatus {
                status: status.as_u16(),
                status_text: status
                    .canonical_reason()
                    .unwrap_or("unknown status")
                    .to_string(),
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| FetchError::RequestFailed(e.to_string()))?;

        Ok(bytes.to_vec())
    }
}
