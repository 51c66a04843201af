use async_trait::async_trait;
use reqwest::Client;
use tracing::instrument;

use crate::application::ports::{EmailDispatcher, EmailError};
use crate::domain::FriendRequestEmail;

const SEND_FRIEND_REQUEST_EMAIL: &str = "functions/v1/send_friend_request_email";

/// Delegates delivery to the deployed email-sending function.
pub struct HttpEmailDispatcher {
    client: Client,
    base_url: String,
    service_key: String,
}

impl HttpEmailDispatcher {
    pub fn new(base_url: &str, service_key: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            service_key: service_key.to_string(),
        }
    }
}

#[async_trait]
impl EmailDispatcher for HttpEmailDispatcher {
    #[instrument(skip(self, email), fields(email_type = ?email.email_type))]
    async fn send_friend_request_email(
        &self,
        email: &FriendRequestEmail,
    ) -> Result<(), EmailError> {
        let response = self
            .client
            .post(format!("{}/{}", self.base_url, SEND_FRIEND_REQUEST_EMAIL))
            .bearer_auth(&self.service_key)
            .json(email)
            .send()
            .await
            .map_err(|e| EmailError::RequestFailed(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = %status, "Email function rejected the request");
            return Err(EmailError::Rejected(body));
        }

        Ok(())
    }
}
