use std::error::Error as StdError;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::application::ports::{OcrError, RepositoryError};
use crate::application::services::{ExtractionError, FriendshipError};
use crate::infrastructure::observability::sanitize_for_log;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
}

/// Every failure an edge handler can report, with its HTTP mapping.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    Configuration(String),
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    NotFound(String),
    #[error("Method Not Allowed")]
    MethodNotAllowed,
    #[error("{message}: {details}")]
    Upstream { message: String, details: String },
    /// Answers with the upstream status instead of 500.
    #[error("{message} ({status})")]
    UpstreamStatus { status: u16, message: String },
    #[error("{message}: {details}")]
    Unexpected { message: String, details: String },
}

impl ApiError {
    pub fn upstream(message: impl Into<String>, source: &dyn StdError) -> Self {
        ApiError::Upstream {
            message: message.into(),
            details: source.to_string(),
        }
    }

    pub fn unexpected(source: &dyn StdError) -> Self {
        ApiError::Unexpected {
            message: source.to_string(),
            details: source_chain(source),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::UpstreamStatus { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            ApiError::Configuration(_) | ApiError::Upstream { .. } | ApiError::Unexpected { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

/// Every error in the `source()` chain, outermost first.
fn source_chain(error: &dyn StdError) -> String {
    let mut chain = vec![error.to_string()];
    let mut current = error.source();
    while let Some(source) = current {
        chain.push(source.to_string());
        current = source.source();
    }
    chain.join("\ncaused by: ")
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match self {
            ApiError::Configuration(error) | ApiError::Validation(error) | ApiError::NotFound(error) => {
                ErrorResponse {
                    error,
                    details: None,
                    status: None,
                }
            }
            ApiError::MethodNotAllowed => ErrorResponse {
                error: "Method Not Allowed".to_string(),
                details: None,
                status: None,
            },
            ApiError::Upstream { message, details } | ApiError::Unexpected { message, details } => {
                tracing::error!(error = %message, details = %sanitize_for_log(&details), "Request failed");
                ErrorResponse {
                    error: message,
                    details: Some(details),
                    status: None,
                }
            }
            ApiError::UpstreamStatus {
                status: upstream,
                message,
            } => ErrorResponse {
                error: message,
                details: None,
                status: Some(upstream),
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<RepositoryError> for ApiError {
    fn from(error: RepositoryError) -> Self {
        let details = match &error {
            RepositoryError::ConnectionFailed(d)
            | RepositoryError::QueryFailed(d)
            | RepositoryError::ConstraintViolation(d) => d.clone(),
        };
        ApiError::Upstream {
            message: error.to_string(),
            details,
        }
    }
}

impl From<ExtractionError> for ApiError {
    fn from(error: ExtractionError) -> Self {
        match error {
            ExtractionError::Configuration(reason) => ApiError::Configuration(reason),
            ExtractionError::Retrieval(source) => ApiError::upstream(source.to_string(), &source),
            ExtractionError::Ocr(source) => ApiError::upstream("OCR processing failed", &source),
            ExtractionError::Persistence(source) => source.into(),
            error @ ExtractionError::Embedding { .. } => {
                ApiError::upstream("Failed to generate embedding", &error)
            }
            error => ApiError::unexpected(&error),
        }
    }
}

impl From<FriendshipError> for ApiError {
    fn from(error: FriendshipError) -> Self {
        match error {
            FriendshipError::Repository(source) => source.into(),
            FriendshipError::RequesterNotFound => ApiError::Unexpected {
                message: FriendshipError::RequesterNotFound.to_string(),
                details: "requester has no username".to_string(),
            },
            FriendshipError::RequestNotFound => {
                ApiError::NotFound(FriendshipError::RequestNotFound.to_string())
            }
            FriendshipError::Email(source) => ApiError::upstream(source.to_string(), &source),
        }
    }
}

impl From<OcrError> for ApiError {
    fn from(error: OcrError) -> Self {
        match error {
            OcrError::UpstreamStatus { status, .. } => ApiError::UpstreamStatus {
                status,
                message: "OCR API request failed".to_string(),
            },
            other => ApiError::upstream("OCR API request failed", &other),
        }
    }
}
