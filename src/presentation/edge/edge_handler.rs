use std::collections::HashMap;

use async_trait::async_trait;
use axum::body::to_bytes;
use axum::extract::{Form, FromRequest, Multipart, Query, Request, State};
use axum::http::{Method, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::any;
use axum::{Json, Router};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::Instrument;

use crate::domain::RequestPhase;
use crate::presentation::state::AppState;

use super::ApiError;

const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// One edge function: body shape, validation, and the work itself.
#[async_trait]
pub trait EdgeHandler: Send + Sync + 'static {
    /// Route segment under `/functions/v1/`.
    const NAME: &'static str;
    /// Also accept multipart and url-encoded form bodies.
    const ACCEPTS_FORM: bool = false;
    /// Also accept GET, reading the request from the query string.
    const ACCEPTS_QUERY: bool = false;

    type Request: DeserializeOwned + Send;
    type Input: Send;
    type Output: Serialize + Send;

    fn validate(request: Self::Request) -> Result<Self::Input, ApiError>;

    async fn handle(state: &AppState, input: Self::Input) -> Result<Self::Output, ApiError>;
}

/// Mounts `H` at `/functions/v1/{H::NAME}` for every method.
pub fn edge_route<H: EdgeHandler>(router: Router<AppState>) -> Router<AppState> {
    router.route(&format!("/functions/v1/{}", H::NAME), any(serve_edge::<H>))
}

pub async fn serve_edge<H: EdgeHandler>(
    State(state): State<AppState>,
    request: Request,
) -> Response {
    let span = tracing::info_span!("edge_function", handler = H::NAME);
    run::<H>(state, request).instrument(span).await
}

async fn run<H: EdgeHandler>(state: AppState, request: Request) -> Response {
    let mut phase = RequestPhase::Received;
    tracing::debug!(phase = %phase, method = %request.method());

    let result = async {
        let body = if H::ACCEPTS_QUERY && request.method() == Method::GET {
            read_query::<H>(&request)?
        } else if request.method() == Method::POST {
            read_body::<H>(request, &state).await?
        } else {
            return Err(ApiError::MethodNotAllowed);
        };
        let input = H::validate(body)?;
        phase = RequestPhase::Validated;
        tracing::debug!(phase = %phase);

        phase = RequestPhase::Processing;
        tracing::debug!(phase = %phase);
        H::handle(&state, input).await
    }
    .await;

    match result {
        Ok(output) => {
            tracing::info!(phase = %RequestPhase::Completed, "Edge function completed");
            (StatusCode::OK, Json(output)).into_response()
        }
        Err(error) => {
            let status = error.status_code();
            if status.is_server_error() {
                tracing::error!(phase = %RequestPhase::Failed, failed_at = %phase, status = status.as_u16(), error = %error, "Edge function failed");
            } else {
                tracing::warn!(phase = %RequestPhase::Failed, failed_at = %phase, status = status.as_u16(), error = %error, "Edge function rejected request");
            }
            error.into_response()
        }
    }
}

async fn read_body<H: EdgeHandler>(
    request: Request,
    state: &AppState,
) -> Result<H::Request, ApiError> {
    let content_type = request
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_ascii_lowercase();

    if H::ACCEPTS_FORM && content_type.starts_with("multipart/form-data") {
        let multipart = Multipart::from_request(request, state)
            .await
            .map_err(|e| ApiError::Validation(format!("Invalid form body: {}", e)))?;
        return from_fields(multipart_fields(multipart).await?);
    }

    if H::ACCEPTS_FORM && content_type.starts_with("application/x-www-form-urlencoded") {
        let Form(fields) = Form::<HashMap<String, String>>::from_request(request, state)
            .await
            .map_err(|e| ApiError::Validation(format!("Invalid form body: {}", e)))?;
        return from_fields(
            fields
                .into_iter()
                .map(|(name, value)| (name, Value::String(value)))
                .collect(),
        );
    }

    let bytes = to_bytes(request.into_body(), MAX_BODY_BYTES)
        .await
        .map_err(|e| ApiError::Validation(format!("Failed to read body: {}", e)))?;

    let value = if bytes.iter().all(u8::is_ascii_whitespace) {
        Value::Object(Map::new())
    } else {
        serde_json::from_slice(&bytes)
            .map_err(|_| ApiError::Validation("Invalid JSON body".to_string()))?
    };

    serde_json::from_value(value)
        .map_err(|e| ApiError::Validation(format!("Invalid request body: {}", e)))
}

fn read_query<H: EdgeHandler>(request: &Request) -> Result<H::Request, ApiError> {
    let Query(fields) = Query::<HashMap<String, String>>::try_from_uri(request.uri())
        .map_err(|e| ApiError::Validation(format!("Invalid query string: {}", e)))?;
    from_fields(
        fields
            .into_iter()
            .map(|(name, value)| (name, Value::String(value)))
            .collect(),
    )
}

/// Text fields only; file parts are skipped.
async fn multipart_fields(mut multipart: Multipart) -> Result<Map<String, Value>, ApiError> {
    let mut fields = Map::new();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::Validation(format!("Invalid form body: {}", e)))?
    {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };
        if field.file_name().is_some() {
            continue;
        }
        let text = field
            .text()
            .await
            .map_err(|e| ApiError::Validation(format!("Invalid form field {}: {}", name, e)))?;
        fields.insert(name, Value::String(text));
    }
    Ok(fields)
}

fn from_fields<T: DeserializeOwned>(fields: Map<String, Value>) -> Result<T, ApiError> {
    serde_json::from_value(Value::Object(fields))
        .map_err(|e| ApiError::Validation(format!("Invalid request body: {}", e)))
}
