//! Webhook endpoint handler.
//!
//! Accepts GitHub webhook deliveries already unwrapped into canonical HTTP
//! requests, validates the delivery signature, and hands `pull_request`
//! payloads to the dispatcher. Every other event type is acknowledged
//! without side effects.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::{debug, warn};

use crate::types::DeliveryId;
use crate::webhooks::{DispatchError, PULL_REQUEST_EVENT};

use super::AppState;

/// Header name for GitHub event type.
const HEADER_EVENT: &str = "x-github-event";
/// Header name for GitHub delivery ID.
const HEADER_DELIVERY: &str = "x-github-delivery";
/// Header name for GitHub signature.
const HEADER_SIGNATURE: &str = "x-hub-signature-256";

/// Errors that can occur when processing a webhook delivery.
#[derive(Debug, Error)]
pub enum WebhookError {
    /// Missing required header.
    #[error("missing required header: {0}")]
    MissingHeader(&'static str),

    /// Invalid signature.
    #[error("invalid signature")]
    InvalidSignature,

    /// The dispatcher rejected or failed the delivery.
    #[error(transparent)]
    Dispatch(#[from] DispatchError),
}

impl IntoResponse for WebhookError {
    fn into_response(self) -> Response {
        let status = match &self {
            WebhookError::MissingHeader(_) => StatusCode::BAD_REQUEST,
            WebhookError::InvalidSignature => StatusCode::UNAUTHORIZED,
            WebhookError::Dispatch(DispatchError::MalformedPayload(_)) => StatusCode::BAD_REQUEST,
            WebhookError::Dispatch(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, self.to_string()).into_response()
    }
}

/// Webhook handler.
///
/// # Request
///
/// - Method: POST
/// - Required headers:
///   - `X-GitHub-Event`: event type (e.g., "pull_request")
///   - `X-GitHub-Delivery`: unique delivery ID
///   - `X-Hub-Signature-256`: HMAC-SHA256 signature of the payload
/// - Body: JSON webhook payload
///
/// # Response
///
/// - 200 OK: delivery handled (or acknowledged as an ignored event type)
/// - 400 Bad Request: missing header or malformed payload
/// - 401 Unauthorized: invalid signature
/// - 500 Internal Server Error: client creation or comment post failed
pub async fn webhook_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<(StatusCode, &'static str), WebhookError> {
    let event_type = get_header(&headers, HEADER_EVENT)?;
    let delivery = DeliveryId::new(get_header(&headers, HEADER_DELIVERY)?);
    let signature = get_header(&headers, HEADER_SIGNATURE)?;

    debug!(%delivery, event_type = %event_type, "received webhook");

    // Signature check comes before any payload parsing.
    if !state.secret().verify(&body, &signature) {
        warn!(%delivery, "invalid webhook signature");
        return Err(WebhookError::InvalidSignature);
    }

    if event_type != PULL_REQUEST_EVENT {
        debug!(%delivery, event_type = %event_type, "ignoring event type");
        return Ok((StatusCode::OK, "ignored"));
    }

    state
        .dispatcher()
        .handle(&event_type, &delivery, &body)
        .await?;

    Ok((StatusCode::OK, "ok"))
}

/// Extracts a required header value as a string.
fn get_header(headers: &HeaderMap, name: &'static str) -> Result<String, WebhookError> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned)
        .ok_or(WebhookError::MissingHeader(name))
}
