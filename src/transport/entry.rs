//! Entry point adapter for the serverless invocation contract.
//!
//! One invocation is one synchronous pass: decode the envelope, run the
//! router exactly once, encode the response. Decode failures are
//! invocation-level failures and produce no envelope; once routing begins,
//! application errors surface as whatever HTTP status the handler chose,
//! inside a successfully encoded envelope.

use axum::Router;
use thiserror::Error;
use tower::ServiceExt;
use tracing::{debug, error};

use super::codec::{AlbRequest, AlbResponse, DecodeError, EncodeError, decode_request, encode_response};

/// A failed invocation: the envelope could not be decoded or the response
/// could not be encoded.
#[derive(Debug, Error)]
pub enum EntryError {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Encode(#[from] EncodeError),
}

/// Wraps the router behind the one-event-in, one-envelope-out contract.
#[derive(Clone)]
pub struct LambdaEntry {
    router: Router,
}

impl LambdaEntry {
    /// Takes ownership of the fully built route table. Nothing registers
    /// routes after this point.
    pub fn new(router: Router) -> Self {
        LambdaEntry { router }
    }

    /// Processes one invocation.
    pub async fn invoke(&self, event: AlbRequest) -> Result<AlbResponse, EntryError> {
        debug!(method = %event.http_method, path = %event.path, "invocation received");

        let request = match decode_request(event) {
            Ok(request) => request,
            Err(err) => {
                error!(error = %err, "failed to decode load balancer event");
                return Err(err.into());
            }
        };

        let response = match self.router.clone().oneshot(request).await {
            Ok(response) => response,
            // Router's error type is Infallible.
            Err(infallible) => match infallible {},
        };

        Ok(encode_response(response).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Arc;

    use base64::Engine as _;
    use base64::engine::general_purpose::STANDARD as BASE64;
    use serde_json::json;

    use crate::github::test_support::RecordingCreator;
    use crate::server::{AppState, WEBHOOK_PATH, build_router};
    use crate::webhooks::{PrEventDispatcher, PREVIEW_COMMENT, WebhookSecret};

    const SECRET: &[u8] = b"test-secret";

    fn entry(creator: &RecordingCreator) -> LambdaEntry {
        let state = AppState::new(
            WebhookSecret::new(SECRET.to_vec()),
            PrEventDispatcher::new(Arc::new(creator.clone())),
        );
        LambdaEntry::new(build_router(state))
    }

    fn health_event() -> AlbRequest {
        AlbRequest {
            http_method: "GET".to_string(),
            path: "/health".to_string(),
            headers: HashMap::from([(
                "user-agent".to_string(),
                "ELB-HealthChecker/2.0".to_string(),
            )]),
            is_base64_encoded: false,
            body: String::new(),
        }
    }

    fn webhook_event() -> AlbRequest {
        let payload = json!({
            "action": "opened",
            "number": 10,
            "repository": {
                "name": "bar",
                "owner": { "login": "foo" }
            },
            "installation": { "id": 99 }
        })
        .to_string();
        let signature = WebhookSecret::new(SECRET.to_vec()).sign(payload.as_bytes());

        AlbRequest {
            http_method: "POST".to_string(),
            path: WEBHOOK_PATH.to_string(),
            headers: HashMap::from([
                ("content-type".to_string(), "application/json".to_string()),
                ("x-github-event".to_string(), "pull_request".to_string()),
                ("x-github-delivery".to_string(), "d-1".to_string()),
                ("x-hub-signature-256".to_string(), signature),
            ]),
            // The load balancer base64-encodes webhook bodies.
            is_base64_encoded: true,
            body: BASE64.encode(payload.as_bytes()),
        }
    }

    #[tokio::test]
    async fn health_invocation_round_trips() {
        let creator = RecordingCreator::default();

        let response = entry(&creator).invoke(health_event()).await.unwrap();

        assert_eq!(response.status_code, 200);
        assert_eq!(response.status_description, "200 OK");
        assert_eq!(response.body, r#"{"status": "OK"}"#);
        assert_eq!(
            response.headers.get("Content-Type").unwrap(),
            "application/json"
        );
        assert!(!response.is_base64_encoded);
    }

    #[tokio::test]
    async fn webhook_invocation_decodes_base64_and_posts_comment() {
        let creator = RecordingCreator::default();

        let response = entry(&creator).invoke(webhook_event()).await.unwrap();

        assert_eq!(response.status_code, 200);
        let posted = creator.posted();
        assert_eq!(posted.len(), 1);
        assert_eq!(posted[0].body, PREVIEW_COMMENT);
    }

    #[tokio::test]
    async fn application_errors_become_status_codes_not_invocation_failures() {
        let creator = RecordingCreator {
            fail_creation: true,
            ..RecordingCreator::default()
        };

        let response = entry(&creator).invoke(webhook_event()).await.unwrap();
        assert_eq!(response.status_code, 500);
    }

    #[tokio::test]
    async fn unroutable_path_returns_404_envelope() {
        let creator = RecordingCreator::default();
        let mut event = health_event();
        event.path = "/nope".to_string();

        let response = entry(&creator).invoke(event).await.unwrap();
        assert_eq!(response.status_code, 404);
    }

    #[tokio::test]
    async fn invalid_base64_body_fails_the_invocation() {
        let creator = RecordingCreator::default();
        let mut event = webhook_event();
        event.body = "aslkdjflsjdfkdjsfkljsdf".to_string();

        let result = entry(&creator).invoke(event).await;
        assert!(matches!(result, Err(EntryError::Decode(_))));
        assert!(creator.posted().is_empty());
    }
}
