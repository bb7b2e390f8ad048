//! Liveness endpoint.
//!
//! The load balancer's health checker probes this path; it only confirms
//! that the function is reachable and routing.

use axum::http::{StatusCode, header};
use tracing::debug;

const HEALTH_BODY: &str = r#"{"status": "OK"}"#;

/// `GET /health` → 200 with a fixed JSON body.
pub async fn health_handler() -> (StatusCode, [(header::HeaderName, &'static str); 1], &'static str)
{
    debug!("received health check request");
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        HEALTH_BODY,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn health_returns_200_with_json_body() {
        let (status, headers, body) = health_handler().await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(headers[0].1, "application/json");
        assert_eq!(body, r#"{"status": "OK"}"#);
    }
}
