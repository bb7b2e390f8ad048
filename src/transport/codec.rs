//! Bidirectional codec between ALB target group events and HTTP.
//!
//! The load balancer hands the function a JSON envelope instead of a real
//! HTTP exchange. [`decode_request`] rebuilds a canonical request from the
//! envelope; [`encode_response`] flattens a response back into the envelope
//! shape the load balancer expects.
//!
//! The envelope supports one value per header key. Decoding carries inbound
//! headers over verbatim; encoding collapses multi-valued response headers
//! into a single comma-joined value, which is a deliberate lossy transform.

use std::collections::HashMap;

use axum::body::Body;
use axum::http::{HeaderName, HeaderValue, Method, Request, Response, Uri};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use http_body_util::BodyExt;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The envelope does not preserve the original host, so request URLs are
/// composed against a fixed synthetic authority.
const SYNTHETIC_AUTHORITY: &str = "https://localhost";

/// An inbound ALB target group event.
///
/// Fields the bot does not consume (query parameters, request context,
/// multi-value headers) are ignored on deserialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlbRequest {
    pub http_method: String,
    pub path: String,
    #[serde(default)]
    pub headers: HashMap<String, String>,
    #[serde(default)]
    pub is_base64_encoded: bool,
    #[serde(default)]
    pub body: String,
}

/// An outbound ALB target group response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlbResponse {
    pub status_code: u16,
    pub status_description: String,
    pub headers: HashMap<String, String>,
    pub body: String,
    pub is_base64_encoded: bool,
}

/// A malformed inbound envelope. Terminal for the invocation.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The envelope claimed a base64 body that does not decode.
    #[error("request body is not valid base64: {0}")]
    InvalidBody(#[from] base64::DecodeError),

    /// The envelope path cannot compose into a well-formed URL.
    #[error("request path {path:?} does not form a valid URL")]
    InvalidPath {
        path: String,
        #[source]
        source: axum::http::uri::InvalidUri,
    },

    /// The envelope method is not an HTTP method.
    #[error("invalid HTTP method {method:?}")]
    InvalidMethod {
        method: String,
        #[source]
        source: axum::http::method::InvalidMethod,
    },

    /// A header cannot be carried on an HTTP request.
    #[error("header {name:?} cannot be carried on an HTTP request")]
    InvalidHeader { name: String },

    /// Request assembly failed.
    #[error("failed to assemble request: {0}")]
    Request(#[from] axum::http::Error),
}

/// A response that could not be flattened into an envelope.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// The response body stream could not be drained.
    #[error("failed to read response body: {0}")]
    Body(#[source] axum::Error),
}

/// Rebuilds a canonical HTTP request from an inbound envelope.
///
/// The body is decoded from base64 when the envelope says so; otherwise the
/// envelope body bytes are used as-is. All envelope headers are copied onto
/// the request, last value winning per key.
pub fn decode_request(event: AlbRequest) -> Result<Request<Body>, DecodeError> {
    let AlbRequest {
        http_method,
        path,
        headers,
        is_base64_encoded,
        body,
    } = event;

    let method = http_method
        .parse::<Method>()
        .map_err(|source| DecodeError::InvalidMethod {
            method: http_method.clone(),
            source,
        })?;

    let uri = format!("{SYNTHETIC_AUTHORITY}{path}")
        .parse::<Uri>()
        .map_err(|source| DecodeError::InvalidPath {
            path: path.clone(),
            source,
        })?;

    let body = if is_base64_encoded {
        BASE64.decode(body.as_bytes())?
    } else {
        body.into_bytes()
    };

    let mut builder = Request::builder().method(method).uri(uri);
    for (name, value) in &headers {
        let header_name = name
            .parse::<HeaderName>()
            .map_err(|_| DecodeError::InvalidHeader { name: name.clone() })?;
        let header_value = HeaderValue::from_str(value)
            .map_err(|_| DecodeError::InvalidHeader { name: name.clone() })?;
        builder = builder.header(header_name, header_value);
    }

    Ok(builder.body(Body::from(body))?)
}

/// Flattens an HTTP response into an outbound envelope.
///
/// The body is drained to completion before the envelope is built; ownership
/// of the body ends here on every exit path. Multi-valued headers collapse to
/// one comma-joined value per key. Bodies are passed through as text and are
/// never re-encoded to base64, even when the payload is binary.
pub async fn encode_response(response: Response<Body>) -> Result<AlbResponse, EncodeError> {
    let (parts, body) = response.into_parts();

    let mut headers = HashMap::new();
    for name in parts.headers.keys() {
        let joined = parts
            .headers
            .get_all(name)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .collect::<Vec<_>>()
            .join(",");
        headers.insert(canonical_header_name(name.as_str()), joined);
    }

    let status_description = match parts.status.canonical_reason() {
        Some(reason) => format!("{} {reason}", parts.status.as_u16()),
        None => parts.status.as_u16().to_string(),
    };

    let bytes = body
        .collect()
        .await
        .map_err(EncodeError::Body)?
        .to_bytes();

    Ok(AlbResponse {
        status_code: parts.status.as_u16(),
        status_description,
        headers,
        body: String::from_utf8_lossy(&bytes).into_owned(),
        is_base64_encoded: false,
    })
}

/// Restores canonical MIME capitalization ("content-type" → "Content-Type").
///
/// The HTTP layer normalizes header names to lowercase; the envelope format
/// carries them in canonical form.
fn canonical_header_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut at_segment_start = true;
    for c in name.chars() {
        if at_segment_start {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
        at_segment_start = c == '-';
    }
    out
}
