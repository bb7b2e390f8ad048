//! HTTP routing for the bot.
//!
//! The route table is an explicit router object, built once at startup and
//! handed by ownership to the entry point adapter. No writer runs after
//! startup, so handlers read the shared state without locks.
//!
//! # Endpoints
//!
//! - `GET /health` - Liveness probe for the load balancer
//! - `POST /default/api/github/hook` - GitHub webhook deliveries
//!
//! Unregistered paths fall through to axum's default 404.

use std::sync::Arc;

pub mod health;
pub mod webhook;

pub use health::health_handler;
pub use webhook::webhook_handler;

use crate::webhooks::{PrEventDispatcher, WebhookSecret};

/// Path the load balancer forwards GitHub webhook deliveries to.
pub const WEBHOOK_PATH: &str = "/default/api/github/hook";

/// Shared application state.
///
/// Passed to all handlers via axum's `State` extractor. Write-once at
/// startup, read-only afterwards.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    /// Webhook secret for HMAC-SHA256 signature verification.
    secret: WebhookSecret,

    /// Routes verified `pull_request` deliveries to action handlers.
    dispatcher: PrEventDispatcher,
}

impl AppState {
    pub fn new(secret: WebhookSecret, dispatcher: PrEventDispatcher) -> Self {
        AppState {
            inner: Arc::new(AppStateInner { secret, dispatcher }),
        }
    }

    pub fn secret(&self) -> &WebhookSecret {
        &self.inner.secret
    }

    pub fn dispatcher(&self) -> &PrEventDispatcher {
        &self.inner.dispatcher
    }
}

/// Builds the axum Router with all endpoints.
pub fn build_router(state: AppState) -> axum::Router {
    use axum::routing::{get, post};

    axum::Router::new()
        .route("/health", get(health_handler))
        .route(WEBHOOK_PATH, post(webhook_handler))
        .with_state(state)
}
