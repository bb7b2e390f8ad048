//! Webhook decoding and dispatch for GitHub `pull_request` events.
//!
//! - [`signature`] verifies HMAC-SHA256 delivery signatures.
//! - [`events`] decodes the payload into a typed event.
//! - [`dispatcher`] routes a decoded event to its action handler through an
//!   installation-scoped API client.

mod dispatcher;
mod events;
mod handlers;
mod signature;

pub use dispatcher::{DispatchError, PULL_REQUEST_EVENT, PrEventDispatcher};
pub use events::{PrAction, PullRequestEvent, parse_pull_request};
pub use handlers::{ActionHandler, CLEANUP_COMMENT, PREVIEW_COMMENT, PrClosedHandler, PrOpenedHandler};
pub use signature::WebhookSecret;
