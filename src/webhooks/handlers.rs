//! Per-action comment handlers.
//!
//! Each handler performs exactly one side effect: a single create-comment
//! call on the pull request the event names. The handlers are pluggable so
//! the dispatcher can be tested with doubles and new actions can be wired
//! without touching dispatch logic.

use async_trait::async_trait;

use crate::github::{ApiClient, CommentPostError};

use super::events::PullRequestEvent;

/// Comment posted when a pull request opens.
pub const PREVIEW_COMMENT: &str = "preview your site at: http://example.com/site";

/// Comment posted when a pull request closes.
pub const CLEANUP_COMMENT: &str = "your site has been cleaned up";

/// One comment-posting action for one PR lifecycle action.
#[async_trait]
pub trait ActionHandler: Send + Sync {
    /// Posts this handler's comment. The result of the outbound call is
    /// returned unmodified.
    async fn handle(
        &self,
        client: &dyn ApiClient,
        event: &PullRequestEvent,
    ) -> Result<(), CommentPostError>;
}

/// Posts the preview link when a pull request is opened.
pub struct PrOpenedHandler;

#[async_trait]
impl ActionHandler for PrOpenedHandler {
    async fn handle(
        &self,
        client: &dyn ApiClient,
        event: &PullRequestEvent,
    ) -> Result<(), CommentPostError> {
        client
            .create_comment(&event.repo, event.number, PREVIEW_COMMENT)
            .await
    }
}

/// Posts the cleanup notice when a pull request is closed.
pub struct PrClosedHandler;

#[async_trait]
impl ActionHandler for PrClosedHandler {
    async fn handle(
        &self,
        client: &dyn ApiClient,
        event: &PullRequestEvent,
    ) -> Result<(), CommentPostError> {
        client
            .create_comment(&event.repo, event.number, CLEANUP_COMMENT)
            .await
    }
}
