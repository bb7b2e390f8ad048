//! Dispatch of decoded `pull_request` events to action handlers.
//!
//! One invocation moves through: payload parsed → installation client
//! acquired → action dispatched → comment posted or no-op. Parse and client
//! failures short-circuit with an error; there is no partial completion to
//! roll back because at most one mutating call is made.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::github::{ClientCreationError, ClientCreator, CommentPostError};
use crate::types::DeliveryId;

use super::events::{PrAction, parse_pull_request};
use super::handlers::{ActionHandler, PrClosedHandler, PrOpenedHandler};

/// The single event type routed to this dispatcher.
pub const PULL_REQUEST_EVENT: &str = "pull_request";

/// Terminal errors for one delivery. None are retried here.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The webhook body was not a valid `pull_request` payload.
    #[error("malformed pull_request payload: {0}")]
    MalformedPayload(#[from] serde_json::Error),

    /// The installation-scoped client could not be created.
    #[error(transparent)]
    ClientCreation(#[from] ClientCreationError),

    /// The outbound comment call failed.
    #[error(transparent)]
    CommentPost(#[from] CommentPostError),
}

/// Routes decoded pull-request events to per-action handlers.
pub struct PrEventDispatcher {
    client_creator: Arc<dyn ClientCreator>,
    opened: Box<dyn ActionHandler>,
    closed: Box<dyn ActionHandler>,
}

impl PrEventDispatcher {
    /// A dispatcher with the stock open/close comment handlers.
    pub fn new(client_creator: Arc<dyn ClientCreator>) -> Self {
        Self::with_handlers(
            client_creator,
            Box::new(PrOpenedHandler),
            Box::new(PrClosedHandler),
        )
    }

    /// A dispatcher with explicit handlers.
    pub fn with_handlers(
        client_creator: Arc<dyn ClientCreator>,
        opened: Box<dyn ActionHandler>,
        closed: Box<dyn ActionHandler>,
    ) -> Self {
        PrEventDispatcher {
            client_creator,
            opened,
            closed,
        }
    }

    /// Handles one verified `pull_request` delivery.
    ///
    /// Unknown actions are a recognized no-op, not an error: failing the
    /// whole delivery because GitHub added an action the bot does not yet
    /// understand would be wrong.
    pub async fn handle(
        &self,
        event_type: &str,
        delivery: &DeliveryId,
        payload: &[u8],
    ) -> Result<(), DispatchError> {
        let event = match parse_pull_request(payload) {
            Ok(event) => event,
            Err(err) => {
                warn!(%delivery, event_type, error = %err, "failed to decode pull_request payload");
                return Err(DispatchError::MalformedPayload(err));
            }
        };

        debug!(
            %delivery,
            repo = %event.repo,
            pr = %event.number,
            action = ?event.action,
            "handling pull_request event"
        );

        let client = match self
            .client_creator
            .new_installation_client(event.installation)
            .await
        {
            Ok(client) => client,
            Err(err) => {
                warn!(
                    %delivery,
                    repo = %event.repo,
                    installation = %event.installation,
                    error = %err,
                    "failed to create installation client"
                );
                return Err(err.into());
            }
        };

        // Total mapping over the action variants.
        let handler = match event.action {
            PrAction::Opened => &self.opened,
            PrAction::Closed => &self.closed,
            PrAction::Other => {
                debug!(
                    %delivery,
                    repo = %event.repo,
                    pr = %event.number,
                    "ignoring unhandled pull_request action"
                );
                return Ok(());
            }
        };

        handler.handle(client.as_ref(), &event).await.map_err(|err| {
            warn!(
                %delivery,
                repo = %event.repo,
                pr = %event.number,
                error = %err,
                "failed to post comment"
            );
            DispatchError::CommentPost(err)
        })?;

        info!(%delivery, repo = %event.repo, pr = %event.number, "posted pull_request comment");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    use crate::github::test_support::{PostedComment, RecordingCreator};
    use crate::types::{InstallationId, PrNumber, RepoId};
    use crate::webhooks::handlers::{CLEANUP_COMMENT, PREVIEW_COMMENT};

    fn delivery() -> DeliveryId {
        DeliveryId::new("550e8400-e29b-41d4-a716-446655440000")
    }

    fn payload(action: &str) -> Vec<u8> {
        json!({
            "action": action,
            "number": 10,
            "repository": {
                "name": "bar",
                "owner": { "login": "foo" }
            },
            "installation": { "id": 99 }
        })
        .to_string()
        .into_bytes()
    }

    fn dispatcher(creator: &RecordingCreator) -> PrEventDispatcher {
        PrEventDispatcher::new(Arc::new(creator.clone()))
    }

    #[tokio::test]
    async fn opened_posts_exactly_one_preview_comment() {
        let creator = RecordingCreator::default();

        dispatcher(&creator)
            .handle(PULL_REQUEST_EVENT, &delivery(), &payload("opened"))
            .await
            .unwrap();

        assert_eq!(
            creator.posted(),
            vec![PostedComment {
                repo: RepoId::new("foo", "bar"),
                pr: PrNumber(10),
                body: PREVIEW_COMMENT.to_string(),
            }]
        );
        assert_eq!(creator.seen_installations(), vec![InstallationId(99)]);
    }

    #[tokio::test]
    async fn closed_posts_exactly_one_cleanup_comment() {
        let creator = RecordingCreator::default();

        dispatcher(&creator)
            .handle(PULL_REQUEST_EVENT, &delivery(), &payload("closed"))
            .await
            .unwrap();

        let posted = creator.posted();
        assert_eq!(posted.len(), 1);
        assert_eq!(posted[0].body, CLEANUP_COMMENT);
    }

    #[tokio::test]
    async fn other_actions_are_a_no_op() {
        let creator = RecordingCreator::default();

        for action in ["reopened", "synchronize", "edited"] {
            dispatcher(&creator)
                .handle(PULL_REQUEST_EVENT, &delivery(), &payload(action))
                .await
                .unwrap();
        }

        assert!(creator.posted().is_empty());
    }

    #[tokio::test]
    async fn malformed_payload_fails_before_client_creation() {
        let creator = RecordingCreator::default();

        let result = dispatcher(&creator)
            .handle(PULL_REQUEST_EVENT, &delivery(), b"not json")
            .await;

        assert!(matches!(result, Err(DispatchError::MalformedPayload(_))));
        assert!(creator.seen_installations().is_empty());
        assert!(creator.posted().is_empty());
    }

    #[tokio::test]
    async fn missing_required_field_is_malformed() {
        let creator = RecordingCreator::default();
        let payload = json!({ "action": "opened" }).to_string();

        let result = dispatcher(&creator)
            .handle(PULL_REQUEST_EVENT, &delivery(), payload.as_bytes())
            .await;

        assert!(matches!(result, Err(DispatchError::MalformedPayload(_))));
        assert!(creator.seen_installations().is_empty());
    }

    #[tokio::test]
    async fn client_creation_failure_propagates_without_posting() {
        let creator = RecordingCreator {
            fail_creation: true,
            ..RecordingCreator::default()
        };

        let result = dispatcher(&creator)
            .handle(PULL_REQUEST_EVENT, &delivery(), &payload("opened"))
            .await;

        assert!(matches!(result, Err(DispatchError::ClientCreation(_))));
        assert!(creator.posted().is_empty());
    }

    #[tokio::test]
    async fn comment_failure_passes_through_unchanged() {
        let creator = RecordingCreator {
            fail_comment: true,
            ..RecordingCreator::default()
        };

        let result = dispatcher(&creator)
            .handle(PULL_REQUEST_EVENT, &delivery(), &payload("opened"))
            .await;

        match result {
            Err(DispatchError::CommentPost(err)) => {
                assert_eq!(err.repo, RepoId::new("foo", "bar"));
                assert_eq!(err.pr, PrNumber(10));
            }
            other => panic!("expected CommentPost error, got {other:?}"),
        }
        // The call was made exactly once even though it failed.
        assert_eq!(creator.posted().len(), 1);
    }
}
