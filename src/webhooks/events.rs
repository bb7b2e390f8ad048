//! Typed `pull_request` webhook events.
//!
//! The payload is decoded once per invocation into [`PullRequestEvent`],
//! which is immutable and discarded when the invocation ends. Only the
//! fields the bot acts on are decoded; everything else in GitHub's payload
//! is ignored.

use serde::{Deserialize, Serialize};

use crate::types::{InstallationId, PrNumber, RepoId};

/// Lifecycle action on a pull request.
///
/// Only `opened` and `closed` drive comments. Every other action GitHub may
/// send (reopened, synchronize, future additions) collapses into
/// [`PrAction::Other`], so an unfamiliar action never fails a delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrAction {
    Opened,
    Closed,
    #[serde(other)]
    Other,
}

/// A decoded `pull_request` webhook event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestEvent {
    pub action: PrAction,
    pub repo: RepoId,
    pub number: PrNumber,
    pub installation: InstallationId,
}

/// Decodes a raw `pull_request` payload.
///
/// Missing required fields (`action`, `repository`, `number`,
/// `installation`) fail the same way invalid JSON does.
pub fn parse_pull_request(payload: &[u8]) -> Result<PullRequestEvent, serde_json::Error> {
    let raw: RawPullRequestPayload = serde_json::from_slice(payload)?;
    Ok(PullRequestEvent {
        action: raw.action,
        repo: RepoId::new(raw.repository.owner.login, raw.repository.name),
        number: PrNumber(raw.number),
        installation: InstallationId(raw.installation.id),
    })
}

// Raw structures matching GitHub's webhook JSON shape.

#[derive(Debug, Deserialize)]
struct RawPullRequestPayload {
    action: PrAction,
    number: u64,
    repository: RawRepository,
    installation: RawInstallation,
}

#[derive(Debug, Deserialize)]
struct RawRepository {
    name: String,
    owner: RawOwner,
}

#[derive(Debug, Deserialize)]
struct RawOwner {
    login: String,
}

#[derive(Debug, Deserialize)]
struct RawInstallation {
    id: u64,
}
