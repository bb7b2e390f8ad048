//! Errors from the GitHub collaborator seam.
//!
//! Both types carry a message plus an optional underlying octocrab error, so
//! alternative implementations and test doubles can construct them without a
//! live client. Neither is retried inside the bot; retry policy, if any,
//! belongs to the invoking platform.

use thiserror::Error;

use crate::types::{InstallationId, PrNumber, RepoId};

/// Failure to obtain an installation-scoped API client.
///
/// Covers credential exchange failures: invalid app credentials, a revoked
/// installation, or network errors reaching the token endpoint.
#[derive(Debug, Error)]
#[error("failed to create client for installation {installation}: {message}")]
pub struct ClientCreationError {
    pub installation: InstallationId,
    pub message: String,
    #[source]
    pub source: Option<octocrab::Error>,
}

impl ClientCreationError {
    /// An error with no underlying API error.
    pub fn new(installation: InstallationId, message: impl Into<String>) -> Self {
        ClientCreationError {
            installation,
            message: message.into(),
            source: None,
        }
    }

    pub fn from_octocrab(installation: InstallationId, source: octocrab::Error) -> Self {
        ClientCreationError {
            installation,
            message: source.to_string(),
            source: Some(source),
        }
    }
}

/// Failure of the outbound create-comment call.
///
/// Covers authorization failures, rate limits, and missing repositories.
#[derive(Debug, Error)]
#[error("failed to comment on {repo}{pr}: {message}")]
pub struct CommentPostError {
    pub repo: RepoId,
    pub pr: PrNumber,
    pub message: String,
    #[source]
    pub source: Option<octocrab::Error>,
}

impl CommentPostError {
    /// An error with no underlying API error.
    pub fn new(repo: RepoId, pr: PrNumber, message: impl Into<String>) -> Self {
        CommentPostError {
            repo,
            pr,
            message: message.into(),
            source: None,
        }
    }

    pub fn from_octocrab(repo: RepoId, pr: PrNumber, source: octocrab::Error) -> Self {
        CommentPostError {
            repo,
            pr,
            message: source.to_string(),
            source: Some(source),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_creation_error_names_the_installation() {
        let err = ClientCreationError::new(InstallationId(42), "installation revoked");
        assert_eq!(
            err.to_string(),
            "failed to create client for installation 42: installation revoked"
        );
    }

    #[test]
    fn comment_post_error_names_the_pr() {
        let err = CommentPostError::new(RepoId::new("foo", "bar"), PrNumber(10), "rate limited");
        assert_eq!(err.to_string(), "failed to comment on foo/bar#10: rate limited");
    }
}
