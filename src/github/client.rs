//! Installation-scoped GitHub clients over octocrab.
//!
//! The bot authenticates as a GitHub App (JWT signed with the app's private
//! key) and scopes each API call to the installation the webhook event came
//! from. Installation token exchange, caching and refresh are owned by
//! octocrab; this module only selects the installation.

use std::time::Duration;

use async_trait::async_trait;
use jsonwebtoken::EncodingKey;
use octocrab::Octocrab;
use octocrab::models::AppId;
use thiserror::Error;

use crate::config::Config;
use crate::types::{InstallationId, PrNumber, RepoId};

use super::error::{ClientCreationError, CommentPostError};

/// Timeout for outbound GitHub API calls. On expiry the call fails like any
/// other client error; nothing is retried here.
const CLIENT_TIMEOUT: Duration = Duration::from_secs(3);

/// Capability to act on GitHub as one installation.
#[async_trait]
pub trait ApiClient: Send + Sync {
    /// Posts one comment on a pull request. The single mutating call the bot
    /// makes; its result is surfaced to the caller unmodified.
    async fn create_comment(
        &self,
        repo: &RepoId,
        pr: PrNumber,
        body: &str,
    ) -> Result<(), CommentPostError>;
}

/// Capability to mint installation-scoped API clients.
#[async_trait]
pub trait ClientCreator: Send + Sync {
    async fn new_installation_client(
        &self,
        installation: InstallationId,
    ) -> Result<Box<dyn ApiClient>, ClientCreationError>;
}

/// Startup wiring failure. Terminates the process before any invocation.
#[derive(Debug, Error)]
pub enum GitHubSetupError {
    #[error("invalid GitHub App private key: {0}")]
    PrivateKey(#[from] jsonwebtoken::errors::Error),

    #[error("failed to build GitHub App client: {0}")]
    Client(#[from] octocrab::Error),
}

/// [`ClientCreator`] backed by octocrab App authentication.
#[derive(Clone)]
pub struct GitHubClientCreator {
    app: Octocrab,
}

impl GitHubClientCreator {
    /// Builds the app-authenticated base client from process configuration.
    pub fn from_config(config: &Config) -> Result<Self, GitHubSetupError> {
        let key = EncodingKey::from_rsa_pem(config.private_key.as_bytes())?;
        let app = Octocrab::builder()
            .app(AppId(config.integration_id), key)
            .base_uri(config.github_v3_endpoint.as_str())?
            .set_connect_timeout(Some(CLIENT_TIMEOUT))
            .set_read_timeout(Some(CLIENT_TIMEOUT))
            .build()?;
        Ok(GitHubClientCreator { app })
    }
}

#[async_trait]
impl ClientCreator for GitHubClientCreator {
    async fn new_installation_client(
        &self,
        installation: InstallationId,
    ) -> Result<Box<dyn ApiClient>, ClientCreationError> {
        let client = self
            .app
            .installation(octocrab::models::InstallationId(installation.0))
            .map_err(|err| ClientCreationError::from_octocrab(installation, err))?;
        Ok(Box::new(InstallationClient { client }))
    }
}

/// [`ApiClient`] over an installation-authenticated octocrab instance.
struct InstallationClient {
    client: Octocrab,
}

#[async_trait]
impl ApiClient for InstallationClient {
    async fn create_comment(
        &self,
        repo: &RepoId,
        pr: PrNumber,
        body: &str,
    ) -> Result<(), CommentPostError> {
        self.client
            .issues(&repo.owner, &repo.repo)
            .create_comment(pr.0, body)
            .await
            .map(|_| ())
            .map_err(|err| CommentPostError::from_octocrab(repo.clone(), pr, err))
    }
}

impl std::fmt::Debug for GitHubClientCreator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubClientCreator").finish_non_exhaustive()
    }
}
