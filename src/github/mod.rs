//! GitHub API collaborators.
//!
//! The dispatcher only needs two capabilities: minting an API client scoped
//! to one installation, and posting a comment through it. Both are traits so
//! the dispatch logic can be exercised without a live GitHub App.
//!
//! The production implementation authenticates as a GitHub App via octocrab
//! and lets the library own installation token exchange and caching.

mod client;
mod error;

pub use client::{ApiClient, ClientCreator, GitHubClientCreator, GitHubSetupError};
pub use error::{ClientCreationError, CommentPostError};
