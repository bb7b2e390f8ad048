//! A GitHub App that greets pull requests.
//!
//! The bot runs as an AWS Lambda function behind an Application Load
//! Balancer. Each invocation carries one load-balancer event envelope, which
//! is translated into an ordinary HTTP request, routed, and translated back
//! into a response envelope. `pull_request` webhook deliveries are dispatched
//! to per-action comment handlers backed by an installation-scoped GitHub
//! client.

pub mod config;
pub mod github;
pub mod server;
pub mod transport;
pub mod types;
pub mod webhooks;
