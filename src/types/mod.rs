//! Core identifier types shared across the bot.

mod ids;

pub use ids::{DeliveryId, InstallationId, PrNumber, RepoId};
