use std::sync::Arc;

use lambda_runtime::{Error, LambdaEvent, service_fn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pr_hello::config::Config;
use pr_hello::github::GitHubClientCreator;
use pr_hello::server::{AppState, build_router};
use pr_hello::transport::{AlbRequest, LambdaEntry};
use pr_hello::webhooks::{PrEventDispatcher, WebhookSecret};

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pr_hello=info".into()),
        )
        // The platform stamps log lines with its own timestamps.
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    tracing::info!("function starting; parsing config from environment");
    let config = Config::from_env().inspect_err(|err| {
        tracing::error!(error = %err, "failed to read config");
    })?;

    let creator = GitHubClientCreator::from_config(&config).inspect_err(|err| {
        tracing::error!(error = %err, "failed to build GitHub App client");
    })?;

    let dispatcher = PrEventDispatcher::new(Arc::new(creator));
    let state = AppState::new(
        WebhookSecret::new(config.webhook_secret.as_bytes()),
        dispatcher,
    );
    let entry = LambdaEntry::new(build_router(state));

    tracing::info!("routes registered; starting lambda handler");
    lambda_runtime::run(service_fn(move |event: LambdaEvent<AlbRequest>| {
        let entry = entry.clone();
        async move { entry.invoke(event.payload).await.map_err(Error::from) }
    }))
    .await
}
