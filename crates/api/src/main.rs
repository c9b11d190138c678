use std::sync::Arc;

use anyhow::Context;

use cookgenie_api::app::{self, services::AppServices};
use cookgenie_api::config::ApiConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    cookgenie_observability::init();

    let config = ApiConfig::from_env().context("invalid configuration")?;
    tracing::info!(
        bind_addr = %config.bind_addr,
        utc_offset = %config.utc_offset,
        "starting cookgenie-api"
    );

    let services = Arc::new(AppServices::in_memory(&config));
    let router = app::build_app(services);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, router).await.context("server error")?;
    Ok(())
}
