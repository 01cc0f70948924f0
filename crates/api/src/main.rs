use anyhow::{Context, Result};
use translateai_api::{build_app, ApiConfig};
use translateai_observability::init_tracing;

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing("translateai_api");

    let config = ApiConfig::from_env()?;
    let app = build_app(&config)?;

    let listener = tokio::net::TcpListener::bind(&config.bind)
        .await
        .with_context(|| format!("failed to bind {}", config.bind))?;
    tracing::info!(
        bind = %config.bind,
        provider = ?config.provider,
        service = %config.service_name,
        "translateai api started"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
