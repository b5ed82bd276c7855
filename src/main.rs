use anyhow::{bail, Context};
use tracing_subscriber::EnvFilter;

use walks_api::{build_app, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("walks_api=info,tower_http=info")),
        )
        .init();

    let config = walks_api::config::config().clone();
    tracing::info!(
        environment = ?config.environment,
        backend = ?config.database.backend,
        "Starting NZ Walks API"
    );

    if config.security.jwt_secret.is_empty() {
        bail!("JWT_SECRET must be set");
    }

    let port = config.api.port;
    let state = AppState::from_config(config)
        .await
        .context("failed to initialise storage")?;
    let app = build_app(state);

    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("NZ Walks API listening on http://{}", bind_addr);

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
