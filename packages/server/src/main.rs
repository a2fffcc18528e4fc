use std::time::Duration;

use anyhow::Context;
use axum::http::HeaderValue;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;
use tracing_subscriber::EnvFilter;

use bloglist_server::config::{AppConfig, CorsConfig};
use bloglist_server::state::AppState;
use bloglist_server::{build_router, database};

fn cors_layer(cors: &CorsConfig) -> anyhow::Result<CorsLayer> {
    let layer = CorsLayer::new()
        .allow_methods(Any)
        .allow_headers(Any)
        .max_age(Duration::from_secs(cors.max_age));

    if cors.allow_origins.is_empty() {
        return Ok(layer.allow_origin(Any));
    }

    let origins = cors
        .allow_origins
        .iter()
        .map(|o| HeaderValue::from_str(o).with_context(|| format!("invalid CORS origin `{o}`")))
        .collect::<anyhow::Result<Vec<_>>>()?;
    Ok(layer.allow_origin(origins))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("bloglist_server=info,tower_http=info")),
        )
        .init();

    let config = AppConfig::load().context("failed to load configuration")?;

    let db = database::init_db(&config.database)
        .await
        .context("failed to initialize database")?;
    info!("Database ready");

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let cors = cors_layer(&config.server.cors)?;
    let app = build_router(AppState::new(db, config)).layer(cors);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Server running at http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
