mod config;
mod errors;
mod export;
mod form;
mod models;
mod routes;
mod session;
mod state;
mod store;
mod views;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::export::PdfExporter;
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::{MemorySessionStorage, RedisSessionStorage, SessionLocks, SessionStorage};
use crate::views::Views;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting resumepdf v{}", env!("CARGO_PKG_VERSION"));

    let storage = build_session_storage(&config).await?;

    let views = Views::new().map_err(|e| anyhow::anyhow!("failed to load page templates: {e:?}"))?;
    info!("Page templates loaded");

    let state = AppState {
        storage,
        locks: Arc::new(SessionLocks::default()),
        exporter: Arc::new(PdfExporter),
        views: Arc::new(views),
    };

    let app = build_router(state).layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Redis when `REDIS_URL` is configured, otherwise process memory.
async fn build_session_storage(config: &Config) -> Result<Arc<dyn SessionStorage>> {
    match &config.redis_url {
        Some(url) => {
            let storage = RedisSessionStorage::connect(url, config.session_ttl).await?;
            Ok(Arc::new(storage))
        }
        None => {
            info!(
                ttl_secs = config.session_ttl.as_secs(),
                "REDIS_URL not set; keeping session data in memory"
            );
            Ok(Arc::new(MemorySessionStorage::new(config.session_ttl)))
        }
    }
}
