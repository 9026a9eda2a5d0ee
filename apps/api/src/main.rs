mod assistant;
mod config;
mod editor;
mod errors;
mod export;
mod llm_client;
mod models;
mod preview;
mod routes;
mod session;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::export::{Exporter, RenderServiceExporter};
use crate::llm_client::{ApiKeySource, GeminiClient, API_KEY_VAR};
use crate::routes::build_router;
use crate::session::SessionStore;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (.env is applied before anything reads the environment)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Resume Builder API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize completion client
    let llm = GeminiClient::new(config.gemini_base_url.clone(), ApiKeySource::Env(API_KEY_VAR))?;
    info!("Completion client initialized (model: {})", llm_client::MODEL);

    // Initialize export collaborator
    let exporter: Option<Arc<dyn Exporter>> = match &config.render_service_url {
        Some(url) => {
            info!("PDF export via {url}");
            Some(Arc::new(RenderServiceExporter::new(url.clone())?))
        }
        None => {
            warn!("RENDER_SERVICE_URL is not set; PDF export is disabled");
            None
        }
    };

    // Build app state
    let state = AppState {
        sessions: SessionStore::new(),
        llm: Arc::new(llm),
        exporter,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the web client has a fixed host

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
