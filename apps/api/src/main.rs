mod calendar;
mod config;
mod engine;
mod errors;
mod llm_client;
mod reading;
mod recommendation;
mod routes;
mod saju;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::reading::cache::ReadingCache;
use crate::reading::narrator::{GeminiNarrator, Narrator, TemplateNarrator};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Saju API v{}", env!("CARGO_PKG_VERSION"));

    // Gemini is optional: without a key, readings come from the template narrator
    let llm = match &config.gemini_api_key {
        Some(key) => {
            let llm = LlmClient::new(key.clone())?;
            info!("LLM client initialized (model: {})", llm_client::MODEL);
            Some(llm)
        }
        None => {
            warn!("GEMINI_API_KEY not set; using template readings and disabling chat");
            None
        }
    };
    let narrator: Arc<dyn Narrator> = match &llm {
        Some(llm) => Arc::new(GeminiNarrator(llm.clone())),
        None => Arc::new(TemplateNarrator),
    };

    let redis = match &config.redis_url {
        Some(url) => {
            let client = redis::Client::open(url.as_str())?;
            info!("Redis reading cache enabled (ttl {}s)", config.reading_cache_ttl_secs);
            Some(client)
        }
        None => {
            info!("REDIS_URL not set; reading cache disabled");
            None
        }
    };
    let cache = ReadingCache::new(redis, config.reading_cache_ttl_secs);

    let state = AppState {
        config: config.clone(),
        llm,
        narrator,
        cache,
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
