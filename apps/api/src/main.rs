mod analysis;
mod chat;
mod config;
mod errors;
mod llm_client;
mod payments;
mod routes;
mod state;
mod tasks;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::analysis::pipeline::{AnalysisPipeline, AnalysisSettings, ANALYSIS_TEMPERATURE};
use crate::analysis::store::InMemoryResultStore;
use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::payments::StripeClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={},tower_http=info",
                env!("CARGO_CRATE_NAME"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Career API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize upstream clients
    let llm = Arc::new(LlmClient::new(config.openai_api_key.clone())?);
    info!(
        "LLM client initialized (analysis model: {}, chat model: {})",
        config.analysis_model, config.chat_model
    );

    let payments = Arc::new(StripeClient::new(config.stripe_secret_key.clone())?);
    info!(
        "Payment client initialized ({} {} per analysis)",
        config.price_cents, config.currency
    );

    // Initialize result store
    let ttl = match config.result_ttl_secs {
        0 => {
            warn!("RESULT_TTL_SECS=0: analysis results are never evicted");
            None
        }
        secs => Some(Duration::from_secs(secs)),
    };
    let store = Arc::new(InMemoryResultStore::new(ttl));

    let pipeline = AnalysisPipeline::new(
        llm.clone(),
        store.clone(),
        AnalysisSettings {
            model: config.analysis_model.clone(),
            max_tokens: config.analysis_max_tokens,
            temperature: ANALYSIS_TEMPERATURE,
        },
    );

    // Build app state
    let state = AppState {
        config: config.clone(),
        llm,
        payments,
        store,
        pipeline,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr} (static files from '{}')", config.static_dir);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
