pub mod health;

use axum::{
    routing::{get, post},
    Router,
};
use bytes::Bytes;
use tower_http::services::ServeDir;
use tracing::debug;

use crate::analysis::handlers;
use crate::chat::handle_chatbot;
use crate::errors::AppError;
use crate::state::AppState;

/// Reserved for payment provider callbacks; the raw body is accepted but not processed.
async fn handle_webhook(body: Bytes) -> Result<(), AppError> {
    debug!("Webhook received ({} bytes), no handler configured", body.len());
    Err(AppError::NotImplemented)
}

pub fn build_router(state: AppState) -> Router {
    let static_files = ServeDir::new(&state.config.static_dir);

    Router::new()
        .route("/", get(health::root_handler))
        .route("/health", get(health::health_handler))
        .route(
            "/create-checkout-session",
            post(handlers::handle_create_checkout_session),
        )
        .route(
            "/create-partner-analysis",
            post(handlers::handle_create_partner_analysis),
        )
        .route(
            "/get-analysis/:session_id",
            get(handlers::handle_get_analysis),
        )
        .route("/api/chatbot", post(handle_chatbot))
        .route("/webhook", post(handle_webhook))
        .fallback_service(static_files)
        .with_state(state)
}
