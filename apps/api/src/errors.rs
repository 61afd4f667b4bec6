use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::payments::PaymentError;

/// Shown to chat users instead of the upstream error.
pub const CHAT_APOLOGY: &str =
    "Entschuldigung, ich konnte deine Frage gerade nicht beantworten. Bitte versuche es gleich noch einmal.";

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
/// Each upstream failure keeps the response body its endpoint has always sent.
#[derive(Debug, Error)]
pub enum AppError {
    /// Payment session creation failed.
    #[error("Payment error: {0}")]
    Payment(String),

    /// Synchronous analysis generation failed.
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// Follow-up chat generation failed.
    #[error("Chat error: {0}")]
    Chat(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),

    #[error("Not implemented")]
    NotImplemented,
}

impl From<PaymentError> for AppError {
    fn from(e: PaymentError) -> Self {
        AppError::Payment(e.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            AppError::Payment(msg) => {
                tracing::error!("Payment error: {msg}");
                (StatusCode::INTERNAL_SERVER_ERROR, json!({ "error": msg }))
            }
            AppError::Analysis(msg) => {
                tracing::error!("Analysis error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({
                        "error": "Analysis generation failed",
                        "message": msg
                    }),
                )
            }
            AppError::Chat(msg) => {
                tracing::error!("Chat error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": CHAT_APOLOGY }),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "An internal server error occurred" }),
                )
            }
            AppError::NotImplemented => (
                StatusCode::NOT_IMPLEMENTED,
                json!({ "error": "This endpoint is not yet implemented" }),
            ),
        };

        (status, Json(body)).into_response()
    }
}
