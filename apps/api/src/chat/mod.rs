//! Conversational follow-up: short answers grounded on an analysis the
//! client already holds. Stateless: the result store is never consulted.

pub mod prompts;

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::chat::prompts::{CHAT_SYSTEM_TEMPLATE, CHAT_TEMPERATURE};
use crate::errors::AppError;
use crate::llm_client::prompts::DU_FORM_INSTRUCTION;
use crate::llm_client::GenerationRequest;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    #[serde(default)]
    pub question: String,
    #[serde(default)]
    pub analysis_context: String,
    /// Logging only.
    pub session_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub answer: String,
}

/// Builds the system prompt with the prior analysis embedded verbatim.
pub fn build_chat_system(analysis_context: &str) -> String {
    CHAT_SYSTEM_TEMPLATE
        .replace("{du_instruction}", DU_FORM_INSTRUCTION)
        .replace("{analysis_context}", analysis_context)
}

/// POST /api/chatbot
pub async fn handle_chatbot(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    if request.question.trim().is_empty() {
        return Err(AppError::Chat("empty question".to_string()));
    }

    info!(
        "Chat question for session {}",
        request.session_id.as_deref().unwrap_or("-")
    );

    let answer = state
        .llm
        .generate(GenerationRequest {
            model: state.config.chat_model.clone(),
            system: build_chat_system(&request.analysis_context),
            user: request.question,
            temperature: CHAT_TEMPERATURE,
            max_tokens: state.config.chat_max_tokens,
        })
        .await
        .map_err(|e| AppError::Chat(e.to_string()))?;

    Ok(Json(ChatResponse { answer }))
}
