//! Axum route handlers for the analysis flows: paid checkout, free partner
//! analysis, and result polling.

use std::collections::BTreeMap;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::{debug, info};

use crate::analysis::form::FormData;
use crate::analysis::session::SessionId;
use crate::errors::AppError;
use crate::payments::{CheckoutRequest, LineItem};
use crate::state::AppState;
use crate::tasks::spawn_detached;

const PRODUCT_NAME: &str = "KI-Karriereanalyse";
const PRODUCT_DESCRIPTION: &str = "Personalisierte Karriereberatung mit KI";
const PROCESSING_MESSAGE: &str = "Analyse läuft noch...";

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutSessionRequest {
    #[serde(default, deserialize_with = "null_as_default")]
    pub form_data: FormData,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutSessionResponse {
    pub session_id: SessionId,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartnerAnalysisRequest {
    #[serde(default, deserialize_with = "null_as_default")]
    pub form_data: FormData,
    pub partner_code: Option<String>,
    pub source: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PartnerAnalysisResponse {
    pub status: &'static str,
    pub analysis: String,
    pub partner_code: Option<String>,
}

/// `formData: null` is treated like a missing questionnaire.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Poll result. "processing" is a normal state, not an error.
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum AnalysisStatus {
    Processing { message: &'static str },
    Complete { analysis: String },
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /create-checkout-session
///
/// Opens a payment session, starts the analysis without waiting for it, and
/// returns the session id to poll. Only a payment failure reaches the caller.
pub async fn handle_create_checkout_session(
    State(state): State<AppState>,
    Json(request): Json<CheckoutSessionRequest>,
) -> Result<Json<CheckoutSessionResponse>, AppError> {
    let form_json = serde_json::to_string(&request.form_data)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to serialize formData: {e}")))?;

    let checkout = CheckoutRequest {
        line_items: vec![LineItem {
            name: PRODUCT_NAME.to_string(),
            description: PRODUCT_DESCRIPTION.to_string(),
            currency: state.config.currency.clone(),
            unit_amount: state.config.price_cents,
            quantity: 1,
        }],
        success_url: state.config.success_url.clone(),
        cancel_url: state.config.cancel_url.clone(),
        metadata: BTreeMap::from([("formData".to_string(), form_json)]),
    };

    let session = state.payments.create_checkout_session(checkout).await?;
    let session_id = SessionId::new(session.id);
    info!("Checkout session {session_id} created; starting analysis");

    let pipeline = state.pipeline.clone();
    let form = request.form_data;
    let id = session_id.clone();
    spawn_detached(format!("analysis {session_id}"), async move {
        pipeline.run(form, id).await
    });

    Ok(Json(CheckoutSessionResponse { session_id }))
}

/// POST /create-partner-analysis
///
/// Free flow for partner traffic: runs the analysis inline and returns it.
/// `partnerCode` and `source` are only logged.
pub async fn handle_create_partner_analysis(
    State(state): State<AppState>,
    Json(request): Json<PartnerAnalysisRequest>,
) -> Result<Json<PartnerAnalysisResponse>, AppError> {
    let partner = request.partner_code.as_deref().unwrap_or("-");
    let source = request.source.as_deref().unwrap_or("-");
    info!("Partner analysis requested: partner={partner} source={source}");

    let session_id = SessionId::partner();
    let analysis = state
        .pipeline
        .run(request.form_data, session_id.clone())
        .await
        .map_err(|e| AppError::Analysis(e.to_string()))?;

    info!(
        "Partner analysis generated: partner={partner} session={session_id} at {}",
        chrono::Utc::now().to_rfc3339()
    );

    Ok(Json(PartnerAnalysisResponse {
        status: "complete",
        analysis,
        partner_code: request.partner_code,
    }))
}

/// GET /get-analysis/:session_id
///
/// 202 while the analysis is absent, 200 with the text once stored.
pub async fn handle_get_analysis(
    State(state): State<AppState>,
    Path(session_id): Path<SessionId>,
) -> (StatusCode, Json<AnalysisStatus>) {
    debug!("Poll for session {}", session_id.as_str());
    match state.store.get(&session_id) {
        Some(record) => (
            StatusCode::OK,
            Json(AnalysisStatus::Complete {
                analysis: record.analysis,
            }),
        ),
        None => (
            StatusCode::ACCEPTED,
            Json(AnalysisStatus::Processing {
                message: PROCESSING_MESSAGE,
            }),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_status_serializes_with_tag() {
        let processing = serde_json::to_value(AnalysisStatus::Processing {
            message: PROCESSING_MESSAGE,
        })
        .unwrap();
        assert_eq!(processing["status"], "processing");

        let complete = serde_json::to_value(AnalysisStatus::Complete {
            analysis: "Text".to_string(),
        })
        .unwrap();
        assert_eq!(complete, json!({ "status": "complete", "analysis": "Text" }));
    }

    #[test]
    fn test_partner_request_accepts_camel_case_and_missing_fields() {
        let request: PartnerAnalysisRequest = serde_json::from_value(json!({
            "formData": { "age": "17" },
            "partnerCode": "test1",
        }))
        .unwrap();
        assert_eq!(request.partner_code.as_deref(), Some("test1"));
        assert!(request.source.is_none());

        let empty: CheckoutSessionRequest = serde_json::from_value(json!({})).unwrap();
        assert_eq!(empty.form_data, FormData::default());
    }

    #[test]
    fn test_null_form_data_is_treated_as_empty() {
        let checkout: CheckoutSessionRequest =
            serde_json::from_value(json!({ "formData": null })).unwrap();
        assert_eq!(checkout.form_data, FormData::default());

        let partner: PartnerAnalysisRequest =
            serde_json::from_value(json!({ "formData": null, "partnerCode": "p1" })).unwrap();
        assert_eq!(partner.form_data, FormData::default());
    }
}
