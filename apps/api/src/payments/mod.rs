//! Payment provider seam: creates hosted checkout sessions.
//!
//! Production: `StripeClient` (form-encoded POST to the Checkout Sessions API).
//! Tests substitute their own `PaymentProvider`.

use std::collections::BTreeMap;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

const STRIPE_CHECKOUT_URL: &str = "https://api.stripe.com/v1/checkout/sessions";

#[derive(Debug, Error)]
pub enum PaymentError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{message}")]
    Api { status: u16, message: String },

    #[error("Payment provider returned a session without an id")]
    MissingSessionId,
}

/// A single priced line item.
#[derive(Debug, Clone)]
pub struct LineItem {
    pub name: String,
    pub description: String,
    pub currency: String,
    /// Amount in minor units (cents).
    pub unit_amount: i64,
    pub quantity: u32,
}

/// Everything the provider needs to open a one-off payment session.
#[derive(Debug, Clone)]
pub struct CheckoutRequest {
    pub line_items: Vec<LineItem>,
    pub success_url: String,
    pub cancel_url: String,
    pub metadata: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutSession {
    pub id: String,
    pub url: Option<String>,
}

/// Carried in `AppState` as `Arc<dyn PaymentProvider>`.
#[async_trait]
pub trait PaymentProvider: Send + Sync {
    async fn create_checkout_session(
        &self,
        request: CheckoutRequest,
    ) -> Result<CheckoutSession, PaymentError>;
}

#[derive(Debug, Deserialize)]
struct StripeError {
    error: StripeErrorBody,
}

#[derive(Debug, Deserialize)]
struct StripeErrorBody {
    message: String,
}

#[derive(Clone)]
pub struct StripeClient {
    client: Client,
    secret_key: String,
}

impl StripeClient {
    pub fn new(secret_key: String) -> Result<Self, PaymentError> {
        Ok(Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(30))
                .build()?,
            secret_key,
        })
    }
}

#[async_trait]
impl PaymentProvider for StripeClient {
    async fn create_checkout_session(
        &self,
        request: CheckoutRequest,
    ) -> Result<CheckoutSession, PaymentError> {
        let params = encode_checkout_form(&request);

        let response = self
            .client
            .post(STRIPE_CHECKOUT_URL)
            .bearer_auth(&self.secret_key)
            .form(&params)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<StripeError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(PaymentError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let session: CheckoutSession = response.json().await?;
        if session.id.is_empty() {
            return Err(PaymentError::MissingSessionId);
        }

        debug!(
            "Checkout session created: {} (hosted page: {:?})",
            session.id, session.url
        );
        Ok(session)
    }
}

/// Flattens a checkout request into Stripe's bracketed form-field notation.
fn encode_checkout_form(request: &CheckoutRequest) -> Vec<(String, String)> {
    let mut params = vec![
        ("mode".to_string(), "payment".to_string()),
        ("success_url".to_string(), request.success_url.clone()),
        ("cancel_url".to_string(), request.cancel_url.clone()),
    ];

    for (i, item) in request.line_items.iter().enumerate() {
        let prefix = format!("line_items[{i}]");
        params.push((
            format!("{prefix}[price_data][currency]"),
            item.currency.clone(),
        ));
        params.push((
            format!("{prefix}[price_data][product_data][name]"),
            item.name.clone(),
        ));
        params.push((
            format!("{prefix}[price_data][product_data][description]"),
            item.description.clone(),
        ));
        params.push((
            format!("{prefix}[price_data][unit_amount]"),
            item.unit_amount.to_string(),
        ));
        params.push((format!("{prefix}[quantity]"), item.quantity.to_string()));
    }

    for (key, value) in &request.metadata {
        params.push((format!("metadata[{key}]"), value.clone()));
    }

    params
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_request() -> CheckoutRequest {
        CheckoutRequest {
            line_items: vec![LineItem {
                name: "KI-Karriereanalyse".to_string(),
                description: "Personalisierte Karriereberatung mit KI".to_string(),
                currency: "eur".to_string(),
                unit_amount: 499,
                quantity: 1,
            }],
            success_url: "https://example.test/success".to_string(),
            cancel_url: "https://example.test/cancel".to_string(),
            metadata: BTreeMap::from([(
                "formData".to_string(),
                r#"{"age":"17"}"#.to_string(),
            )]),
        }
    }

    fn lookup<'a>(params: &'a [(String, String)], key: &str) -> Option<&'a str> {
        params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    #[test]
    fn test_encode_checkout_form_uses_bracket_notation() {
        let params = encode_checkout_form(&sample_request());

        assert_eq!(lookup(&params, "mode"), Some("payment"));
        assert_eq!(
            lookup(&params, "line_items[0][price_data][unit_amount]"),
            Some("499")
        );
        assert_eq!(
            lookup(&params, "line_items[0][price_data][currency]"),
            Some("eur")
        );
        assert_eq!(lookup(&params, "line_items[0][quantity]"), Some("1"));
        assert_eq!(lookup(&params, "metadata[formData]"), Some(r#"{"age":"17"}"#));
    }

    #[test]
    fn test_checkout_session_deserializes_from_provider_body() {
        let body = r#"{"id": "cs_test_a1b2", "object": "checkout.session", "url": null}"#;
        let session: CheckoutSession = serde_json::from_str(body).unwrap();
        assert_eq!(session.id, "cs_test_a1b2");
        assert!(session.url.is_none());
    }

    #[test]
    fn test_api_error_displays_provider_message() {
        let err = PaymentError::Api {
            status: 401,
            message: "Invalid API Key provided".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid API Key provided");
    }
}
