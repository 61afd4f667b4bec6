use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub openai_api_key: String,
    pub stripe_secret_key: String,
    pub success_url: String,
    pub cancel_url: String,
    pub port: u16,
    pub rust_log: String,
    pub analysis_model: String,
    pub chat_model: String,
    pub analysis_max_tokens: u32,
    pub chat_max_tokens: u32,
    /// Checkout price in minor units (cents).
    pub price_cents: i64,
    pub currency: String,
    pub static_dir: String,
    /// Result retention in seconds. 0 keeps results for the process lifetime.
    pub result_ttl_secs: u64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            openai_api_key: require_env("OPENAI_API_KEY")?,
            stripe_secret_key: require_env("STRIPE_SECRET_KEY")?,
            success_url: require_env("SUCCESS_URL")?,
            cancel_url: require_env("CANCEL_URL")?,
            port: parse_env("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            analysis_model: std::env::var("ANALYSIS_MODEL")
                .unwrap_or_else(|_| "gpt-4o".to_string()),
            chat_model: std::env::var("CHAT_MODEL").unwrap_or_else(|_| "gpt-4o-mini".to_string()),
            analysis_max_tokens: parse_env("ANALYSIS_MAX_TOKENS", 4000)?,
            chat_max_tokens: parse_env("CHAT_MAX_TOKENS", 500)?,
            price_cents: parse_env("PRICE_CENTS", 499)?,
            currency: std::env::var("CURRENCY").unwrap_or_else(|_| "eur".to_string()),
            static_dir: std::env::var("STATIC_DIR").unwrap_or_else(|_| "public".to_string()),
            result_ttl_secs: parse_env("RESULT_TTL_SECS", 86_400)?,
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
impl Config {
    /// Fixed configuration for handler tests; never touches the environment.
    pub fn for_tests() -> Self {
        Config {
            openai_api_key: "sk-test".to_string(),
            stripe_secret_key: "sk_test_stripe".to_string(),
            success_url: "https://example.test/success".to_string(),
            cancel_url: "https://example.test/cancel".to_string(),
            port: 0,
            rust_log: "debug".to_string(),
            analysis_model: "gpt-4o".to_string(),
            chat_model: "gpt-4o-mini".to_string(),
            analysis_max_tokens: 4000,
            chat_max_tokens: 500,
            price_cents: 499,
            currency: "eur".to_string(),
            static_dir: "public".to_string(),
            result_ttl_secs: 0,
        }
    }
}
