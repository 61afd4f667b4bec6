use std::sync::Arc;

use crate::analysis::pipeline::AnalysisPipeline;
use crate::analysis::store::ResultStore;
use crate::config::Config;
use crate::llm_client::TextGenerator;
use crate::payments::PaymentProvider;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Text generator shared by the analysis pipeline and the follow-up chat.
    pub llm: Arc<dyn TextGenerator>,
    pub payments: Arc<dyn PaymentProvider>,
    /// Session id → finished analysis. Written by the pipeline, read by the poller.
    pub store: Arc<dyn ResultStore>,
    pub pipeline: AnalysisPipeline,
}
