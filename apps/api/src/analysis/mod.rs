// Career Analysis
// Implements: form normalization, template selection, prompt rendering,
// the session-scoped pipeline, and its result store.
// All LLM calls go through llm_client.

pub mod form;
pub mod handlers;
pub mod pipeline;
pub mod prompts;
pub mod session;
pub mod store;
pub mod template;
