use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::reading::cache::ReadingCache;
use crate::reading::narrator::Narrator;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// `None` without `GEMINI_API_KEY`; chat then answers 503.
    pub llm: Option<LlmClient>,
    /// Pluggable narrator. Gemini when configured, otherwise the local template.
    pub narrator: Arc<dyn Narrator>,
    pub cache: ReadingCache,
}
