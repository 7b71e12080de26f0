use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
/// Returns service version and which optional backends are wired up.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "saju-api",
        "narrator": state.narrator.backend(),
        "chat": state.llm.is_some(),
        "cache": state.cache.is_enabled(),
    }))
}
