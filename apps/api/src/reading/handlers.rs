use axum::{extract::State, Json};
use chrono::Utc;
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::llm_client::MODEL;
use crate::reading::chat::{build_chat_system, to_turns, ChatRequest};
use crate::reading::{image_url, Reading};
use crate::saju::chart::{build_chart, SajuChart};
use crate::saju::input::BirthRequest;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ReadingResponse {
    pub chart: SajuChart,
    pub reading: Reading,
    pub cached: bool,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub id: Uuid,
    pub reply: String,
    pub model: &'static str,
}

/// POST /api/v1/reading
///
/// Chart plus narrative reading. Served from the Redis cache when the same
/// chart was read before by the same narrator backend.
pub async fn handle_reading(
    State(state): State<AppState>,
    Json(request): Json<BirthRequest>,
) -> Result<Json<ReadingResponse>, AppError> {
    let input = request.validate()?;
    let chart = build_chart(&input);
    let cache_id = format!("{}:{}", state.narrator.backend(), chart.fingerprint());

    if let Some(reading) = state.cache.get(&cache_id).await {
        return Ok(Json(ReadingResponse {
            chart,
            reading,
            cached: true,
        }));
    }

    let text = state.narrator.narrate(&chart).await?;
    let reading = Reading {
        id: Uuid::new_v4(),
        narrator: state.narrator.backend().to_string(),
        image_url: image_url(&state.config.image_base_url, &text.image_prompt),
        text,
        generated_at: Utc::now(),
    };
    info!(
        "Reading {} generated by {} for {}",
        reading.id, reading.narrator, input.solar_date
    );

    state.cache.put(&cache_id, &reading).await;

    Ok(Json(ReadingResponse {
        chart,
        reading,
        cached: false,
    }))
}

/// POST /api/v1/chat
///
/// Answers the latest user message about the caller's chart. Needs Gemini.
pub async fn handle_chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    let llm = state.llm.as_ref().ok_or(AppError::AiUnavailable)?;

    let turns = to_turns(&request.messages)?;
    let input = request.birth.validate()?;
    let chart = build_chart(&input);

    let reply = llm
        .chat(&build_chat_system(&chart), &turns)
        .await
        .map_err(|e| AppError::Llm(e.to_string()))?;

    Ok(Json(ChatResponse {
        id: Uuid::new_v4(),
        reply: reply.trim().to_string(),
        model: MODEL,
    }))
}
