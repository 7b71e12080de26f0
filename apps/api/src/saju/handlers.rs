//! Axum route handlers for the chart API.

use axum::{extract::State, Json};
use chrono::Datelike;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::calendar::lunar::{MAX_YEAR, MIN_YEAR};
use crate::engine::luck::{yearly_luck, YearlyLuck};
use crate::errors::AppError;
use crate::saju::chart::{build_chart, SajuChart};
use crate::saju::input::BirthRequest;
use crate::state::AppState;

const MAX_YEARLY_SPAN: i32 = 30;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct YearlyFortuneRequest {
    pub birth: BirthRequest,
    pub from_year: i32,
    pub to_year: i32,
}

#[derive(Debug, Serialize)]
pub struct YearlyFortuneResponse {
    pub day_master: String,
    pub years: Vec<YearlyLuck>,
}

/// Both ends inside the calendar's supported years, at most `MAX_YEARLY_SPAN` years.
fn check_year_range(from_year: i32, to_year: i32) -> Result<(), AppError> {
    for year in [from_year, to_year] {
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(AppError::Validation(format!(
                "year {year} is outside the supported range {MIN_YEAR}–{MAX_YEAR}"
            )));
        }
    }
    if to_year < from_year {
        return Err(AppError::Validation(
            "to_year must not be before from_year".to_string(),
        ));
    }
    if to_year - from_year >= MAX_YEARLY_SPAN {
        return Err(AppError::Validation(format!(
            "at most {MAX_YEARLY_SPAN} years can be requested at once"
        )));
    }
    Ok(())
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/saju
///
/// Computes the full chart for one birth.
pub async fn handle_saju(
    State(_state): State<AppState>,
    Json(request): Json<BirthRequest>,
) -> Result<Json<SajuChart>, AppError> {
    let input = request.validate()?;
    let chart = build_chart(&input);
    info!(
        "Computed chart for {} ({})",
        input.solar_date,
        chart.pillars.iter().map(|p| p.hanja.as_str()).collect::<Vec<_>>().join(" ")
    );
    Ok(Json(chart))
}

/// POST /api/v1/fortune/yearly
///
/// 세운 for a birth over `from_year..=to_year`.
pub async fn handle_yearly_fortune(
    State(_state): State<AppState>,
    Json(request): Json<YearlyFortuneRequest>,
) -> Result<Json<YearlyFortuneResponse>, AppError> {
    check_year_range(request.from_year, request.to_year)?;

    let input = request.birth.validate()?;
    let chart = build_chart(&input);
    let years = yearly_luck(
        &chart.four_pillars,
        input.solar_date.year(),
        request.from_year,
        request.to_year,
    );

    Ok(Json(YearlyFortuneResponse {
        day_master: chart.four_pillars.day_master().to_string(),
        years,
    }))
}
