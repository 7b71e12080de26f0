use axum::{
    extract::{Path, State},
    Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calendar::lunar::{
    leap_month, lunar_to_solar, month_length, solar_to_lunar, LunarDate, MAX_YEAR, MIN_YEAR,
};
use crate::calendar::solar_terms::{terms_for_year, SolarTermInstant};
use crate::calendar::CalendarError;
use crate::errors::AppError;
use crate::saju::input::CalendarKind;
use crate::saju::pillars::day_pillar;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ConvertRequest {
    /// Calendar the given date is expressed in.
    #[serde(default)]
    pub calendar: CalendarKind,
    pub year: i32,
    pub month: u32,
    pub day: u32,
    #[serde(default)]
    pub is_leap_month: bool,
}

#[derive(Debug, Serialize)]
pub struct ConvertResponse {
    pub solar: NaiveDate,
    pub lunar: LunarDate,
    pub lunar_label: String,
    pub lunar_month_days: u32,
    /// Leap month of the lunar year, if any.
    pub leap_month: Option<u32>,
    pub day_pillar: String,
}

#[derive(Debug, Serialize)]
pub struct SolarTermsResponse {
    pub year: i32,
    pub terms: Vec<SolarTermInstant>,
}

pub fn convert(request: &ConvertRequest) -> Result<ConvertResponse, CalendarError> {
    let (solar, lunar) = match request.calendar {
        CalendarKind::Solar => {
            let solar = NaiveDate::from_ymd_opt(request.year, request.month, request.day)
                .ok_or_else(|| {
                    CalendarError::InvalidDate(format!(
                        "{}-{:02}-{:02}",
                        request.year, request.month, request.day
                    ))
                })?;
            (solar, solar_to_lunar(solar)?)
        }
        CalendarKind::Lunar => {
            let lunar = LunarDate::new(request.year, request.month, request.day, request.is_leap_month);
            (lunar_to_solar(lunar)?, lunar)
        }
    };

    Ok(ConvertResponse {
        solar,
        lunar,
        lunar_label: lunar.korean(),
        lunar_month_days: month_length(lunar.year, lunar.month, lunar.is_leap)?,
        leap_month: leap_month(lunar.year),
        day_pillar: day_pillar(solar).to_string(),
    })
}

/// POST /api/v1/calendar/convert
pub async fn handle_convert(
    State(_state): State<AppState>,
    Json(request): Json<ConvertRequest>,
) -> Result<Json<ConvertResponse>, AppError> {
    Ok(Json(convert(&request)?))
}

/// GET /api/v1/calendar/solar-terms/:year
pub async fn handle_solar_terms(
    State(_state): State<AppState>,
    Path(year): Path<i32>,
) -> Result<Json<SolarTermsResponse>, AppError> {
    if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
        return Err(CalendarError::OutOfRange {
            min: MIN_YEAR,
            max: MAX_YEAR,
        }
        .into());
    }
    Ok(Json(SolarTermsResponse {
        year,
        terms: terms_for_year(year),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(calendar: CalendarKind, y: i32, m: u32, d: u32, leap: bool) -> ConvertRequest {
        ConvertRequest {
            calendar,
            year: y,
            month: m,
            day: d,
            is_leap_month: leap,
        }
    }

    #[test]
    fn test_solar_to_lunar_seollal() {
        let res = convert(&request(CalendarKind::Solar, 2024, 2, 10, false)).unwrap();
        assert_eq!(res.lunar, LunarDate::new(2024, 1, 1, false));
        assert_eq!(res.lunar_label, "2024년 1월 1일");
        assert_eq!(res.day_pillar, "갑진(甲辰)");
    }

    #[test]
    fn test_lunar_to_solar_round_trip() {
        let res = convert(&request(CalendarKind::Lunar, 2023, 1, 1, false)).unwrap();
        assert_eq!(res.solar, NaiveDate::from_ymd_opt(2023, 1, 22).unwrap());
        assert_eq!(res.leap_month, Some(2));
    }

    #[test]
    fn test_missing_leap_month_is_rejected() {
        let err = convert(&request(CalendarKind::Lunar, 2024, 3, 1, true)).unwrap_err();
        assert!(matches!(err, CalendarError::NoSuchLeapMonth { .. }));
    }

    #[test]
    fn test_invalid_solar_date() {
        let err = convert(&request(CalendarKind::Solar, 2023, 2, 30, false)).unwrap_err();
        assert!(matches!(err, CalendarError::InvalidDate(_)));
    }
}
