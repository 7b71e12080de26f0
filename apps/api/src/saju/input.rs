//! Birth data as it arrives over the wire, and its validated form.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::calendar::lunar::{lunar_to_solar, solar_to_lunar, LunarDate};
use crate::calendar::CalendarError;
use crate::errors::AppError;

const MAX_NAME_CHARS: usize = 40;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalendarKind {
    #[default]
    Solar,
    Lunar,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn korean(self) -> &'static str {
        match self {
            Gender::Male => "남",
            Gender::Female => "여",
        }
    }
}

/// How the 子 hour (23:00–01:00) splits across midnight.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZiRule {
    /// The day pillar turns over at 23:00 (조자시 통합).
    #[default]
    Unified,
    /// 야자시: 23:00–24:00 keeps the day pillar; the hour takes the next day's stem.
    Split,
}

/// Request body shared by every endpoint that needs a chart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BirthRequest {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    #[serde(default)]
    pub hour: Option<u32>,
    #[serde(default)]
    pub minute: Option<u32>,
    #[serde(default)]
    pub calendar: CalendarKind,
    #[serde(default)]
    pub is_leap_month: bool,
    pub gender: Gender,
    /// Degrees east. When present, hour and day use local mean solar time.
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub zi_rule: ZiRule,
    #[serde(default)]
    pub name: Option<String>,
}

/// Validated birth data with both calendar representations resolved.
#[derive(Debug, Clone, Serialize)]
pub struct BirthInput {
    pub name: Option<String>,
    pub calendar: CalendarKind,
    pub solar_date: NaiveDate,
    pub lunar_date: LunarDate,
    pub time: Option<NaiveTime>,
    pub gender: Gender,
    pub longitude: Option<f64>,
    pub zi_rule: ZiRule,
}

impl BirthRequest {
    pub fn validate(&self) -> Result<BirthInput, AppError> {
        let time = match (self.hour, self.minute) {
            (None, None) => None,
            (None, Some(_)) => {
                return Err(AppError::Validation(
                    "minute was given without an hour".to_string(),
                ))
            }
            (Some(h), m) => Some(NaiveTime::from_hms_opt(h, m.unwrap_or(0), 0).ok_or_else(
                || AppError::Validation(format!("{h}:{:02} is not a valid time", m.unwrap_or(0))),
            )?),
        };

        if let Some(lon) = self.longitude {
            if !(-180.0..=180.0).contains(&lon) || lon.is_nan() {
                return Err(AppError::Validation(format!(
                    "longitude {lon} must be between -180 and 180"
                )));
            }
        }

        let name = self
            .name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(str::to_string);
        if name.as_ref().is_some_and(|n| n.chars().count() > MAX_NAME_CHARS) {
            return Err(AppError::Validation(format!(
                "name must be at most {MAX_NAME_CHARS} characters"
            )));
        }

        let (solar_date, lunar_date) = match self.calendar {
            CalendarKind::Solar => {
                if self.is_leap_month {
                    return Err(AppError::Validation(
                        "is_leap_month only applies to lunar dates".to_string(),
                    ));
                }
                let solar = NaiveDate::from_ymd_opt(self.year, self.month, self.day).ok_or_else(
                    || {
                        CalendarError::InvalidDate(format!(
                            "{}-{:02}-{:02}",
                            self.year, self.month, self.day
                        ))
                    },
                )?;
                (solar, solar_to_lunar(solar)?)
            }
            CalendarKind::Lunar => {
                let lunar = LunarDate::new(self.year, self.month, self.day, self.is_leap_month);
                (lunar_to_solar(lunar)?, lunar)
            }
        };

        Ok(BirthInput {
            name,
            calendar: self.calendar,
            solar_date,
            lunar_date,
            time,
            gender: self.gender,
            longitude: self.longitude,
            zi_rule: self.zi_rule,
        })
    }
}

#[cfg(test)]
impl BirthRequest {
    /// Solar-calendar request used across module tests.
    pub fn solar(year: i32, month: u32, day: u32, hour: Option<u32>, gender: Gender) -> Self {
        BirthRequest {
            year,
            month,
            day,
            hour,
            minute: None,
            calendar: CalendarKind::Solar,
            is_leap_month: false,
            gender,
            longitude: None,
            zi_rule: ZiRule::Unified,
            name: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(year: i32, month: u32, day: u32) -> BirthRequest {
        BirthRequest::solar(year, month, day, None, Gender::Male)
    }

    #[test]
    fn test_solar_request_resolves_lunar_date() {
        let input = request(2024, 2, 10).validate().unwrap();
        assert_eq!(input.lunar_date, LunarDate::new(2024, 1, 1, false));
        assert!(input.time.is_none());
    }

    #[test]
    fn test_lunar_request_resolves_solar_date() {
        let mut req = request(2023, 8, 15);
        req.calendar = CalendarKind::Lunar;
        let input = req.validate().unwrap();
        assert_eq!(input.solar_date, NaiveDate::from_ymd_opt(2023, 9, 29).unwrap());
    }

    #[test]
    fn test_invalid_solar_date_is_calendar_error() {
        let err = request(2023, 2, 30).validate().unwrap_err();
        assert!(matches!(err, AppError::Calendar(CalendarError::InvalidDate(_))));
    }

    #[test]
    fn test_lunar_day_thirty_is_not_rejected_as_gregorian() {
        let mut req = request(2023, 2, 30);
        req.calendar = CalendarKind::Lunar;
        // 2023 lunar month 2 has 29 or 30 days; either way the failure, if any,
        // must come from the lunar table, not Gregorian February.
        match req.validate() {
            Ok(input) => assert_eq!(input.lunar_date.day, 30),
            Err(e) => assert!(matches!(e, AppError::Calendar(CalendarError::DayOutOfRange { .. }))),
        }
    }

    #[test]
    fn test_minute_without_hour_is_rejected() {
        let mut req = request(2000, 1, 1);
        req.minute = Some(30);
        assert!(matches!(req.validate(), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_hour_out_of_range_is_rejected() {
        let mut req = request(2000, 1, 1);
        req.hour = Some(24);
        assert!(matches!(req.validate(), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_leap_flag_on_solar_is_rejected() {
        let mut req = request(2000, 1, 1);
        req.is_leap_month = true;
        assert!(matches!(req.validate(), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_blank_name_is_dropped() {
        let mut req = request(2000, 1, 1);
        req.name = Some("   ".to_string());
        assert!(req.validate().unwrap().name.is_none());
    }

    #[test]
    fn test_request_deserializes_with_defaults() {
        let json = r#"{"year": 1990, "month": 5, "day": 17, "gender": "female"}"#;
        let req: BirthRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.calendar, CalendarKind::Solar);
        assert_eq!(req.zi_rule, ZiRule::Unified);
        assert!(req.hour.is_none());
    }
}
