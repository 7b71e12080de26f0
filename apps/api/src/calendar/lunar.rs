//! Korean lunisolar calendar (음력), built from new moons and principal terms
//! on the UTC+9 meridian.
//!
//! Rules:
//! - a month starts on the KST date of the new moon
//! - the month containing the winter solstice is month 11
//! - a sui (solstice to solstice) of 13 months gets one leap month: the first
//!   month holding no principal term (中氣), numbered after its predecessor

use chrono::{Datelike, Duration, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calendar::astro::{
    approximate_lunation, from_julian_day, julian_day, new_moon, solve_sun_longitude,
};
use crate::calendar::timezone::to_kst;
use crate::calendar::CalendarError;

pub const MIN_YEAR: i32 = 1900;
pub const MAX_YEAR: i32 = 2100;

/// A date on the Korean lunar calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LunarDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub is_leap: bool,
}

impl LunarDate {
    pub fn new(year: i32, month: u32, day: u32, is_leap: bool) -> Self {
        Self {
            year,
            month,
            day,
            is_leap,
        }
    }

    /// e.g. "2023년 윤2월 1일"
    pub fn korean(&self) -> String {
        format!(
            "{}년 {}{}월 {}일",
            self.year,
            if self.is_leap { "윤" } else { "" },
            self.month,
            self.day
        )
    }
}

#[derive(Debug, Clone, Copy)]
struct LunarMonth {
    year: i32,
    month: u32,
    is_leap: bool,
    start: NaiveDate,
    days: u32,
}

fn kst_date(jd_ut: f64) -> NaiveDate {
    to_kst(from_julian_day(jd_ut)).date()
}

fn winter_solstice(year: i32) -> f64 {
    let guess = Utc
        .with_ymd_and_hms(year, 12, 21, 0, 0, 0)
        .single()
        .map(julian_day)
        .unwrap_or_else(|| crate::calendar::astro::J2000 + (year - 2000) as f64 * 365.2422);
    solve_sun_longitude(270.0, guess)
}

/// Lunation whose KST start date is on or before the KST date of `jd_ut`.
fn lunation_containing(jd_ut: f64) -> i64 {
    let day = kst_date(jd_ut);
    let mut k = approximate_lunation(jd_ut);
    while kst_date(new_moon(k)) > day {
        k -= 1;
    }
    while kst_date(new_moon(k + 1)) <= day {
        k += 1;
    }
    k
}

/// Months from month 11 of `year - 1` up to, not including, month 11 of `year`.
fn sui_months(year: i32) -> Vec<LunarMonth> {
    let solstice_start = winter_solstice(year - 1);
    let solstice_end = winter_solstice(year);
    let first = lunation_containing(solstice_start);
    let last = lunation_containing(solstice_end);

    let starts: Vec<NaiveDate> = (first..=last).map(|k| kst_date(new_moon(k))).collect();
    let count = starts.len() - 1;

    // Principal terms at 270°, 300°, … , 240°, then the closing solstice.
    let principal_terms: Vec<NaiveDate> = (0..=12)
        .map(|i| {
            let target = ((270 + 30 * i) % 360) as f64;
            let guess = solstice_start + i as f64 * 30.436_875;
            kst_date(solve_sun_longitude(target, guess))
        })
        .collect();

    let leap_index = if count == 13 {
        (0..count).find(|&i| {
            !principal_terms
                .iter()
                .any(|&t| t >= starts[i] && t < starts[i + 1])
        })
    } else {
        None
    };

    let mut months = Vec::with_capacity(count);
    let mut number = 10u32;
    let mut lunar_year = year - 1;
    for i in 0..count {
        let is_leap = leap_index == Some(i);
        if !is_leap {
            number = number % 12 + 1;
            if number == 1 {
                lunar_year = year;
            }
        }
        months.push(LunarMonth {
            year: lunar_year,
            month: number,
            is_leap,
            start: starts[i],
            days: (starts[i + 1] - starts[i]).num_days() as u32,
        });
    }

    if let Some(i) = leap_index {
        debug!("Lunar sui {year}: leap month after month {}", months[i].month);
    }
    months
}

/// Months that can hold dates of Gregorian `year` and of lunar `year`.
fn months_around(year: i32) -> Vec<LunarMonth> {
    let mut months = sui_months(year);
    months.extend(sui_months(year + 1));
    months
}

fn check_solar_range(date: NaiveDate) -> Result<(), CalendarError> {
    let min = NaiveDate::from_ymd_opt(MIN_YEAR, 1, 31);
    let max = NaiveDate::from_ymd_opt(MAX_YEAR, 12, 31);
    match (min, max) {
        (Some(min), Some(max)) if date >= min && date <= max => Ok(()),
        _ => Err(CalendarError::OutOfRange {
            min: MIN_YEAR,
            max: MAX_YEAR,
        }),
    }
}

/// Gregorian → Korean lunar.
pub fn solar_to_lunar(date: NaiveDate) -> Result<LunarDate, CalendarError> {
    check_solar_range(date)?;
    let month = months_around(date.year())
        .into_iter()
        .filter(|m| m.start <= date)
        .last()
        .ok_or_else(|| CalendarError::InvalidDate(date.to_string()))?;

    Ok(LunarDate {
        year: month.year,
        month: month.month,
        day: (date - month.start).num_days() as u32 + 1,
        is_leap: month.is_leap,
    })
}

fn find_month(year: i32, month: u32, is_leap: bool) -> Result<LunarMonth, CalendarError> {
    if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
        return Err(CalendarError::OutOfRange {
            min: MIN_YEAR,
            max: MAX_YEAR,
        });
    }
    if !(1..=12).contains(&month) {
        return Err(CalendarError::InvalidDate(format!(
            "lunar month {month} is not between 1 and 12"
        )));
    }
    months_around(year)
        .into_iter()
        .find(|m| m.year == year && m.month == month && m.is_leap == is_leap)
        .ok_or_else(|| {
            if is_leap {
                CalendarError::NoSuchLeapMonth { year, month }
            } else {
                CalendarError::InvalidDate(format!("lunar {year}-{month} was not found"))
            }
        })
}

/// Korean lunar → Gregorian.
pub fn lunar_to_solar(date: LunarDate) -> Result<NaiveDate, CalendarError> {
    let month = find_month(date.year, date.month, date.is_leap)?;
    if date.day == 0 || date.day > month.days {
        return Err(CalendarError::DayOutOfRange {
            day: date.day,
            days_in_month: month.days,
        });
    }
    Ok(month.start + Duration::days(date.day as i64 - 1))
}

/// 29 or 30.
pub fn month_length(year: i32, month: u32, is_leap: bool) -> Result<u32, CalendarError> {
    find_month(year, month, is_leap).map(|m| m.days)
}

/// The leap month of lunar `year`, if it has one.
pub fn leap_month(year: i32) -> Option<u32> {
    months_around(year)
        .into_iter()
        .find(|m| m.year == year && m.is_leap)
        .map(|m| m.month)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_seollal_dates() {
        assert_eq!(solar_to_lunar(ymd(2023, 1, 22)).unwrap(), LunarDate::new(2023, 1, 1, false));
        assert_eq!(solar_to_lunar(ymd(2024, 2, 10)).unwrap(), LunarDate::new(2024, 1, 1, false));
        assert_eq!(solar_to_lunar(ymd(2025, 1, 29)).unwrap(), LunarDate::new(2025, 1, 1, false));
    }

    #[test]
    fn test_day_before_seollal_is_last_day_of_month_12() {
        let lunar = solar_to_lunar(ymd(2024, 2, 9)).unwrap();
        assert_eq!(lunar.year, 2023);
        assert_eq!(lunar.month, 12);
        assert!(lunar.day == 29 || lunar.day == 30);
    }

    #[test]
    fn test_chuseok_2023() {
        let solar = lunar_to_solar(LunarDate::new(2023, 8, 15, false)).unwrap();
        assert_eq!(solar, ymd(2023, 9, 29));
    }

    #[test]
    fn test_leap_months() {
        assert_eq!(leap_month(2023), Some(2));
        assert_eq!(leap_month(2020), Some(4));
        assert_eq!(leap_month(2024), None);
    }

    #[test]
    fn test_leap_second_month_2023() {
        let solar = lunar_to_solar(LunarDate::new(2023, 2, 1, true)).unwrap();
        assert_eq!(solar, ymd(2023, 3, 22));
        let back = solar_to_lunar(solar).unwrap();
        assert!(back.is_leap);
        assert_eq!(back.month, 2);
    }

    #[test]
    fn test_first_supported_day() {
        assert_eq!(solar_to_lunar(ymd(1900, 1, 31)).unwrap(), LunarDate::new(1900, 1, 1, false));
    }

    #[test]
    fn test_missing_leap_month_is_error() {
        let err = lunar_to_solar(LunarDate::new(2024, 3, 1, true)).unwrap_err();
        assert!(matches!(err, CalendarError::NoSuchLeapMonth { year: 2024, month: 3 }));
    }

    #[test]
    fn test_day_beyond_month_length_is_error() {
        let err = lunar_to_solar(LunarDate::new(2024, 1, 31, false)).unwrap_err();
        assert!(matches!(err, CalendarError::DayOutOfRange { day: 31, .. }));
    }

    #[test]
    fn test_out_of_range() {
        assert!(solar_to_lunar(ymd(1850, 1, 1)).is_err());
        assert!(lunar_to_solar(LunarDate::new(2150, 1, 1, false)).is_err());
    }

    #[test]
    fn test_month_lengths_are_29_or_30() {
        for month in 1..=12 {
            let days = month_length(2024, month, false).unwrap();
            assert!(days == 29 || days == 30, "month {month} had {days} days");
        }
    }

    #[test]
    fn test_korean_label() {
        assert_eq!(LunarDate::new(2023, 2, 1, true).korean(), "2023년 윤2월 1일");
    }
}
