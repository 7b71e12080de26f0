// Calendar layer: astronomical solar terms, Korean civil time and the lunar calendar.
// Everything downstream (pillars, luck cycles) reads time through this module.

pub mod astro;
pub mod handlers;
pub mod lunar;
pub mod solar_terms;
pub mod timezone;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CalendarError {
    #[error("Date outside the supported range {min}–{max}")]
    OutOfRange { min: i32, max: i32 },

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Lunar year {year} has no leap month {month}")]
    NoSuchLeapMonth { year: i32, month: u32 },

    #[error("Day {day} exceeds the {days_in_month} days of this lunar month")]
    DayOutOfRange { day: u32, days_in_month: u32 },
}
