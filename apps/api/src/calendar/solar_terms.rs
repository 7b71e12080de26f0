//! 24절기: the solar terms, computed from the Sun's apparent longitude.

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::calendar::astro::{
    from_julian_day, julian_day, normalize_degrees, solve_sun_longitude, sun_apparent_longitude,
    TROPICAL_YEAR,
};
use crate::calendar::timezone::to_kst;

/// Solar terms in calendar-year order, starting with 소한 in early January.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SolarTerm {
    Sohan,
    Daehan,
    Ipchun,
    Usu,
    Gyeongchip,
    Chunbun,
    Cheongmyeong,
    Gogu,
    Ipha,
    Soman,
    Mangjong,
    Haji,
    Soseo,
    Daeseo,
    Ipchu,
    Cheoseo,
    Baengno,
    Chubun,
    Hallo,
    Sanggang,
    Ipdong,
    Soseol,
    Daeseol,
    Dongji,
}

const KOREAN: [&str; 24] = [
    "소한", "대한", "입춘", "우수", "경칩", "춘분", "청명", "곡우", "입하", "소만", "망종", "하지",
    "소서", "대서", "입추", "처서", "백로", "추분", "한로", "상강", "입동", "소설", "대설", "동지",
];

const HANJA: [&str; 24] = [
    "小寒", "大寒", "立春", "雨水", "驚蟄", "春分", "淸明", "穀雨", "立夏", "小滿", "芒種", "夏至",
    "小暑", "大暑", "立秋", "處暑", "白露", "秋分", "寒露", "霜降", "立冬", "小雪", "大雪", "冬至",
];

impl SolarTerm {
    pub const ALL: [SolarTerm; 24] = [
        SolarTerm::Sohan,
        SolarTerm::Daehan,
        SolarTerm::Ipchun,
        SolarTerm::Usu,
        SolarTerm::Gyeongchip,
        SolarTerm::Chunbun,
        SolarTerm::Cheongmyeong,
        SolarTerm::Gogu,
        SolarTerm::Ipha,
        SolarTerm::Soman,
        SolarTerm::Mangjong,
        SolarTerm::Haji,
        SolarTerm::Soseo,
        SolarTerm::Daeseo,
        SolarTerm::Ipchu,
        SolarTerm::Cheoseo,
        SolarTerm::Baengno,
        SolarTerm::Chubun,
        SolarTerm::Hallo,
        SolarTerm::Sanggang,
        SolarTerm::Ipdong,
        SolarTerm::Soseol,
        SolarTerm::Daeseol,
        SolarTerm::Dongji,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn korean(self) -> &'static str {
        KOREAN[self.index()]
    }

    pub fn hanja(self) -> &'static str {
        HANJA[self.index()]
    }

    /// Ecliptic longitude of the Sun at the start of the term.
    pub fn longitude(self) -> f64 {
        ((285 + 15 * self.index()) % 360) as f64
    }

    /// 節: the twelve terms that open a saju month (입춘, 경칩, …, 소한).
    /// The remaining twelve are the principal terms (中氣).
    pub fn is_jie(self) -> bool {
        self.index() % 2 == 0
    }

    pub fn from_longitude(longitude: f64) -> SolarTerm {
        let steps = (normalize_degrees(longitude - 285.0) / 15.0).round() as usize;
        Self::ALL[steps % 24]
    }
}

/// A solar term resolved to an instant.
#[derive(Debug, Clone, Serialize)]
pub struct SolarTermInstant {
    pub term: SolarTerm,
    pub name: &'static str,
    pub hanja: &'static str,
    pub longitude: f64,
    /// Month-opening term (節) rather than a principal term (中氣).
    pub jie: bool,
    pub utc: DateTime<Utc>,
    /// Korean standard time wall clock.
    pub kst: NaiveDateTime,
}

impl SolarTermInstant {
    fn new(term: SolarTerm, utc: DateTime<Utc>) -> Self {
        Self {
            term,
            name: term.korean(),
            hanja: term.hanja(),
            longitude: term.longitude(),
            jie: term.is_jie(),
            utc,
            kst: to_kst(utc),
        }
    }
}

/// Instant the Sun enters `term` in Gregorian `year`.
pub fn term_instant(year: i32, term: SolarTerm) -> DateTime<Utc> {
    let jan6 = match Utc.with_ymd_and_hms(year, 1, 6, 0, 0, 0).single() {
        Some(t) => julian_day(t),
        None => crate::calendar::astro::J2000 + (year as f64 - 2000.0) * TROPICAL_YEAR,
    };
    let guess = jan6 + term.index() as f64 * TROPICAL_YEAR / 24.0;
    from_julian_day(solve_sun_longitude(term.longitude(), guess))
}

/// All 24 terms of Gregorian `year`, ascending.
pub fn terms_for_year(year: i32) -> Vec<SolarTermInstant> {
    SolarTerm::ALL
        .iter()
        .map(|&term| SolarTermInstant::new(term, term_instant(year, term)))
        .collect()
}

/// Number of saju months elapsed since 입춘 at `instant`: 0 = 寅 month … 11 = 丑 month.
pub fn month_offset_at(instant: DateTime<Utc>) -> usize {
    let longitude = sun_apparent_longitude(julian_day(instant));
    (normalize_degrees(longitude - 315.0) / 30.0).floor() as usize % 12
}

/// The month-opening term (節) in effect at `instant`.
pub fn previous_jie(instant: DateTime<Utc>) -> SolarTermInstant {
    let jd = julian_day(instant);
    let longitude = sun_apparent_longitude(jd);
    let elapsed = normalize_degrees(longitude - 315.0) % 30.0;
    let target = normalize_degrees(longitude - elapsed);
    let guess = jd - elapsed * TROPICAL_YEAR / 360.0;
    let term = SolarTerm::from_longitude(target);
    SolarTermInstant::new(term, from_julian_day(solve_sun_longitude(target, guess)))
}

/// The next month-opening term (節) after `instant`.
pub fn next_jie(instant: DateTime<Utc>) -> SolarTermInstant {
    let jd = julian_day(instant);
    let longitude = sun_apparent_longitude(jd);
    let remaining = 30.0 - normalize_degrees(longitude - 315.0) % 30.0;
    let target = normalize_degrees(longitude + remaining);
    let guess = jd + remaining * TROPICAL_YEAR / 360.0;
    let term = SolarTerm::from_longitude(target);
    SolarTermInstant::new(term, from_julian_day(solve_sun_longitude(target, guess)))
}
