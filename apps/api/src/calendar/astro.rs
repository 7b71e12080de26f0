//! Low-precision solar and lunar ephemeris.
//!
//! Sun longitude follows Meeus, *Astronomical Algorithms* ch. 25 (about 0.01°,
//! i.e. within a quarter hour for solar terms); new moons follow ch. 49
//! without the planetary arguments (within a minute across 1900–2100).

use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Utc};

pub const J2000: f64 = 2_451_545.0;
const UNIX_EPOCH_JD: f64 = 2_440_587.5;
const MILLIS_PER_DAY: f64 = 86_400_000.0;

pub const SYNODIC_MONTH: f64 = 29.530_588_861;
pub const TROPICAL_YEAR: f64 = 365.242_189;
const NEW_MOON_EPOCH: f64 = 2_451_550.097_66;

// ────────────────────────────────────────────────────────────────────────────
// Julian day
// ────────────────────────────────────────────────────────────────────────────

pub fn julian_day(instant: DateTime<Utc>) -> f64 {
    UNIX_EPOCH_JD + instant.timestamp_millis() as f64 / MILLIS_PER_DAY
}

pub fn from_julian_day(jd: f64) -> DateTime<Utc> {
    // Millisecond resolution keeps round trips exact; i64 nanos spans 1677–2262.
    let millis = ((jd - UNIX_EPOCH_JD) * MILLIS_PER_DAY).round() as i64;
    Utc.timestamp_nanos(millis * 1_000_000)
}

/// Chronological Julian day number of a calendar date (noon-based JD rounded).
pub fn julian_day_number(date: NaiveDate) -> i64 {
    date.num_days_from_ce() as i64 + 1_721_425
}

/// ΔT = TT − UT in seconds (Espenak & Meeus polynomial fits).
pub fn delta_t(year: f64) -> f64 {
    if (1900.0..1920.0).contains(&year) {
        let t = year - 1900.0;
        -2.79 + 1.494_119 * t - 0.059_893_9 * t.powi(2) + 0.006_196_6 * t.powi(3)
            - 0.000_197 * t.powi(4)
    } else if (1920.0..1941.0).contains(&year) {
        let t = year - 1920.0;
        21.20 + 0.844_93 * t - 0.076_100 * t.powi(2) + 0.002_093_6 * t.powi(3)
    } else if (1941.0..1961.0).contains(&year) {
        let t = year - 1950.0;
        29.07 + 0.407 * t - t.powi(2) / 233.0 + t.powi(3) / 2547.0
    } else if (1961.0..1986.0).contains(&year) {
        let t = year - 1975.0;
        45.45 + 1.067 * t - t.powi(2) / 260.0 - t.powi(3) / 718.0
    } else if (1986.0..2005.0).contains(&year) {
        let t = year - 2000.0;
        63.86 + 0.3345 * t - 0.060_374 * t.powi(2)
            + 0.001_727_5 * t.powi(3)
            + 0.000_651_814 * t.powi(4)
            + 0.000_023_735_99 * t.powi(5)
    } else if (2005.0..2050.0).contains(&year) {
        let t = year - 2000.0;
        62.92 + 0.322_17 * t + 0.005_589 * t.powi(2)
    } else if (2050.0..2150.0).contains(&year) {
        let u = (year - 1820.0) / 100.0;
        -20.0 + 32.0 * u.powi(2) - 0.5628 * (2150.0 - year)
    } else {
        let u = (year - 1820.0) / 100.0;
        -20.0 + 32.0 * u.powi(2)
    }
}

fn decimal_year(jd: f64) -> f64 {
    2000.0 + (jd - J2000) / TROPICAL_YEAR
}

fn ut_to_tt(jd_ut: f64) -> f64 {
    jd_ut + delta_t(decimal_year(jd_ut)) / 86_400.0
}

fn tt_to_ut(jd_tt: f64) -> f64 {
    jd_tt - delta_t(decimal_year(jd_tt)) / 86_400.0
}

pub fn normalize_degrees(deg: f64) -> f64 {
    deg.rem_euclid(360.0)
}

/// Wraps an angle difference into [-180, 180).
fn wrap_signed(deg: f64) -> f64 {
    (deg + 180.0).rem_euclid(360.0) - 180.0
}

// ────────────────────────────────────────────────────────────────────────────
// Sun
// ────────────────────────────────────────────────────────────────────────────

/// Apparent geocentric ecliptic longitude of the Sun, degrees in [0, 360).
pub fn sun_apparent_longitude(jd_ut: f64) -> f64 {
    let t = (ut_to_tt(jd_ut) - J2000) / 36_525.0;

    let l0 = 280.466_46 + 36_000.769_83 * t + 0.000_303_2 * t * t;
    let m = (357.529_11 + 35_999.050_29 * t - 0.000_153_7 * t * t).to_radians();
    let c = (1.914_602 - 0.004_817 * t - 0.000_014 * t * t) * m.sin()
        + (0.019_993 - 0.000_101 * t) * (2.0 * m).sin()
        + 0.000_289 * (3.0 * m).sin();
    let omega = (125.04 - 1_934.136 * t).to_radians();

    normalize_degrees(l0 + c - 0.005_69 - 0.004_78 * omega.sin())
}

/// Finds the instant (JD, UT) at which the Sun reaches `target_deg`, starting
/// from a guess within a few weeks of the answer.
pub fn solve_sun_longitude(target_deg: f64, jd_guess: f64) -> f64 {
    let daily_motion = 360.0 / TROPICAL_YEAR;
    let mut jd = jd_guess;
    for _ in 0..50 {
        let diff = wrap_signed(target_deg - sun_apparent_longitude(jd));
        jd += diff / daily_motion;
        if diff.abs() < 1e-7 {
            break;
        }
    }
    jd
}

// ────────────────────────────────────────────────────────────────────────────
// Moon
// ────────────────────────────────────────────────────────────────────────────

/// Lunation number closest to (at or before) an instant; k = 0 is 2000-01-06.
pub fn approximate_lunation(jd_ut: f64) -> i64 {
    ((jd_ut - NEW_MOON_EPOCH) / SYNODIC_MONTH).floor() as i64
}

/// Instant (JD, UT) of the new moon with lunation number `k`.
pub fn new_moon(k: i64) -> f64 {
    let k = k as f64;
    let t = k / 1_236.85;
    let t2 = t * t;
    let t3 = t2 * t;
    let t4 = t3 * t;

    let jde = NEW_MOON_EPOCH + SYNODIC_MONTH * k + 0.000_154_37 * t2 - 0.000_000_150 * t3
        + 0.000_000_000_73 * t4;

    let e = 1.0 - 0.002_516 * t - 0.000_007_4 * t2;
    let m = (2.553_4 + 29.105_356_70 * k - 0.000_001_4 * t2 - 0.000_000_11 * t3).to_radians();
    let mp = (201.564_3 + 385.816_935_28 * k + 0.010_758_2 * t2 + 0.000_012_38 * t3
        - 0.000_000_058 * t4)
        .to_radians();
    let f = (160.710_8 + 390.670_502_84 * k - 0.001_611_8 * t2 - 0.000_002_27 * t3
        + 0.000_000_011 * t4)
        .to_radians();
    let omega = (124.774_6 - 1.563_755_88 * k + 0.002_067_2 * t2 + 0.000_002_15 * t3).to_radians();

    let correction = -0.407_20 * mp.sin() + 0.172_41 * e * m.sin() + 0.016_08 * (2.0 * mp).sin()
        + 0.010_39 * (2.0 * f).sin()
        + 0.007_39 * e * (mp - m).sin()
        - 0.005_14 * e * (mp + m).sin()
        + 0.002_08 * e * e * (2.0 * m).sin()
        - 0.001_11 * (mp - 2.0 * f).sin()
        - 0.000_57 * (mp + 2.0 * f).sin()
        + 0.000_56 * e * (2.0 * mp + m).sin()
        - 0.000_42 * (3.0 * mp).sin()
        + 0.000_42 * e * (m + 2.0 * f).sin()
        + 0.000_38 * e * (m - 2.0 * f).sin()
        - 0.000_24 * e * (2.0 * mp - m).sin()
        - 0.000_17 * omega.sin()
        - 0.000_07 * (mp + 2.0 * m).sin()
        + 0.000_04 * (2.0 * mp - 2.0 * f).sin()
        + 0.000_04 * (3.0 * m).sin()
        + 0.000_03 * (mp + m - 2.0 * f).sin()
        + 0.000_03 * (2.0 * mp + 2.0 * f).sin()
        - 0.000_03 * (mp + m + 2.0 * f).sin()
        + 0.000_03 * (mp - m + 2.0 * f).sin()
        - 0.000_02 * (mp - m - 2.0 * f).sin()
        - 0.000_02 * (3.0 * mp + m).sin()
        + 0.000_02 * (4.0 * mp).sin();

    tt_to_ut(jde + correction)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap()
    }

    #[test]
    fn test_julian_day_at_j2000() {
        assert!((julian_day(utc(2000, 1, 1, 12, 0)) - J2000).abs() < 1e-9);
    }

    #[test]
    fn test_julian_day_roundtrip_is_millisecond_exact() {
        let t = utc(1987, 6, 15, 3, 41);
        assert_eq!(from_julian_day(julian_day(t)), t);
    }

    #[test]
    fn test_julian_day_number_matches_known_dates() {
        assert_eq!(julian_day_number(NaiveDate::from_ymd_opt(2000, 1, 1).unwrap()), 2_451_545);
        assert_eq!(julian_day_number(NaiveDate::from_ymd_opt(1949, 10, 1).unwrap()), 2_433_191);
    }

    #[test]
    fn test_delta_t_is_about_a_minute_in_2000s() {
        let dt = delta_t(2010.0);
        assert!((60.0..75.0).contains(&dt), "ΔT was {dt}");
    }

    #[test]
    fn test_march_equinox_2024() {
        // 2024-03-20 03:06 UTC
        let jd = solve_sun_longitude(0.0, julian_day(utc(2024, 3, 15, 0, 0)));
        let expected = julian_day(utc(2024, 3, 20, 3, 6));
        let minutes = (jd - expected).abs() * 1440.0;
        assert!(minutes < 20.0, "off by {minutes} minutes");
    }

    #[test]
    fn test_new_moon_2024_total_eclipse() {
        // 2024-04-08 18:21 UTC
        let target = julian_day(utc(2024, 4, 8, 18, 21));
        let jd = new_moon(approximate_lunation(target + 1.0));
        let minutes = (jd - target).abs() * 1440.0;
        assert!(minutes < 10.0, "off by {minutes} minutes");
    }

    #[test]
    fn test_wrap_signed() {
        assert!((wrap_signed(350.0) + 10.0).abs() < 1e-9);
        assert!((wrap_signed(-350.0) - 10.0).abs() < 1e-9);
    }
}
