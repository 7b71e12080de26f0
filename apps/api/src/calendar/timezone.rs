//! Korean civil time: standard offsets, historical daylight saving, and local
//! mean solar time.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, Utc};

/// KST (UTC+9), in minutes.
pub const KST_OFFSET_MINUTES: i64 = 540;

fn at(y: i32, m: u32, d: u32, h: u32) -> Option<NaiveDateTime> {
    NaiveDate::from_ymd_opt(y, m, d).and_then(|date| date.and_hms_opt(h, 0, 0))
}

fn within(civil: NaiveDateTime, start: Option<NaiveDateTime>, end: Option<NaiveDateTime>) -> bool {
    matches!((start, end), (Some(s), Some(e)) if civil >= s && civil < e)
}

/// Standard offset in force for a civil wall-clock time. Korea kept UTC+8:30
/// from 1954-03-21 until 1961-08-10.
pub fn standard_offset_minutes(civil: NaiveDateTime) -> i64 {
    if within(civil, at(1954, 3, 21, 0), at(1961, 8, 10, 0)) {
        510
    } else {
        KST_OFFSET_MINUTES
    }
}

/// Daylight-saving shift for a civil wall-clock time (Seoul Olympics era).
/// Windows run from 02:00 on the start day to 03:00 on the end day; the
/// skipped 02:00–02:59 hour reads as daylight time.
pub fn dst_minutes(civil: NaiveDateTime) -> i64 {
    let periods = [
        (at(1987, 5, 10, 2), at(1987, 10, 11, 3)),
        (at(1988, 5, 8, 2), at(1988, 10, 9, 3)),
    ];
    if periods.iter().any(|&(s, e)| within(civil, s, e)) {
        60
    } else {
        0
    }
}

/// Converts a Korean civil wall-clock time to UTC.
pub fn to_utc(civil: NaiveDateTime) -> DateTime<Utc> {
    let offset = standard_offset_minutes(civil) + dst_minutes(civil);
    (civil - Duration::minutes(offset)).and_utc()
}

/// Wall clock with daylight saving removed.
pub fn standard_clock(civil: NaiveDateTime) -> NaiveDateTime {
    civil - Duration::minutes(dst_minutes(civil))
}

/// UTC instant rendered on the UTC+9 wall clock.
pub fn to_kst(utc: DateTime<Utc>) -> NaiveDateTime {
    utc.naive_utc() + Duration::minutes(KST_OFFSET_MINUTES)
}

/// Local mean solar time at `longitude` (degrees east): four minutes per degree.
pub fn local_mean_time(utc: DateTime<Utc>, longitude: f64) -> NaiveDateTime {
    let seconds = (longitude * 240.0).round() as i64;
    utc.naive_utc() + Duration::seconds(seconds)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Timelike};

    /// Seoul city hall.
    const SEOUL_LONGITUDE: f64 = 126.978;

    fn civil(y: i32, m: u32, d: u32, h: u32, mi: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, mi, 0)
            .unwrap()
    }

    #[test]
    fn test_modern_kst_is_utc_plus_nine() {
        let utc = to_utc(civil(2024, 2, 4, 17, 27));
        assert_eq!(utc, Utc.with_ymd_and_hms(2024, 2, 4, 8, 27, 0).unwrap());
    }

    #[test]
    fn test_1950s_offset_is_eight_thirty() {
        assert_eq!(standard_offset_minutes(civil(1958, 6, 1, 12, 0)), 510);
        assert_eq!(standard_offset_minutes(civil(1962, 6, 1, 12, 0)), 540);
    }

    #[test]
    fn test_1988_daylight_saving() {
        assert_eq!(dst_minutes(civil(1988, 7, 1, 13, 30)), 60);
        assert_eq!(dst_minutes(civil(1988, 11, 1, 13, 30)), 0);
        assert_eq!(standard_clock(civil(1988, 7, 1, 13, 30)).hour(), 12);
        let utc = to_utc(civil(1988, 7, 1, 13, 30));
        assert_eq!(utc, Utc.with_ymd_and_hms(1988, 7, 1, 3, 30, 0).unwrap());
    }

    #[test]
    fn test_daylight_saving_window_edges() {
        assert_eq!(dst_minutes(civil(1987, 5, 10, 1, 59)), 0);
        assert_eq!(dst_minutes(civil(1987, 5, 10, 2, 0)), 60);
        assert_eq!(dst_minutes(civil(1987, 10, 11, 2, 59)), 60);
        assert_eq!(dst_minutes(civil(1987, 10, 11, 3, 0)), 0);
        assert_eq!(dst_minutes(civil(1988, 5, 8, 2, 30)), 60);
    }

    #[test]
    fn test_seoul_mean_time_runs_about_half_an_hour_behind() {
        let utc = Utc.with_ymd_and_hms(2000, 1, 1, 3, 0, 0).unwrap();
        let lmt = local_mean_time(utc, SEOUL_LONGITUDE);
        let kst = to_kst(utc);
        let behind = (kst - lmt).num_minutes();
        assert_eq!(behind, 32);
    }
}
