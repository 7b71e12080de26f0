//! Four Pillars (사주팔자) from a validated birth input.
//!
//! - year: turns over at 입춘, so January births usually belong to the previous year
//! - month: the 節 in effect picks the branch; 五虎遁 picks the stem from the year stem
//! - day: sexagenary count from the Julian day number
//! - hour: two-hour blocks (子 = 23:00–00:59); 五鼠遁 picks the stem from the day stem

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::calendar::astro::julian_day_number;
use crate::calendar::solar_terms::month_offset_at;
use crate::calendar::timezone::{local_mean_time, standard_clock, to_kst, to_utc};
use crate::saju::ganji::{Branch, Pillar, Stem, Symbol};
use crate::saju::input::{BirthInput, ZiRule};

// ────────────────────────────────────────────────────────────────────────────
// Positions
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Slot {
    Year,
    Month,
    Day,
    Hour,
}

impl Slot {
    pub const ALL: [Slot; 4] = [Slot::Year, Slot::Month, Slot::Day, Slot::Hour];

    pub fn korean(self) -> &'static str {
        match self {
            Slot::Year => "년주",
            Slot::Month => "월주",
            Slot::Day => "일주",
            Slot::Hour => "시주",
        }
    }
}

/// One of the eight characters on a chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Position {
    YearStem,
    YearBranch,
    MonthStem,
    MonthBranch,
    DayStem,
    DayBranch,
    HourStem,
    HourBranch,
}

impl Position {
    pub fn stem_of(slot: Slot) -> Position {
        match slot {
            Slot::Year => Position::YearStem,
            Slot::Month => Position::MonthStem,
            Slot::Day => Position::DayStem,
            Slot::Hour => Position::HourStem,
        }
    }

    pub fn branch_of(slot: Slot) -> Position {
        match slot {
            Slot::Year => Position::YearBranch,
            Slot::Month => Position::MonthBranch,
            Slot::Day => Position::DayBranch,
            Slot::Hour => Position::HourBranch,
        }
    }

    pub fn slot(self) -> Slot {
        match self {
            Position::YearStem | Position::YearBranch => Slot::Year,
            Position::MonthStem | Position::MonthBranch => Slot::Month,
            Position::DayStem | Position::DayBranch => Slot::Day,
            Position::HourStem | Position::HourBranch => Slot::Hour,
        }
    }

    pub fn korean(self) -> &'static str {
        match self {
            Position::YearStem => "년간",
            Position::YearBranch => "년지",
            Position::MonthStem => "월간",
            Position::MonthBranch => "월지",
            Position::DayStem => "일간",
            Position::DayBranch => "일지",
            Position::HourStem => "시간",
            Position::HourBranch => "시지",
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Four pillars
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FourPillars {
    pub year: Pillar,
    pub month: Pillar,
    pub day: Pillar,
    /// Absent when the birth time is unknown.
    pub hour: Option<Pillar>,
}

impl FourPillars {
    /// 일간.
    pub fn day_master(&self) -> Stem {
        self.day.stem
    }

    pub fn pillar(&self, slot: Slot) -> Option<Pillar> {
        match slot {
            Slot::Year => Some(self.year),
            Slot::Month => Some(self.month),
            Slot::Day => Some(self.day),
            Slot::Hour => self.hour,
        }
    }

    pub fn pillars(&self) -> Vec<(Slot, Pillar)> {
        Slot::ALL
            .iter()
            .filter_map(|&slot| self.pillar(slot).map(|p| (slot, p)))
            .collect()
    }

    pub fn stems(&self) -> Vec<(Position, Stem)> {
        self.pillars()
            .into_iter()
            .map(|(slot, p)| (Position::stem_of(slot), p.stem))
            .collect()
    }

    pub fn branches(&self) -> Vec<(Position, Branch)> {
        self.pillars()
            .into_iter()
            .map(|(slot, p)| (Position::branch_of(slot), p.branch))
            .collect()
    }

    /// Every character on the chart, year stem first.
    pub fn characters(&self) -> Vec<(Position, Symbol)> {
        self.pillars()
            .into_iter()
            .flat_map(|(slot, p)| {
                [
                    (Position::stem_of(slot), Symbol::Stem(p.stem)),
                    (Position::branch_of(slot), Symbol::Branch(p.branch)),
                ]
            })
            .collect()
    }

    pub fn symbol_at(&self, position: Position) -> Option<Symbol> {
        let pillar = self.pillar(position.slot())?;
        Some(match position {
            Position::YearStem | Position::MonthStem | Position::DayStem | Position::HourStem => {
                Symbol::Stem(pillar.stem)
            }
            _ => Symbol::Branch(pillar.branch),
        })
    }
}

/// Pillars plus the resolved instants they were computed from.
#[derive(Debug, Clone)]
pub struct PillarComputation {
    pub pillars: FourPillars,
    pub birth_utc: DateTime<Utc>,
    /// Clock used for day and hour: standard time, or local mean time when a
    /// longitude was supplied. `None` when the birth time is unknown.
    pub solar_time: Option<NaiveDateTime>,
    pub saju_year: i32,
}

pub fn year_pillar(saju_year: i32) -> Pillar {
    Pillar::from_cycle(saju_year as i64 - 4)
}

/// 五虎遁: 甲己 years open with 丙寅, 乙庚 with 戊寅, and so on.
pub fn month_pillar(year_stem: Stem, month_offset: usize) -> Pillar {
    let first_stem = (year_stem.index() % 5) * 2 + 2;
    Pillar {
        stem: Stem::from_index(first_stem + month_offset),
        branch: Branch::In.offset(month_offset as i64),
    }
}

pub fn day_pillar(date: NaiveDate) -> Pillar {
    Pillar::from_cycle(julian_day_number(date) + 49)
}

pub fn hour_branch(time: NaiveTime) -> Branch {
    let minutes = time.hour() * 60 + time.minute();
    Branch::from_index(((minutes + 60) / 120) as usize)
}

/// 五鼠遁: 甲己 days open with 甲子, 乙庚 with 丙子, and so on.
pub fn hour_pillar(day_stem: Stem, branch: Branch) -> Pillar {
    let first_stem = (day_stem.index() % 5) * 2;
    Pillar {
        stem: Stem::from_index(first_stem + branch.index()),
        branch,
    }
}

/// Computes the four pillars for a validated birth.
pub fn compute_pillars(input: &BirthInput) -> PillarComputation {
    // Unknown time: place year/month at local noon.
    let civil = input
        .solar_date
        .and_time(input.time.unwrap_or_else(|| NaiveTime::from_hms_opt(12, 0, 0).unwrap_or_default()));
    let birth_utc = to_utc(civil);

    let month_offset = month_offset_at(birth_utc);
    let kst = to_kst(birth_utc);
    // 子 and 丑 months in January/February still belong to the previous saju year.
    let saju_year = if kst.month() <= 2 && month_offset >= 10 {
        kst.year() - 1
    } else {
        kst.year()
    };

    let year = year_pillar(saju_year);
    let month = month_pillar(year.stem, month_offset);

    let solar_time = input.time.map(|_| match input.longitude {
        Some(lon) => local_mean_time(birth_utc, lon),
        None => standard_clock(civil),
    });

    let (day, hour) = match solar_time {
        None => (day_pillar(input.solar_date), None),
        Some(clock) => {
            let late_zi = clock.hour() == 23;
            let day_date = if late_zi && input.zi_rule == ZiRule::Unified {
                clock.date() + Duration::days(1)
            } else {
                clock.date()
            };
            let day = day_pillar(day_date);
            let stem_source = if late_zi && input.zi_rule == ZiRule::Split {
                day.stem.offset(1)
            } else {
                day.stem
            };
            (day, Some(hour_pillar(stem_source, hour_branch(clock.time()))))
        }
    };

    PillarComputation {
        pillars: FourPillars {
            year,
            month,
            day,
            hour,
        },
        birth_utc,
        solar_time,
        saju_year,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use crate::saju::input::{BirthRequest, Gender};

    fn pillars_for(req: BirthRequest) -> FourPillars {
        compute_pillars(&req.validate().unwrap()).pillars
    }

    fn hanja(p: Option<Pillar>) -> String {
        p.map(|p| p.hanja()).unwrap_or_default()
    }

    #[test]
    fn test_day_pillar_anchors() {
        assert_eq!(day_pillar(NaiveDate::from_ymd_opt(2000, 1, 1).unwrap()).hanja(), "戊午");
        assert_eq!(day_pillar(NaiveDate::from_ymd_opt(1900, 1, 1).unwrap()).hanja(), "甲戌");
    }

    #[test]
    fn test_full_chart_1949_10_01() {
        // 己丑年 癸酉月 甲子日 壬申時
        let p = pillars_for(BirthRequest::solar(1949, 10, 1, Some(15), Gender::Male));
        assert_eq!(p.year.hanja(), "己丑");
        assert_eq!(p.month.hanja(), "癸酉");
        assert_eq!(p.day.hanja(), "甲子");
        assert_eq!(hanja(p.hour), "壬申");
        assert_eq!(p.day_master(), Stem::Gap);
    }

    #[test]
    fn test_year_turns_at_ipchun_not_january() {
        // 입춘 2024 falls at 17:27 KST on Feb 4.
        let before = pillars_for(BirthRequest::solar(2024, 2, 4, Some(12), Gender::Female));
        assert_eq!(before.year.hanja(), "癸卯");
        assert_eq!(before.month.hanja(), "乙丑");

        let after = pillars_for(BirthRequest::solar(2024, 2, 4, Some(20), Gender::Female));
        assert_eq!(after.year.hanja(), "甲辰");
        assert_eq!(after.month.hanja(), "丙寅");
    }

    #[test]
    fn test_january_birth_uses_previous_year() {
        let p = pillars_for(BirthRequest::solar(2024, 1, 15, Some(9), Gender::Male));
        assert_eq!(p.year.hanja(), "癸卯");
        assert_eq!(p.month.branch, Branch::Chuk);
    }

    #[test]
    fn test_unknown_time_has_no_hour_pillar() {
        let p = pillars_for(BirthRequest::solar(1990, 6, 15, None, Gender::Male));
        assert!(p.hour.is_none());
        assert_eq!(p.characters().len(), 6);
    }

    #[test]
    fn test_late_zi_unified_advances_day() {
        let mut req = BirthRequest::solar(1949, 10, 1, Some(23), Gender::Male);
        req.minute = Some(30);
        let p = pillars_for(req);
        assert_eq!(p.day.hanja(), "乙丑");
        assert_eq!(hanja(p.hour), "丙子");
    }

    #[test]
    fn test_late_zi_split_keeps_day_and_borrows_next_stem() {
        let mut req = BirthRequest::solar(1949, 10, 1, Some(23), Gender::Male);
        req.minute = Some(30);
        req.zi_rule = ZiRule::Split;
        let p = pillars_for(req);
        assert_eq!(p.day.hanja(), "甲子");
        assert_eq!(hanja(p.hour), "丙子");
    }

    #[test]
    fn test_longitude_correction_moves_early_birth_into_previous_day() {
        // 00:10 KST at 127°E is 23:38 local mean time on Dec 31.
        let mut req = BirthRequest::solar(2000, 1, 1, Some(0), Gender::Male);
        req.minute = Some(10);
        req.longitude = Some(127.0);
        req.zi_rule = ZiRule::Split;
        let p = pillars_for(req);
        assert_eq!(p.day.hanja(), "丁巳");
        assert_eq!(hanja(p.hour), "壬子");
    }

    #[test]
    fn test_1950s_births_use_eight_thirty_offset() {
        let mut req = BirthRequest::solar(1958, 6, 1, Some(13), Gender::Female);
        req.minute = Some(10);
        let computed = compute_pillars(&req.validate().unwrap());
        assert_eq!(
            computed.birth_utc,
            Utc.with_ymd_and_hms(1958, 6, 1, 4, 40, 0).unwrap()
        );

        // At 127.5°E local mean time equals the UTC+8:30 clock: 13:10 is 未.
        // Under UTC+9 it would read 12:40, a 午 hour.
        req.longitude = Some(127.5);
        let computed = compute_pillars(&req.validate().unwrap());
        assert_eq!(
            computed.solar_time.map(|t| t.format("%H:%M").to_string()),
            Some("13:10".to_string())
        );
        assert_eq!(computed.pillars.hour.map(|h| h.branch), Some(Branch::Mi));
    }

    #[test]
    fn test_daylight_saving_is_removed() {
        // 13:30 on the 1987 DST clock is 12:30 standard time → 午 hour.
        let mut req = BirthRequest::solar(1987, 7, 1, Some(13), Gender::Male);
        req.minute = Some(30);
        let p = pillars_for(req);
        assert_eq!(p.hour.map(|h| h.branch), Some(Branch::O));
    }

    #[test]
    fn test_hour_branch_boundaries() {
        let t = |h, m| NaiveTime::from_hms_opt(h, m, 0).unwrap();
        assert_eq!(hour_branch(t(23, 0)), Branch::Ja);
        assert_eq!(hour_branch(t(0, 59)), Branch::Ja);
        assert_eq!(hour_branch(t(1, 0)), Branch::Chuk);
        assert_eq!(hour_branch(t(11, 30)), Branch::O);
        assert_eq!(hour_branch(t(22, 59)), Branch::Hae);
    }

    #[test]
    fn test_month_and_hour_stem_rules() {
        assert_eq!(month_pillar(Stem::Gap, 0).hanja(), "丙寅");
        assert_eq!(month_pillar(Stem::Mu, 0).hanja(), "甲寅");
        assert_eq!(hour_pillar(Stem::Gap, Branch::Ja).hanja(), "甲子");
        assert_eq!(hour_pillar(Stem::Mu, Branch::Ja).hanja(), "壬子");
    }

    #[test]
    fn test_symbol_at_reads_hour_as_none_when_unknown() {
        let p = pillars_for(BirthRequest::solar(1990, 6, 15, None, Gender::Male));
        assert!(p.symbol_at(Position::HourStem).is_none());
        assert_eq!(p.symbol_at(Position::DayStem), Some(Symbol::Stem(p.day.stem)));
    }
}
