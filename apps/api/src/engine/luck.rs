//! 대운 (ten-year luck) and 세운 (yearly luck).

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

use crate::calendar::solar_terms::{next_jie, previous_jie};
use crate::calendar::timezone::to_kst;
use crate::engine::sipsin::{branch_ten_god, ten_god, TenGod};
use crate::engine::unseong::{twelve_stage, TwelveStage};
use crate::saju::ganji::{Pillar, Polarity, Stem};
use crate::saju::input::Gender;
use crate::saju::pillars::{year_pillar, FourPillars};

pub const PERIOD_COUNT: usize = 10;
const PERIOD_YEARS: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LuckDirection {
    Forward,
    Backward,
}

#[derive(Debug, Clone, Serialize)]
pub struct LuckPeriod {
    pub start_age: u32,
    pub end_age: u32,
    pub start_year: i32,
    pub pillar: Pillar,
    pub label: String,
    pub stem_ten_god: TenGod,
    pub branch_ten_god: TenGod,
    pub stage: TwelveStage,
}

#[derive(Debug, Clone, Serialize)]
pub struct LuckCycle {
    pub direction: LuckDirection,
    pub start_age: u32,
    /// Days between birth and the governing 節.
    pub days_to_term: f64,
    pub periods: Vec<LuckPeriod>,
}

#[derive(Debug, Clone, Serialize)]
pub struct YearlyLuck {
    pub year: i32,
    pub age: i32,
    pub pillar: Pillar,
    pub label: String,
    pub stem_ten_god: TenGod,
    pub branch_ten_god: TenGod,
    pub stage: TwelveStage,
}

pub fn direction(year_stem: Stem, gender: Gender) -> LuckDirection {
    match (year_stem.polarity(), gender) {
        (Polarity::Yang, Gender::Male) | (Polarity::Yin, Gender::Female) => LuckDirection::Forward,
        _ => LuckDirection::Backward,
    }
}

/// Three days to the term count as one year of age.
pub fn start_age(days_to_term: f64) -> u32 {
    ((days_to_term / 3.0).round() as i64).clamp(1, 10) as u32
}

pub fn luck_cycle(chart: &FourPillars, gender: Gender, birth_utc: DateTime<Utc>) -> LuckCycle {
    let direction = direction(chart.year.stem, gender);
    let term = match direction {
        LuckDirection::Forward => next_jie(birth_utc),
        LuckDirection::Backward => previous_jie(birth_utc),
    };
    let days_to_term = (term.utc - birth_utc).num_seconds().abs() as f64 / 86_400.0;
    let first_age = start_age(days_to_term);
    let birth_year = to_kst(birth_utc).year();
    let day_master = chart.day_master();
    let step = match direction {
        LuckDirection::Forward => 1,
        LuckDirection::Backward => -1,
    };

    let periods = (1..=PERIOD_COUNT as i64)
        .map(|i| {
            let pillar = chart.month.offset(step * i);
            let start_age = first_age + (i as u32 - 1) * PERIOD_YEARS;
            LuckPeriod {
                start_age,
                end_age: start_age + PERIOD_YEARS - 1,
                start_year: birth_year + start_age as i32,
                pillar,
                label: pillar.korean(),
                stem_ten_god: ten_god(day_master, pillar.stem),
                branch_ten_god: branch_ten_god(day_master, pillar.branch),
                stage: twelve_stage(day_master, pillar.branch),
            }
        })
        .collect();

    LuckCycle {
        direction,
        start_age: first_age,
        days_to_term: (days_to_term * 100.0).round() / 100.0,
        periods,
    }
}

/// 세운 for `from..=to`. Age is counted in full years from the birth year.
pub fn yearly_luck(chart: &FourPillars, birth_year: i32, from: i32, to: i32) -> Vec<YearlyLuck> {
    let day_master = chart.day_master();
    (from..=to)
        .map(|year| {
            let pillar = year_pillar(year);
            YearlyLuck {
                year,
                age: year - birth_year,
                pillar,
                label: pillar.korean(),
                stem_ten_god: ten_god(day_master, pillar.stem),
                branch_ten_god: branch_ten_god(day_master, pillar.branch),
                stage: twelve_stage(day_master, pillar.branch),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::saju::input::BirthRequest;
    use crate::saju::pillars::compute_pillars;

    #[test]
    fn test_direction_rule() {
        assert_eq!(direction(Stem::Gap, Gender::Male), LuckDirection::Forward);
        assert_eq!(direction(Stem::Gap, Gender::Female), LuckDirection::Backward);
        assert_eq!(direction(Stem::Gi, Gender::Male), LuckDirection::Backward);
        assert_eq!(direction(Stem::Gi, Gender::Female), LuckDirection::Forward);
    }

    #[test]
    fn test_start_age_rounding_and_clamp() {
        assert_eq!(start_age(0.5), 1);
        assert_eq!(start_age(4.4), 1);
        assert_eq!(start_age(4.6), 2);
        assert_eq!(start_age(23.0), 8);
        assert_eq!(start_age(40.0), 10);
    }

    #[test]
    fn test_backward_cycle_for_1949_male() {
        let input = BirthRequest::solar(1949, 10, 1, Some(15), Gender::Male)
            .validate()
            .unwrap();
        let computed = compute_pillars(&input);
        let cycle = luck_cycle(&computed.pillars, Gender::Male, computed.birth_utc);

        assert_eq!(cycle.direction, LuckDirection::Backward);
        assert!((7..=8).contains(&cycle.start_age), "start age {}", cycle.start_age);
        assert_eq!(cycle.periods.len(), PERIOD_COUNT);
        assert_eq!(cycle.periods[0].pillar.hanja(), "壬申");
        assert_eq!(cycle.periods[1].pillar.hanja(), "辛未");
        assert_eq!(cycle.periods[1].start_age, cycle.start_age + 10);
    }

    #[test]
    fn test_forward_cycle_steps_month_pillar() {
        let input = BirthRequest::solar(1949, 10, 1, Some(15), Gender::Female)
            .validate()
            .unwrap();
        let computed = compute_pillars(&input);
        let cycle = luck_cycle(&computed.pillars, Gender::Female, computed.birth_utc);

        assert_eq!(cycle.direction, LuckDirection::Forward);
        assert_eq!(cycle.periods[0].pillar.hanja(), "甲戌");
    }

    #[test]
    fn test_yearly_luck_2024_is_gapjin() {
        let input = BirthRequest::solar(1990, 5, 17, None, Gender::Male)
            .validate()
            .unwrap();
        let chart = compute_pillars(&input).pillars;
        let years = yearly_luck(&chart, 1990, 2024, 2026);
        assert_eq!(years.len(), 3);
        assert_eq!(years[0].pillar.hanja(), "甲辰");
        assert_eq!(years[0].age, 34);
        assert_eq!(years[2].pillar.hanja(), "丙午");
    }
}
