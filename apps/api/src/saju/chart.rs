//! `SajuChart`: every derivation for one birth, with Korean labels ready for
//! presentation clients.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;
use tracing::debug;

use crate::calendar::lunar::LunarDate;
use crate::engine::elements::{day_master_strength, element_balance, ElementBalance, Strength};
use crate::engine::luck::{luck_cycle, LuckCycle};
use crate::engine::relations::{find_relations, Relation};
use crate::engine::sinsal::{find_sinsal, SinsalHit};
use crate::engine::sipsin::{branch_ten_god, ten_god, TenGod};
use crate::engine::twelve_sinsal::{twelve_sinsal, TwelveSinsal};
use crate::engine::unseong::{twelve_stage, TwelveStage};
use crate::recommendation::archetype::{score_archetypes, ArchetypeReport};
use crate::recommendation::jobs::{score_jobs, JobReport};
use crate::recommendation::{group_distribution, GroupDistribution};
use crate::saju::ganji::{Branch, Element, Pillar, Polarity, Stem};
use crate::saju::input::{BirthInput, CalendarKind, Gender, ZiRule};
use crate::saju::pillars::{compute_pillars, FourPillars, Slot};

// ────────────────────────────────────────────────────────────────────────────
// Views
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct BirthSummary {
    pub name: Option<String>,
    pub gender: Gender,
    pub gender_korean: &'static str,
    pub calendar: CalendarKind,
    pub solar_date: NaiveDate,
    pub lunar_date: LunarDate,
    pub lunar_label: String,
    pub time: Option<NaiveTime>,
    /// Clock used for day and hour after DST removal and longitude correction.
    pub solar_time: Option<NaiveDateTime>,
    pub longitude: Option<f64>,
    pub zi_rule: ZiRule,
    pub saju_year: i32,
    /// 띠
    pub zodiac: &'static str,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct TenGodView {
    pub god: TenGod,
    pub korean: &'static str,
    pub hanja: &'static str,
}

impl From<TenGod> for TenGodView {
    fn from(god: TenGod) -> Self {
        Self {
            god,
            korean: god.korean(),
            hanja: god.hanja(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct StemView {
    pub stem: Stem,
    pub korean: &'static str,
    pub hanja: &'static str,
    pub element: Element,
    pub polarity: Polarity,
    pub polarity_korean: &'static str,
}

impl From<Stem> for StemView {
    fn from(stem: Stem) -> Self {
        Self {
            stem,
            korean: stem.korean(),
            hanja: stem.hanja(),
            element: stem.element(),
            polarity: stem.polarity(),
            polarity_korean: stem.polarity().korean(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BranchView {
    pub branch: Branch,
    pub korean: &'static str,
    pub hanja: &'static str,
    pub element: Element,
    pub polarity: Polarity,
    pub polarity_korean: &'static str,
    pub animal: &'static str,
}

impl From<Branch> for BranchView {
    fn from(branch: Branch) -> Self {
        Self {
            branch,
            korean: branch.korean(),
            hanja: branch.hanja(),
            element: branch.element(),
            polarity: branch.polarity(),
            polarity_korean: branch.polarity().korean(),
            animal: branch.animal(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct HiddenStemView {
    pub stem: Stem,
    pub hanja: &'static str,
    pub ten_god: TenGodView,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct StageView {
    pub stage: TwelveStage,
    pub korean: &'static str,
    pub hanja: &'static str,
    /// 1 (사, 절) to 5 (건록, 제왕).
    pub vitality: u8,
}

impl From<TwelveStage> for StageView {
    fn from(stage: TwelveStage) -> Self {
        Self {
            stage,
            korean: stage.korean(),
            hanja: stage.hanja(),
            vitality: stage.vitality(),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct TwelveSinsalView {
    pub sinsal: TwelveSinsal,
    pub korean: &'static str,
    pub hanja: &'static str,
}

impl From<TwelveSinsal> for TwelveSinsalView {
    fn from(sinsal: TwelveSinsal) -> Self {
        Self {
            sinsal,
            korean: sinsal.korean(),
            hanja: sinsal.hanja(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PillarView {
    pub slot: Slot,
    pub slot_korean: &'static str,
    pub korean: String,
    pub hanja: String,
    pub stem: StemView,
    pub branch: BranchView,
    /// `None` on the day stem, which is the day master itself.
    pub stem_ten_god: Option<TenGodView>,
    pub branch_ten_god: TenGodView,
    pub hidden_stems: Vec<HiddenStemView>,
    /// 봉법: day master against this branch.
    pub stage: StageView,
    /// 거법: this pillar's own stem against its branch.
    pub own_stage: StageView,
    /// From the year branch.
    pub twelve_sinsal: TwelveSinsalView,
    pub twelve_sinsal_by_day: TwelveSinsalView,
}

#[derive(Debug, Clone, Serialize)]
pub struct SajuChart {
    pub birth: BirthSummary,
    pub four_pillars: FourPillars,
    pub pillars: Vec<PillarView>,
    pub day_master: StemView,
    pub elements: ElementBalance,
    pub strength: Strength,
    pub sinsal: Vec<SinsalHit>,
    pub relations: Vec<Relation>,
    pub luck: LuckCycle,
    pub ten_god_groups: GroupDistribution,
    pub archetypes: ArchetypeReport,
    pub jobs: JobReport,
    #[serde(skip)]
    fingerprint: String,
}

impl SajuChart {
    /// Stable key for everything that influences the chart.
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }
}

fn fingerprint(input: &BirthInput, pillars: &FourPillars) -> String {
    let hour = pillars.hour.map(|p| p.hanja()).unwrap_or_else(|| "--".to_string());
    format!(
        "{}|{}|{}|{:?}|{:?}|{}|{}{}{}{}",
        input.solar_date,
        input
            .time
            .map(|t| t.format("%H%M").to_string())
            .unwrap_or_default(),
        input.gender.korean(),
        input.zi_rule,
        input.longitude.map(|l| (l * 1000.0).round() as i64),
        input.name.as_deref().unwrap_or(""),
        pillars.year.hanja(),
        pillars.month.hanja(),
        pillars.day.hanja(),
        hour,
    )
}

fn pillar_view(slot: Slot, pillar: Pillar, pillars: &FourPillars) -> PillarView {
    let day_master = pillars.day_master();
    PillarView {
        slot,
        slot_korean: slot.korean(),
        korean: pillar.korean(),
        hanja: pillar.hanja(),
        stem: pillar.stem.into(),
        branch: pillar.branch.into(),
        stem_ten_god: (slot != Slot::Day).then(|| ten_god(day_master, pillar.stem).into()),
        branch_ten_god: branch_ten_god(day_master, pillar.branch).into(),
        hidden_stems: pillar
            .branch
            .hidden_stems()
            .iter()
            .map(|&stem| HiddenStemView {
                stem,
                hanja: stem.hanja(),
                ten_god: ten_god(day_master, stem).into(),
            })
            .collect(),
        stage: twelve_stage(day_master, pillar.branch).into(),
        own_stage: twelve_stage(pillar.stem, pillar.branch).into(),
        twelve_sinsal: twelve_sinsal(pillars.year.branch, pillar.branch).into(),
        twelve_sinsal_by_day: twelve_sinsal(pillars.day.branch, pillar.branch).into(),
    }
}

/// Computes the full chart for a validated birth.
pub fn build_chart(input: &BirthInput) -> SajuChart {
    let computed = compute_pillars(input);
    let pillars = computed.pillars;
    debug!(
        "Chart {} {} {} {}",
        pillars.year,
        pillars.month,
        pillars.day,
        pillars.hour.map(|p| p.to_string()).unwrap_or_else(|| "시주 없음".to_string())
    );

    let elements = element_balance(&pillars);
    let strength = day_master_strength(&pillars);
    let groups = group_distribution(&pillars);
    let archetypes = score_archetypes(&groups);
    let jobs = score_jobs(&groups, &elements, &strength);

    SajuChart {
        birth: BirthSummary {
            name: input.name.clone(),
            gender: input.gender,
            gender_korean: input.gender.korean(),
            calendar: input.calendar,
            solar_date: input.solar_date,
            lunar_date: input.lunar_date,
            lunar_label: input.lunar_date.korean(),
            time: input.time,
            solar_time: computed.solar_time,
            longitude: input.longitude,
            zi_rule: input.zi_rule,
            saju_year: computed.saju_year,
            zodiac: pillars.year.branch.animal(),
        },
        four_pillars: pillars,
        pillars: pillars
            .pillars()
            .into_iter()
            .map(|(slot, p)| pillar_view(slot, p, &pillars))
            .collect(),
        day_master: pillars.day_master().into(),
        elements,
        strength,
        sinsal: find_sinsal(&pillars),
        relations: find_relations(&pillars),
        luck: luck_cycle(&pillars, input.gender, computed.birth_utc),
        ten_god_groups: groups,
        archetypes,
        jobs,
        fingerprint: fingerprint(input, &pillars),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::saju::input::BirthRequest;

    fn chart_for(req: BirthRequest) -> SajuChart {
        build_chart(&req.validate().unwrap())
    }

    #[test]
    fn test_chart_1949_views() {
        let chart = chart_for(BirthRequest::solar(1949, 10, 1, Some(15), Gender::Male));
        assert_eq!(chart.pillars.len(), 4);
        assert_eq!(chart.day_master.hanja, "甲");
        assert_eq!(chart.birth.zodiac, "소");

        let day = &chart.pillars[2];
        assert_eq!(day.slot_korean, "일주");
        assert!(day.stem_ten_god.is_none());
        // 甲 in 子: 목욕.
        assert_eq!(day.stage.stage, TwelveStage::MogYok);
        assert_eq!(day.stage.hanja, "沐浴");
        assert_eq!(day.stage.vitality, 3);
        // 子 read from the 丑 year is 육해; from the 子 day itself it is 장성.
        assert_eq!(day.twelve_sinsal.sinsal, TwelveSinsal::Yukhae);
        assert_eq!(day.twelve_sinsal_by_day.sinsal, TwelveSinsal::Jangseong);
        assert_eq!(day.twelve_sinsal_by_day.hanja, "將星殺");
        assert_eq!(day.stem.polarity_korean, "양");

        let month = &chart.pillars[1];
        assert_eq!(month.stem_ten_god.map(|g| g.god), Some(TenGod::JeongIn));
        assert_eq!(month.branch_ten_god.god, TenGod::JeongGwan);
        assert_eq!(month.hidden_stems.len(), 2);
    }

    #[test]
    fn test_chart_without_time_has_three_pillars() {
        let chart = chart_for(BirthRequest::solar(1990, 5, 17, None, Gender::Female));
        assert_eq!(chart.pillars.len(), 3);
        assert!(chart.four_pillars.hour.is_none());
        assert_eq!(chart.elements.total, 6);
    }

    #[test]
    fn test_fingerprint_is_stable_and_input_sensitive() {
        let a = chart_for(BirthRequest::solar(1990, 5, 17, Some(9), Gender::Female));
        let b = chart_for(BirthRequest::solar(1990, 5, 17, Some(9), Gender::Female));
        let c = chart_for(BirthRequest::solar(1990, 5, 17, Some(9), Gender::Male));
        assert_eq!(a.fingerprint(), b.fingerprint());
        assert_ne!(a.fingerprint(), c.fingerprint());
    }

    #[test]
    fn test_chart_serializes() {
        let chart = chart_for(BirthRequest::solar(1949, 10, 1, Some(15), Gender::Male));
        let json = serde_json::to_value(&chart).unwrap();
        assert_eq!(json["pillars"][0]["hanja"], "己丑");
        assert_eq!(json["birth"]["gender"], "male");
        assert!(json.get("fingerprint").is_none());
    }
}
