use serde::Serialize;

use crate::engine::sipsin::TenGodGroup;
use crate::recommendation::GroupDistribution;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Archetype {
    Pioneer,
    Creator,
    Strategist,
    Guardian,
    Sage,
}

impl Archetype {
    pub const ALL: [Archetype; 5] = [
        Archetype::Pioneer,
        Archetype::Creator,
        Archetype::Strategist,
        Archetype::Guardian,
        Archetype::Sage,
    ];

    pub fn group(self) -> TenGodGroup {
        match self {
            Archetype::Pioneer => TenGodGroup::BiGeop,
            Archetype::Creator => TenGodGroup::SikSang,
            Archetype::Strategist => TenGodGroup::JaeSeong,
            Archetype::Guardian => TenGodGroup::GwanSeong,
            Archetype::Sage => TenGodGroup::InSeong,
        }
    }

    pub fn korean(self) -> &'static str {
        match self {
            Archetype::Pioneer => "개척자형",
            Archetype::Creator => "창작자형",
            Archetype::Strategist => "전략가형",
            Archetype::Guardian => "수호자형",
            Archetype::Sage => "현자형",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Archetype::Pioneer => "자기 주관이 뚜렷하고 스스로 길을 여는 독립적인 유형입니다.",
            Archetype::Creator => "표현력과 재능이 풍부해 새로운 것을 만들어 내는 유형입니다.",
            Archetype::Strategist => "현실 감각이 뛰어나 자원과 기회를 잘 운용하는 유형입니다.",
            Archetype::Guardian => "책임감과 원칙을 중시하며 조직을 지키는 유형입니다.",
            Archetype::Sage => "배움과 사색을 즐기며 지혜로 사람을 이끄는 유형입니다.",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ArchetypeScore {
    pub archetype: Archetype,
    pub name: &'static str,
    /// 0 – 100
    pub score: u32,
    pub description: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct ArchetypeReport {
    pub primary: Archetype,
    pub primary_name: &'static str,
    /// Descending by score.
    pub scores: Vec<ArchetypeScore>,
}

pub fn score_archetypes(distribution: &GroupDistribution) -> ArchetypeReport {
    let mut scores: Vec<ArchetypeScore> = Archetype::ALL
        .iter()
        .map(|&archetype| ArchetypeScore {
            archetype,
            name: archetype.korean(),
            score: (distribution.share(archetype.group()) * 100.0).round() as u32,
            description: archetype.description(),
        })
        .collect();
    // Stable: ties keep declaration order.
    scores.sort_by(|a, b| b.score.cmp(&a.score));

    let primary = scores
        .first()
        .map(|s| s.archetype)
        .unwrap_or(Archetype::Pioneer);

    ArchetypeReport {
        primary,
        primary_name: primary.korean(),
        scores,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recommendation::group_distribution;
    use crate::saju::ganji::{Branch, Pillar, Stem};
    use crate::saju::pillars::FourPillars;

    #[test]
    fn test_inseong_heavy_chart_is_sage() {
        let chart = FourPillars {
            year: Pillar::new(Stem::Gi, Branch::Chuk).unwrap(),
            month: Pillar::new(Stem::Gye, Branch::Yu).unwrap(),
            day: Pillar::new(Stem::Gap, Branch::Ja).unwrap(),
            hour: Pillar::new(Stem::Im, Branch::Shin),
        };
        let report = score_archetypes(&group_distribution(&chart));
        assert_eq!(report.primary, Archetype::Sage);
        assert_eq!(report.primary_name, "현자형");
        assert_eq!(report.scores.len(), 5);
        assert_eq!(report.scores[0].score, 41);
        assert!(report.scores.windows(2).all(|w| w[0].score >= w[1].score));
    }
}
