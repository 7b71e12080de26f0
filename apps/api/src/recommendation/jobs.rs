//! Job-category suggestions.
//!
//! Each category carries element and ten-god group affinities. The score is
//! a weighted match in 0 – 100:
//!   0.45 × element affinity + 0.45 × group affinity + 0.10 if the 용신 is one
//!   of the category's elements.
//! Affinities average the chart's shares over the category's members, scaled
//! so that an even spread (20 %) reads as 0.5 and capped at 1.0.

use serde::Serialize;

use crate::engine::elements::{ElementBalance, Strength};
use crate::engine::sipsin::{TenGodGroup, TenGodGroup as G};
use crate::recommendation::GroupDistribution;
use crate::saju::ganji::{Element, Element as E};

const TOP_N: usize = 3;
const SHARE_SCALE: f64 = 2.5;
const STRONG_FIT: u32 = 70;
const PARTIAL_FIT: u32 = 40;

pub struct JobCategory {
    pub id: &'static str,
    pub name: &'static str,
    pub elements: &'static [Element],
    pub groups: &'static [TenGodGroup],
    pub examples: &'static [&'static str],
}

pub static CATEGORIES: &[JobCategory] = &[
    JobCategory {
        id: "business",
        name: "경영·창업",
        elements: &[E::Wood, E::Fire],
        groups: &[G::BiGeop, G::JaeSeong],
        examples: &["창업가", "경영 컨설턴트", "사업 기획자"],
    },
    JobCategory {
        id: "finance",
        name: "금융·투자",
        elements: &[E::Metal, E::Water],
        groups: &[G::JaeSeong],
        examples: &["펀드매니저", "회계사", "은행원"],
    },
    JobCategory {
        id: "public_service",
        name: "공무원·행정",
        elements: &[E::Metal, E::Earth],
        groups: &[G::GwanSeong, G::InSeong],
        examples: &["행정직 공무원", "공기업 직원", "정책 연구원"],
    },
    JobCategory {
        id: "law_security",
        name: "법조·경찰·군인",
        elements: &[E::Metal, E::Fire],
        groups: &[G::GwanSeong, G::BiGeop],
        examples: &["변호사", "경찰관", "직업 군인"],
    },
    JobCategory {
        id: "education",
        name: "교육·학문",
        elements: &[E::Wood, E::Water],
        groups: &[G::InSeong, G::SikSang],
        examples: &["교사", "교수", "연구원"],
    },
    JobCategory {
        id: "healthcare",
        name: "의료·보건",
        elements: &[E::Water, E::Wood],
        groups: &[G::InSeong, G::GwanSeong],
        examples: &["의사", "간호사", "약사"],
    },
    JobCategory {
        id: "arts",
        name: "예술·디자인",
        elements: &[E::Fire, E::Wood],
        groups: &[G::SikSang],
        examples: &["디자이너", "작가", "음악가"],
    },
    JobCategory {
        id: "media",
        name: "미디어·방송",
        elements: &[E::Fire],
        groups: &[G::SikSang, G::BiGeop],
        examples: &["PD", "기자", "크리에이터"],
    },
    JobCategory {
        id: "engineering",
        name: "IT·엔지니어링",
        elements: &[E::Metal, E::Water],
        groups: &[G::SikSang, G::InSeong],
        examples: &["소프트웨어 개발자", "데이터 분석가", "기계 엔지니어"],
    },
    JobCategory {
        id: "real_estate",
        name: "건설·부동산",
        elements: &[E::Earth],
        groups: &[G::JaeSeong, G::GwanSeong],
        examples: &["건축가", "부동산 중개사", "시공 관리자"],
    },
    JobCategory {
        id: "trade_sales",
        name: "유통·무역·영업",
        elements: &[E::Water, E::Earth],
        groups: &[G::JaeSeong, G::SikSang],
        examples: &["무역업", "영업 관리자", "MD"],
    },
    JobCategory {
        id: "counseling",
        name: "상담·종교·복지",
        elements: &[E::Earth, E::Water],
        groups: &[G::InSeong],
        examples: &["심리 상담사", "사회복지사", "성직자"],
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Fit {
    Strong,
    Partial,
    Weak,
}

#[derive(Debug, Clone, Serialize)]
pub struct JobMatch {
    pub id: &'static str,
    pub name: &'static str,
    pub score: u32,
    pub fit: Fit,
    pub examples: &'static [&'static str],
    pub reasons: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct JobReport {
    /// Best categories first, at most three.
    pub top: Vec<JobMatch>,
    pub recommendation: String,
}

fn affinity(shares: impl Iterator<Item = f64>, members: usize) -> f64 {
    if members == 0 {
        return 0.0;
    }
    (shares.sum::<f64>() / members as f64 * SHARE_SCALE).min(1.0)
}

fn element_share(balance: &ElementBalance, element: Element) -> f64 {
    balance
        .shares
        .iter()
        .find(|s| s.element == element)
        .map(|s| s.percent / 100.0)
        .unwrap_or(0.0)
}

fn score_category(
    category: &'static JobCategory,
    groups: &GroupDistribution,
    balance: &ElementBalance,
    strength: &Strength,
) -> JobMatch {
    let element_affinity = affinity(
        category.elements.iter().map(|&e| element_share(balance, e)),
        category.elements.len(),
    );
    let group_affinity = affinity(
        category.groups.iter().map(|&g| groups.share(g)),
        category.groups.len(),
    );
    let yongsin_match = category.elements.contains(&strength.yongsin);

    let raw = 0.45 * element_affinity + 0.45 * group_affinity + if yongsin_match { 0.10 } else { 0.0 };
    let score = (raw.clamp(0.0, 1.0) * 100.0).round() as u32;

    let mut reasons = Vec::new();
    if yongsin_match {
        reasons.push(format!("용신인 {} 기운과 맞닿아 있습니다", strength.yongsin.korean()));
    }
    for &g in category.groups {
        if groups.share(g) >= 0.25 {
            reasons.push(format!("{} 비중이 높습니다", g.korean()));
        }
    }
    for &e in category.elements {
        if element_share(balance, e) >= 0.25 {
            reasons.push(format!("{} 기운이 충분합니다", e.korean()));
        }
    }

    JobMatch {
        id: category.id,
        name: category.name,
        score,
        fit: classify(score),
        examples: category.examples,
        reasons,
    }
}

fn classify(score: u32) -> Fit {
    if score >= STRONG_FIT {
        Fit::Strong
    } else if score >= PARTIAL_FIT {
        Fit::Partial
    } else {
        Fit::Weak
    }
}

fn recommendation_text(top: &[JobMatch]) -> String {
    let strong: Vec<&str> = top
        .iter()
        .filter(|m| m.fit == Fit::Strong)
        .map(|m| m.name)
        .collect();
    match (strong.as_slice(), top.first()) {
        ([], Some(best)) => format!(
            "뚜렷하게 두드러지는 분야는 없지만 {} 분야가 가장 가깝습니다 ({}점). 관심사를 함께 고려해 보세요.",
            best.name, best.score
        ),
        ([only], _) => format!("{only} 분야가 사주 구조와 잘 맞습니다."),
        (many, _) if !many.is_empty() => format!(
            "{} 분야가 모두 잘 맞습니다. 그중에서도 {}을(를) 먼저 살펴보세요.",
            many.join(", "),
            many[0]
        ),
        _ => "추천할 직업군을 계산하지 못했습니다.".to_string(),
    }
}

pub fn score_jobs(
    groups: &GroupDistribution,
    balance: &ElementBalance,
    strength: &Strength,
) -> JobReport {
    let mut matches: Vec<JobMatch> = CATEGORIES
        .iter()
        .map(|c| score_category(c, groups, balance, strength))
        .collect();
    matches.sort_by(|a, b| b.score.cmp(&a.score));
    matches.truncate(TOP_N);

    let recommendation = recommendation_text(&matches);
    JobReport {
        top: matches,
        recommendation,
    }
}
