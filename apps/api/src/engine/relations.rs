//! 합충형파해 between the characters of a chart.

use serde::Serialize;

use crate::saju::ganji::{Branch, Element, Stem};
use crate::saju::pillars::{FourPillars, Position};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationKind {
    StemCombination,
    StemClash,
    SixCombination,
    Clash,
    Harm,
    Break,
    Punishment,
    SelfPunishment,
    ThreeHarmony,
    HalfHarmony,
}

impl RelationKind {
    pub fn korean(self) -> &'static str {
        match self {
            RelationKind::StemCombination => "천간합",
            RelationKind::StemClash => "천간충",
            RelationKind::SixCombination => "육합",
            RelationKind::Clash => "충",
            RelationKind::Harm => "해",
            RelationKind::Break => "파",
            RelationKind::Punishment => "형",
            RelationKind::SelfPunishment => "자형",
            RelationKind::ThreeHarmony => "삼합",
            RelationKind::HalfHarmony => "반합",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Relation {
    pub kind: RelationKind,
    /// e.g. "甲己합", "子午충", "申子辰삼합"
    pub label: String,
    pub positions: Vec<Position>,
    /// Element the combination transforms into, for 합 and 삼합.
    pub element: Option<Element>,
}

pub fn stem_combination(a: Stem, b: Stem) -> Option<Element> {
    let (lo, hi) = ordered(a.index(), b.index());
    (hi - lo == 5).then(|| {
        [
            Element::Earth,
            Element::Metal,
            Element::Water,
            Element::Wood,
            Element::Fire,
        ][lo]
    })
}

pub fn stems_clash(a: Stem, b: Stem) -> bool {
    let (lo, hi) = ordered(a.index(), b.index());
    hi - lo == 6 && lo < 4
}

pub fn six_combination(a: Branch, b: Branch) -> Option<Element> {
    if (a.index() + b.index()) % 12 != 1 {
        return None;
    }
    let (lo, _) = ordered(a.index(), b.index());
    Some(match lo {
        0 => Element::Earth, // 子丑
        2 => Element::Wood,  // 寅亥
        3 => Element::Fire,  // 卯戌
        4 => Element::Metal, // 辰酉
        5 => Element::Water, // 巳申
        _ => Element::Fire,  // 午未
    })
}

pub fn branches_clash(a: Branch, b: Branch) -> bool {
    (a.index() as i64 - b.index() as i64).abs() == 6
}

pub fn branches_harm(a: Branch, b: Branch) -> bool {
    (a.index() + b.index()) % 12 == 7
}

const BREAKS: [(Branch, Branch); 6] = [
    (Branch::Ja, Branch::Yu),
    (Branch::Chuk, Branch::Jin),
    (Branch::In, Branch::Hae),
    (Branch::Myo, Branch::O),
    (Branch::Sa, Branch::Shin),
    (Branch::Mi, Branch::Sul),
];

pub fn branches_break(a: Branch, b: Branch) -> bool {
    BREAKS.iter().any(|&(x, y)| (x, y) == (a, b) || (y, x) == (a, b))
}

const SELF_PUNISHING: [Branch; 4] = [Branch::Jin, Branch::O, Branch::Yu, Branch::Hae];

/// 무은지형 and 지세지형.
const PUNISHMENT_GROUPS: [[Branch; 3]; 2] = [
    [Branch::In, Branch::Sa, Branch::Shin],
    [Branch::Chuk, Branch::Sul, Branch::Mi],
];

/// Members with the center (왕지) in the middle, and the resulting element.
const HARMONY_GROUPS: [([Branch; 3], Element); 4] = [
    ([Branch::Shin, Branch::Ja, Branch::Jin], Element::Water),
    ([Branch::Hae, Branch::Myo, Branch::Mi], Element::Wood),
    ([Branch::In, Branch::O, Branch::Sul], Element::Fire),
    ([Branch::Sa, Branch::Yu, Branch::Chuk], Element::Metal),
];

fn ordered(a: usize, b: usize) -> (usize, usize) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

fn group_label(members: &[Branch]) -> String {
    members.iter().map(|b| b.hanja()).collect()
}

/// Every relation present on the chart.
pub fn find_relations(chart: &FourPillars) -> Vec<Relation> {
    let mut out = Vec::new();

    let stems = chart.stems();
    for (i, &(pa, a)) in stems.iter().enumerate() {
        for &(pb, b) in &stems[i + 1..] {
            let label = |suffix: &str| format!("{}{}{suffix}", a.hanja(), b.hanja());
            if let Some(element) = stem_combination(a, b) {
                out.push(Relation {
                    kind: RelationKind::StemCombination,
                    label: label("합"),
                    positions: vec![pa, pb],
                    element: Some(element),
                });
            }
            if stems_clash(a, b) {
                out.push(Relation {
                    kind: RelationKind::StemClash,
                    label: label("충"),
                    positions: vec![pa, pb],
                    element: None,
                });
            }
        }
    }

    let branches = chart.branches();
    for (i, &(pa, a)) in branches.iter().enumerate() {
        for &(pb, b) in &branches[i + 1..] {
            let mut push = |kind: RelationKind, element: Option<Element>| {
                out.push(Relation {
                    kind,
                    label: format!("{}{}{}", a.hanja(), b.hanja(), kind.korean()),
                    positions: vec![pa, pb],
                    element,
                })
            };
            if let Some(element) = six_combination(a, b) {
                push(RelationKind::SixCombination, Some(element));
            }
            if branches_clash(a, b) {
                push(RelationKind::Clash, None);
            }
            if branches_harm(a, b) {
                push(RelationKind::Harm, None);
            }
            if branches_break(a, b) {
                push(RelationKind::Break, None);
            }
            let mutual = (a, b) == (Branch::Ja, Branch::Myo) || (a, b) == (Branch::Myo, Branch::Ja);
            if mutual {
                push(RelationKind::Punishment, None);
            }
            if a == b && SELF_PUNISHING.contains(&a) {
                push(RelationKind::SelfPunishment, None);
            }
        }
    }

    for group in PUNISHMENT_GROUPS {
        let present: Vec<Branch> = group
            .iter()
            .copied()
            .filter(|g| branches.iter().any(|(_, b)| b == g))
            .collect();
        if present.len() >= 2 {
            out.push(Relation {
                kind: RelationKind::Punishment,
                label: format!("{}{}", group_label(&present), RelationKind::Punishment.korean()),
                positions: positions_of(&branches, &present),
                element: None,
            });
        }
    }

    for (members, element) in HARMONY_GROUPS {
        let present: Vec<Branch> = members
            .iter()
            .copied()
            .filter(|m| branches.iter().any(|(_, b)| b == m))
            .collect();
        let kind = match present.len() {
            3 => RelationKind::ThreeHarmony,
            2 if present.contains(&members[1]) => RelationKind::HalfHarmony,
            _ => continue,
        };
        out.push(Relation {
            kind,
            label: format!("{}{}", group_label(&present), kind.korean()),
            positions: positions_of(&branches, &present),
            element: Some(element),
        });
    }

    out
}

fn positions_of(branches: &[(Position, Branch)], members: &[Branch]) -> Vec<Position> {
    branches
        .iter()
        .filter(|(_, b)| members.contains(b))
        .map(|(p, _)| *p)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::saju::ganji::Pillar;

    fn chart(pillars: [(Stem, Branch); 4]) -> FourPillars {
        let p = |(s, b)| Pillar::new(s, b).unwrap();
        FourPillars {
            year: p(pillars[0]),
            month: p(pillars[1]),
            day: p(pillars[2]),
            hour: Some(p(pillars[3])),
        }
    }

    fn kinds(relations: &[Relation]) -> Vec<RelationKind> {
        relations.iter().map(|r| r.kind).collect()
    }

    #[test]
    fn test_stem_combination_elements() {
        assert_eq!(stem_combination(Stem::Gap, Stem::Gi), Some(Element::Earth));
        assert_eq!(stem_combination(Stem::Gye, Stem::Mu), Some(Element::Fire));
        assert_eq!(stem_combination(Stem::Gap, Stem::Eul), None);
        assert!(stems_clash(Stem::Gap, Stem::Gyeong));
        assert!(!stems_clash(Stem::Mu, Stem::Im));
    }

    #[test]
    fn test_branch_pairs() {
        assert_eq!(six_combination(Branch::Ja, Branch::Chuk), Some(Element::Earth));
        assert_eq!(six_combination(Branch::Hae, Branch::In), Some(Element::Wood));
        assert!(branches_clash(Branch::Ja, Branch::O));
        assert!(branches_harm(Branch::Ja, Branch::Mi));
        assert!(branches_harm(Branch::Shin, Branch::Hae));
        assert!(branches_break(Branch::Yu, Branch::Ja));
        assert!(!branches_break(Branch::Ja, Branch::O));
    }

    #[test]
    fn test_three_harmony_and_clash_on_chart() {
        // 申 子 辰 present, 午 clashes 子.
        let c = chart([
            (Stem::Im, Branch::Shin),
            (Stem::Gap, Branch::Ja),
            (Stem::Byeong, Branch::Jin),
            (Stem::Gap, Branch::O),
        ]);
        let rels = find_relations(&c);
        let harmony = rels.iter().find(|r| r.kind == RelationKind::ThreeHarmony).unwrap();
        assert_eq!(harmony.label, "申子辰삼합");
        assert_eq!(harmony.element, Some(Element::Water));
        assert_eq!(harmony.positions.len(), 3);
        assert!(kinds(&rels).contains(&RelationKind::Clash));
        assert!(!kinds(&rels).contains(&RelationKind::HalfHarmony));
    }

    #[test]
    fn test_half_harmony_requires_center() {
        let with_center = chart([
            (Stem::Gap, Branch::Ja),
            (Stem::Byeong, Branch::Jin),
            (Stem::Mu, Branch::In),
            (Stem::Gyeong, Branch::In),
        ]);
        assert!(kinds(&find_relations(&with_center)).contains(&RelationKind::HalfHarmony));

        let without_center = chart([
            (Stem::Im, Branch::Shin),
            (Stem::Byeong, Branch::Jin),
            (Stem::Mu, Branch::In),
            (Stem::Gyeong, Branch::In),
        ]);
        let rels = find_relations(&without_center);
        assert!(!rels
            .iter()
            .any(|r| r.kind == RelationKind::HalfHarmony && r.element == Some(Element::Water)));
    }

    #[test]
    fn test_punishments() {
        let c = chart([
            (Stem::Mu, Branch::In),
            (Stem::Gi, Branch::Sa),
            (Stem::Byeong, Branch::O),
            (Stem::Gap, Branch::O),
        ]);
        let rels = find_relations(&c);
        assert!(rels
            .iter()
            .any(|r| r.kind == RelationKind::Punishment && r.label == "寅巳형"));
        assert!(rels.iter().any(|r| r.kind == RelationKind::SelfPunishment));
    }

    #[test]
    fn test_stem_combination_label_on_chart() {
        let c = chart([
            (Stem::Gap, Branch::Ja),
            (Stem::Gi, Branch::Sa),
            (Stem::Byeong, Branch::In),
            (Stem::Mu, Branch::O),
        ]);
        let rels = find_relations(&c);
        let combo = rels.iter().find(|r| r.kind == RelationKind::StemCombination).unwrap();
        assert_eq!(combo.label, "甲己합");
        assert_eq!(combo.positions, vec![Position::YearStem, Position::MonthStem]);
    }
}
