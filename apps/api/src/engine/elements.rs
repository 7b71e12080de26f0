//! Five-element balance and 억부 strength of the day master.

use serde::Serialize;

use crate::saju::ganji::{Element, Symbol};
use crate::saju::pillars::{FourPillars, Position};

const STRONG_THRESHOLD: f64 = 55.0;
const WEAK_THRESHOLD: f64 = 45.0;

#[derive(Debug, Clone, Serialize)]
pub struct ElementShare {
    pub element: Element,
    pub korean: &'static str,
    pub count: u32,
    /// 0 – 100, one decimal.
    pub percent: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ElementBalance {
    pub shares: Vec<ElementShare>,
    pub missing: Vec<Element>,
    /// Most frequent element; ties go to generation-cycle order.
    pub dominant: Element,
    pub total: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StrengthVerdict {
    Strong,
    Balanced,
    Weak,
}

impl StrengthVerdict {
    pub fn korean(self) -> &'static str {
        match self {
            StrengthVerdict::Strong => "신강",
            StrengthVerdict::Balanced => "중화",
            StrengthVerdict::Weak => "신약",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Strength {
    /// Supporting weight as a share of all weight, 0 – 100.
    pub score: f64,
    pub verdict: StrengthVerdict,
    pub verdict_korean: &'static str,
    /// 득령: the month branch supports the day master.
    pub month_support: bool,
    /// 용신
    pub yongsin: Element,
    /// 희신
    pub heesin: Element,
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

pub fn element_balance(chart: &FourPillars) -> ElementBalance {
    let mut counts = [0u32; 5];
    for (_, symbol) in chart.characters() {
        counts[symbol.element().index()] += 1;
    }
    let total: u32 = counts.iter().sum();

    let shares = Element::ALL
        .iter()
        .map(|&element| {
            let count = counts[element.index()];
            ElementShare {
                element,
                korean: element.korean(),
                count,
                percent: if total == 0 {
                    0.0
                } else {
                    round1(count as f64 * 100.0 / total as f64)
                },
            }
        })
        .collect();

    let missing = Element::ALL
        .iter()
        .copied()
        .filter(|e| counts[e.index()] == 0)
        .collect();

    // max_by_key keeps the last maximum; scan in reverse so the first wins.
    let dominant = Element::ALL
        .iter()
        .rev()
        .copied()
        .max_by_key(|e| counts[e.index()])
        .unwrap_or(Element::Wood);

    ElementBalance {
        shares,
        missing,
        dominant,
        total,
    }
}

fn position_weight(position: Position) -> f64 {
    match position {
        Position::MonthBranch => 2.0,
        Position::DayBranch => 1.5,
        _ => 1.0,
    }
}

/// Weighted strength of the day master; the day stem itself is not counted.
pub fn day_master_strength(chart: &FourPillars) -> Strength {
    let me = chart.day_master().element();
    let supports = |symbol: Symbol| {
        let e = symbol.element();
        e == me || e.generates() == me
    };

    let mut support = 0.0;
    let mut total = 0.0;
    for (position, symbol) in chart.characters() {
        if position == Position::DayStem {
            continue;
        }
        let weight = position_weight(position);
        total += weight;
        if supports(symbol) {
            support += weight;
        }
    }

    let score = if total > 0.0 {
        round1(support * 100.0 / total)
    } else {
        50.0
    };
    let verdict = if score >= STRONG_THRESHOLD {
        StrengthVerdict::Strong
    } else if score <= WEAK_THRESHOLD {
        StrengthVerdict::Weak
    } else {
        StrengthVerdict::Balanced
    };

    let (yongsin, heesin) = match verdict {
        // Resource, then peer.
        StrengthVerdict::Weak => (me.generated_by(), me),
        // Output, then wealth.
        StrengthVerdict::Strong => (me.generates(), me.controls()),
        StrengthVerdict::Balanced => {
            let balance = element_balance(chart);
            let mut by_count: Vec<&ElementShare> = balance.shares.iter().collect();
            by_count.sort_by_key(|s| s.count);
            let first = by_count.first().map(|s| s.element).unwrap_or(me);
            let second = by_count.get(1).map(|s| s.element).unwrap_or(me);
            (first, second)
        }
    };

    Strength {
        score,
        verdict,
        verdict_korean: verdict.korean(),
        month_support: supports(Symbol::Branch(chart.month.branch)),
        yongsin,
        heesin,
    }
}
