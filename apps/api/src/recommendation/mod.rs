//! Recommendation: archetype and job-category scores aggregated from the
//! ten-god distribution of a chart.
//!
//! Both scorers read the same weighted `GroupDistribution`, so their scores
//! stay consistent with each other.

pub mod archetype;
pub mod jobs;

use serde::Serialize;

use crate::engine::sipsin::{symbol_ten_god, TenGodGroup};
use crate::saju::pillars::{FourPillars, Position};

/// Share of weighted positions held by one ten-god group.
#[derive(Debug, Clone, Serialize)]
pub struct GroupShare {
    pub group: TenGodGroup,
    pub korean: &'static str,
    pub weight: f64,
    /// 0.0 – 1.0
    pub share: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct GroupDistribution {
    pub shares: Vec<GroupShare>,
    pub total_weight: f64,
}

impl GroupDistribution {
    pub fn share(&self, group: TenGodGroup) -> f64 {
        self.shares
            .iter()
            .find(|s| s.group == group)
            .map(|s| s.share)
            .unwrap_or(0.0)
    }
}

fn position_weight(position: Position) -> f64 {
    match position {
        Position::MonthBranch => 2.0,
        Position::DayBranch => 1.5,
        _ => 1.0,
    }
}

/// Ten-god groups over every character except the day stem.
pub fn group_distribution(chart: &FourPillars) -> GroupDistribution {
    let day_master = chart.day_master();
    let mut weights = [0.0_f64; 5];
    for (position, symbol) in chart.characters() {
        if position == Position::DayStem {
            continue;
        }
        let group = symbol_ten_god(day_master, symbol).group();
        weights[group as usize] += position_weight(position);
    }
    let total_weight: f64 = weights.iter().sum();

    let shares = TenGodGroup::ALL
        .iter()
        .map(|&group| {
            let weight = weights[group as usize];
            GroupShare {
                group,
                korean: group.korean(),
                weight,
                share: if total_weight > 0.0 {
                    weight / total_weight
                } else {
                    0.0
                },
            }
        })
        .collect();

    GroupDistribution {
        shares,
        total_weight,
    }
}
