//! 십신: relation of the day master to every other character.

use serde::{Deserialize, Serialize};

use crate::saju::ganji::{Branch, Stem, Symbol};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TenGod {
    BiGyeon,
    GeopJae,
    SikSin,
    SangGwan,
    PyeonJae,
    JeongJae,
    PyeonGwan,
    JeongGwan,
    PyeonIn,
    JeongIn,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TenGodGroup {
    BiGeop,
    SikSang,
    JaeSeong,
    GwanSeong,
    InSeong,
}

impl TenGod {
    pub fn korean(self) -> &'static str {
        match self {
            TenGod::BiGyeon => "비견",
            TenGod::GeopJae => "겁재",
            TenGod::SikSin => "식신",
            TenGod::SangGwan => "상관",
            TenGod::PyeonJae => "편재",
            TenGod::JeongJae => "정재",
            TenGod::PyeonGwan => "편관",
            TenGod::JeongGwan => "정관",
            TenGod::PyeonIn => "편인",
            TenGod::JeongIn => "정인",
        }
    }

    pub fn hanja(self) -> &'static str {
        match self {
            TenGod::BiGyeon => "比肩",
            TenGod::GeopJae => "劫財",
            TenGod::SikSin => "食神",
            TenGod::SangGwan => "傷官",
            TenGod::PyeonJae => "偏財",
            TenGod::JeongJae => "正財",
            TenGod::PyeonGwan => "偏官",
            TenGod::JeongGwan => "正官",
            TenGod::PyeonIn => "偏印",
            TenGod::JeongIn => "正印",
        }
    }

    pub fn group(self) -> TenGodGroup {
        match self {
            TenGod::BiGyeon | TenGod::GeopJae => TenGodGroup::BiGeop,
            TenGod::SikSin | TenGod::SangGwan => TenGodGroup::SikSang,
            TenGod::PyeonJae | TenGod::JeongJae => TenGodGroup::JaeSeong,
            TenGod::PyeonGwan | TenGod::JeongGwan => TenGodGroup::GwanSeong,
            TenGod::PyeonIn | TenGod::JeongIn => TenGodGroup::InSeong,
        }
    }
}

impl TenGodGroup {
    pub const ALL: [TenGodGroup; 5] = [
        TenGodGroup::BiGeop,
        TenGodGroup::SikSang,
        TenGodGroup::JaeSeong,
        TenGodGroup::GwanSeong,
        TenGodGroup::InSeong,
    ];

    pub fn korean(self) -> &'static str {
        match self {
            TenGodGroup::BiGeop => "비겁",
            TenGodGroup::SikSang => "식상",
            TenGodGroup::JaeSeong => "재성",
            TenGodGroup::GwanSeong => "관성",
            TenGodGroup::InSeong => "인성",
        }
    }
}

/// Ten god of `other` seen from `day`. Same polarity takes the 偏 side.
pub fn ten_god(day: Stem, other: Stem) -> TenGod {
    let me = day.element();
    let them = other.element();
    let same_polarity = day.polarity() == other.polarity();
    let (same, different) = if them == me {
        (TenGod::BiGyeon, TenGod::GeopJae)
    } else if me.generates() == them {
        (TenGod::SikSin, TenGod::SangGwan)
    } else if me.controls() == them {
        (TenGod::PyeonJae, TenGod::JeongJae)
    } else if them.controls() == me {
        (TenGod::PyeonGwan, TenGod::JeongGwan)
    } else {
        (TenGod::PyeonIn, TenGod::JeongIn)
    };
    if same_polarity {
        same
    } else {
        different
    }
}

/// Branches are read through their main hidden stem.
pub fn branch_ten_god(day: Stem, branch: Branch) -> TenGod {
    ten_god(day, branch.main_stem())
}

pub fn symbol_ten_god(day: Stem, symbol: Symbol) -> TenGod {
    match symbol {
        Symbol::Stem(s) => ten_god(day, s),
        Symbol::Branch(b) => branch_ten_god(day, b),
    }
}
