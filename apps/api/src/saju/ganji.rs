//! Heavenly stems (천간), earthly branches (지지), the five elements and the
//! sexagenary cycle they form together.

use std::fmt;

use serde::{Deserialize, Serialize};

// ────────────────────────────────────────────────────────────────────────────
// Five elements / polarity
// ────────────────────────────────────────────────────────────────────────────

/// 오행. Declaration order follows the generation cycle: 목 → 화 → 토 → 금 → 수.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Element {
    Wood,
    Fire,
    Earth,
    Metal,
    Water,
}

impl Element {
    pub const ALL: [Element; 5] = [
        Element::Wood,
        Element::Fire,
        Element::Earth,
        Element::Metal,
        Element::Water,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Element {
        Self::ALL[index % 5]
    }

    /// The element this one feeds (相生).
    pub fn generates(self) -> Element {
        Self::from_index(self.index() + 1)
    }

    /// The element this one restrains (相剋).
    pub fn controls(self) -> Element {
        Self::from_index(self.index() + 2)
    }

    pub fn generated_by(self) -> Element {
        Self::from_index(self.index() + 4)
    }

    pub fn korean(self) -> &'static str {
        ["목", "화", "토", "금", "수"][self.index()]
    }

    pub fn hanja(self) -> &'static str {
        ["木", "火", "土", "金", "水"][self.index()]
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.korean(), self.hanja())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Polarity {
    Yang,
    Yin,
}

impl Polarity {
    pub fn korean(self) -> &'static str {
        match self {
            Polarity::Yang => "양",
            Polarity::Yin => "음",
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Stems
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stem {
    Gap,
    Eul,
    Byeong,
    Jeong,
    Mu,
    Gi,
    Gyeong,
    Sin,
    Im,
    Gye,
}

impl Stem {
    pub const ALL: [Stem; 10] = [
        Stem::Gap,
        Stem::Eul,
        Stem::Byeong,
        Stem::Jeong,
        Stem::Mu,
        Stem::Gi,
        Stem::Gyeong,
        Stem::Sin,
        Stem::Im,
        Stem::Gye,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Stem {
        Self::ALL[index % 10]
    }

    pub fn element(self) -> Element {
        Element::from_index(self.index() / 2)
    }

    pub fn polarity(self) -> Polarity {
        if self.index() % 2 == 0 {
            Polarity::Yang
        } else {
            Polarity::Yin
        }
    }

    pub fn korean(self) -> &'static str {
        ["갑", "을", "병", "정", "무", "기", "경", "신", "임", "계"][self.index()]
    }

    pub fn hanja(self) -> &'static str {
        ["甲", "乙", "丙", "丁", "戊", "己", "庚", "辛", "壬", "癸"][self.index()]
    }

    pub fn offset(self, steps: i64) -> Stem {
        Self::from_index((self.index() as i64 + steps).rem_euclid(10) as usize)
    }
}

impl fmt::Display for Stem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.korean())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Branches
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Branch {
    Ja,
    Chuk,
    In,
    Myo,
    Jin,
    Sa,
    O,
    Mi,
    Shin,
    Yu,
    Sul,
    Hae,
}

impl Branch {
    pub const ALL: [Branch; 12] = [
        Branch::Ja,
        Branch::Chuk,
        Branch::In,
        Branch::Myo,
        Branch::Jin,
        Branch::Sa,
        Branch::O,
        Branch::Mi,
        Branch::Shin,
        Branch::Yu,
        Branch::Sul,
        Branch::Hae,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Branch {
        Self::ALL[index % 12]
    }

    pub fn offset(self, steps: i64) -> Branch {
        Self::from_index((self.index() as i64 + steps).rem_euclid(12) as usize)
    }

    pub fn element(self) -> Element {
        use Element::*;
        [
            Water, Earth, Wood, Wood, Earth, Fire, Fire, Earth, Metal, Metal, Earth, Water,
        ][self.index()]
    }

    /// Structural polarity (子 yang, 丑 yin, ...). Ten-god classification goes
    /// through [`Branch::main_stem`] instead, which flips 子/午/巳/亥.
    pub fn polarity(self) -> Polarity {
        if self.index() % 2 == 0 {
            Polarity::Yang
        } else {
            Polarity::Yin
        }
    }

    pub fn korean(self) -> &'static str {
        [
            "자", "축", "인", "묘", "진", "사", "오", "미", "신", "유", "술", "해",
        ][self.index()]
    }

    pub fn hanja(self) -> &'static str {
        [
            "子", "丑", "寅", "卯", "辰", "巳", "午", "未", "申", "酉", "戌", "亥",
        ][self.index()]
    }

    pub fn animal(self) -> &'static str {
        [
            "쥐", "소", "호랑이", "토끼", "용", "뱀", "말", "양", "원숭이", "닭", "개", "돼지",
        ][self.index()]
    }

    /// 지장간 in 여기 → 중기 → 정기 order. The last entry is the main stem.
    pub fn hidden_stems(self) -> &'static [Stem] {
        use Stem::*;
        match self {
            Branch::Ja => &[Im, Gye],
            Branch::Chuk => &[Gye, Sin, Gi],
            Branch::In => &[Mu, Byeong, Gap],
            Branch::Myo => &[Gap, Eul],
            Branch::Jin => &[Eul, Gye, Mu],
            Branch::Sa => &[Mu, Gyeong, Byeong],
            Branch::O => &[Byeong, Gi, Jeong],
            Branch::Mi => &[Jeong, Eul, Gi],
            Branch::Shin => &[Mu, Im, Gyeong],
            Branch::Yu => &[Gyeong, Sin],
            Branch::Sul => &[Sin, Jeong, Mu],
            Branch::Hae => &[Mu, Gap, Im],
        }
    }

    /// 정기 (본기): the stem a branch is read as for ten-god purposes.
    pub fn main_stem(self) -> Stem {
        let hidden = self.hidden_stems();
        hidden[hidden.len() - 1]
    }
}

impl fmt::Display for Branch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.korean())
    }
}

/// A single character on the chart, either a stem or a branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Symbol {
    Stem(Stem),
    Branch(Branch),
}

impl Symbol {
    pub fn element(self) -> Element {
        match self {
            Symbol::Stem(s) => s.element(),
            Symbol::Branch(b) => b.element(),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Sexagenary pillar
// ────────────────────────────────────────────────────────────────────────────

/// One of the sixty stem/branch pairs (육십갑자). Stem and branch always share parity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "PillarParts")]
pub struct Pillar {
    pub stem: Stem,
    pub branch: Branch,
}

#[derive(Deserialize)]
struct PillarParts {
    stem: Stem,
    branch: Branch,
}

impl TryFrom<PillarParts> for Pillar {
    type Error = String;

    fn try_from(parts: PillarParts) -> Result<Self, Self::Error> {
        Pillar::new(parts.stem, parts.branch).ok_or_else(|| {
            format!(
                "{}{} is not one of the sixty pillars",
                parts.stem.hanja(),
                parts.branch.hanja()
            )
        })
    }
}

impl Pillar {
    /// Returns `None` for the 60 mixed-parity pairs that never occur.
    pub fn new(stem: Stem, branch: Branch) -> Option<Pillar> {
        (stem.index() % 2 == branch.index() % 2).then_some(Pillar { stem, branch })
    }

    pub fn from_cycle(index: i64) -> Pillar {
        let i = index.rem_euclid(60) as usize;
        Pillar {
            stem: Stem::from_index(i),
            branch: Branch::from_index(i),
        }
    }

    /// Position in the cycle, 甲子 = 0 … 癸亥 = 59.
    pub fn cycle_index(self) -> usize {
        let s = self.stem.index() as i64;
        let b = self.branch.index() as i64;
        (6 * s - 5 * b).rem_euclid(60) as usize
    }

    pub fn offset(self, steps: i64) -> Pillar {
        Pillar::from_cycle(self.cycle_index() as i64 + steps)
    }

    pub fn korean(self) -> String {
        format!("{}{}", self.stem.korean(), self.branch.korean())
    }

    pub fn hanja(self) -> String {
        format!("{}{}", self.stem.hanja(), self.branch.hanja())
    }
}

impl fmt::Display for Pillar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.korean(), self.hanja())
    }
}
