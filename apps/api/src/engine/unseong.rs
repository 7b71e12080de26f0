//! 십이운성: the life stage a stem passes through in each branch.

use serde::{Deserialize, Serialize};

use crate::saju::ganji::{Branch, Polarity, Stem};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TwelveStage {
    JangSaeng,
    MogYok,
    GwanDae,
    GeonNok,
    JeWang,
    Soe,
    Byeong,
    Sa,
    Myo,
    Jeol,
    Tae,
    Yang,
}

impl TwelveStage {
    pub const ALL: [TwelveStage; 12] = [
        TwelveStage::JangSaeng,
        TwelveStage::MogYok,
        TwelveStage::GwanDae,
        TwelveStage::GeonNok,
        TwelveStage::JeWang,
        TwelveStage::Soe,
        TwelveStage::Byeong,
        TwelveStage::Sa,
        TwelveStage::Myo,
        TwelveStage::Jeol,
        TwelveStage::Tae,
        TwelveStage::Yang,
    ];

    pub fn korean(self) -> &'static str {
        [
            "장생", "목욕", "관대", "건록", "제왕", "쇠", "병", "사", "묘", "절", "태", "양",
        ][self as usize]
    }

    pub fn hanja(self) -> &'static str {
        [
            "長生", "沐浴", "冠帶", "建祿", "帝旺", "衰", "病", "死", "墓", "絶", "胎", "養",
        ][self as usize]
    }

    /// Rough vitality on a 1–5 scale.
    pub fn vitality(self) -> u8 {
        match self {
            TwelveStage::JeWang | TwelveStage::GeonNok => 5,
            TwelveStage::JangSaeng | TwelveStage::GwanDae => 4,
            TwelveStage::MogYok | TwelveStage::Yang | TwelveStage::Soe => 3,
            TwelveStage::Tae | TwelveStage::Byeong | TwelveStage::Myo => 2,
            TwelveStage::Sa | TwelveStage::Jeol => 1,
        }
    }
}

fn birth_branch(stem: Stem) -> Branch {
    match stem {
        Stem::Gap => Branch::Hae,
        Stem::Byeong | Stem::Mu => Branch::In,
        Stem::Gyeong => Branch::Sa,
        Stem::Im => Branch::Shin,
        Stem::Eul => Branch::O,
        Stem::Jeong | Stem::Gi => Branch::Yu,
        Stem::Sin => Branch::Ja,
        Stem::Gye => Branch::Myo,
    }
}

/// Yang stems run forward through the branches from 장생, yin stems backward.
pub fn twelve_stage(stem: Stem, branch: Branch) -> TwelveStage {
    let start = birth_branch(stem).index() as i64;
    let at = branch.index() as i64;
    let steps = match stem.polarity() {
        Polarity::Yang => at - start,
        Polarity::Yin => start - at,
    };
    TwelveStage::ALL[steps.rem_euclid(12) as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yang_stems() {
        assert_eq!(twelve_stage(Stem::Gap, Branch::Hae), TwelveStage::JangSaeng);
        assert_eq!(twelve_stage(Stem::Gap, Branch::Myo), TwelveStage::JeWang);
        assert_eq!(twelve_stage(Stem::Gap, Branch::In), TwelveStage::GeonNok);
        assert_eq!(twelve_stage(Stem::Gap, Branch::O), TwelveStage::Sa);
        assert_eq!(twelve_stage(Stem::Gyeong, Branch::Yu), TwelveStage::JeWang);
        assert_eq!(twelve_stage(Stem::Im, Branch::Ja), TwelveStage::JeWang);
    }

    #[test]
    fn test_yin_stems_run_backward() {
        assert_eq!(twelve_stage(Stem::Eul, Branch::O), TwelveStage::JangSaeng);
        assert_eq!(twelve_stage(Stem::Eul, Branch::Sa), TwelveStage::MogYok);
        assert_eq!(twelve_stage(Stem::Eul, Branch::In), TwelveStage::JeWang);
        assert_eq!(twelve_stage(Stem::Sin, Branch::Yu), TwelveStage::GeonNok);
        assert_eq!(twelve_stage(Stem::Gye, Branch::Ja), TwelveStage::GeonNok);
    }

    #[test]
    fn test_every_stem_hits_every_stage_once() {
        for stem in Stem::ALL {
            let seen: std::collections::HashSet<TwelveStage> =
                Branch::ALL.iter().map(|&b| twelve_stage(stem, b)).collect();
            assert_eq!(seen.len(), 12, "{}", stem.hanja());
        }
    }

    #[test]
    fn test_labels() {
        assert_eq!(TwelveStage::JeWang.korean(), "제왕");
        assert_eq!(TwelveStage::Jeol.hanja(), "絶");
    }
}
