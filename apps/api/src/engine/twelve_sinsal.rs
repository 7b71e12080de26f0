//! 십이신살, read from the three-harmony group of a base branch
//! (year branch by convention, day branch as the alternate reading).

use serde::{Deserialize, Serialize};

use crate::saju::ganji::Branch;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TwelveSinsal {
    Geopsal,
    Jaesal,
    Cheonsal,
    Jisal,
    Nyeonsal,
    Wolsal,
    Mangsin,
    Jangseong,
    Banan,
    Yeokma,
    Yukhae,
    Hwagae,
}

impl TwelveSinsal {
    pub const ALL: [TwelveSinsal; 12] = [
        TwelveSinsal::Geopsal,
        TwelveSinsal::Jaesal,
        TwelveSinsal::Cheonsal,
        TwelveSinsal::Jisal,
        TwelveSinsal::Nyeonsal,
        TwelveSinsal::Wolsal,
        TwelveSinsal::Mangsin,
        TwelveSinsal::Jangseong,
        TwelveSinsal::Banan,
        TwelveSinsal::Yeokma,
        TwelveSinsal::Yukhae,
        TwelveSinsal::Hwagae,
    ];

    pub fn korean(self) -> &'static str {
        [
            "겁살", "재살", "천살", "지살", "년살", "월살", "망신살", "장성살", "반안살", "역마살",
            "육해살", "화개살",
        ][self as usize]
    }

    pub fn hanja(self) -> &'static str {
        [
            "劫殺", "災殺", "天殺", "地殺", "年殺", "月殺", "亡身殺", "將星殺", "攀鞍殺", "驛馬殺",
            "六害殺", "華蓋殺",
        ][self as usize]
    }
}

/// Branch where 겁살 sits for the three-harmony group of `base`.
fn geopsal_branch(base: Branch) -> Branch {
    match base.index() % 4 {
        0 => Branch::Sa,   // 申子辰
        1 => Branch::In,   // 巳酉丑
        2 => Branch::Hae,  // 寅午戌
        _ => Branch::Shin, // 亥卯未
    }
}

pub fn twelve_sinsal(base: Branch, target: Branch) -> TwelveSinsal {
    let steps = target.index() as i64 - geopsal_branch(base).index() as i64;
    TwelveSinsal::ALL[steps.rem_euclid(12) as usize]
}
