//! 신살: spirit stars matched by table-driven rules.
//!
//! Three rule shapes cover every star:
//! - `Criteria`: a basis character (day stem, year/day/month branch) selects
//!   target characters; any other position holding one matches
//! - `Pair`: two branches on the chart form a listed pair
//! - `Complex`: whole-pillar patterns, or a character set reaching a count
//!
//! Rules live in the static `RULES` table; `find_sinsal` runs all of them and
//! folds the matches so each star is reported once.

use serde::Serialize;

use crate::saju::ganji::{Branch, Branch as B, Pillar, Stem, Stem as S, Symbol};
use crate::saju::pillars::{FourPillars, Position, Slot};

// ────────────────────────────────────────────────────────────────────────────
// Stars
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Star {
    CheoneulGwiin,
    MunchangGwiin,
    HakdangGwiin,
    Yangin,
    Geonrok,
    Geumyeorok,
    Amrok,
    Hongyeom,
    TaegeukGwiin,
    Yeokma,
    Dohwa,
    Hwagae,
    Gosin,
    Gwasuk,
    CheondeokGwiin,
    WoldeokGwiin,
    Wonjin,
    Gwimun,
    Cheonrajimang,
    Goegang,
    Baekho,
    Goran,
    Eumyangchachak,
    Hyeonchim,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Nature {
    Auspicious,
    Inauspicious,
    Neutral,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleKind {
    Criteria,
    Pair,
    Complex,
}

impl Star {
    pub fn korean(self) -> &'static str {
        match self {
            Star::CheoneulGwiin => "천을귀인",
            Star::MunchangGwiin => "문창귀인",
            Star::HakdangGwiin => "학당귀인",
            Star::Yangin => "양인살",
            Star::Geonrok => "건록",
            Star::Geumyeorok => "금여록",
            Star::Amrok => "암록",
            Star::Hongyeom => "홍염살",
            Star::TaegeukGwiin => "태극귀인",
            Star::Yeokma => "역마살",
            Star::Dohwa => "도화살",
            Star::Hwagae => "화개살",
            Star::Gosin => "고신살",
            Star::Gwasuk => "과숙살",
            Star::CheondeokGwiin => "천덕귀인",
            Star::WoldeokGwiin => "월덕귀인",
            Star::Wonjin => "원진살",
            Star::Gwimun => "귀문관살",
            Star::Cheonrajimang => "천라지망",
            Star::Goegang => "괴강살",
            Star::Baekho => "백호살",
            Star::Goran => "고란살",
            Star::Eumyangchachak => "음양차착살",
            Star::Hyeonchim => "현침살",
        }
    }

    pub fn hanja(self) -> &'static str {
        match self {
            Star::CheoneulGwiin => "天乙貴人",
            Star::MunchangGwiin => "文昌貴人",
            Star::HakdangGwiin => "學堂貴人",
            Star::Yangin => "羊刃殺",
            Star::Geonrok => "建祿",
            Star::Geumyeorok => "金輿祿",
            Star::Amrok => "暗祿",
            Star::Hongyeom => "紅艶殺",
            Star::TaegeukGwiin => "太極貴人",
            Star::Yeokma => "驛馬殺",
            Star::Dohwa => "桃花殺",
            Star::Hwagae => "華蓋殺",
            Star::Gosin => "孤辰殺",
            Star::Gwasuk => "寡宿殺",
            Star::CheondeokGwiin => "天德貴人",
            Star::WoldeokGwiin => "月德貴人",
            Star::Wonjin => "怨嗔殺",
            Star::Gwimun => "鬼門關殺",
            Star::Cheonrajimang => "天羅地網",
            Star::Goegang => "魁罡殺",
            Star::Baekho => "白虎殺",
            Star::Goran => "孤鸞殺",
            Star::Eumyangchachak => "陰陽差錯殺",
            Star::Hyeonchim => "懸針殺",
        }
    }

    pub fn nature(self) -> Nature {
        match self {
            Star::CheoneulGwiin
            | Star::MunchangGwiin
            | Star::HakdangGwiin
            | Star::Geonrok
            | Star::Geumyeorok
            | Star::Amrok
            | Star::TaegeukGwiin
            | Star::CheondeokGwiin
            | Star::WoldeokGwiin => Nature::Auspicious,
            Star::Yangin
            | Star::Gosin
            | Star::Gwasuk
            | Star::Wonjin
            | Star::Gwimun
            | Star::Cheonrajimang
            | Star::Baekho
            | Star::Goran
            | Star::Eumyangchachak => Nature::Inauspicious,
            Star::Hongyeom
            | Star::Yeokma
            | Star::Dohwa
            | Star::Hwagae
            | Star::Goegang
            | Star::Hyeonchim => Nature::Neutral,
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Star::CheoneulGwiin => "가장 으뜸가는 길신으로, 어려울 때 귀인의 도움을 받습니다.",
            Star::MunchangGwiin => "총명하고 학문과 글재주가 뛰어납니다.",
            Star::HakdangGwiin => "배움을 즐기며 학업과 연구에서 성취를 얻습니다.",
            Star::Yangin => "강한 추진력과 결단력이 있으나 과격함을 경계해야 합니다.",
            Star::Geonrok => "스스로 일어서는 힘이 있어 자립과 안정된 녹봉을 얻습니다.",
            Star::Geumyeorok => "품위와 재물이 따르며 배우자 복이 있습니다.",
            Star::Amrok => "드러나지 않는 재물 복과 숨은 조력이 있습니다.",
            Star::Hongyeom => "매력과 끼가 넘쳐 이성에게 인기가 많습니다.",
            Star::TaegeukGwiin => "시작과 끝을 잘 맺으며 종교·철학적 깊이가 있습니다.",
            Star::Yeokma => "이동과 변화가 많고 활동 무대가 넓습니다.",
            Star::Dohwa => "사람을 끄는 매력이 있어 대인관계가 화려합니다.",
            Star::Hwagae => "예술적 감수성이 뛰어나고 고독을 즐기는 면이 있습니다.",
            Star::Gosin => "독립심이 강하나 외로움을 느끼기 쉽습니다.",
            Star::Gwasuk => "홀로 서는 힘이 있으나 배우자와의 인연이 엷을 수 있습니다.",
            Star::CheondeokGwiin => "하늘의 덕으로 재앙이 흩어지고 복이 따릅니다.",
            Star::WoldeokGwiin => "달의 덕으로 흉이 줄고 인덕을 얻습니다.",
            Star::Wonjin => "가까운 사이에 까닭 없는 원망과 불화가 생기기 쉽습니다.",
            Star::Gwimun => "직관과 영감이 예민하나 신경이 과민해지기 쉽습니다.",
            Star::Cheonrajimang => "하늘과 땅의 그물에 걸린 듯 일이 막히기 쉽습니다.",
            Star::Goegang => "기세가 강하고 리더십이 있으나 극단으로 흐를 수 있습니다.",
            Star::Baekho => "사고와 혈광을 조심해야 하며 강한 기운이 있습니다.",
            Star::Goran => "배우자 인연이 외로울 수 있어 관계에 정성이 필요합니다.",
            Star::Eumyangchachak => "음양이 어긋나 가정사나 혼인에 굴곡이 생기기 쉽습니다.",
            Star::Hyeonchim => "예리한 감각과 기술이 있으며 날카로운 말을 조심해야 합니다.",
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Rule model
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Basis {
    DayStem,
    YearBranch,
    DayBranch,
    MonthBranch,
}

impl Basis {
    fn position(self) -> Position {
        match self {
            Basis::DayStem => Position::DayStem,
            Basis::YearBranch => Position::YearBranch,
            Basis::DayBranch => Position::DayBranch,
            Basis::MonthBranch => Position::MonthBranch,
        }
    }
}

/// Characters selected by a basis.
#[derive(Debug, Clone, Copy)]
pub struct Targets {
    pub stems: &'static [Stem],
    pub branches: &'static [Branch],
}

impl Targets {
    const NONE: Targets = Targets {
        stems: &[],
        branches: &[],
    };

    const fn branches(branches: &'static [Branch]) -> Targets {
        Targets {
            stems: &[],
            branches,
        }
    }

    const fn stems(stems: &'static [Stem]) -> Targets {
        Targets {
            stems,
            branches: &[],
        }
    }

    fn contains(&self, symbol: Symbol) -> bool {
        match symbol {
            Symbol::Stem(s) => self.stems.contains(&s),
            Symbol::Branch(b) => self.branches.contains(&b),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Scope {
    DayPillar,
    AnyPillar,
}

#[derive(Debug, Clone, Copy)]
pub enum Pattern {
    Pillars(&'static [(Stem, Branch)]),
    Characters {
        stems: &'static [Stem],
        branches: &'static [Branch],
        min_count: usize,
    },
}

#[derive(Clone, Copy)]
pub enum SinsalRule {
    Criteria {
        star: Star,
        bases: &'static [Basis],
        lookup: fn(Symbol) -> Targets,
    },
    Pair {
        star: Star,
        pairs: &'static [(Branch, Branch)],
    },
    Complex {
        star: Star,
        scope: Scope,
        pattern: Pattern,
    },
}

impl SinsalRule {
    pub fn star(&self) -> Star {
        match self {
            SinsalRule::Criteria { star, .. }
            | SinsalRule::Pair { star, .. }
            | SinsalRule::Complex { star, .. } => *star,
        }
    }

    pub fn kind(&self) -> RuleKind {
        match self {
            SinsalRule::Criteria { .. } => RuleKind::Criteria,
            SinsalRule::Pair { .. } => RuleKind::Pair,
            SinsalRule::Complex { .. } => RuleKind::Complex,
        }
    }

    /// Positions on `chart` that satisfy this rule. Empty when it does not fire.
    pub fn matches(&self, chart: &FourPillars) -> Vec<Position> {
        match *self {
            SinsalRule::Criteria { bases, lookup, .. } => match_criteria(chart, bases, lookup),
            SinsalRule::Pair { pairs, .. } => match_pairs(chart, pairs),
            SinsalRule::Complex { scope, pattern, .. } => match_complex(chart, scope, pattern),
        }
    }
}

fn match_criteria(
    chart: &FourPillars,
    bases: &[Basis],
    lookup: fn(Symbol) -> Targets,
) -> Vec<Position> {
    let characters = chart.characters();
    let mut positions = Vec::new();
    for basis in bases {
        let Some(symbol) = chart.symbol_at(basis.position()) else {
            continue;
        };
        let targets = lookup(symbol);
        for &(position, candidate) in &characters {
            if position != basis.position() && targets.contains(candidate) {
                positions.push(position);
            }
        }
    }
    positions
}

fn match_pairs(chart: &FourPillars, pairs: &[(Branch, Branch)]) -> Vec<Position> {
    let branches = chart.branches();
    let mut positions = Vec::new();
    for (i, &(pa, a)) in branches.iter().enumerate() {
        for &(pb, b) in &branches[i + 1..] {
            if pairs.iter().any(|&(x, y)| (x, y) == (a, b) || (y, x) == (a, b)) {
                positions.push(pa);
                positions.push(pb);
            }
        }
    }
    positions
}

fn match_complex(chart: &FourPillars, scope: Scope, pattern: Pattern) -> Vec<Position> {
    match pattern {
        Pattern::Pillars(list) => {
            let candidates: Vec<(Slot, Pillar)> = match scope {
                Scope::DayPillar => vec![(Slot::Day, chart.day)],
                Scope::AnyPillar => chart.pillars(),
            };
            candidates
                .into_iter()
                .filter(|(_, p)| list.contains(&(p.stem, p.branch)))
                .flat_map(|(slot, _)| [Position::stem_of(slot), Position::branch_of(slot)])
                .collect()
        }
        Pattern::Characters {
            stems,
            branches,
            min_count,
        } => {
            let hits: Vec<Position> = chart
                .characters()
                .into_iter()
                .filter(|(_, symbol)| match symbol {
                    Symbol::Stem(s) => stems.contains(s),
                    Symbol::Branch(b) => branches.contains(b),
                })
                .map(|(position, _)| position)
                .collect();
            if hits.len() >= min_count {
                hits
            } else {
                Vec::new()
            }
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Lookup tables
// ────────────────────────────────────────────────────────────────────────────

fn cheoneul(symbol: Symbol) -> Targets {
    match symbol {
        Symbol::Stem(S::Gap | S::Mu | S::Gyeong) => Targets::branches(&[B::Chuk, B::Mi]),
        Symbol::Stem(S::Eul | S::Gi) => Targets::branches(&[B::Ja, B::Shin]),
        Symbol::Stem(S::Byeong | S::Jeong) => Targets::branches(&[B::Hae, B::Yu]),
        Symbol::Stem(S::Sin) => Targets::branches(&[B::In, B::O]),
        Symbol::Stem(S::Im | S::Gye) => Targets::branches(&[B::Sa, B::Myo]),
        Symbol::Branch(_) => Targets::NONE,
    }
}

/// One branch per day stem, in 甲..癸 order.
fn by_day_stem(symbol: Symbol, table: &'static [[Branch; 1]; 10]) -> Targets {
    match symbol {
        Symbol::Stem(s) => Targets::branches(&table[s.index()]),
        Symbol::Branch(_) => Targets::NONE,
    }
}

static MUNCHANG: [[Branch; 1]; 10] = [
    [B::Sa], [B::O], [B::Shin], [B::Yu], [B::Shin], [B::Yu], [B::Hae], [B::Ja], [B::In], [B::Myo],
];
static HAKDANG: [[Branch; 1]; 10] = [
    [B::Hae], [B::O], [B::In], [B::Yu], [B::In], [B::Yu], [B::Sa], [B::Ja], [B::Shin], [B::Myo],
];
static GEONROK: [[Branch; 1]; 10] = [
    [B::In], [B::Myo], [B::Sa], [B::O], [B::Sa], [B::O], [B::Shin], [B::Yu], [B::Hae], [B::Ja],
];
static GEUMYEOROK: [[Branch; 1]; 10] = [
    [B::Jin], [B::Sa], [B::Mi], [B::Shin], [B::Mi], [B::Shin], [B::Sul], [B::Hae], [B::Chuk], [B::In],
];
static AMROK: [[Branch; 1]; 10] = [
    [B::Hae], [B::Sul], [B::Shin], [B::Mi], [B::Shin], [B::Mi], [B::Sa], [B::Jin], [B::In], [B::Chuk],
];
static HONGYEOM: [[Branch; 1]; 10] = [
    [B::O], [B::O], [B::In], [B::Mi], [B::Jin], [B::Jin], [B::Sul], [B::Yu], [B::Ja], [B::Shin],
];

fn munchang(symbol: Symbol) -> Targets {
    by_day_stem(symbol, &MUNCHANG)
}

fn hakdang(symbol: Symbol) -> Targets {
    by_day_stem(symbol, &HAKDANG)
}

fn geonrok(symbol: Symbol) -> Targets {
    by_day_stem(symbol, &GEONROK)
}

fn geumyeorok(symbol: Symbol) -> Targets {
    by_day_stem(symbol, &GEUMYEOROK)
}

fn amrok(symbol: Symbol) -> Targets {
    by_day_stem(symbol, &AMROK)
}

fn hongyeom(symbol: Symbol) -> Targets {
    by_day_stem(symbol, &HONGYEOM)
}

/// Yang stems only: the branch one past 건록.
fn yangin(symbol: Symbol) -> Targets {
    match symbol {
        Symbol::Stem(S::Gap) => Targets::branches(&[B::Myo]),
        Symbol::Stem(S::Byeong | S::Mu) => Targets::branches(&[B::O]),
        Symbol::Stem(S::Gyeong) => Targets::branches(&[B::Yu]),
        Symbol::Stem(S::Im) => Targets::branches(&[B::Ja]),
        _ => Targets::NONE,
    }
}

fn taegeuk(symbol: Symbol) -> Targets {
    match symbol {
        Symbol::Stem(S::Gap | S::Eul) => Targets::branches(&[B::Ja, B::O]),
        Symbol::Stem(S::Byeong | S::Jeong) => Targets::branches(&[B::Myo, B::Yu]),
        Symbol::Stem(S::Mu | S::Gi) => Targets::branches(&[B::Jin, B::Sul, B::Chuk, B::Mi]),
        Symbol::Stem(S::Gyeong | S::Sin) => Targets::branches(&[B::In, B::Hae]),
        Symbol::Stem(S::Im | S::Gye) => Targets::branches(&[B::Sa, B::Shin]),
        Symbol::Branch(_) => Targets::NONE,
    }
}

/// Three-harmony groups by `index % 4`: 申子辰, 巳酉丑, 寅午戌, 亥卯未.
fn by_harmony_group(symbol: Symbol, table: &'static [[Branch; 1]; 4]) -> Targets {
    match symbol {
        Symbol::Branch(b) => Targets::branches(&table[b.index() % 4]),
        Symbol::Stem(_) => Targets::NONE,
    }
}

static YEOKMA: [[Branch; 1]; 4] = [[B::In], [B::Hae], [B::Shin], [B::Sa]];
static DOHWA: [[Branch; 1]; 4] = [[B::Yu], [B::O], [B::Myo], [B::Ja]];
static HWAGAE: [[Branch; 1]; 4] = [[B::Jin], [B::Chuk], [B::Sul], [B::Mi]];

fn yeokma(symbol: Symbol) -> Targets {
    by_harmony_group(symbol, &YEOKMA)
}

fn dohwa(symbol: Symbol) -> Targets {
    by_harmony_group(symbol, &DOHWA)
}

fn hwagae(symbol: Symbol) -> Targets {
    by_harmony_group(symbol, &HWAGAE)
}

/// Seasonal groups 亥子丑, 寅卯辰, 巳午未, 申酉戌.
fn season(branch: Branch) -> usize {
    (branch.index() + 1) % 12 / 3
}

static GOSIN: [[Branch; 1]; 4] = [[B::In], [B::Sa], [B::Shin], [B::Hae]];
static GWASUK: [[Branch; 1]; 4] = [[B::Sul], [B::Chuk], [B::Jin], [B::Mi]];

fn gosin(symbol: Symbol) -> Targets {
    match symbol {
        Symbol::Branch(b) => Targets::branches(&GOSIN[season(b)]),
        Symbol::Stem(_) => Targets::NONE,
    }
}

fn gwasuk(symbol: Symbol) -> Targets {
    match symbol {
        Symbol::Branch(b) => Targets::branches(&GWASUK[season(b)]),
        Symbol::Stem(_) => Targets::NONE,
    }
}

/// Month branch → a stem or a branch.
fn cheondeok(symbol: Symbol) -> Targets {
    match symbol {
        Symbol::Branch(B::In) => Targets::stems(&[S::Jeong]),
        Symbol::Branch(B::Myo) => Targets::branches(&[B::Shin]),
        Symbol::Branch(B::Jin) => Targets::stems(&[S::Im]),
        Symbol::Branch(B::Sa) => Targets::stems(&[S::Sin]),
        Symbol::Branch(B::O) => Targets::branches(&[B::Hae]),
        Symbol::Branch(B::Mi) => Targets::stems(&[S::Gap]),
        Symbol::Branch(B::Shin) => Targets::stems(&[S::Gye]),
        Symbol::Branch(B::Yu) => Targets::branches(&[B::In]),
        Symbol::Branch(B::Sul) => Targets::stems(&[S::Byeong]),
        Symbol::Branch(B::Hae) => Targets::stems(&[S::Eul]),
        Symbol::Branch(B::Ja) => Targets::branches(&[B::Sa]),
        Symbol::Branch(B::Chuk) => Targets::stems(&[S::Gyeong]),
        Symbol::Stem(_) => Targets::NONE,
    }
}

fn woldeok(symbol: Symbol) -> Targets {
    static STEMS: [[Stem; 1]; 4] = [[S::Im], [S::Gyeong], [S::Byeong], [S::Gap]];
    match symbol {
        Symbol::Branch(b) => Targets::stems(&STEMS[b.index() % 4]),
        Symbol::Stem(_) => Targets::NONE,
    }
}

const DAY_STEM: &[Basis] = &[Basis::DayStem];
const YEAR_AND_DAY_BRANCH: &[Basis] = &[Basis::YearBranch, Basis::DayBranch];
const YEAR_BRANCH: &[Basis] = &[Basis::YearBranch];
const MONTH_BRANCH: &[Basis] = &[Basis::MonthBranch];

#[rustfmt::skip]
pub static RULES: &[SinsalRule] = &[
    SinsalRule::Criteria { star: Star::CheoneulGwiin, bases: DAY_STEM, lookup: cheoneul },
    SinsalRule::Criteria { star: Star::MunchangGwiin, bases: DAY_STEM, lookup: munchang },
    SinsalRule::Criteria { star: Star::HakdangGwiin, bases: DAY_STEM, lookup: hakdang },
    SinsalRule::Criteria { star: Star::Yangin, bases: DAY_STEM, lookup: yangin },
    SinsalRule::Criteria { star: Star::Geonrok, bases: DAY_STEM, lookup: geonrok },
    SinsalRule::Criteria { star: Star::Geumyeorok, bases: DAY_STEM, lookup: geumyeorok },
    SinsalRule::Criteria { star: Star::Amrok, bases: DAY_STEM, lookup: amrok },
    SinsalRule::Criteria { star: Star::Hongyeom, bases: DAY_STEM, lookup: hongyeom },
    SinsalRule::Criteria { star: Star::TaegeukGwiin, bases: DAY_STEM, lookup: taegeuk },
    SinsalRule::Criteria { star: Star::Yeokma, bases: YEAR_AND_DAY_BRANCH, lookup: yeokma },
    SinsalRule::Criteria { star: Star::Dohwa, bases: YEAR_AND_DAY_BRANCH, lookup: dohwa },
    SinsalRule::Criteria { star: Star::Hwagae, bases: YEAR_AND_DAY_BRANCH, lookup: hwagae },
    SinsalRule::Criteria { star: Star::Gosin, bases: YEAR_BRANCH, lookup: gosin },
    SinsalRule::Criteria { star: Star::Gwasuk, bases: YEAR_BRANCH, lookup: gwasuk },
    SinsalRule::Criteria { star: Star::CheondeokGwiin, bases: MONTH_BRANCH, lookup: cheondeok },
    SinsalRule::Criteria { star: Star::WoldeokGwiin, bases: MONTH_BRANCH, lookup: woldeok },
    SinsalRule::Pair {
        star: Star::Wonjin,
        pairs: &[(B::Ja, B::Mi), (B::Chuk, B::O), (B::In, B::Yu), (B::Myo, B::Shin), (B::Jin, B::Hae), (B::Sa, B::Sul)],
    },
    SinsalRule::Pair {
        star: Star::Gwimun,
        pairs: &[(B::Ja, B::Yu), (B::Chuk, B::O), (B::In, B::Mi), (B::Myo, B::Shin), (B::Jin, B::Hae), (B::Sa, B::Sul)],
    },
    SinsalRule::Pair {
        star: Star::Cheonrajimang,
        pairs: &[(B::Sul, B::Hae), (B::Jin, B::Sa)],
    },
    SinsalRule::Complex {
        star: Star::Goegang,
        scope: Scope::DayPillar,
        pattern: Pattern::Pillars(&[(S::Gyeong, B::Jin), (S::Gyeong, B::Sul), (S::Im, B::Jin), (S::Im, B::Sul), (S::Mu, B::Sul)]),
    },
    SinsalRule::Complex {
        star: Star::Baekho,
        scope: Scope::AnyPillar,
        pattern: Pattern::Pillars(&[(S::Gap, B::Jin), (S::Eul, B::Mi), (S::Byeong, B::Sul), (S::Jeong, B::Chuk), (S::Mu, B::Jin), (S::Im, B::Sul), (S::Gye, B::Chuk)]),
    },
    SinsalRule::Complex {
        star: Star::Goran,
        scope: Scope::DayPillar,
        pattern: Pattern::Pillars(&[(S::Gap, B::In), (S::Eul, B::Sa), (S::Jeong, B::Sa), (S::Mu, B::Shin), (S::Sin, B::Hae)]),
    },
    SinsalRule::Complex {
        star: Star::Eumyangchachak,
        scope: Scope::DayPillar,
        pattern: Pattern::Pillars(&[
            (S::Byeong, B::Ja), (S::Byeong, B::O), (S::Jeong, B::Chuk), (S::Jeong, B::Mi),
            (S::Mu, B::In), (S::Mu, B::Shin), (S::Sin, B::Myo), (S::Sin, B::Yu),
            (S::Im, B::Jin), (S::Im, B::Sul), (S::Gye, B::Sa), (S::Gye, B::Hae),
        ]),
    },
    SinsalRule::Complex {
        star: Star::Hyeonchim,
        scope: Scope::AnyPillar,
        pattern: Pattern::Characters {
            stems: &[S::Gap, S::Sin],
            branches: &[B::Myo, B::O, B::Shin],
            min_count: 2,
        },
    },
];

// ────────────────────────────────────────────────────────────────────────────
// Evaluation
// ────────────────────────────────────────────────────────────────────────────

/// A star present on the chart.
#[derive(Debug, Clone, Serialize)]
pub struct SinsalHit {
    pub star: Star,
    pub name: &'static str,
    pub hanja: &'static str,
    pub kind: RuleKind,
    pub nature: Nature,
    /// Chart order, deduplicated.
    pub positions: Vec<Position>,
    pub description: &'static str,
}

/// Runs every rule in `RULES` against `chart`.
pub fn find_sinsal(chart: &FourPillars) -> Vec<SinsalHit> {
    let order = chart.characters();
    let mut hits: Vec<SinsalHit> = Vec::new();
    for rule in RULES {
        let matched = rule.matches(chart);
        if matched.is_empty() {
            continue;
        }
        let star = rule.star();
        let positions: Vec<Position> = order
            .iter()
            .map(|(p, _)| *p)
            .filter(|p| matched.contains(p))
            .collect();

        match hits.iter_mut().find(|h| h.star == star) {
            Some(existing) => {
                for p in positions {
                    if !existing.positions.contains(&p) {
                        existing.positions.push(p);
                    }
                }
            }
            None => hits.push(SinsalHit {
                star,
                name: star.korean(),
                hanja: star.hanja(),
                kind: rule.kind(),
                nature: star.nature(),
                positions,
                description: star.description(),
            }),
        }
    }
    hits
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chart(year: &str, month: &str, day: &str, hour: Option<&str>) -> FourPillars {
        let parse = |s: &str| {
            let mut chars = s.chars();
            let stem = chars.next().unwrap();
            let branch = chars.next().unwrap();
            Pillar::new(
                *Stem::ALL.iter().find(|x| x.hanja().starts_with(stem)).unwrap(),
                *Branch::ALL.iter().find(|x| x.hanja().starts_with(branch)).unwrap(),
            )
            .unwrap()
        };
        FourPillars {
            year: parse(year),
            month: parse(month),
            day: parse(day),
            hour: hour.map(parse),
        }
    }

    fn star_positions(hits: &[SinsalHit], star: Star) -> Option<Vec<Position>> {
        hits.iter().find(|h| h.star == star).map(|h| h.positions.clone())
    }

    #[test]
    fn test_cheoneul_gwiin_from_day_stem() {
        // 甲 day master: 丑 and 未 are 천을귀인.
        let hits = find_sinsal(&chart("己丑", "癸酉", "甲子", Some("辛未")));
        assert_eq!(
            star_positions(&hits, Star::CheoneulGwiin),
            Some(vec![Position::YearBranch, Position::HourBranch])
        );
    }

    #[test]
    fn test_yeokma_from_year_and_day_branch_is_reported_once() {
        // 申 year: 역마 寅. 午 day: 역마 申 (the year branch).
        let hits = find_sinsal(&chart("壬申", "壬寅", "丙午", None));
        let yeokma: Vec<&SinsalHit> = hits.iter().filter(|h| h.star == Star::Yeokma).collect();
        assert_eq!(yeokma.len(), 1);
        assert_eq!(
            yeokma[0].positions,
            vec![Position::YearBranch, Position::MonthBranch]
        );
    }

    /// (star, chart where it fires, expected positions, chart where it does not).
    type Case = (
        Star,
        [&'static str; 3],
        &'static [Position],
        [&'static str; 3],
    );

    #[rustfmt::skip]
    const RULE_CASES: &[Case] = &[
        // 甲 → 巳
        (Star::MunchangGwiin, ["丁巳", "丙寅", "甲子"], &[Position::YearBranch], ["乙丑", "丙寅", "乙丑"]),
        // 甲 → 亥
        (Star::HakdangGwiin, ["乙亥", "丙寅", "甲子"], &[Position::YearBranch], ["乙丑", "丙寅", "甲子"]),
        // 甲 → 辰
        (Star::Geumyeorok, ["戊辰", "丙寅", "甲子"], &[Position::YearBranch], ["乙丑", "丙寅", "甲子"]),
        // 丙 → 申
        (Star::Amrok, ["壬申", "壬寅", "丙子"], &[Position::YearBranch], ["甲子", "丙寅", "丙子"]),
        // 甲 → 午
        (Star::Hongyeom, ["庚午", "戊寅", "甲子"], &[Position::YearBranch], ["乙丑", "戊寅", "甲子"]),
        // 甲 → 子, 午
        (Star::TaegeukGwiin, ["乙丑", "丙寅", "甲子"], &[Position::DayBranch], ["乙丑", "丙寅", "甲寅"]),
        // 子 year → 寅
        (Star::Gosin, ["甲子", "丙寅", "甲子"], &[Position::MonthBranch], ["甲子", "丁卯", "甲子"]),
        // 子 year → 戌
        (Star::Gwasuk, ["甲子", "甲戌", "丙子"], &[Position::MonthBranch], ["甲子", "丙寅", "丙子"]),
        // 寅 month → 丙
        (Star::WoldeokGwiin, ["甲子", "丙寅", "甲子"], &[Position::MonthStem], ["甲子", "戊寅", "甲子"]),
        // 子酉
        (Star::Gwimun, ["丁酉", "壬寅", "甲子"], &[Position::YearBranch, Position::DayBranch], ["乙丑", "丙寅", "甲子"]),
        // 甲寅 day
        (Star::Goran, ["乙丑", "丙寅", "甲寅"], &[Position::DayStem, Position::DayBranch], ["甲寅", "丙寅", "乙丑"]),
        // 丙子 day
        (Star::Eumyangchachak, ["甲子", "丙寅", "丙子"], &[Position::DayStem, Position::DayBranch], ["丙子", "丙寅", "甲子"]),
    ];

    #[test]
    fn test_table_rules_fire_and_stay_quiet() {
        for (star, fires, expected, quiet) in RULE_CASES {
            let hits = find_sinsal(&chart(fires[0], fires[1], fires[2], None));
            assert_eq!(
                star_positions(&hits, *star).as_deref(),
                Some(*expected),
                "{} on {:?}",
                star.korean(),
                fires
            );
            let hits = find_sinsal(&chart(quiet[0], quiet[1], quiet[2], None));
            assert!(
                star_positions(&hits, *star).is_none(),
                "{} should not fire on {:?}",
                star.korean(),
                quiet
            );
        }
    }

    #[test]
    fn test_yangin_only_for_yang_day_master() {
        let yang = find_sinsal(&chart("甲子", "丁卯", "甲寅", None));
        assert!(star_positions(&yang, Star::Yangin).is_some());
        let yin = find_sinsal(&chart("甲子", "丁卯", "乙丑", None));
        assert!(star_positions(&yin, Star::Yangin).is_none());
    }

    #[test]
    fn test_wonjin_pair() {
        let hits = find_sinsal(&chart("甲子", "丙寅", "戊辰", Some("辛未")));
        assert_eq!(
            star_positions(&hits, Star::Wonjin),
            Some(vec![Position::YearBranch, Position::HourBranch])
        );
    }

    #[test]
    fn test_cheonrajimang_pair() {
        let hits = find_sinsal(&chart("甲戌", "乙亥", "丙寅", None));
        assert!(star_positions(&hits, Star::Cheonrajimang).is_some());
    }

    #[test]
    fn test_goegang_only_on_day_pillar() {
        let on_day = find_sinsal(&chart("甲子", "丙寅", "庚辰", None));
        assert_eq!(
            star_positions(&on_day, Star::Goegang),
            Some(vec![Position::DayStem, Position::DayBranch])
        );
        let on_year = find_sinsal(&chart("庚辰", "丙寅", "甲子", None));
        assert!(star_positions(&on_year, Star::Goegang).is_none());
    }

    #[test]
    fn test_baekho_on_any_pillar() {
        let hits = find_sinsal(&chart("甲辰", "丙寅", "丙子", None));
        assert_eq!(
            star_positions(&hits, Star::Baekho),
            Some(vec![Position::YearStem, Position::YearBranch])
        );
    }

    #[test]
    fn test_hyeonchim_needs_two_characters() {
        let two = find_sinsal(&chart("甲子", "丙申", "丙子", None));
        assert_eq!(
            star_positions(&two, Star::Hyeonchim),
            Some(vec![Position::YearStem, Position::MonthBranch])
        );
        let one = find_sinsal(&chart("甲子", "丙寅", "丙子", None));
        assert!(star_positions(&one, Star::Hyeonchim).is_none());
    }

    #[test]
    fn test_cheondeok_targets_a_stem() {
        // 寅 month → 丁.
        let hits = find_sinsal(&chart("甲子", "丙寅", "丁卯", None));
        assert_eq!(
            star_positions(&hits, Star::CheondeokGwiin),
            Some(vec![Position::DayStem])
        );
    }

    #[test]
    fn test_rule_table_shape() {
        let kinds: Vec<RuleKind> = RULES.iter().map(|r| r.kind()).collect();
        assert_eq!(kinds.iter().filter(|k| **k == RuleKind::Pair).count(), 3);
        assert_eq!(RULES.len(), 24);
    }

    #[test]
    fn test_hit_carries_labels() {
        let hits = find_sinsal(&chart("己丑", "癸酉", "甲子", Some("辛未")));
        let hit = hits.iter().find(|h| h.star == Star::CheoneulGwiin).unwrap();
        assert_eq!(hit.name, "천을귀인");
        assert_eq!(hit.nature, Nature::Auspicious);
        assert_eq!(hit.kind, RuleKind::Criteria);
    }
}
