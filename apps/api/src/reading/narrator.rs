//! Narrator: pluggable, trait-based reading writer.
//!
//! Default when `GEMINI_API_KEY` is set: `GeminiNarrator`.
//! Otherwise: `TemplateNarrator`, deterministic and offline.
//!
//! `AppState` holds an `Arc<dyn Narrator>`, chosen at startup from config.

use async_trait::async_trait;
use tracing::info;

use crate::engine::elements::StrengthVerdict;
use crate::engine::sinsal::Nature;
use crate::engine::sipsin::TenGodGroup;
use crate::errors::AppError;
use crate::llm_client::prompts::{GROUNDING_INSTRUCTION, KOREAN_STYLE_INSTRUCTION};
use crate::llm_client::LlmClient;
use crate::reading::prompts::{READING_PROMPT_TEMPLATE, READING_SYSTEM};
use crate::reading::{chart_context, ReadingText};
use crate::saju::chart::SajuChart;
use crate::saju::ganji::Element;
use crate::saju::pillars::Slot;

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// Carried in `AppState` as `Arc<dyn Narrator>`.
#[async_trait]
pub trait Narrator: Send + Sync {
    async fn narrate(&self, chart: &SajuChart) -> Result<ReadingText, AppError>;

    /// "gemini" | "template", reported back to callers.
    fn backend(&self) -> &'static str;
}

// ────────────────────────────────────────────────────────────────────────────
// GeminiNarrator
// ────────────────────────────────────────────────────────────────────────────

pub struct GeminiNarrator(pub LlmClient);

pub fn build_reading_prompt(chart: &SajuChart) -> String {
    let name = chart
        .birth
        .name
        .as_deref()
        .map(|n| format!("{n}님"))
        .unwrap_or_else(|| "the person".to_string());
    READING_PROMPT_TEMPLATE
        .replace("{style_instruction}", KOREAN_STYLE_INSTRUCTION)
        .replace("{grounding_instruction}", GROUNDING_INSTRUCTION)
        .replace("{name}", &name)
        .replace("{chart_context}", &chart_context(chart))
}

#[async_trait]
impl Narrator for GeminiNarrator {
    async fn narrate(&self, chart: &SajuChart) -> Result<ReadingText, AppError> {
        let prompt = build_reading_prompt(chart);
        let text: ReadingText = self
            .0
            .call_json(&prompt, READING_SYSTEM)
            .await
            .map_err(|e| AppError::Llm(e.to_string()))?;
        info!("Gemini reading generated ({} chars)", text.summary.chars().count());
        Ok(text)
    }

    fn backend(&self) -> &'static str {
        "gemini"
    }
}

// ────────────────────────────────────────────────────────────────────────────
// TemplateNarrator
// ────────────────────────────────────────────────────────────────────────────

/// Deterministic reading assembled from lookup phrases. No network calls.
pub struct TemplateNarrator;

fn element_nature(element: Element) -> &'static str {
    match element {
        Element::Wood => "곧게 뻗어 나가는 나무처럼 성장과 배움을 추구하는",
        Element::Fire => "밝게 타오르는 불처럼 열정적이고 표현력이 풍부한",
        Element::Earth => "너른 대지처럼 믿음직하고 포용력이 있는",
        Element::Metal => "단단한 쇠처럼 원칙이 분명하고 결단력 있는",
        Element::Water => "흐르는 물처럼 유연하고 지혜로운",
    }
}

fn element_scene(element: Element) -> &'static str {
    match element {
        Element::Wood => "a tall pine tree in a spring forest",
        Element::Fire => "a lantern glowing over a summer night festival",
        Element::Earth => "golden rice fields under a wide autumn sky",
        Element::Metal => "a polished sword resting on white silk at dawn",
        Element::Water => "a calm river winding through misty mountains at night",
    }
}

fn element_color(element: Element) -> &'static str {
    match element {
        Element::Wood => "초록색",
        Element::Fire => "붉은색",
        Element::Earth => "노란색",
        Element::Metal => "흰색",
        Element::Water => "검은색",
    }
}

fn element_health(element: Element) -> &'static str {
    match element {
        Element::Wood => "간과 근육, 눈의 피로",
        Element::Fire => "심장과 혈액 순환",
        Element::Earth => "위장과 소화",
        Element::Metal => "폐와 호흡기, 피부",
        Element::Water => "신장과 방광, 체온 관리",
    }
}

/// Day-branch stage vitality (1–5) as a temperament phrase.
fn stage_temper(vitality: u8) -> &'static str {
    match vitality {
        5 => "스스로 일을 일으키는 추진력이 강해요.",
        4 => "새로운 일을 시작하고 키워 가는 힘이 좋아요.",
        3 => "변화에 적응하며 자기 색을 찾아가는 시기예요.",
        _ => "겉으로 드러나기보다 안으로 깊어지는 힘이 있어요.",
    }
}

#[async_trait]
impl Narrator for TemplateNarrator {
    async fn narrate(&self, chart: &SajuChart) -> Result<ReadingText, AppError> {
        Ok(template_reading(chart))
    }

    fn backend(&self) -> &'static str {
        "template"
    }
}

pub fn template_reading(chart: &SajuChart) -> ReadingText {
    let dm = &chart.day_master;
    let strength = &chart.strength;
    let who = chart
        .birth
        .name
        .as_deref()
        .map(|n| format!("{n}님은"))
        .unwrap_or_else(|| "이 사주는".to_string());

    let summary = format!(
        "{who} {}({}) 일간으로, {} 기질을 타고났어요. 전체적으로 {} 사주이며 용신은 {}이에요.",
        dm.korean,
        dm.hanja,
        element_nature(dm.element),
        strength.verdict_korean,
        strength.yongsin.korean(),
    );

    let personality = match strength.verdict {
        StrengthVerdict::Strong => format!(
            "일간의 힘이 강해 주관이 뚜렷하고 밀어붙이는 힘이 있어요. 에너지를 {} 쪽으로 풀어내면 균형이 잡혀요.",
            strength.yongsin.korean()
        ),
        StrengthVerdict::Weak => format!(
            "섬세하고 주변을 살피는 힘이 좋아요. {} 기운의 도움을 받을 때 자신감이 살아나요.",
            strength.yongsin.korean()
        ),
        StrengthVerdict::Balanced => {
            "오행이 고르게 어울려 상황에 맞게 자신을 조절하는 능력이 뛰어나요.".to_string()
        }
    };

    let personality = match chart.pillars.iter().find(|p| p.slot == Slot::Day) {
        Some(day) => format!(
            "{personality} 일지는 {}({}) 자리라 {}",
            day.stage.korean,
            day.stage.hanja,
            stage_temper(day.stage.vitality)
        ),
        None => personality,
    };

    let career = format!(
        "{} 성향이 두드러져요. {}",
        chart.archetypes.primary_name, chart.jobs.recommendation
    );

    let lucky: Vec<&str> = chart
        .sinsal
        .iter()
        .filter(|h| h.nature == Nature::Auspicious)
        .map(|h| h.name)
        .collect();
    let relationships = if lucky.is_empty() {
        "사람 사이의 인연은 스스로 가꾸어 갈 때 빛나요. 꾸준한 관심이 좋은 관계를 만들어요.".to_string()
    } else {
        format!(
            "{}이(가) 있어 필요한 순간에 도움을 주는 사람이 곁에 있어요.",
            lucky.join(", ")
        )
    };

    let wealth = if chart.ten_god_groups.share(TenGodGroup::JaeSeong) >= 0.25 {
        "재성이 뚜렷해 재물을 모으고 운용하는 감각이 있어요. 계획적인 관리가 복을 키워요.".to_string()
    } else {
        "재물은 꾸준함에서 와요. 큰 한 방보다 안정적인 저축과 전문성이 힘이 돼요.".to_string()
    };

    let weakest = chart
        .elements
        .missing
        .first()
        .copied()
        .unwrap_or(strength.yongsin);
    let health = format!(
        "{} 기운이 약한 편이라 {}에 신경 쓰면 좋아요. 규칙적인 생활이 가장 좋은 보약이에요.",
        weakest.korean(),
        element_health(weakest)
    );

    let advice = format!(
        "{} 계열의 물건을 가까이 두고, {} 기운을 살리는 활동을 해 보세요. 첫 대운은 {}세에 시작돼요.",
        element_color(strength.yongsin),
        strength.yongsin.korean(),
        chart.luck.start_age
    );

    ReadingText {
        summary,
        personality,
        career,
        relationships,
        wealth,
        health,
        advice,
        image_prompt: format!(
            "{}, traditional Korean ink painting, soft colors",
            element_scene(dm.element)
        ),
    }
}
