//! Reading: narrative text for a chart, from Gemini or a local template,
//! plus the chat assistant that answers follow-up questions.

pub mod cache;
pub mod chat;
pub mod handlers;
pub mod narrator;
pub mod prompts;

use chrono::{DateTime, Utc};
use reqwest::Url;
use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

use crate::saju::chart::SajuChart;

/// Narrative sections of a reading. Korean, except `image_prompt`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadingText {
    pub summary: String,
    pub personality: String,
    pub career: String,
    pub relationships: String,
    pub wealth: String,
    pub health: String,
    pub advice: String,
    pub image_prompt: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reading {
    pub id: Uuid,
    /// "gemini" | "template"
    pub narrator: String,
    pub text: ReadingText,
    pub image_url: Option<String>,
    pub generated_at: DateTime<Utc>,
}

/// `base` with `prompt` appended as one percent-encoded path segment.
pub fn image_url(base: &str, prompt: &str) -> Option<String> {
    if prompt.trim().is_empty() {
        return None;
    }
    let mut url = match Url::parse(base) {
        Ok(url) => url,
        Err(e) => {
            warn!("IMAGE_BASE_URL '{base}' is not a valid URL: {e}");
            return None;
        }
    };
    url.path_segments_mut()
        .ok()?
        .pop_if_empty()
        .push(prompt.trim());
    Some(url.to_string())
}

/// Compact chart description handed to the LLM.
pub fn chart_context(chart: &SajuChart) -> String {
    let birth = &chart.birth;
    let mut lines = vec![
        format!(
            "출생: 양력 {} / 음력 {} / {} / {}",
            birth.solar_date,
            birth.lunar_label,
            birth
                .time
                .map(|t| t.format("%H:%M").to_string())
                .unwrap_or_else(|| "시간 모름".to_string()),
            birth.gender_korean,
        ),
        format!(
            "사주: {}",
            chart
                .pillars
                .iter()
                .map(|p| format!("{} {}({})", p.slot_korean, p.korean, p.hanja))
                .collect::<Vec<_>>()
                .join(", ")
        ),
        format!(
            "일간: {}({}) {}",
            chart.day_master.korean,
            chart.day_master.hanja,
            chart.day_master.element.korean()
        ),
        format!(
            "오행: {}",
            chart
                .elements
                .shares
                .iter()
                .map(|s| format!("{} {}개", s.korean, s.count))
                .collect::<Vec<_>>()
                .join(", ")
        ),
        format!(
            "강약: {} ({:.1}점), 용신 {}, 희신 {}",
            chart.strength.verdict_korean,
            chart.strength.score,
            chart.strength.yongsin.korean(),
            chart.strength.heesin.korean()
        ),
    ];

    if !chart.sinsal.is_empty() {
        let stars: Vec<String> = chart
            .sinsal
            .iter()
            .map(|h| {
                let at: Vec<&str> = h.positions.iter().map(|p| p.korean()).collect();
                format!("{}({})", h.name, at.join("·"))
            })
            .collect();
        lines.push(format!("신살: {}", stars.join(", ")));
    }
    if !chart.relations.is_empty() {
        let labels: Vec<&str> = chart.relations.iter().map(|r| r.label.as_str()).collect();
        lines.push(format!("합충: {}", labels.join(", ")));
    }

    let luck: Vec<String> = chart
        .luck
        .periods
        .iter()
        .take(6)
        .map(|p| format!("{}세 {}", p.start_age, p.label))
        .collect();
    lines.push(format!("대운: {}", luck.join(", ")));
    lines.push(format!("유형: {}", chart.archetypes.primary_name));

    let jobs: Vec<String> = chart
        .jobs
        .top
        .iter()
        .map(|j| format!("{} {}점", j.name, j.score))
        .collect();
    lines.push(format!("추천 직업군: {}", jobs.join(", ")));

    lines.join("\n")
}
