//! Chat assistant: chart context plus conversation history in, one reply out.

use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::llm_client::prompts::{GROUNDING_INSTRUCTION, KOREAN_STYLE_INSTRUCTION};
use crate::llm_client::{Speaker, Turn};
use crate::reading::chart_context;
use crate::reading::prompts::CHAT_SYSTEM_TEMPLATE;
use crate::saju::chart::SajuChart;
use crate::saju::input::BirthRequest;

pub const MAX_MESSAGES: usize = 20;
const MAX_MESSAGE_CHARS: usize = 2000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatRole {
    User,
    Assistant,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub birth: BirthRequest,
    pub messages: Vec<ChatMessage>,
}

/// Checks the history and maps it onto LLM turns.
pub fn to_turns(messages: &[ChatMessage]) -> Result<Vec<Turn>, AppError> {
    if messages.is_empty() {
        return Err(AppError::Validation("messages cannot be empty".to_string()));
    }
    if messages.len() > MAX_MESSAGES {
        return Err(AppError::Validation(format!(
            "at most {MAX_MESSAGES} messages are allowed"
        )));
    }
    if messages.last().map(|m| m.role) != Some(ChatRole::User) {
        return Err(AppError::Validation(
            "the last message must come from the user".to_string(),
        ));
    }

    messages
        .iter()
        .map(|m| {
            let text = m.content.trim();
            if text.is_empty() {
                return Err(AppError::Validation("message content cannot be empty".to_string()));
            }
            if text.chars().count() > MAX_MESSAGE_CHARS {
                return Err(AppError::Validation(format!(
                    "messages must be at most {MAX_MESSAGE_CHARS} characters"
                )));
            }
            Ok(Turn {
                speaker: match m.role {
                    ChatRole::User => Speaker::User,
                    ChatRole::Assistant => Speaker::Model,
                },
                text: text.to_string(),
            })
        })
        .collect()
}

pub fn build_chat_system(chart: &SajuChart) -> String {
    CHAT_SYSTEM_TEMPLATE
        .replace("{style_instruction}", KOREAN_STYLE_INSTRUCTION)
        .replace("{grounding_instruction}", GROUNDING_INSTRUCTION)
        .replace("{chart_context}", &chart_context(chart))
}
