// Shared prompt fragments. Each service that calls the LLM keeps its own
// prompts.rs next to it; this file holds the cross-cutting pieces.

/// Voice shared by every user-facing Korean text.
pub const KOREAN_STYLE_INSTRUCTION: &str = "\
    Write in natural, warm Korean using polite 해요체. \
    Keep traditional terms (일간, 십신, 용신, 대운) and explain them in plain words \
    the first time they appear.";

/// Guardrail against fatalistic or harmful claims.
pub const GROUNDING_INSTRUCTION: &str = "\
    CRITICAL: Base every statement on the chart data provided. \
    Do NOT invent pillars, stars or luck periods that are not listed. \
    Never predict death, illness diagnoses, or disasters. \
    Present tendencies as possibilities the person can work with, not fixed fate. \
    Do not give medical, legal or financial advice.";
