use anyhow::{Context, Result};

use crate::reading::cache::DEFAULT_TTL_SECS;

const DEFAULT_IMAGE_BASE_URL: &str = "https://image.pollinations.ai/prompt";

/// Application configuration loaded from environment variables.
/// Only malformed values fail startup; every variable has a default or is optional.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Enables Gemini readings and chat when set.
    pub gemini_api_key: Option<String>,
    /// Enables the reading cache when set.
    pub redis_url: Option<String>,
    pub image_base_url: String,
    pub reading_cache_ttl_secs: u64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: optional_env("PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: optional_env("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            gemini_api_key: optional_env("GEMINI_API_KEY"),
            redis_url: optional_env("REDIS_URL"),
            image_base_url: optional_env("IMAGE_BASE_URL")
                .unwrap_or_else(|| DEFAULT_IMAGE_BASE_URL.to_string()),
            reading_cache_ttl_secs: match optional_env("READING_CACHE_TTL_SECS") {
                Some(raw) => raw
                    .parse::<u64>()
                    .context("READING_CACHE_TTL_SECS must be a whole number of seconds")?,
                None => DEFAULT_TTL_SECS,
            },
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: 8080,
            rust_log: "info".to_string(),
            gemini_api_key: None,
            redis_url: None,
            image_base_url: DEFAULT_IMAGE_BASE_URL.to_string(),
            reading_cache_ttl_secs: DEFAULT_TTL_SECS,
        }
    }
}

/// Unset and blank variables both read as `None`.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
