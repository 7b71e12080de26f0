//! Optional Redis cache of readings keyed by chart fingerprint.
//!
//! A failing Redis never fails a request: errors are logged and treated as a miss.

use redis::{AsyncCommands, Client as RedisClient};
use tracing::{debug, warn};

use crate::reading::Reading;

const KEY_PREFIX: &str = "saju:reading:v1:";
pub const DEFAULT_TTL_SECS: u64 = 86_400;

#[derive(Clone)]
pub struct ReadingCache {
    client: Option<RedisClient>,
    ttl_secs: u64,
}

impl ReadingCache {
    pub fn new(client: Option<RedisClient>, ttl_secs: u64) -> Self {
        Self { client, ttl_secs }
    }

    pub fn disabled() -> Self {
        Self::new(None, DEFAULT_TTL_SECS)
    }

    pub fn is_enabled(&self) -> bool {
        self.client.is_some()
    }

    pub fn key(fingerprint: &str) -> String {
        format!("{KEY_PREFIX}{fingerprint}")
    }

    pub async fn get(&self, fingerprint: &str) -> Option<Reading> {
        let client = self.client.as_ref()?;
        let key = Self::key(fingerprint);

        let mut conn = match client.get_multiplexed_async_connection().await {
            Ok(conn) => conn,
            Err(e) => {
                warn!("Reading cache unavailable: {e}");
                return None;
            }
        };
        let raw: Option<String> = match conn.get(&key).await {
            Ok(raw) => raw,
            Err(e) => {
                warn!("Reading cache GET failed: {e}");
                return None;
            }
        };

        let reading = raw.and_then(|raw| match serde_json::from_str::<Reading>(&raw) {
            Ok(reading) => Some(reading),
            Err(e) => {
                warn!("Discarding unreadable cached reading {key}: {e}");
                None
            }
        });
        if reading.is_some() {
            debug!("Reading cache hit: {key}");
        }
        reading
    }

    pub async fn put(&self, fingerprint: &str, reading: &Reading) {
        let Some(client) = self.client.as_ref() else {
            return;
        };
        let key = Self::key(fingerprint);
        let payload = match serde_json::to_string(reading) {
            Ok(payload) => payload,
            Err(e) => {
                warn!("Could not serialize reading for cache: {e}");
                return;
            }
        };

        let result = async {
            let mut conn = client.get_multiplexed_async_connection().await?;
            conn.set_ex::<_, _, ()>(&key, payload, self.ttl_secs).await
        }
        .await;
        match result {
            Ok(()) => debug!("Cached reading {key} for {}s", self.ttl_secs),
            Err(e) => warn!("Reading cache SET failed: {e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    use crate::reading::ReadingText;

    fn reading() -> Reading {
        Reading {
            id: Uuid::new_v4(),
            narrator: "template".to_string(),
            text: ReadingText {
                summary: "요약".to_string(),
                personality: String::new(),
                career: String::new(),
                relationships: String::new(),
                wealth: String::new(),
                health: String::new(),
                advice: String::new(),
                image_prompt: "moon".to_string(),
            },
            image_url: None,
            generated_at: Utc::now(),
        }
    }

    #[test]
    fn test_key_is_namespaced_and_versioned() {
        assert_eq!(ReadingCache::key("abc"), "saju:reading:v1:abc");
    }

    #[tokio::test]
    async fn test_disabled_cache_is_a_no_op() {
        let cache = ReadingCache::disabled();
        assert!(!cache.is_enabled());
        cache.put("abc", &reading()).await;
        assert!(cache.get("abc").await.is_none());
    }

    #[tokio::test]
    async fn test_unreachable_redis_degrades_to_miss() {
        // Port 1 refuses connections.
        let client = RedisClient::open("redis://127.0.0.1:1/").unwrap();
        let cache = ReadingCache::new(Some(client), 60);
        cache.put("abc", &reading()).await;
        assert!(cache.get("abc").await.is_none());
    }
}
