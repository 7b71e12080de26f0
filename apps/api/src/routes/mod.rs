pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::calendar::handlers as calendar;
use crate::reading::handlers as reading;
use crate::saju::handlers as saju;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Chart API
        .route("/api/v1/saju", post(saju::handle_saju))
        .route("/api/v1/fortune/yearly", post(saju::handle_yearly_fortune))
        // Calendar API
        .route("/api/v1/calendar/convert", post(calendar::handle_convert))
        .route(
            "/api/v1/calendar/solar-terms/:year",
            get(calendar::handle_solar_terms),
        )
        // Reading API
        .route("/api/v1/reading", post(reading::handle_reading))
        .route("/api/v1/chat", post(reading::handle_chat))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{header, Method, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::config::Config;
    use crate::reading::cache::ReadingCache;
    use crate::reading::narrator::TemplateNarrator;

    fn app() -> Router {
        build_router(AppState {
            config: Config {
                image_base_url: "https://image.example.com/prompt".to_string(),
                ..Config::default()
            },
            llm: None,
            narrator: Arc::new(TemplateNarrator),
            cache: ReadingCache::disabled(),
        })
    }

    async fn send(method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        let response = app().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, json)
    }

    fn birth() -> Value {
        json!({"year": 1949, "month": 10, "day": 1, "hour": 15, "gender": "male", "name": "홍길동"})
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = send(Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["narrator"], "template");
        assert_eq!(body["chat"], false);
    }

    #[tokio::test]
    async fn test_saju_chart() {
        let (status, body) = send(Method::POST, "/api/v1/saju", Some(birth())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["four_pillars"]["day"]["stem"], "gap");
        assert_eq!(body["pillars"].as_array().map(Vec::len), Some(4));
    }

    #[tokio::test]
    async fn test_saju_rejects_invalid_date() {
        let (status, body) = send(
            Method::POST,
            "/api/v1/saju",
            Some(json!({"year": 2023, "month": 2, "day": 30, "gender": "female"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "CALENDAR_ERROR");
    }

    #[tokio::test]
    async fn test_yearly_fortune() {
        let (status, body) = send(
            Method::POST,
            "/api/v1/fortune/yearly",
            Some(json!({"birth": birth(), "from_year": 2024, "to_year": 2026})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["years"].as_array().map(Vec::len), Some(3));
    }

    #[tokio::test]
    async fn test_yearly_fortune_rejects_long_span() {
        let (status, _) = send(
            Method::POST,
            "/api/v1/fortune/yearly",
            Some(json!({"birth": birth(), "from_year": 2000, "to_year": 2040})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_yearly_fortune_rejects_years_outside_calendar() {
        for (from, to) in [(-10, i32::MAX), (i32::MIN, i32::MIN + 1)] {
            let (status, body) = send(
                Method::POST,
                "/api/v1/fortune/yearly",
                Some(json!({"birth": birth(), "from_year": from, "to_year": to})),
            )
            .await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{from}..={to}");
            assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        }
    }

    #[tokio::test]
    async fn test_calendar_convert() {
        let (status, body) = send(
            Method::POST,
            "/api/v1/calendar/convert",
            Some(json!({"calendar": "lunar", "year": 2023, "month": 1, "day": 1})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["solar"], "2023-01-22");
    }

    #[tokio::test]
    async fn test_solar_terms() {
        let (status, body) = send(Method::GET, "/api/v1/calendar/solar-terms/2024", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["terms"].as_array().map(Vec::len), Some(24));

        let (status, _) = send(Method::GET, "/api/v1/calendar/solar-terms/1800", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_reading_uses_template_narrator() {
        let (status, body) = send(Method::POST, "/api/v1/reading", Some(birth())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["cached"], false);
        assert_eq!(body["reading"]["narrator"], "template");
        let url = body["reading"]["image_url"].as_str().unwrap_or_default();
        assert!(url.starts_with("https://image.example.com/prompt/"));
    }

    #[tokio::test]
    async fn test_chat_without_gemini_is_unavailable() {
        let (status, body) = send(
            Method::POST,
            "/api/v1/chat",
            Some(json!({"birth": birth(), "messages": [{"role": "user", "content": "올해 운세는?"}]})),
        )
        .await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["error"]["code"], "AI_UNAVAILABLE");
    }
}
