use axum::{
    http::{header, HeaderValue, Method},
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::auth;
use crate::config::Config;
use crate::handlers;
use crate::AppState;

pub fn app(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/readyz", get(handlers::health::readyz));

    // Insight calls hit a paid API, so they are capped per user
    let insight_routes = Router::new()
        .route(
            "/api/analytics/ai-insights",
            post(handlers::analytics::generate_insights),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::rate_limit::rate_limit_insights,
        ));

    let protected_routes = Router::new()
        .route(
            "/api/analytics/patterns",
            get(handlers::analytics::get_patterns),
        )
        .route(
            "/api/journals",
            get(handlers::journals::list_entries).post(handlers::journals::create_entry),
        )
        .merge(insight_routes)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::middleware::require_auth,
        ));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(cors_layer(&state.config))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer(config: &Config) -> CorsLayer {
    let mut origins: Vec<HeaderValue> = Vec::new();
    match config.frontend_url.parse::<HeaderValue>() {
        Ok(origin) => origins.push(origin),
        Err(_) => tracing::warn!(url = %config.frontend_url, "FRONTEND_URL is not a valid origin"),
    }
    // In dev, also allow LAN access (e.g. testing from another device)
    if let Ok(extra) = std::env::var("CORS_EXTRA_ORIGINS") {
        for o in extra.split(',') {
            if let Ok(hv) = o.trim().parse::<HeaderValue>() {
                origins.push(hv);
            }
        }
    }

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
        .allow_credentials(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tower::ServiceExt;
    use uuid::Uuid;

    use crate::auth::jwt::{create_token, TokenType};
    use crate::auth::rate_limit::RateLimitState;
    use crate::db::journals::memory::InMemoryJournalStore;
    use crate::db::JournalStore;
    use crate::services::patterns::test_helpers::entry;
    use crate::services::summarizer::stub::StubSummarizer;
    use crate::services::summarizer::Summarizer;

    fn state_with(store: impl JournalStore + 'static, summarizer: impl Summarizer + 'static) -> AppState {
        let config = Config::test_default();
        AppState {
            journals: Arc::new(store),
            summarizer: Arc::new(summarizer),
            patterns: Arc::new(config.pattern_config()),
            rate_limiter: RateLimitState::new(config.insight_rate_limit, config.insight_rate_window_secs),
            config: Arc::new(config),
        }
    }

    fn bearer(user_id: Uuid) -> String {
        let token = create_token(user_id, TokenType::Access, 900, &Config::test_default().jwt_secret);
        format!("Bearer {}", token)
    }

    async fn send(app: Router, req: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(req).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    fn get_as(uri: &str, user_id: Uuid) -> Request<Body> {
        Request::builder()
            .uri(uri)
            .header(header::AUTHORIZATION, bearer(user_id))
            .body(Body::empty())
            .unwrap()
    }

    fn post_as(uri: &str, user_id: Uuid, body: Value) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::AUTHORIZATION, bearer(user_id))
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn owned_by(user_id: Uuid, at: Option<&str>, mood: &str, text: Option<&str>) -> crate::models::journal::JournalEntry {
        let mut e = entry(at, mood, text);
        e.user_id = user_id;
        e
    }

    #[tokio::test]
    async fn test_health_is_public() {
        let app = app(state_with(InMemoryJournalStore::default(), StubSummarizer::replying("")));
        let req = Request::builder().uri("/health").body(Body::empty()).unwrap();

        let (status, body) = send(app, req).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["service"], "moodlog-api");
    }

    #[tokio::test]
    async fn test_readyz_reports_store_outage() {
        let app = app(state_with(InMemoryJournalStore::unavailable(), StubSummarizer::replying("")));
        let req = Request::builder().uri("/readyz").body(Body::empty()).unwrap();

        let (status, body) = send(app, req).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["status"], "not_ready");
    }

    #[tokio::test]
    async fn test_patterns_require_auth() {
        let app = app(state_with(InMemoryJournalStore::default(), StubSummarizer::replying("")));
        let req = Request::builder()
            .uri("/api/analytics/patterns")
            .body(Body::empty())
            .unwrap();

        let (status, body) = send(app, req).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"]["code"], 401);
    }

    #[tokio::test]
    async fn test_refresh_token_is_rejected() {
        let app = app(state_with(InMemoryJournalStore::default(), StubSummarizer::replying("")));
        let token = create_token(Uuid::new_v4(), TokenType::Refresh, 900, "test-secret");
        let req = Request::builder()
            .uri("/api/analytics/patterns")
            .header(header::AUTHORIZATION, format!("Bearer {}", token))
            .body(Body::empty())
            .unwrap();

        let (status, _) = send(app, req).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_patterns_report_for_caller() {
        let user = Uuid::new_v4();
        let store = InMemoryJournalStore::with_entries(vec![
            owned_by(user, Some("2026-02-10T09:05:00Z"), "anxious", Some("Panic before standup")),
            owned_by(user, Some("2026-02-10T09:40:00Z"), "sad", Some("still panicking, so much pressure")),
            owned_by(user, Some("2026-02-10T09:55:00Z"), "happy", None),
            owned_by(Uuid::new_v4(), Some("2026-02-10T09:00:00Z"), "sad", Some("fear")),
        ]);
        let app = app(state_with(store, StubSummarizer::replying("")));

        let (status, body) = send(app, get_as("/api/analytics/patterns", user)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["anxietyHours"], json!([[9, ["anxious", "sad", "happy"]]]));
        assert_eq!(body["anxietyDays"], json!([["Tuesday", ["anxious", "sad", "happy"]]]));
        assert_eq!(body["stressKeywords"]["panic"], 2);
        assert_eq!(body["stressKeywords"]["pressure"], 1);
        assert_eq!(body["stressKeywords"]["fear"], 0);
    }

    #[tokio::test]
    async fn test_patterns_load_failure() {
        let app = app(state_with(InMemoryJournalStore::unavailable(), StubSummarizer::replying("")));

        let (status, body) = send(app, get_as("/api/analytics/patterns", Uuid::new_v4())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"]["message"], "Failed to load journal entries");
        assert!(body.get("anxietyHours").is_none());
    }

    #[tokio::test]
    async fn test_insights_returned_verbatim() {
        let user = Uuid::new_v4();
        let store = InMemoryJournalStore::with_entries(vec![owned_by(user, None, "sad", Some("long day"))]);
        let app = app(state_with(store, StubSummarizer::replying("Evenings look heavy.")));

        let (status, body) = send(app, post_as("/api/analytics/ai-insights", user, json!({}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "insights": "Evenings look heavy." }));
    }

    #[tokio::test]
    async fn test_insights_collaborator_failure() {
        let app = app(state_with(InMemoryJournalStore::default(), StubSummarizer::failing(500)));

        let (status, body) =
            send(app, post_as("/api/analytics/ai-insights", Uuid::new_v4(), json!({}))).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["error"]["message"], "AI analysis failed");
    }

    #[tokio::test]
    async fn test_insights_are_rate_limited_per_user() {
        let mut state = state_with(InMemoryJournalStore::default(), StubSummarizer::replying("ok"));
        state.rate_limiter = RateLimitState::new(1, 3600);
        let app = app(state);
        let user = Uuid::new_v4();

        let (first, _) = send(app.clone(), post_as("/api/analytics/ai-insights", user, json!({}))).await;
        let (second, _) = send(app.clone(), post_as("/api/analytics/ai-insights", user, json!({}))).await;
        let (other, _) =
            send(app, post_as("/api/analytics/ai-insights", Uuid::new_v4(), json!({}))).await;

        assert_eq!(first, StatusCode::OK);
        assert_eq!(second, StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(other, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_create_then_list_entries() {
        let app = app(state_with(InMemoryJournalStore::default(), StubSummarizer::replying("")));
        let user = Uuid::new_v4();

        let (status, created) = send(
            app.clone(),
            post_as(
                "/api/journals",
                user,
                json!({ "mood": "anxious", "text": "exam stress", "created_at": "2020-01-01T09:00:00Z" }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["mood"], "anxious");

        let (status, _) = send(
            app.clone(),
            post_as("/api/journals", user, json!({ "mood": "calm" })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, listed) = send(app, get_as("/api/journals", user)).await;
        assert_eq!(status, StatusCode::OK);
        let moods: Vec<&str> = listed
            .as_array()
            .unwrap()
            .iter()
            .map(|e| e["mood"].as_str().unwrap())
            .collect();
        assert_eq!(moods, vec!["calm", "anxious"], "newest first");
    }

    #[tokio::test]
    async fn test_create_entry_validates_mood() {
        let app = app(state_with(InMemoryJournalStore::default(), StubSummarizer::replying("")));

        let (status, body) = send(
            app,
            post_as("/api/journals", Uuid::new_v4(), json!({ "mood": "" })),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"]["code"], 422);
    }
}
