//! Router assembly: HTTP endpoints, WebSocket upgrade, static files, CORS, and HTTP tracing.

use std::sync::Arc;

use axum::{
    routing::{get, patch, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    services::{ServeDir, ServeFile},
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::state::AppState;

pub mod http;
pub mod ws;

/// Build the application router with:
/// - WebSocket at `/ws` (chat practice)
/// - JSON API under `/api/v1/...`, user id as a path segment
/// - Static SPA from `./static` with index fallback
/// - CORS (allow any origin/method/headers)
/// - HTTP trace layer (per-request spans w/ method, path, status, latency)
pub fn build_router(state: Arc<AppState>) -> Router {
    let static_service = ServeDir::new("./static")
        .append_index_html_on_directories(true)
        .not_found_service(ServeFile::new("./static/index.html"));

    Router::new()
        .route("/ws", get(ws::ws_upgrade))
        .nest("/api/v1", api_routes())
        .with_state(state)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .fallback_service(static_service)
}

fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(http::http_health))
        // Onboarding
        .route("/onboarding/questions", get(http::http_get_questions))
        .route(
            "/users/:user/onboarding",
            get(http::http_get_onboarding).post(http::http_post_onboarding),
        )
        // Profile
        .route("/users/:user/profile", get(http::http_get_profile))
        .route("/users/:user/stats", get(http::http_get_stats))
        .route("/users/:user/voice", patch(http::http_patch_voice))
        .route(
            "/users/:user/schedule",
            get(http::http_get_schedule).patch(http::http_patch_schedule),
        )
        // Modules
        .route("/modules", get(http::http_get_modules))
        .route("/modules/:module/lessons/:lesson", get(http::http_get_lesson))
        .route("/users/:user/modules/progress", get(http::http_get_module_progress))
        .route("/users/:user/modules/:module/start", post(http::http_post_start_module))
        .route("/users/:user/modules/:module/lessons", post(http::http_post_complete_lesson))
        // Badges
        .route("/badges", get(http::http_get_badges))
        .route("/users/:user/badges", get(http::http_get_user_badges))
        .route(
            "/users/:user/pronunciation/attempts",
            get(http::http_get_attempts).post(http::http_post_attempt),
        )
        // Off-day tasks
        .route("/tasks", get(http::http_get_tasks))
        .route("/users/:user/tasks", get(http::http_get_completed_tasks))
        .route("/users/:user/tasks/:task/complete", post(http::http_post_complete_task))
        // Daily phrases
        .route("/phrases", get(http::http_get_phrases))
        .route("/phrases/daily", get(http::http_get_daily_phrase))
        .route("/phrases/random", get(http::http_get_random_phrase))
        // AI
        .route("/chat/start", post(http::http_post_chat_start))
        .route("/chat/reply", post(http::http_post_chat_reply))
        .route("/tts", post(http::http_post_tts))
        .route("/speech/transcribe", post(http::http_post_transcribe))
}
