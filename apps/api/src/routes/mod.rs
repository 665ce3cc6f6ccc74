pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::ats;
use crate::chat;
use crate::jobs;
use crate::progress;
use crate::state::AppState;

/// Maximum upload size accepted by the multipart endpoints (10MB).
const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Realtime progress channel
        .route("/ws", get(progress::ws_handler))
        // ATS analysis
        .route("/api/ats/analyze", post(ats::handlers::handle_analyze))
        // Job search
        .route("/api/jobs/search", post(jobs::handlers::handle_search))
        .route("/api/jobs/locations", get(jobs::handlers::handle_locations))
        .route("/api/jobs/titles", get(jobs::handlers::handle_job_titles))
        // Career-advice chat
        .route(
            "/api/chat/sessions",
            get(chat::handlers::handle_list_sessions).post(chat::handlers::handle_create_session),
        )
        .route(
            "/api/chat/sessions/:id",
            get(chat::handlers::handle_get_session).delete(chat::handlers::handle_delete_session),
        )
        .route(
            "/api/chat/sessions/:id/messages",
            post(chat::handlers::handle_send_message),
        )
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .with_state(state)
}
