use axum::{Json, extract::State, response::IntoResponse};
use std::sync::Arc;

use crate::prompt::QUIZ_FORMAT_VERSION;
use crate::state::AppState;

pub async fn health_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "model": state.model,
        "quiz_format": QUIZ_FORMAT_VERSION,
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}
