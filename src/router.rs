use axum::{
    Router,
    http::{Method, header},
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::config::AllowedOrigins;
use crate::handlers::{
    generate_text_handler, health_handler, home_handler, login_handler, metrics_handler,
    upload_notes_handler,
};
use crate::state::AppState;

pub fn cors_layer(origins: &AllowedOrigins) -> CorsLayer {
    let allow_origin = match origins {
        AllowedOrigins::Any => AllowOrigin::any(),
        AllowedOrigins::List(list) => AllowOrigin::list(list.iter().cloned()),
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
}

// creating the router with routes
pub fn build_router(state: Arc<AppState>, origins: &AllowedOrigins) -> Router {
    Router::new()
        .route("/", get(home_handler))
        .route("/health", get(health_handler))
        .route("/metrics", get(metrics_handler))
        .route("/api/generate-text", get(generate_text_handler))
        .route("/api/upload-notes", post(upload_notes_handler))
        .route("/api/login", post(login_handler))
        .layer(cors_layer(origins))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
