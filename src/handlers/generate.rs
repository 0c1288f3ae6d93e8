use axum::{
    Json,
    extract::{Query, RawQuery, State, rejection::QueryRejection},
};
use std::sync::Arc;
use std::time::Instant;

use crate::error::AppError;
use crate::metrics::{REQUEST_LATENCY, REQUEST_TOTAL};
use crate::models::{GenerateTextParams, GenerateTextResponse, check_query_encoding, require_text};
use crate::prompt::compose_text_prompt;
use crate::state::AppState;

// GET /api/generate-text?query=...
pub async fn generate_text_handler(
    State(state): State<Arc<AppState>>,
    RawQuery(raw): RawQuery,
    params: Result<Query<GenerateTextParams>, QueryRejection>,
) -> Result<Json<GenerateTextResponse>, AppError> {
    REQUEST_TOTAL.with_label_values(&["generate_text"]).inc();

    check_query_encoding(raw.as_deref()).map_err(AppError::Validation)?;
    let Query(params) = params.map_err(|e| AppError::Validation(e.body_text()))?;
    let query = require_text(params.query, "query").map_err(AppError::Validation)?;

    let start_time = Instant::now();
    let prompt = compose_text_prompt(&query);
    tracing::info!(prompt_len = prompt.len(), "Generating text");

    // failures are timed too, they are usually the slow ones
    let result = state.generator.generate(&prompt).await;
    REQUEST_LATENCY.observe(start_time.elapsed().as_secs_f64());
    let text = result?;

    Ok(Json(GenerateTextResponse { response: text }))
}
