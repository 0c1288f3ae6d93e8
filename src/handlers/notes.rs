use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use std::sync::Arc;
use std::time::Instant;

use crate::error::{AppError, GenerationError};
use crate::metrics::{REQUEST_LATENCY, REQUEST_TOTAL};
use crate::models::{UploadNotesRequest, UploadNotesResponse, require_text};
use crate::prompt::compose_quiz_prompt;
use crate::quiz::parse_quiz;
use crate::state::AppState;

// POST /api/upload-notes {query, notes}
pub async fn upload_notes_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<UploadNotesRequest>, JsonRejection>,
) -> Result<Json<UploadNotesResponse>, AppError> {
    REQUEST_TOTAL.with_label_values(&["upload_notes"]).inc();

    let Json(payload) = payload.map_err(|e| AppError::Validation(e.body_text()))?;
    let query = require_text(payload.query, "query").map_err(AppError::Validation)?;
    let notes = payload
        .notes
        .ok_or_else(|| AppError::Validation("missing notes".to_string()))?;

    let start_time = Instant::now();
    let prompt = compose_quiz_prompt(&query, &notes);
    tracing::info!(
        notes = notes.len(),
        prompt_len = prompt.len(),
        "Generating quiz from notes"
    );

    let result = state.generator.generate(&prompt).await;
    REQUEST_LATENCY.observe(start_time.elapsed().as_secs_f64());
    let text = result?;

    if state.validate_quiz {
        let quiz = parse_quiz(&text).map_err(|e| GenerationError::MalformedQuiz(e.to_string()))?;
        tracing::debug!(questions = quiz.quiz.len(), "Quiz reply passed validation");
    }

    Ok(Json(UploadNotesResponse { message: text }))
}
