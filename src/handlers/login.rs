use axum::{Json, extract::rejection::JsonRejection};

use crate::error::AppError;
use crate::models::{LoginRequest, MessageResponse, require_text};

// Placeholder credentials, there is no user store behind this
const DEMO_USERNAME: &str = "admin";
const DEMO_PASSWORD: &str = "password";

// POST /api/login {username, password}
pub async fn login_handler(
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, AppError> {
    let Json(payload) = payload.map_err(|e| AppError::Validation(e.body_text()))?;
    let username = require_text(payload.username, "username").map_err(AppError::Validation)?;
    let password = require_text(payload.password, "password").map_err(AppError::Validation)?;

    if username == DEMO_USERNAME && password == DEMO_PASSWORD {
        tracing::info!("Login accepted");
        Ok(Json(MessageResponse {
            message: "Login successful!".to_string(),
        }))
    } else {
        tracing::info!("Login rejected");
        Err(AppError::Unauthorized("Invalid credentials".to_string()))
    }
}
