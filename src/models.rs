use serde::{Deserialize, Serialize};
use serde_json::Value;

// Query string of GET /api/generate-text
#[derive(Deserialize, Debug, Default)]
pub struct GenerateTextParams {
    pub query: Option<String>,
}

// Body of POST /api/upload-notes; both fields are checked by the handler
#[derive(Deserialize, Debug, Default)]
pub struct UploadNotesRequest {
    pub query: Option<String>,
    pub notes: Option<Vec<Value>>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct GenerateTextResponse {
    pub response: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct UploadNotesResponse {
    pub message: String,
}

#[derive(Deserialize, Debug, Default)]
pub struct LoginRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct MessageResponse {
    pub message: String,
}

// Query extraction is lossy (bad bytes become U+FFFD), so check the raw string first
pub fn check_query_encoding(raw: Option<&str>) -> Result<(), String> {
    if let Some(raw) = raw {
        urlencoding::decode(&raw.replace('+', " "))
            .map_err(|_| "query string is not valid UTF-8".to_string())?;
    }
    Ok(())
}

/// Trim-check a required text field.
pub fn require_text(value: Option<String>, field: &str) -> Result<String, String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(format!("missing {}", field)),
    }
}
