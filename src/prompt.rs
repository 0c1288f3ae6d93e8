//! Builds the text sent to the generation API.
//!
//! Plain generation forwards the caller's query untouched. Notes-based
//! generation appends the rendered notes and [`QUIZ_FORMAT_SUFFIX`].

use serde_json::Value;

/// Version of the quiz output contract described by [`QUIZ_FORMAT_SUFFIX`].
///
/// Reported by `GET /health`. Bump it whenever the suffix text changes in a
/// way that alters the reply shape (see [`crate::quiz::Quiz`]).
pub const QUIZ_FORMAT_VERSION: &str = "1";

/// Formatting instruction appended to every notes-based prompt.
///
/// Contract (version 1): the model must reply with a single JSON object
/// `{"quiz":[{"question":string,"options":[string,...],"answer":string}]}`,
/// with no whitespace or newlines outside string values. Any edit to the
/// wording is a new contract version.
pub const QUIZ_FORMAT_SUFFIX: &str = "\n\nUsing only the notes above, write the requested quiz questions. \
Respond with exactly one JSON object of the form \
{\"quiz\":[{\"question\":\"<question text>\",\"options\":[\"<option 1>\",\"<option 2>\",\"<option 3>\",\"<option 4>\"],\"answer\":\"<the correct option, copied exactly>\"}]} \
and nothing else. Do not wrap it in code fences. Do not add any whitespace or newlines \
outside of the string values.";

/// Prompt for `GET /api/generate-text`: the query itself.
pub fn compose_text_prompt(query: &str) -> String {
    query.to_string()
}

/// Render notes as newline-joined text.
///
/// String elements are emitted raw, anything else as compact JSON.
pub fn render_notes(notes: &[Value]) -> String {
    notes
        .iter()
        .map(|note| match note {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Prompt for `POST /api/upload-notes`: `query + notes + suffix`, no separators.
pub fn compose_quiz_prompt(query: &str, notes: &[Value]) -> String {
    let notes_text = render_notes(notes);
    let mut prompt = String::with_capacity(query.len() + notes_text.len() + QUIZ_FORMAT_SUFFIX.len());
    prompt.push_str(query);
    prompt.push_str(&notes_text);
    prompt.push_str(QUIZ_FORMAT_SUFFIX);
    prompt
}
