#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, Response},
};
use std::sync::{Arc, Mutex};

use quiz_gateway::config::AllowedOrigins;
use quiz_gateway::error::GenerationError;
use quiz_gateway::generation::TextGenerator;
use quiz_gateway::router::build_router;
use quiz_gateway::state::AppState;

/// Generator that records every prompt and replies from a fixed script.
pub struct StubGenerator {
    reply: Mutex<Box<dyn FnMut() -> Result<String, GenerationError> + Send>>,
    prompts: Mutex<Vec<String>>,
}

impl StubGenerator {
    pub fn replying(text: &str) -> Arc<Self> {
        let text = text.to_string();
        Arc::new(Self {
            reply: Mutex::new(Box::new(move || Ok(text.clone()))),
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub fn failing(make_err: fn() -> GenerationError) -> Arc<Self> {
        Arc::new(Self {
            reply: Mutex::new(Box::new(move || Err(make_err()))),
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextGenerator for StubGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        let mut reply = self.reply.lock().unwrap();
        (reply.as_mut())()
    }
}

pub fn app_with(stub: Arc<StubGenerator>, validate_quiz: bool) -> Router {
    let state = Arc::new(
        AppState::new(stub, "stub-model").with_quiz_validation(validate_quiz),
    );
    build_router(state, &AllowedOrigins::List(vec!["http://localhost:5173".parse().unwrap()]))
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn post_json(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn body_string(response: Response<Body>) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_str(&body_string(response).await).unwrap()
}
