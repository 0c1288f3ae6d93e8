//! Text generation seam.
//!
//! Handlers only see [`TextGenerator`], so the Gemini client can be swapped
//! for a stub in tests.

use async_trait::async_trait;
use std::sync::Arc;

use crate::error::GenerationError;
use crate::retry::{RetryPolicy, with_retry};

#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Send `prompt` to the model and return the generated text as-is.
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError>;
}

/// Wraps another generator and retries transient failures.
pub struct RetryingGenerator {
    inner: Arc<dyn TextGenerator>,
    policy: RetryPolicy,
}

impl RetryingGenerator {
    pub fn new(inner: Arc<dyn TextGenerator>, policy: RetryPolicy) -> Self {
        Self { inner, policy }
    }
}

#[async_trait]
impl TextGenerator for RetryingGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        with_retry(&self.policy, "generate", || self.inner.generate(prompt)).await
    }
}
