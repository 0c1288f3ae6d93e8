use std::sync::Arc;

use crate::generation::TextGenerator;

// app's shared state, read-only after startup
pub struct AppState {
    pub generator: Arc<dyn TextGenerator>,
    pub model: String,
    pub validate_quiz: bool, // check replies against the quiz shape before forwarding
}

impl AppState {
    pub fn new(generator: Arc<dyn TextGenerator>, model: impl Into<String>) -> Self {
        Self {
            generator,
            model: model.into(),
            validate_quiz: false,
        }
    }

    pub fn with_quiz_validation(mut self, enabled: bool) -> Self {
        self.validate_quiz = enabled;
        self
    }
}
