pub mod config;
pub mod error;
pub mod gemini;
pub mod generation;
pub mod handlers;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod prompt;
pub mod quiz;
pub mod retry;
pub mod router;
pub mod state;
