use std::fmt;
use std::time::Duration;

use axum::http::HeaderValue;
use clap::Parser;

use crate::error::ConfigError;

// CLI argument structure, every flag can also come from the environment
#[derive(Parser, Debug, Clone)]
#[command(name = "quiz-gateway")]
#[command(about = "HTTP backend that turns prompts and notes into Gemini generations")]
pub struct Args {
    // Port to run the server on
    #[arg(short, long, env = "PORT", default_value_t = 8080)]
    pub port: u16,

    // Interface to bind
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    // Gemini API key, required
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    pub gemini_api_key: Option<String>,

    // Model used for every generation
    #[arg(short, long, env = "GEMINI_MODEL", default_value = "gemini-2.0-flash")]
    pub model: String,

    // Base URL of the generative language API
    #[arg(
        long,
        env = "GEMINI_API_BASE",
        default_value = "https://generativelanguage.googleapis.com/v1beta"
    )]
    pub api_base: String,

    // CORS allow-list (comma-separated)
    // Example: "http://localhost:5173,https://quiz.example.com" or "*"
    #[arg(long, env = "ALLOWED_ORIGINS", default_value = "http://localhost:5173")]
    pub allowed_origins: String,

    // Outbound connect timeout in seconds
    #[arg(long, env = "CONNECT_TIMEOUT_SECS", default_value_t = 5)]
    pub connect_timeout: u64,

    // Outbound total request timeout in seconds
    #[arg(long, env = "REQUEST_TIMEOUT_SECS", default_value_t = 60)]
    pub request_timeout: u64,

    // Retries for transient upstream failures
    #[arg(long, env = "MAX_RETRIES", default_value_t = 1)]
    pub max_retries: u32,

    // Backoff before the first retry, doubled on each further attempt
    #[arg(long, env = "RETRY_BACKOFF_MS", default_value_t = 250)]
    pub retry_backoff_ms: u64,

    // Reject model replies that do not match the quiz shape
    #[arg(long, env = "VALIDATE_QUIZ", default_value_t = false)]
    pub validate_quiz: bool,

    // Default log filter, RUST_LOG wins when set
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}

/// API key wrapper that keeps the secret out of `Debug` output and logs.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(<redacted>)")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllowedOrigins {
    Any,
    List(Vec<HeaderValue>),
}

#[derive(Debug, Clone)]
pub struct GeminiSettings {
    pub api_key: ApiKey,
    pub model: String,
    pub api_base: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

/// Resolved, validated configuration. Built once at startup and never mutated.
#[derive(Debug, Clone)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    pub gemini: GeminiSettings,
    pub allowed_origins: AllowedOrigins,
    pub max_retries: u32,
    pub retry_backoff: Duration,
    pub validate_quiz: bool,
    pub log_level: String,
}

impl Settings {
    pub fn from_args(args: Args) -> Result<Self, ConfigError> {
        let api_key = match args.gemini_api_key {
            Some(key) if !key.trim().is_empty() => ApiKey::new(key.trim()),
            _ => return Err(ConfigError::MissingApiKey),
        };

        if args.request_timeout == 0 {
            return Err(ConfigError::InvalidTimeout("request timeout must be non-zero"));
        }
        if args.connect_timeout == 0 {
            return Err(ConfigError::InvalidTimeout("connect timeout must be non-zero"));
        }

        let allowed_origins = parse_origins(&args.allowed_origins)?;

        Ok(Self {
            host: args.host,
            port: args.port,
            gemini: GeminiSettings {
                api_key,
                model: args.model,
                api_base: args.api_base.trim_end_matches('/').to_string(),
                connect_timeout: Duration::from_secs(args.connect_timeout),
                request_timeout: Duration::from_secs(args.request_timeout),
            },
            allowed_origins,
            max_retries: args.max_retries,
            retry_backoff: Duration::from_millis(args.retry_backoff_ms),
            validate_quiz: args.validate_quiz,
            log_level: args.log_level,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

// "*" anywhere in the list wins, otherwise every entry must be a valid header value
pub fn parse_origins(raw: &str) -> Result<AllowedOrigins, ConfigError> {
    let entries: Vec<&str> = raw
        .split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect();

    if entries.iter().any(|o| *o == "*") {
        return Ok(AllowedOrigins::Any);
    }

    let origins = entries
        .into_iter()
        .map(|o| {
            HeaderValue::from_str(o).map_err(|_| ConfigError::InvalidOrigin(o.to_string()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(AllowedOrigins::List(origins))
}
