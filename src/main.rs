use clap::Parser;
use std::process::ExitCode;
use std::sync::Arc;

use quiz_gateway::config::{Args, Settings};
use quiz_gateway::gemini::GeminiClient;
use quiz_gateway::generation::{RetryingGenerator, TextGenerator};
use quiz_gateway::logging::init_tracing;
use quiz_gateway::retry::RetryPolicy;
use quiz_gateway::router::build_router;
use quiz_gateway::state::AppState;

// this is main async function with tokio
#[tokio::main]
async fn main() -> ExitCode {
    // .env is optional
    let _ = dotenvy::dotenv();
    let args = Args::parse();

    // fail fast, nothing is served without a usable config
    let settings = match Settings::from_args(args) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    init_tracing(&settings.log_level);

    match run(settings).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Server stopped with error");
            ExitCode::FAILURE
        }
    }
}

async fn run(settings: Settings) -> Result<(), Box<dyn std::error::Error>> {
    let gemini = GeminiClient::new(settings.gemini.clone())?;
    let policy = RetryPolicy {
        max_retries: settings.max_retries,
        initial_backoff: settings.retry_backoff,
    };
    let generator: Arc<dyn TextGenerator> =
        Arc::new(RetryingGenerator::new(Arc::new(gemini), policy));

    let state = Arc::new(
        AppState::new(generator, settings.gemini.model.clone())
            .with_quiz_validation(settings.validate_quiz),
    );
    let app = build_router(state, &settings.allowed_origins);

    let addr = settings.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!(
        addr = %addr,
        model = %settings.gemini.model,
        api_base = %settings.gemini.api_base,
        origins = ?settings.allowed_origins,
        max_retries = settings.max_retries,
        validate_quiz = settings.validate_quiz,
        "Quiz gateway listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "Failed to install Ctrl-C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("Shutdown signal received");
}
