use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

// RUST_LOG wins over the configured level
pub fn init_tracing(log_level: &str) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();
}
