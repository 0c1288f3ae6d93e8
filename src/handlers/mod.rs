mod generate;
mod health;
mod home;
mod login;
mod metrics;
mod notes;

pub use generate::generate_text_handler;
pub use health::health_handler;
pub use home::home_handler;
pub use login::login_handler;
pub use metrics::metrics_handler;
pub use notes::upload_notes_handler;
