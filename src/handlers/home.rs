pub const STATUS_TEXT: &str = "Quiz generation backend is running";

pub async fn home_handler() -> &'static str {
    STATUS_TEXT
}
