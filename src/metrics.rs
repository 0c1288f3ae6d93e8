use lazy_static::lazy_static;
use prometheus::{
    Encoder, Histogram, IntCounter, IntCounterVec, TextEncoder, register_histogram,
    register_int_counter, register_int_counter_vec,
};

lazy_static! {
    pub static ref REQUEST_TOTAL: IntCounterVec = register_int_counter_vec!(
        "quiz_gateway_requests_total",
        "Total number of generation requests",
        &["endpoint"]
    )
    .unwrap();
    pub static ref VALIDATION_ERRORS: IntCounter = register_int_counter!(
        "quiz_gateway_validation_errors_total",
        "Requests rejected before reaching the generation API"
    )
    .unwrap();
    pub static ref UPSTREAM_ERRORS: IntCounter = register_int_counter!(
        "quiz_gateway_upstream_errors_total",
        "Generation API calls that failed after retries"
    )
    .unwrap();
    pub static ref QUIZ_REJECTIONS: IntCounter = register_int_counter!(
        "quiz_gateway_quiz_rejections_total",
        "Model replies rejected for not matching the quiz format"
    )
    .unwrap();
    pub static ref UPSTREAM_RETRIES: IntCounter = register_int_counter!(
        "quiz_gateway_upstream_retries_total",
        "Retries issued against the generation API"
    )
    .unwrap();
    pub static ref REQUEST_LATENCY: Histogram = register_histogram!(
        "quiz_gateway_request_latency_seconds",
        "Generation request latency in seconds"
    )
    .unwrap();
}

// Render the default registry in the text exposition format
pub fn render() -> Result<String, String> {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|e| e.to_string())?;
    String::from_utf8(buffer).map_err(|e| e.to_string())
}
