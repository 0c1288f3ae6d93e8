mod common;

use axum::http::StatusCode;
use serde_json::json;
use tower::util::ServiceExt;

use common::{StubGenerator, app_with, body_json, body_string, get, post_json};
use quiz_gateway::error::GenerationError;
use quiz_gateway::metrics::REQUEST_LATENCY;
use quiz_gateway::prompt::{QUIZ_FORMAT_SUFFIX, QUIZ_FORMAT_VERSION};

#[tokio::test]
async fn home_returns_plain_text() {
    let app = app_with(StubGenerator::replying("unused"), false);

    let response = app.oneshot(get("/")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response.headers()["content-type"].to_str().unwrap().to_string();
    assert!(content_type.starts_with("text/plain"));
    assert!(!body_string(response).await.is_empty());
}

#[tokio::test]
async fn health_reports_model() {
    let app = app_with(StubGenerator::replying("unused"), false);

    let response = app.oneshot(get("/health")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["model"], "stub-model");
    assert_eq!(body["quiz_format"], QUIZ_FORMAT_VERSION);
}

#[tokio::test]
async fn generate_text_forwards_query_verbatim() {
    let stub = StubGenerator::replying("Ownership means one owner.");
    let app = app_with(stub.clone(), false);

    let response = app
        .oneshot(get("/api/generate-text?query=What%20is%20ownership%3F%20%26%20why"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({"response": "Ownership means one owner."})
    );
    assert_eq!(stub.prompts(), vec!["What is ownership? & why".to_string()]);
}

#[tokio::test]
async fn generate_text_without_query_is_400_and_skips_generation() {
    let stub = StubGenerator::replying("unused");

    for uri in ["/api/generate-text", "/api/generate-text?query=", "/api/generate-text?query=%20%20"] {
        let response = app_with(stub.clone(), false).oneshot(get(uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{uri}");
        let body = body_json(response).await;
        assert_eq!(body["error"], "Validation error");
        assert_eq!(body["details"], "missing query");
    }

    assert!(stub.prompts().is_empty());
}

#[tokio::test]
async fn generate_text_rejects_invalid_utf8_query() {
    let stub = StubGenerator::replying("unused");

    let response = app_with(stub.clone(), false)
        .oneshot(get("/api/generate-text?query=%FF"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["details"], "query string is not valid UTF-8");
    assert!(stub.prompts().is_empty());
}

#[tokio::test]
async fn generate_text_keeps_encoded_replacement_character() {
    let stub = StubGenerator::replying("ok");

    let response = app_with(stub.clone(), false)
        .oneshot(get("/api/generate-text?query=a%EF%BF%BDb"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(stub.prompts(), vec!["a\u{FFFD}b".to_string()]);
}

#[tokio::test]
async fn failed_generations_are_timed() {
    let before = REQUEST_LATENCY.get_sample_count();

    let response = app_with(StubGenerator::failing(|| GenerationError::Timeout), false)
        .oneshot(get("/api/generate-text?query=slow"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert!(REQUEST_LATENCY.get_sample_count() > before);
}

#[tokio::test]
async fn upload_notes_example_round_trip() {
    let stub = StubGenerator::replying("{quiz:[...]}");
    let app = app_with(stub.clone(), false);

    let response = app
        .oneshot(post_json(
            "/api/upload-notes",
            r#"{"query":"Generate 1 question.","notes":["HTML basics"]}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({"message": "{quiz:[...]}"}));
    assert_eq!(
        stub.prompts(),
        vec![format!("Generate 1 question.HTML basics{}", QUIZ_FORMAT_SUFFIX)]
    );
}

#[tokio::test]
async fn upload_notes_renders_mixed_notes() {
    let stub = StubGenerator::replying("ok");
    let app = app_with(stub.clone(), false);

    let response = app
        .oneshot(post_json(
            "/api/upload-notes",
            r#"{"query":"Q:","notes":["first",2,{"k":"v"}]}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        stub.prompts(),
        vec![format!("Q:first\n2\n{{\"k\":\"v\"}}{}", QUIZ_FORMAT_SUFFIX)]
    );
}

#[tokio::test]
async fn upload_notes_rejects_missing_fields() {
    let stub = StubGenerator::replying("unused");

    let cases = [
        (r#"{"notes":["a"]}"#, Some("missing query")),
        (r#"{"query":"  ","notes":["a"]}"#, Some("missing query")),
        (r#"{"query":"q"}"#, Some("missing notes")),
        (r#"{"query":"q","notes":"not a list"}"#, None),
        ("not json", None),
    ];

    for (body, details) in cases {
        let response = app_with(stub.clone(), false)
            .oneshot(post_json("/api/upload-notes", body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{body}");
        if let Some(details) = details {
            assert_eq!(body_json(response).await["details"], details);
        }
    }

    assert!(stub.prompts().is_empty());
}

#[tokio::test]
async fn upstream_failure_becomes_json_5xx() {
    let app = app_with(StubGenerator::failing(|| GenerationError::Unauthorized), false);
    let response = app.oneshot(get("/api/generate-text?query=hi")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body = body_json(response).await;
    assert_eq!(body["error"], "External service error");

    let app = app_with(StubGenerator::failing(|| GenerationError::Timeout), false);
    let response = app
        .oneshot(post_json("/api/upload-notes", r#"{"query":"q","notes":[]}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn upstream_body_is_not_leaked() {
    let app = app_with(
        StubGenerator::failing(|| GenerationError::Upstream {
            status: 400,
            body: "echo of the prompt".to_string(),
        }),
        false,
    );

    let response = app.oneshot(get("/api/generate-text?query=hi")).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    assert!(!body_string(response).await.contains("echo of the prompt"));
}

#[tokio::test]
async fn quiz_validation_rejects_malformed_reply() {
    let app = app_with(StubGenerator::replying("{quiz:[...]}"), true);

    let response = app
        .oneshot(post_json("/api/upload-notes", r#"{"query":"q","notes":["n"]}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn quiz_validation_passes_well_formed_reply() {
    let reply = r#"{"quiz":[{"question":"Tag for a link?","options":["<a>","<p>"],"answer":"<a>"}]}"#;
    let app = app_with(StubGenerator::replying(reply), true);

    let response = app
        .oneshot(post_json("/api/upload-notes", r#"{"query":"q","notes":["n"]}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["message"], reply);
}

#[tokio::test]
async fn login_placeholder_check() {
    let stub = StubGenerator::replying("unused");

    let ok = app_with(stub.clone(), false)
        .oneshot(post_json("/api/login", r#"{"username":"admin","password":"password"}"#))
        .await
        .unwrap();
    assert_eq!(ok.status(), StatusCode::OK);
    assert_eq!(body_json(ok).await["message"], "Login successful!");

    let bad = app_with(stub.clone(), false)
        .oneshot(post_json("/api/login", r#"{"username":"admin","password":"nope"}"#))
        .await
        .unwrap();
    assert_eq!(bad.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(bad).await["message"], "Invalid credentials");

    let missing = app_with(stub, false)
        .oneshot(post_json("/api/login", r#"{"username":"admin"}"#))
        .await
        .unwrap();
    assert_eq!(missing.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn cors_allows_configured_origin_only() {
    let stub = StubGenerator::replying("unused");

    let allowed = app_with(stub.clone(), false)
        .oneshot(
            axum::http::Request::builder()
                .uri("/")
                .header("origin", "http://localhost:5173")
                .body(axum::body::Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(
        allowed.headers()["access-control-allow-origin"],
        "http://localhost:5173"
    );

    let other = app_with(stub, false)
        .oneshot(
            axum::http::Request::builder()
                .uri("/")
                .header("origin", "http://evil.test")
                .body(axum::body::Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert!(other.headers().get("access-control-allow-origin").is_none());
}

#[tokio::test]
async fn metrics_exposes_request_counter() {
    let stub = StubGenerator::replying("text");
    app_with(stub.clone(), false)
        .oneshot(get("/api/generate-text?query=count%20me"))
        .await
        .unwrap();

    let response = app_with(stub, false).oneshot(get("/metrics")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(body.contains("quiz_gateway_requests_total"));
}
