//! Chat proxy tests against a local stand-in for the generative-language API.

use axum::{
    body::{Body, Bytes},
    extract::State,
    http::{Request, StatusCode, Uri},
    Router,
};
use serde_json::{json, Value};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;
use toolshelf::{
    chat::{fallback, Role},
    router, AppState, ChatBackend, ChatMessage, Config, GeminiClient,
};
use tower::ServiceExt;

type Seen = Arc<Mutex<Vec<(String, Value)>>>;

#[derive(Clone)]
struct Upstream {
    status: StatusCode,
    body: String,
    seen: Seen,
}

async fn upstream_handler(State(up): State<Upstream>, uri: Uri, body: Bytes) -> (StatusCode, String) {
    let json = serde_json::from_slice(&body).unwrap_or(Value::Null);
    up.seen.lock().unwrap().push((uri.to_string(), json));
    (up.status, up.body.clone())
}

/// Serve canned responses on an ephemeral port. Returns the API base URL and
/// the requests received so far.
async fn spawn_upstream(status: StatusCode, body: impl Into<String>) -> (String, Seen) {
    let seen: Seen = Arc::new(Mutex::new(Vec::new()));
    let upstream = Upstream {
        status,
        body: body.into(),
        seen: seen.clone(),
    };

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = Router::new().fallback(upstream_handler).with_state(upstream);
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}/v1beta", addr), seen)
}

fn client(api_base: &str) -> GeminiClient {
    GeminiClient::new(
        Some("test-key".to_string()),
        api_base,
        "gemini-1.5-flash",
        Some(Duration::from_secs(5)),
    )
    .unwrap()
}

fn success_body(text: &str) -> String {
    json!({
        "candidates": [{ "content": { "parts": [{ "text": text }], "role": "model" } }]
    })
    .to_string()
}

// ============================================================================
// Client Behaviour
// ============================================================================

#[tokio::test]
async fn test_successful_reply_is_relayed_with_timestamp() {
    let (base, seen) = spawn_upstream(StatusCode::OK, success_body("Try Claude.")).await;
    let history = vec![
        ChatMessage::new(Role::User, "hi"),
        ChatMessage::new(Role::Assistant, "hello!"),
    ];

    let reply = client(&base).send_message("Best LLM?", &history).await;

    assert_eq!(reply.response, "Try Claude.");
    assert!(reply.timestamp.is_some());

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    let (uri, body) = &seen[0];
    assert!(uri.starts_with("/v1beta/models/gemini-1.5-flash:generateContent"));
    assert!(uri.contains("key=test-key"));

    assert_eq!(body["generationConfig"]["temperature"], 0.7);
    assert_eq!(body["generationConfig"]["topK"], 40);
    assert_eq!(body["generationConfig"]["maxOutputTokens"], 1024);

    let contents = body["contents"].as_array().unwrap();
    assert_eq!(contents.len(), 3);
    assert_eq!(contents[1]["role"], "model");
    let last = contents[2]["parts"][0]["text"].as_str().unwrap();
    assert!(last.ends_with("User question: Best LLM?"));
}

#[tokio::test]
async fn test_upstream_error_status_uses_directory_fallback() {
    let (base, seen) =
        spawn_upstream(StatusCode::INTERNAL_SERVER_ERROR, "{\"error\":\"boom\"}").await;

    let reply = client(&base).send_message("hello", &[]).await;

    assert_eq!(reply.response, fallback::DIRECTORY);
    assert!(!reply.response.is_empty());
    assert!(reply.timestamp.is_none());
    // One attempt only.
    assert_eq!(seen.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_rate_limited_uses_directory_fallback() {
    let (base, _seen) = spawn_upstream(StatusCode::TOO_MANY_REQUESTS, "slow down").await;

    let reply = client(&base).send_message("hello", &[]).await;

    assert_eq!(reply.response, fallback::DIRECTORY);
}

#[tokio::test]
async fn test_malformed_success_uses_introduction_fallback() {
    let (base, _seen) = spawn_upstream(StatusCode::OK, json!({ "candidates": [] }).to_string()).await;

    let reply = client(&base).send_message("hello", &[]).await;

    assert_eq!(reply.response, fallback::INTRODUCTION);
    assert!(reply.timestamp.is_none());
}

#[tokio::test]
async fn test_non_json_success_uses_introduction_fallback() {
    let (base, _seen) = spawn_upstream(StatusCode::OK, "<html>gateway</html>").await;

    let reply = client(&base).send_message("hello", &[]).await;

    assert_eq!(reply.response, fallback::INTRODUCTION);
}

#[tokio::test]
async fn test_unreachable_upstream_uses_greeting_fallback() {
    // Grab a free port, then close it so nothing is listening.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let reply = client(&format!("http://{}/v1beta", addr))
        .send_message("hello", &[])
        .await;

    assert_eq!(reply.response, fallback::GREETING);
    assert!(reply.timestamp.is_none());
}

// ============================================================================
// Through the Router
// ============================================================================

#[tokio::test]
async fn test_chat_route_proxies_to_upstream() {
    let (base, seen) = spawn_upstream(StatusCode::OK, success_body("Use Vite.")).await;
    let dir = tempfile::tempdir().unwrap();

    let config = Config {
        host: "127.0.0.1".to_string(),
        port: 0,
        catalog_path: PathBuf::from("data/tools.json"),
        updated_tools_path: dir.path().join("updated.json"),
        site_base_url: "https://example.com".to_string(),
        chat_api_key: Some("test-key".to_string()),
        chat_api_base: base,
        chat_model: "gemini-1.5-flash".to_string(),
        chat_timeout_secs: Some(5),
        shutdown_timeout_secs: 0,
        max_body_bytes: 65536,
    };
    let state = Arc::new(AppState::new(config).unwrap());

    let req = Request::builder()
        .method("POST")
        .uri("/api/chat")
        .header("content-type", "application/json")
        .body(Body::from(
            json!({ "message": "Which bundler?", "messages": [] }).to_string(),
        ))
        .unwrap();

    let response = router(state).oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(body["response"], "Use Vite.");
    assert!(body["timestamp"].is_string());
    assert_eq!(seen.lock().unwrap().len(), 1);
}
