//! End-to-end tests for the relay router.
//!
//! The router is driven in-process with `tower::ServiceExt::oneshot`; the
//! upstream chat-completions endpoint is a stub axum server on an ephemeral
//! port that counts calls and captures the prompt it was sent, so tests can
//! assert both the HTTP contract and that rejected requests never reach
//! the model.

use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};

use axum::{
    Json, Router,
    body::Body,
    extract::{Request, State},
    http::{Method, StatusCode, header},
    response::Response,
    routing::post,
};
use chrono::{DateTime, Utc};
use serde_json::{Value, json};
use tower::ServiceExt;

use api::{AppState, app};
use llm_service::{GroqService, LlmModelConfig};

/* ------------------------------ stub upstream ----------------------------- */

#[derive(Clone)]
struct StubState {
    calls: Arc<AtomicUsize>,
    last_prompt: Arc<Mutex<Option<String>>>,
}

async fn completions(State(stub): State<StubState>, Json(body): Json<Value>) -> Json<Value> {
    stub.calls.fetch_add(1, Ordering::SeqCst);
    let prompt = body["messages"][0]["content"]
        .as_str()
        .unwrap_or_default()
        .to_string();
    *stub.last_prompt.lock().unwrap() = Some(prompt);

    Json(json!({
        "choices": [{"message": {"role": "assistant", "content": "stub reply"}}]
    }))
}

/// Starts a well-behaved upstream stub; returns its base URL and handles to
/// the call counter and captured prompt.
async fn spawn_stub() -> (String, StubState) {
    let state = StubState {
        calls: Arc::new(AtomicUsize::new(0)),
        last_prompt: Arc::new(Mutex::new(None)),
    };

    let router = Router::new()
        .route("/chat/completions", post(completions))
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    (format!("http://{addr}"), state)
}

/// Starts an upstream stub that always fails with a 500.
async fn spawn_failing_stub() -> String {
    let router = Router::new().route(
        "/chat/completions",
        post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "model exploded") }),
    );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    format!("http://{addr}")
}

/* --------------------------------- helpers -------------------------------- */

fn relay(endpoint: &str) -> Router {
    let cfg = LlmModelConfig {
        model: "llama-3.1-8b-instant".into(),
        endpoint: endpoint.into(),
        api_key: Some("gsk-test".into()),
        temperature: Some(0.0),
        max_tokens: None,
        timeout_secs: Some(5),
    };
    let svc = GroqService::new(cfg).unwrap();
    app(Arc::new(AppState::new(Arc::new(svc))))
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap()
}

async fn body_json(res: Response) -> Value {
    let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn chat_body(mode: &str, text: &str) -> Value {
    json!({
        "mode": mode,
        "message": {"text": text, "image": null, "timestamp": "2025-01-01T00:00:00"},
        "history": {"messages": [], "images": []},
        "chat_id": "chat-1"
    })
}

/* ---------------------------------- tests --------------------------------- */

#[tokio::test]
async fn root_greets() {
    let app = relay("http://127.0.0.1:9");

    let res = app.oneshot(get("/")).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(body_json(res).await, json!({"message": "Hello, Med!"}));
}

#[tokio::test]
async fn status_always_ok_without_upstream() {
    // Endpoint points at nothing routable; /status must not care.
    let app = relay("http://127.0.0.1:9");

    let res = app.oneshot(get("/status")).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(body_json(res).await, json!({"status": "ok"}));
}

#[tokio::test]
async fn chat_happy_path() {
    let (endpoint, stub) = spawn_stub().await;
    let app = relay(&endpoint);

    let before = Utc::now();
    let res = app
        .oneshot(post_json(
            "/chat",
            &chat_body("BrainMRI", "What does this scan show?"),
        ))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let body = body_json(res).await;
    assert_eq!(body["response"], "stub reply");
    assert_eq!(body["mode_used"], "BrainMRI");

    let ts = DateTime::parse_from_rfc3339(body["timestamp"].as_str().unwrap())
        .expect("timestamp must be valid ISO-8601");
    assert!(ts.with_timezone(&Utc) >= before);

    assert_eq!(stub.calls.load(Ordering::SeqCst), 1);
    assert_eq!(
        stub.last_prompt.lock().unwrap().as_deref(),
        Some("You are a medical AI assistant specializing in Brain MRI analysis. What does this scan show?")
    );
}

#[tokio::test]
async fn chat_echoes_every_mode() {
    let (endpoint, stub) = spawn_stub().await;
    let app = relay(&endpoint);

    for mode in ["Auto", "BrainMRI", "ChestX-ray", "Histopathology"] {
        let res = app
            .clone()
            .oneshot(post_json("/chat", &chat_body(mode, "hi")))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(body_json(res).await["mode_used"], mode);
    }

    assert_eq!(stub.calls.load(Ordering::SeqCst), 4);
}

#[tokio::test]
async fn chat_forwards_history_window() {
    let (endpoint, stub) = spawn_stub().await;
    let app = relay(&endpoint);

    let messages: Vec<Value> = (0..6)
        .map(|i| {
            json!({
                "type": "text",
                "content": format!("turn {i}"),
                "sender": if i % 2 == 0 { "user" } else { "bot" },
                "timestamp": "2025-01-01T00:00:00"
            })
        })
        .collect();

    let body = json!({
        "mode": "Auto",
        "message": {"text": "and now?", "image": null, "timestamp": "2025-01-01T00:00:00"},
        "history": {"messages": messages, "images": []},
        "chat_id": "chat-1"
    });

    let res = app.oneshot(post_json("/chat", &body)).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let prompt = stub.last_prompt.lock().unwrap().clone().unwrap();
    assert!(prompt.starts_with("Conversation history:\n"));
    assert!(!prompt.contains("turn 0"), "only the last five turns go upstream");
    assert!(prompt.contains("bot: turn 1"));
    assert!(prompt.contains("bot: turn 5"));
}

#[tokio::test]
async fn missing_chat_id_is_rejected_before_upstream() {
    let (endpoint, stub) = spawn_stub().await;
    let app = relay(&endpoint);

    let body = json!({
        "mode": "Auto",
        "message": {"text": "hi", "image": null, "timestamp": "2025-01-01T00:00:00"},
        "history": {"messages": [], "images": []}
    });

    let res = app.oneshot(post_json("/chat", &body)).await.unwrap();
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body = body_json(res).await;
    assert_eq!(body["error"], "UNPROCESSABLE_ENTITY");
    assert!(body["message"].is_string());

    assert_eq!(stub.calls.load(Ordering::SeqCst), 0, "no upstream call may happen");
}

#[tokio::test]
async fn unknown_mode_is_rejected_before_upstream() {
    let (endpoint, stub) = spawn_stub().await;
    let app = relay(&endpoint);

    let res = app
        .oneshot(post_json("/chat", &chat_body("Dermatology", "hi")))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body_json(res).await["error"], "UNPROCESSABLE_ENTITY");

    assert_eq!(stub.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn malformed_json_is_rejected_before_upstream() {
    let (endpoint, stub) = spawn_stub().await;
    let app = relay(&endpoint);

    let req = Request::builder()
        .method(Method::POST)
        .uri("/chat")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let res = app.oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(res).await["error"], "BAD_REQUEST");

    assert_eq!(stub.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn upstream_failure_maps_to_bad_gateway() {
    let endpoint = spawn_failing_stub().await;
    let app = relay(&endpoint);

    let res = app
        .oneshot(post_json("/chat", &chat_body("Auto", "hi")))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_GATEWAY);

    let body = body_json(res).await;
    assert_eq!(body["error"], "UPSTREAM_ERROR");
    assert!(body["message"].as_str().unwrap().contains("HTTP status"));
}
