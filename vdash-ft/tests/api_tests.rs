//! Integration tests for the vdash-ft API surface
//!
//! Drives the router directly with `oneshot` requests. Tests that need a
//! live dataset backend run a small mock on an ephemeral port.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use tower::util::ServiceExt; // for `oneshot` method

use vdash_common::config::ReviewConfig;
use vdash_common::types::{BatchUpdateRequest, TranscriptionUpdate};
use vdash_ft::{build_router, AppState};

/// Test helper: state pointing at a backend that refuses connections
fn offline_state() -> AppState {
    let config = ReviewConfig {
        backend_url: "http://127.0.0.1:1".to_string(),
        ..ReviewConfig::default()
    };
    AppState::new(&config).unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn post_empty(uri: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn extract_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Should read body");
    serde_json::from_slice(&bytes).expect("Should parse JSON")
}

#[tokio::test]
async fn health_endpoint_reports_module_and_version() {
    let app = build_router(offline_state());

    let response = app.oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["module"], "vdash-ft");
}

#[tokio::test]
async fn empty_dataset_page_has_empty_rows() {
    let app = build_router(offline_state());

    let response = app.oneshot(get("/api/review/samples?page=3")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["rows"], json!([]));
    assert_eq!(body["page"], 1); // clamped
    assert_eq!(body["total_count"], 0);
}

#[tokio::test]
async fn selecting_unknown_id_is_a_silent_no_op() {
    let app = build_router(offline_state());

    let response = app
        .oneshot(post_json("/api/review/select", json!({"id": "ghost"})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["selected"], 0);
}

#[tokio::test]
async fn editing_unknown_sample_is_404() {
    let app = build_router(offline_state());

    let response = app
        .oneshot(post_json(
            "/api/review/edit",
            json!({"id": "ghost", "transcription": "texte"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn refresh_against_unreachable_backend_is_bad_gateway() {
    let app = build_router(offline_state());

    let response = app.oneshot(post_empty("/api/review/refresh")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["success"], false);
    assert!(body["error"].as_str().unwrap().contains("Network error"));
}

#[tokio::test]
async fn save_now_with_nothing_pending_reports_zeroes() {
    let app = build_router(offline_state());

    let response = app.oneshot(post_empty("/api/review/save_now")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["saved"], 0);
    assert_eq!(body["failed_batches"], 0);
    assert_eq!(body["remaining"], 0);
}

#[tokio::test]
async fn set_filters_accepts_chip_payloads() {
    let app = build_router(offline_state());

    let response = app
        .oneshot(post_json(
            "/api/review/filters",
            json!({
                "split": "train",
                "search": "lumière",
                "chips": [
                    {"chip": "duration", "value": "short"},
                    {"chip": "status", "value": "modified"},
                    {"chip": "date", "value": "this_week"}
                ]
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["success"], true);
}

#[tokio::test]
async fn stats_on_empty_dataset_are_zeroed() {
    let app = build_router(offline_state());

    let response = app.oneshot(get("/api/review/stats")).await.unwrap();
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["total"], 0);
    assert_eq!(body["modified"], 0);
    assert_eq!(body["total_duration"], "0.0s");
}

// =============================================================================
// End-to-end against a mock backend (edit → debounce → batch save)
// =============================================================================

/// Mock exposing samples and recording batch_update requests
async fn spawn_mock(
    samples: Vec<Value>,
) -> (String, Arc<Mutex<Vec<Vec<TranscriptionUpdate>>>>) {
    use axum::extract::State;
    use axum::routing::{get as axum_get, post as axum_post};
    use axum::{Json, Router};

    type Calls = Arc<Mutex<Vec<Vec<TranscriptionUpdate>>>>;

    #[derive(Clone)]
    struct Mock {
        samples: Arc<Vec<Value>>,
        calls: Calls,
    }

    async fn samples_handler(State(mock): State<Mock>) -> Json<Value> {
        Json(json!({"success": true, "samples": &*mock.samples}))
    }

    async fn update_handler(
        State(mock): State<Mock>,
        Json(request): Json<BatchUpdateRequest>,
    ) -> Json<Value> {
        mock.calls.lock().unwrap().push(request.updates);
        Json(json!({"success": true}))
    }

    let calls: Calls = Arc::default();
    let mock = Mock {
        samples: Arc::new(samples),
        calls: Arc::clone(&calls),
    };
    let router = Router::new()
        .route("/api/finetune/samples", axum_get(samples_handler))
        .route("/api/finetune/batch_update", axum_post(update_handler))
        .with_state(mock);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    (format!("http://{addr}"), calls)
}

fn mock_sample(id: &str) -> Value {
    json!({
        "id": id,
        "transcription": "texte original",
        "split": "train",
        "duration": 4.0,
        "audio_path": format!("records/whisper/train/{id}.wav"),
        "text_path": format!("records/whisper/train/{id}.txt"),
        "json_path": format!("records/whisper/train/{id}.json"),
        "timestamp": null,
        "engine": "whisper"
    })
}

#[tokio::test]
async fn edit_is_auto_saved_after_the_quiet_period() {
    let (backend_url, calls) = spawn_mock(vec![mock_sample("a")]).await;

    let config = ReviewConfig {
        backend_url,
        autosave_delay_ms: 100,
        ..ReviewConfig::default()
    };
    let state = AppState::new(&config).unwrap();
    state.controller.load().await.unwrap();
    let app = build_router(state.clone());

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/review/edit",
            json!({"id": "a", "transcription": "texte corrigé"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["modified"], true);
    assert_eq!(body["pending"], 1);

    // Wait out the debounce with a generous margin
    tokio::time::sleep(std::time::Duration::from_millis(800)).await;

    let calls = calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0][0].transcription, "texte corrigé");
    drop(calls);
    assert_eq!(state.controller.pending_edit_count().await, 0);
}

#[tokio::test]
async fn save_now_flushes_without_waiting_for_the_debounce() {
    let (backend_url, calls) = spawn_mock(vec![mock_sample("a"), mock_sample("b")]).await;

    let config = ReviewConfig {
        backend_url,
        autosave_delay_ms: 60_000, // would never fire during the test
        ..ReviewConfig::default()
    };
    let state = AppState::new(&config).unwrap();
    state.controller.load().await.unwrap();
    let app = build_router(state);

    for (id, text) in [("a", "premier"), ("b", "second")] {
        let response = app
            .clone()
            .oneshot(post_json(
                "/api/review/edit",
                json!({"id": id, "transcription": text}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = app.oneshot(post_empty("/api/review/save_now")).await.unwrap();
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["saved"], 2);
    assert_eq!(body["remaining"], 0);

    assert_eq!(calls.lock().unwrap().len(), 1);
}
