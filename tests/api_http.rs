// tests/api_http.rs
//
// HTTP-level tests for the public API Router without opening sockets.
// We exercise the router directly via tower::ServiceExt::oneshot.
//
// Covered:
// - GET /health
// - POST /lambda
// - POST /lambda/batch
// - GET /debug/rolling and /debug/history after computations
// - GET /admin/reload-params

use axum::{
    body::{self, Body},
    http::{Request, StatusCode},
    Router,
};
use serde_json::json;
use serde_json::Value as Json;
use tower::ServiceExt as _; // for `oneshot`

use tice_engine::api::AppState;

const BODY_LIMIT: usize = 1024 * 1024; // 1MB, safe for tests

/// Build the same Router the binary uses.
fn test_router() -> Router {
    tice_engine::router(AppState::from_env())
}

async fn get_json(app: &Router, uri: &str) -> Json {
    let req = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .expect("build GET request");
    let resp = app.clone().oneshot(req).await.expect("oneshot GET");
    assert!(resp.status().is_success(), "GET {uri} should be 2xx");
    let bytes = body::to_bytes(resp.into_body(), BODY_LIMIT)
        .await
        .expect("read body")
        .to_vec();
    serde_json::from_slice(&bytes).expect("parse json")
}

async fn post_json(app: &Router, uri: &str, payload: Json) -> Json {
    let req = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(payload.to_string()))
        .expect("build POST request");
    let resp = app.clone().oneshot(req).await.expect("oneshot POST");
    assert!(
        resp.status().is_success(),
        "POST {uri} should be 2xx, got {}",
        resp.status()
    );
    let bytes = body::to_bytes(resp.into_body(), BODY_LIMIT)
        .await
        .expect("read json")
        .to_vec();
    serde_json::from_slice(&bytes).expect("parse json")
}

#[tokio::test]
async fn api_health_returns_200_and_ok_body() {
    let app = test_router();

    let req = Request::builder()
        .method("GET")
        .uri("/health")
        .body(Body::empty())
        .expect("build GET /health");

    let resp = app.oneshot(req).await.expect("oneshot /health");
    assert_eq!(resp.status(), StatusCode::OK, "health should be 200");

    let bytes = body::to_bytes(resp.into_body(), BODY_LIMIT)
        .await
        .expect("read body")
        .to_vec();
    let body = String::from_utf8(bytes).expect("utf8");
    assert_eq!(body.trim(), "OK", "health body should be 'OK'");
}

#[tokio::test]
async fn api_lambda_computes_and_reports_cap() {
    let app = test_router();

    let v = post_json(
        &app,
        "/lambda",
        json!({ "delta_psi_squared": 2.0, "tau": 3.0, "eta": 1.0 }),
    )
    .await;
    assert_eq!(v["lambda"], 600);
    assert_eq!(v["capped"], false);

    // zero eta is substituted, large ratio hits the cap
    let v = post_json(
        &app,
        "/lambda",
        json!({ "delta_psi_squared": 1.0, "tau": 1.0, "eta": 0.0 }),
    )
    .await;
    assert_eq!(v["lambda"], 10_000);
    assert_eq!(v["capped"], true);

    // landing exactly on the cap without being clipped is not "capped"
    let v = post_json(
        &app,
        "/lambda",
        json!({ "delta_psi_squared": 100.0, "tau": 1.0, "eta": 1.0 }),
    )
    .await;
    assert_eq!(v["lambda"], 10_000);
    assert_eq!(v["capped"], false);
}

#[tokio::test]
async fn api_batch_scores_multiple_items_in_order() {
    let app = test_router();

    let items = json!([
        { "delta_psi_squared": 2.0, "tau": 3.0, "eta": 1.0 },
        { "delta_psi_squared": 1.0, "tau": -1.0, "eta": 1.0 },
        { "delta_psi_squared": 5.0, "tau": 400.0, "eta": 1.0 }
    ]);
    let v = post_json(&app, "/lambda/batch", items).await;

    let arr = v.as_array().expect("array response");
    assert_eq!(arr.len(), 3);
    assert_eq!(arr[0]["lambda"], 600);
    assert_eq!(arr[1]["lambda"], -100);
    assert_eq!(arr[2]["lambda"], 10_000);
    assert_eq!(arr[2]["capped"], true);
}

#[tokio::test]
async fn api_debug_endpoints_reflect_recent_computations() {
    let app = test_router();

    let _ = post_json(
        &app,
        "/lambda",
        json!({ "delta_psi_squared": 2.0, "tau": 3.0, "eta": 1.0 }),
    )
    .await;

    let rolling = get_json(&app, "/debug/rolling").await;
    assert_eq!(rolling["count"], 1);
    assert_eq!(rolling["average"], 600.0);
    assert!(rolling.get("window_secs").is_some(), "missing 'window_secs'");

    let history = get_json(&app, "/debug/history").await;
    let rows = history.as_array().expect("history array");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["lambda"], 600);
    assert_eq!(rows[0]["tau"], 3.0);
}

#[tokio::test]
async fn api_admin_reload_params_succeeds() {
    let app = test_router();

    let req = Request::builder()
        .method("GET")
        .uri("/admin/reload-params")
        .body(Body::empty())
        .expect("build GET /admin/reload-params");

    let resp = app.oneshot(req).await.expect("oneshot reload");
    assert_eq!(resp.status(), StatusCode::OK);

    let bytes = body::to_bytes(resp.into_body(), BODY_LIMIT)
        .await
        .expect("read body")
        .to_vec();
    assert_eq!(String::from_utf8(bytes).expect("utf8"), "reloaded");
}
