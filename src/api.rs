use std::sync::{Arc, RwLock};

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use tower_http::cors::CorsLayer;

use crate::engine;
use crate::history::History;
use crate::params::{self, LambdaParams};
use crate::rolling::RollingWindow;

#[derive(Clone)]
pub struct AppState {
    params: Arc<RwLock<LambdaParams>>,
    rolling: Arc<RollingWindow>,
    history: Arc<History>,
}

impl AppState {
    /// Build state with parameters loaded from the configured file
    /// (defaults when the file is absent).
    pub fn from_env() -> Self {
        Self {
            params: Arc::new(RwLock::new(LambdaParams::load_from_env())),
            rolling: Arc::new(RollingWindow::new_1h()),
            history: Arc::new(History::with_capacity(2000)),
        }
    }
}

pub fn create_router() -> Router {
    router(AppState::from_env())
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "OK" }))
        .route("/lambda", post(lambda))
        .route("/lambda/batch", post(lambda_batch))
        .route("/debug/rolling", get(debug_rolling))
        .route("/debug/history", get(debug_history))
        .route("/admin/reload-params", get(admin_reload_params))
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

#[derive(serde::Deserialize)]
struct LambdaReq {
    delta_psi_squared: f64,
    tau: f64,
    eta: f64,
}

#[derive(serde::Serialize)]
struct LambdaResp {
    lambda: i64,
    /// True when the result was clipped by the upper cap.
    capped: bool,
}

fn compute_and_record(state: &AppState, req: &LambdaReq) -> LambdaResp {
    let (lambda, capped) = {
        let guard = state.params.read().expect("rwlock poisoned");
        let truncated =
            engine::truncated_lambda_with(&guard, req.delta_psi_squared, req.tau, req.eta);
        (truncated.min(guard.cap), truncated > guard.cap)
    };

    state.rolling.record(lambda, None);
    state
        .history
        .push(req.delta_psi_squared, req.tau, req.eta, lambda);

    LambdaResp { lambda, capped }
}

async fn lambda(State(state): State<AppState>, Json(body): Json<LambdaReq>) -> Json<LambdaResp> {
    Json(compute_and_record(&state, &body))
}

async fn lambda_batch(
    State(state): State<AppState>,
    Json(items): Json<Vec<LambdaReq>>,
) -> Json<Vec<LambdaResp>> {
    let out = items
        .iter()
        .map(|it| compute_and_record(&state, it))
        .collect::<Vec<_>>();
    Json(out)
}

#[derive(serde::Serialize)]
struct RollingInfo {
    window_secs: u64,
    average: f64,
    count: usize,
}

async fn debug_rolling(State(state): State<AppState>) -> Json<RollingInfo> {
    let (avg, n) = state.rolling.average_and_count();
    Json(RollingInfo {
        window_secs: state.rolling.window_secs(),
        average: avg,
        count: n,
    })
}

#[derive(serde::Serialize)]
struct HistoryOut {
    ts_unix: u64,
    delta_psi_squared: f64,
    tau: f64,
    eta: f64,
    lambda: i64,
}

async fn debug_history(State(state): State<AppState>) -> Json<Vec<HistoryOut>> {
    let rows = state.history.snapshot_last_n(10);
    let out = rows
        .into_iter()
        .map(|h| HistoryOut {
            ts_unix: h.ts_unix,
            delta_psi_squared: h.delta_psi_squared,
            tau: h.tau,
            eta: h.eta,
            lambda: h.lambda,
        })
        .collect::<Vec<_>>();
    Json(out)
}

async fn admin_reload_params(State(state): State<AppState>) -> String {
    let fresh = LambdaParams::load_from_file(params::params_path());
    match state.params.write() {
        Ok(mut p) => {
            *p = fresh;
            "reloaded".to_string()
        }
        Err(_) => "failed: lock poisoned".to_string(),
    }
}
