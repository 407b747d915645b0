//! Lambda Engine Service — Binary Entrypoint
//! Boots the Axum HTTP server, wiring routes, shared state, and middleware.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use tice_engine::api::AppState;

/// Env var for the bind address; defaults to `0.0.0.0:8000`.
const ENV_BIND_ADDR: &str = "TICE_BIND_ADDR";

/// Enable compact tracing logs. Filter comes from `RUST_LOG` when set.
fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("tice_engine=info,warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env in local/dev; no-op when absent.
    // This enables TICE_PARAMS_PATH / TICE_BIND_ADDR from .env.
    let _ = dotenvy::dotenv();

    init_tracing();

    let state = AppState::from_env();
    let router = tice_engine::api::router(state);

    let addr = std::env::var(ENV_BIND_ADDR).unwrap_or_else(|_| "0.0.0.0:8000".to_string());
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "lambda engine listening");

    axum::serve(listener, router).await?;
    Ok(())
}
