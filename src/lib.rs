// src/lib.rs
// Public library surface for integration tests (and potential reuse).

pub mod api;
pub mod engine;
pub mod history;
pub mod params;
pub mod rolling;

// ---- Re-exports for stable public API ----
// The pure formula is the crate's core; callers embedding the engine
// should not need to know the module layout.
pub use crate::engine::{compute_lambda, compute_lambda_with, guarded_div};
pub use crate::params::LambdaParams;

// Convenient router access: `tice_engine::api::router` or `tice_engine::router`
pub use crate::api::{create_router, router, AppState};
