//! # Lambda Engine
//! Pure, testable logic that maps `(delta_psi_squared, tau, eta)` → scaled lambda.
//! No I/O, suitable for unit tests and offline evaluation.
//!
//! The scaled lambda is a clamped integer measure of `delta_psi_squared * tau / eta`:
//! guarded division, ×100 scaling, truncation toward zero, upper cap at 10_000.
//! There is deliberately no lower bound and no input validation; callers may
//! pass negative or extreme values and get the formula's answer as-is.

use crate::params::{LambdaParams, DEFAULT_PARAMS};

/// Substituted denominator when `eta` is exactly zero.
pub const ZERO_ETA_EPSILON: f64 = 1e-8;

/// Fixed-point scale applied to the raw ratio before truncation.
pub const LAMBDA_SCALE: f64 = 100.0;

/// Upper clamp for the scaled result.
pub const LAMBDA_CAP: i64 = 10_000;

/// Compute the scaled, upper-clamped lambda with the default parameters.
///
/// Steps:
/// 1. Exact-zero `eta` is substituted with [`ZERO_ETA_EPSILON`]; near-zero
///    but nonzero `eta` is passed through untouched.
/// 2. `raw_lambda = delta_psi_squared * tau / eta` in f64.
/// 3. Scale by 100 and truncate toward zero (`-1.5` → `-1`).
/// 4. Clamp to at most [`LAMBDA_CAP`].
///
/// Always returns a value; there is no error path. The i64 cast saturates,
/// so extreme intermediates cannot wrap or panic.
pub fn compute_lambda(delta_psi_squared: f64, tau: f64, eta: f64) -> i64 {
    compute_lambda_with(&DEFAULT_PARAMS, delta_psi_squared, tau, eta)
}

/// Same formula with tunable epsilon/scale/cap.
pub fn compute_lambda_with(
    params: &LambdaParams,
    delta_psi_squared: f64,
    tau: f64,
    eta: f64,
) -> i64 {
    truncated_lambda_with(params, delta_psi_squared, tau, eta).min(params.cap)
}

/// The truncated value before the upper clamp. Lets callers tell a result
/// that was clipped by the cap from one landing exactly on it.
pub fn truncated_lambda_with(
    params: &LambdaParams,
    delta_psi_squared: f64,
    tau: f64,
    eta: f64,
) -> i64 {
    let raw_lambda = guarded_div(delta_psi_squared * tau, eta, params.epsilon);
    (raw_lambda * params.scale) as i64
}

/// Division with sentinel substitution: an exact-zero denominator is replaced
/// by `epsilon` instead of surfacing an error.
pub fn guarded_div(num: f64, den: f64, epsilon: f64) -> f64 {
    if den == 0.0 {
        num / epsilon
    } else {
        num / den
    }
}
