//! # Lambda Parameters
//!
//! Tunable knobs for the lambda formula (epsilon substitution, fixed-point
//! scale, upper cap), loadable from a TOML file.
//!
//! - Missing fields fall back to the built-in defaults (the engine constants).
//! - A missing or unparsable file falls back to defaults entirely; loading
//!   never fails, so the serving path stays infallible like the engine itself.
//! - The file path can be overridden with `TICE_PARAMS_PATH`.

use once_cell::sync::Lazy;
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::engine::{LAMBDA_CAP, LAMBDA_SCALE, ZERO_ETA_EPSILON};

/// Env var overriding the params file path.
pub const ENV_PARAMS_PATH: &str = "TICE_PARAMS_PATH";
/// Default params file, relative to the runtime working dir.
pub const DEFAULT_PARAMS_PATH: &str = "tice_params.toml";

/// Process-wide default parameters; the engine's zero-argument entrypoint
/// computes against these.
pub static DEFAULT_PARAMS: Lazy<LambdaParams> = Lazy::new(LambdaParams::default);

/// Parameters of the scaled-lambda formula.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LambdaParams {
    /// Substituted denominator for exact-zero `eta`.
    #[serde(default = "default_epsilon")]
    pub epsilon: f64,
    /// Multiplier applied to the raw ratio before truncation.
    #[serde(default = "default_scale")]
    pub scale: f64,
    /// Upper clamp for the truncated result.
    #[serde(default = "default_cap")]
    pub cap: i64,
}

fn default_epsilon() -> f64 {
    ZERO_ETA_EPSILON
}

fn default_scale() -> f64 {
    LAMBDA_SCALE
}

fn default_cap() -> i64 {
    LAMBDA_CAP
}

impl Default for LambdaParams {
    fn default() -> Self {
        Self {
            epsilon: default_epsilon(),
            scale: default_scale(),
            cap: default_cap(),
        }
    }
}

impl LambdaParams {
    /// Load parameters from a TOML file.
    /// Falls back to `Default` on read or parse errors.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Self {
        match fs::read_to_string(&path) {
            Ok(s) => toml::from_str(&s).unwrap_or_else(|e| {
                tracing::warn!(error = %e, "params file unparsable, using defaults");
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    /// Load from the configured path (env override, then the default path).
    pub fn load_from_env() -> Self {
        Self::load_from_file(params_path())
    }
}

/// Resolve the params file path from the environment.
pub fn params_path() -> PathBuf {
    std::env::var(ENV_PARAMS_PATH)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_PARAMS_PATH))
}
