//! history.rs — simple in-memory log of recent computations for diagnostics.

use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

/// One recorded computation: the three inputs and the resulting lambda.
#[derive(Debug, Clone)]
pub struct HistoryEntry {
    pub ts_unix: u64,
    pub delta_psi_squared: f64,
    pub tau: f64,
    pub eta: f64,
    pub lambda: i64,
}

#[derive(Debug)]
pub struct History {
    inner: Mutex<Vec<HistoryEntry>>,
    cap: usize,
}

impl History {
    pub fn with_capacity(cap: usize) -> Self {
        Self {
            inner: Mutex::new(Vec::with_capacity(cap.min(10_000))),
            cap: cap.min(10_000),
        }
    }

    pub fn push(&self, delta_psi_squared: f64, tau: f64, eta: f64, lambda: i64) {
        let entry = HistoryEntry {
            ts_unix: now_unix(),
            delta_psi_squared,
            tau,
            eta,
            lambda,
        };

        let mut v = self.inner.lock().expect("history mutex poisoned");
        v.push(entry);
        if v.len() > self.cap {
            let excess = v.len() - self.cap;
            v.drain(0..excess);
        }
    }

    pub fn snapshot_last_n(&self, n: usize) -> Vec<HistoryEntry> {
        let v = self.inner.lock().expect("history mutex poisoned");
        let len = v.len();
        let start = len.saturating_sub(n);
        v[start..].to_vec()
    }
}

fn now_unix() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}
