//! Health check endpoints for Kubernetes-style probes.
//!
//! - `/livez` - Basic liveness probe (immediate 200, no checks)
//! - `/healthz` - Reports the configured storage and cache backends

use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /livez - Basic liveness probe.
#[axum::debug_handler]
pub async fn livez() -> StatusCode {
    StatusCode::OK
}

/// GET /healthz - Backend summary.
///
/// Does not touch the cache or the store; a cache outage is not a health
/// failure because reads fall back to the store.
#[axum::debug_handler]
pub async fn healthz(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "storage": state.storage_backend,
        "cache": state.cache_backend,
    }))
}
