use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
/// Returns service status, version and the number of live analyses.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    let analyses = state.store.count().await;
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "screener-api",
        "analyses": analyses
    }))
}

/// GET /api/ping
pub async fn ping_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({ "message": state.config.ping_message }))
}
