use axum::Json;
use serde_json::{json, Value};

/// Liveness probe.
pub async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "resumatch-api",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
