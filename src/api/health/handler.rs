// Unauthenticated liveness probe

use axum::Json;
use chrono::Utc;
use serde_json::{json, Value};

pub async fn health_handler() -> Json<Value> {
    let host: String = hostname::get()
        .ok()
        .and_then(|h| h.into_string().ok())
        .unwrap_or_else(|| "unknown".to_string());

    Json(json!({
        "status": "ok",
        "service": env!("CARGO_PKG_NAME"),
        "hostname": host,
        "date": Utc::now().to_rfc3339(),
    }))
}
