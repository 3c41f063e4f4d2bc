use axum::Json;
use serde_json::{json, Value};

/// `GET /health` 存活探针
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
