pub mod auth;
pub mod pages;
pub mod users;
pub mod websites;

use axum::Json;
use serde_json::{Value, json};

/// GET /health
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "UP" }))
}
