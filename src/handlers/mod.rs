pub mod export;
pub mod locations;
pub mod master_data;
pub mod stock_count;

use axum::response::Json;
use serde::Serialize;

/// Envelope for successful JSON responses.
#[derive(Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn new(data: T) -> Json<Self> {
        Json(Self {
            success: true,
            data,
        })
    }
}

pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}
