use axum::{extract::State, response::Json};
use serde::Deserialize;
use uuid::Uuid;

use crate::{counting, error::AppError, models::StockCount, store::SharedStore};

use super::ApiResponse;

// The scanner page posts camelCase field names.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanRequest {
    pub location_id: Uuid,
    pub barcode: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCountRequest {
    pub stock_count_id: Uuid,
    pub count: i32,
}

pub async fn scan(
    State(store): State<SharedStore>,
    Json(request): Json<ScanRequest>,
) -> Result<Json<ApiResponse<StockCount>>, AppError> {
    let stock_count =
        counting::scan_barcode(store.as_ref(), request.location_id, &request.barcode).await?;
    Ok(ApiResponse::new(stock_count))
}

pub async fn update_count(
    State(store): State<SharedStore>,
    Json(request): Json<UpdateCountRequest>,
) -> Result<Json<ApiResponse<StockCount>>, AppError> {
    let stock_count =
        counting::set_count(store.as_ref(), request.stock_count_id, request.count).await?;
    Ok(ApiResponse::new(stock_count))
}
