use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use uuid::Uuid;

use crate::{
    error::AppError,
    models::{Location, NewLocation, StockCount},
    store::SharedStore,
};

use super::ApiResponse;

pub async fn create_location(
    State(store): State<SharedStore>,
    Json(form): Json<NewLocation>,
) -> Result<(StatusCode, Json<ApiResponse<Location>>), AppError> {
    let name = form.name.trim();
    if name.is_empty() {
        return Err(AppError::Validation(
            "location name must not be empty".to_string(),
        ));
    }

    let location = store
        .insert_location(NewLocation {
            name: name.to_string(),
            description: form.description,
            pic_name: form.pic_name,
        })
        .await?;

    Ok((StatusCode::CREATED, ApiResponse::new(location)))
}

pub async fn locations_list(
    State(store): State<SharedStore>,
) -> Result<Json<ApiResponse<Vec<Location>>>, AppError> {
    let locations = store.list_locations().await?;
    Ok(ApiResponse::new(locations))
}

pub async fn location_detail(
    State(store): State<SharedStore>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Location>>, AppError> {
    let location = store
        .find_location(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("location {id} not found")))?;

    Ok(ApiResponse::new(location))
}

// Newest scans first, the order the counting screen shows them in.
pub async fn location_stock_counts(
    State(store): State<SharedStore>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<StockCount>>>, AppError> {
    if store.find_location(id).await?.is_none() {
        return Err(AppError::NotFound(format!("location {id} not found")));
    }

    let stock_counts = store.list_stock_counts_by_location(id).await?;
    Ok(ApiResponse::new(stock_counts))
}
