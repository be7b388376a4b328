use axum::{
    extract::{Path, State},
    http::header,
    response::IntoResponse,
};
use chrono::Utc;
use uuid::Uuid;

use crate::{
    error::AppError,
    export::{self, LocationCounts},
    store::SharedStore,
};

fn csv_attachment(filename: String, csv: String) -> impl IntoResponse {
    (
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        csv,
    )
}

pub async fn export_location(
    State(store): State<SharedStore>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let location = store
        .find_location(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("location {id} not found")))?;

    let stock_counts = store.list_stock_counts_by_location(id).await?;
    let csv = export::location_csv(&location, &stock_counts)?;
    let filename = export::location_filename(&location, Utc::now().date_naive());

    Ok(csv_attachment(filename, csv))
}

pub async fn export_all(State(store): State<SharedStore>) -> Result<impl IntoResponse, AppError> {
    let mut report = Vec::new();
    for location in store.list_locations().await? {
        let stock_counts = store.list_stock_counts_by_location(location.id).await?;
        report.push(LocationCounts {
            location,
            stock_counts,
        });
    }

    let csv = export::all_locations_csv(&report)?;
    let filename = export::all_locations_filename(Utc::now().date_naive());

    Ok(csv_attachment(filename, csv))
}
