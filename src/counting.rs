use chrono::Utc;
use uuid::Uuid;

use crate::{error::AppError, models::StockCount, store::StockStore};

/// Record one scan of `raw_barcode` at a location.
///
/// The first scan of a barcode at a location snapshots the product's
/// name, UOM and price into a new count row at 1; every later scan of
/// the same pair bumps the same row by exactly 1 and refreshes
/// `counted_at`, leaving the snapshot as it was. The increment runs as
/// a single storage operation, so concurrent scanners never split one
/// barcode across two rows.
pub async fn scan_barcode(
    store: &dyn StockStore,
    location_id: Uuid,
    raw_barcode: &str,
) -> Result<StockCount, AppError> {
    let barcode = raw_barcode.trim();
    if barcode.is_empty() {
        return Err(AppError::Validation("barcode must not be empty".to_string()));
    }

    if store.find_location(location_id).await?.is_none() {
        return Err(AppError::NotFound(format!("location {location_id} not found")));
    }

    let Some(product) = store.find_product_by_barcode(barcode).await? else {
        return Err(AppError::NotFound(format!(
            "barcode {barcode} is not in the master catalog"
        )));
    };

    store
        .accumulate_stock_count(location_id, &product, Utc::now())
        .await
}

/// Overwrite a count with a manually keyed value.
pub async fn set_count(
    store: &dyn StockStore,
    stock_count_id: Uuid,
    count: i32,
) -> Result<StockCount, AppError> {
    if count < 0 {
        return Err(AppError::Validation("count must not be negative".to_string()));
    }

    store
        .update_stock_count_count(stock_count_id, count, Utc::now())
        .await?
        .ok_or_else(|| AppError::NotFound(format!("stock count {stock_count_id} not found")))
}
