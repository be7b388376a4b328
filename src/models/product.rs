use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Master catalog entry. `barcode` is the unique business key; imports
/// upsert on it, so re-importing a file overwrites attributes in place.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Product {
    pub id: Uuid,
    pub barcode: String,
    pub product_name: String,
    pub uom: String,
    /// Whole-number rupiah amount (no decimal places are stored).
    pub selling_price: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One catalog record as it arrives from an import (CSV upload or the JSON
/// import endpoint), before it has an id or timestamps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProduct {
    pub barcode: String,
    pub product_name: String,
    pub uom: String,
    pub selling_price: i64,
}
