use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Running count for one product at one location. At most one row exists per
/// (location_id, barcode); repeat scans increment `count` instead of adding
/// rows. Product attributes are a snapshot taken at the first scan so later
/// catalog edits do not rewrite history.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct StockCount {
    pub id: Uuid,
    pub location_id: Uuid,
    pub barcode: String,
    pub product_name: String,
    pub uom: String,
    pub selling_price: i64,
    pub count: i32,
    pub counted_at: DateTime<Utc>,
}
