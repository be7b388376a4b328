pub mod memory;
pub mod pg;

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{
    error::AppError,
    models::{Location, NewLocation, NewProduct, Product, StockCount},
};

pub use memory::MemoryStore;
pub use pg::PgStore;

/// Storage capability behind the import/scan/export flows.
///
/// Absence is reported as `Ok(None)` / `Ok(false)`; callers decide whether
/// that is an error. The two upserts (`upsert_products` keyed on barcode,
/// `accumulate_stock_count` keyed on location + barcode) must be atomic:
/// concurrent scans of one barcode at one location may not produce two rows
/// or lose an increment.
#[async_trait]
pub trait StockStore: Send + Sync {
    async fn insert_location(&self, new: NewLocation) -> Result<Location, AppError>;

    async fn list_locations(&self) -> Result<Vec<Location>, AppError>;

    async fn find_location(&self, id: Uuid) -> Result<Option<Location>, AppError>;

    /// Insert-or-overwrite by barcode; returns the number of rows written.
    /// The input must not contain duplicate barcodes.
    async fn upsert_products(&self, products: &[NewProduct]) -> Result<u64, AppError>;

    async fn list_products(&self) -> Result<Vec<Product>, AppError>;

    async fn find_product_by_barcode(&self, barcode: &str) -> Result<Option<Product>, AppError>;

    /// Returns false when no product had that id.
    async fn delete_product(&self, id: Uuid) -> Result<bool, AppError>;

    /// Find-or-create-then-increment for one (location, barcode) pair, as a
    /// single atomic operation: the first scan creates the row with count 1
    /// and the product snapshot, later scans bump `count` and `counted_at`
    /// without touching the snapshot.
    async fn accumulate_stock_count(
        &self,
        location_id: Uuid,
        product: &Product,
        counted_at: DateTime<Utc>,
    ) -> Result<StockCount, AppError>;

    async fn find_stock_count(
        &self,
        location_id: Uuid,
        barcode: &str,
    ) -> Result<Option<StockCount>, AppError>;

    /// Overwrite `count` and refresh `counted_at`; `None` when the id is
    /// unknown.
    async fn update_stock_count_count(
        &self,
        id: Uuid,
        count: i32,
        counted_at: DateTime<Utc>,
    ) -> Result<Option<StockCount>, AppError>;

    /// Newest first (most recently counted on top, barcode as tie-break).
    async fn list_stock_counts_by_location(
        &self,
        location_id: Uuid,
    ) -> Result<Vec<StockCount>, AppError>;
}

pub type SharedStore = Arc<dyn StockStore>;
