use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::Postgres;
use uuid::Uuid;

use crate::{
    database::Database,
    error::AppError,
    models::{Location, NewLocation, NewProduct, Product, StockCount},
};

use super::StockStore;

// Five binds per product row; stay well under the Postgres bind limit.
const UPSERT_CHUNK: usize = 500;

/// Postgres-backed store. The unique keys created by the migrations
/// (`master_products.barcode`, `stock_counts (location_id, barcode)`) carry
/// the upsert semantics; everything here is plain string-query sqlx.
pub struct PgStore {
    pool: Database,
}

impl PgStore {
    pub fn new(pool: Database) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StockStore for PgStore {
    async fn insert_location(&self, new: NewLocation) -> Result<Location, AppError> {
        let location = sqlx::query_as::<_, Location>(
            r#"
            INSERT INTO locations (name, description, pic_name)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(&new.name)
        .bind(&new.description)
        .bind(&new.pic_name)
        .fetch_one(&self.pool)
        .await?;

        Ok(location)
    }

    async fn list_locations(&self) -> Result<Vec<Location>, AppError> {
        let locations = sqlx::query_as::<_, Location>("SELECT * FROM locations ORDER BY name")
            .fetch_all(&self.pool)
            .await?;

        Ok(locations)
    }

    async fn find_location(&self, id: Uuid) -> Result<Option<Location>, AppError> {
        let location = sqlx::query_as::<_, Location>("SELECT * FROM locations WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(location)
    }

    async fn upsert_products(&self, products: &[NewProduct]) -> Result<u64, AppError> {
        if products.is_empty() {
            return Ok(0);
        }

        let now = Utc::now();
        let mut written = 0;

        for chunk in products.chunks(UPSERT_CHUNK) {
            let mut builder = sqlx::QueryBuilder::<Postgres>::new(
                "INSERT INTO master_products (barcode, product_name, uom, selling_price, updated_at) ",
            );
            builder.push_values(chunk, |mut row, product| {
                row.push_bind(&product.barcode)
                    .push_bind(&product.product_name)
                    .push_bind(&product.uom)
                    .push_bind(product.selling_price)
                    .push_bind(now);
            });
            builder.push(
                r#"
                ON CONFLICT (barcode) DO UPDATE SET
                    product_name = EXCLUDED.product_name,
                    uom = EXCLUDED.uom,
                    selling_price = EXCLUDED.selling_price,
                    updated_at = EXCLUDED.updated_at
                "#,
            );

            let result = builder.build().execute(&self.pool).await?;
            written += result.rows_affected();
        }

        Ok(written)
    }

    async fn list_products(&self) -> Result<Vec<Product>, AppError> {
        let products =
            sqlx::query_as::<_, Product>("SELECT * FROM master_products ORDER BY product_name")
                .fetch_all(&self.pool)
                .await?;

        Ok(products)
    }

    async fn find_product_by_barcode(&self, barcode: &str) -> Result<Option<Product>, AppError> {
        let product =
            sqlx::query_as::<_, Product>("SELECT * FROM master_products WHERE barcode = $1")
                .bind(barcode)
                .fetch_optional(&self.pool)
                .await?;

        Ok(product)
    }

    async fn delete_product(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM master_products WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn accumulate_stock_count(
        &self,
        location_id: Uuid,
        product: &Product,
        counted_at: DateTime<Utc>,
    ) -> Result<StockCount, AppError> {
        // The conflict update leaves the denormalized snapshot from the
        // first scan untouched; only count and counted_at move.
        let stock_count = sqlx::query_as::<_, StockCount>(
            r#"
            INSERT INTO stock_counts
                (location_id, barcode, product_name, uom, selling_price, count, counted_at)
            VALUES ($1, $2, $3, $4, $5, 1, $6)
            ON CONFLICT (location_id, barcode) DO UPDATE SET
                count = stock_counts.count + 1,
                counted_at = EXCLUDED.counted_at
            RETURNING *
            "#,
        )
        .bind(location_id)
        .bind(&product.barcode)
        .bind(&product.product_name)
        .bind(&product.uom)
        .bind(product.selling_price)
        .bind(counted_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(stock_count)
    }

    async fn find_stock_count(
        &self,
        location_id: Uuid,
        barcode: &str,
    ) -> Result<Option<StockCount>, AppError> {
        let stock_count = sqlx::query_as::<_, StockCount>(
            "SELECT * FROM stock_counts WHERE location_id = $1 AND barcode = $2",
        )
        .bind(location_id)
        .bind(barcode)
        .fetch_optional(&self.pool)
        .await?;

        Ok(stock_count)
    }

    async fn update_stock_count_count(
        &self,
        id: Uuid,
        count: i32,
        counted_at: DateTime<Utc>,
    ) -> Result<Option<StockCount>, AppError> {
        let stock_count = sqlx::query_as::<_, StockCount>(
            r#"
            UPDATE stock_counts SET count = $2, counted_at = $3
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(count)
        .bind(counted_at)
        .fetch_optional(&self.pool)
        .await?;

        Ok(stock_count)
    }

    async fn list_stock_counts_by_location(
        &self,
        location_id: Uuid,
    ) -> Result<Vec<StockCount>, AppError> {
        let stock_counts = sqlx::query_as::<_, StockCount>(
            r#"
            SELECT * FROM stock_counts
            WHERE location_id = $1
            ORDER BY counted_at DESC, barcode
            "#,
        )
        .bind(location_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(stock_counts)
    }
}
