use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::{
    error::AppError,
    models::{Location, NewLocation, NewProduct, Product, StockCount},
};

use super::StockStore;

/// In-memory store with the same observable semantics as [`super::PgStore`].
/// Backs the test suites and `STORE=memory` development runs; everything is
/// lost on shutdown.
#[derive(Default)]
pub struct MemoryStore {
    products: Mutex<HashMap<String, Product>>,
    locations: Mutex<Vec<Location>>,
    stock_counts: Mutex<Vec<StockCount>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StockStore for MemoryStore {
    async fn insert_location(&self, new: NewLocation) -> Result<Location, AppError> {
        let location = Location {
            id: Uuid::new_v4(),
            name: new.name,
            description: new.description,
            pic_name: new.pic_name,
            created_at: Utc::now(),
        };

        self.locations.lock().await.push(location.clone());
        Ok(location)
    }

    async fn list_locations(&self) -> Result<Vec<Location>, AppError> {
        let mut locations = self.locations.lock().await.clone();
        locations.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(locations)
    }

    async fn find_location(&self, id: Uuid) -> Result<Option<Location>, AppError> {
        let locations = self.locations.lock().await;
        Ok(locations.iter().find(|l| l.id == id).cloned())
    }

    async fn upsert_products(&self, products: &[NewProduct]) -> Result<u64, AppError> {
        let now = Utc::now();
        let mut map = self.products.lock().await;

        for new in products {
            match map.get_mut(&new.barcode) {
                Some(existing) => {
                    existing.product_name = new.product_name.clone();
                    existing.uom = new.uom.clone();
                    existing.selling_price = new.selling_price;
                    existing.updated_at = now;
                }
                None => {
                    map.insert(
                        new.barcode.clone(),
                        Product {
                            id: Uuid::new_v4(),
                            barcode: new.barcode.clone(),
                            product_name: new.product_name.clone(),
                            uom: new.uom.clone(),
                            selling_price: new.selling_price,
                            created_at: now,
                            updated_at: now,
                        },
                    );
                }
            }
        }

        Ok(products.len() as u64)
    }

    async fn list_products(&self) -> Result<Vec<Product>, AppError> {
        let mut products: Vec<Product> = self.products.lock().await.values().cloned().collect();
        products.sort_by(|a, b| a.product_name.cmp(&b.product_name));
        Ok(products)
    }

    async fn find_product_by_barcode(&self, barcode: &str) -> Result<Option<Product>, AppError> {
        Ok(self.products.lock().await.get(barcode).cloned())
    }

    async fn delete_product(&self, id: Uuid) -> Result<bool, AppError> {
        let mut map = self.products.lock().await;
        let barcode = map
            .values()
            .find(|p| p.id == id)
            .map(|p| p.barcode.clone());

        match barcode {
            Some(barcode) => {
                map.remove(&barcode);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn accumulate_stock_count(
        &self,
        location_id: Uuid,
        product: &Product,
        counted_at: DateTime<Utc>,
    ) -> Result<StockCount, AppError> {
        let mut counts = self.stock_counts.lock().await;

        if let Some(existing) = counts
            .iter_mut()
            .find(|sc| sc.location_id == location_id && sc.barcode == product.barcode)
        {
            existing.count += 1;
            existing.counted_at = counted_at;
            return Ok(existing.clone());
        }

        let stock_count = StockCount {
            id: Uuid::new_v4(),
            location_id,
            barcode: product.barcode.clone(),
            product_name: product.product_name.clone(),
            uom: product.uom.clone(),
            selling_price: product.selling_price,
            count: 1,
            counted_at,
        };
        counts.push(stock_count.clone());
        Ok(stock_count)
    }

    async fn find_stock_count(
        &self,
        location_id: Uuid,
        barcode: &str,
    ) -> Result<Option<StockCount>, AppError> {
        let counts = self.stock_counts.lock().await;
        Ok(counts
            .iter()
            .find(|sc| sc.location_id == location_id && sc.barcode == barcode)
            .cloned())
    }

    async fn update_stock_count_count(
        &self,
        id: Uuid,
        count: i32,
        counted_at: DateTime<Utc>,
    ) -> Result<Option<StockCount>, AppError> {
        let mut counts = self.stock_counts.lock().await;

        match counts.iter_mut().find(|sc| sc.id == id) {
            Some(existing) => {
                existing.count = count;
                existing.counted_at = counted_at;
                Ok(Some(existing.clone()))
            }
            None => Ok(None),
        }
    }

    async fn list_stock_counts_by_location(
        &self,
        location_id: Uuid,
    ) -> Result<Vec<StockCount>, AppError> {
        let mut counts: Vec<StockCount> = self
            .stock_counts
            .lock()
            .await
            .iter()
            .filter(|sc| sc.location_id == location_id)
            .cloned()
            .collect();

        counts.sort_by(|a, b| {
            b.counted_at
                .cmp(&a.counted_at)
                .then_with(|| a.barcode.cmp(&b.barcode))
        });
        Ok(counts)
    }
}
