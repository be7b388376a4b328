use uuid::Uuid;

use opname::{
    catalog, counting,
    error::AppError,
    models::{Location, NewLocation, NewProduct},
    store::{MemoryStore, StockStore},
};

fn product(barcode: &str, name: &str, price: i64) -> NewProduct {
    NewProduct {
        barcode: barcode.to_string(),
        product_name: name.to_string(),
        uom: "PCS".to_string(),
        selling_price: price,
    }
}

async fn register_location(store: &MemoryStore, name: &str) -> Location {
    store
        .insert_location(NewLocation {
            name: name.to_string(),
            description: None,
            pic_name: Some("Budi".to_string()),
        })
        .await
        .expect("insert location")
}

async fn seed_catalog(store: &MemoryStore) {
    catalog::import_products(
        store,
        vec![
            product("8991002101234", "Indomie Goreng", 3500),
            product("8992761111222", "Teh Botol Sosro", 5000),
        ],
    )
    .await
    .expect("seed catalog");
}

#[tokio::test]
async fn repeated_scans_accumulate_into_one_row() {
    let store = MemoryStore::new();
    seed_catalog(&store).await;
    let gudang = register_location(&store, "Gudang Utama").await;

    for _ in 0..5 {
        counting::scan_barcode(&store, gudang.id, "8991002101234")
            .await
            .expect("scan");
    }

    let counts = store
        .list_stock_counts_by_location(gudang.id)
        .await
        .expect("list");
    assert_eq!(counts.len(), 1);
    assert_eq!(counts[0].count, 5);
    assert_eq!(counts[0].barcode, "8991002101234");
}

#[tokio::test]
async fn scan_returns_the_updated_row() {
    let store = MemoryStore::new();
    seed_catalog(&store).await;
    let gudang = register_location(&store, "Gudang Utama").await;

    let first = counting::scan_barcode(&store, gudang.id, "8991002101234")
        .await
        .expect("first scan");
    assert_eq!(first.count, 1);
    assert_eq!(first.product_name, "Indomie Goreng");
    assert_eq!(first.selling_price, 3500);

    let second = counting::scan_barcode(&store, gudang.id, "8991002101234")
        .await
        .expect("second scan");
    assert_eq!(second.id, first.id);
    assert_eq!(second.count, 2);
}

#[tokio::test]
async fn unknown_barcode_is_not_found_and_writes_nothing() {
    let store = MemoryStore::new();
    seed_catalog(&store).await;
    let gudang = register_location(&store, "Gudang Utama").await;

    let err = counting::scan_barcode(&store, gudang.id, "0000000000000")
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::NotFound(_)));
    assert!(store
        .list_stock_counts_by_location(gudang.id)
        .await
        .expect("list")
        .is_empty());
}

#[tokio::test]
async fn unknown_location_is_not_found() {
    let store = MemoryStore::new();
    seed_catalog(&store).await;

    let err = counting::scan_barcode(&store, Uuid::new_v4(), "8991002101234")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn blank_barcode_is_rejected() {
    let store = MemoryStore::new();
    seed_catalog(&store).await;
    let gudang = register_location(&store, "Gudang Utama").await;

    let err = counting::scan_barcode(&store, gudang.id, "   ")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn scanner_whitespace_is_trimmed() {
    let store = MemoryStore::new();
    seed_catalog(&store).await;
    let gudang = register_location(&store, "Gudang Utama").await;

    let sc = counting::scan_barcode(&store, gudang.id, " 8991002101234\n")
        .await
        .expect("scan");
    assert_eq!(sc.barcode, "8991002101234");
}

#[tokio::test]
async fn first_scan_snapshot_survives_a_reimport() {
    let store = MemoryStore::new();
    seed_catalog(&store).await;
    let gudang = register_location(&store, "Gudang Utama").await;

    counting::scan_barcode(&store, gudang.id, "8991002101234")
        .await
        .expect("first scan");

    // Catalog price changes between the two scans.
    catalog::import_products(&store, vec![product("8991002101234", "Indomie Goreng Baru", 4000)])
        .await
        .expect("reimport");

    let sc = counting::scan_barcode(&store, gudang.id, "8991002101234")
        .await
        .expect("second scan");

    assert_eq!(sc.count, 2);
    assert_eq!(sc.product_name, "Indomie Goreng");
    assert_eq!(sc.selling_price, 3500);
}

#[tokio::test]
async fn same_barcode_counts_separately_per_location() {
    let store = MemoryStore::new();
    seed_catalog(&store).await;
    let gudang = register_location(&store, "Gudang Utama").await;
    let rak = register_location(&store, "Rak Depan").await;

    counting::scan_barcode(&store, gudang.id, "8991002101234")
        .await
        .expect("scan gudang");
    counting::scan_barcode(&store, rak.id, "8991002101234")
        .await
        .expect("scan rak");
    counting::scan_barcode(&store, rak.id, "8991002101234")
        .await
        .expect("scan rak again");

    let gudang_counts = store
        .list_stock_counts_by_location(gudang.id)
        .await
        .expect("list gudang");
    let rak_counts = store
        .list_stock_counts_by_location(rak.id)
        .await
        .expect("list rak");

    assert_eq!(gudang_counts[0].count, 1);
    assert_eq!(rak_counts[0].count, 2);
}

#[tokio::test]
async fn manual_adjustment_overwrites_the_count() {
    let store = MemoryStore::new();
    seed_catalog(&store).await;
    let gudang = register_location(&store, "Gudang Utama").await;

    let sc = counting::scan_barcode(&store, gudang.id, "8991002101234")
        .await
        .expect("scan");

    let updated = counting::set_count(&store, sc.id, 17).await.expect("set count");
    assert_eq!(updated.id, sc.id);
    assert_eq!(updated.count, 17);

    let zeroed = counting::set_count(&store, sc.id, 0).await.expect("set zero");
    assert_eq!(zeroed.count, 0);
}

#[tokio::test]
async fn negative_adjustment_rejected_and_count_unchanged() {
    let store = MemoryStore::new();
    seed_catalog(&store).await;
    let gudang = register_location(&store, "Gudang Utama").await;

    let sc = counting::scan_barcode(&store, gudang.id, "8991002101234")
        .await
        .expect("scan");

    let err = counting::set_count(&store, sc.id, -1).await.unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    let unchanged = store
        .find_stock_count(gudang.id, "8991002101234")
        .await
        .expect("find")
        .expect("row present");
    assert_eq!(unchanged.count, 1);
}

#[tokio::test]
async fn adjusting_an_unknown_row_is_not_found() {
    let store = MemoryStore::new();
    let err = counting::set_count(&store, Uuid::new_v4(), 3).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}
