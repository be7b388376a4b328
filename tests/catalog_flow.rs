use opname::{
    catalog,
    error::AppError,
    models::NewProduct,
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

#[tokio::test]
async fn import_upserts_and_reports_count() {
    let store = MemoryStore::new();

    let imported = catalog::import_products(
        &store,
        vec![product("A1", "Widget", 100), product("B2", "Gadget", 200)],
    )
    .await
    .expect("import");

    assert_eq!(imported, 2);
    let products = store.list_products().await.expect("list");
    assert_eq!(products.len(), 2);
}

#[tokio::test]
async fn duplicate_barcodes_in_one_import_keep_last_values() {
    let store = MemoryStore::new();

    let imported = catalog::import_products(
        &store,
        vec![
            product("A1", "First", 100),
            product("B2", "Other", 200),
            product("A1", "Second", 300),
        ],
    )
    .await
    .expect("import");

    assert_eq!(imported, 2);
    let a1 = store
        .find_product_by_barcode("A1")
        .await
        .expect("find")
        .expect("A1 present");
    assert_eq!(a1.product_name, "Second");
    assert_eq!(a1.selling_price, 300);
}

#[tokio::test]
async fn reimport_is_idempotent_and_keeps_ids() {
    let store = MemoryStore::new();
    let batch = vec![product("A1", "Widget", 100), product("B2", "Gadget", 200)];

    catalog::import_products(&store, batch.clone())
        .await
        .expect("first import");
    let before = store.list_products().await.expect("list");

    catalog::import_products(&store, batch).await.expect("second import");
    let after = store.list_products().await.expect("list");

    assert_eq!(before.len(), after.len());
    for (b, a) in before.iter().zip(after.iter()) {
        assert_eq!(b.id, a.id);
        assert_eq!(b.created_at, a.created_at);
    }
}

#[tokio::test]
async fn reimport_overwrites_catalog_attributes() {
    let store = MemoryStore::new();

    catalog::import_products(&store, vec![product("A1", "Widget", 100)])
        .await
        .expect("first import");
    catalog::import_products(&store, vec![product("A1", "Widget Deluxe", 250)])
        .await
        .expect("second import");

    let a1 = store
        .find_product_by_barcode("A1")
        .await
        .expect("find")
        .expect("A1 present");
    assert_eq!(a1.product_name, "Widget Deluxe");
    assert_eq!(a1.selling_price, 250);
}

#[tokio::test]
async fn importing_nothing_is_zero_not_an_error() {
    let store = MemoryStore::new();
    let imported = catalog::import_products(&store, vec![]).await.expect("import");
    assert_eq!(imported, 0);
    assert!(store.list_products().await.expect("list").is_empty());
}

#[tokio::test]
async fn blank_barcode_rejected_and_nothing_written() {
    let store = MemoryStore::new();

    let err = catalog::import_products(
        &store,
        vec![product("A1", "Widget", 100), product("  ", "Ghost", 50)],
    )
    .await
    .unwrap_err();

    assert!(matches!(err, AppError::Validation(_)));
    assert!(store.list_products().await.expect("list").is_empty());
}

#[tokio::test]
async fn negative_price_rejected() {
    let store = MemoryStore::new();

    let err = catalog::import_products(&store, vec![product("A1", "Widget", -5)])
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Validation(_)));
    assert!(store.list_products().await.expect("list").is_empty());
}

#[tokio::test]
async fn parsed_csv_lands_in_catalog() {
    let store = MemoryStore::new();
    let csv = "Barcode,Product Name,UOM,Selling Price\n\
               8991002101234,\"Indomie Goreng, Jumbo\",PCS,\"3.500\"\n\
               8992761111222,Teh Botol Sosro,BTL,\"5.000\"";

    let products = catalog::parse_products_csv(csv).expect("parse");
    let imported = catalog::import_products(&store, products).await.expect("import");
    assert_eq!(imported, 2);

    let indomie = store
        .find_product_by_barcode("8991002101234")
        .await
        .expect("find")
        .expect("present");
    assert_eq!(indomie.product_name, "Indomie Goreng, Jumbo");
    assert_eq!(indomie.selling_price, 3500);
}

#[tokio::test]
async fn deleted_product_is_gone() {
    let store = MemoryStore::new();
    catalog::import_products(&store, vec![product("A1", "Widget", 100)])
        .await
        .expect("import");

    let id = store.list_products().await.expect("list")[0].id;

    assert!(store.delete_product(id).await.expect("delete"));
    assert!(store
        .find_product_by_barcode("A1")
        .await
        .expect("find")
        .is_none());
    assert!(!store.delete_product(id).await.expect("second delete"));
}
