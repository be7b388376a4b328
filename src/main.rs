use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post},
    Router,
};
use dotenvy::dotenv;
use std::{env, sync::Arc};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use opname::{
    database::{create_database_pool, run_migrations},
    handlers,
    store::{MemoryStore, PgStore, SharedStore},
};

#[tokio::main]
async fn main() {
    // Load environment variables
    dotenv().ok();

    // Initialize logging
    env_logger::init();

    // Pick the storage backend: Postgres by default, in-memory on request
    let store: SharedStore = if env::var("STORE").map(|v| v == "memory").unwrap_or(false) {
        log::warn!("STORE=memory set, counts will not survive a restart");
        Arc::new(MemoryStore::new())
    } else {
        let database_url = env::var("DATABASE_URL")
            .expect("DATABASE_URL must be set");

        let db = create_database_pool(&database_url).await
            .expect("Failed to connect to database");

        run_migrations(&db).await
            .expect("Failed to run database migrations");

        Arc::new(PgStore::new(db))
    };

    // Build the application router
    let app = create_router(store);

    // Get port from environment or use default
    let port = env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let addr = format!("0.0.0.0:{}", port);

    log::info!("🚀 Stock opname server starting on http://{}", addr);

    // Start the server
    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}

fn create_router(store: SharedStore) -> Router {
    Router::new()
        .route("/health", get(handlers::health))

        // Location registry
        .route("/api/locations", post(handlers::locations::create_location))
        .route("/api/locations", get(handlers::locations::locations_list))
        .route("/api/locations/:id", get(handlers::locations::location_detail))
        .route("/api/locations/:id/stock-counts", get(handlers::locations::location_stock_counts))

        // Master catalog
        .route("/api/master-data", get(handlers::master_data::products_list))
        .route("/api/master-data/import", post(handlers::master_data::import_products))
        .route("/api/master-data/upload", post(handlers::master_data::upload_products))
        .route("/api/master-data/:id", delete(handlers::master_data::delete_product))

        // Counting
        .route("/api/stock-count/scan", post(handlers::stock_count::scan))
        .route("/api/stock-count/update", post(handlers::stock_count::update_count))

        // Exports
        .route("/api/export/location/:id", get(handlers::export::export_location))
        .route("/api/export/all", get(handlers::export::export_all))

        // Middleware
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive())
                .layer(DefaultBodyLimit::max(10 * 1024 * 1024)) // 10MB
        )
        .with_state(store)
}
