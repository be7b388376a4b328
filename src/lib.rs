pub mod catalog;
pub mod counting;
pub mod database;
pub mod error;
pub mod export;
pub mod handlers;
pub mod models;
pub mod store;
