pub mod location;
pub mod product;
pub mod stock_count;

// Re-export only the types we actually use
pub use location::{Location, NewLocation};
pub use product::{NewProduct, Product};
pub use stock_count::StockCount;
