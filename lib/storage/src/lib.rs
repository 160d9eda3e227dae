pub mod loader;
pub mod manager;

pub use loader::{load_products, parse_products};
pub use manager::CatalogStore;
