pub mod error;
pub mod fetcher;
pub mod groups;
pub mod models;

pub use error::CatalogError;
pub use fetcher::CategoryFetcher;
pub use groups::{CatalogGroup, GroupCatalog, PRODUCT_FALLBACK_ERROR};
pub use models::{format_price, CategoryPage, Product};
