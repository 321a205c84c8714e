//! Client-side catalog browser core.
//!
//! Fetches the remote REST catalog, aggregates several category endpoints per
//! merchandising group, and keeps the session's catalog state for the
//! presentation layer.
//!
//! ```rust,no_run
//! use catalogo::catalog::CatalogGroup;
//! use catalogo::config::CatalogConfig;
//! use catalogo::store::selectors::products_for;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let store = CatalogConfig::from_env()?.build_store()?;
//! store.load_group(CatalogGroup::Male).await?;
//! let count = store.read(|s| products_for(s, CatalogGroup::Male).len());
//! println!("{count} products");
//! # Ok(())
//! # }
//! ```

pub mod catalog;
pub mod cli;
pub mod config;
pub mod logging;
pub mod store;
pub mod transport;

pub mod util {
    pub mod env;
}

pub use catalog::{CatalogError, CatalogGroup, GroupCatalog, Product};
pub use config::CatalogConfig;
pub use store::{CatalogState, CatalogStore, LoadOutcome, StalePolicy};
pub use transport::{HttpTransport, Transport, TransportError};
