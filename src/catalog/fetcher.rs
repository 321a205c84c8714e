use std::sync::Arc;

use futures::future::try_join_all;
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use super::error::CatalogError;
use super::models::{CategoryPage, Product};
use crate::transport::{Transport, TransportError};

/// Turns category slugs into one flat product list, one request per slug.
#[derive(Clone)]
pub struct CategoryFetcher {
    transport: Arc<dyn Transport>,
}

fn decode<T: DeserializeOwned>(path: &str, value: serde_json::Value) -> Result<T, CatalogError> {
    serde_json::from_value(value).map_err(|source| CatalogError::Decode {
        path: path.to_string(),
        source,
    })
}

impl CategoryFetcher {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    async fn fetch_category(&self, slug: &str) -> Result<Vec<Product>, CatalogError> {
        let path = format!("/products/category/{slug}");
        let value = self
            .transport
            .get(&path)
            .await
            .map_err(|source: TransportError| CatalogError::Aggregate {
                slug: slug.to_string(),
                source,
            })?;
        let page: CategoryPage = decode(&path, value)?;
        debug!(slug, count = page.products.len(), total = page.total, "category fetched");
        Ok(page.products)
    }

    /// Fetch every category concurrently and concatenate the results in slug
    /// order. Any failed category fails the whole call and drops the requests
    /// still in flight.
    pub async fn fetch_category_group<S>(&self, slugs: &[S]) -> Result<Vec<Product>, CatalogError>
    where
        S: AsRef<str>,
    {
        if slugs.is_empty() {
            return Err(CatalogError::EmptyGroup);
        }
        // try_join_all yields results by input position, not arrival.
        let pages = try_join_all(slugs.iter().map(|s| self.fetch_category(s.as_ref()))).await?;
        let products: Vec<Product> = pages.into_iter().flatten().collect();
        info!(categories = slugs.len(), products = products.len(), "category group fetched");
        Ok(products)
    }

    pub async fn fetch_product(&self, id: u64) -> Result<Product, CatalogError> {
        if id == 0 {
            return Err(CatalogError::InvalidProductId(id));
        }
        let path = format!("/products/{id}");
        let value = self.transport.get(&path).await?;
        decode(&path, value)
    }
}
