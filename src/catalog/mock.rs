//! In-memory catalog for offline use and tests

use super::error::{CatalogError, Result};
use super::types::{Product, decode_page};
use super::Catalog;
use async_trait::async_trait;

const DEMO_PRODUCTS: &str = include_str!("demo_products.json");

/// Catalog serving a fixed product list with the same paging rules as the
/// remote service
#[derive(Debug, Clone, Default)]
pub struct MockCatalog {
    products: Vec<Product>,
    failure: Option<String>,
}

impl MockCatalog {
    /// Create a catalog over `products`
    #[must_use]
    pub const fn new(products: Vec<Product>) -> Self {
        Self {
            products,
            failure: None,
        }
    }

    /// The bundled demo dataset
    #[must_use]
    pub fn demo() -> Self {
        // The dataset is compiled in and covered by tests.
        Self::new(decode_page(DEMO_PRODUCTS).unwrap_or_default())
    }

    /// A catalog whose every search fails
    #[must_use]
    pub fn failing() -> Self {
        Self {
            products: Vec::new(),
            failure: Some("mock catalog configured to fail".to_string()),
        }
    }

    /// All products, unpaged
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Synchronous form of [`Catalog::search`]
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Unavailable` for a failing catalog.
    pub fn page(&self, query: &str, page: u32, limit: u32) -> Result<Vec<Product>> {
        if let Some(reason) = &self.failure {
            return Err(CatalogError::Unavailable(reason.clone()));
        }

        let needle = query.to_lowercase();
        let start = page as usize * limit as usize;

        Ok(self
            .products
            .iter()
            .filter(|p| needle.is_empty() || p.title.to_lowercase().contains(&needle))
            .skip(start)
            .take(limit as usize)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl Catalog for MockCatalog {
    async fn search(&self, query: &str, page: u32, limit: u32) -> Result<Vec<Product>> {
        self.page(query, page, limit)
    }
}
