//! Catalog client
//!
//! Thin wrapper over the remote product search endpoint. A single call,
//! `search(query, page, limit)`, returns one page of products in catalog
//! order. There is no retry or caching here; callers decide what a failure
//! means for them.
//!
//! # Backends
//!
//! - **`HttpCatalog`** - the real service (reqwest, `x-api-key` header)
//! - **`MockCatalog`** - in-memory demo dataset, same paging rules

mod error;
mod http;
mod mock;
mod types;

pub use error::{CatalogError, Result};
pub use http::{DEFAULT_BASE_URL, DEFAULT_PAGE_SIZE, HttpCatalog};
pub use mock::MockCatalog;
pub use types::{Product, ProductId, ProductImage, Variant, VariantId, decode_page};

use async_trait::async_trait;
use std::collections::HashSet;

/// A searchable product catalog
#[async_trait]
pub trait Catalog: Send + Sync {
    /// Fetch one page of products matching `query`
    ///
    /// `page` is zero-based. A page shorter than `limit` means there are no
    /// further pages.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the request fails or the response cannot be
    /// decoded.
    async fn search(&self, query: &str, page: u32, limit: u32) -> Result<Vec<Product>>;
}

/// Drop every product whose id is already listed
#[must_use]
pub fn exclude_listed(products: Vec<Product>, excluded: &HashSet<ProductId>) -> Vec<Product> {
    products
        .into_iter()
        .filter(|p| !excluded.contains(&p.id))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exclude_listed_keeps_order() {
        let products = MockCatalog::demo().products()[..3].to_vec();
        let excluded: HashSet<ProductId> = [77].into_iter().collect();

        let ids: Vec<ProductId> = exclude_listed(products, &excluded)
            .iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(ids, vec![80, 81]);
    }

    #[test]
    fn test_exclude_listed_empty_filter() {
        let products = MockCatalog::demo().products()[..3].to_vec();
        assert_eq!(exclude_listed(products, &HashSet::new()).len(), 3);
    }
}
