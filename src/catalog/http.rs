//! HTTP catalog backend

use super::error::{CatalogError, Result};
use super::types::{Product, decode_page};
use super::Catalog;
use async_trait::async_trait;
use reqwest::{Client, Url};
use std::time::Duration;
use tracing::debug;

/// Production search endpoint root
pub const DEFAULT_BASE_URL: &str = "https://stageapi.monkcommerce.app/task/products";

/// Page size used when none is configured
pub const DEFAULT_PAGE_SIZE: u32 = 10;

const API_KEY_HEADER: &str = "x-api-key";

/// Catalog backed by the remote search API
#[derive(Debug, Clone)]
pub struct HttpCatalog {
    client: Client,
    search_url: Url,
    api_key: String,
}

impl HttpCatalog {
    /// Create a client for `base_url`
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::MissingApiKey` if `api_key` is empty,
    /// `CatalogError::InvalidUrl` if `base_url` does not parse, or
    /// `CatalogError::Http` if the underlying client cannot be built.
    pub fn new(base_url: &str, api_key: impl Into<String>, timeout: Duration) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(CatalogError::MissingApiKey);
        }

        let search_url = search_url(base_url)?;
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            search_url,
            api_key,
        })
    }

    /// Full URL for one search request
    #[must_use]
    pub fn request_url(&self, query: &str, page: u32, limit: u32) -> Url {
        let mut url = self.search_url.clone();
        url.query_pairs_mut()
            .append_pair("search", query)
            .append_pair("page", &page.to_string())
            .append_pair("limit", &limit.to_string());
        url
    }
}

fn search_url(base_url: &str) -> Result<Url> {
    let trimmed = base_url.trim_end_matches('/');
    Url::parse(&format!("{trimmed}/search"))
        .map_err(|e| CatalogError::InvalidUrl(format!("{base_url}: {e}")))
}

#[async_trait]
impl Catalog for HttpCatalog {
    async fn search(&self, query: &str, page: u32, limit: u32) -> Result<Vec<Product>> {
        let url = self.request_url(query, page, limit);
        debug!(%url, "catalog search");

        let response = self
            .client
            .get(url)
            .header(API_KEY_HEADER, &self.api_key)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        let products = decode_page(&body)?;
        debug!(count = products.len(), page, "catalog page received");
        Ok(products)
    }
}
