//! Search requests issued by a picker session

use crate::catalog::{Catalog, Product, Result};

/// Identifies one issued request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SearchTicket(pub u64);

/// How a page's products combine with the current candidates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchMode {
    /// New query: replace the candidate list
    Replace,
    /// Next page: append to the candidate list
    Append,
}

/// A catalog call the event loop should perform
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub ticket: SearchTicket,
    pub query: String,
    pub page: u32,
    pub limit: u32,
    pub mode: FetchMode,
}

/// Outcome of a request, fed back into the session
#[derive(Debug)]
pub struct PageLoaded {
    pub request: SearchRequest,
    pub result: Result<Vec<Product>>,
}

/// Perform `request` against `catalog`
///
/// Errors are carried in the returned value; the session decides how a
/// failure is shown.
pub async fn run_search<C: Catalog + ?Sized>(catalog: &C, request: SearchRequest) -> PageLoaded {
    let result = catalog
        .search(&request.query, request.page, request.limit)
        .await;
    PageLoaded { request, result }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::MockCatalog;

    fn request(query: &str, page: u32, limit: u32) -> SearchRequest {
        SearchRequest {
            ticket: SearchTicket(1),
            query: query.to_string(),
            page,
            limit,
            mode: FetchMode::Replace,
        }
    }

    #[tokio::test]
    async fn test_run_search_carries_request() {
        let catalog = MockCatalog::demo();
        let loaded = run_search(&catalog, request("", 1, 4)).await;

        assert_eq!(loaded.request.page, 1);
        let ids: Vec<u64> = loaded.result.unwrap().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![83, 84, 85, 86]);
    }

    #[tokio::test]
    async fn test_run_search_keeps_error() {
        let loaded = run_search(&MockCatalog::failing(), request("x", 0, 10)).await;
        assert!(loaded.result.is_err());
        assert_eq!(loaded.request.query, "x");
    }

    #[tokio::test]
    async fn test_run_search_through_trait_object() {
        let catalog: Box<dyn Catalog> = Box::new(MockCatalog::demo());
        let loaded = run_search(catalog.as_ref(), request("socks", 0, 10)).await;
        assert_eq!(loaded.result.unwrap().len(), 1);
    }
}
