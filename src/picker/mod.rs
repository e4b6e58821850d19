//! Product picker session
//!
//! One open picker dialog: the candidate products fetched so far, paging
//! state, the exclusion filter, and the selection being built.
//!
//! # Fetch protocol
//!
//! The session never performs I/O. Methods that need data return a
//! [`SearchRequest`]; the event loop runs it against a catalog and hands the
//! outcome back through [`PickerSession::apply_page`].
//!
//! ```text
//! open / set_query / load_more ──▶ SearchRequest { ticket, .. }
//!                                        │ (catalog, async)
//!                                        ▼
//!                     apply_page(PageLoaded { ticket, result })
//!                         ├─ ticket == in_flight → applied
//!                         └─ otherwise → discarded as stale
//! ```
//!
//! Only one request is ever current. A new query supersedes whatever is in
//! flight; load-more is refused while anything is in flight.

mod fetch;

pub use fetch::{FetchMode, PageLoaded, SearchRequest, SearchTicket, run_search};

use crate::catalog::{Product, ProductId, VariantId, exclude_listed};
use crate::selection::{CheckState, FinalizedProduct, SelectionModel};
use std::collections::HashSet;
use tracing::{debug, warn};

/// Loading indicator state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Idle,
    /// First page for the current query is loading
    Loading,
    /// An additional page is loading
    LoadingMore,
}

/// State of one open picker
#[derive(Debug, Clone)]
pub struct PickerSession {
    excluded: HashSet<ProductId>,
    candidates: Vec<Product>,
    query: String,
    page: u32,
    page_size: u32,
    has_more: bool,
    load_state: LoadState,
    in_flight: Option<SearchTicket>,
    next_ticket: u64,
    last_error: Option<String>,
    selection: SelectionModel,
}

impl PickerSession {
    /// Open a picker hiding `excluded` products, and return the initial
    /// request for the unfiltered first page
    #[must_use]
    pub fn open(excluded: HashSet<ProductId>, page_size: u32) -> (Self, SearchRequest) {
        let mut session = Self {
            excluded,
            candidates: Vec::new(),
            query: String::new(),
            page: 0,
            page_size: page_size.max(1),
            has_more: true,
            load_state: LoadState::Idle,
            in_flight: None,
            next_ticket: 0,
            last_error: None,
            selection: SelectionModel::new(),
        };
        let request = session.begin(String::new(), 0, FetchMode::Replace);
        (session, request)
    }

    fn begin(&mut self, query: String, page: u32, mode: FetchMode) -> SearchRequest {
        self.next_ticket += 1;
        let ticket = SearchTicket(self.next_ticket);
        self.in_flight = Some(ticket);
        self.load_state = match mode {
            FetchMode::Replace => LoadState::Loading,
            FetchMode::Append => LoadState::LoadingMore,
        };

        SearchRequest {
            ticket,
            query,
            page,
            limit: self.page_size,
            mode,
        }
    }

    /// Start a search for `query` from its first page
    ///
    /// Any request still in flight becomes stale.
    pub fn set_query(&mut self, query: impl Into<String>) -> SearchRequest {
        self.query = query.into();
        self.page = 0;
        self.has_more = true;
        self.begin(self.query.clone(), 0, FetchMode::Replace)
    }

    /// Request the next page of the current query
    ///
    /// Returns `None` while a request is in flight or once the last page
    /// has been seen.
    pub fn load_more(&mut self) -> Option<SearchRequest> {
        if self.in_flight.is_some() || !self.has_more {
            return None;
        }
        let next_page = self.page + 1;
        Some(self.begin(self.query.clone(), next_page, FetchMode::Append))
    }

    /// Apply a finished request
    ///
    /// Returns `false` if the response was stale and ignored.
    pub fn apply_page(&mut self, loaded: PageLoaded) -> bool {
        if self.in_flight != Some(loaded.request.ticket) {
            debug!(
                ticket = loaded.request.ticket.0,
                query = %loaded.request.query,
                "discarding stale catalog response"
            );
            return false;
        }
        self.in_flight = None;
        self.load_state = LoadState::Idle;

        let request = loaded.request;
        match loaded.result {
            Ok(products) => {
                self.last_error = None;
                self.has_more = products.len() == request.limit as usize;
                self.page = request.page;

                let visible = exclude_listed(products, &self.excluded);
                self.selection.record_fetched(&visible);
                match request.mode {
                    FetchMode::Replace => self.candidates = visible,
                    FetchMode::Append => self.candidates.extend(visible),
                }
            }
            Err(e) => {
                warn!(query = %request.query, page = request.page, "catalog fetch failed: {e}");
                self.has_more = false;
                self.last_error = Some(e.to_string());
                if request.mode == FetchMode::Replace {
                    self.candidates.clear();
                }
            }
        }
        true
    }

    /// Products currently listed in the dialog
    #[must_use]
    pub fn candidates(&self) -> &[Product] {
        &self.candidates
    }

    /// Look up a listed product
    #[must_use]
    pub fn candidate(&self, id: ProductId) -> Option<&Product> {
        self.candidates.iter().find(|p| p.id == id)
    }

    /// Current search text
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Whether more pages may exist
    #[must_use]
    pub const fn has_more(&self) -> bool {
        self.has_more
    }

    #[must_use]
    pub const fn load_state(&self) -> LoadState {
        self.load_state
    }

    /// Message from the most recent failed fetch, cleared by a success
    #[must_use]
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Ticket of the request whose response will be accepted
    #[must_use]
    pub const fn in_flight(&self) -> Option<SearchTicket> {
        self.in_flight
    }

    /// Product ids hidden from the candidate list
    #[must_use]
    pub const fn excluded(&self) -> &HashSet<ProductId> {
        &self.excluded
    }

    #[must_use]
    pub const fn selection(&self) -> &SelectionModel {
        &self.selection
    }

    /// Toggle a listed product; unknown ids are ignored
    pub fn toggle_product(&mut self, product_id: ProductId) -> bool {
        let Some(product) = self.candidates.iter().find(|p| p.id == product_id) else {
            return false;
        };
        self.selection.toggle_product(product);
        true
    }

    /// Toggle one variant of a listed product; unknown ids are ignored
    pub fn toggle_variant(&mut self, product_id: ProductId, variant_id: VariantId) -> bool {
        let Some(product) = self.candidates.iter().find(|p| p.id == product_id) else {
            return false;
        };
        let Some(variant) = product.variant(variant_id) else {
            return false;
        };
        self.selection.toggle_variant(product, variant);
        true
    }

    /// Checkbox state for a product
    #[must_use]
    pub fn check_state(&self, product: &Product) -> CheckState {
        self.selection.check_state(product)
    }

    /// Number of products with a selected variant
    #[must_use]
    pub fn selected_count(&self) -> usize {
        self.selection.selected_count()
    }

    /// Close the picker, keeping its selection
    #[must_use]
    pub fn confirm(self) -> Vec<FinalizedProduct> {
        self.selection.finalize()
    }
}
