//! Tenant listing gateways.
//!
//! `search` is a broadcast container: a search result is an event for
//! whoever is listening when it lands, not state a later screen should
//! pick up.

use std::fmt;
use std::rc::Rc;

use staybook_client::category::CategoryName;
use staybook_client::listing::{CardListing, Listing, Search};
use staybook_client::ApiClient;
use staybook_core::{
    ObservableState, Page, Pagination, RequestContainer, RequestState, StateBuilder, StateReader,
};
use uuid::Uuid;

use crate::auth::AuthExpiryGuard;
use crate::gateway::settle;

/// Owner of the tenant listing request containers.
pub struct TenantListingService {
    client: ApiClient,
    guard: Rc<AuthExpiryGuard>,
    all_by_category: RequestContainer<Page<CardListing>>,
    one_by_public_id: RequestContainer<Listing>,
    search: RequestContainer<Page<CardListing>>,
}

impl fmt::Debug for TenantListingService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TenantListingService")
            .field("all_by_category", &self.all_by_category.with(RequestState::status))
            .field("one_by_public_id", &self.one_by_public_id.with(RequestState::status))
            .field("searches", &self.search.version())
            .finish()
    }
}

impl TenantListingService {
    pub fn new(client: ApiClient, guard: Rc<AuthExpiryGuard>) -> Self {
        Self {
            client,
            guard,
            all_by_category: ObservableState::request(),
            one_by_public_id: ObservableState::request(),
            search: ObservableState::broadcast(StateBuilder::new().for_init()),
        }
    }

    pub async fn get_all_by_category(&self, page: Pagination, category: CategoryName) {
        tracing::debug!(%category, page = page.page, size = page.size, "fetching listings by category");
        let result = self.client.tenant().get_all_by_category(&page, category).await;
        settle(
            "tenant.get_all_by_category",
            &self.all_by_category,
            &self.guard,
            result,
        );
    }

    pub async fn get_one_by_public_id(&self, public_id: Uuid) {
        tracing::debug!(listing = %public_id, "fetching listing");
        let result = self.client.tenant().get_one(public_id).await;
        settle(
            "tenant.get_one_by_public_id",
            &self.one_by_public_id,
            &self.guard,
            result,
        );
    }

    pub async fn search_listing(&self, search: Search, page: Pagination) {
        tracing::debug!(location = %search.location, "searching listings");
        let result = self.client.tenant().search(&search, &page).await;
        settle("tenant.search_listing", &self.search, &self.guard, result);
    }

    pub fn reset_get_all_by_category(&self) {
        self.all_by_category.reset();
    }

    pub fn reset_get_one_by_public_id(&self) {
        self.one_by_public_id.reset();
    }

    pub fn all_by_category_state(&self) -> StateReader<RequestState<Page<CardListing>>> {
        self.all_by_category.reader()
    }

    pub fn one_by_public_id_state(&self) -> StateReader<RequestState<Listing>> {
        self.one_by_public_id.reader()
    }

    /// Broadcast handle on search results.
    pub fn search_state(&self) -> StateReader<RequestState<Page<CardListing>>> {
        self.search.reader()
    }
}
