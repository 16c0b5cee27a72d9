//! Typed client for the tenant listing endpoints.
//!
//! | Method | Path | Operation |
//! |--------|------|-----------|
//! | GET    | `/tenant-listing/get-all-by-category` | Paged cards of one category |
//! | GET    | `/tenant-listing/get-one` | Full listing |
//! | POST   | `/tenant-listing/search` | Paged cards matching a search |

use std::sync::Arc;

use staybook_core::{Page, Pagination};
use uuid::Uuid;

use crate::category::CategoryName;
use crate::error::ApiError;
use crate::listing::{CardListing, Listing, Search};
use crate::transport::{call, ApiRequest, Transport};

/// Client for the tenant listing endpoints.
#[derive(Clone)]
pub struct TenantListingClient {
    transport: Arc<dyn Transport>,
}

impl std::fmt::Debug for TenantListingClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TenantListingClient").finish_non_exhaustive()
    }
}

impl TenantListingClient {
    pub(crate) fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// One page of listing cards in `category`.
    ///
    /// Calls `GET {api}/tenant-listing/get-all-by-category?page=..&size=..&category=..`.
    pub async fn get_all_by_category(
        &self,
        page: &Pagination,
        category: CategoryName,
    ) -> Result<Page<CardListing>, ApiError> {
        let request = ApiRequest::get("/tenant-listing/get-all-by-category")
            .params(page.to_query())
            .param("category", category);
        call(self.transport.as_ref(), request).await
    }

    /// A full listing by public id.
    ///
    /// Calls `GET {api}/tenant-listing/get-one?publicId=..`.
    pub async fn get_one(&self, public_id: Uuid) -> Result<Listing, ApiError> {
        let request = ApiRequest::get("/tenant-listing/get-one").param("publicId", public_id);
        call(self.transport.as_ref(), request).await
    }

    /// One page of listing cards matching `search`.
    ///
    /// Calls `POST {api}/tenant-listing/search?page=..&size=..` with the
    /// criteria as the JSON body.
    pub async fn search(
        &self,
        search: &Search,
        page: &Pagination,
    ) -> Result<Page<CardListing>, ApiError> {
        let request = ApiRequest::post("/tenant-listing/search")
            .params(page.to_query())
            .json(search)?;
        call(self.transport.as_ref(), request).await
    }
}
