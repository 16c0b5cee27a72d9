//! Landlord listing gateways.

use std::fmt;
use std::rc::Rc;

use staybook_client::landlord::{CreatedListing, NewListing};
use staybook_client::listing::CardListing;
use staybook_client::ApiClient;
use staybook_core::{ObservableState, RequestContainer, RequestState, StateReader};
use uuid::Uuid;

use crate::auth::AuthExpiryGuard;
use crate::gateway::{settle, settle_retaining};

/// Owner of the landlord listing request containers.
pub struct LandlordListingService {
    client: ApiClient,
    guard: Rc<AuthExpiryGuard>,
    create: RequestContainer<CreatedListing>,
    all: RequestContainer<Vec<CardListing>>,
    delete: RequestContainer<Uuid>,
}

impl fmt::Debug for LandlordListingService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LandlordListingService")
            .field("create", &self.create.with(RequestState::status))
            .field("all", &self.all.with(RequestState::status))
            .field("delete", &self.delete.with(RequestState::status))
            .finish()
    }
}

impl LandlordListingService {
    pub fn new(client: ApiClient, guard: Rc<AuthExpiryGuard>) -> Self {
        Self {
            client,
            guard,
            create: ObservableState::request(),
            all: ObservableState::request(),
            delete: ObservableState::request(),
        }
    }

    pub async fn create(&self, listing: NewListing) {
        tracing::debug!(
            category = %listing.category,
            pictures = listing.pictures.len(),
            "creating listing"
        );
        let result = self.client.landlord().create(&listing).await;
        settle("landlord.create", &self.create, &self.guard, result);
    }

    pub async fn get_all(&self) {
        tracing::debug!("fetching landlord listings");
        let result = self.client.landlord().get_all().await;
        settle("landlord.get_all", &self.all, &self.guard, result);
    }

    /// Delete a listing. A failure keeps `public_id` as the value.
    pub async fn delete(&self, public_id: Uuid) {
        tracing::debug!(listing = %public_id, "deleting listing");
        let result = self.client.landlord().delete(public_id).await;
        settle_retaining("landlord.delete", &self.delete, &self.guard, result, public_id);
    }

    pub fn reset_listing_creation(&self) {
        self.create.reset();
    }

    pub fn reset_delete(&self) {
        self.delete.reset();
    }

    pub fn create_state(&self) -> StateReader<RequestState<CreatedListing>> {
        self.create.reader()
    }

    pub fn all_state(&self) -> StateReader<RequestState<Vec<CardListing>>> {
        self.all.reader()
    }

    pub fn delete_state(&self) -> StateReader<RequestState<Uuid>> {
        self.delete.reader()
    }
}
