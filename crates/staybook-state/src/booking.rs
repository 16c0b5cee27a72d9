//! Booking gateways.

use std::fmt;
use std::rc::Rc;

use staybook_client::booking::{BookedDates, BookedListing, CreateBooking};
use staybook_client::ApiClient;
use staybook_core::{ObservableState, RequestContainer, RequestState, StateReader};
use uuid::Uuid;

use crate::auth::AuthExpiryGuard;
use crate::gateway::{settle, settle_retaining};

/// Owner of the booking request containers.
pub struct BookingService {
    client: ApiClient,
    guard: Rc<AuthExpiryGuard>,
    create_booking: RequestContainer<bool>,
    check_availability: RequestContainer<Vec<BookedDates>>,
    booked_listing: RequestContainer<Vec<BookedListing>>,
    cancel: RequestContainer<Uuid>,
    booked_listing_for_landlord: RequestContainer<Vec<BookedListing>>,
}

impl fmt::Debug for BookingService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BookingService")
            .field("create_booking", &self.create_booking.with(RequestState::status))
            .field("check_availability", &self.check_availability.with(RequestState::status))
            .field("booked_listing", &self.booked_listing.with(RequestState::status))
            .field("cancel", &self.cancel.with(RequestState::status))
            .field(
                "booked_listing_for_landlord",
                &self.booked_listing_for_landlord.with(RequestState::status),
            )
            .finish()
    }
}

impl BookingService {
    pub fn new(client: ApiClient, guard: Rc<AuthExpiryGuard>) -> Self {
        Self {
            client,
            guard,
            create_booking: ObservableState::request(),
            check_availability: ObservableState::request(),
            booked_listing: ObservableState::request(),
            cancel: ObservableState::request(),
            booked_listing_for_landlord: ObservableState::request(),
        }
    }

    // -- Gateways -------------------------------------------------------------

    pub async fn create(&self, booking: CreateBooking) {
        tracing::debug!(listing = %booking.listing_public_id, "creating booking");
        let result = self.client.booking().create(&booking).await;
        settle("booking.create", &self.create_booking, &self.guard, result);
    }

    pub async fn check_availability(&self, listing_public_id: Uuid) {
        tracing::debug!(listing = %listing_public_id, "checking availability");
        let result = self.client.booking().check_availability(listing_public_id).await;
        settle(
            "booking.check_availability",
            &self.check_availability,
            &self.guard,
            result,
        );
    }

    pub async fn get_booked_listing(&self) {
        tracing::debug!("fetching booked listings");
        let result = self.client.booking().get_booked_listing().await;
        settle("booking.get_booked_listing", &self.booked_listing, &self.guard, result);
    }

    /// Cancel a booking. A failure keeps `booking_public_id` as the value.
    pub async fn cancel(&self, booking_public_id: Uuid, listing_public_id: Uuid, by_landlord: bool) {
        tracing::debug!(booking = %booking_public_id, by_landlord, "cancelling booking");
        let result = self
            .client
            .booking()
            .cancel(booking_public_id, listing_public_id, by_landlord)
            .await;
        settle_retaining(
            "booking.cancel",
            &self.cancel,
            &self.guard,
            result,
            booking_public_id,
        );
    }

    pub async fn get_booked_listing_for_landlord(&self) {
        tracing::debug!("fetching reservations");
        let result = self.client.booking().get_booked_listing_for_landlord().await;
        settle(
            "booking.get_booked_listing_for_landlord",
            &self.booked_listing_for_landlord,
            &self.guard,
            result,
        );
    }

    // -- Resets ---------------------------------------------------------------

    pub fn reset_create_booking(&self) {
        self.create_booking.reset();
    }

    pub fn reset_cancel(&self) {
        self.cancel.reset();
    }

    // -- Readers --------------------------------------------------------------

    pub fn create_booking_state(&self) -> StateReader<RequestState<bool>> {
        self.create_booking.reader()
    }

    pub fn check_availability_state(&self) -> StateReader<RequestState<Vec<BookedDates>>> {
        self.check_availability.reader()
    }

    pub fn booked_listing_state(&self) -> StateReader<RequestState<Vec<BookedListing>>> {
        self.booked_listing.reader()
    }

    pub fn cancel_state(&self) -> StateReader<RequestState<Uuid>> {
        self.cancel.reader()
    }

    pub fn booked_listing_for_landlord_state(
        &self,
    ) -> StateReader<RequestState<Vec<BookedListing>>> {
        self.booked_listing_for_landlord.reader()
    }
}
