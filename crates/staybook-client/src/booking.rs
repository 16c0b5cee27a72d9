//! Typed client for the booking endpoints.
//!
//! | Method | Path | Operation |
//! |--------|------|-----------|
//! | POST   | `/booking/create` | Create a booking |
//! | GET    | `/booking/check-availability` | Booked date ranges of a listing |
//! | GET    | `/booking/get-booked-listing` | Tenant's bookings |
//! | DELETE | `/booking/cancel` | Cancel a booking |
//! | GET    | `/booking/get-booked-listing-for-landlord` | Bookings on the landlord's listings |

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ApiError;
use crate::listing::{Picture, PriceVo};
use crate::transport::{call, ApiRequest, Transport};

/// A booking request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBooking {
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub listing_public_id: Uuid,
}

/// An inclusive booked date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookedDates {
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}

impl BookedDates {
    /// Every calendar day covered by the range, start and end included.
    ///
    /// An inverted range yields no days.
    pub fn days(&self) -> Vec<NaiveDate> {
        let end = self.end_date.date_naive();
        let mut day = self.start_date.date_naive();
        let mut days = Vec::new();
        while day <= end {
            days.push(day);
            match day.succ_opt() {
                Some(next) => day = next,
                None => break,
            }
        }
        days
    }
}

/// A booking as listed for its tenant or landlord.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookedListing {
    pub cover: Picture,
    pub location: String,
    pub dates: BookedDates,
    pub total_price: PriceVo,
    pub booking_public_id: Uuid,
    pub listing_public_id: Uuid,
    /// Client-side flag while a cancellation is pending.
    #[serde(skip)]
    pub loading: bool,
}

/// Client for the booking endpoints.
#[derive(Clone)]
pub struct BookingClient {
    transport: Arc<dyn Transport>,
}

impl std::fmt::Debug for BookingClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BookingClient").finish_non_exhaustive()
    }
}

impl BookingClient {
    pub(crate) fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Create a booking.
    ///
    /// Calls `POST {api}/booking/create`. Resolves to the API's boolean
    /// acknowledgement.
    pub async fn create(&self, booking: &CreateBooking) -> Result<bool, ApiError> {
        let request = ApiRequest::post("/booking/create").json(booking)?;
        call(self.transport.as_ref(), request).await
    }

    /// Booked date ranges of a listing.
    ///
    /// Calls `GET {api}/booking/check-availability?listingPublicId=..`.
    pub async fn check_availability(
        &self,
        listing_public_id: Uuid,
    ) -> Result<Vec<BookedDates>, ApiError> {
        let request = ApiRequest::get("/booking/check-availability")
            .param("listingPublicId", listing_public_id);
        call(self.transport.as_ref(), request).await
    }

    /// Bookings made by the current tenant.
    ///
    /// Calls `GET {api}/booking/get-booked-listing`.
    pub async fn get_booked_listing(&self) -> Result<Vec<BookedListing>, ApiError> {
        call(
            self.transport.as_ref(),
            ApiRequest::get("/booking/get-booked-listing"),
        )
        .await
    }

    /// Cancel a booking. Resolves to the cancelled booking's public id.
    ///
    /// Calls `DELETE {api}/booking/cancel?bookingPublicId=..&listingPublicId=..&byLandlord=..`.
    pub async fn cancel(
        &self,
        booking_public_id: Uuid,
        listing_public_id: Uuid,
        by_landlord: bool,
    ) -> Result<Uuid, ApiError> {
        let request = ApiRequest::delete("/booking/cancel")
            .param("bookingPublicId", booking_public_id)
            .param("listingPublicId", listing_public_id)
            .param("byLandlord", by_landlord);
        call(self.transport.as_ref(), request).await
    }

    /// Bookings made on the current landlord's listings.
    ///
    /// Calls `GET {api}/booking/get-booked-listing-for-landlord`.
    pub async fn get_booked_listing_for_landlord(&self) -> Result<Vec<BookedListing>, ApiError> {
        call(
            self.transport.as_ref(),
            ApiRequest::get("/booking/get-booked-listing-for-landlord"),
        )
        .await
    }
}
