//! # staybook-client -- Typed Rust client for the staybook booking API
//!
//! Provides typed access to the four endpoint groups of the REST API:
//! - **Booking** via `/booking/*`
//! - **Tenant listings** via `/tenant-listing/*`
//! - **Landlord listings** via `/landlord-listing/*`
//! - **Auth** via `/auth/*`
//!
//! ## Architecture
//!
//! Every endpoint client builds an [`ApiRequest`] and hands it to a shared
//! [`Transport`]. [`HttpTransport`] talks to the live API with `reqwest`;
//! tests and offline tools plug in their own transport through
//! [`ApiClient::with_transport`].
//!
//! ## Path Convention
//!
//! The API is a Spring Boot service under the `/api` context path. Paths in
//! this crate are relative to [`ApiConfig::api_url`], so
//! `/booking/create` resolves to `http://localhost:8080/api/booking/create`
//! with the default configuration.

pub mod auth;
pub mod booking;
pub mod category;
pub mod config;
pub mod error;
pub mod landlord;
pub mod listing;
pub(crate) mod retry;
pub mod tenant;
pub mod transport;

pub use config::{ApiConfig, ConfigError};
pub use error::ApiError;
pub use transport::{ApiRequest, Body, FormPart, HttpTransport, Method, Transport};

use std::sync::Arc;

/// Top-level API client. Holds sub-clients for each endpoint group.
#[derive(Debug, Clone)]
pub struct ApiClient {
    booking: booking::BookingClient,
    tenant: tenant::TenantListingClient,
    landlord: landlord::LandlordListingClient,
    auth: auth::AuthClient,
}

impl ApiClient {
    /// Create a client talking HTTP to the configured API.
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let transport = HttpTransport::new(config)?;
        Ok(Self::with_transport(Arc::new(transport)))
    }

    /// Create a client over an arbitrary transport.
    pub fn with_transport(transport: Arc<dyn Transport>) -> Self {
        Self {
            booking: booking::BookingClient::new(transport.clone()),
            tenant: tenant::TenantListingClient::new(transport.clone()),
            landlord: landlord::LandlordListingClient::new(transport.clone()),
            auth: auth::AuthClient::new(transport),
        }
    }

    /// Access the booking client.
    pub fn booking(&self) -> &booking::BookingClient {
        &self.booking
    }

    /// Access the tenant listing client.
    pub fn tenant(&self) -> &tenant::TenantListingClient {
        &self.tenant
    }

    /// Access the landlord listing client.
    pub fn landlord(&self) -> &landlord::LandlordListingClient {
        &self.landlord
    }

    /// Access the auth client.
    pub fn auth(&self) -> &auth::AuthClient {
        &self.auth
    }
}
