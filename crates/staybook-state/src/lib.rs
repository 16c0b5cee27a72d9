//! # staybook-state — Gateways, Buses and View Bindings
//!
//! The services a staybook front-end talks to. Each service owns the
//! request containers of its use cases and exposes one async gateway per
//! call; a gateway awaits a single API call and writes a single
//! `RequestState` into its own container.
//!
//! ## Services
//!
//! | Service | Containers |
//! |---------|------------|
//! | [`BookingService`] | create, availability, booked listings, cancel, reservations |
//! | [`TenantListingService`] | by category, one listing, search (broadcast) |
//! | [`LandlordListingService`] | create, all, delete |
//! | [`AuthService`] | current user |
//! | [`ToastService`] | notifications (broadcast) |
//! | [`CategoryService`] | selected category |
//!
//! [`App`] builds them in dependency order and hands out `Rc` handles.
//!
//! ## Threading
//!
//! Everything here is single-threaded. Gateway futures are `!Send`; issue
//! them with [`runtime::spawn`] inside a `tokio::task::LocalSet`.

pub mod app;
pub mod auth;
pub mod booking;
pub mod category;
pub(crate) mod gateway;
pub mod landlord;
pub mod navigation;
pub mod runtime;
pub mod tenant;
pub mod toast;
pub mod views;

pub use app::App;
pub use auth::{AuthExpiryGuard, AuthService};
pub use booking::BookingService;
pub use category::{Category, CategoryService};
pub use landlord::LandlordListingService;
pub use navigation::{NavigationEvent, Navigator, RecordingNavigator};
pub use tenant::TenantListingService;
pub use toast::{Notification, Severity, ToastService};
