//! Screen view models.
//!
//! Each view owns its local state and a [`Bindings`](staybook_core::Bindings)
//! scope. Bindings run once on construction (replay containers) and on every
//! later write; `INIT` is always a no-op. `teardown` (also run on drop)
//! unsubscribes the view and resets the containers it owns.

pub mod book_date;
pub mod bookings;
pub mod display_listing;
pub mod home;
pub mod properties;
pub mod properties_create;

pub use book_date::{BookDateState, BookDateView};
pub use bookings::{Audience, BookingsState, BookingsView};
pub use display_listing::{DisplayListingState, DisplayListingView};
pub use home::{HomeState, HomeView};
pub use properties::{PropertiesState, PropertiesView};
pub use properties_create::{PropertiesCreateState, PropertiesCreateView};
