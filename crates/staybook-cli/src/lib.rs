//! # staybook-cli — Terminal Front-End
//!
//! Provides the `staybook` command-line interface. Each subcommand opens the
//! same screens the web front-end has (home grid, listing page, booking
//! widget, trips, reservations, landlord properties) and prints what they
//! would render.
//!
//! ## Subcommands
//!
//! - `staybook listings` — Browse, show, availability, search, book.
//! - `staybook bookings` — Trips, reservations, cancellation.
//! - `staybook properties` — Landlord listings: list, create, delete.
//! - `staybook account` — Whoami, login, logout, route access.
//!
//! ```bash
//! STAYBOOK_SESSION_COOKIE="JSESSIONID=..." staybook listings browse --category beach
//! staybook bookings cancel 6f1c2d3e-4b5a-4c6d-8e7f-000000000001
//! ```
//!
//! Services are single-threaded; every command runs inside a `LocalSet`
//! (see [`staybook_state::runtime::block_on_local`]).

pub mod account;
pub mod bookings;
pub mod console;
pub mod listings;
pub mod properties;

use std::rc::Rc;

use staybook_client::{ApiConfig, ApiError};
use staybook_state::App;

use crate::console::ConsoleNavigator;

/// Build the application over the live API with a console navigator.
pub fn open_app(config: &ApiConfig) -> Result<App, ApiError> {
    App::from_config(config, Rc::new(ConsoleNavigator))
}
