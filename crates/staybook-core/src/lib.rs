//! # staybook-core — Request State Containers
//!
//! The reactive state layer shared by every staybook service. A server
//! interaction is wrapped in a small container that tracks whether it has
//! not run yet, succeeded, or failed, and that container is consumed by view
//! bindings through push-based updates.
//!
//! ## Building Blocks
//!
//! 1. **[`RequestState`]** — immutable tri-state value (`INIT`, `OK`,
//!    `ERROR`). Built through [`StateBuilder`]; fields are private so an
//!    invalid combination cannot be constructed.
//!
//! 2. **[`ObservableState`]** — single-owner mutable cell holding the latest
//!    value. Subscribers are notified synchronously, in registration order.
//!    Delivery is either [`Delivery::Replay`] (late subscribers receive the
//!    current value immediately) or [`Delivery::Broadcast`] (fire-and-forget
//!    buses such as the toast channel).
//!
//! 3. **[`Bindings`]** — a view's set of effect subscriptions. Dropping or
//!    tearing it down unsubscribes only that view.
//!
//! 4. **[`Pagination`] / [`Page`]** — request cursor and the collection
//!    envelope returned by paged endpoints.
//!
//! ## Crate Policy
//!
//! - No network, no async. Gateways live in `staybook-state`.
//! - Single-threaded: containers are `Rc`-shared and `!Send`.
//! - No `.unwrap()` outside tests.

pub mod binding;
pub mod error;
pub mod observable;
pub mod pagination;
pub mod state;

pub use binding::Bindings;
pub use error::RequestError;
pub use observable::{Delivery, ObservableState, RequestContainer, StateReader, Subscription};
pub use pagination::{Page, Pageable, Pagination, SortInfo};
pub use state::{RequestState, StateBuilder, Status};
