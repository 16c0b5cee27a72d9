//! Booking lists: a tenant's trips and a landlord's reservations.
//!
//! Both screens share the cancel container. A cancel result is matched
//! against the list by booking id, so a result for a booking the screen
//! does not show is ignored.

use std::cell::RefCell;
use std::rc::Rc;

use staybook_client::booking::BookedListing;
use staybook_core::{Bindings, Status};
use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::app::App;
use crate::runtime::spawn;
use crate::toast::Notification;

/// Whose bookings the screen lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Audience {
    /// Bookings the signed-in tenant made.
    Tenant,
    /// Bookings made on the signed-in landlord's listings.
    Landlord,
}

impl Audience {
    pub fn by_landlord(self) -> bool {
        matches!(self, Self::Landlord)
    }

    fn fetch_failed(self) -> &'static str {
        match self {
            Self::Tenant => "Error when fetching the listing",
            Self::Landlord => "Error when fetching the reservation",
        }
    }

    fn cancelled(self) -> &'static str {
        match self {
            Self::Tenant => "Successfully cancelled booking",
            Self::Landlord => "Successfully cancelled reservation",
        }
    }

    fn cancel_failed(self) -> &'static str {
        match self {
            Self::Tenant => "Error when canceling your booking",
            Self::Landlord => "Error when canceling reservation",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookingsState {
    pub listings: Vec<BookedListing>,
    pub loading: bool,
}

/// List screen for [`Audience::Tenant`] or [`Audience::Landlord`] bookings.
pub struct BookingsView {
    app: App,
    audience: Audience,
    state: Rc<RefCell<BookingsState>>,
    bindings: Bindings,
    closed: bool,
}

impl BookingsView {
    /// The tenant's "my trips" screen.
    pub fn booked_listing(app: &App) -> Self {
        Self::new(app, Audience::Tenant)
    }

    /// The landlord's reservations screen.
    pub fn reservation(app: &App) -> Self {
        Self::new(app, Audience::Landlord)
    }

    pub fn new(app: &App, audience: Audience) -> Self {
        let state = Rc::new(RefCell::new(BookingsState::default()));
        let mut bindings = Bindings::new();

        let source = match audience {
            Audience::Tenant => app.booking.booked_listing_state(),
            Audience::Landlord => app.booking.booked_listing_for_landlord_state(),
        };
        let view_state = Rc::clone(&state);
        let toast = Rc::clone(&app.toast);
        bindings.bind(&source, move |fetched| match fetched.status() {
            Status::Ok => {
                let mut state = view_state.borrow_mut();
                state.loading = false;
                state.listings = fetched.value().cloned().unwrap_or_default();
            }
            Status::Error => {
                view_state.borrow_mut().loading = false;
                toast.send(Notification::error().summary(audience.fetch_failed()));
            }
            Status::Init => {}
        });

        let view_state = Rc::clone(&state);
        let toast = Rc::clone(&app.toast);
        bindings.bind(&app.booking.cancel_state(), move |cancelled| {
            let booking_id = cancelled.value().copied();
            match cancelled.status() {
                Status::Ok => {
                    let mut state = view_state.borrow_mut();
                    if let Some(index) = booking_id.and_then(|id| position(&state.listings, id)) {
                        state.listings.remove(index);
                    }
                    drop(state);
                    toast.send(Notification::success().summary(audience.cancelled()));
                }
                Status::Error => {
                    let mut state = view_state.borrow_mut();
                    if let Some(index) = booking_id.and_then(|id| position(&state.listings, id)) {
                        state.listings[index].loading = false;
                    }
                    drop(state);
                    toast.send(Notification::error().summary(audience.cancel_failed()));
                }
                Status::Init => {}
            }
        });

        Self {
            app: app.clone(),
            audience,
            state,
            bindings,
            closed: false,
        }
    }

    pub fn audience(&self) -> Audience {
        self.audience
    }

    pub fn fetch(&self) -> JoinHandle<()> {
        self.state.borrow_mut().loading = true;
        let booking = Rc::clone(&self.app.booking);
        match self.audience {
            Audience::Tenant => spawn(async move { booking.get_booked_listing().await }),
            Audience::Landlord => {
                spawn(async move { booking.get_booked_listing_for_landlord().await })
            }
        }
    }

    /// Cancel one listed booking. Returns `None` when it is not listed.
    pub fn cancel(&self, booking_public_id: Uuid) -> Option<JoinHandle<()>> {
        let listing_public_id = {
            let mut state = self.state.borrow_mut();
            let index = position(&state.listings, booking_public_id)?;
            let item = &mut state.listings[index];
            item.loading = true;
            item.listing_public_id
        };
        let booking = Rc::clone(&self.app.booking);
        let by_landlord = self.audience.by_landlord();
        Some(spawn(async move {
            booking
                .cancel(booking_public_id, listing_public_id, by_landlord)
                .await
        }))
    }

    pub fn state(&self) -> BookingsState {
        self.state.borrow().clone()
    }

    pub fn teardown(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        self.bindings.teardown();
        self.app.booking.reset_cancel();
    }
}

impl Drop for BookingsView {
    fn drop(&mut self) {
        self.teardown();
    }
}

fn position(listings: &[BookedListing], booking_public_id: Uuid) -> Option<usize> {
    listings
        .iter()
        .position(|l| l.booking_public_id == booking_public_id)
}
