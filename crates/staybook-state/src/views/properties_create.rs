//! Listing creation dialog.
//!
//! On success the dialog closes with the new listing's id, the user is
//! re-synced (the landlord authority may have just been granted) and, once
//! both the user and the creation are `OK`, the landlord lands on their
//! properties.

use std::cell::RefCell;
use std::rc::Rc;

use staybook_client::category::CategoryName;
use staybook_client::landlord::NewListing;
use staybook_client::listing::{Description, ListingInfo, PriceVo};
use staybook_core::{Bindings, Status};
use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::app::App;
use crate::runtime::spawn;
use crate::toast::Notification;

/// Route shown after a successful creation.
pub const PROPERTIES_ROUTE: &str = "/landlord/properties";

#[derive(Debug, Clone, PartialEq)]
pub struct PropertiesCreateState {
    pub new_listing: NewListing,
    pub loading_creation: bool,
    /// Id the dialog closed with, once created.
    pub closed_with: Option<Uuid>,
    pub navigated: bool,
}

impl Default for PropertiesCreateState {
    fn default() -> Self {
        Self {
            new_listing: NewListing {
                category: CategoryName::AmazingViews,
                location: String::new(),
                infos: ListingInfo::default(),
                description: Description::default(),
                price: PriceVo::default(),
                pictures: Vec::new(),
            },
            loading_creation: false,
            closed_with: None,
            navigated: false,
        }
    }
}

pub struct PropertiesCreateView {
    app: App,
    state: Rc<RefCell<PropertiesCreateState>>,
    bindings: Bindings,
    closed: bool,
}

impl PropertiesCreateView {
    pub fn new(app: &App) -> Self {
        let state = Rc::new(RefCell::new(PropertiesCreateState::default()));
        let mut bindings = Bindings::new();

        // Navigate once both the user and the creation are OK.
        let view_state = Rc::clone(&state);
        let navigator = Rc::clone(&app.navigator);
        bindings.bind2(
            &app.auth.fetch_user(),
            &app.landlord.create_state(),
            move |user, created| {
                if user.is_ok() && created.is_ok() {
                    let first = !std::mem::replace(&mut view_state.borrow_mut().navigated, true);
                    if first {
                        navigator.navigate(PROPERTIES_ROUTE, &[]);
                    }
                }
            },
        );

        let view_state = Rc::clone(&state);
        let toast = Rc::clone(&app.toast);
        let auth = Rc::clone(&app.auth);
        bindings.bind(&app.landlord.create_state(), move |created| match created.status() {
            Status::Ok => {
                {
                    let mut state = view_state.borrow_mut();
                    state.loading_creation = false;
                    state.closed_with = created.value().map(|c| c.public_id);
                }
                toast.send(
                    Notification::success()
                        .summary("Success")
                        .detail("Listing created successfully."),
                );
                let auth = Rc::clone(&auth);
                spawn(async move { auth.fetch(true).await });
            }
            Status::Error => {
                view_state.borrow_mut().loading_creation = false;
                toast.send(
                    Notification::error()
                        .summary("Error")
                        .detail("Couldn't create your listing, please try again."),
                );
            }
            Status::Init => {}
        });

        Self {
            app: app.clone(),
            state,
            bindings,
            closed: false,
        }
    }

    /// Apply a form change to the listing being built.
    pub fn edit(&self, change: impl FnOnce(&mut NewListing)) {
        change(&mut self.state.borrow_mut().new_listing);
    }

    pub fn create(&self) -> JoinHandle<()> {
        let listing = {
            let mut state = self.state.borrow_mut();
            state.loading_creation = true;
            state.new_listing.clone()
        };
        let landlord = Rc::clone(&self.app.landlord);
        spawn(async move { landlord.create(listing).await })
    }

    pub fn state(&self) -> PropertiesCreateState {
        self.state.borrow().clone()
    }

    pub fn teardown(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        self.bindings.teardown();
        self.app.landlord.reset_listing_creation();
    }
}

impl Drop for PropertiesCreateView {
    fn drop(&mut self) {
        self.teardown();
    }
}
