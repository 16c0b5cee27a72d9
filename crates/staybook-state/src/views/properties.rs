//! The landlord's own listings.

use std::cell::RefCell;
use std::rc::Rc;

use staybook_client::listing::CardListing;
use staybook_core::{Bindings, Status};
use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::app::App;
use crate::runtime::spawn;
use crate::toast::Notification;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertiesState {
    pub listings: Vec<CardListing>,
    pub loading_fetch_all: bool,
    pub loading_deletion: bool,
}

pub struct PropertiesView {
    app: App,
    state: Rc<RefCell<PropertiesState>>,
    bindings: Bindings,
    closed: bool,
}

impl PropertiesView {
    pub fn new(app: &App) -> Self {
        let state = Rc::new(RefCell::new(PropertiesState::default()));
        let mut bindings = Bindings::new();

        let view_state = Rc::clone(&state);
        let toast = Rc::clone(&app.toast);
        bindings.bind(&app.landlord.all_state(), move |all| match all.status() {
            Status::Ok => {
                let mut state = view_state.borrow_mut();
                state.loading_fetch_all = false;
                state.listings = all.value().cloned().unwrap_or_default();
            }
            Status::Error => {
                view_state.borrow_mut().loading_fetch_all = false;
                toast.send(
                    Notification::error()
                        .summary("Error")
                        .detail("Error when fetching the listing"),
                );
            }
            Status::Init => {}
        });

        let view_state = Rc::clone(&state);
        let toast = Rc::clone(&app.toast);
        bindings.bind(&app.landlord.delete_state(), move |deleted| {
            let public_id = deleted.value().copied();
            match deleted.status() {
                Status::Ok => {
                    {
                        let mut state = view_state.borrow_mut();
                        state.loading_deletion = false;
                        if let Some(index) = public_id.and_then(|id| position(&state.listings, id)) {
                            state.listings.remove(index);
                        }
                    }
                    toast.send(
                        Notification::success()
                            .summary("Deleted successfully")
                            .detail("Listing deleted successfully."),
                    );
                }
                Status::Error => {
                    {
                        let mut state = view_state.borrow_mut();
                        state.loading_deletion = false;
                        if let Some(index) = public_id.and_then(|id| position(&state.listings, id)) {
                            state.listings[index].loading = false;
                        }
                    }
                    toast.send(
                        Notification::error()
                            .summary("Error")
                            .detail("Error when deleting the listing"),
                    );
                }
                Status::Init => {}
            }
        });

        Self {
            app: app.clone(),
            state,
            bindings,
            closed: false,
        }
    }

    pub fn fetch(&self) -> JoinHandle<()> {
        self.state.borrow_mut().loading_fetch_all = true;
        let landlord = Rc::clone(&self.app.landlord);
        spawn(async move { landlord.get_all().await })
    }

    /// Delete one listed property. Returns `None` when it is not listed.
    pub fn delete(&self, public_id: Uuid) -> Option<JoinHandle<()>> {
        {
            let mut state = self.state.borrow_mut();
            let index = position(&state.listings, public_id)?;
            state.listings[index].loading = true;
            state.loading_deletion = true;
        }
        let landlord = Rc::clone(&self.app.landlord);
        Some(spawn(async move { landlord.delete(public_id).await }))
    }

    pub fn state(&self) -> PropertiesState {
        self.state.borrow().clone()
    }

    pub fn teardown(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        self.bindings.teardown();
        self.app.landlord.reset_delete();
    }
}

impl Drop for PropertiesView {
    fn drop(&mut self) {
        self.teardown();
    }
}

fn position(listings: &[CardListing], public_id: Uuid) -> Option<usize> {
    listings.iter().position(|l| l.public_id == public_id)
}
