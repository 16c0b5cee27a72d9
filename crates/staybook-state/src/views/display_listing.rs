//! Listing detail page.

use std::cell::RefCell;
use std::rc::Rc;

use staybook_client::listing::{Listing, Picture};
use staybook_core::{Bindings, Status};
use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::app::App;
use crate::category::Category;
use crate::runtime::spawn;
use crate::toast::Notification;

#[derive(Debug, Clone, PartialEq)]
pub struct DisplayListingState {
    pub listing: Option<Listing>,
    pub category: Option<Category>,
    pub current_public_id: Option<Uuid>,
    pub loading: bool,
}

impl Default for DisplayListingState {
    fn default() -> Self {
        Self {
            listing: None,
            category: None,
            current_public_id: None,
            loading: true,
        }
    }
}

pub struct DisplayListingView {
    app: App,
    state: Rc<RefCell<DisplayListingState>>,
    bindings: Bindings,
    closed: bool,
}

impl DisplayListingView {
    pub fn new(app: &App) -> Self {
        let state = Rc::new(RefCell::new(DisplayListingState::default()));
        let mut bindings = Bindings::new();

        let view_state = Rc::clone(&state);
        let toast = Rc::clone(&app.toast);
        let categories = Rc::clone(&app.category);
        bindings.bind(&app.tenant.one_by_public_id_state(), move |fetched| {
            match fetched.status() {
                Status::Ok => {
                    let listing = fetched.value().cloned().map(|mut listing| {
                        listing.pictures = put_cover_picture_first(listing.pictures);
                        listing
                    });
                    let category = listing
                        .as_ref()
                        .and_then(|l| categories.category_by_technical_name(l.category));
                    let mut state = view_state.borrow_mut();
                    state.loading = false;
                    state.listing = listing;
                    state.category = category;
                }
                Status::Error => {
                    view_state.borrow_mut().loading = false;
                    toast.send(Notification::error().detail("Error when fetching the listing"));
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

    pub fn load(&self, public_id: Uuid) -> JoinHandle<()> {
        {
            let mut state = self.state.borrow_mut();
            state.loading = true;
            state.current_public_id = Some(public_id);
        }
        let tenant = Rc::clone(&self.app.tenant);
        spawn(async move { tenant.get_one_by_public_id(public_id).await })
    }

    pub fn state(&self) -> DisplayListingState {
        self.state.borrow().clone()
    }

    pub fn teardown(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        self.bindings.teardown();
        self.app.tenant.reset_get_one_by_public_id();
    }
}

impl Drop for DisplayListingView {
    fn drop(&mut self) {
        self.teardown();
    }
}

/// Move the cover picture to the front, keeping the others in order.
///
/// Pictures without a cover, or already led by it, come back unchanged.
pub fn put_cover_picture_first(mut pictures: Vec<Picture>) -> Vec<Picture> {
    if let Some(index) = pictures.iter().position(|p| p.is_cover) {
        let cover = pictures.remove(index);
        pictures.insert(0, cover);
    }
    pictures
}

#[cfg(test)]
mod tests {
    use super::*;

    fn picture(file: &str, is_cover: bool) -> Picture {
        Picture {
            file: file.into(),
            file_content_type: "image/png".into(),
            is_cover,
        }
    }

    fn files(pictures: &[Picture]) -> Vec<&str> {
        pictures.iter().map(|p| p.file.as_str()).collect()
    }

    #[test]
    fn cover_moves_to_front() {
        let out = put_cover_picture_first(vec![
            picture("a", false),
            picture("b", false),
            picture("c", true),
        ]);
        assert_eq!(files(&out), vec!["c", "a", "b"]);
    }

    #[test]
    fn cover_already_first_is_untouched() {
        let out = put_cover_picture_first(vec![picture("a", true), picture("b", false)]);
        assert_eq!(files(&out), vec!["a", "b"]);
    }

    #[test]
    fn no_cover_keeps_order() {
        let out = put_cover_picture_first(vec![picture("a", false), picture("b", false)]);
        assert_eq!(files(&out), vec!["a", "b"]);
    }

    #[test]
    fn empty_stays_empty() {
        assert!(put_cover_picture_first(Vec::new()).is_empty());
    }
}
