//! Home grid: listings of the selected category, or search results.

use std::cell::RefCell;
use std::rc::Rc;

use staybook_client::listing::{CardListing, Search};
use staybook_core::{Bindings, Pagination, Status};
use tokio::task::JoinHandle;

use crate::app::App;
use crate::runtime::spawn;
use crate::toast::Notification;

/// Page requested for every category change and search.
pub const HOME_PAGE_SIZE: u32 = 20;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct HomeState {
    pub listings: Option<Vec<CardListing>>,
    pub loading: bool,
    pub search_is_loading: bool,
    pub empty_search: bool,
}

pub struct HomeView {
    app: App,
    page_request: Pagination,
    state: Rc<RefCell<HomeState>>,
    bindings: Bindings,
    closed: bool,
}

impl HomeView {
    pub fn new(app: &App) -> Self {
        let state = Rc::new(RefCell::new(HomeState::default()));
        let mut bindings = Bindings::new();

        let view_state = Rc::clone(&state);
        let toast = Rc::clone(&app.toast);
        bindings.bind(&app.tenant.all_by_category_state(), move |page| {
            match page.status() {
                Status::Ok => {
                    let mut state = view_state.borrow_mut();
                    state.listings = page.value().map(|p| p.content.clone());
                    state.loading = false;
                    state.empty_search = false;
                }
                Status::Error => {
                    {
                        let mut state = view_state.borrow_mut();
                        state.loading = false;
                        state.empty_search = false;
                    }
                    toast.send(
                        Notification::error()
                            .summary("Error")
                            .detail("Error when fetching the listing"),
                    );
                }
                Status::Init => {}
            }
        });

        let view_state = Rc::clone(&state);
        let toast = Rc::clone(&app.toast);
        bindings.bind(&app.tenant.search_state(), move |found| match found.status() {
            Status::Ok => {
                let content = found.value().map(|p| p.content.clone()).unwrap_or_default();
                let mut state = view_state.borrow_mut();
                state.empty_search = content.is_empty();
                state.listings = Some(content);
                state.loading = false;
                state.search_is_loading = false;
            }
            Status::Error => {
                {
                    let mut state = view_state.borrow_mut();
                    state.loading = false;
                    state.search_is_loading = false;
                }
                toast.send(
                    Notification::error()
                        .summary("Error")
                        .detail("Error when searching the listing"),
                );
            }
            Status::Init => {}
        });

        Self {
            app: app.clone(),
            page_request: Pagination::new(0, HOME_PAGE_SIZE),
            state,
            bindings,
            closed: false,
        }
    }

    /// Start following the category bus. The current category is fetched
    /// right away; every later change triggers a new fetch unless a search
    /// is in flight.
    pub fn init(&mut self) {
        let view_state = Rc::clone(&self.state);
        let tenant = Rc::clone(&self.app.tenant);
        let page = self.page_request.clone();
        let subscription = self.app.category.changes().subscribe(move |category| {
            let search_in_flight = {
                let mut state = view_state.borrow_mut();
                state.loading = true;
                state.search_is_loading
            };
            if !search_in_flight {
                let tenant = Rc::clone(&tenant);
                let page = page.clone();
                let name = category.technical_name;
                spawn(async move { tenant.get_all_by_category(page, name).await });
            }
        });
        self.bindings.hold(subscription);
    }

    pub fn search(&self, search: Search) -> JoinHandle<()> {
        {
            let mut state = self.state.borrow_mut();
            state.search_is_loading = true;
            state.loading = true;
        }
        let tenant = Rc::clone(&self.app.tenant);
        let page = self.page_request.clone();
        spawn(async move { tenant.search_listing(search, page).await })
    }

    pub fn state(&self) -> HomeState {
        self.state.borrow().clone()
    }

    pub fn teardown(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        self.bindings.teardown();
        self.app.tenant.reset_get_all_by_category();
    }
}

impl Drop for HomeView {
    fn drop(&mut self) {
        self.teardown();
    }
}
