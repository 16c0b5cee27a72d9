//! Service locator.
//!
//! Builds every service once, in dependency order, and hands out shared
//! handles. Views receive the `App` and pick what they need.

use std::rc::Rc;

use staybook_client::{ApiClient, ApiConfig, ApiError};

use crate::auth::{AuthExpiryGuard, AuthService};
use crate::booking::BookingService;
use crate::category::CategoryService;
use crate::landlord::LandlordListingService;
use crate::navigation::Navigator;
use crate::tenant::TenantListingService;
use crate::toast::ToastService;

/// Shared handles on every service.
#[derive(Clone)]
pub struct App {
    pub toast: Rc<ToastService>,
    pub category: Rc<CategoryService>,
    pub auth: Rc<AuthService>,
    pub expiry_guard: Rc<AuthExpiryGuard>,
    pub booking: Rc<BookingService>,
    pub tenant: Rc<TenantListingService>,
    pub landlord: Rc<LandlordListingService>,
    pub navigator: Rc<dyn Navigator>,
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("auth", &self.auth)
            .field("booking", &self.booking)
            .field("tenant", &self.tenant)
            .field("landlord", &self.landlord)
            .finish_non_exhaustive()
    }
}

impl App {
    /// Build all services over `client`. `login_url` is where an expired
    /// or missing session is sent.
    pub fn new(client: ApiClient, login_url: impl Into<String>, navigator: Rc<dyn Navigator>) -> Self {
        let toast = Rc::new(ToastService::new());
        let category = Rc::new(CategoryService::new());
        let auth = Rc::new(AuthService::new(
            client.clone(),
            login_url,
            Rc::clone(&navigator),
        ));
        let expiry_guard = Rc::new(AuthExpiryGuard::new(Rc::clone(&auth)));
        let booking = Rc::new(BookingService::new(client.clone(), Rc::clone(&expiry_guard)));
        let tenant = Rc::new(TenantListingService::new(
            client.clone(),
            Rc::clone(&expiry_guard),
        ));
        let landlord = Rc::new(LandlordListingService::new(client, Rc::clone(&expiry_guard)));

        tracing::debug!("services ready");
        Self {
            toast,
            category,
            auth,
            expiry_guard,
            booking,
            tenant,
            landlord,
            navigator,
        }
    }

    /// Build all services talking HTTP to the configured API.
    pub fn from_config(config: &ApiConfig, navigator: Rc<dyn Navigator>) -> Result<Self, ApiError> {
        let client = ApiClient::new(config)?;
        Ok(Self::new(client, config.login_url(), navigator))
    }
}
