//! # Authentication Oracle
//!
//! [`AuthService`] keeps the signed-in user in a replay container that
//! starts as `OK(anonymous)`: the app treats "nobody is signed in" as a
//! known answer, not as a pending request.
//!
//! [`AuthExpiryGuard`] is the side channel every other gateway routes its
//! failures through. A 401 from a non-auth endpoint while the oracle still
//! believes a user is signed in means the session expired; the guard then
//! starts a fresh login. The failing gateway still writes its own error.

use std::fmt;
use std::rc::Rc;

use staybook_client::auth::{User, AUTH_PATH_MARKER};
use staybook_client::ApiClient;
use staybook_core::{
    ObservableState, RequestContainer, RequestError, RequestState, StateBuilder, StateReader,
};

use crate::navigation::Navigator;

/// Owner of the current-user container.
pub struct AuthService {
    client: ApiClient,
    login_url: String,
    navigator: Rc<dyn Navigator>,
    fetch_user: RequestContainer<User>,
}

impl fmt::Debug for AuthService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthService")
            .field("login_url", &self.login_url)
            .field("fetch_user", &self.fetch_user)
            .finish_non_exhaustive()
    }
}

impl AuthService {
    pub fn new(client: ApiClient, login_url: impl Into<String>, navigator: Rc<dyn Navigator>) -> Self {
        Self {
            client,
            login_url: login_url.into(),
            navigator,
            fetch_user: ObservableState::replay(StateBuilder::new().for_success(User::not_connected())),
        }
    }

    /// Read handle on the current-user container.
    pub fn fetch_user(&self) -> StateReader<RequestState<User>> {
        self.fetch_user.reader()
    }

    /// True when the container holds a user other than the anonymous placeholder.
    pub fn is_authenticated(&self) -> bool {
        self.fetch_user
            .with(|state| state.value().is_some_and(User::is_connected))
    }

    /// True when the signed-in user holds at least one of `authorities`.
    pub fn has_any_authority<S: AsRef<str>>(&self, authorities: &[S]) -> bool {
        self.fetch_user
            .with(|state| state.value().is_some_and(|user| user.has_any_authority(authorities)))
    }

    /// Refresh the current user.
    ///
    /// A 401 while a user was signed in downgrades to `OK(anonymous)`;
    /// any other failure is written as `ERROR`.
    pub async fn fetch(&self, force_resync: bool) {
        tracing::debug!(force_resync, "fetching authenticated user");
        match self.client.auth().get_authenticated_user(force_resync).await {
            Ok(user) => {
                tracing::debug!(connected = user.is_connected(), "authenticated user fetched");
                self.fetch_user.write(StateBuilder::new().for_success(user));
            }
            Err(err) => {
                let err = RequestError::from(err);
                if err.is_unauthorized() && self.is_authenticated() {
                    tracing::info!("session no longer valid, user is now anonymous");
                    self.fetch_user
                        .write(StateBuilder::new().for_success(User::not_connected()));
                } else {
                    tracing::warn!(error = %err, "failed to fetch authenticated user");
                    self.fetch_user.write(StateBuilder::new().for_error(err));
                }
            }
        }
    }

    /// Send the browser to the identity provider.
    pub fn login(&self) {
        tracing::info!(url = %self.login_url, "redirecting to login");
        self.navigator.redirect_external(&self.login_url);
    }

    /// End the session, mark the user anonymous and follow the provider's
    /// logout URL. A failed logout leaves the current user untouched.
    pub async fn logout(&self) {
        match self.client.auth().logout().await {
            Ok(response) => {
                self.fetch_user
                    .write(StateBuilder::new().for_success(User::not_connected()));
                self.navigator.redirect_external(&response.logout_url);
            }
            Err(err) => tracing::warn!(error = %err, "logout failed"),
        }
    }

    /// Route predicate for screens restricted to some authorities.
    ///
    /// Fetches the user fresh. An empty `required` list only demands a
    /// signed-in user. Anonymous or unreachable sessions trigger
    /// [`login`](Self::login) and are denied.
    pub async fn authority_route_access<S: AsRef<str>>(&self, required: &[S]) -> bool {
        match self.client.auth().get_authenticated_user(false).await {
            Ok(user) if user.is_connected() => {
                required.is_empty() || user.has_any_authority(required)
            }
            Ok(_) => {
                self.login();
                false
            }
            Err(err) => {
                tracing::warn!(error = %err, "route access check failed");
                self.login();
                false
            }
        }
    }
}

/// Session-expiry detector run on every gateway failure.
pub struct AuthExpiryGuard {
    auth: Rc<AuthService>,
}

impl fmt::Debug for AuthExpiryGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthExpiryGuard").finish_non_exhaustive()
    }
}

impl AuthExpiryGuard {
    pub fn new(auth: Rc<AuthService>) -> Self {
        Self { auth }
    }

    /// True when `error` means a signed-in session has expired.
    pub fn is_expired_session(&self, error: &RequestError) -> bool {
        error.is_unauthorized()
            && error
                .url
                .as_deref()
                .is_some_and(|url| !url.contains(AUTH_PATH_MARKER))
            && self.auth.is_authenticated()
    }

    /// Start a login when `error` is an expired session. Returns whether it did.
    pub fn inspect(&self, error: &RequestError) -> bool {
        if self.is_expired_session(error) {
            tracing::warn!(url = ?error.url, "session expired, starting login");
            self.auth.login();
            true
        } else {
            false
        }
    }
}
