//! Typed client for the authentication endpoints.
//!
//! | Method | Path | Operation |
//! |--------|------|-----------|
//! | GET    | `/auth/get-authenticated-user` | Current user |
//! | POST   | `/auth/logout` | End the session |

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::transport::{call, ApiRequest, Transport};

/// Email carried by the placeholder user of an anonymous session.
pub const NOT_CONNECTED: &str = "NOT_CONNECTED";

/// Path prefix of the authentication endpoints.
pub const AUTH_PATH_MARKER: &str = "api/auth";

/// The signed-in user, or the anonymous placeholder.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub authorities: Vec<String>,
}

impl User {
    /// The anonymous placeholder user.
    pub fn not_connected() -> Self {
        Self {
            email: Some(NOT_CONNECTED.to_string()),
            ..Self::default()
        }
    }

    /// True unless this is the anonymous placeholder.
    pub fn is_connected(&self) -> bool {
        self.email.as_deref() != Some(NOT_CONNECTED)
    }

    /// True when the user holds at least one of `authorities`.
    pub fn has_any_authority<S: AsRef<str>>(&self, authorities: &[S]) -> bool {
        self.is_connected()
            && self
                .authorities
                .iter()
                .any(|held| authorities.iter().any(|a| a.as_ref() == held))
    }
}

/// Logout acknowledgement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogoutResponse {
    pub logout_url: String,
}

/// Client for the authentication endpoints.
#[derive(Clone)]
pub struct AuthClient {
    transport: Arc<dyn Transport>,
}

impl std::fmt::Debug for AuthClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthClient").finish_non_exhaustive()
    }
}

impl AuthClient {
    pub(crate) fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// The authenticated user.
    ///
    /// Calls `GET {api}/auth/get-authenticated-user?forceResync=..`.
    pub async fn get_authenticated_user(&self, force_resync: bool) -> Result<User, ApiError> {
        let request =
            ApiRequest::get("/auth/get-authenticated-user").param("forceResync", force_resync);
        call(self.transport.as_ref(), request).await
    }

    /// End the session.
    ///
    /// Calls `POST {api}/auth/logout` with an empty JSON object.
    pub async fn logout(&self) -> Result<LogoutResponse, ApiError> {
        let request = ApiRequest::post("/auth/logout").json(&serde_json::json!({}))?;
        call(self.transport.as_ref(), request).await
    }
}
