//! Where the booking API lives and how to reach it.
//!
//! `STAYBOOK_*` environment variables override the local development
//! defaults. Tests build a config for a mock server with
//! [`ApiConfig::local_mock`].

use std::fmt;

use url::Url;
use zeroize::Zeroizing;

const DEFAULT_API_URL: &str = "http://localhost:8080/api";
const DEFAULT_ORIGIN: &str = "http://localhost:4200";
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const LOGIN_PATH: &str = "oauth2/authorization/okta";

/// Connection settings for the booking API.
#[derive(Clone)]
pub struct ApiConfig {
    /// REST root including the `/api` context path.
    pub api_url: Url,
    /// Front-end origin; the login redirect hangs off it.
    pub origin: Url,
    /// Cookie header forwarded on every call. Zeroed on drop.
    pub session_cookie: Option<Zeroizing<String>>,
    pub timeout_secs: u64,
}

// The session cookie is a bearer credential and must never reach a log.
impl fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cookie = if self.session_cookie.is_some() {
            "[REDACTED]"
        } else {
            "none"
        };
        f.debug_struct("ApiConfig")
            .field("api_url", &self.api_url.as_str())
            .field("origin", &self.origin.as_str())
            .field("session_cookie", &cookie)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl ApiConfig {
    /// Read `STAYBOOK_API_URL`, `STAYBOOK_ORIGIN`,
    /// `STAYBOOK_SESSION_COOKIE` and `STAYBOOK_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from any variable source. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let url = |name: &'static str, default: &str| {
            let raw = var(name).unwrap_or_else(|| default.to_owned());
            parse_url(name, &raw)
        };

        let timeout_secs = match var("STAYBOOK_TIMEOUT_SECS") {
            None => DEFAULT_TIMEOUT_SECS,
            Some(raw) => match raw.trim().parse() {
                Ok(secs) if secs > 0 => secs,
                _ => return Err(ConfigError::InvalidTimeout { value: raw }),
            },
        };

        Ok(Self {
            api_url: url("STAYBOOK_API_URL", DEFAULT_API_URL)?,
            origin: url("STAYBOOK_ORIGIN", DEFAULT_ORIGIN)?,
            session_cookie: var("STAYBOOK_SESSION_COOKIE").map(Zeroizing::new),
            timeout_secs,
        })
    }

    /// API and origin on `127.0.0.1:port`, short timeout, no cookie.
    pub fn local_mock(port: u16) -> Result<Self, ConfigError> {
        let origin = parse_url("local_mock", &format!("http://127.0.0.1:{port}"))?;
        let api_url = origin
            .join("api")
            .map_err(|e| ConfigError::InvalidUrl {
                var: "local_mock",
                reason: e.to_string(),
            })?;
        Ok(Self {
            api_url,
            origin,
            session_cookie: None,
            timeout_secs: 5,
        })
    }

    /// `api_url` without a trailing slash, ready for path concatenation.
    pub fn api_base(&self) -> String {
        self.api_url.as_str().trim_end_matches('/').to_string()
    }

    /// The identity-provider login entry point.
    pub fn login_url(&self) -> String {
        format!("{}/{LOGIN_PATH}", self.origin.as_str().trim_end_matches('/'))
    }
}

fn parse_url(var: &'static str, raw: &str) -> Result<Url, ConfigError> {
    Url::parse(raw.trim()).map_err(|e| ConfigError::InvalidUrl {
        var,
        reason: e.to_string(),
    })
}

/// Rejected configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} is not a valid URL: {reason}")]
    InvalidUrl { var: &'static str, reason: String },

    #[error("STAYBOOK_TIMEOUT_SECS must be a positive number of seconds, got {value:?}")]
    InvalidTimeout { value: String },

    #[error("session cookie contains characters not allowed in a header")]
    InvalidSessionCookie,
}
