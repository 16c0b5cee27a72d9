//! # Request Errors
//!
//! The transport-agnostic error object stored in a failed [`RequestState`].
//! It carries at least the HTTP status code when the request reached a
//! server, the URL that failed, and a human-readable message.
//!
//! [`RequestState`]: crate::RequestState

use std::fmt;

/// Message used when a failure carries no error object of its own.
pub const UNKNOWN_ERROR: &str = "Unknown Error";

/// HTTP status reported for an expired or missing session.
pub const STATUS_UNAUTHORIZED: u16 = 401;

/// Error held by a request container in the `ERROR` state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestError {
    /// HTTP status code, absent when the request never reached a server.
    pub status: Option<u16>,
    /// URL of the failed request, if known.
    pub url: Option<String>,
    /// Human-readable description.
    pub message: String,
}

impl RequestError {
    /// Error for a response that came back with a non-2xx status.
    pub fn from_status(status: u16, url: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status: Some(status),
            url: Some(url.into()),
            message: message.into(),
        }
    }

    /// Error for a request that failed before any response arrived.
    pub fn transport(url: Option<String>, message: impl Into<String>) -> Self {
        Self {
            status: None,
            url,
            message: message.into(),
        }
    }

    /// The generic error used when none was supplied.
    pub fn unknown() -> Self {
        Self {
            status: None,
            url: None,
            message: UNKNOWN_ERROR.to_string(),
        }
    }

    /// Whether the server rejected the request as unauthenticated.
    pub fn is_unauthorized(&self) -> bool {
        self.status == Some(STATUS_UNAUTHORIZED)
    }
}

impl Default for RequestError {
    fn default() -> Self {
        Self::unknown()
    }
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.status, &self.url) {
            (Some(status), Some(url)) => write!(f, "{url} returned {status}: {}", self.message),
            (Some(status), None) => write!(f, "status {status}: {}", self.message),
            (None, Some(url)) => write!(f, "request to {url} failed: {}", self.message),
            (None, None) => f.write_str(&self.message),
        }
    }
}

impl std::error::Error for RequestError {}
