//! Booking API client error types.

use staybook_core::RequestError;

/// Errors from booking API calls.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// HTTP transport error.
    #[error("HTTP error calling {endpoint}: {source}")]
    Http {
        endpoint: String,
        url: String,
        source: reqwest::Error,
    },
    /// The request never produced a response (non-HTTP transports).
    #[error("{endpoint} unreachable at {url}: {reason}")]
    Unreachable {
        endpoint: String,
        url: String,
        reason: String,
    },
    /// The API returned a non-2xx status.
    #[error("{endpoint} returned {status}: {body}")]
    Status {
        endpoint: String,
        url: String,
        status: u16,
        body: String,
    },
    /// Response deserialization failed.
    #[error("failed to deserialize response from {endpoint}: {source}")]
    Deserialization {
        endpoint: String,
        source: serde_json::Error,
    },
    /// Request body serialization failed.
    #[error("failed to encode request for {endpoint}: {source}")]
    Encoding {
        endpoint: String,
        source: serde_json::Error,
    },
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(#[from] super::config::ConfigError),
}

impl ApiError {
    /// HTTP status of the response, when one was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Http { source, .. } => source.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// URL of the failed request, when known.
    pub fn url(&self) -> Option<&str> {
        match self {
            Self::Http { url, .. } | Self::Unreachable { url, .. } | Self::Status { url, .. } => {
                Some(url)
            }
            _ => None,
        }
    }
}

impl From<ApiError> for RequestError {
    fn from(err: ApiError) -> Self {
        let status = err.status();
        let url = err.url().map(str::to_string);
        let message = match &err {
            ApiError::Status { body, .. } if !body.is_empty() => body.clone(),
            other => other.to_string(),
        };
        RequestError {
            status,
            url,
            message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_converts_with_code_and_url() {
        let err = ApiError::Status {
            endpoint: "GET /tenant-listing/get-one".into(),
            url: "http://localhost:8080/api/tenant-listing/get-one".into(),
            status: 500,
            body: "boom".into(),
        };
        let req: RequestError = err.into();
        assert_eq!(req.status, Some(500));
        assert_eq!(
            req.url.as_deref(),
            Some("http://localhost:8080/api/tenant-listing/get-one")
        );
        assert_eq!(req.message, "boom");
    }

    #[test]
    fn unreachable_converts_without_status() {
        let err = ApiError::Unreachable {
            endpoint: "POST /booking/create".into(),
            url: "http://localhost:8080/api/booking/create".into(),
            reason: "connection refused".into(),
        };
        let req: RequestError = err.into();
        assert_eq!(req.status, None);
        assert!(req.message.contains("connection refused"));
    }
}
