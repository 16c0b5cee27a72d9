//! # Transport Seam
//!
//! Every endpoint client describes its call as an [`ApiRequest`] and hands
//! it to a [`Transport`]. Production uses [`HttpTransport`] (`reqwest`);
//! tests substitute scripted in-memory transports.
//!
//! A transport returns the JSON body of a 2xx response, or an [`ApiError`]
//! carrying the status code for anything else. An empty body decodes as
//! `null`.

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::{ApiConfig, ConfigError};
use crate::error::ApiError;
use crate::retry::{is_resendable, Backoff};

/// HTTP method of an API call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        };
        f.write_str(s)
    }
}

/// One part of a `multipart/form-data` body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormPart {
    Text {
        name: String,
        value: String,
    },
    File {
        name: String,
        file_name: String,
        content_type: String,
        bytes: Vec<u8>,
    },
}

/// Request body.
#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    Empty,
    Json(serde_json::Value),
    Multipart(Vec<FormPart>),
}

/// A transport-neutral description of one API call.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    /// Path relative to the API base, starting with `/`.
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Body,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: Body::Empty,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::Post, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path)
    }

    /// Append one query parameter.
    pub fn param(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((name.into(), value.to_string()));
        self
    }

    /// Append many query parameters, keeping their order.
    pub fn params(mut self, params: impl IntoIterator<Item = (String, String)>) -> Self {
        self.query.extend(params);
        self
    }

    /// Attach a JSON body.
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self, ApiError> {
        let value = serde_json::to_value(body).map_err(|source| ApiError::Encoding {
            endpoint: self.endpoint(),
            source,
        })?;
        self.body = Body::Json(value);
        Ok(self)
    }

    /// Attach a multipart body.
    pub fn multipart(mut self, parts: Vec<FormPart>) -> Self {
        self.body = Body::Multipart(parts);
        self
    }

    /// `"METHOD /path"`, used in logs and errors.
    pub fn endpoint(&self) -> String {
        format!("{} {}", self.method, self.path)
    }
}

/// Boxed future returned by [`Transport::send`].
pub type TransportFuture<'a> =
    Pin<Box<dyn Future<Output = Result<serde_json::Value, ApiError>> + Send + 'a>>;

/// The network capability behind every endpoint client.
///
/// Implementations must be `Send + Sync` so they can be shared behind an
/// `Arc`. The trait is object-safe to support runtime transport selection
/// (live vs. scripted).
pub trait Transport: Send + Sync {
    /// Perform `request`, resolving to the JSON body of a 2xx response.
    fn send(&self, request: ApiRequest) -> TransportFuture<'_>;

    /// Absolute URL `request` targets, for diagnostics.
    fn url_for(&self, request: &ApiRequest) -> String;
}

/// Send `request` through `transport` and decode the body as `R`.
pub(crate) async fn call<R: DeserializeOwned>(
    transport: &dyn Transport,
    request: ApiRequest,
) -> Result<R, ApiError> {
    let endpoint = request.endpoint();
    tracing::debug!(%endpoint, "booking API call");
    let body = transport.send(request).await?;
    serde_json::from_value(body).map_err(|source| ApiError::Deserialization { endpoint, source })
}

// -- reqwest implementation ---------------------------------------------------

/// `reqwest`-backed transport.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: reqwest::Client,
    base: String,
}

impl HttpTransport {
    /// Build the HTTP client from configuration.
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let mut headers = reqwest::header::HeaderMap::new();
        if let Some(cookie) = &config.session_cookie {
            headers.insert(
                reqwest::header::COOKIE,
                reqwest::header::HeaderValue::from_str(cookie.as_str())
                    .map_err(|_| ApiError::Config(ConfigError::InvalidSessionCookie))?,
            );
        }

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .default_headers(headers)
            .build()
            .map_err(|e| ApiError::Http {
                endpoint: "client_init".into(),
                url: config.api_base(),
                source: e,
            })?;

        Ok(Self {
            http,
            base: config.api_base(),
        })
    }

    fn build(&self, request: &ApiRequest, url: &str) -> reqwest::RequestBuilder {
        let builder = match request.method {
            Method::Get => self.http.get(url),
            Method::Post => self.http.post(url),
            Method::Put => self.http.put(url),
            Method::Delete => self.http.delete(url),
        };
        let builder = if request.query.is_empty() {
            builder
        } else {
            builder.query(&request.query)
        };
        match &request.body {
            Body::Empty => builder,
            Body::Json(value) => builder.json(value),
            Body::Multipart(parts) => builder.multipart(build_form(parts)),
        }
    }

    async fn perform(&self, request: ApiRequest) -> Result<serde_json::Value, ApiError> {
        let endpoint = request.endpoint();
        let url = self.url_for(&request);

        let resp = Backoff::DEFAULT
            .run(
                &endpoint,
                |err| is_resendable(request.method, err),
                || self.build(&request, &url).send(),
            )
            .await
            .map_err(|source| ApiError::Http {
                endpoint: endpoint.clone(),
                url: url.clone(),
                source,
            })?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                endpoint,
                url,
                status,
                body,
            });
        }

        let bytes = resp.bytes().await.map_err(|source| ApiError::Http {
            endpoint: endpoint.clone(),
            url: url.clone(),
            source,
        })?;
        if bytes.is_empty() {
            return Ok(serde_json::Value::Null);
        }
        serde_json::from_slice(&bytes)
            .map_err(|source| ApiError::Deserialization { endpoint, source })
    }
}

impl Transport for HttpTransport {
    fn send(&self, request: ApiRequest) -> TransportFuture<'_> {
        Box::pin(self.perform(request))
    }

    fn url_for(&self, request: &ApiRequest) -> String {
        format!("{}{}", self.base, request.path)
    }
}

fn build_form(parts: &[FormPart]) -> reqwest::multipart::Form {
    parts
        .iter()
        .fold(reqwest::multipart::Form::new(), |form, part| match part {
            FormPart::Text { name, value } => form.text(name.clone(), value.clone()),
            FormPart::File {
                name,
                file_name,
                content_type,
                bytes,
            } => {
                let file_part = || {
                    reqwest::multipart::Part::bytes(bytes.clone()).file_name(file_name.clone())
                };
                // An unparsable MIME type falls back to the untyped part.
                let part = file_part().mime_str(content_type).unwrap_or_else(|_| file_part());
                form.part(name.clone(), part)
            }
        })
}
