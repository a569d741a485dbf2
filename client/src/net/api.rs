//! REST API transport for communicating with the server.
//!
//! DESIGN
//! ======
//! Controllers talk to the server through the [`AuthApi`] trait so tests can
//! script responses. [`HttpApi`] is the native reqwest implementation used by
//! the CLI; it keeps a cookie store so the `session_token` cookie set by login
//! rides along on later calls, or it can be seeded with an existing token.
//! In the browser, `net::browser::BrowserApi` implements the same trait over
//! `gloo-net` and lets the page's own cookies do the work.
//!
//! ERROR HANDLING
//! ==============
//! Any HTTP status is a successful transport result. Only connection
//! failures and undecodable bodies surface as [`TransportError`].

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

#[cfg(feature = "native")]
use std::time::Duration;

#[cfg(feature = "native")]
use reqwest::header::{COOKIE, HeaderMap, HeaderValue};
use serde_json::Value;

pub const LOGIN_ENDPOINT: &str = "/api/auth/login";
pub const SIGNUP_ENDPOINT: &str = "/api/auth/signup";
pub const LOGOUT_ENDPOINT: &str = "/api/auth/logout";
pub const ME_ENDPOINT: &str = "/api/auth/me";
pub const SESSION_TOKEN_ENDPOINT: &str = "/api/auth/session-token";

pub const SESSION_COOKIE_NAME: &str = "session_token";

pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),
    #[error("http client build failed: {0}")]
    ClientBuild(String),
    #[error("request failed: {0}")]
    Request(String),
    #[error("response body is not valid JSON: {0}")]
    Decode(String),
}

#[cfg(feature = "native")]
impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        Self::Request(err.to_string())
    }
}

/// Status plus decoded JSON body of one HTTP exchange.
#[derive(Clone, Debug, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Value,
}

impl ApiResponse {
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Server-supplied `error` message, if the body carries a non-empty one.
    #[must_use]
    pub fn error_message(&self) -> Option<String> {
        self.body
            .get("error")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|msg| !msg.is_empty())
            .map(str::to_owned)
    }

    /// Deserialize the body into a typed response.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Decode`] if the body does not match `T`.
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> Result<T, TransportError> {
        serde_json::from_value(self.body.clone()).map_err(|e| TransportError::Decode(e.to_string()))
    }
}

/// Decode a response body that must be JSON, whatever the status.
///
/// # Errors
///
/// Returns [`TransportError::Decode`] for empty or non-JSON bodies.
pub fn decode_body(status: u16, text: &str) -> Result<ApiResponse, TransportError> {
    let body = serde_json::from_str(text).map_err(|e| TransportError::Decode(e.to_string()))?;
    Ok(ApiResponse { status, body })
}

/// Like [`decode_body`] but an empty body (e.g. `204`) decodes to `null`.
///
/// # Errors
///
/// Returns [`TransportError::Decode`] for non-empty, non-JSON bodies.
pub fn decode_optional_body(status: u16, text: &str) -> Result<ApiResponse, TransportError> {
    if text.trim().is_empty() {
        return Ok(ApiResponse { status, body: Value::Null });
    }
    decode_body(status, text)
}

/// Transport seam used by the sign-in form and header controllers.
///
/// Browser futures are not `Send`, so the hydrate build drops that bound.
#[cfg_attr(feature = "hydrate", async_trait::async_trait(?Send))]
#[cfg_attr(not(feature = "hydrate"), async_trait::async_trait)]
pub trait AuthApi: Send + Sync {
    /// POST a JSON body and decode the JSON reply regardless of status.
    async fn post_json(&self, path: &str, body: Value) -> Result<ApiResponse, TransportError>;

    /// POST without a body, returning only the status code.
    async fn post_empty(&self, path: &str) -> Result<u16, TransportError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    pub connect_secs: u64,
    pub request_secs: u64,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self { connect_secs: DEFAULT_CONNECT_TIMEOUT_SECS, request_secs: DEFAULT_REQUEST_TIMEOUT_SECS }
    }
}

#[cfg(feature = "native")]
fn normalize_base_url(raw: &str) -> Result<String, TransportError> {
    let trimmed = raw.trim().trim_end_matches('/');
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(TransportError::InvalidBaseUrl(raw.to_owned()));
    }
    Ok(trimmed.to_owned())
}

#[cfg(feature = "native")]
fn session_cookie_header(token: &str) -> String {
    format!("{SESSION_COOKIE_NAME}={token}")
}

/// reqwest-backed client for the attendance HTTP API.
#[cfg(feature = "native")]
#[derive(Clone)]
pub struct HttpApi {
    client: reqwest::Client,
    base_url: String,
}

#[cfg(feature = "native")]
impl HttpApi {
    /// Build a client for `base_url`, optionally presenting an existing session.
    ///
    /// # Errors
    ///
    /// Returns an error for a non-HTTP base URL or if the client cannot be built.
    pub fn new(base_url: &str, session_token: Option<&str>, timeouts: Timeouts) -> Result<Self, TransportError> {
        let base_url = normalize_base_url(base_url)?;

        let mut headers = HeaderMap::new();
        if let Some(token) = session_token.filter(|t| !t.is_empty()) {
            let value = HeaderValue::from_str(&session_cookie_header(token))
                .map_err(|e| TransportError::ClientBuild(e.to_string()))?;
            headers.insert(COOKIE, value);
        }

        let client = reqwest::Client::builder()
            .cookie_store(true)
            .default_headers(headers)
            .connect_timeout(Duration::from_secs(timeouts.connect_secs))
            .timeout(Duration::from_secs(timeouts.request_secs))
            .build()
            .map_err(|e| TransportError::ClientBuild(e.to_string()))?;

        Ok(Self { client, base_url })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn read(resp: reqwest::Response) -> Result<(u16, String), TransportError> {
        let status = resp.status().as_u16();
        let text = resp.text().await?;
        Ok((status, text))
    }

    /// `GET` a JSON resource.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-JSON body.
    pub async fn get_json(&self, path: &str) -> Result<ApiResponse, TransportError> {
        let resp = self.client.get(self.url(path)).send().await?;
        let (status, text) = Self::read(resp).await?;
        decode_optional_body(status, &text)
    }

    /// `PUT` a JSON body.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-JSON body.
    pub async fn put_json(&self, path: &str, body: Value) -> Result<ApiResponse, TransportError> {
        let resp = self.client.put(self.url(path)).json(&body).send().await?;
        let (status, text) = Self::read(resp).await?;
        decode_optional_body(status, &text)
    }

    /// `POST` a JSON body to a non-auth endpoint (empty replies allowed).
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-JSON body.
    pub async fn post_resource(&self, path: &str, body: Value) -> Result<ApiResponse, TransportError> {
        let resp = self.client.post(self.url(path)).json(&body).send().await?;
        let (status, text) = Self::read(resp).await?;
        decode_optional_body(status, &text)
    }

    /// `DELETE` a resource.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-JSON body.
    pub async fn delete(&self, path: &str) -> Result<ApiResponse, TransportError> {
        let resp = self.client.delete(self.url(path)).send().await?;
        let (status, text) = Self::read(resp).await?;
        decode_optional_body(status, &text)
    }
}

#[cfg(feature = "native")]
#[cfg_attr(feature = "hydrate", async_trait::async_trait(?Send))]
#[cfg_attr(not(feature = "hydrate"), async_trait::async_trait)]
impl AuthApi for HttpApi {
    async fn post_json(&self, path: &str, body: Value) -> Result<ApiResponse, TransportError> {
        let resp = self.client.post(self.url(path)).json(&body).send().await?;
        let (status, text) = Self::read(resp).await?;
        decode_body(status, &text)
    }

    async fn post_empty(&self, path: &str) -> Result<u16, TransportError> {
        let resp = self.client.post(self.url(path)).send().await?;
        Ok(resp.status().as_u16())
    }
}
