//! Browser transport and navigation for the hydrated page.
//!
//! SYSTEM CONTEXT
//! ==============
//! Requests go to the page's own origin, so the browser attaches the
//! `session_token` cookie and applies any `Set-Cookie` it receives. Nothing
//! here keeps auth state of its own.

use serde_json::Value;

use super::api::{ApiResponse, AuthApi, TransportError, decode_body};
use crate::state::navigation::Navigator;

/// `gloo-net` implementation of [`AuthApi`].
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserApi;

impl From<gloo_net::Error> for TransportError {
    fn from(err: gloo_net::Error) -> Self {
        Self::Request(err.to_string())
    }
}

#[async_trait::async_trait(?Send)]
impl AuthApi for BrowserApi {
    async fn post_json(&self, path: &str, body: Value) -> Result<ApiResponse, TransportError> {
        let resp = gloo_net::http::Request::post(path).json(&body)?.send().await?;
        let status = resp.status();
        let text = resp.text().await?;
        decode_body(status, &text)
    }

    async fn post_empty(&self, path: &str) -> Result<u16, TransportError> {
        let resp = gloo_net::http::Request::post(path).send().await?;
        Ok(resp.status())
    }
}

/// POST the theme preference; the server answers with the cookie.
pub async fn save_theme(theme: &str) -> Result<u16, TransportError> {
    let body = serde_json::json!({ "theme": theme });
    let resp = gloo_net::http::Request::post("/api/theme").json(&body)?.send().await?;
    Ok(resp.status())
}

/// Full-document navigation: every push reloads from the server, so the
/// shell is re-resolved against the current session cookie.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserNavigator;

impl Navigator for BrowserNavigator {
    fn push(&self, path: &str) {
        if let Some(window) = web_sys::window() {
            let _ = window.location().set_href(path);
        }
    }

    fn refresh(&self) {
        // `push` already triggered a document load.
    }
}
