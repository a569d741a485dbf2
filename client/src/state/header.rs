//! Dashboard header: date/time lines, avatar initials, logout.
//!
//! The date and time are computed once per render from the wall clock;
//! nothing ticks. Logout is fire-and-forget: the user is sent home whatever
//! the server said, and failures only reach the log.

#[cfg(test)]
#[path = "header_test.rs"]
mod header_test;

use std::sync::Arc;

use time::OffsetDateTime;

use super::navigation::{HOME_ROUTE, Navigator};
use crate::net::api::{AuthApi, LOGOUT_ENDPOINT};
use crate::util::clock;

pub const SEARCH_PLACEHOLDER: &str = "Search anything...";

/// Render-ready header content.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HeaderView {
    /// e.g. `Saturday, October 17, 2026`.
    pub date_line: String,
    /// e.g. `02:05 PM`.
    pub time_line: String,
    pub user_name: String,
    pub initials: String,
    pub search_placeholder: &'static str,
    /// Static indicator; there is no notification feed behind it.
    pub has_notifications: bool,
}

impl HeaderView {
    #[must_use]
    pub fn new(user_name: &str, now: OffsetDateTime) -> Self {
        Self::from_lines(user_name, clock::date_line(now), clock::time_line(now))
    }

    /// Build from date and time lines already formatted by the server.
    #[must_use]
    pub fn from_lines(user_name: &str, date_line: String, time_line: String) -> Self {
        Self {
            date_line,
            time_line,
            user_name: user_name.to_owned(),
            initials: initials(user_name),
            search_placeholder: SEARCH_PLACEHOLDER,
            has_notifications: true,
        }
    }
}

/// Up to two uppercase initials from a display name, `?` when empty.
#[must_use]
pub fn initials(name: &str) -> String {
    let letters: String = name
        .split_whitespace()
        .filter_map(|word| word.chars().next())
        .take(2)
        .flat_map(char::to_uppercase)
        .collect();
    if letters.is_empty() { "?".to_owned() } else { letters }
}

/// What the logout call reported. Navigation happens in every case.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogoutOutcome {
    Confirmed,
    ServerRejected(u16),
    Unreachable,
}

pub struct HeaderController {
    api: Arc<dyn AuthApi>,
    navigator: Arc<dyn Navigator>,
}

impl HeaderController {
    #[must_use]
    pub fn new(api: Arc<dyn AuthApi>, navigator: Arc<dyn Navigator>) -> Self {
        Self { api, navigator }
    }

    /// POST the logout endpoint, then go home and refresh regardless.
    pub async fn logout(&self) -> LogoutOutcome {
        let outcome = match self.api.post_empty(LOGOUT_ENDPOINT).await {
            Ok(status) if (200..300).contains(&status) => LogoutOutcome::Confirmed,
            Ok(status) => {
                tracing::warn!(status, "logout rejected by server");
                LogoutOutcome::ServerRejected(status)
            }
            Err(e) => {
                tracing::warn!(error = %e, "logout request failed");
                LogoutOutcome::Unreachable
            }
        };
        self.navigator.push(HOME_ROUTE);
        self.navigator.refresh();
        outcome
    }
}
