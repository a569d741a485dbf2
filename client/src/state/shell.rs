//! Per-request shell state resolved by the server.
//!
//! SYSTEM CONTEXT
//! ==============
//! The server resolves the session once per page load and hands the result
//! to the root component as a [`ShellContext`]. The same value is embedded in
//! the document as JSON so hydration renders from identical inputs.

#[cfg(test)]
#[path = "shell_test.rs"]
mod shell_test;

use serde::{Deserialize, Serialize};

use crate::net::types::{AttendanceRecord, DailySummary, Role, User};
use crate::util::theme::Theme;

/// DOM id of the embedded JSON copy of the context.
pub const SHELL_CONTEXT_ELEMENT_ID: &str = "shell-context";

pub const DEFAULT_APP_TITLE: &str = "BAPS Attendance";

/// Sidebar links: (label, href).
pub const NAV_ITEMS: [(&str, &str); 2] = [("Dashboard", "#summary"), ("Today's Records", "#records")];

/// Data loaded for the dashboard.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardData {
    pub summary: DailySummary,
    pub records: Vec<AttendanceRecord>,
}

/// What the signed-in view needs besides the user.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedIn {
    pub user: User,
    /// `YYYY-MM-DD` the dashboard shows.
    pub today: String,
    pub date_line: String,
    pub time_line: String,
    /// `None` when loading failed; the page shows a notice instead.
    pub dashboard: Option<DashboardData>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ShellSession {
    Authenticated(Box<SignedIn>),
    #[default]
    Unauthenticated,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShellContext {
    pub app_title: String,
    pub theme: Theme,
    pub min_password_len: usize,
    pub session: ShellSession,
}

impl Default for ShellContext {
    fn default() -> Self {
        Self {
            app_title: DEFAULT_APP_TITLE.to_owned(),
            theme: Theme::System,
            min_password_len: 8,
            session: ShellSession::Unauthenticated,
        }
    }
}

impl ShellContext {
    #[must_use]
    pub fn signed_in(&self) -> Option<&SignedIn> {
        match &self.session {
            ShellSession::Authenticated(signed_in) => Some(signed_in),
            ShellSession::Unauthenticated => None,
        }
    }

    #[must_use]
    pub fn role(&self) -> Option<Role> {
        self.signed_in().map(|s| s.user.role)
    }

    /// JSON for the embedded `<script type="application/json">` element.
    ///
    /// `<` is escaped so no user text can close the element early.
    #[must_use]
    pub fn to_embedded_json(&self) -> String {
        serde_json::to_string(self)
            .unwrap_or_else(|_| "null".to_owned())
            .replace('<', "\\u003c")
    }

    /// Parse the embedded copy; anything unreadable falls back to the
    /// logged-out shell.
    #[must_use]
    pub fn from_embedded_json(raw: &str) -> Self {
        serde_json::from_str(raw).unwrap_or_default()
    }
}
