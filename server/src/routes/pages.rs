//! Root shell plumbing and the theme preference endpoint.
//!
//! SYSTEM CONTEXT
//! ==============
//! `attach_shell_context` runs in front of the Leptos routes. It resolves the
//! session once, loads the dashboard for signed-in users, and leaves the
//! resulting `ShellContext` in the request extensions. The Leptos app function
//! picks it up through [`request_shell_context`], so rendering never touches
//! the database.
//!
//! ERROR HANDLING
//! ==============
//! Session lookup fails open to the logged-out shell. A dashboard load
//! failure keeps the signed-in shell and shows a notice in place of the data.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::http::request::Parts;
use axum::middleware::Next;
use axum::response::{IntoResponse, Json, Response};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use attendance_client::state::shell::{DashboardData, ShellContext, ShellSession, SignedIn};
use attendance_client::util::clock::{self, format_iso_date};
use attendance_client::util::theme::{THEME_COOKIE_NAME, Theme};
use leptos::prelude::use_context;
use serde::Deserialize;
use sqlx::PgPool;
use time::{Date, Duration};

use super::auth::{json_body, session_token};
use super::error::ApiError;
use crate::services::attendance::{self as attendance_svc, AttendanceError};
use crate::services::session::{self, SessionState};
use crate::state::AppState;

const THEME_COOKIE_MAX_AGE_DAYS: i64 = 365;

pub(crate) fn theme_from_jar(jar: &CookieJar) -> Theme {
    Theme::from_cookie(jar.get(THEME_COOKIE_NAME).map(Cookie::value))
}

pub(crate) fn theme_cookie(theme: Theme) -> Cookie<'static> {
    Cookie::build((THEME_COOKIE_NAME, theme.as_str()))
        .path("/")
        .same_site(SameSite::Lax)
        .max_age(Duration::days(THEME_COOKIE_MAX_AGE_DAYS))
        .build()
}

async fn load_dashboard(pool: &PgPool, date: Date) -> Result<DashboardData, AttendanceError> {
    let summary = attendance_svc::daily_summary(pool, date).await?;
    let records = attendance_svc::list_records(pool, date).await?;
    Ok(DashboardData { summary, records })
}

/// Resolve everything the root shell needs for this request.
pub(crate) async fn shell_context(state: &AppState, jar: &CookieJar) -> ShellContext {
    let session = match session::resolve_session(&state.pool, session_token(jar)).await {
        SessionState::Authenticated(user) => {
            let now = clock::now();
            let today = now.date();
            let dashboard = match load_dashboard(&state.pool, today).await {
                Ok(data) => Some(data),
                Err(e) => {
                    tracing::error!(error = %e, "dashboard load failed");
                    None
                }
            };
            ShellSession::Authenticated(Box::new(SignedIn {
                user: user.to_wire(),
                today: format_iso_date(today),
                date_line: clock::date_line(now),
                time_line: clock::time_line(now),
                dashboard,
            }))
        }
        SessionState::Unauthenticated => ShellSession::Unauthenticated,
    };

    ShellContext {
        app_title: state.config.app_title.clone(),
        theme: theme_from_jar(jar),
        min_password_len: state.config.min_password_len,
        session,
    }
}

/// Middleware for the page routes: attach the request's [`ShellContext`].
pub async fn attach_shell_context(
    State(state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    let context = shell_context(&state, &jar).await;
    request.extensions_mut().insert(context);
    next.run(request).await
}

/// Inside a Leptos render: the context attached by [`attach_shell_context`],
/// or the logged-out shell when there is none.
pub fn request_shell_context() -> ShellContext {
    use_context::<Parts>()
        .and_then(|parts| parts.extensions.get::<ShellContext>().cloned())
        .unwrap_or_default()
}

#[derive(Deserialize)]
pub struct ThemeBody {
    pub theme: String,
}

/// `POST /api/theme` — persist the theme preference in a cookie.
pub async fn set_theme(
    jar: CookieJar,
    body: Result<Json<ThemeBody>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let body = json_body(body)?;
    let theme = Theme::parse(&body.theme).ok_or_else(|| ApiError::bad_request(format!("Unknown theme: {}", body.theme)))?;
    Ok((jar.add(theme_cookie(theme)), StatusCode::NO_CONTENT))
}

#[cfg(test)]
#[path = "pages_test.rs"]
mod tests;
