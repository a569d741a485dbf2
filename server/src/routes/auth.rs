//! Auth routes: password login/signup, session cookie, logout.

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRef, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use attendance_client::net::api::SESSION_COOKIE_NAME;
use attendance_client::net::types::{AuthResponse, LoginCredentials, User};
use serde::Deserialize;
use serde_json::json;
use time::Duration;

use super::error::ApiError;
use crate::services::{auth as auth_svc, session};
use crate::state::AppState;

// =============================================================================
// COOKIES
// =============================================================================

pub(crate) fn session_cookie(token: String, secure: bool, ttl_hours: u32) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE_NAME, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .max_age(Duration::hours(i64::from(ttl_hours)))
        .build()
}

pub(crate) fn clear_session_cookie(secure: bool) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE_NAME, ""))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .max_age(Duration::ZERO)
        .build()
}

/// Session token from the request cookies, if non-empty.
pub(crate) fn session_token(jar: &CookieJar) -> Option<&str> {
    jar.get(SESSION_COOKIE_NAME)
        .map(Cookie::value)
        .filter(|t| !t.is_empty())
}

/// Unwrap a JSON body, turning extractor rejections into `{error}` responses.
pub(crate) fn json_body<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    body.map(|Json(value)| value)
        .map_err(|rejection| ApiError::new(rejection.status(), rejection.body_text()))
}

// =============================================================================
// AUTH EXTRACTOR
// =============================================================================

/// Authenticated user extracted from the session cookie.
/// Use as a handler parameter to require authentication.
pub struct AuthUser {
    pub user: session::SessionUser,
    pub token: String,
}

impl AuthUser {
    /// # Errors
    ///
    /// Returns 403 unless the user is an admin.
    pub fn require_admin(&self) -> Result<(), ApiError> {
        if self.user.is_admin() { Ok(()) } else { Err(ApiError::forbidden()) }
    }
}

impl<S> axum::extract::FromRequestParts<S> for AuthUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut axum::http::request::Parts, state: &S) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let token = session_token(&jar).ok_or_else(ApiError::unauthorized)?;

        let app_state = AppState::from_ref(state);
        let user = session::validate_session(&app_state.pool, token)
            .await?
            .ok_or_else(ApiError::unauthorized)?;

        Ok(Self { user, token: token.to_owned() })
    }
}

// =============================================================================
// HANDLERS
// =============================================================================

/// `POST /api/auth/login` — verify credentials, start a session.
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    body: Result<Json<LoginCredentials>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let credentials = json_body(body)?;
    let limiter_key = auth_svc::normalize_email(&credentials.email)
        .unwrap_or_else(|| credentials.email.trim().to_ascii_lowercase());

    if let Err(e) = state.login_limiter.check(&limiter_key) {
        tracing::warn!(email = %limiter_key, "login rate limited");
        return Err(e.into());
    }

    let user = match auth_svc::authenticate(&state.pool, &credentials.email, &credentials.password).await {
        Ok(user) => user,
        Err(auth_svc::AuthError::InvalidCredentials) => {
            state.login_limiter.record_failure(&limiter_key);
            tracing::info!(email = %limiter_key, "login failed");
            return Err(auth_svc::AuthError::InvalidCredentials.into());
        }
        Err(e) => return Err(e.into()),
    };
    state.login_limiter.clear(&limiter_key);

    let token = session::create_session(&state.pool, user.id, state.config.session_ttl_hours).await?;
    tracing::info!(user_id = %user.id, role = user.role.as_str(), "login succeeded");

    let jar = jar.add(session_cookie(token, state.config.cookie_secure, state.config.session_ttl_hours));
    Ok((jar, Json(AuthResponse { user: user.to_wire() })))
}

#[derive(Deserialize)]
pub struct SignupBody {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub role: Option<String>,
}

/// `POST /api/auth/signup` — create an account. Does not log the user in.
pub async fn signup(
    State(state): State<AppState>,
    body: Result<Json<SignupBody>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let body = json_body(body)?;
    let account = auth_svc::validate_signup(
        &body.name,
        &body.email,
        &body.password,
        body.role.as_deref(),
        state.config.min_password_len,
    )?;
    let user = auth_svc::create_user(&state.pool, &account).await?;
    tracing::info!(user_id = %user.id, role = user.role.as_str(), "account created");
    Ok((StatusCode::CREATED, Json(AuthResponse { user: user.to_wire() })))
}

/// `POST /api/auth/logout` — delete session if any, always clear the cookie.
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> impl IntoResponse {
    if let Some(token) = session_token(&jar) {
        if let Err(e) = session::delete_session(&state.pool, token).await {
            tracing::warn!(error = %e, "session delete failed during logout");
        }
    }
    let jar = jar.add(clear_session_cookie(state.config.cookie_secure));
    (jar, StatusCode::NO_CONTENT)
}

/// `GET /api/auth/me` — return current user.
pub async fn me(auth: AuthUser) -> Json<User> {
    Json(auth.user.to_wire())
}

/// `GET /api/auth/session-token` — expose the cookie token for CLI bootstrap.
pub async fn session_token_handler(auth: AuthUser) -> Json<serde_json::Value> {
    Json(json!({ "token": auth.token }))
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
