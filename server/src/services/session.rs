//! Session tokens and the per-request session resolver.
//!
//! ARCHITECTURE
//! ============
//! Login mints a random token stored in `sessions` and handed to the browser
//! as an `HttpOnly` cookie. Every page render resolves that cookie exactly
//! once into a [`SessionState`] that is passed down to the page shell.
//!
//! ERROR HANDLING
//! ==============
//! Resolution fails open: a lookup error is logged and treated as "no
//! session", so a database hiccup shows the sign-in page instead of an error
//! page. API routes use the strict [`validate_session`] instead.

use std::fmt::{Display, Write};
use std::time::Duration;

use attendance_client::net::types::{Role, User};
use rand::Rng;
use sqlx::{PgPool, Row};
use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::rate_limit::LoginLimiter;

pub const SESSION_PURGE_INTERVAL: Duration = Duration::from_secs(3600);

pub(crate) fn bytes_to_hex(bytes: &[u8]) -> String {
    let mut s = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        let _ = write!(s, "{b:02x}");
    }
    s
}

/// Generate a cryptographically random 32-byte hex token.
#[must_use]
pub fn generate_token() -> String {
    let bytes: [u8; 32] = rand::rng().random();
    bytes_to_hex(&bytes)
}

/// User row returned from session validation.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct SessionUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: Role,
}

impl SessionUser {
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Wire representation shared with the client crate.
    #[must_use]
    pub fn to_wire(&self) -> User {
        User { id: self.id.to_string(), name: self.name.clone(), email: self.email.clone(), role: self.role }
    }
}

/// Session presence for one render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Authenticated(SessionUser),
    Unauthenticated,
}

impl SessionState {
    /// Collapse a lookup result: found ⇒ authenticated, missing or failed ⇒ not.
    pub fn from_lookup<E: Display>(result: Result<Option<SessionUser>, E>) -> Self {
        match result {
            Ok(Some(user)) => Self::Authenticated(user),
            Ok(None) => Self::Unauthenticated,
            Err(e) => {
                tracing::error!(error = %e, "session lookup failed; rendering signed-out shell");
                Self::Unauthenticated
            }
        }
    }

    #[must_use]
    pub fn user(&self) -> Option<&SessionUser> {
        match self {
            Self::Authenticated(user) => Some(user),
            Self::Unauthenticated => None,
        }
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }
}

/// Resolve the session cookie for a page render. Never fails.
pub async fn resolve_session(pool: &PgPool, token: Option<&str>) -> SessionState {
    let Some(token) = token.filter(|t| !t.is_empty()) else {
        return SessionState::Unauthenticated;
    };
    SessionState::from_lookup(validate_session(pool, token).await)
}

/// Create a session for the given user, returning the token.
pub async fn create_session(pool: &PgPool, user_id: Uuid, ttl_hours: u32) -> Result<String, sqlx::Error> {
    let token = generate_token();
    sqlx::query(
        "INSERT INTO sessions (token, user_id, expires_at)
         VALUES ($1, $2, now() + make_interval(hours => $3))",
    )
    .bind(&token)
    .bind(user_id)
    .bind(i32::try_from(ttl_hours).unwrap_or(i32::MAX))
    .execute(pool)
    .await?;
    Ok(token)
}

/// Validate a session token and return the associated user.
pub async fn validate_session(pool: &PgPool, token: &str) -> Result<Option<SessionUser>, sqlx::Error> {
    let row = sqlx::query(
        r"SELECT u.id, u.name, u.email, u.role
          FROM sessions s
          JOIN users u ON u.id = s.user_id
          WHERE s.token = $1 AND s.expires_at > now()",
    )
    .bind(token)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|r| {
        let role: String = r.get("role");
        SessionUser {
            id: r.get("id"),
            name: r.get("name"),
            email: r.get("email"),
            role: Role::parse(&role).unwrap_or_default(),
        }
    }))
}

/// Delete a session by token.
pub async fn delete_session(pool: &PgPool, token: &str) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM sessions WHERE token = $1")
        .bind(token)
        .execute(pool)
        .await?;
    Ok(())
}

/// Drop expired sessions, returning how many were removed.
pub async fn purge_expired_sessions(pool: &PgPool) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM sessions WHERE expires_at <= now()")
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

/// Periodically purge expired sessions and stale login-limiter keys until
/// the runtime shuts down.
pub fn spawn_session_purge_task(pool: PgPool, limiter: LoginLimiter, every: Duration) -> JoinHandle<()> {
    tracing::info!(interval_secs = every.as_secs(), "session purge configured");
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        loop {
            ticker.tick().await;
            match purge_expired_sessions(&pool).await {
                Ok(0) => {}
                Ok(removed) => tracing::info!(removed, "purged expired sessions"),
                Err(e) => tracing::warn!(error = %e, "session purge failed"),
            }
            let swept = limiter.sweep();
            if swept > 0 {
                tracing::debug!(swept, "dropped idle login limiter keys");
            }
        }
    })
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
