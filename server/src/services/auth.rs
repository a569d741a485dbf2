//! Password account service: signup validation, Argon2 hashing, login.

use argon2::Argon2;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use attendance_client::net::types::Role;
use rand::Rng;
use sqlx::{PgPool, Row};

use super::session::SessionUser;

const SALT_LEN: usize = 16;

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Name is required")]
    MissingName,
    #[error("Please enter a valid email address")]
    InvalidEmail,
    #[error("Password must be at least {0} characters")]
    WeakPassword(usize),
    #[error("Unknown role: {0}")]
    InvalidRole(String),
    #[error("An account with this email already exists")]
    EmailTaken,
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("password hashing failed: {0}")]
    Hash(String),
    #[error("database error: {0}")]
    Db(#[from] sqlx::Error),
}

/// Validated signup input, ready to persist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAccount {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

#[must_use]
pub fn normalize_email(email: &str) -> Option<String> {
    let normalized = email.trim().to_ascii_lowercase();
    let (local, domain) = normalized.split_once('@')?;
    if local.is_empty() || domain.is_empty() || domain.contains('@') || normalized.contains(char::is_whitespace) {
        return None;
    }
    Some(normalized)
}

/// Validate raw signup fields. A missing role means `teacher`.
///
/// # Errors
///
/// Returns the first failing rule as an [`AuthError`].
pub fn validate_signup(
    name: &str,
    email: &str,
    password: &str,
    role: Option<&str>,
    min_password_len: usize,
) -> Result<NewAccount, AuthError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AuthError::MissingName);
    }
    let email = normalize_email(email).ok_or(AuthError::InvalidEmail)?;
    if password.chars().count() < min_password_len {
        return Err(AuthError::WeakPassword(min_password_len));
    }
    let role = match role {
        Some(raw) => Role::parse(raw).ok_or_else(|| AuthError::InvalidRole(raw.to_owned()))?,
        None => Role::default(),
    };
    Ok(NewAccount { name: name.to_owned(), email, password: password.to_owned(), role })
}

/// Hash a password into a PHC string with a fresh random salt.
///
/// # Errors
///
/// Returns [`AuthError::Hash`] if Argon2 rejects the input.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt_bytes: [u8; SALT_LEN] = rand::rng().random();
    let salt = SaltString::encode_b64(&salt_bytes).map_err(|e| AuthError::Hash(e.to_string()))?;
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AuthError::Hash(e.to_string()))?;
    Ok(hash.to_string())
}

/// Check a password against a stored PHC string. Malformed hashes never match.
#[must_use]
pub fn verify_password(password: &str, stored_hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(stored_hash) else {
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_unique_violation())
}

/// Insert a new user account.
///
/// # Errors
///
/// Returns [`AuthError::EmailTaken`] if the email is already registered.
pub async fn create_user(pool: &PgPool, account: &NewAccount) -> Result<SessionUser, AuthError> {
    let password_hash = hash_password(&account.password)?;
    let row = sqlx::query(
        r"INSERT INTO users (name, email, password_hash, role)
          VALUES ($1, $2, $3, $4)
          RETURNING id",
    )
    .bind(&account.name)
    .bind(&account.email)
    .bind(password_hash)
    .bind(account.role.as_str())
    .fetch_one(pool)
    .await
    .map_err(|e| if is_unique_violation(&e) { AuthError::EmailTaken } else { AuthError::Db(e) })?;

    Ok(SessionUser { id: row.get("id"), name: account.name.clone(), email: account.email.clone(), role: account.role })
}

/// Verify email + password, returning the user on success.
///
/// # Errors
///
/// Returns [`AuthError::InvalidCredentials`] for an unknown email or a wrong
/// password, without distinguishing the two.
pub async fn authenticate(pool: &PgPool, email: &str, password: &str) -> Result<SessionUser, AuthError> {
    let email = normalize_email(email).ok_or(AuthError::InvalidCredentials)?;
    let row = sqlx::query("SELECT id, name, email, role, password_hash FROM users WHERE email = $1")
        .bind(&email)
        .fetch_optional(pool)
        .await?
        .ok_or(AuthError::InvalidCredentials)?;

    let stored_hash: String = row.get("password_hash");
    if !verify_password(password, &stored_hash) {
        return Err(AuthError::InvalidCredentials);
    }

    let role: String = row.get("role");
    Ok(SessionUser {
        id: row.get("id"),
        name: row.get("name"),
        email: row.get("email"),
        role: Role::parse(&role).unwrap_or_default(),
    })
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
