//! Server configuration parsed from environment variables.
//!
//! `from_env` reads the process environment (after `.env` is loaded by
//! `main`); `from_lookup` takes any key lookup so tests stay free of global
//! env mutation.

use std::time::Duration;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_DB_MAX_CONNECTIONS: u32 = 5;
pub const DEFAULT_SESSION_TTL_HOURS: u32 = 168;
pub const DEFAULT_MIN_PASSWORD_LEN: usize = 8;
pub const DEFAULT_LOGIN_RATE_LIMIT: usize = 10;
pub const DEFAULT_LOGIN_RATE_WINDOW_SECS: u64 = 300;
pub const DEFAULT_APP_TITLE: &str = "BAPS Attendance";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required env var {0}")]
    Missing(&'static str),
    #[error("invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub database_url: String,
    pub port: u16,
    pub db_max_connections: u32,
    pub cookie_secure: bool,
    pub session_ttl_hours: u32,
    pub min_password_len: usize,
    pub login_rate_limit: usize,
    pub login_rate_window: Duration,
    pub app_title: String,
}

impl AppConfig {
    /// Build typed config from the process environment.
    ///
    /// Required:
    /// - `DATABASE_URL`
    ///
    /// Optional:
    /// - `PORT` (3000), `DB_MAX_CONNECTIONS` (5)
    /// - `COOKIE_SECURE` (false; `1/true/yes/on` or `0/false/no/off`)
    /// - `SESSION_TTL_HOURS` (168), `MIN_PASSWORD_LEN` (8)
    /// - `LOGIN_RATE_LIMIT` (10), `LOGIN_RATE_WINDOW_SECS` (300)
    /// - `APP_TITLE` ("BAPS Attendance")
    ///
    /// # Errors
    ///
    /// Returns an error if `DATABASE_URL` is missing, a value does not parse,
    /// or a login rate limit setting is zero.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build typed config from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Same as [`AppConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL")
            .filter(|v| !v.trim().is_empty())
            .ok_or(ConfigError::Missing("DATABASE_URL"))?;

        let cookie_secure = match lookup("COOKIE_SECURE") {
            Some(raw) => parse_bool(&raw).ok_or(ConfigError::Invalid { key: "COOKIE_SECURE", value: raw })?,
            None => false,
        };

        let window_secs: u64 = parse_positive_or(&lookup, "LOGIN_RATE_WINDOW_SECS", DEFAULT_LOGIN_RATE_WINDOW_SECS)?;

        Ok(Self {
            database_url,
            port: parse_or(&lookup, "PORT", DEFAULT_PORT)?,
            db_max_connections: parse_or(&lookup, "DB_MAX_CONNECTIONS", DEFAULT_DB_MAX_CONNECTIONS)?,
            cookie_secure,
            session_ttl_hours: parse_or(&lookup, "SESSION_TTL_HOURS", DEFAULT_SESSION_TTL_HOURS)?,
            min_password_len: parse_or(&lookup, "MIN_PASSWORD_LEN", DEFAULT_MIN_PASSWORD_LEN)?,
            login_rate_limit: parse_positive_or(&lookup, "LOGIN_RATE_LIMIT", DEFAULT_LOGIN_RATE_LIMIT)?,
            login_rate_window: Duration::from_secs(window_secs),
            app_title: lookup("APP_TITLE").unwrap_or_else(|| DEFAULT_APP_TITLE.to_owned()),
        })
    }
}

pub(crate) fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|_| ConfigError::Invalid { key, value: raw }),
        None => Ok(default),
    }
}

/// Like `parse_or`, but zero is rejected.
fn parse_positive_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr + Default + PartialEq + std::fmt::Display,
{
    let value = parse_or(lookup, key, default)?;
    if value == T::default() {
        return Err(ConfigError::Invalid { key, value: value.to_string() });
    }
    Ok(value)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
