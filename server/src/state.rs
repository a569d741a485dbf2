//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor.
//! It holds the database pool, the parsed config, and the in-memory
//! failed-login limiter. Everything inside is cheap to clone.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::AppConfig;
use crate::rate_limit::LoginLimiter;

// =============================================================================
// APP STATE
// =============================================================================

/// Shared application state. Clone is required by Axum.
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<AppConfig>,
    /// Failed-login counters keyed by normalized email.
    pub login_limiter: LoginLimiter,
}

impl AppState {
    #[must_use]
    pub fn new(pool: PgPool, config: AppConfig) -> Self {
        let login_limiter = LoginLimiter::new(config.login_rate_limit, config.login_rate_window);
        Self { pool, config: Arc::new(config), login_limiter }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================

#[cfg(test)]
#[path = "state_helpers_test.rs"]
pub mod test_helpers;

#[cfg(test)]
#[path = "state_test.rs"]
mod tests;
