//! In-memory rate limiting for failed logins.
//!
//! DESIGN
//! ======
//! Sliding-window counters backed by `HashMap<String, VecDeque<Instant>>`,
//! keyed by normalized email. Only failed attempts are recorded; a successful
//! login clears the key so a user who finally gets it right starts fresh.
//! Keys that are never checked again are dropped by [`LoginLimiter::sweep`],
//! which the session purge task runs on its interval.
//!
//! TRADE-OFFS
//! ==========
//! State is per-process and lost on restart. That is acceptable for a single
//! server instance; a shared store would be needed behind a load balancer.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};

// =============================================================================
// ERROR TYPE
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RateLimitError {
    #[error("Too many login attempts, try again later")]
    TooManyAttempts { limit: usize, window_secs: u64 },
}

// =============================================================================
// LOGIN LIMITER
// =============================================================================

#[derive(Clone)]
pub struct LoginLimiter {
    failures: Arc<Mutex<HashMap<String, VecDeque<Instant>>>>,
    limit: usize,
    window: Duration,
}

impl LoginLimiter {
    #[must_use]
    pub fn new(limit: usize, window: Duration) -> Self {
        Self { failures: Arc::new(Mutex::new(HashMap::new())), limit, window }
    }

    /// Reject when the key already has `limit` failures inside the window.
    ///
    /// # Errors
    ///
    /// Returns [`RateLimitError::TooManyAttempts`] while the key is locked out.
    pub fn check(&self, key: &str) -> Result<(), RateLimitError> {
        self.check_at(key, Instant::now())
    }

    fn check_at(&self, key: &str, now: Instant) -> Result<(), RateLimitError> {
        let mut failures = self.failures.lock().unwrap_or_else(PoisonError::into_inner);
        let Some(deque) = failures.get_mut(key) else {
            return Ok(());
        };
        prune_window(deque, now, self.window);
        if deque.is_empty() {
            failures.remove(key);
            return Ok(());
        }
        if deque.len() >= self.limit {
            return Err(RateLimitError::TooManyAttempts { limit: self.limit, window_secs: self.window.as_secs() });
        }
        Ok(())
    }

    pub fn record_failure(&self, key: &str) {
        self.record_failure_at(key, Instant::now());
    }

    fn record_failure_at(&self, key: &str, now: Instant) {
        let mut failures = self.failures.lock().unwrap_or_else(PoisonError::into_inner);
        let deque = failures.entry(key.to_owned()).or_default();
        prune_window(deque, now, self.window);
        deque.push_back(now);
    }

    pub fn clear(&self, key: &str) {
        self.failures
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
    }

    /// Drop every key whose failures have all aged out. Returns how many
    /// keys were removed.
    pub fn sweep(&self) -> usize {
        self.sweep_at(Instant::now())
    }

    fn sweep_at(&self, now: Instant) -> usize {
        let mut failures = self.failures.lock().unwrap_or_else(PoisonError::into_inner);
        let before = failures.len();
        failures.retain(|_, deque| {
            prune_window(deque, now, self.window);
            !deque.is_empty()
        });
        before - failures.len()
    }

    #[cfg(test)]
    fn tracked_keys(&self) -> usize {
        self.failures.lock().unwrap_or_else(PoisonError::into_inner).len()
    }
}

// =============================================================================
// HELPERS
// =============================================================================

fn prune_window(deque: &mut VecDeque<Instant>, now: Instant, window: Duration) {
    while let Some(&front) = deque.front() {
        if now.duration_since(front) > window {
            deque.pop_front();
        } else {
            break;
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
#[path = "rate_limit_test.rs"]
mod tests;
