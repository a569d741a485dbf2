//! Route navigation seam.

/// Landing route: the root shell decides what it shows from the session.
pub const HOME_ROUTE: &str = "/";

/// Moves the user between routes and re-fetches server-rendered data.
pub trait Navigator: Send + Sync {
    fn push(&self, path: &str);

    /// Re-render the current route with fresh server data (new session state).
    fn refresh(&self);
}
