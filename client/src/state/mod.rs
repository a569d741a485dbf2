//! Client-side controllers and their UI seams.
//!
//! SYSTEM CONTEXT
//! ==============
//! `auth_form` and `header` each own their local state and talk to the
//! server independently. `toast` and `navigation` are the traits through
//! which they surface feedback and move the user between routes. `shell` is
//! the per-request context the server resolves for the root page.

pub mod auth_form;
pub mod header;
pub mod navigation;
pub mod shell;
pub mod toast;

// =============================================================================
// TEST HELPERS
// =============================================================================
