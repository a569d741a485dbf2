//! Domain services used by HTTP routes and page rendering.
//!
//! ARCHITECTURE
//! ============
//! Service modules own business logic and persistence concerns so route
//! handlers can stay focused on protocol translation and auth plumbing.

pub mod attendance;
pub mod auth;
pub mod session;
