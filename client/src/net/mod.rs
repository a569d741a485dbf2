//! Networking modules for the JSON HTTP API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` owns the transport seam and its reqwest implementation, `browser`
//! the hydrate-side implementation, and `types` defines the shared wire
//! schema.

pub mod api;
#[cfg(feature = "hydrate")]
pub mod browser;
pub mod types;
