//! Utility helpers shared by the controllers and the server-side renderer.

pub mod clock;
pub mod theme;
