//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render the root shell's two containers. They read the
//! per-request `ShellContext` and the shared `ToastQueue` from Leptos
//! context, and hand every network action to the controllers in `state`.

pub mod app_header;
pub mod auth_card;
pub mod dashboard_panel;
pub mod sidebar;
pub mod toaster;
