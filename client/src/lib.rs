//! Attendance client library.
//!
//! SYSTEM CONTEXT
//! ==============
//! Shared wire types, the controllers that drive the sign-in form and the
//! dashboard header, and the Leptos components that render the root shell.
//! The server renders [`app::shell`] with the `ssr` feature; the browser
//! hydrates it through [`hydrate`]; the CLI drives the same controllers over
//! the native transport.

pub mod app;
pub mod components;
pub mod net;
pub mod state;
pub mod util;

/// WASM entry point: rebuild the server's shell context and hydrate.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    use leptos::prelude::*;

    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    let context = app::embedded_shell_context();
    leptos::mount::hydrate_body(move || {
        provide_context(context);
        view! { <app::App/> }
    });
}
