//! Root component, document shell, and hydration entry.
//!
//! SYSTEM CONTEXT
//! ==============
//! The server calls [`shell`] once per request with a [`ShellContext`] it has
//! already resolved from the session cookie. [`HomePage`] picks the
//! container from that context alone, so the session is never looked up a
//! second time during the render. The browser rebuilds the same context from
//! the JSON copy in `<head>` before hydrating.
//!
//! TRADE-OFFS
//! ==========
//! The shell is rendered as a full document load on every navigation. After
//! login or logout the controllers push `/`, and the server decides again.

use leptos::config::LeptosOptions;
use leptos::hydration::HydrationScripts;
use leptos::prelude::*;
use leptos::tachys::view::any_view::IntoAny;
use leptos_router::StaticSegment;
use leptos_router::components::{Route, Router, Routes};

use crate::components::app_header::AppHeader;
use crate::components::auth_card::AuthCard;
use crate::components::dashboard_panel::DashboardPanel;
use crate::components::sidebar::Sidebar;
use crate::components::toaster::{ToastQueue, Toaster};
use crate::state::shell::{SHELL_CONTEXT_ELEMENT_ID, ShellContext};

/// Stylesheet path produced by the site build.
pub const STYLESHEET_HREF: &str = "/pkg/attendance.css";

/// Full HTML document around [`App`].
pub fn shell(options: LeptosOptions, context: ShellContext) -> impl IntoView {
    let title = context.app_title.clone();
    let theme_class = context.theme.html_class();
    let embedded = context.to_embedded_json();
    provide_context(context);

    view! {
        <!DOCTYPE html>
        <html lang="en" class=theme_class>
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <meta name="description" content="Attendance tracking and management for schools"/>
                <title>{title}</title>
                <link rel="stylesheet" href=STYLESHEET_HREF/>
                <script type="application/json" id=SHELL_CONTEXT_ELEMENT_ID inner_html=embedded></script>
                <HydrationScripts options/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

#[component]
pub fn App() -> impl IntoView {
    provide_context(ToastQueue::new());

    view! {
        <Router>
            <Routes fallback=|| "Page not found.">
                <Route path=StaticSegment("") view=HomePage/>
            </Routes>
        </Router>
        <Toaster/>
    }
}

/// `/`: dashboard shell for a session, sign-in card otherwise.
#[component]
pub fn HomePage() -> impl IntoView {
    let context = use_context::<ShellContext>().unwrap_or_default();
    let ShellContext { app_title, theme, min_password_len, .. } = context.clone();

    match context.signed_in().cloned() {
        Some(signed_in) => {
            let role = signed_in.user.role;
            let header = signed_in.clone();
            view! {
                <div class="app">
                    <Sidebar app_title=app_title role=role/>
                    <div class="app__main">
                        <AppHeader signed_in=header theme=theme/>
                        <main class="app__content">
                            <DashboardPanel signed_in=signed_in/>
                        </main>
                    </div>
                </div>
            }
            .into_any()
        }
        None => view! {
            <div class="landing">
                <AuthCard app_title=app_title min_password_len=min_password_len/>
            </div>
        }
        .into_any(),
    }
}

/// Read the context the server embedded in `<head>`.
#[cfg(feature = "hydrate")]
pub fn embedded_shell_context() -> ShellContext {
    web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(SHELL_CONTEXT_ELEMENT_ID))
        .and_then(|el| el.text_content())
        .map(|raw| ShellContext::from_embedded_json(&raw))
        .unwrap_or_default()
}
