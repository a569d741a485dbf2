//! Dashboard header: date/time, search, theme toggle, notifications, avatar,
//! logout.
//!
//! Logout runs through `HeaderController`, so the browser is sent home
//! whatever the server answers. The theme toggle swaps the `<html>` class
//! immediately and saves the preference in the background.

use leptos::prelude::*;

use crate::state::header::HeaderView;
use crate::state::shell::SignedIn;
use crate::util::theme::{Theme, apply as apply_theme};

#[component]
pub fn AppHeader(signed_in: SignedIn, theme: Theme) -> impl IntoView {
    let view_model = HeaderView::from_lines(&signed_in.user.name, signed_in.date_line, signed_in.time_line);
    let display_name = view_model.user_name.clone();
    let has_notifications = view_model.has_notifications;
    let theme_state = RwSignal::new(theme);

    let on_toggle_theme = move |_| {
        let next = theme_state.get().toggled();
        theme_state.set(next);
        apply_theme(next);
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match crate::net::browser::save_theme(next.as_str()).await {
                Ok(status) if (200..300).contains(&status) => {}
                Ok(status) => tracing::warn!(status, "theme save rejected"),
                Err(e) => tracing::warn!(error = %e, "theme save failed"),
            }
        });
    };

    let on_logout = move |_| {
        #[cfg(feature = "hydrate")]
        {
            use std::sync::Arc;

            use crate::net::browser::{BrowserApi, BrowserNavigator};
            use crate::state::header::HeaderController;

            let header = HeaderController::new(Arc::new(BrowserApi), Arc::new(BrowserNavigator));
            leptos::task::spawn_local(async move {
                header.logout().await;
            });
        }
    };

    view! {
        <header class="header">
            <div class="header__left">
                <div>
                    <h2 class="header__date">{view_model.date_line}</h2>
                    <p class="header__time">{view_model.time_line}</p>
                </div>
                <input
                    class="header__search"
                    type="search"
                    placeholder=view_model.search_placeholder
                    aria-label="Search"
                />
            </div>
            <div class="header__right">
                <button class="btn btn--ghost" type="button" aria-label="Toggle theme" on:click=on_toggle_theme>
                    "Theme"
                </button>
                <span class="header__bell" aria-label="Notifications">
                    "🔔"
                    {has_notifications.then(|| view! { <span class="header__badge"></span> })}
                </span>
                <span class="header__user">{display_name}</span>
                <div class="avatar" title=view_model.user_name>{view_model.initials}</div>
                <button class="btn btn--ghost" type="button" id="logout" aria-label="Log out" on:click=on_logout>
                    "Log out"
                </button>
            </div>
        </header>
    }
}
