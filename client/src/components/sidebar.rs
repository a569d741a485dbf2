//! Left navigation for signed-in users.

use leptos::prelude::*;

use crate::net::types::Role;
use crate::state::shell::NAV_ITEMS;

#[component]
pub fn Sidebar(app_title: String, role: Role) -> impl IntoView {
    view! {
        <aside class="sidebar">
            <div class="sidebar__brand">{app_title}</div>
            <nav class="sidebar__nav">
                {NAV_ITEMS
                    .iter()
                    .map(|(label, href)| view! { <a href=*href>{*label}</a> })
                    .collect_view()}
            </nav>
            <div class="sidebar__role">"Signed in as "{role.as_str()}</div>
        </aside>
    }
}
