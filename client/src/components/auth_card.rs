//! Sign-in / sign-up card shown to visitors without a session.
//!
//! SYSTEM CONTEXT
//! ==============
//! The card renders from a `RwSignal<AuthFormState>`. In the browser every
//! edit and submit goes through `AuthForm`, whose observer writes each new
//! state back into that signal; the server render just shows the defaults.

#[cfg(test)]
#[path = "auth_card_test.rs"]
mod auth_card_test;

#[cfg(feature = "hydrate")]
use std::sync::Arc;

use leptos::prelude::*;

#[cfg(feature = "hydrate")]
use super::toaster::ToastQueue;
use crate::net::types::Role;
#[cfg(feature = "hydrate")]
use crate::state::auth_form::AuthForm;
use crate::state::auth_form::{AuthFormState, AuthTab, PasswordField};

/// Landing copy next to the card: (headline, detail).
pub const FEATURES: [(&str, &str); 3] = [
    ("Smart Analytics", "real-time insights and reporting"),
    ("Secure & Reliable", "passwords hashed, sessions server-side"),
    ("User Friendly", "intuitive interface for everyone"),
];

fn visibility_label(show_password: bool) -> &'static str {
    if show_password { "Hide passwords" } else { "Show passwords" }
}

fn tab_selected(state: &AuthFormState, tab: AuthTab) -> &'static str {
    if state.tab == tab { "true" } else { "false" }
}

/// View-side handle on the form: the signal plus, in the browser, the
/// controller that owns the real state.
#[derive(Clone, Copy)]
struct FormHandle {
    state: RwSignal<AuthFormState>,
    #[cfg(feature = "hydrate")]
    controller: StoredValue<Arc<AuthForm>>,
}

impl FormHandle {
    fn new() -> Self {
        let state = RwSignal::new(AuthFormState::default());
        #[cfg(feature = "hydrate")]
        {
            use crate::net::browser::{BrowserApi, BrowserNavigator};

            let toasts = expect_context::<ToastQueue>();
            let form = AuthForm::new(Arc::new(BrowserApi), Arc::new(toasts), Arc::new(BrowserNavigator))
                .with_observer(Arc::new(move |snapshot| state.set(snapshot)));
            Self { state, controller: StoredValue::new(Arc::new(form)) }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            Self { state }
        }
    }

    fn edit(self, edit: impl FnOnce(&mut AuthFormState)) {
        #[cfg(feature = "hydrate")]
        self.controller.with_value(|form| form.update(edit));
        #[cfg(not(feature = "hydrate"))]
        self.state.update(edit);
    }

    fn submit(self, tab: AuthTab) {
        #[cfg(feature = "hydrate")]
        {
            let form = self.controller.get_value();
            leptos::task::spawn_local(async move {
                match tab {
                    AuthTab::Login => form.submit_login().await,
                    AuthTab::Signup => form.submit_signup().await,
                };
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = tab;
        }
    }
}

#[component]
pub fn AuthCard(app_title: String, min_password_len: usize) -> impl IntoView {
    let form = FormHandle::new();
    let state = form.state;

    let input_type = move |field: PasswordField| state.get().input_kind(field).as_html_type();
    let on_toggle_visibility = move |_| form.edit(AuthFormState::toggle_password_visibility);

    let on_login = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        form.submit(AuthTab::Login);
    };
    let on_signup = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        form.submit(AuthTab::Signup);
    };

    view! {
        <div class="auth">
            <div class="auth__intro">
                <h1>{app_title}</h1>
                <p>"Welcome to the Future of Attendance Management"</p>
                <ul class="auth__features">
                    {FEATURES
                        .iter()
                        .map(|(headline, detail)| view! { <li><strong>{*headline}</strong>": "{*detail}</li> })
                        .collect_view()}
                </ul>
            </div>
            <div class="card">
                <h2>"Get Started"</h2>
                <p class="stat__label">"Access your attendance management dashboard"</p>
                <div class="auth__tabs" role="tablist">
                    <button
                        class="btn btn--ghost auth__tab"
                        type="button"
                        role="tab"
                        aria-selected=move || tab_selected(&state.get(), AuthTab::Login)
                        on:click=move |_| form.edit(|s| s.tab = AuthTab::Login)
                    >
                        "Login"
                    </button>
                    <button
                        class="btn btn--ghost auth__tab"
                        type="button"
                        role="tab"
                        aria-selected=move || tab_selected(&state.get(), AuthTab::Signup)
                        on:click=move |_| form.edit(|s| s.tab = AuthTab::Signup)
                    >
                        "Sign Up"
                    </button>
                </div>

                <form id="login-form" hidden=move || state.get().tab != AuthTab::Login on:submit=on_login>
                    <label for="login-email">"Email"</label>
                    <input
                        id="login-email"
                        type="email"
                        placeholder="Enter your email"
                        required
                        prop:value=move || state.get().login.email
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            form.edit(move |s| s.login.email = value);
                        }
                    />
                    <label for="login-password">"Password"</label>
                    <input
                        id="login-password"
                        type=move || input_type(PasswordField::LoginPassword)
                        placeholder="Enter your password"
                        required
                        prop:value=move || state.get().login.password
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            form.edit(move |s| s.login.password = value);
                        }
                    />
                    <button class="btn btn--ghost" type="button" on:click=on_toggle_visibility>
                        {move || visibility_label(state.get().show_password)}
                    </button>
                    <button class="btn" type="submit" disabled=move || state.get().loading>
                        "Sign In"
                    </button>
                </form>

                <form id="signup-form" hidden=move || state.get().tab != AuthTab::Signup on:submit=on_signup>
                    <label for="signup-name">"Full Name"</label>
                    <input
                        id="signup-name"
                        type="text"
                        placeholder="Enter your full name"
                        required
                        prop:value=move || state.get().signup.name
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            form.edit(move |s| s.signup.name = value);
                        }
                    />
                    <label for="signup-email">"Email"</label>
                    <input
                        id="signup-email"
                        type="email"
                        placeholder="Enter your email"
                        required
                        prop:value=move || state.get().signup.email
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            form.edit(move |s| s.signup.email = value);
                        }
                    />
                    <label for="signup-role">"Role"</label>
                    <select
                        id="signup-role"
                        prop:value=move || state.get().signup.role.as_str()
                        on:change=move |ev| {
                            let role = Role::parse(&event_target_value(&ev)).unwrap_or_default();
                            form.edit(move |s| s.signup.role = role);
                        }
                    >
                        <option value="teacher">"Teacher"</option>
                        <option value="admin">"Admin"</option>
                    </select>
                    <label for="signup-password">"Password"</label>
                    <input
                        id="signup-password"
                        type=move || input_type(PasswordField::SignupPassword)
                        minlength=min_password_len.to_string()
                        placeholder="Create a password"
                        required
                        prop:value=move || state.get().signup.password
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            form.edit(move |s| s.signup.password = value);
                        }
                    />
                    <label for="signup-confirm">"Confirm Password"</label>
                    <input
                        id="signup-confirm"
                        type=move || input_type(PasswordField::SignupConfirm)
                        placeholder="Confirm your password"
                        required
                        prop:value=move || state.get().signup.confirm_password
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            form.edit(move |s| s.signup.confirm_password = value);
                        }
                    />
                    <button class="btn btn--ghost" type="button" on:click=on_toggle_visibility>
                        {move || visibility_label(state.get().show_password)}
                    </button>
                    <button class="btn" type="submit" disabled=move || state.get().loading>
                        "Create Account"
                    </button>
                </form>
            </div>
        </div>
    }
}
