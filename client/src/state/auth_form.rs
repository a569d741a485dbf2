//! Sign-in form controller: login and signup tabs sharing one loading flag.
//!
//! DESIGN
//! ======
//! Both submit paths follow the same shape: claim the loading flag, validate
//! locally, POST JSON, decode the reply whatever its status, then surface the
//! outcome as a toast (and a navigation on login success). The flag is held
//! by a guard so every exit path releases it. Every state change is
//! reported to an optional observer, which is how the Leptos card mirrors the
//! controller into its signal.
//!
//! TRADE-OFFS
//! ==========
//! A single `show_password` flag drives all three password inputs. Login
//! success releases the loading flag before the grace delay, so the form is
//! interactive again while the welcome toast is on screen.

#[cfg(test)]
#[path = "auth_form_test.rs"]
mod auth_form_test;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use serde_json::json;

use super::navigation::{HOME_ROUTE, Navigator};
use super::toast::{Notifier, Toast};
use crate::net::api::{AuthApi, LOGIN_ENDPOINT, SIGNUP_ENDPOINT};
use crate::net::types::{LoginCredentials, SignupDetails};

/// Pause between the login success toast and the redirect.
pub const DEFAULT_GRACE_DELAY: Duration = Duration::from_secs(1);

pub const PASSWORD_MISMATCH: &str = "Passwords do not match";
pub const LOGIN_FALLBACK_ERROR: &str = "Invalid credentials";
pub const SIGNUP_FALLBACK_ERROR: &str = "Failed to create account";
pub const LOGIN_TRANSPORT_ERROR: &str = "An error occurred during login";
pub const SIGNUP_TRANSPORT_ERROR: &str = "An error occurred during signup";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AuthTab {
    #[default]
    Login,
    Signup,
}

/// Password-type inputs on the form.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PasswordField {
    LoginPassword,
    SignupPassword,
    SignupConfirm,
}

impl PasswordField {
    pub const ALL: [Self; 3] = [Self::LoginPassword, Self::SignupPassword, Self::SignupConfirm];
}

/// How a password-type input renders.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputKind {
    Password,
    Text,
}

impl InputKind {
    /// Value for the HTML `type` attribute.
    #[must_use]
    pub fn as_html_type(self) -> &'static str {
        match self {
            Self::Password => "password",
            Self::Text => "text",
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuthFormState {
    pub tab: AuthTab,
    pub loading: bool,
    pub show_password: bool,
    pub login: LoginCredentials,
    pub signup: SignupDetails,
}

impl AuthFormState {
    pub fn toggle_password_visibility(&mut self) {
        self.show_password = !self.show_password;
    }

    /// Every password field shares the one visibility flag.
    #[must_use]
    pub fn input_kind(&self, _field: PasswordField) -> InputKind {
        if self.show_password { InputKind::Text } else { InputKind::Password }
    }
}

/// Result of one submit attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Another submission was in flight; nothing happened.
    Busy,
    /// Local validation failed before any request.
    Invalid,
    Succeeded,
    /// The server answered with a non-2xx status.
    Rejected,
    /// Transport or decode failure.
    Failed,
}

/// Receives a snapshot after every state change.
pub type StateObserver = Arc<dyn Fn(AuthFormState) + Send + Sync>;

/// Releases the loading flag when dropped.
struct LoadingGuard<'a> {
    form: &'a AuthForm,
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.form.update(|state| state.loading = false);
    }
}

/// Sleep between the success toast and the redirect.
async fn pause(delay: Duration) {
    if delay.is_zero() {
        return;
    }
    #[cfg(feature = "hydrate")]
    gloo_timers::future::sleep(delay).await;
    #[cfg(all(feature = "native", not(feature = "hydrate")))]
    tokio::time::sleep(delay).await;
}

pub struct AuthForm {
    api: Arc<dyn AuthApi>,
    notifier: Arc<dyn Notifier>,
    navigator: Arc<dyn Navigator>,
    state: Mutex<AuthFormState>,
    observer: Option<StateObserver>,
    grace_delay: Duration,
}

impl AuthForm {
    #[must_use]
    pub fn new(api: Arc<dyn AuthApi>, notifier: Arc<dyn Notifier>, navigator: Arc<dyn Navigator>) -> Self {
        Self {
            api,
            notifier,
            navigator,
            state: Mutex::new(AuthFormState::default()),
            observer: None,
            grace_delay: DEFAULT_GRACE_DELAY,
        }
    }

    #[must_use]
    pub fn with_grace_delay(mut self, grace_delay: Duration) -> Self {
        self.grace_delay = grace_delay;
        self
    }

    #[must_use]
    pub fn with_observer(mut self, observer: StateObserver) -> Self {
        self.observer = Some(observer);
        self
    }

    fn lock(&self) -> MutexGuard<'_, AuthFormState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    #[must_use]
    pub fn snapshot(&self) -> AuthFormState {
        self.lock().clone()
    }

    /// Apply an edit to the local form state (field input, role selection).
    pub fn update(&self, edit: impl FnOnce(&mut AuthFormState)) {
        let snapshot = {
            let mut state = self.lock();
            edit(&mut state);
            state.clone()
        };
        if let Some(observer) = &self.observer {
            observer(snapshot);
        }
    }

    pub fn select_tab(&self, tab: AuthTab) {
        self.update(|state| state.tab = tab);
    }

    pub fn toggle_password_visibility(&self) {
        self.update(AuthFormState::toggle_password_visibility);
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.lock().loading
    }

    /// Claim the loading flag, or `None` if a submission is already running.
    fn begin(&self) -> Option<LoadingGuard<'_>> {
        let mut claimed = false;
        self.update(|state| {
            if !state.loading {
                state.loading = true;
                claimed = true;
            }
        });
        claimed.then_some(LoadingGuard { form: self })
    }

    /// Submit the login tab.
    pub async fn submit_login(&self) -> SubmitOutcome {
        let Some(loading) = self.begin() else {
            return SubmitOutcome::Busy;
        };
        let credentials = self.lock().login.clone();
        let body = json!({ "email": credentials.email, "password": credentials.password });

        match self.api.post_json(LOGIN_ENDPOINT, body).await {
            Ok(resp) if resp.is_success() => {
                self.notifier
                    .notify(Toast::success("Welcome back!", "Login successful. Redirecting to dashboard..."));
                drop(loading);
                pause(self.grace_delay).await;
                self.navigator.push(HOME_ROUTE);
                self.navigator.refresh();
                SubmitOutcome::Succeeded
            }
            Ok(resp) => {
                let message = resp
                    .error_message()
                    .unwrap_or_else(|| LOGIN_FALLBACK_ERROR.to_owned());
                tracing::info!(status = resp.status, "login rejected");
                self.notifier.notify(Toast::error("Login Failed", &message));
                SubmitOutcome::Rejected
            }
            Err(e) => {
                tracing::warn!(error = %e, "login request failed");
                self.notifier.notify(Toast::error("Error", LOGIN_TRANSPORT_ERROR));
                SubmitOutcome::Failed
            }
        }
    }

    /// Submit the signup tab. On success the form switches to the login tab.
    pub async fn submit_signup(&self) -> SubmitOutcome {
        let Some(_loading) = self.begin() else {
            return SubmitOutcome::Busy;
        };
        let details = self.lock().signup.clone();

        if !details.passwords_match() {
            self.notifier.notify(Toast::error("Error", PASSWORD_MISMATCH));
            return SubmitOutcome::Invalid;
        }

        let body = match serde_json::to_value(details.to_request()) {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!(error = %e, "signup body encode failed");
                self.notifier.notify(Toast::error("Error", SIGNUP_TRANSPORT_ERROR));
                return SubmitOutcome::Failed;
            }
        };

        match self.api.post_json(SIGNUP_ENDPOINT, body).await {
            Ok(resp) if resp.is_success() => {
                self.notifier
                    .notify(Toast::success("Account Created!", "Please login with your credentials"));
                self.select_tab(AuthTab::Login);
                SubmitOutcome::Succeeded
            }
            Ok(resp) => {
                let message = resp
                    .error_message()
                    .unwrap_or_else(|| SIGNUP_FALLBACK_ERROR.to_owned());
                self.notifier.notify(Toast::error("Signup Failed", &message));
                SubmitOutcome::Rejected
            }
            Err(e) => {
                tracing::warn!(error = %e, "signup request failed");
                self.notifier.notify(Toast::error("Error", SIGNUP_TRANSPORT_ERROR));
                SubmitOutcome::Failed
            }
        }
    }
}
