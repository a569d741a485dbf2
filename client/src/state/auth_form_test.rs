use super::*;
use crate::net::types::Role;
use crate::state::test_helpers::{MockApi, NavEvent, RecordingNavigator, RecordingNotifier, Reply};

struct Harness {
    api: Arc<MockApi>,
    notifier: Arc<RecordingNotifier>,
    navigator: Arc<RecordingNavigator>,
    form: AuthForm,
}

fn harness(replies: Vec<Reply>) -> Harness {
    let api = Arc::new(MockApi::new(replies));
    let notifier = Arc::new(RecordingNotifier::default());
    let navigator = Arc::new(RecordingNavigator::default());
    let form = AuthForm::new(api.clone(), notifier.clone(), navigator.clone()).with_grace_delay(Duration::ZERO);
    Harness { api, notifier, navigator, form }
}

fn fill_login(form: &AuthForm) {
    form.update(|s| {
        s.login.email = "teacher@school.example".into();
        s.login.password = "correct horse".into();
    });
}

fn fill_signup(form: &AuthForm, password: &str, confirm: &str) {
    form.update(|s| {
        s.tab = AuthTab::Signup;
        s.signup = SignupDetails {
            name: "Meera Shah".into(),
            email: "meera@school.example".into(),
            password: password.into(),
            confirm_password: confirm.into(),
            role: Role::Admin,
        };
    });
}

// =============================================================================
// password visibility
// =============================================================================

#[test]
fn password_fields_start_masked() {
    let state = AuthFormState::default();
    for field in PasswordField::ALL {
        assert_eq!(state.input_kind(field), InputKind::Password);
    }
}

#[test]
fn toggle_flips_all_three_fields_together() {
    let h = harness(vec![]);
    h.form.toggle_password_visibility();
    let state = h.form.snapshot();
    for field in PasswordField::ALL {
        assert_eq!(state.input_kind(field), InputKind::Text);
        assert_eq!(state.input_kind(field).as_html_type(), "text");
    }

    h.form.toggle_password_visibility();
    let state = h.form.snapshot();
    for field in PasswordField::ALL {
        assert_eq!(state.input_kind(field), InputKind::Password);
    }
}

// =============================================================================
// login
// =============================================================================

#[tokio::test]
async fn login_success_notifies_then_navigates_home_and_refreshes() {
    let h = harness(vec![Reply::Json { status: 200, body: r#"{"user":{"id":"u1"}}"# }]);
    fill_login(&h.form);

    assert_eq!(h.form.submit_login().await, SubmitOutcome::Succeeded);

    let toast = h.notifier.last().unwrap();
    assert!(!toast.is_error());
    assert_eq!(toast.title, "Welcome back!");
    assert_eq!(h.navigator.events(), vec![NavEvent::Push("/".into()), NavEvent::Refresh]);
    assert!(!h.form.is_loading());
}

#[tokio::test]
async fn login_posts_credentials_as_json() {
    let h = harness(vec![Reply::Json { status: 200, body: "{}" }]);
    fill_login(&h.form);
    h.form.submit_login().await;

    let requests = h.api.requests.lock().unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].0, LOGIN_ENDPOINT);
    assert_eq!(
        requests[0].1,
        Some(json!({ "email": "teacher@school.example", "password": "correct horse" }))
    );
}

#[tokio::test(start_paused = true)]
async fn login_success_waits_grace_delay_before_navigating() {
    let api = Arc::new(MockApi::new(vec![Reply::Json { status: 200, body: "{}" }]));
    let notifier = Arc::new(RecordingNotifier::default());
    let navigator = Arc::new(RecordingNavigator::default());
    let form = AuthForm::new(api, notifier, navigator.clone());

    let start = tokio::time::Instant::now();
    assert_eq!(form.submit_login().await, SubmitOutcome::Succeeded);
    assert!(start.elapsed() >= DEFAULT_GRACE_DELAY);
    assert_eq!(navigator.events().len(), 2);
}

#[tokio::test]
async fn login_401_shows_server_message_verbatim() {
    let h = harness(vec![Reply::Json { status: 401, body: r#"{"error":"Invalid credentials"}"# }]);
    fill_login(&h.form);

    assert_eq!(h.form.submit_login().await, SubmitOutcome::Rejected);

    let toast = h.notifier.last().unwrap();
    assert!(toast.is_error());
    assert_eq!(toast.title, "Login Failed");
    assert_eq!(toast.description, "Invalid credentials");
    assert!(h.navigator.events().is_empty());
}

#[tokio::test]
async fn login_failure_without_error_field_uses_fallback() {
    let h = harness(vec![Reply::Json { status: 403, body: r#"{"detail":"nope"}"# }]);
    assert_eq!(h.form.submit_login().await, SubmitOutcome::Rejected);
    assert_eq!(h.notifier.last().unwrap().description, LOGIN_FALLBACK_ERROR);
}

#[tokio::test]
async fn login_500_with_empty_body_shows_generic_error_and_stays() {
    let h = harness(vec![Reply::Status(500)]);
    fill_login(&h.form);

    assert_eq!(h.form.submit_login().await, SubmitOutcome::Failed);

    let toast = h.notifier.last().unwrap();
    assert!(toast.is_error());
    assert_eq!(toast.description, LOGIN_TRANSPORT_ERROR);
    assert!(h.navigator.events().is_empty());
    assert!(!h.form.is_loading());
}

#[tokio::test]
async fn login_500_with_html_body_shows_generic_error() {
    let h = harness(vec![Reply::Json { status: 500, body: "<h1>Internal Server Error</h1>" }]);
    assert_eq!(h.form.submit_login().await, SubmitOutcome::Failed);
    assert_eq!(h.notifier.last().unwrap().description, LOGIN_TRANSPORT_ERROR);
    assert!(h.navigator.events().is_empty());
}

#[tokio::test]
async fn login_network_failure_clears_loading() {
    let h = harness(vec![Reply::Unreachable]);
    assert_eq!(h.form.submit_login().await, SubmitOutcome::Failed);
    assert!(!h.form.is_loading());
    assert_eq!(h.notifier.toasts.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn submit_while_loading_is_ignored() {
    let h = harness(vec![Reply::Json { status: 200, body: "{}" }]);
    h.form.update(|s| s.loading = true);

    assert_eq!(h.form.submit_login().await, SubmitOutcome::Busy);
    assert_eq!(h.form.submit_signup().await, SubmitOutcome::Busy);
    assert_eq!(h.api.request_count(), 0);
    assert!(h.notifier.toasts.lock().unwrap().is_empty());
    assert!(h.form.is_loading());
}

// =============================================================================
// signup
// =============================================================================

#[tokio::test]
async fn signup_password_mismatch_sends_nothing() {
    let h = harness(vec![Reply::Json { status: 201, body: "{}" }]);
    fill_signup(&h.form, "hunter22", "hunter23");

    assert_eq!(h.form.submit_signup().await, SubmitOutcome::Invalid);

    assert_eq!(h.api.request_count(), 0);
    let toast = h.notifier.last().unwrap();
    assert!(toast.is_error());
    assert_eq!(toast.description, PASSWORD_MISMATCH);
    assert!(!h.form.is_loading());
    assert_eq!(h.form.snapshot().tab, AuthTab::Signup);
}

#[tokio::test]
async fn signup_success_switches_to_login_tab_without_navigating() {
    let h = harness(vec![Reply::Json { status: 201, body: r#"{"user":{"id":"u2"}}"# }]);
    fill_signup(&h.form, "hunter22", "hunter22");

    assert_eq!(h.form.submit_signup().await, SubmitOutcome::Succeeded);

    assert_eq!(h.form.snapshot().tab, AuthTab::Login);
    assert_eq!(h.notifier.last().unwrap().title, "Account Created!");
    assert!(h.navigator.events().is_empty());
}

#[tokio::test]
async fn signup_body_omits_confirmation() {
    let h = harness(vec![Reply::Json { status: 201, body: "{}" }]);
    fill_signup(&h.form, "hunter22", "hunter22");
    h.form.submit_signup().await;

    let requests = h.api.requests.lock().unwrap();
    assert_eq!(requests[0].0, SIGNUP_ENDPOINT);
    let body = requests[0].1.clone().unwrap();
    assert_eq!(body["role"], "admin");
    assert!(body.get("confirm_password").is_none());
}

#[tokio::test]
async fn signup_conflict_shows_server_message() {
    let h = harness(vec![Reply::Json {
        status: 409,
        body: r#"{"error":"An account with this email already exists"}"#,
    }]);
    fill_signup(&h.form, "hunter22", "hunter22");

    assert_eq!(h.form.submit_signup().await, SubmitOutcome::Rejected);
    let toast = h.notifier.last().unwrap();
    assert_eq!(toast.title, "Signup Failed");
    assert_eq!(toast.description, "An account with this email already exists");
    assert_eq!(h.form.snapshot().tab, AuthTab::Signup);
}

#[tokio::test]
async fn signup_failure_without_message_uses_fallback() {
    let h = harness(vec![Reply::Json { status: 400, body: "{}" }]);
    fill_signup(&h.form, "pw", "pw");
    h.form.submit_signup().await;
    assert_eq!(h.notifier.last().unwrap().description, SIGNUP_FALLBACK_ERROR);
}

#[tokio::test]
async fn signup_network_failure_shows_generic_error() {
    let h = harness(vec![Reply::Unreachable]);
    fill_signup(&h.form, "pw", "pw");
    assert_eq!(h.form.submit_signup().await, SubmitOutcome::Failed);
    assert_eq!(h.notifier.last().unwrap().description, SIGNUP_TRANSPORT_ERROR);
    assert!(!h.form.is_loading());
}

// =============================================================================
// observer
// =============================================================================

#[tokio::test]
async fn observer_sees_loading_claimed_then_released() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();
    let form = AuthForm::new(
        Arc::new(MockApi::new(vec![Reply::Unreachable])),
        Arc::new(RecordingNotifier::default()),
        Arc::new(RecordingNavigator::default()),
    )
    .with_observer(Arc::new(move |state: AuthFormState| sink.lock().unwrap().push(state.loading)));

    assert_eq!(form.submit_login().await, SubmitOutcome::Failed);
    assert_eq!(*seen.lock().unwrap(), vec![true, false]);
}

#[test]
fn observer_sees_tab_and_visibility_changes() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();
    let form = AuthForm::new(
        Arc::new(MockApi::new(vec![])),
        Arc::new(RecordingNotifier::default()),
        Arc::new(RecordingNavigator::default()),
    )
    .with_observer(Arc::new(move |state: AuthFormState| sink.lock().unwrap().push(state)));

    form.select_tab(AuthTab::Signup);
    form.toggle_password_visibility();

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 2);
    assert_eq!(seen[0].tab, AuthTab::Signup);
    assert!(!seen[0].show_password);
    assert!(seen[1].show_password);
}
