use super::*;
use crate::state::test_helpers;

fn teacher() -> SessionUser {
    SessionUser {
        id: Uuid::nil(),
        name: "Asha Patel".into(),
        email: "asha@school.example".into(),
        role: Role::Teacher,
    }
}

// =============================================================================
// bytes_to_hex / generate_token
// =============================================================================

#[test]
fn bytes_to_hex_empty() {
    assert_eq!(bytes_to_hex(&[]), "");
}

#[test]
fn bytes_to_hex_leading_zero() {
    assert_eq!(bytes_to_hex(&[0x0a, 0xff]), "0aff");
}

#[test]
fn generate_token_is_64_hex_chars() {
    let token = generate_token();
    assert_eq!(token.len(), 64);
    assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
}

#[test]
fn generate_token_two_calls_differ() {
    assert_ne!(generate_token(), generate_token());
}

// =============================================================================
// SessionState
// =============================================================================

#[test]
fn from_lookup_found_is_authenticated() {
    let state = SessionState::from_lookup::<sqlx::Error>(Ok(Some(teacher())));
    assert!(state.is_authenticated());
    assert_eq!(state.user().map(|u| u.name.as_str()), Some("Asha Patel"));
}

#[test]
fn from_lookup_missing_is_unauthenticated() {
    let state = SessionState::from_lookup::<sqlx::Error>(Ok(None));
    assert_eq!(state, SessionState::Unauthenticated);
}

#[test]
fn from_lookup_error_matches_missing_session() {
    let failed = SessionState::from_lookup(Err(sqlx::Error::PoolTimedOut));
    let missing = SessionState::from_lookup::<sqlx::Error>(Ok(None));
    assert_eq!(failed, missing);
    assert!(failed.user().is_none());
}

#[tokio::test]
async fn resolve_session_without_token_skips_lookup() {
    let state = test_helpers::test_app_state();
    assert_eq!(resolve_session(&state.pool, None).await, SessionState::Unauthenticated);
    assert_eq!(resolve_session(&state.pool, Some("")).await, SessionState::Unauthenticated);
}

#[tokio::test]
async fn resolve_session_with_unreachable_db_fails_open() {
    let state = test_helpers::test_app_state();
    let resolved = resolve_session(&state.pool, Some("deadbeef")).await;
    assert_eq!(resolved, SessionState::Unauthenticated);
}

// =============================================================================
// SessionUser
// =============================================================================

#[test]
fn to_wire_stringifies_id() {
    let wire = teacher().to_wire();
    assert_eq!(wire.id, "00000000-0000-0000-0000-000000000000");
    assert_eq!(wire.role, Role::Teacher);
    assert_eq!(wire.email, "asha@school.example");
}

#[test]
fn is_admin_checks_role() {
    let mut user = teacher();
    assert!(!user.is_admin());
    user.role = Role::Admin;
    assert!(user.is_admin());
}
