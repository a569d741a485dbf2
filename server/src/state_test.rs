use super::*;
use std::time::Duration;

#[tokio::test]
async fn limiter_takes_config_values() {
    let mut config = test_helpers::test_config();
    config.login_rate_limit = 1;
    config.login_rate_window = Duration::from_secs(60);
    let state = test_helpers::test_app_state_with(config);

    state.login_limiter.record_failure("asha@school.example");
    assert!(state.login_limiter.check("asha@school.example").is_err());
}

#[tokio::test]
async fn clones_share_config_and_limiter() {
    let state = test_helpers::test_app_state();
    let cloned = state.clone();
    assert!(Arc::ptr_eq(&state.config, &cloned.config));

    state.login_limiter.record_failure("x@school.example");
    for _ in 1..state.config.login_rate_limit {
        cloned.login_limiter.record_failure("x@school.example");
    }
    assert!(state.login_limiter.check("x@school.example").is_err());
}
