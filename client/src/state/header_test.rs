use super::*;
use crate::state::test_helpers::{MockApi, NavEvent, RecordingNavigator, Reply};
use time::macros::datetime;

fn controller(replies: Vec<Reply>) -> (Arc<MockApi>, Arc<RecordingNavigator>, HeaderController) {
    let api = Arc::new(MockApi::new(replies));
    let navigator = Arc::new(RecordingNavigator::default());
    let header = HeaderController::new(api.clone(), navigator.clone());
    (api, navigator, header)
}

#[tokio::test]
async fn logout_success_navigates_home_and_refreshes() {
    let (api, navigator, header) = controller(vec![Reply::Status(204)]);
    assert_eq!(header.logout().await, LogoutOutcome::Confirmed);
    assert_eq!(navigator.events(), vec![NavEvent::Push("/".into()), NavEvent::Refresh]);

    let requests = api.requests.lock().unwrap();
    assert_eq!(requests[0], (LOGOUT_ENDPOINT.to_owned(), None));
}

#[tokio::test]
async fn logout_network_failure_still_navigates_home() {
    let (_api, navigator, header) = controller(vec![Reply::Unreachable]);
    assert_eq!(header.logout().await, LogoutOutcome::Unreachable);
    assert_eq!(navigator.events(), vec![NavEvent::Push("/".into()), NavEvent::Refresh]);
}

#[tokio::test]
async fn logout_server_error_still_navigates_home() {
    let (_api, navigator, header) = controller(vec![Reply::Status(500)]);
    assert_eq!(header.logout().await, LogoutOutcome::ServerRejected(500));
    assert_eq!(navigator.events().len(), 2);
}

#[test]
fn header_view_formats_date_and_time() {
    let view = HeaderView::new("Asha Patel", datetime!(2026-10-17 14:05 UTC));
    assert_eq!(view.date_line, "Saturday, October 17, 2026");
    assert_eq!(view.time_line, "02:05 PM");
    assert_eq!(view.initials, "AP");
    assert_eq!(view.search_placeholder, "Search anything...");
    assert!(view.has_notifications);
}

#[test]
fn initials_take_first_two_words() {
    assert_eq!(initials("meera"), "M");
    assert_eq!(initials("  ravi  kumar  singh "), "RK");
    assert_eq!(initials(""), "?");
}

#[test]
fn header_view_from_lines_keeps_server_clock() {
    let view = HeaderView::from_lines("meera", "Monday, January 5, 2026".into(), "09:00 AM".into());
    assert_eq!(view.date_line, "Monday, January 5, 2026");
    assert_eq!(view.time_line, "09:00 AM");
    assert_eq!(view.initials, "M");
}
