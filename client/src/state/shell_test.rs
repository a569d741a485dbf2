use super::*;
use crate::net::types::AttendanceStatus;

fn signed_in(name: &str) -> ShellContext {
    ShellContext {
        session: ShellSession::Authenticated(Box::new(SignedIn {
            user: User { id: "u1".into(), name: name.into(), email: "a@school.example".into(), role: Role::Admin },
            today: "2026-10-17".into(),
            date_line: "Saturday, October 17, 2026".into(),
            time_line: "02:05 PM".into(),
            dashboard: Some(DashboardData {
                summary: DailySummary { date: "2026-10-17".into(), total_students: 2, present: 1, ..Default::default() },
                records: vec![AttendanceRecord {
                    student_id: "s1".into(),
                    student_name: "Ravi".into(),
                    date: "2026-10-17".into(),
                    status: AttendanceStatus::Present,
                    note: None,
                    marked_by: Some("u1".into()),
                }],
            }),
        })),
        ..ShellContext::default()
    }
}

#[test]
fn default_is_logged_out_with_default_title() {
    let ctx = ShellContext::default();
    assert!(ctx.signed_in().is_none());
    assert_eq!(ctx.role(), None);
    assert_eq!(ctx.app_title, DEFAULT_APP_TITLE);
}

#[test]
fn embedded_json_round_trips_signed_in_context() {
    let ctx = signed_in("Asha Patel");
    assert_eq!(ShellContext::from_embedded_json(&ctx.to_embedded_json()), ctx);
    assert_eq!(ctx.role(), Some(Role::Admin));
}

#[test]
fn embedded_json_cannot_close_its_script_element() {
    let ctx = signed_in("</script><script>alert(1)</script>");
    let json = ctx.to_embedded_json();
    assert!(!json.contains('<'));
    let parsed = ShellContext::from_embedded_json(&json);
    assert_eq!(parsed.signed_in().unwrap().user.name, "</script><script>alert(1)</script>");
}

#[test]
fn unreadable_embedded_json_falls_back_to_logged_out() {
    assert_eq!(ShellContext::from_embedded_json("{not json"), ShellContext::default());
    assert_eq!(ShellContext::from_embedded_json(""), ShellContext::default());
}

#[test]
fn session_is_tagged_by_state() {
    let value = serde_json::to_value(ShellContext::default()).unwrap();
    assert_eq!(value["session"]["state"], "unauthenticated");
    assert_eq!(value["theme"], "system");
}
