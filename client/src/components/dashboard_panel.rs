//! Dashboard body: today's summary tiles and the day's records.

#[cfg(test)]
#[path = "dashboard_panel_test.rs"]
mod dashboard_panel_test;

use leptos::prelude::*;
use leptos::tachys::view::any_view::{AnyView, IntoAny};

use crate::net::types::{AttendanceRecord, DailySummary};
use crate::state::shell::{DashboardData, SignedIn};

pub const LOAD_FAILED_NOTICE: &str = "Attendance data is unavailable right now.";
pub const NO_RECORDS_NOTICE: &str = "No attendance marked yet today.";

/// Summary tiles in display order: (label, value).
fn stat_tiles(summary: &DailySummary) -> Vec<(&'static str, String)> {
    vec![
        ("Students", summary.total_students.to_string()),
        ("Present", summary.present.to_string()),
        ("Absent", summary.absent.to_string()),
        ("Late", summary.late.to_string()),
        ("Excused", summary.excused.to_string()),
        ("Unmarked", summary.unmarked.to_string()),
        ("Attendance", format!("{:.1}%", summary.attendance_rate())),
    ]
}

fn records_table(records: Vec<AttendanceRecord>) -> AnyView {
    if records.is_empty() {
        return view! { <p>{NO_RECORDS_NOTICE}</p> }.into_any();
    }
    view! {
        <table>
            <thead>
                <tr><th>"Student"</th><th>"Status"</th><th>"Note"</th></tr>
            </thead>
            <tbody>
                {records
                    .into_iter()
                    .map(|record| {
                        view! {
                            <tr>
                                <td>{record.student_name}</td>
                                <td>{record.status.as_str()}</td>
                                <td>{record.note.unwrap_or_default()}</td>
                            </tr>
                        }
                    })
                    .collect_view()}
            </tbody>
        </table>
    }
    .into_any()
}

#[component]
pub fn DashboardPanel(signed_in: SignedIn) -> impl IntoView {
    let SignedIn { user, today, dashboard, .. } = signed_in;

    let (summary, records) = match dashboard {
        Some(DashboardData { summary, records }) => {
            let tiles = stat_tiles(&summary)
                .into_iter()
                .map(|(label, value)| {
                    view! {
                        <div class="card stat">
                            <div class="stat__value">{value}</div>
                            <div class="stat__label">{label}</div>
                        </div>
                    }
                })
                .collect_view();
            (view! { <div class="stats">{tiles}</div> }.into_any(), records_table(records))
        }
        None => (view! { <p class="notice">{LOAD_FAILED_NOTICE}</p> }.into_any(), ().into_any()),
    };

    view! {
        <section id="summary">
            <h1>"Welcome, "{user.name}</h1>
            <p class="stat__label">"Attendance for "{today}</p>
            {summary}
        </section>
        <section id="records" class="card">
            <h2>"Today's records"</h2>
            {records}
        </section>
    }
}
