use super::*;
use time::macros::{date, datetime};

#[test]
fn date_line_spells_out_weekday_and_month() {
    assert_eq!(date_line(datetime!(2026-01-05 09:00 UTC)), "Monday, January 5, 2026");
}

#[test]
fn time_line_uses_two_digit_twelve_hour_clock() {
    assert_eq!(time_line(datetime!(2026-01-05 09:07 UTC)), "09:07 AM");
    assert_eq!(time_line(datetime!(2026-01-05 00:30 UTC)), "12:30 AM");
    assert_eq!(time_line(datetime!(2026-01-05 23:59 UTC)), "11:59 PM");
}

#[test]
fn iso_date_round_trips() {
    let d = date!(2026 - 10 - 17);
    assert_eq!(format_iso_date(d), "2026-10-17");
    assert_eq!(parse_iso_date(" 2026-10-17 "), Some(d));
}

#[test]
fn parse_iso_date_rejects_other_shapes() {
    assert_eq!(parse_iso_date("17/10/2026"), None);
    assert_eq!(parse_iso_date("2026-02-30"), None);
    assert_eq!(parse_iso_date(""), None);
}
