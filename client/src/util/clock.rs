//! Wall-clock formatting for the header and attendance dates.

#[cfg(test)]
#[path = "clock_test.rs"]
mod clock_test;

use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{Date, OffsetDateTime};

const DATE_LINE: &[BorrowedFormatItem<'static>] =
    format_description!("[weekday], [month repr:long] [day padding:none], [year]");
const TIME_LINE: &[BorrowedFormatItem<'static>] = format_description!("[hour repr:12]:[minute] [period]");
const ISO_DATE: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// Current local time, or UTC when the local offset cannot be determined.
#[must_use]
pub fn now() -> OffsetDateTime {
    OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc())
}

/// `Saturday, October 17, 2026`.
#[must_use]
pub fn date_line(at: OffsetDateTime) -> String {
    at.format(DATE_LINE).unwrap_or_else(|_| format_iso_date(at.date()))
}

/// `02:05 PM`.
#[must_use]
pub fn time_line(at: OffsetDateTime) -> String {
    at.format(TIME_LINE).unwrap_or_default()
}

/// `2026-10-17`, the wire format for attendance dates.
#[must_use]
pub fn format_iso_date(date: Date) -> String {
    date.format(ISO_DATE).unwrap_or_default()
}

/// Parse a `YYYY-MM-DD` date.
#[must_use]
pub fn parse_iso_date(raw: &str) -> Option<Date> {
    Date::parse(raw.trim(), ISO_DATE).ok()
}
