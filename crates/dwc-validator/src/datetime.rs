//! `eventDate` format checks.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::input::{CellValue, RecordTable};
use crate::report::DateTimeReport;
use crate::vocab::EVENT_DATE;

// A calendar date, optionally followed by a time with seconds and an offset.
static ISO_DATE_TIME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d{4}-\d{2}-\d{2}(T\d{2}:\d{2}:\d{2}(\.\d+)?(Z|[+-]\d{2}:?\d{2})?)?$").unwrap()
});

/// Parse a single (non-interval) eventDate into a calendar date.
pub(crate) fn parse_event_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if !ISO_DATE_TIME.is_match(value) {
        return None;
    }

    if let Ok(dt) = DateTime::<FixedOffset>::parse_from_rfc3339(value) {
        return Some(dt.date_naive());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt.date());
    }
    // Offsets without a colon, e.g. +1000
    if let Ok(dt) = DateTime::<FixedOffset>::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f%z") {
        return Some(dt.date_naive());
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

/// Whether a cell holds a valid eventDate: a date, a date-time, or an
/// interval `start/end` of those.
pub fn is_valid_event_date(cell: &CellValue) -> bool {
    let CellValue::Text(value) = cell else {
        return false;
    };

    match value.trim().split_once('/') {
        Some((start, end)) => match (parse_event_date(start), parse_event_date(end)) {
            (Some(s), Some(e)) => s <= e,
            _ => false,
        },
        None => parse_event_date(value).is_some(),
    }
}

/// Count present `eventDate` values that are not valid dates.
pub fn create_datetime_report(table: &RecordTable) -> DateTimeReport {
    let Some(cells) = table.column(EVENT_DATE) else {
        return DateTimeReport::default();
    };

    let invalid_event_date_count = cells
        .filter(|c| !c.is_empty() && !is_valid_event_date(c))
        .count();

    DateTimeReport {
        has_event_date_field: true,
        invalid_event_date_count,
    }
}
