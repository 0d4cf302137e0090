//! Value breakdowns for summarising a dataset.

use std::collections::BTreeMap;

use chrono::Datelike;
use indexmap::IndexMap;

use crate::datetime::parse_event_date;
use crate::input::RecordTable;
use crate::vocab::EVENT_DATE;

/// Value → record count for one field.
pub type Breakdown = IndexMap<String, usize>;

/// Breakdowns keyed by field name.
pub type Breakdowns = IndexMap<String, Breakdown>;

const TOP_VALUES_LIMIT: usize = 20;

/// Count the populated values of a field, most frequent first (ties by value).
pub fn value_counts(table: &RecordTable, field: &str, limit: Option<usize>) -> Breakdown {
    let Some(cells) = table.column(field) else {
        return Breakdown::new();
    };

    let mut counts: IndexMap<String, usize> = IndexMap::new();
    for value in cells.filter_map(|c| c.as_text()) {
        *counts.entry(value).or_default() += 1;
    }

    counts.sort_by(|va, ca, vb, cb| cb.cmp(ca).then_with(|| va.cmp(vb)));
    if let Some(limit) = limit {
        counts.truncate(limit);
    }
    counts
}

/// Year, month and day breakdowns derived from `eventDate`. Intervals count
/// by their start date; unparseable dates are skipped.
fn event_date_breakdowns(table: &RecordTable) -> (Breakdown, Breakdown, Breakdown) {
    let mut years: BTreeMap<i32, usize> = BTreeMap::new();
    let mut months: BTreeMap<u32, usize> = BTreeMap::new();
    let mut days: BTreeMap<u32, usize> = BTreeMap::new();

    if let Some(cells) = table.column(EVENT_DATE) {
        for value in cells.filter_map(|c| c.as_text()) {
            let start = value.split('/').next().unwrap_or_default();
            if let Some(date) = parse_event_date(start) {
                *years.entry(date.year()).or_default() += 1;
                *months.entry(date.month()).or_default() += 1;
                *days.entry(date.day()).or_default() += 1;
            }
        }
    }

    fn to_breakdown<K: ToString>(map: BTreeMap<K, usize>) -> Breakdown {
        map.into_iter().map(|(k, v)| (k.to_string(), v)).collect()
    }

    (to_breakdown(years), to_breakdown(months), to_breakdown(days))
}

/// Breakdowns of the temporal and taxonomic fields that are present.
///
/// `year`, `month` and `day` come from their own columns, or from `eventDate`
/// when that column exists. `scientificName` and `family` keep the 20 most
/// frequent values.
pub fn generate_breakdowns(table: &RecordTable) -> Breakdowns {
    let mut breakdowns = Breakdowns::new();

    if table.has_column(EVENT_DATE) {
        let (years, months, days) = event_date_breakdowns(table);
        breakdowns.insert("year".to_string(), years);
        breakdowns.insert("month".to_string(), months);
        breakdowns.insert("day".to_string(), days);
    } else {
        for field in ["year", "month", "day"] {
            if table.has_column(field) {
                breakdowns.insert(field.to_string(), value_counts(table, field, None));
            }
        }
    }

    for field in ["scientificName", "family"] {
        if table.has_column(field) {
            breakdowns.insert(
                field.to_string(),
                value_counts(table, field, Some(TOP_VALUES_LIMIT)),
            );
        }
    }

    breakdowns
}
