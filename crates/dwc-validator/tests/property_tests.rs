//! Property-based tests for the validator.
//!
//! These use proptest to generate random tables and check that the report
//! invariants hold for any input:
//! 1. **No panics**: every checker is total
//! 2. **Determinism**: the same table always gives the same report
//! 3. **Bounds**: no count exceeds the number of records
//!
//! ```bash
//! PROPTEST_CASES=10000 cargo test -p dwc-validator --test property_tests
//! ```

use proptest::prelude::*;

use dwc_validator::{
    CellValue, IssueCode, RecordTable, validate_event_dataframe, validate_occurrence_dataframe,
};

// =============================================================================
// Test Strategies
// =============================================================================

const COLUMNS: &[&str] = &[
    "occurrenceID",
    "eventID",
    "decimalLatitude",
    "decimalLongitude",
    "basisOfRecord",
    "geodeticDatum",
    "depth",
    "eventDate",
    "scientificName",
    "recordedBy",
];

/// Cells that look like what turns up in real Darwin Core files.
fn cell() -> impl Strategy<Value = CellValue> {
    prop_oneof![
        Just(CellValue::Missing),
        Just(CellValue::from("")),
        (-400.0f64..400.0).prop_map(CellValue::Number),
        (-400.0f64..400.0).prop_map(|n| CellValue::Text(format!("{n:.3}"))),
        "[A-Za-z0-9 :\\-]{0,12}".prop_map(CellValue::Text),
        prop::sample::select(vec!["HumanObservation", "WGS84", "X", "X", "nonsense"])
            .prop_map(CellValue::from),
    ]
}

/// A table with a random subset of columns and up to 30 rows.
fn table() -> impl Strategy<Value = RecordTable> {
    prop::sample::subsequence(COLUMNS.to_vec(), 0..=COLUMNS.len()).prop_flat_map(|columns| {
        let width = columns.len();
        prop::collection::vec(prop::collection::vec(cell(), width), 0..30).prop_map(move |rows| {
            RecordTable::new(columns.iter().map(|c| c.to_string()).collect(), rows)
                .expect("rows match header width")
        })
    })
}

/// A table whose identifier column is fully unique and populated.
fn unique_id_table() -> impl Strategy<Value = RecordTable> {
    prop::collection::vec(cell(), 1..30).prop_map(|latitudes| {
        let rows = latitudes
            .into_iter()
            .enumerate()
            .map(|(i, lat)| vec![CellValue::Text(format!("occ-{i}")), lat])
            .collect();
        RecordTable::new(vec!["occurrenceID".into(), "decimalLatitude".into()], rows)
            .expect("two cells per row")
    })
}

// =============================================================================
// Report Invariants
// =============================================================================

proptest! {
    /// Counts never exceed the number of records.
    #[test]
    fn counts_bounded_by_record_count(table in table()) {
        for report in [validate_occurrence_dataframe(&table), validate_event_dataframe(&table)] {
            let n = report.record_count;
            prop_assert_eq!(n, table.row_count());
            prop_assert!(report.record_error_count <= n);
            prop_assert!(report.coordinates_report.invalid_decimal_latitude_count <= n);
            prop_assert!(report.coordinates_report.invalid_decimal_longitude_count <= n);
            prop_assert!(report.records_with_taxonomy_count <= n);
            prop_assert!(report.records_with_temporal_count <= n);
            prop_assert!(report.records_with_recorded_by_count <= n);
            prop_assert!(report.datetime_report.invalid_event_date_count <= n);
            prop_assert_eq!(report.all_required_columns_present, report.missing_columns.is_empty());
            for vocab in &report.vocab_reports {
                prop_assert!(vocab.recognised_count + vocab.unrecognised_count <= n);
                prop_assert!(vocab.non_matching_values.len() <= vocab.unrecognised_count);
            }
            for count in report.column_counts.values() {
                prop_assert!(*count <= n);
            }
        }
    }

    /// Validating twice gives structurally identical reports.
    #[test]
    fn validation_is_idempotent(table in table()) {
        prop_assert_eq!(validate_occurrence_dataframe(&table), validate_occurrence_dataframe(&table));
        prop_assert_eq!(validate_event_dataframe(&table), validate_event_dataframe(&table));
    }

    /// A populated table without the identifier column gets exactly one
    /// missing-field error and no duplicate errors.
    #[test]
    fn missing_identifier_field_reported_once(table in table()) {
        prop_assume!(!table.has_column("occurrenceID") && table.row_count() > 0);
        let report = validate_occurrence_dataframe(&table);

        prop_assert_eq!(report.errors.len(), 1);
        prop_assert_eq!(report.errors[0].code, IssueCode::MissingIdField);
    }

    /// The same holds for event cores and `eventID`.
    #[test]
    fn missing_event_identifier_field_reported_once(table in table()) {
        prop_assume!(!table.has_column("eventID") && table.row_count() > 0);
        let report = validate_event_dataframe(&table);

        prop_assert_eq!(report.errors.len(), 1);
        prop_assert_eq!(report.errors[0].code, IssueCode::MissingIdField);
        prop_assert_eq!(report.errors[0].field.as_str(), "eventID");
        prop_assert_eq!(report.record_error_count, table.row_count());
    }

    /// Unique, populated identifiers never raise an error.
    #[test]
    fn unique_identifiers_are_clean(table in unique_id_table()) {
        let report = validate_occurrence_dataframe(&table);
        prop_assert!(report.errors.is_empty());
        prop_assert_eq!(report.record_error_count, 0);
    }

    /// Each duplicated identifier value produces exactly one error.
    #[test]
    fn duplicates_reported_once_per_value(table in table()) {
        prop_assume!(table.has_column("occurrenceID"));
        let report = validate_occurrence_dataframe(&table);

        let mut seen = std::collections::HashSet::new();
        for issue in report.errors.iter().filter(|e| e.code == IssueCode::DuplicateIdValue) {
            prop_assert!(seen.insert(issue.value.clone()));
        }
    }

    /// Tables without coordinate columns report no coordinate fields.
    #[test]
    fn no_coordinate_fields(table in table()) {
        prop_assume!(!table.has_column("decimalLatitude") && !table.has_column("decimalLongitude"));
        let report = validate_occurrence_dataframe(&table);

        prop_assert!(!report.coordinates_report.has_coordinates_fields);
        prop_assert_eq!(report.coordinates_report.invalid_decimal_latitude_count, 0);
        prop_assert_eq!(report.coordinates_report.invalid_decimal_longitude_count, 0);
    }
}
