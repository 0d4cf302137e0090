//! Validation report structures.

use std::collections::BTreeSet;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::validation::{Issue, Severity};
use crate::validator::DatasetKind;

/// Result of the coordinate range check.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoordinatesReport {
    /// At least one of `decimalLatitude` / `decimalLongitude` is present.
    pub has_coordinates_fields: bool,
    /// Present latitudes that are non-numeric or outside [-90, 90].
    pub invalid_decimal_latitude_count: usize,
    /// Present longitudes that are non-numeric or outside [-180, 180].
    pub invalid_decimal_longitude_count: usize,
}

/// Result of checking one controlled-vocabulary field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabReport {
    pub field: String,
    pub has_field: bool,
    pub recognised_count: usize,
    pub unrecognised_count: usize,
    /// Distinct unrecognised raw values, sorted.
    pub non_matching_values: BTreeSet<String>,
}

impl VocabReport {
    /// Report for a vocabulary field the table does not have.
    pub fn absent(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            has_field: false,
            recognised_count: 0,
            unrecognised_count: 0,
            non_matching_values: BTreeSet::new(),
        }
    }
}

/// Result of checking `eventDate` formatting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateTimeReport {
    pub has_event_date_field: bool,
    pub invalid_event_date_count: usize,
}

/// Everything found when validating one core table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub record_type: DatasetKind,
    pub record_count: usize,
    /// Rows without an identifier or repeating another row's identifier.
    pub record_error_count: usize,
    pub errors: Vec<Issue>,
    pub warnings: Vec<Issue>,
    /// Required columns the table lacks, in rule-set order.
    pub missing_columns: Vec<String>,
    pub all_required_columns_present: bool,
    pub coordinates_report: CoordinatesReport,
    /// Non-empty value count per column, in column order.
    pub column_counts: IndexMap<String, usize>,
    pub records_with_taxonomy_count: usize,
    pub records_with_temporal_count: usize,
    pub records_with_recorded_by_count: usize,
    pub vocab_reports: Vec<VocabReport>,
    pub datetime_report: DateTimeReport,
}

impl ValidationReport {
    /// Whether any publication-blocking issue was found.
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// All issues, errors first.
    pub fn issues(&self) -> impl Iterator<Item = &Issue> {
        self.errors.iter().chain(self.warnings.iter())
    }

    /// Number of issues of a given severity.
    pub fn count(&self, severity: Severity) -> usize {
        match severity {
            Severity::Error => self.errors.len(),
            Severity::Warning => self.warnings.len(),
        }
    }

    /// Look up the vocabulary report for a field.
    pub fn vocab_report(&self, field: &str) -> Option<&VocabReport> {
        self.vocab_reports.iter().find(|r| r.field == field)
    }
}
