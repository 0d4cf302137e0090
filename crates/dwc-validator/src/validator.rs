//! Dataset selection and report aggregation.

use std::fmt;
use std::path::Path;

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::{RuleSet, ValidatorConfig};
use crate::datetime::create_datetime_report;
use crate::error::Result;
use crate::input::{Parser, RecordTable, SourceMetadata};
use crate::report::ValidationReport;
use crate::validation::{
    Checker, CoordinateChecker, IdentifierChecker, Issue, NumericFieldChecker, Severity,
    VocabularyChecker,
};
use crate::vocab::{EVENT_ID, OCCURRENCE_ID};

/// The two Darwin Core record types this crate validates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DatasetKind {
    Occurrence,
    Event,
}

impl DatasetKind {
    /// Column that identifies a record of this kind.
    pub fn id_field(&self) -> &'static str {
        match self {
            DatasetKind::Occurrence => OCCURRENCE_ID,
            DatasetKind::Event => EVENT_ID,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DatasetKind::Occurrence => "Occurrence",
            DatasetKind::Event => "Event",
        }
    }

    /// Pick the kind from the identifier column present: `eventID` means an
    /// event core, anything else is treated as occurrences.
    pub fn detect(table: &RecordTable) -> Self {
        if table.has_column(EVENT_ID) {
            DatasetKind::Event
        } else {
            DatasetKind::Occurrence
        }
    }

    /// Map a Darwin Core row type, e.g. `http://rs.tdwg.org/dwc/terms/Event`.
    pub fn from_row_type(row_type: &str) -> Option<Self> {
        let name = row_type.rsplit('/').next().unwrap_or(row_type);
        match name {
            "Occurrence" => Some(DatasetKind::Occurrence),
            "Event" => Some(DatasetKind::Event),
            _ => None,
        }
    }
}

impl fmt::Display for DatasetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Non-empty value count per column, in column order.
pub fn column_counts(table: &RecordTable) -> IndexMap<String, usize> {
    table
        .headers()
        .iter()
        .map(|h| (h.clone(), table.populated_count(h)))
        .collect()
}

/// Required columns the table lacks, in the order given.
pub fn missing_columns<S: AsRef<str>>(table: &RecordTable, required: &[S]) -> Vec<String> {
    required
        .iter()
        .map(AsRef::as_ref)
        .filter(|c| !table.has_column(c))
        .map(str::to_string)
        .collect()
}

/// Rows where at least one of the given columns is populated.
fn records_with_any(table: &RecordTable, columns: &[String]) -> usize {
    let indices: Vec<usize> = columns.iter().filter_map(|c| table.column_index(c)).collect();
    if indices.is_empty() {
        debug!(?columns, "none of the columns are present");
        return 0;
    }

    table
        .rows()
        .filter(|row| indices.iter().any(|&i| !row[i].is_empty()))
        .count()
}

/// Runs the rule set of a dataset kind over a table.
#[derive(Debug, Clone, Default)]
pub struct Validator {
    config: ValidatorConfig,
}

static DEFAULT_VALIDATOR: Lazy<Validator> = Lazy::new(Validator::new);

impl Validator {
    /// Create a validator with the built-in rules.
    pub fn new() -> Self {
        Self::with_config(ValidatorConfig::default())
    }

    /// Create a validator with custom rules.
    pub fn with_config(config: ValidatorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Validate a table as the given kind of dataset.
    pub fn validate(&self, kind: DatasetKind, table: &RecordTable) -> ValidationReport {
        let rules = self.config.rules(kind);
        let record_count = table.row_count();

        // Nothing to publish, nothing to report
        if record_count == 0 {
            debug!(kind = kind.label(), "empty table");
            return self.empty_report(kind, table, rules);
        }

        let mut issues: Vec<Issue> = Vec::new();

        let identifier = IdentifierChecker::new(&rules.id_field).check(table);
        issues.extend(identifier.issues);

        let coordinates = CoordinateChecker.check(table);
        issues.extend(coordinates.issues);

        let numeric = NumericFieldChecker::new(&rules.numeric_fields).check(table);
        issues.extend(numeric.issues);

        let mut vocab_reports = Vec::with_capacity(rules.vocabularies.len());
        for vocabulary in &rules.vocabularies {
            let checked = VocabularyChecker::new(vocabulary, self.config.match_policy).check(table);
            issues.extend(checked.issues);
            vocab_reports.push(checked.output);
        }

        let (errors, warnings): (Vec<Issue>, Vec<Issue>) =
            issues.into_iter().partition(|i| i.severity == Severity::Error);

        info!(
            kind = kind.label(),
            records = record_count,
            errors = errors.len(),
            warnings = warnings.len(),
            "validated table"
        );

        let missing_columns = missing_columns(table, &rules.required_columns);
        if !missing_columns.is_empty() {
            debug!(kind = kind.label(), missing = ?missing_columns, "required columns absent");
        }

        ValidationReport {
            record_type: kind,
            record_count,
            record_error_count: identifier.output.record_error_count,
            errors,
            warnings,
            all_required_columns_present: missing_columns.is_empty(),
            missing_columns,
            coordinates_report: coordinates.output,
            column_counts: column_counts(table),
            records_with_taxonomy_count: records_with_any(table, &rules.taxonomy_columns),
            records_with_temporal_count: records_with_any(table, &rules.temporal_columns),
            records_with_recorded_by_count: records_with_any(table, &rules.recorded_by_columns),
            vocab_reports,
            datetime_report: create_datetime_report(table),
        }
    }

    /// Validate a table, choosing the dataset kind from its identifier column.
    pub fn validate_auto(&self, table: &RecordTable) -> ValidationReport {
        let kind = DatasetKind::detect(table);
        debug!(kind = kind.label(), "selected dataset kind");
        self.validate(kind, table)
    }

    /// Read a delimited core file and validate it. Without an explicit kind
    /// the kind is detected from the identifier column.
    pub fn validate_file(
        &self,
        path: impl AsRef<Path>,
        kind: Option<DatasetKind>,
        parser: &Parser,
    ) -> Result<(ValidationReport, SourceMetadata)> {
        let (table, source) = parser.parse_file(path)?;
        let report = match kind {
            Some(kind) => self.validate(kind, &table),
            None => self.validate_auto(&table),
        };
        Ok((report, source))
    }

    /// Report for a zero-row table: column presence is still described, but
    /// every count is zero and no issues are raised.
    fn empty_report(&self, kind: DatasetKind, table: &RecordTable, rules: &RuleSet) -> ValidationReport {
        let vocab_reports = rules
            .vocabularies
            .iter()
            .map(|v| VocabularyChecker::new(v, self.config.match_policy).check(table).output)
            .collect();
        let missing = missing_columns(table, &rules.required_columns);

        ValidationReport {
            record_type: kind,
            record_count: 0,
            record_error_count: 0,
            errors: Vec::new(),
            warnings: Vec::new(),
            all_required_columns_present: missing.is_empty(),
            missing_columns: missing,
            coordinates_report: CoordinateChecker.check(table).output,
            column_counts: column_counts(table),
            records_with_taxonomy_count: 0,
            records_with_temporal_count: 0,
            records_with_recorded_by_count: 0,
            vocab_reports,
            datetime_report: create_datetime_report(table),
        }
    }
}

/// Validate an occurrence table with the built-in rules.
pub fn validate_occurrence_dataframe(table: &RecordTable) -> ValidationReport {
    DEFAULT_VALIDATOR.validate(DatasetKind::Occurrence, table)
}

/// Validate an event table with the built-in rules.
pub fn validate_event_dataframe(table: &RecordTable) -> ValidationReport {
    DEFAULT_VALIDATOR.validate(DatasetKind::Event, table)
}
