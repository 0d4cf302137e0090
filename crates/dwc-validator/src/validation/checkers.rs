//! Field checkers: identifier, coordinates, numeric fields and vocabularies.
//!
//! Each checker is total over any table. It never aborts on a bad row; every
//! problem becomes an [`Issue`] and checking carries on.

use std::collections::BTreeSet;

use indexmap::IndexMap;
use tracing::{debug, warn};

use crate::input::{ColumnPresence, NumericParse, RecordTable};
use crate::report::{CoordinatesReport, VocabReport};
use crate::vocab::{DECIMAL_LATITUDE, DECIMAL_LONGITUDE, MatchPolicy, Vocabulary};

use super::issue::{Issue, IssueCode};

/// Output of a checker together with the issues it raised.
#[derive(Debug, Clone, PartialEq)]
pub struct Checked<T> {
    pub output: T,
    pub issues: Vec<Issue>,
}

impl<T> Checked<T> {
    fn new(output: T, issues: Vec<Issue>) -> Self {
        Self { output, issues }
    }
}

/// Trait for field checkers.
pub trait Checker {
    /// Summary produced alongside the issues.
    type Output;

    /// Run the check over a table.
    fn check(&self, table: &RecordTable) -> Checked<Self::Output>;
}

/// Summary of the identifier check.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IdentifierSummary {
    pub has_field: bool,
    /// Rows with an empty identifier.
    pub missing_value_count: usize,
    /// Rows whose identifier was already used by an earlier row.
    pub repeated_row_count: usize,
    /// Rows that cannot be published as they stand.
    pub record_error_count: usize,
}

/// Checks that every row has an identifier and that identifiers are unique.
pub struct IdentifierChecker<'a> {
    field: &'a str,
}

impl<'a> IdentifierChecker<'a> {
    pub fn new(field: &'a str) -> Self {
        Self { field }
    }
}

impl Checker for IdentifierChecker<'_> {
    type Output = IdentifierSummary;

    fn check(&self, table: &RecordTable) -> Checked<IdentifierSummary> {
        let Some(cells) = table.column(self.field) else {
            warn!(field = self.field, "identifier field not present");
            let issue = Issue::new(
                IssueCode::MissingIdField,
                self.field,
                format!("The {} field is not present", self.field),
            );
            let summary = IdentifierSummary {
                has_field: false,
                record_error_count: table.row_count(),
                ..Default::default()
            };
            return Checked::new(summary, vec![issue]);
        };

        let mut issues = Vec::new();
        let mut value_rows: IndexMap<String, Vec<usize>> = IndexMap::new();
        let mut missing_value_count = 0;

        for (row_idx, cell) in cells.enumerate() {
            match cell.as_text() {
                Some(value) => value_rows.entry(value).or_default().push(row_idx),
                None => {
                    missing_value_count += 1;
                    issues.push(
                        Issue::new(
                            IssueCode::MissingIdValue,
                            self.field,
                            format!("The {} field has no value", self.field),
                        )
                        .with_row(row_idx),
                    );
                }
            }
        }

        // One issue per duplicated value, reported at its first row
        let mut repeated_row_count = 0;
        for (value, rows) in value_rows.iter().filter(|(_, rows)| rows.len() > 1) {
            repeated_row_count += rows.len() - 1;
            issues.push(
                Issue::new(
                    IssueCode::DuplicateIdValue,
                    self.field,
                    format!("Value '{}' is used by {} records", value, rows.len()),
                )
                .with_row(rows[0])
                .with_value(value.clone()),
            );
        }

        debug!(
            field = self.field,
            missing = missing_value_count,
            repeated = repeated_row_count,
            "identifier check done"
        );

        let summary = IdentifierSummary {
            has_field: true,
            missing_value_count,
            repeated_row_count,
            record_error_count: missing_value_count + repeated_row_count,
        };
        Checked::new(summary, issues)
    }
}

/// Checks `decimalLatitude` and `decimalLongitude` are numbers within range.
pub struct CoordinateChecker;

impl CoordinateChecker {
    const LATITUDE_BOUND: f64 = 90.0;
    const LONGITUDE_BOUND: f64 = 180.0;

    /// Collect the rows of one coordinate column holding an invalid value.
    fn invalid_values(table: &RecordTable, field: &str, bound: f64) -> Vec<Issue> {
        let Some(cells) = table.column(field) else {
            return Vec::new();
        };

        cells
            .enumerate()
            .filter_map(|(row_idx, cell)| {
                let problem = match cell.parse_number() {
                    NumericParse::Empty => return None,
                    NumericParse::Number(n) if (-bound..=bound).contains(&n) => return None,
                    NumericParse::Number(_) => format!("out of range [-{bound}, {bound}]"),
                    NumericParse::NotNumeric => "not a number".to_string(),
                };
                let raw = cell.as_text().unwrap_or_default();
                Some(
                    Issue::new(
                        IssueCode::InvalidOrOutOfRangeCoordinates,
                        field,
                        format!("{} value '{}' is {}", field, raw, problem),
                    )
                    .with_row(row_idx)
                    .with_value(raw),
                )
            })
            .collect()
    }
}

impl Checker for CoordinateChecker {
    type Output = CoordinatesReport;

    fn check(&self, table: &RecordTable) -> Checked<CoordinatesReport> {
        if !table.has_column(DECIMAL_LATITUDE) && !table.has_column(DECIMAL_LONGITUDE) {
            debug!("no coordinate fields present");
            return Checked::new(CoordinatesReport::default(), Vec::new());
        }

        let latitude = Self::invalid_values(table, DECIMAL_LATITUDE, Self::LATITUDE_BOUND);
        let longitude = Self::invalid_values(table, DECIMAL_LONGITUDE, Self::LONGITUDE_BOUND);

        let report = CoordinatesReport {
            has_coordinates_fields: true,
            invalid_decimal_latitude_count: latitude.len(),
            invalid_decimal_longitude_count: longitude.len(),
        };

        // Interleave by row so the warnings read top to bottom
        let mut issues: Vec<Issue> = latitude.into_iter().chain(longitude).collect();
        issues.sort_by_key(|issue| issue.row);

        debug!(
            invalid_latitude = report.invalid_decimal_latitude_count,
            invalid_longitude = report.invalid_decimal_longitude_count,
            "coordinate check done"
        );
        Checked::new(report, issues)
    }
}

/// Checks that populated values of numeric fields parse as numbers.
pub struct NumericFieldChecker<'a> {
    fields: &'a [String],
}

impl<'a> NumericFieldChecker<'a> {
    pub fn new(fields: &'a [String]) -> Self {
        Self { fields }
    }
}

impl Checker for NumericFieldChecker<'_> {
    /// Non-numeric value count for each configured field that is present.
    type Output = IndexMap<String, usize>;

    fn check(&self, table: &RecordTable) -> Checked<IndexMap<String, usize>> {
        let mut counts = IndexMap::new();
        let mut issues = Vec::new();

        for field in self.fields {
            let Some(cells) = table.column(field) else {
                continue;
            };

            let before = issues.len();
            for (row_idx, cell) in cells.enumerate() {
                if cell.parse_number() == NumericParse::NotNumeric {
                    let raw = cell.as_text().unwrap_or_default();
                    issues.push(
                        Issue::new(
                            IssueCode::NonNumericValue,
                            field.as_str(),
                            format!("{} value '{}' is not a number", field, raw),
                        )
                        .with_row(row_idx)
                        .with_value(raw),
                    );
                }
            }

            let bad = issues.len() - before;
            if bad > 0 {
                debug!(field = %field, count = bad, "non-numeric values found");
            }
            counts.insert(field.clone(), bad);
        }

        Checked::new(counts, issues)
    }
}

/// Checks a controlled-vocabulary field against its accepted values.
pub struct VocabularyChecker<'a> {
    vocabulary: &'a Vocabulary,
    policy: MatchPolicy,
}

impl<'a> VocabularyChecker<'a> {
    pub fn new(vocabulary: &'a Vocabulary, policy: MatchPolicy) -> Self {
        Self { vocabulary, policy }
    }
}

impl Checker for VocabularyChecker<'_> {
    type Output = VocabReport;

    fn check(&self, table: &RecordTable) -> Checked<VocabReport> {
        let field = self.vocabulary.field.as_str();
        match table.presence(field) {
            // Vocabulary fields are optional
            ColumnPresence::Absent => return Checked::new(VocabReport::absent(field), Vec::new()),
            ColumnPresence::Empty => {
                debug!(field, "vocabulary field present but empty");
                let report = VocabReport {
                    has_field: true,
                    ..VocabReport::absent(field)
                };
                return Checked::new(report, Vec::new());
            }
            ColumnPresence::Populated => {}
        }
        let cells = table.column(field).into_iter().flatten();

        let mut recognised_count = 0;
        let mut unrecognised_count = 0;
        let mut non_matching_values = BTreeSet::new();

        for value in cells.filter_map(|c| c.as_text()) {
            if self.vocabulary.accepts(&value, self.policy) {
                recognised_count += 1;
            } else {
                unrecognised_count += 1;
                non_matching_values.insert(value);
            }
        }

        let mut issues = Vec::new();
        if unrecognised_count > 0 {
            let sample: Vec<&str> = non_matching_values.iter().take(3).map(String::as_str).collect();
            issues.push(Issue::new(
                IssueCode::UnrecognisedVocabularyValues,
                field,
                format!(
                    "{} records have a {} not in the vocabulary (e.g. {})",
                    unrecognised_count,
                    field,
                    sample.join(", ")
                ),
            ));
        }

        debug!(
            field,
            recognised = recognised_count,
            unrecognised = unrecognised_count,
            "vocabulary check done"
        );

        let report = VocabReport {
            field: field.to_string(),
            has_field: true,
            recognised_count,
            unrecognised_count,
            non_matching_values,
        };
        Checked::new(report, issues)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::CellValue;
    use crate::validation::Severity;

    fn make_table(headers: Vec<&str>, rows: Vec<Vec<&str>>) -> RecordTable {
        RecordTable::new(
            headers.into_iter().map(String::from).collect(),
            rows.into_iter()
                .map(|r| {
                    r.into_iter()
                        .map(|v| if v.is_empty() { CellValue::Missing } else { CellValue::from(v) })
                        .collect()
                })
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_identifier_absent() {
        let table = make_table(vec!["scientificName"], vec![vec!["Acacia"], vec!["Banksia"]]);
        let checked = IdentifierChecker::new("occurrenceID").check(&table);

        assert_eq!(checked.issues.len(), 1);
        assert_eq!(checked.issues[0].code, IssueCode::MissingIdField);
        assert!(!checked.output.has_field);
        assert_eq!(checked.output.record_error_count, 2);
    }

    #[test]
    fn test_identifier_unique() {
        let table = make_table(vec!["occurrenceID"], vec![vec!["a"], vec!["b"], vec!["c"]]);
        let checked = IdentifierChecker::new("occurrenceID").check(&table);

        assert!(checked.issues.is_empty());
        assert_eq!(checked.output.record_error_count, 0);
    }

    #[test]
    fn test_identifier_missing_values() {
        let table = make_table(vec!["occurrenceID"], vec![vec!["a"], vec![""], vec!["c"], vec![""]]);
        let checked = IdentifierChecker::new("occurrenceID").check(&table);

        let rows: Vec<_> = checked.issues.iter().map(|i| i.row).collect();
        assert_eq!(rows, vec![Some(1), Some(3)]);
        assert!(checked.issues.iter().all(|i| i.code == IssueCode::MissingIdValue));
        assert_eq!(checked.output.missing_value_count, 2);
    }

    #[test]
    fn test_identifier_duplicate_reported_once() {
        let table = make_table(
            vec!["occurrenceID"],
            vec![vec!["X"], vec!["Y"], vec!["X"], vec!["X"]],
        );
        let checked = IdentifierChecker::new("occurrenceID").check(&table);

        assert_eq!(checked.issues.len(), 1);
        let issue = &checked.issues[0];
        assert_eq!(issue.code, IssueCode::DuplicateIdValue);
        assert_eq!(issue.severity, Severity::Error);
        assert_eq!(issue.value.as_deref(), Some("X"));
        assert_eq!(issue.row, Some(0));
        assert_eq!(checked.output.repeated_row_count, 2);
    }

    #[test]
    fn test_coordinates_absent() {
        let table = make_table(vec!["occurrenceID"], vec![vec!["a"]]);
        let checked = CoordinateChecker.check(&table);

        assert_eq!(checked.output, CoordinatesReport::default());
        assert!(checked.issues.is_empty());
    }

    #[test]
    fn test_coordinates_out_of_range_and_non_numeric() {
        let table = make_table(
            vec!["decimalLatitude", "decimalLongitude"],
            vec![
                vec!["91", "10"],
                vec!["", ""],
                vec!["-90", "180"],
                vec!["-35.1", "east"],
                vec!["12", "-180.5"],
            ],
        );
        let checked = CoordinateChecker.check(&table);

        assert!(checked.output.has_coordinates_fields);
        assert_eq!(checked.output.invalid_decimal_latitude_count, 1);
        assert_eq!(checked.output.invalid_decimal_longitude_count, 2);

        let rows: Vec<_> = checked.issues.iter().map(|i| i.row.unwrap()).collect();
        assert_eq!(rows, vec![0, 3, 4]);
        assert!(checked.issues.iter().all(|i| i.severity == Severity::Warning));
    }

    #[test]
    fn test_coordinates_only_latitude_present() {
        let table = make_table(vec!["decimalLatitude"], vec![vec!["100"], vec!["45"]]);
        let checked = CoordinateChecker.check(&table);

        assert!(checked.output.has_coordinates_fields);
        assert_eq!(checked.output.invalid_decimal_latitude_count, 1);
        assert_eq!(checked.output.invalid_decimal_longitude_count, 0);
    }

    #[test]
    fn test_numeric_fields() {
        let fields = vec!["depth".to_string(), "elevation".to_string()];
        let table = make_table(
            vec!["depth", "individualCount"],
            vec![vec!["12.5", "many"], vec!["deep", "3"], vec!["", "2"]],
        );
        let checked = NumericFieldChecker::new(&fields).check(&table);

        assert_eq!(checked.issues.len(), 1);
        let issue = &checked.issues[0];
        assert_eq!(issue.field, "depth");
        assert_eq!(issue.row, Some(1));
        assert_eq!(issue.value.as_deref(), Some("deep"));
        assert_eq!(checked.output.get("depth"), Some(&1));
        assert!(!checked.output.contains_key("elevation"));
    }

    #[test]
    fn test_vocabulary_absent() {
        let vocab = Vocabulary::basis_of_record();
        let table = make_table(vec!["occurrenceID"], vec![vec!["a"]]);
        let checked = VocabularyChecker::new(&vocab, MatchPolicy::Exact).check(&table);

        assert_eq!(checked.output, VocabReport::absent("basisOfRecord"));
        assert!(checked.issues.is_empty());
    }

    #[test]
    fn test_vocabulary_empty_column() {
        let vocab = Vocabulary::geodetic_datum();
        let table = make_table(vec!["geodeticDatum"], vec![vec![""], vec!["  "]]);
        let checked = VocabularyChecker::new(&vocab, MatchPolicy::Exact).check(&table);

        assert!(checked.output.has_field);
        assert_eq!(checked.output.recognised_count, 0);
        assert_eq!(checked.output.unrecognised_count, 0);
        assert!(checked.output.non_matching_values.is_empty());
        assert!(checked.issues.is_empty());
    }

    #[test]
    fn test_vocabulary_counts() {
        let vocab = Vocabulary::basis_of_record();
        let table = make_table(
            vec!["basisOfRecord"],
            vec![
                vec!["HumanObservation"],
                vec!["NONSENSE"],
                vec![""],
                vec!["PreservedSpecimen"],
                vec!["NONSENSE"],
                vec!["humanobservation"],
            ],
        );
        let checked = VocabularyChecker::new(&vocab, MatchPolicy::Exact).check(&table);

        assert_eq!(checked.output.recognised_count, 2);
        assert_eq!(checked.output.unrecognised_count, 3);
        assert_eq!(
            checked.output.non_matching_values.iter().collect::<Vec<_>>(),
            vec!["NONSENSE", "humanobservation"]
        );
        assert_eq!(checked.issues.len(), 1);
        assert_eq!(checked.issues[0].code, IssueCode::UnrecognisedVocabularyValues);
    }

    #[test]
    fn test_vocabulary_case_insensitive() {
        let vocab = Vocabulary::basis_of_record();
        let table = make_table(vec!["basisOfRecord"], vec![vec!["humanobservation"]]);
        let checked = VocabularyChecker::new(&vocab, MatchPolicy::CaseInsensitive).check(&table);

        assert_eq!(checked.output.recognised_count, 1);
        assert!(checked.issues.is_empty());
    }
}
