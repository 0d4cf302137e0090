//! Error and warning descriptors.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Machine-readable kind of issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IssueCode {
    /// The identifier column is not in the table.
    MissingIdField,
    /// A row has no identifier value.
    MissingIdValue,
    /// An identifier value is used by more than one row.
    DuplicateIdValue,
    /// A coordinate is non-numeric or outside its valid range.
    InvalidOrOutOfRangeCoordinates,
    /// A numeric field holds something that is not a number.
    NonNumericValue,
    /// A controlled-vocabulary field holds values outside the vocabulary.
    UnrecognisedVocabularyValues,
}

impl IssueCode {
    /// Severity implied by the code. Identifier problems block publication;
    /// everything else should be fixed but does not.
    pub fn severity(&self) -> Severity {
        match self {
            IssueCode::MissingIdField | IssueCode::MissingIdValue | IssueCode::DuplicateIdValue => {
                Severity::Error
            }
            IssueCode::InvalidOrOutOfRangeCoordinates
            | IssueCode::NonNumericValue
            | IssueCode::UnrecognisedVocabularyValues => Severity::Warning,
        }
    }

    /// Get a human-readable label for the code.
    pub fn label(&self) -> &'static str {
        match self {
            IssueCode::MissingIdField => "Missing identifier field",
            IssueCode::MissingIdValue => "Missing identifier value",
            IssueCode::DuplicateIdValue => "Duplicate identifier value",
            IssueCode::InvalidOrOutOfRangeCoordinates => "Invalid coordinate",
            IssueCode::NonNumericValue => "Non-numeric value",
            IssueCode::UnrecognisedVocabularyValues => "Unrecognised vocabulary values",
        }
    }
}

/// Severity level of an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Should be fixed before publishing.
    Warning,
    /// Blocks publication.
    Error,
}

impl Severity {
    /// Get a human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Warning => "Warning",
            Severity::Error => "Error",
        }
    }
}

/// A single problem found in a table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    pub code: IssueCode,
    pub severity: Severity,
    /// Column the issue concerns.
    pub field: String,
    /// Zero-based row index, for row-level issues.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub row: Option<usize>,
    /// The offending raw value.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub value: Option<String>,
    /// Human-readable description.
    pub message: String,
}

impl Issue {
    /// Create an issue; severity follows from the code.
    pub fn new(code: IssueCode, field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code,
            severity: code.severity(),
            field: field.into(),
            row: None,
            value: None,
            message: message.into(),
        }
    }

    /// Set the row index.
    pub fn with_row(mut self, row: usize) -> Self {
        self.row = Some(row);
        self
    }

    /// Set the offending value.
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.row {
            Some(row) => write!(f, "[{}] row {}: {}", self.field, row, self.message),
            None => write!(f, "[{}] {}", self.field, self.message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_from_code() {
        let issue = Issue::new(IssueCode::DuplicateIdValue, "occurrenceID", "dup");
        assert_eq!(issue.severity, Severity::Error);

        let issue = Issue::new(IssueCode::NonNumericValue, "depth", "bad");
        assert_eq!(issue.severity, Severity::Warning);
    }

    #[test]
    fn test_serialized_shape() {
        let issue = Issue::new(IssueCode::MissingIdValue, "occurrenceID", "no value").with_row(4);
        let json = serde_json::to_value(&issue).unwrap();

        assert_eq!(json["code"], "MISSING_ID_VALUE");
        assert_eq!(json["severity"], "error");
        assert_eq!(json["row"], 4);
        assert!(json.get("value").is_none());
    }

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Warning < Severity::Error);
    }
}
