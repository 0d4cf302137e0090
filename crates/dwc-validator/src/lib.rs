//! dwc-validator: pre-publication checks for Darwin Core tables.
//!
//! Validates occurrence and event records against a fixed set of rules and
//! produces a report of errors (publication-blocking) and warnings
//! (should-fix):
//!
//! - **Identifiers**: `occurrenceID` / `eventID` present, populated and unique
//! - **Coordinates**: `decimalLatitude` / `decimalLongitude` numeric and in range
//! - **Numeric fields**: depth, elevation, counts and the like parse as numbers
//! - **Vocabularies**: `basisOfRecord` and `geodeticDatum` use accepted values
//!
//! # Example
//!
//! ```
//! use dwc_validator::{CellValue, RecordTable, validate_occurrence_dataframe};
//!
//! let table = RecordTable::new(
//!     vec!["occurrenceID".into(), "decimalLatitude".into()],
//!     vec![
//!         vec![CellValue::from("occ-1"), CellValue::from("-35.28")],
//!         vec![CellValue::from("occ-2"), CellValue::from("91")],
//!     ],
//! )
//! .unwrap();
//!
//! let report = validate_occurrence_dataframe(&table);
//! assert!(report.errors.is_empty());
//! assert_eq!(report.coordinates_report.invalid_decimal_latitude_count, 1);
//! ```

pub mod breakdown;
pub mod config;
pub mod datetime;
pub mod error;
pub mod extension;
pub mod input;
pub mod report;
pub mod validation;
pub mod vocab;

mod validator;

pub use crate::validator::{
    DatasetKind, Validator, column_counts, missing_columns, validate_event_dataframe,
    validate_occurrence_dataframe,
};
pub use breakdown::{Breakdown, Breakdowns, generate_breakdowns};
pub use config::{RuleSet, ValidatorConfig};
pub use error::{Result, ValidatorError};
pub use extension::{ExtensionKind, ExtensionReport, validate_extension};
pub use input::{CellValue, ColumnPresence, NumericParse, Parser, ParserConfig, RecordTable, SourceMetadata};
pub use report::{CoordinatesReport, DateTimeReport, ValidationReport, VocabReport};
pub use validation::{Issue, IssueCode, Severity};
pub use vocab::{MatchPolicy, Vocabulary};
