//! Field checkers and the issues they raise.

mod checkers;
mod issue;

pub use checkers::{
    Checked, Checker, CoordinateChecker, IdentifierChecker, IdentifierSummary,
    NumericFieldChecker, VocabularyChecker,
};
pub use issue::{Issue, IssueCode, Severity};
