//! Rule-set configuration.
//!
//! The defaults reproduce the built-in Darwin Core rules. A JSON file can
//! replace the rule set of either dataset kind or switch vocabulary matching
//! to case-insensitive:
//!
//! ```json
//! {
//!   "match_policy": "case_insensitive",
//!   "occurrence": {
//!     "id_field": "catalogNumber",
//!     "numeric_fields": ["depth", "elevation"],
//!     "vocabularies": [{"field": "basisOfRecord", "accepted": ["PreservedSpecimen"]}]
//!   }
//! }
//! ```
//!
//! A rule set given in the file replaces the default one as a whole; list
//! fields it leaves out are empty.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ValidatorError};
use crate::validator::DatasetKind;
use crate::vocab::{
    self, MatchPolicy, Vocabulary, NUMERIC_FIELDS, RECORDED_BY_COLUMNS, REQUIRED_EVENT_COLUMNS,
    REQUIRED_OCCURRENCE_COLUMNS, REQUIRED_SPATIAL_COLUMNS, REQUIRED_TAXONOMY_COLUMNS,
    TAXONOMY_COLUMNS, TEMPORAL_COLUMNS,
};

fn owned(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

/// Concatenate column groups, keeping the first occurrence of each name.
fn merged(groups: &[&[&str]]) -> Vec<String> {
    let mut columns: Vec<String> = Vec::new();
    for name in groups.iter().flat_map(|g| g.iter()) {
        if !columns.iter().any(|c| c == name) {
            columns.push(name.to_string());
        }
    }
    columns
}

/// The rules applied to one kind of dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleSet {
    /// Column that must uniquely identify each record.
    pub id_field: String,
    /// Columns reported in `missing_columns` when the table lacks them.
    #[serde(default)]
    pub required_columns: Vec<String>,
    /// Fields whose populated values must be numbers.
    #[serde(default)]
    pub numeric_fields: Vec<String>,
    /// Controlled vocabularies, reported in this order.
    #[serde(default)]
    pub vocabularies: Vec<Vocabulary>,
    /// A record counts as having taxonomy if any of these is populated.
    #[serde(default)]
    pub taxonomy_columns: Vec<String>,
    /// A record counts as having temporal data if any of these is populated.
    #[serde(default)]
    pub temporal_columns: Vec<String>,
    /// A record counts as having a recorder if any of these is populated.
    #[serde(default)]
    pub recorded_by_columns: Vec<String>,
}

impl RuleSet {
    /// Rules for occurrence cores.
    pub fn occurrence() -> Self {
        Self {
            id_field: vocab::OCCURRENCE_ID.to_string(),
            required_columns: merged(&[
                REQUIRED_OCCURRENCE_COLUMNS,
                REQUIRED_SPATIAL_COLUMNS,
                REQUIRED_TAXONOMY_COLUMNS,
            ]),
            numeric_fields: owned(NUMERIC_FIELDS),
            vocabularies: vec![Vocabulary::basis_of_record(), Vocabulary::geodetic_datum()],
            taxonomy_columns: owned(TAXONOMY_COLUMNS),
            temporal_columns: owned(TEMPORAL_COLUMNS),
            recorded_by_columns: owned(RECORDED_BY_COLUMNS),
        }
    }

    /// Rules for event cores. Events carry no taxonomy.
    pub fn event() -> Self {
        Self {
            id_field: vocab::EVENT_ID.to_string(),
            required_columns: merged(&[REQUIRED_EVENT_COLUMNS, REQUIRED_SPATIAL_COLUMNS]),
            numeric_fields: owned(NUMERIC_FIELDS),
            vocabularies: vec![Vocabulary::geodetic_datum()],
            taxonomy_columns: Vec::new(),
            temporal_columns: owned(TEMPORAL_COLUMNS),
            recorded_by_columns: owned(RECORDED_BY_COLUMNS),
        }
    }

    fn validate(&self, kind: DatasetKind) -> Result<()> {
        if self.id_field.trim().is_empty() {
            return Err(ValidatorError::Config(format!(
                "{} rule set has an empty id_field",
                kind.label()
            )));
        }
        if let Some(v) = self.vocabularies.iter().find(|v| v.field.trim().is_empty()) {
            return Err(ValidatorError::Config(format!(
                "{} rule set has a vocabulary with an empty field name ({} accepted values)",
                kind.label(),
                v.accepted.len()
            )));
        }
        Ok(())
    }
}

/// Configuration for a [`crate::Validator`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidatorConfig {
    #[serde(default = "RuleSet::occurrence")]
    pub occurrence: RuleSet,
    #[serde(default = "RuleSet::event")]
    pub event: RuleSet,
    /// How vocabulary values are compared.
    #[serde(default)]
    pub match_policy: MatchPolicy,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            occurrence: RuleSet::occurrence(),
            event: RuleSet::event(),
            match_policy: MatchPolicy::default(),
        }
    }
}

impl ValidatorConfig {
    /// Rule set for a dataset kind.
    pub fn rules(&self, kind: DatasetKind) -> &RuleSet {
        match kind {
            DatasetKind::Occurrence => &self.occurrence,
            DatasetKind::Event => &self.event,
        }
    }

    /// Parse and check a JSON configuration.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.occurrence.validate(DatasetKind::Occurrence)?;
        config.event.validate(DatasetKind::Event)?;
        Ok(config)
    }

    /// Load a JSON configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|e| ValidatorError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_json_str(&json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rule_sets() {
        let config = ValidatorConfig::default();

        assert_eq!(config.occurrence.id_field, "occurrenceID");
        assert_eq!(config.event.id_field, "eventID");
        assert_eq!(config.occurrence.vocabularies.len(), 2);
        assert_eq!(config.event.vocabularies.len(), 1);
        assert!(config.event.taxonomy_columns.is_empty());
        assert_eq!(config.match_policy, MatchPolicy::Exact);
    }

    #[test]
    fn test_required_columns_merge_groups() {
        let occurrence = RuleSet::occurrence();
        assert_eq!(
            &occurrence.required_columns[..5],
            &["basisOfRecord", "scientificName", "eventDate", "decimalLatitude", "decimalLongitude"]
        );
        let scientific = occurrence
            .required_columns
            .iter()
            .filter(|c| *c == "scientificName")
            .count();
        assert_eq!(scientific, 1);
        assert!(occurrence.required_columns.iter().any(|c| c == "kingdom"));

        let event = RuleSet::event();
        assert_eq!(event.required_columns[0], "eventID");
        assert!(!event.required_columns.iter().any(|c| c == "basisOfRecord"));
    }

    #[test]
    fn test_empty_json_is_default() {
        let config = ValidatorConfig::from_json_str("{}").unwrap();
        assert_eq!(config, ValidatorConfig::default());
    }

    #[test]
    fn test_partial_json() {
        let config = ValidatorConfig::from_json_str(
            r#"{"match_policy": "case_insensitive", "occurrence": {"id_field": "catalogNumber"}}"#,
        )
        .unwrap();

        assert_eq!(config.match_policy, MatchPolicy::CaseInsensitive);
        assert_eq!(config.occurrence.id_field, "catalogNumber");
        assert!(config.occurrence.vocabularies.is_empty());
        assert_eq!(config.event, RuleSet::event());
    }

    #[test]
    fn test_empty_id_field_rejected() {
        let err = ValidatorConfig::from_json_str(r#"{"event": {"id_field": " "}}"#).unwrap_err();
        assert!(matches!(err, ValidatorError::Config(_)));
    }

    #[test]
    fn test_malformed_json_rejected() {
        let err = ValidatorConfig::from_json_str("{not json").unwrap_err();
        assert!(matches!(err, ValidatorError::Json(_)));
    }
}
