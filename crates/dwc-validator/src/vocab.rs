//! Darwin Core vocabularies and column groups.
//!
//! Controlled vocabularies are matched against raw cell values; the column
//! groups drive the per-category record counts and the numeric checks.

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

/// Identifier column of an occurrence core.
pub const OCCURRENCE_ID: &str = "occurrenceID";

/// Identifier column of an event core.
pub const EVENT_ID: &str = "eventID";

pub const DECIMAL_LATITUDE: &str = "decimalLatitude";
pub const DECIMAL_LONGITUDE: &str = "decimalLongitude";
pub const EVENT_DATE: &str = "eventDate";

/// Accepted values of `basisOfRecord`.
pub const BASIS_OF_RECORD: &[&str] = &[
    "PreservedSpecimen",
    "FossilSpecimen",
    "LivingSpecimen",
    "HumanObservation",
    "MachineObservation",
    "Observation",
    "MaterialSample",
    "Occurrence",
];

/// Accepted values of `geodeticDatum`: common datum names plus the EPSG codes
/// of the AMG, MGA and UTM zone projections.
pub const GEODETIC_DATUM: &[&str] = &[
    "WGS84", "NAD83", "ETRS89", "ITRF", "GDA94", "ED50", "NAD27", "AGD66", "AGD84",
    "EPSG:20248", "EPSG:20249", "EPSG:20250", "EPSG:20251", "EPSG:20252", "EPSG:20253",
    "EPSG:20254", "EPSG:20255", "EPSG:20256", "EPSG:20257", "EPSG:20258", "EPSG:20348",
    "EPSG:20349", "EPSG:20350", "EPSG:20351", "EPSG:20352", "EPSG:20353", "EPSG:20354",
    "EPSG:20355", "EPSG:20356", "EPSG:20357", "EPSG:20358", "EPSG:28348", "EPSG:28349",
    "EPSG:28350", "EPSG:28351", "EPSG:28352", "EPSG:28353", "EPSG:28354", "EPSG:28355",
    "EPSG:28356", "EPSG:28357", "EPSG:32601", "EPSG:32602", "EPSG:32603", "EPSG:32604",
    "EPSG:32605", "EPSG:32606", "EPSG:32607", "EPSG:32608", "EPSG:32609", "EPSG:32610",
    "EPSG:32611", "EPSG:32612", "EPSG:32613", "EPSG:32614", "EPSG:32615", "EPSG:32616",
    "EPSG:32617", "EPSG:32618", "EPSG:32619", "EPSG:32620", "EPSG:32621", "EPSG:32622",
    "EPSG:32623", "EPSG:32624", "EPSG:32625", "EPSG:32626", "EPSG:32627", "EPSG:32628",
    "EPSG:32629", "EPSG:32630", "EPSG:32631", "EPSG:32632", "EPSG:32633", "EPSG:32634",
    "EPSG:32635", "EPSG:32636", "EPSG:32637", "EPSG:32638", "EPSG:32639", "EPSG:32640",
    "EPSG:32641", "EPSG:32642", "EPSG:32643", "EPSG:32644", "EPSG:32645", "EPSG:32646",
    "EPSG:32647", "EPSG:32648", "EPSG:32649", "EPSG:32650", "EPSG:32651", "EPSG:32652",
    "EPSG:32653", "EPSG:32654", "EPSG:32655", "EPSG:32656", "EPSG:32657", "EPSG:32658",
    "EPSG:32659", "EPSG:32660", "EPSG:32701", "EPSG:32702", "EPSG:32703", "EPSG:32704",
    "EPSG:32705", "EPSG:32706", "EPSG:32707", "EPSG:32708", "EPSG:32709", "EPSG:32710",
    "EPSG:32711", "EPSG:32712", "EPSG:32713", "EPSG:32714", "EPSG:32715", "EPSG:32716",
    "EPSG:32717", "EPSG:32718", "EPSG:32719", "EPSG:32720", "EPSG:32721", "EPSG:32722",
    "EPSG:32723", "EPSG:32724", "EPSG:32725", "EPSG:32726", "EPSG:32727", "EPSG:32728",
    "EPSG:32729", "EPSG:32730", "EPSG:32731", "EPSG:32732", "EPSG:32733", "EPSG:32734",
    "EPSG:32735", "EPSG:32736", "EPSG:32737", "EPSG:32738", "EPSG:32739", "EPSG:32740",
    "EPSG:32741", "EPSG:32742", "EPSG:32743", "EPSG:32744", "EPSG:32745", "EPSG:32746",
    "EPSG:32747", "EPSG:32748", "EPSG:32749", "EPSG:32750", "EPSG:32751", "EPSG:32752",
    "EPSG:32753", "EPSG:32754", "EPSG:32755", "EPSG:32756", "EPSG:32757", "EPSG:32758",
    "EPSG:32759", "EPSG:32760",
];

/// Fields that must hold numbers when populated. The coordinate columns are
/// left out; they have their own range check.
pub const NUMERIC_FIELDS: &[&str] = &[
    "coordinateUncertaintyInMeters",
    "coordinatePrecision",
    "elevation",
    "depth",
    "minimumDepthInMeters",
    "maximumDepthInMeters",
    "minimumDistanceAboveSurfaceInMeters",
    "maximumDistanceAboveSurfaceInMeters",
    "individualCount",
    "organismQuantity",
    "organismSize",
    "sampleSizeValue",
    "temperatureInCelsius",
    "organismAge",
    "year",
    "month",
    "day",
    "startDayOfYear",
    "endDayOfYear",
];

pub const TAXONOMY_COLUMNS: &[&str] = &[
    "scientificName",
    "scientificNameID",
    "taxonID",
    "genus",
    "family",
    "order",
    "class",
    "phylum",
    "kingdom",
];

pub const TEMPORAL_COLUMNS: &[&str] = &["eventDate", "year", "month", "day"];

pub const RECORDED_BY_COLUMNS: &[&str] = &["recordedBy", "recordedByID"];

/// Columns every occurrence core is expected to carry.
pub const REQUIRED_OCCURRENCE_COLUMNS: &[&str] = &["basisOfRecord", "scientificName", "eventDate"];

/// Columns every event core is expected to carry.
pub const REQUIRED_EVENT_COLUMNS: &[&str] = &["eventID", "eventDate"];

/// Location columns expected on both core types.
pub const REQUIRED_SPATIAL_COLUMNS: &[&str] = &[
    "decimalLatitude",
    "decimalLongitude",
    "geodeticDatum",
    "coordinateUncertaintyInMeters",
];

/// Classification columns expected on occurrence cores.
pub const REQUIRED_TAXONOMY_COLUMNS: &[&str] = &[
    "scientificName",
    "genus",
    "family",
    "order",
    "class",
    "phylum",
    "kingdom",
];

/// Required columns of a multimedia extension attached to an occurrence core.
pub const MULTIMEDIA_OCCURRENCE_COLUMNS: &[&str] = &["occurrenceID", "identifier"];

/// Required columns of a multimedia extension attached to an event core.
pub const MULTIMEDIA_EVENT_COLUMNS: &[&str] = &["eventID", "occurrenceID", "identifier"];

/// Required columns of an extended measurement-or-fact extension.
pub const EMOF_COLUMNS: &[&str] = &[
    "eventID",
    "occurrenceID",
    "measurementID",
    "measurementType",
    "measurementValue",
    "measurementUnit",
    "measurementAccuracy",
];

/// How vocabulary values are compared with the accepted set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchPolicy {
    /// Byte-for-byte comparison.
    #[default]
    Exact,
    /// ASCII case-insensitive comparison, ignoring surrounding whitespace.
    CaseInsensitive,
}

/// A controlled vocabulary for one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vocabulary {
    /// The Darwin Core term the vocabulary applies to.
    pub field: String,
    /// Accepted values.
    pub accepted: IndexSet<String>,
}

impl Vocabulary {
    pub fn new<I, S>(field: impl Into<String>, accepted: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            field: field.into(),
            accepted: accepted.into_iter().map(Into::into).collect(),
        }
    }

    pub fn basis_of_record() -> Self {
        Self::new("basisOfRecord", BASIS_OF_RECORD.iter().copied())
    }

    pub fn geodetic_datum() -> Self {
        Self::new("geodeticDatum", GEODETIC_DATUM.iter().copied())
    }

    /// Whether a raw value belongs to the vocabulary under the given policy.
    pub fn accepts(&self, value: &str, policy: MatchPolicy) -> bool {
        match policy {
            MatchPolicy::Exact => self.accepted.contains(value),
            MatchPolicy::CaseInsensitive => {
                let value = value.trim();
                self.accepted.iter().any(|a| a.eq_ignore_ascii_case(value))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_match() {
        let vocab = Vocabulary::basis_of_record();
        assert!(vocab.accepts("HumanObservation", MatchPolicy::Exact));
        assert!(!vocab.accepts("humanobservation", MatchPolicy::Exact));
        assert!(!vocab.accepts(" HumanObservation", MatchPolicy::Exact));
    }

    #[test]
    fn test_case_insensitive_match() {
        let vocab = Vocabulary::basis_of_record();
        assert!(vocab.accepts("humanobservation", MatchPolicy::CaseInsensitive));
        assert!(vocab.accepts(" PRESERVEDSPECIMEN ", MatchPolicy::CaseInsensitive));
        assert!(!vocab.accepts("NONSENSE", MatchPolicy::CaseInsensitive));
    }

    #[test]
    fn test_geodetic_datum_codes() {
        let vocab = Vocabulary::geodetic_datum();
        assert!(vocab.accepts("WGS84", MatchPolicy::Exact));
        assert!(vocab.accepts("EPSG:28355", MatchPolicy::Exact));
        assert!(vocab.accepts("EPSG:32760", MatchPolicy::Exact));
        assert!(!vocab.accepts("EPSG:4326", MatchPolicy::Exact));
    }
}
