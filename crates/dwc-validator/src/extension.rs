//! Checks for extension files attached to a core.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::input::RecordTable;
use crate::validator::{DatasetKind, column_counts, missing_columns};
use crate::vocab::{EMOF_COLUMNS, MULTIMEDIA_EVENT_COLUMNS, MULTIMEDIA_OCCURRENCE_COLUMNS};

/// Supported extension types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtensionKind {
    /// Simple multimedia (images, sound, video).
    Multimedia,
    /// Extended measurement or fact.
    #[serde(rename = "emof")]
    ExtendedMeasurementOrFact,
}

impl ExtensionKind {
    /// Columns the extension must have when attached to the given core.
    pub fn required_columns(&self, core: DatasetKind) -> &'static [&'static str] {
        match (self, core) {
            (ExtensionKind::Multimedia, DatasetKind::Occurrence) => MULTIMEDIA_OCCURRENCE_COLUMNS,
            (ExtensionKind::Multimedia, DatasetKind::Event) => MULTIMEDIA_EVENT_COLUMNS,
            (ExtensionKind::ExtendedMeasurementOrFact, _) => EMOF_COLUMNS,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ExtensionKind::Multimedia => "Multimedia",
            ExtensionKind::ExtendedMeasurementOrFact => "ExtendedMeasurementOrFact",
        }
    }
}

/// Result of checking an extension table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtensionReport {
    pub extension_type: ExtensionKind,
    pub record_count: usize,
    /// Required columns the table lacks, in required order.
    pub missing_columns: Vec<String>,
    pub all_required_columns_present: bool,
    pub column_counts: IndexMap<String, usize>,
}

/// Check an extension table for its required columns and summarise it.
pub fn validate_extension(
    table: &RecordTable,
    kind: ExtensionKind,
    core: DatasetKind,
) -> ExtensionReport {
    let missing_columns = missing_columns(table, kind.required_columns(core));

    debug!(
        extension = kind.label(),
        core = core.label(),
        missing = missing_columns.len(),
        "extension check done"
    );

    ExtensionReport {
        extension_type: kind,
        record_count: table.row_count(),
        all_required_columns_present: missing_columns.is_empty(),
        missing_columns,
        column_counts: column_counts(table),
    }
}
