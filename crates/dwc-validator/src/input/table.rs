//! In-memory record table.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{Result, ValidatorError};

/// A single cell of a record table.
///
/// Deserializes untagged, so a JSON row like
/// `{"occurrenceID": "a1", "decimalLatitude": -35.2, "depth": null}` maps
/// directly onto cells.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    /// No value at all.
    #[default]
    Missing,
    /// A numeric value.
    Number(f64),
    /// A raw text value.
    Text(String),
}

/// Outcome of trying to read a cell as a number.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumericParse {
    /// Nothing to parse.
    Empty,
    /// A finite number.
    Number(f64),
    /// Present but not a finite number.
    NotNumeric,
}

impl CellValue {
    /// Whether the cell carries no data. Whitespace-only text and NaN count
    /// as empty.
    pub fn is_empty(&self) -> bool {
        match self {
            CellValue::Missing => true,
            CellValue::Number(n) => n.is_nan(),
            CellValue::Text(s) => s.trim().is_empty(),
        }
    }

    /// Try to read the cell as a finite number.
    pub fn parse_number(&self) -> NumericParse {
        match self {
            CellValue::Missing => NumericParse::Empty,
            CellValue::Number(n) if n.is_nan() => NumericParse::Empty,
            CellValue::Number(n) if n.is_finite() => NumericParse::Number(*n),
            CellValue::Number(_) => NumericParse::NotNumeric,
            CellValue::Text(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return NumericParse::Empty;
                }
                match trimmed.parse::<f64>() {
                    Ok(n) if n.is_finite() => NumericParse::Number(n),
                    _ => NumericParse::NotNumeric,
                }
            }
        }
    }

    /// Text form of the cell as it would appear in a report, or `None` if empty.
    pub fn as_text(&self) -> Option<String> {
        if self.is_empty() {
            return None;
        }
        match self {
            CellValue::Missing => None,
            CellValue::Number(n) => Some(n.to_string()),
            CellValue::Text(s) => Some(s.clone()),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(CellValue::Missing)
    }
}

/// How much data a column holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnPresence {
    /// The table has no such column.
    Absent,
    /// The column exists but every cell is empty.
    Empty,
    /// The column exists and at least one cell has data.
    Populated,
}

/// Ordered columns and rows of Darwin Core records.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RecordTable {
    /// Column names, in order.
    headers: Vec<String>,
    /// Row data (row-major, one cell per header).
    rows: Vec<Vec<CellValue>>,
}

impl RecordTable {
    /// Build a table from headers and positional rows.
    ///
    /// Column names must be unique and every row must have exactly one cell
    /// per header.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<CellValue>>) -> Result<Self> {
        for (i, name) in headers.iter().enumerate() {
            if headers[..i].contains(name) {
                return Err(ValidatorError::DuplicateColumn { name: name.clone() });
            }
        }

        let expected = headers.len();
        if let Some((row, cells)) = rows.iter().enumerate().find(|(_, r)| r.len() != expected) {
            return Err(ValidatorError::TableShape {
                row,
                expected,
                found: cells.len(),
            });
        }
        Ok(Self { headers, rows })
    }

    /// Build a table from rows keyed by column name.
    ///
    /// Columns are ordered by first appearance; a row lacking a column gets
    /// `Missing` for it.
    pub fn from_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = IndexMap<String, CellValue>>,
    {
        let records: Vec<_> = records.into_iter().collect();

        let mut headers: Vec<String> = Vec::new();
        for record in &records {
            for key in record.keys() {
                if !headers.contains(key) {
                    headers.push(key.clone());
                }
            }
        }

        let rows = records
            .into_iter()
            .map(|mut record| {
                headers
                    .iter()
                    .map(|h| record.swap_remove(h).unwrap_or_default())
                    .collect()
            })
            .collect();

        Self { headers, rows }
    }

    /// Column names, in order.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Get the number of columns.
    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// Get the number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Position of a column by name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Whether the table has a column with this name.
    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// All cells of a column, in row order, or `None` if the column is absent.
    pub fn column<'a>(&'a self, name: &str) -> Option<impl Iterator<Item = &'a CellValue> + use<'a>> {
        let index = self.column_index(name)?;
        Some(self.rows.iter().map(move |row| &row[index]))
    }

    /// Classify a column as absent, present but empty, or populated.
    pub fn presence(&self, name: &str) -> ColumnPresence {
        match self.column(name) {
            None => ColumnPresence::Absent,
            Some(mut cells) => {
                if cells.any(|c| !c.is_empty()) {
                    ColumnPresence::Populated
                } else {
                    ColumnPresence::Empty
                }
            }
        }
    }

    /// Count of non-empty cells in a column (0 if absent).
    pub fn populated_count(&self, name: &str) -> usize {
        self.column(name)
            .map(|cells| cells.filter(|c| !c.is_empty()).count())
            .unwrap_or(0)
    }

    /// Get a specific cell by row index and column name.
    pub fn get(&self, row: usize, name: &str) -> Option<&CellValue> {
        let index = self.column_index(name)?;
        self.rows.get(row).map(|r| &r[index])
    }

    /// Iterate over rows as cell slices.
    pub fn rows(&self) -> impl Iterator<Item = &[CellValue]> {
        self.rows.iter().map(|r| r.as_slice())
    }
}
