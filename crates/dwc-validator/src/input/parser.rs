//! Delimited core-file reader with delimiter detection.

use std::fs;
use std::io::{BufRead, BufReader};
use std::path::Path;

use sha2::{Digest, Sha256};
use tracing::debug;

use super::source::SourceMetadata;
use super::table::{CellValue, RecordTable};
use crate::error::{Result, ValidatorError};

/// Delimiters to try when auto-detecting. Darwin Core archives are usually
/// tab-separated, so tab comes first.
const DELIMITERS: &[u8] = &[b'\t', b',', b';', b'|'];

const ZIP_MAGIC: &[u8] = b"PK\x03\x04";

/// Parser configuration.
#[derive(Debug, Clone)]
pub struct ParserConfig {
    /// Delimiter to use (None = auto-detect).
    pub delimiter: Option<u8>,
    /// Maximum rows to read (None = all).
    pub max_rows: Option<usize>,
    /// Quote character.
    pub quote: u8,
    /// Cell contents (after trimming) read as a missing value.
    pub null_values: Vec<String>,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            delimiter: None,
            max_rows: None,
            quote: b'"',
            null_values: ["NULL", "null", "NaN", "nan", "N/A", "n/a"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

/// Reads delimited Darwin Core core files into a [`RecordTable`].
pub struct Parser {
    config: ParserConfig,
}

impl Parser {
    /// Create a new parser with default configuration.
    pub fn new() -> Self {
        Self {
            config: ParserConfig::default(),
        }
    }

    /// Create a parser with custom configuration.
    pub fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    /// Parse a file and return the record table and its metadata.
    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<(RecordTable, SourceMetadata)> {
        let path = path.as_ref();

        let contents = fs::read(path).map_err(|e| ValidatorError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        // Darwin Core Archives are zipped; only their extracted text files are read here
        if contents.starts_with(ZIP_MAGIC) {
            return Err(ValidatorError::UnsupportedFormat(format!(
                "{} is a zip archive; extract the core file first",
                path.display()
            )));
        }

        let mut hasher = Sha256::new();
        hasher.update(&contents);
        let hash = format!("sha256:{:x}", hasher.finalize());

        let delimiter = match self.config.delimiter {
            Some(d) => d,
            None => detect_delimiter(&contents)?,
        };

        let table = self.parse_bytes(&contents, delimiter)?;

        let format = match delimiter {
            b'\t' => "tsv",
            b',' => "csv",
            b';' => "csv-semicolon",
            b'|' => "psv",
            _ => "delimited",
        }
        .to_string();

        debug!(
            file = %path.display(),
            format = %format,
            rows = table.row_count(),
            columns = table.column_count(),
            "parsed core file"
        );

        let metadata = SourceMetadata::new(
            path.to_path_buf(),
            hash,
            contents.len() as u64,
            format,
            table.row_count(),
            table.column_count(),
        );

        Ok((table, metadata))
    }

    /// Parse bytes with a known delimiter.
    pub fn parse_bytes(&self, bytes: &[u8], delimiter: u8) -> Result<RecordTable> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(true)
            .quote(self.config.quote)
            .flexible(true)
            .from_reader(bytes);

        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|s| s.trim().to_string())
            .collect();

        if headers.iter().all(|h| h.is_empty()) {
            return Err(ValidatorError::EmptyData("No columns found".to_string()));
        }

        let expected_cols = headers.len();
        let mut rows = Vec::new();

        for (row_idx, result) in reader.records().enumerate() {
            if let Some(max) = self.config.max_rows {
                if row_idx >= max {
                    break;
                }
            }

            let record = result?;
            let mut row: Vec<CellValue> = record.iter().map(|s| self.cell(s)).collect();

            // Ragged lines are tolerated in files: pad or cut to the header width
            row.resize(expected_cols, CellValue::Missing);
            rows.push(row);
        }

        RecordTable::new(headers, rows)
    }

    fn cell(&self, raw: &str) -> CellValue {
        let trimmed = raw.trim();
        if trimmed.is_empty() || self.config.null_values.iter().any(|n| n == trimmed) {
            CellValue::Missing
        } else {
            CellValue::Text(raw.to_string())
        }
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

/// Detect the delimiter by analyzing the first few lines.
fn detect_delimiter(bytes: &[u8]) -> Result<u8> {
    let lines: Vec<String> = BufReader::new(bytes)
        .lines()
        .take(10)
        .filter_map(|l| l.ok())
        .filter(|l| !l.trim().is_empty())
        .collect();

    if lines.is_empty() {
        return Err(ValidatorError::EmptyData("No lines to analyze".to_string()));
    }

    let mut best_delimiter = b'\t';
    let mut best_score = 0;

    for &delim in DELIMITERS {
        let counts: Vec<usize> = lines
            .iter()
            .map(|line| count_delimiter_in_line(line, delim))
            .collect();

        let first_count = counts[0];
        if first_count == 0 {
            continue;
        }

        // Prefer delimiters that split every line into the same number of fields
        let consistent = counts.iter().all(|&c| c == first_count);
        let score = if consistent {
            first_count * 1000
        } else {
            first_count
        };

        if score > best_score {
            best_score = score;
            best_delimiter = delim;
        }
    }

    Ok(best_delimiter)
}

/// Count delimiter occurrences in a line, respecting quotes.
fn count_delimiter_in_line(line: &str, delimiter: u8) -> usize {
    let delim_char = delimiter as char;
    let mut count = 0;
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            c if c == delim_char && !in_quotes => count += 1,
            _ => {}
        }
    }

    count
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_delimiter_csv() {
        let data = b"occurrenceID,decimalLatitude\n1,-35.2\n2,-36.1";
        assert_eq!(detect_delimiter(data).unwrap(), b',');
    }

    #[test]
    fn test_detect_delimiter_tsv() {
        let data = b"occurrenceID\tdecimalLatitude\n1\t-35.2\n2\t-36.1";
        assert_eq!(detect_delimiter(data).unwrap(), b'\t');
    }

    #[test]
    fn test_detect_delimiter_empty() {
        assert!(matches!(
            detect_delimiter(b"\n\n"),
            Err(ValidatorError::EmptyData(_))
        ));
    }

    #[test]
    fn test_parse_csv() {
        let parser = Parser::new();
        let data = b"occurrenceID,scientificName,depth\na1,Eucalyptus regnans,12\na2,,NaN";
        let table = parser.parse_bytes(data, b',').unwrap();

        assert_eq!(table.headers(), &["occurrenceID", "scientificName", "depth"]);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.get(0, "depth"), Some(&CellValue::from("12")));
        assert_eq!(table.get(1, "scientificName"), Some(&CellValue::Missing));
        assert_eq!(table.get(1, "depth"), Some(&CellValue::Missing));
    }

    #[test]
    fn test_parse_pads_short_rows() {
        let parser = Parser::new();
        let data = b"occurrenceID,basisOfRecord\na1\n";
        let table = parser.parse_bytes(data, b',').unwrap();

        assert_eq!(table.get(0, "basisOfRecord"), Some(&CellValue::Missing));
    }

    #[test]
    fn test_header_only_is_empty_table() {
        let parser = Parser::new();
        let table = parser.parse_bytes(b"occurrenceID,eventDate\n", b',').unwrap();

        assert_eq!(table.row_count(), 0);
        assert_eq!(table.column_count(), 2);
    }

    #[test]
    fn test_duplicate_header_rejected() {
        let parser = Parser::new();
        let result = parser.parse_bytes(b"occurrenceID,depth,depth\na1,3,deep\n", b',');

        assert!(matches!(
            result,
            Err(ValidatorError::DuplicateColumn { ref name }) if name == "depth"
        ));
    }

    #[test]
    fn test_max_rows() {
        let parser = Parser::with_config(ParserConfig {
            max_rows: Some(1),
            ..Default::default()
        });
        let table = parser.parse_bytes(b"id\na\nb\nc\n", b',').unwrap();

        assert_eq!(table.row_count(), 1);
    }
}
