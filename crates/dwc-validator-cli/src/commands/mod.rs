//! CLI command implementations.
//!
//! Each command returns `Ok(true)` when the checked file has no errors and
//! `Ok(false)` when it does; `Err` means the run itself failed.

pub mod extension;
pub mod validate;

use dwc_validator::{Parser, ParserConfig};

/// Parser for the given delimiter, or one that auto-detects.
fn build_parser(delimiter: Option<u8>) -> Parser {
    Parser::with_config(ParserConfig {
        delimiter,
        ..ParserConfig::default()
    })
}
