//! CLI argument definitions using clap.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use dwc_validator::{DatasetKind, ExtensionKind};

/// dwc-validator: pre-publication checks for Darwin Core tables
#[derive(Parser)]
#[command(name = "dwc-validator")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Validate an occurrence core
    Occurrence(CoreArgs),

    /// Validate an event core
    Event(CoreArgs),

    /// Validate a core, picking occurrence or event from its identifier column
    Validate(CoreArgs),

    /// Check an extension file for its required columns
    Extension {
        /// Path to the extension file (CSV/TSV)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Extension type
        #[arg(short, long)]
        kind: ExtensionChoice,

        /// Core the extension is attached to
        #[arg(long, default_value = "occurrence")]
        core: CoreChoice,

        /// Output as JSON
        #[arg(long)]
        json: bool,

        /// Field delimiter (default: auto-detect)
        #[arg(short, long, value_parser = parse_delimiter)]
        delimiter: Option<u8>,
    },
}

/// Arguments shared by the core validation commands.
#[derive(Args)]
pub struct CoreArgs {
    /// Path to the core file (CSV/TSV)
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Include year, month, day, scientificName and family breakdowns
    #[arg(long)]
    pub breakdowns: bool,

    /// JSON rule configuration
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Field delimiter (default: auto-detect)
    #[arg(short, long, value_parser = parse_delimiter)]
    pub delimiter: Option<u8>,
}

/// Accept a single ASCII character, or `tab` / `\t`.
fn parse_delimiter(s: &str) -> Result<u8, String> {
    match s {
        "tab" | "\\t" | "\t" => Ok(b'\t'),
        _ if s.len() == 1 && s.is_ascii() => Ok(s.as_bytes()[0]),
        _ => Err(format!("Delimiter must be a single ASCII character or 'tab', got '{}'", s)),
    }
}

#[derive(Clone, Copy, Debug)]
pub enum ExtensionChoice {
    Multimedia,
    Emof,
}

impl std::str::FromStr for ExtensionChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "multimedia" | "media" => Ok(ExtensionChoice::Multimedia),
            "emof" | "extended_measurement_or_fact" | "measurement_or_fact" => {
                Ok(ExtensionChoice::Emof)
            }
            _ => Err(format!("Unknown extension: {}. Use multimedia or emof.", s)),
        }
    }
}

impl std::fmt::Display for ExtensionChoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExtensionChoice::Multimedia => write!(f, "multimedia"),
            ExtensionChoice::Emof => write!(f, "emof"),
        }
    }
}

impl From<ExtensionChoice> for ExtensionKind {
    fn from(choice: ExtensionChoice) -> Self {
        match choice {
            ExtensionChoice::Multimedia => ExtensionKind::Multimedia,
            ExtensionChoice::Emof => ExtensionKind::ExtendedMeasurementOrFact,
        }
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub enum CoreChoice {
    #[default]
    Occurrence,
    Event,
}

impl std::str::FromStr for CoreChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "occurrence" | "occ" => Ok(CoreChoice::Occurrence),
            "event" => Ok(CoreChoice::Event),
            _ => Err(format!("Unknown core: {}. Use occurrence or event.", s)),
        }
    }
}

impl std::fmt::Display for CoreChoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CoreChoice::Occurrence => write!(f, "occurrence"),
            CoreChoice::Event => write!(f, "event"),
        }
    }
}

impl From<CoreChoice> for DatasetKind {
    fn from(choice: CoreChoice) -> Self {
        match choice {
            CoreChoice::Occurrence => DatasetKind::Occurrence,
            CoreChoice::Event => DatasetKind::Event,
        }
    }
}
