//! Validate command - check an occurrence or event core.

use colored::{ColoredString, Colorize};
use serde::Serialize;
use tracing::info;

use dwc_validator::{
    Breakdowns, DatasetKind, Issue, Severity, SourceMetadata, ValidationReport, Validator,
    ValidatorConfig, generate_breakdowns,
};

use super::build_parser;
use crate::cli::CoreArgs;

/// Issues shown per severity in text output unless verbose.
const ISSUE_DISPLAY_LIMIT: usize = 20;

#[derive(Serialize)]
struct JsonOutput<'a> {
    source: &'a SourceMetadata,
    report: &'a ValidationReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    breakdowns: Option<&'a Breakdowns>,
}

pub fn run(
    args: CoreArgs,
    kind: Option<DatasetKind>,
    verbose: bool,
) -> Result<bool, Box<dyn std::error::Error>> {
    if !args.file.exists() {
        return Err(format!("File not found: {}", args.file.display()).into());
    }

    let validator = match &args.config {
        Some(path) => Validator::with_config(ValidatorConfig::from_file(path)?),
        None => Validator::new(),
    };

    let (table, source) = build_parser(args.delimiter).parse_file(&args.file)?;
    let report = match kind {
        Some(kind) => validator.validate(kind, &table),
        None => validator.validate_auto(&table),
    };
    let breakdowns = args.breakdowns.then(|| generate_breakdowns(&table));

    info!(
        file = %source.file,
        errors = report.errors.len(),
        warnings = report.warnings.len(),
        "validation finished"
    );

    if args.json {
        let output = JsonOutput {
            source: &source,
            report: &report,
            breakdowns: breakdowns.as_ref(),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print_report(&source, &report, verbose);
        if let Some(breakdowns) = &breakdowns {
            print_breakdowns(breakdowns);
        }
    }

    Ok(!report.has_errors())
}

fn print_report(source: &SourceMetadata, report: &ValidationReport, verbose: bool) {
    println!(
        "{} {} {}",
        "Validating".cyan().bold(),
        source.file.white(),
        format!("({} core, {})", report.record_type, source.format).dimmed()
    );
    println!();

    println!(
        "Records: {}  ({} with identifier errors)",
        report.record_count.to_string().white().bold(),
        report.record_error_count
    );

    if verbose {
        println!();
        println!("{}", "Columns:".yellow().bold());
        for (column, count) in &report.column_counts {
            println!("  {:32} {}", column, count);
        }
    }

    println!();
    println!("{}", "Coverage:".yellow().bold());
    println!("  {:32} {}", "taxonomy", report.records_with_taxonomy_count);
    println!("  {:32} {}", "temporal", report.records_with_temporal_count);
    println!("  {:32} {}", "recordedBy", report.records_with_recorded_by_count);

    if !report.missing_columns.is_empty() {
        println!();
        println!("{}", "Missing recommended columns:".yellow().bold());
        println!("  {}", report.missing_columns.join(", ").dimmed());
    }

    let coords = &report.coordinates_report;
    println!();
    println!("{}", "Coordinates:".yellow().bold());
    if coords.has_coordinates_fields {
        println!("  {:32} {}", "invalid decimalLatitude", coords.invalid_decimal_latitude_count);
        println!("  {:32} {}", "invalid decimalLongitude", coords.invalid_decimal_longitude_count);
    } else {
        println!("  {}", "no coordinate columns".dimmed());
    }

    println!();
    println!("{}", "Vocabularies:".yellow().bold());
    for vocab in &report.vocab_reports {
        if !vocab.has_field {
            println!("  {:32} {}", vocab.field, "absent".dimmed());
            continue;
        }
        println!(
            "  {:32} {} recognised, {} unrecognised",
            vocab.field,
            vocab.recognised_count.to_string().green(),
            vocab.unrecognised_count.to_string().yellow()
        );
        if !vocab.non_matching_values.is_empty() {
            let values: Vec<&str> = vocab.non_matching_values.iter().map(String::as_str).collect();
            println!("    {}", values.join(", ").dimmed());
        }
    }

    let dates = &report.datetime_report;
    if dates.has_event_date_field {
        println!();
        println!(
            "{} {} invalid eventDate values",
            "Dates:".yellow().bold(),
            dates.invalid_event_date_count
        );
    }

    println!();
    println!(
        "Found {} errors, {} warnings",
        report.errors.len().to_string().red().bold(),
        report.warnings.len().to_string().yellow().bold()
    );
    print_issues(&report.errors, Severity::Error, verbose);
    print_issues(&report.warnings, Severity::Warning, verbose);

    println!();
    if report.has_errors() {
        println!("{}", "Errors must be fixed before publishing.".red().bold());
    } else if report.warnings.is_empty() {
        println!("{}", "No issues found - data looks clean!".green());
    } else {
        println!("{}", "No errors. Review the warnings before publishing.".green());
    }
}

/// Lowercase, coloured severity label for issue lines.
fn severity_tag(severity: Severity) -> ColoredString {
    let label = severity.label().to_lowercase();
    match severity {
        Severity::Error => label.red().bold(),
        Severity::Warning => label.yellow().bold(),
    }
}

fn print_issues(issues: &[Issue], severity: Severity, verbose: bool) {
    let shown = if verbose { issues.len() } else { issues.len().min(ISSUE_DISPLAY_LIMIT) };
    let tag = severity_tag(severity);

    for issue in &issues[..shown] {
        println!("  {} {}", tag, issue);
    }

    if shown < issues.len() {
        println!(
            "  {}",
            format!("... {} more (use --verbose to show all)", issues.len() - shown).dimmed()
        );
    }
}

fn print_breakdowns(breakdowns: &Breakdowns) {
    println!();
    println!("{}", "Breakdowns:".yellow().bold());
    for (field, counts) in breakdowns {
        if counts.is_empty() {
            continue;
        }
        println!("  {}", field.white().bold());
        for (value, count) in counts {
            println!("    {:30} {}", value, count);
        }
    }
}
