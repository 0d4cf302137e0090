//! Extension command - check an extension file's required columns.

use std::path::PathBuf;

use colored::Colorize;

use dwc_validator::{DatasetKind, ExtensionKind, validate_extension};

use super::build_parser;

pub fn run(
    file: PathBuf,
    kind: ExtensionKind,
    core: DatasetKind,
    json_output: bool,
    delimiter: Option<u8>,
    verbose: bool,
) -> Result<bool, Box<dyn std::error::Error>> {
    if !file.exists() {
        return Err(format!("File not found: {}", file.display()).into());
    }

    let (table, source) = build_parser(delimiter).parse_file(&file)?;
    let report = validate_extension(&table, kind, core);

    if json_output {
        let output = serde_json::json!({
            "source": source,
            "report": report,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(report.all_required_columns_present);
    }

    println!(
        "{} {} {}",
        "Checking".cyan().bold(),
        source.file.white(),
        format!("({} extension on {} core)", kind.label(), core).dimmed()
    );
    println!();
    println!("Records: {}", report.record_count.to_string().white().bold());

    if verbose {
        println!();
        println!("{}", "Columns:".yellow().bold());
        for (column, count) in &report.column_counts {
            println!("  {:32} {}", column, count);
        }
    }

    println!();
    if report.all_required_columns_present {
        println!("{}", "All required columns present.".green());
    } else {
        println!("{}", "Missing required columns:".red().bold());
        for column in &report.missing_columns {
            println!("  {}", column.red());
        }
    }

    Ok(report.all_required_columns_present)
}
