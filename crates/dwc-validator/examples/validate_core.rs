//! Example: validate a Darwin Core core file and print its issues.
//!
//! Usage:
//!   cargo run --example validate_core -- <file_path>

use std::env;

use dwc_validator::{Parser, Validator};

fn main() -> dwc_validator::Result<()> {
    let Some(file_path) = env::args().nth(1) else {
        eprintln!("Usage: cargo run --example validate_core -- <file_path>");
        std::process::exit(1);
    };

    let (report, source) = Validator::new().validate_file(&file_path, None, &Parser::new())?;

    println!("{} ({} core, {} records)", source.file, report.record_type, report.record_count);
    for issue in report.issues() {
        println!("  {:?} {}", issue.severity, issue);
    }
    println!(
        "{} errors, {} warnings",
        report.errors.len(),
        report.warnings.len()
    );

    Ok(())
}
