//! dwc-validator CLI - pre-publication checks for Darwin Core tables.

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};
use dwc_validator::DatasetKind;
use tracing_subscriber::{EnvFilter, fmt};

fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Occurrence(args) => {
            commands::validate::run(args, Some(DatasetKind::Occurrence), cli.verbose)
        }
        Commands::Event(args) => commands::validate::run(args, Some(DatasetKind::Event), cli.verbose),
        Commands::Validate(args) => commands::validate::run(args, None, cli.verbose),
        Commands::Extension {
            file,
            kind,
            core,
            json,
            delimiter,
        } => commands::extension::run(file, kind.into(), core.into(), json, delimiter, cli.verbose),
    };

    match result {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(2);
        }
    }
}
