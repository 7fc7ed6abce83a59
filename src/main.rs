//! pcb-schema: validate and normalise PCB element records
//!
//! Reads a JSON record or an array of records, validates every one, and
//! writes the canonical records to stdout.

use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use serde_json::Value;
use tracing::{error, info, Level};
use tracing_subscriber::EnvFilter;

use pcb_schema::config;
use pcb_schema::Validator;

/// Validate and normalise PCB element records.
///
/// Missing identifiers are generated and distances are converted to
/// millimetres. Every invalid record is reported, not just the first.
#[derive(Parser, Debug)]
#[command(name = "pcb-schema")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON file with one record or an array of records (stdin if omitted or "-")
    #[arg(value_name = "INPUT")]
    input: Option<PathBuf>,

    /// Path to configuration file
    #[arg(short, long, value_name = "CONFIG_FILE")]
    config: Option<PathBuf>,

    /// Pretty-print the output
    #[arg(short, long)]
    pretty: bool,

    /// Increase logging verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Decrease logging verbosity (only show errors)
    #[arg(short, long)]
    quiet: bool,
}

/// Determines the log level from CLI arguments.
#[allow(clippy::match_same_arms)] // Explicit "warn" arm for clarity
fn get_log_level(verbose: u8, quiet: bool, config_level: &str) -> Level {
    if quiet {
        return Level::ERROR;
    }

    match verbose {
        0 => match config_level.to_lowercase().as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "info" => Level::INFO,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::WARN, // Default to warn for unknown levels
        },
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Initialises the tracing subscriber for logging.
fn init_tracing(level: Level) {
    let filter = EnvFilter::from_default_env().add_directive(level.into());

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Reads the whole input document from a file or stdin.
fn read_input(input: Option<&PathBuf>) -> std::io::Result<String> {
    match input {
        Some(path) if path.as_os_str() != "-" => std::fs::read_to_string(path),
        _ => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            Ok(buffer)
        }
    }
}

/// Entry point for the pcb-schema tool.
fn main() -> ExitCode {
    let args = Args::parse();

    // Load configuration
    let cfg = match config::load_config(args.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            return ExitCode::FAILURE;
        }
    };

    // Initialise logging
    let log_level = get_log_level(args.verbose, args.quiet, &cfg.logging.level);
    init_tracing(log_level);

    info!(
        version = env!("CARGO_PKG_VERSION"),
        id_strategy = ?cfg.ids.strategy,
        "Starting pcb-schema"
    );

    let text = match read_input(args.input.as_ref()) {
        Ok(text) => text,
        Err(e) => {
            error!(error = %e, "Failed to read input");
            return ExitCode::FAILURE;
        }
    };

    let document: Value = match serde_json::from_str(&text) {
        Ok(value) => value,
        Err(e) => {
            error!(error = %e, "Input is not valid JSON");
            return ExitCode::FAILURE;
        }
    };

    let is_array = document.is_array();
    let records = match document {
        Value::Array(items) => items,
        single => vec![single],
    };

    let validator = Validator::new(cfg.ids.build_generator());
    let elements = match validator.elements(&records) {
        Ok(elements) => elements,
        Err(e) => {
            for failure in &e.failures {
                eprintln!("element {}: {}", failure.index, failure.error);
            }
            error!(error = %e, "Validation failed");
            return ExitCode::FAILURE;
        }
    };

    info!(count = elements.len(), "All elements valid");

    let output = if is_array {
        serde_json::to_value(&elements)
    } else {
        serde_json::to_value(elements.first())
    };
    let rendered = output.and_then(|value| {
        if args.pretty || cfg.output.pretty {
            serde_json::to_string_pretty(&value)
        } else {
            serde_json::to_string(&value)
        }
    });

    match rendered {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "Failed to serialise output");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Args::command().debug_assert();
    }

    #[test]
    fn quiet_overrides_verbose() {
        assert_eq!(get_log_level(3, true, "trace"), Level::ERROR);
    }

    #[test]
    fn config_level_used_without_flags() {
        assert_eq!(get_log_level(0, false, "Debug"), Level::DEBUG);
        assert_eq!(get_log_level(0, false, "bogus"), Level::WARN);
        assert_eq!(get_log_level(2, false, "error"), Level::DEBUG);
    }
}
