//! Quick Capture — entry point.
//!
//! Startup sequence:
//!   1. Load .env (if present)
//!   2. Load config
//!   3. Resolve effective log level (CLI `-v` flags > env > config)
//!   4. Init logger once
//!   5. Build the model client and processing loop
//!   6. Run until every captured link has a summary

use tracing::{info, warn};

use quick_capture::config::{self, DEFAULT_CONFIG_PATH};
use quick_capture::error::AppError;
use quick_capture::logger;
use quick_capture::processor::ProcessingLoop;

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), AppError> {
    // Load .env if present — ignore errors (file is optional).
    let _ = dotenvy::dotenv();

    let args = parse_cli_args();

    let config = config::load(args.config_path.as_deref())?;

    let effective_log_level = args.log_level.unwrap_or(config.log_level.as_str());
    let force_cli_level = args.log_level.is_some();

    logger::init(effective_log_level, force_cli_level)?;

    if config.loaded_from.is_none() {
        let path = args.config_path.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
        warn!(path = %path, "config file not found, using defaults");
    }

    info!(
        note = %config.paths.note_path.display(),
        endpoint = %config.api.ollama_endpoint,
        model = %config.api.model,
        log_level = %effective_log_level,
        "config loaded"
    );

    let mut processing = ProcessingLoop::from_config(&config)
        .map_err(|e| AppError::Config(format!("cannot build model client: {e}")))?;

    let report = processing.run();

    match &report.halted {
        Some(reason) => println!(
            "Stopped after {} entries ({} failed): {reason}",
            report.processed, report.failed
        ),
        None => println!(
            "Processed {} entries ({} failed)",
            report.processed, report.failed
        ),
    }

    Ok(())
}

struct CliArgs {
    log_level: Option<&'static str>,
    config_path: Option<String>,
}

fn parse_cli_args() -> CliArgs {
    let mut verbosity = 0u8;
    let mut config_path = None;

    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        if arg == "--" {
            break;
        }

        match arg.as_str() {
            "-h" | "--help" => {
                println!("Usage: quick-capture [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -h, --help                 Print help");
                println!("  -f, --config <PATH>        Path to configuration file (default: {DEFAULT_CONFIG_PATH})");
                println!("  -v, -vv, -vvv, -vvvv       Increase logging verbosity");
                std::process::exit(0);
            }
            "-f" | "--config" => {
                if let Some(path) = iter.next() {
                    config_path = Some(path);
                } else {
                    eprintln!("error: -f/--config requires a path argument");
                    std::process::exit(1);
                }
            }
            "--verbose" => verbosity = verbosity.saturating_add(1),
            a if a.starts_with('-') && a.len() > 1 && a.chars().skip(1).all(|c| c == 'v') => {
                verbosity = verbosity.saturating_add((a.len() - 1) as u8);
            }
            _ => {}
        }
    }

    CliArgs {
        log_level: logger::level_for_verbosity(verbosity),
        config_path,
    }
}
