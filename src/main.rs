//! check_open_files - version 0.1.0
//!
//! Nagios plugin reporting open file descriptor pressure with tracing logging.
//! This is the main entry point that resolves configuration, runs the check and
//! handles subcommands. Stdout carries exactly one status line; logs go to stderr.

mod cli;
mod commands;
mod config;
mod startup_checks;

use check_open_files::{ProcFs, ServiceState, UsageChecker};
use clap::error::ErrorKind;
use clap::Parser;
use tracing::level_filters::LevelFilter;
use tracing::{debug, error, info};

use cli::{Args, Commands, LogLevel};
use commands::{command_check_requirements, command_config};
use config::{resolve_config, show_config, validate_effective_config};

/// Initializes tracing logging subsystem with configured log level.
fn setup_logging(log_level: LogLevel) {
    let level = match log_level {
        LogLevel::Off => LevelFilter::OFF,
        LogLevel::Error => LevelFilter::ERROR,
        LogLevel::Warn => LevelFilter::WARN,
        LogLevel::Info => LevelFilter::INFO,
        LogLevel::Debug => LevelFilter::DEBUG,
        LogLevel::Trace => LevelFilter::TRACE,
    };

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(true)
        .with_line_number(true)
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
        return;
    }

    debug!("Logging initialized with level: {:?}", log_level);
}

/// Parses the command line. Usage errors map to UNKNOWN instead of clap's exit 2,
/// which Nagios would read as CRITICAL.
fn parse_args() -> Args {
    match Args::try_parse() {
        Ok(args) => args,
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp
            | ErrorKind::DisplayVersion
            | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
                let _ = e.print();
                std::process::exit(0);
            }
            _ => {
                let rendered = e.to_string();
                let reason = rendered
                    .lines()
                    .next()
                    .unwrap_or("invalid arguments")
                    .trim_start_matches("error: ");
                println!("{}: {}", ServiceState::Unknown, reason);
                std::process::exit(ServiceState::Unknown.exit_code());
            }
        },
    }
}

/// Runs the requested mode and returns the process exit code.
fn run(args: Args) -> Result<i32, Box<dyn std::error::Error>> {
    let config = resolve_config(&args)?;

    if args.check_config {
        validate_effective_config(&config)
            .map_err(|e| format!("Configuration invalid: {}", e))?;
        println!("✅ Configuration is valid");
        return Ok(0);
    }

    if args.show_config {
        show_config(&config, args.config_format)?;
        return Ok(0);
    }

    if let Some(command) = args.command {
        return match command {
            Commands::Config {
                output,
                format,
                commented,
            } => command_config(output, format, commented).map(|_| 0),

            Commands::CheckRequirements => {
                setup_logging(config.log_level());
                command_check_requirements(&config).map(|_| 0)
            }
        };
    }

    validate_effective_config(&config).map_err(|e| format!("Configuration invalid: {}", e))?;
    let thresholds = config.thresholds()?;
    setup_logging(config.log_level());

    let source = ProcFs::new(config.proc_root());
    info!(
        "Checking open files under {} (warning={}%, critical={}%)",
        source.root().display(),
        thresholds.warning_percent,
        thresholds.critical_percent
    );

    let report = UsageChecker::new(thresholds).run(&source);
    if report.state() == ServiceState::Unknown {
        error!("Check could not be evaluated: {}", report.summary());
    }

    println!("{}", report.status_line());
    Ok(report.exit_code())
}

/// Main application entry point.
fn main() {
    let args = parse_args();

    let code = match run(args) {
        Ok(code) => code,
        Err(e) => {
            println!("{}: {}", ServiceState::Unknown, e);
            ServiceState::Unknown.exit_code()
        }
    };

    std::process::exit(code);
}
