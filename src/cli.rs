//! CLI arguments and subcommands for check_open_files.
//!
//! This module defines the command-line interface structure using the clap library.
//! `-w`/`-c` follow the usual Nagios plugin convention.

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Log level options for CLI parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Configuration format options for output
#[derive(Debug, Clone, ValueEnum)]
pub enum ConfigFormat {
    Yaml,
    Json,
    Toml,
}

/// Main CLI arguments structure
#[derive(Parser, Debug)]
#[command(
    name = "check_open_files",
    about = "Checks max open files status for both system and per-process",
    long_about = "Checks max open files status for both system and per-process.\n\n\
                  Compares the system-wide file handle count with fs.file-max and every \
                  process's open descriptors with its soft RLIMIT_NOFILE. Prints one \
                  Nagios status line and exits 0 (OK), 1 (WARNING), 2 (CRITICAL) or 3 (UNKNOWN).",
    author = "Michael Moll <exporter@herakles.now> - Herakles",
    version = "0.1.0",
    propagate_version = true
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Percent of used filehandles to treat as a warning [default: 80]
    #[arg(short = 'w', long = "warning", value_name = "PERCENT")]
    pub warning: Option<f64>,

    /// Percent of used filehandles to treat as critical [default: 90]
    #[arg(short = 'c', long = "critical", value_name = "PERCENT")]
    pub critical: Option<f64>,

    /// Log level (logs go to stderr) [default: warn]
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevel>,

    /// Config file (YAML/JSON/TOML)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Disable all config file loading
    #[arg(long)]
    pub no_config: bool,

    /// Root of the proc filesystem to inspect
    #[arg(long, value_name = "DIR")]
    pub proc_root: Option<PathBuf>,

    /// Print effective merged config and exit
    #[arg(long)]
    pub show_config: bool,

    /// Output format for --show-config
    #[arg(long, value_enum, default_value = "yaml")]
    pub config_format: ConfigFormat,

    /// Validate config and exit (return code 3 on error)
    #[arg(long)]
    pub check_config: bool,
}

/// Subcommands for additional functionality
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a configuration file
    Config {
        /// Output file path ("-" for stdout)
        #[arg(short = 'o', long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value = "yaml")]
        format: ConfigFormat,

        /// Include comments and examples
        #[arg(long)]
        commented: bool,
    },

    /// Check runtime requirements and permissions
    CheckRequirements,
}
