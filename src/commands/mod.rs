//! CLI command implementations for check_open_files.
//!
//! This module provides implementations for all CLI subcommands:
//! - `config`: Configuration file generation
//! - `check-requirements`: Runtime requirement validation

pub mod config;
pub mod requirements;

// Re-export command functions
pub use config::command_config;
pub use requirements::command_check_requirements;
