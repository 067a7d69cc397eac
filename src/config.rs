//! Configuration management for check_open_files.
//!
//! This module handles loading, merging, and validating configuration from files
//! and CLI arguments. It supports YAML, JSON, and TOML formats.

use crate::cli::{Args, ConfigFormat, LogLevel};
use check_open_files::health_config::{DEFAULT_CRITICAL_PERCENT, DEFAULT_WARNING_PERCENT};
use check_open_files::source::DEFAULT_PROC_ROOT;
use check_open_files::{ThresholdError, Thresholds};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Locations searched when no `--config` is given.
pub const DEFAULT_CONFIG_PATHS: [&str; 8] = [
    "/etc/check-open-files/check-open-files.yaml",
    "/etc/check-open-files/check-open-files.yml",
    "/etc/check-open-files/check-open-files.json",
    "/etc/check-open-files/check-open-files.toml",
    "./check-open-files.yaml",
    "./check-open-files.yml",
    "./check-open-files.json",
    "./check-open-files.toml",
];

/// Effective configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    // Thresholds
    #[serde(alias = "warning-percent", alias = "warning")]
    pub warning_percent: Option<f64>,
    #[serde(alias = "critical-percent", alias = "critical")]
    pub critical_percent: Option<f64>,

    // Introspection
    #[serde(alias = "proc-root")]
    pub proc_root: Option<PathBuf>,

    // Logging
    #[serde(alias = "log-level")]
    pub log_level: Option<LogLevel>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            warning_percent: Some(DEFAULT_WARNING_PERCENT),
            critical_percent: Some(DEFAULT_CRITICAL_PERCENT),
            proc_root: Some(PathBuf::from(DEFAULT_PROC_ROOT)),
            log_level: Some(LogLevel::Warn),
        }
    }
}

impl Config {
    /// Builds validated thresholds, filling gaps with the defaults.
    pub fn thresholds(&self) -> Result<Thresholds, ThresholdError> {
        Thresholds::new(
            self.warning_percent.unwrap_or(DEFAULT_WARNING_PERCENT),
            self.critical_percent.unwrap_or(DEFAULT_CRITICAL_PERCENT),
        )
    }

    pub fn proc_root(&self) -> PathBuf {
        self.proc_root
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_PROC_ROOT))
    }

    pub fn log_level(&self) -> LogLevel {
        self.log_level.unwrap_or(LogLevel::Warn)
    }
}

/// Validate effective config (used by --check-config and before every run)
pub fn validate_effective_config(cfg: &Config) -> Result<(), Box<dyn std::error::Error>> {
    cfg.thresholds()?;

    if let Some(root) = &cfg.proc_root {
        if root.as_os_str().is_empty() {
            return Err("proc_root must not be empty".into());
        }
    }

    Ok(())
}

/// Resolves configuration from CLI args, config file, and defaults.
/// This enforces precedence: CLI (if provided) > config file > default.
pub fn resolve_config(args: &Args) -> Result<Config, Box<dyn std::error::Error>> {
    let mut config = if args.no_config {
        Config::default()
    } else {
        load_config(args.config.as_deref())?
    };

    if let Some(w) = args.warning {
        config.warning_percent = Some(w);
    }
    if let Some(c) = args.critical {
        config.critical_percent = Some(c);
    }
    if let Some(root) = &args.proc_root {
        config.proc_root = Some(root.clone());
    }
    if let Some(level) = args.log_level {
        config.log_level = Some(level);
    }

    Ok(config)
}

/// Configuration loading with multiple format support.
///
/// An explicitly given path must exist; default locations are optional.
pub fn load_config(path: Option<&Path>) -> Result<Config, Box<dyn std::error::Error>> {
    let path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(format!("Config file not found: {}", p.display()).into());
            }
            p.to_path_buf()
        }
        None => match DEFAULT_CONFIG_PATHS
            .into_iter()
            .map(Path::new)
            .find(|p| p.exists())
        {
            Some(p) => p.to_path_buf(),
            None => return Ok(Config::default()),
        },
    };

    let content = fs::read_to_string(&path)?;
    parse_config(&content, &path)
}

/// Parses config content, choosing the format from the file extension.
pub fn parse_config(content: &str, path: &Path) -> Result<Config, Box<dyn std::error::Error>> {
    match path.extension().and_then(|s| s.to_str()) {
        Some("json") => {
            let config: Config = serde_json::from_str(content)?;
            info!("Loaded JSON configuration from: {}", path.display());
            Ok(config)
        }
        Some("toml") => {
            let config: Config = toml::from_str(content)?;
            info!("Loaded TOML configuration from: {}", path.display());
            Ok(config)
        }
        _ => {
            // Default to YAML
            let config: Config = serde_yaml::from_str(content)?;
            info!("Loaded YAML configuration from: {}", path.display());
            Ok(config)
        }
    }
}

/// Renders configuration in the requested format
pub fn render_config(
    config: &Config,
    format: &ConfigFormat,
) -> Result<String, Box<dyn std::error::Error>> {
    let output = match format {
        ConfigFormat::Json => serde_json::to_string_pretty(config)?,
        ConfigFormat::Toml => toml::to_string_pretty(config)?,
        ConfigFormat::Yaml => serde_yaml::to_string(config)?,
    };
    Ok(output)
}

/// Shows configuration in requested format
pub fn show_config(config: &Config, format: ConfigFormat) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", render_config(config, &format)?);
    Ok(())
}
