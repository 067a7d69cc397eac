//! Config command implementation.
//!
//! Generates configuration files in various formats.

use std::fs;
use std::path::PathBuf;

use crate::cli::ConfigFormat;
use crate::config::{render_config, Config};

/// Generates configuration files.
pub fn command_config(
    output: Option<PathBuf>,
    format: ConfigFormat,
    commented: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::default();
    let output = match output {
        Some(path) => path,
        None => PathBuf::from(default_file_name(&format)),
    };

    let mut content = render_config(&config, &format)?;
    if commented {
        if let ConfigFormat::Yaml | ConfigFormat::Toml = format {
            content = add_config_comments(content);
        }
    }

    if output.to_string_lossy() == "-" {
        print!("{}", content);
    } else {
        fs::write(&output, content)?;
        println!("✅ Configuration written to: {}", output.display());
    }

    Ok(())
}

fn default_file_name(format: &ConfigFormat) -> &'static str {
    match format {
        ConfigFormat::Yaml => "check-open-files.yaml",
        ConfigFormat::Json => "check-open-files.json",
        ConfigFormat::Toml => "check-open-files.toml",
    }
}

/// Adds comments to YAML or TOML configuration. Both use `#` comments.
fn add_config_comments(content: String) -> String {
    let comments = r#"# check_open_files Configuration
# ==============================
#
# Thresholds (percent of the limit, 0 < warning < critical <= 100)
# ----------------------------------------------------------------
# warning_percent: 80.0        # -w, WARNING at or above this usage
# critical_percent: 90.0       # -c, CRITICAL at or above this usage
#
# Introspection
# -------------
# proc_root: "/proc"           # procfs mount, e.g. /host/proc in a container
#
# Logging
# -------
# log_level: "warn"            # off, error, warn, info, debug, trace (stderr)
"#;

    format!("{comments}\n{content}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::parse_config;
    use tempfile::tempdir;

    #[test]
    fn test_command_config_writes_parseable_file() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("generated.toml");

        command_config(Some(path.clone()), ConfigFormat::Toml, true).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("# check_open_files Configuration"));
        let parsed = parse_config(&content, &path).unwrap();
        assert_eq!(parsed, Config::default());
    }

    #[test]
    fn test_default_file_name_matches_format() {
        assert_eq!(default_file_name(&ConfigFormat::Json), "check-open-files.json");
    }
}
