//! System-wide file handle accounting from the /proc filesystem.
//!
//! `/proc/sys/fs/file-nr` holds three whitespace-separated numbers: allocated
//! file handles, allocated-but-unused handles (always 0 since 2.6), and the
//! system maximum (`fs.file-max`).

use crate::health::usage_percent;
use std::fs;
use std::path::{Path, PathBuf};

/// Path of the counter file relative to the proc root.
pub const FILE_NR_PATH: &str = "sys/fs/file-nr";

/// System-wide open file handles and the kernel maximum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SystemUsage {
    pub open_count: u64,
    pub max_count: u64,
}

impl SystemUsage {
    /// Percentage of the maximum in use, rounded to two decimals.
    pub fn percent_used(&self) -> f64 {
        usage_percent(self.open_count, self.max_count)
    }
}

/// Parses the contents of `file-nr`.
pub fn parse_file_nr(content: &str) -> Result<SystemUsage, CheckError> {
    let parts: Vec<&str> = content.split_whitespace().collect();
    if parts.len() < 3 {
        return Err(CheckError::Malformed(format!(
            "expected 3 fields, got {}",
            parts.len()
        )));
    }

    let open_count = parts[0]
        .parse::<u64>()
        .map_err(|e| CheckError::Malformed(format!("open count '{}': {}", parts[0], e)))?;
    let max_count = parts[2]
        .parse::<u64>()
        .map_err(|e| CheckError::Malformed(format!("maximum '{}': {}", parts[2], e)))?;

    Ok(SystemUsage {
        open_count,
        max_count,
    })
}

/// Reads and parses `<proc_root>/sys/fs/file-nr`.
pub fn read_file_nr(proc_root: &Path) -> Result<SystemUsage, CheckError> {
    let path = proc_root.join(FILE_NR_PATH);
    let content = fs::read_to_string(&path).map_err(|source| CheckError::Unreadable {
        path: path.clone(),
        source,
    })?;
    parse_file_nr(&content).map_err(|e| match e {
        CheckError::Malformed(reason) => {
            CheckError::Malformed(format!("{}: {}", path.display(), reason))
        }
        other => other,
    })
}

/// Failures that make the whole check impossible.
#[derive(Debug, thiserror::Error)]
pub enum CheckError {
    #[error("Cannot read system-wide open file counters from {}: {source}", .path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid system-wide open file counters in {0}")]
    Malformed(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_parse_file_nr_tab_separated() {
        let usage = parse_file_nr("9344\t0\t9223372036854775807\n").unwrap();
        assert_eq!(usage.open_count, 9344);
        assert_eq!(usage.max_count, 9223372036854775807);
    }

    #[test]
    fn test_parse_file_nr_too_few_fields() {
        assert!(matches!(
            parse_file_nr("1024 0"),
            Err(CheckError::Malformed(_))
        ));
    }

    #[test]
    fn test_parse_file_nr_not_a_number() {
        assert!(matches!(
            parse_file_nr("abc 0 1000"),
            Err(CheckError::Malformed(_))
        ));
    }

    #[test]
    fn test_percent_used() {
        let usage = SystemUsage {
            open_count: 100_000,
            max_count: 200_000,
        };
        assert_eq!(usage.percent_used(), 50.0);
    }

    #[test]
    fn test_percent_used_zero_max() {
        let usage = SystemUsage {
            open_count: 12,
            max_count: 0,
        };
        assert_eq!(usage.percent_used(), 0.0);
    }

    #[test]
    fn test_read_file_nr_from_fake_proc() {
        let dir = tempdir().expect("Failed to create temp dir");
        fs::create_dir_all(dir.path().join("sys/fs")).unwrap();
        fs::write(dir.path().join(FILE_NR_PATH), "1024\t0\t1631329\n").unwrap();

        let usage = read_file_nr(dir.path()).unwrap();
        assert_eq!(
            usage,
            SystemUsage {
                open_count: 1024,
                max_count: 1631329
            }
        );
    }

    #[test]
    fn test_read_file_nr_missing_file() {
        let dir = tempdir().expect("Failed to create temp dir");
        let err = read_file_nr(dir.path()).unwrap_err();
        assert!(matches!(err, CheckError::Unreadable { .. }));
        assert!(err.to_string().contains("file-nr"));
    }
}
