//! Per-process open file limits from `/proc/<pid>/limits`.
//!
//! The limits file is world-readable, so the soft `RLIMIT_NOFILE` of every
//! process can be read without privileges. Descriptor counts are a different
//! story, see `scanner::count_open_fds`.

use crate::health::usage_percent;
use std::fs;
use std::path::Path;

const OPEN_FILES_ROW: &str = "Max open files";

/// Open descriptors of one process against its soft limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessUsage {
    pub pid: u32,
    pub limit: u64,
    pub open_fd_count: u64,
}

impl ProcessUsage {
    /// Percentage of the soft limit in use. A zero limit reports 0.
    pub fn percent_used(&self) -> f64 {
        usage_percent(self.open_fd_count, self.limit)
    }
}

/// Extracts the soft limit from the `Max open files` row.
///
/// `unlimited` maps to `u64::MAX`, the value of `RLIM_INFINITY` on Linux.
pub fn parse_open_files_limit(content: &str) -> Option<u64> {
    let line = content
        .lines()
        .find(|l| l.starts_with(OPEN_FILES_ROW))?;
    let soft = line[OPEN_FILES_ROW.len()..].split_whitespace().next()?;

    if soft == "unlimited" {
        Some(u64::MAX)
    } else {
        soft.parse().ok()
    }
}

/// Reads the soft open files limit for the process at `proc_path`.
pub fn read_open_files_limit(proc_path: &Path) -> Option<u64> {
    let content = fs::read_to_string(proc_path.join("limits")).ok()?;
    parse_open_files_limit(&content)
}
