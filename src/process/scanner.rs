//! Process scanning utilities for discovering processes and counting their descriptors.
//!
//! All readers here are tolerant: a process may exit at any point during a scan,
//! so failures surface as `None` rather than errors.

use std::fs;
use std::path::Path;
use tracing::debug;

/// Scans the proc root for numeric process directories, returning their PIDs in order.
pub fn collect_pids(root: &Path) -> Vec<u32> {
    let mut out = Vec::new();
    let entries = match fs::read_dir(root) {
        Ok(e) => e,
        Err(e) => {
            debug!("Failed to list {}: {}", root.display(), e);
            return out;
        }
    };

    for entry in entries.flatten() {
        let p = entry.path();
        let name = match p.file_name().and_then(|s| s.to_str()) {
            Some(v) => v,
            None => continue,
        };
        if name.is_empty() || !name.chars().all(|c| c.is_ascii_digit()) {
            continue;
        }
        let pid: u32 = match name.parse() {
            Ok(v) => v,
            Err(_) => continue,
        };
        out.push(pid);
    }

    out.sort_unstable();
    out
}

/// Counts the entries of `<proc_path>/fd`.
///
/// Returns `None` when the directory cannot be listed (process exited or
/// permission denied).
pub fn count_open_fds(proc_path: &Path) -> Option<u64> {
    match fs::read_dir(proc_path.join("fd")) {
        Ok(entries) => Some(entries.count() as u64),
        Err(e) => {
            debug!("Cannot list {}/fd: {}", proc_path.display(), e);
            None
        }
    }
}

/// Reads the process command name from the comm file.
///
/// Only an unreadable file yields `None`; an empty comm stays an empty name.
pub fn read_process_name(proc_path: &Path) -> Option<String> {
    match fs::read_to_string(proc_path.join("comm")) {
        Ok(s) => Some(s.trim().to_string()),
        Err(e) => {
            debug!("Cannot read {}/comm: {}", proc_path.display(), e);
            None
        }
    }
}
