//! Per-process open file accounting.
//!
//! This module provides:
//! - `scanner`: PID discovery, descriptor counting and command names
//! - `limits`: the soft open-files limit from /proc/<pid>/limits

pub mod limits;
pub mod scanner;

// Re-export commonly used types
pub use limits::{parse_open_files_limit, read_open_files_limit, ProcessUsage};
pub use scanner::{collect_pids, count_open_fds, read_process_name};
