//! Operating system accessors used by the checker.
//!
//! [`UsageSource`] isolates every kernel read behind one trait so the checker can
//! run against a fake in tests. [`ProcFs`] is the Linux implementation.

use crate::process::{collect_pids, count_open_fds, read_open_files_limit, read_process_name};
use crate::system::{read_file_nr, CheckError, SystemUsage};
use std::path::{Path, PathBuf};

/// Default mount point of procfs.
pub const DEFAULT_PROC_ROOT: &str = "/proc";

/// Introspection operations needed for one check run.
///
/// Per-process reads return `None` when the value is unavailable, which is
/// expected for processes that exit mid-scan.
pub trait UsageSource {
    /// System-wide open handles and maximum. Failure aborts the run.
    fn system_usage(&self) -> Result<SystemUsage, CheckError>;

    /// Live process identifiers at the time of the call.
    fn pids(&self) -> Vec<u32>;

    /// Soft open files limit of a process.
    fn open_files_limit(&self, pid: u32) -> Option<u64>;

    /// Number of descriptors a process currently holds.
    fn open_fd_count(&self, pid: u32) -> Option<u64>;

    /// Command name of a process.
    fn command_name(&self, pid: u32) -> Option<String>;
}

/// Reads everything from a procfs mount.
#[derive(Debug, Clone)]
pub struct ProcFs {
    root: PathBuf,
}

impl ProcFs {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn pid_path(&self, pid: u32) -> PathBuf {
        self.root.join(pid.to_string())
    }
}

impl Default for ProcFs {
    fn default() -> Self {
        Self::new(DEFAULT_PROC_ROOT)
    }
}

impl UsageSource for ProcFs {
    fn system_usage(&self) -> Result<SystemUsage, CheckError> {
        read_file_nr(&self.root)
    }

    fn pids(&self) -> Vec<u32> {
        collect_pids(&self.root)
    }

    fn open_files_limit(&self, pid: u32) -> Option<u64> {
        read_open_files_limit(&self.pid_path(pid))
    }

    fn open_fd_count(&self, pid: u32) -> Option<u64> {
        count_open_fds(&self.pid_path(pid))
    }

    fn command_name(&self, pid: u32) -> Option<String> {
        read_process_name(&self.pid_path(pid))
    }
}
