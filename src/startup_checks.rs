//! Runtime requirement validation for check_open_files.
//!
//! Reading another user's `/proc/<pid>/fd` needs root (or CAP_DAC_READ_SEARCH
//! plus CAP_SYS_PTRACE). Without it the per-process check silently counts zero
//! descriptors for foreign processes, so this module reports what is reachable.

use check_open_files::process::{collect_pids, count_open_fds, read_open_files_limit};
use check_open_files::system::read_file_nr;
use nix::unistd::geteuid;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use tracing::{error, info, warn};

/// Validate counter and process access under `proc_root`
pub fn validate_requirements(proc_root: &Path) -> Result<(), ValidationError> {
    info!("🔍 Validating runtime requirements...");

    check_system_counters(proc_root)?;
    check_process_access(proc_root)?;

    info!("✅ All runtime requirements validated");
    Ok(())
}

/// Check if running with sufficient privileges
pub fn check_user_privileges() -> bool {
    if !geteuid().is_root() {
        warn!("⚠️  Not running as root - descriptor counts of other users' processes read as 0");
        warn!("   Recommendation: run via sudo or grant cap_dac_read_search,cap_sys_ptrace");
        false
    } else {
        info!("✅ Running as root (uid=0)");
        true
    }
}

/// Check that the system-wide counters can be read
fn check_system_counters(proc_root: &Path) -> Result<(), ValidationError> {
    match read_file_nr(proc_root) {
        Ok(usage) => {
            info!(
                "✅ System-wide counters readable: {} of {} file handles",
                usage.open_count, usage.max_count
            );
            Ok(())
        }
        Err(e) => {
            error!("❌ {}", e);
            Err(ValidationError::CountersUnavailable(e.to_string()))
        }
    }
}

/// Check process enumeration plus limits and fd access for PID 1
fn check_process_access(proc_root: &Path) -> Result<(), ValidationError> {
    let pids = collect_pids(proc_root);
    if pids.is_empty() {
        error!("❌ No process entries found under {}", proc_root.display());
        return Err(ValidationError::NoProcesses(proc_root.display().to_string()));
    }
    info!("✅ Found {} process entries", pids.len());

    let init = proc_root.join("1");
    if read_open_files_limit(&init).is_none() {
        warn!("⚠️  Cannot read {}/limits", init.display());
    }

    // List the fd directory directly to tell permission problems apart
    match fs::read_dir(init.join("fd")) {
        Ok(_) => {
            info!(
                "✅ Descriptor access: {} open descriptors for PID 1",
                count_open_fds(&init).unwrap_or(0)
            );
            Ok(())
        }
        Err(e) if e.kind() == ErrorKind::PermissionDenied => {
            error!("❌ Cannot read {}/fd - insufficient permissions", init.display());
            error!("   Only processes owned by this user will be measured!");
            Err(ValidationError::InsufficientPermissions(e.to_string()))
        }
        Err(e) => {
            warn!("⚠️  Could not test descriptor access: {}", e);
            Ok(()) // Continue but warn
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("System-wide counters unavailable: {0}")]
    CountersUnavailable(String),

    #[error("No processes found under {0}")]
    NoProcesses(String),

    #[error("Insufficient permissions: {0}")]
    InsufficientPermissions(String),
}
