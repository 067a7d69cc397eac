//! The open files check itself.
//!
//! One run reads the system-wide counters, then walks every live process and
//! compares its descriptor count with its soft limit. Each measurement at or
//! above a threshold adds one message to the [`StatusReport`].

use crate::health::{evaluate_status, format_percent, ServiceState, StatusReport};
use crate::health_config::Thresholds;
use crate::process::ProcessUsage;
use crate::source::UsageSource;
use crate::system::{CheckError, SystemUsage};
use tracing::debug;

/// Substituted when a violating process has no readable command name.
pub const UNKNOWN_COMMAND: &str = "Unknown";

/// Checks open file usage against fixed thresholds.
#[derive(Debug, Clone, Copy)]
pub struct UsageChecker {
    thresholds: Thresholds,
}

impl UsageChecker {
    pub fn new(thresholds: Thresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }

    /// Runs the full check. Only unreadable system counters are an error.
    pub fn check<S: UsageSource + ?Sized>(&self, source: &S) -> Result<StatusReport, CheckError> {
        let mut report = StatusReport::new();

        let system = source.system_usage()?;
        self.check_system(&system, &mut report);

        let pids = source.pids();
        debug!("Scanning {} processes", pids.len());
        for pid in pids {
            self.check_process(pid, source, &mut report);
        }

        Ok(report)
    }

    /// Like [`check`](Self::check), but folds a fatal error into an UNKNOWN report.
    pub fn run<S: UsageSource + ?Sized>(&self, source: &S) -> StatusReport {
        match self.check(source) {
            Ok(report) => report,
            Err(e) => StatusReport::unknown(e.to_string()),
        }
    }

    fn check_system(&self, usage: &SystemUsage, report: &mut StatusReport) {
        let pc = usage.percent_used();
        debug!(
            "System-wide open files: {}/{} ({}%)",
            usage.open_count, usage.max_count, pc
        );

        let state = evaluate_status(pc, &self.thresholds);
        if state != ServiceState::Ok {
            report.record(
                state,
                format!(
                    "System-wide open files reached {}% of max ({})",
                    format_percent(pc),
                    usage.max_count
                ),
            );
        }
    }

    fn check_process<S: UsageSource + ?Sized>(
        &self,
        pid: u32,
        source: &S,
        report: &mut StatusReport,
    ) {
        let limit = match source.open_files_limit(pid) {
            Some(l) => l,
            None => {
                debug!("Skipping pid {}: open files limit unavailable", pid);
                return;
            }
        };
        let usage = ProcessUsage {
            pid,
            limit,
            open_fd_count: source.open_fd_count(pid).unwrap_or(0),
        };

        let pc = usage.percent_used();
        let state = evaluate_status(pc, &self.thresholds);
        if state == ServiceState::Ok {
            return;
        }

        let command = source
            .command_name(pid)
            .unwrap_or_else(|| UNKNOWN_COMMAND.to_string());
        report.record(
            state,
            format!(
                "PID {}({}) open files reached {}% of max ({})",
                pid,
                command,
                format_percent(pc),
                usage.limit
            ),
        );
    }
}

impl Default for UsageChecker {
    fn default() -> Self {
        Self::new(Thresholds::default())
    }
}
