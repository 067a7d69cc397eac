//! Nagios service states and the aggregated status report.
//!
//! Every measurement is classified into a [`ServiceState`]; the report keeps the
//! worst state seen plus one message per offending subject, in discovery order.
//!
//! # Usage
//!
//! ```rust
//! use check_open_files::{ServiceState, StatusReport};
//!
//! let mut report = StatusReport::new();
//! report.record(ServiceState::Warning, "PID 42(nginx) open files reached 85.0% of max (1024)");
//!
//! assert_eq!(report.state(), ServiceState::Warning);
//! assert_eq!(report.exit_code(), 1);
//! println!("{}", report.status_line());
//! ```

use crate::health_config::Thresholds;

pub use nagiosplugin::ServiceState;

/// Summary printed when nothing crossed a threshold.
pub const OK_SUMMARY: &str =
    "Both system-wide and per-process open files are well within their limits.";

/// Classifies a usage percentage against the thresholds.
///
/// Both comparisons are inclusive: reaching a threshold counts.
pub fn evaluate_status(percent_used: f64, thresholds: &Thresholds) -> ServiceState {
    if percent_used >= thresholds.critical_percent {
        ServiceState::Critical
    } else if percent_used >= thresholds.warning_percent {
        ServiceState::Warning
    } else {
        ServiceState::Ok
    }
}

/// Computes `used / limit * 100` rounded to two decimals. A zero limit yields 0.
pub fn usage_percent(used: u64, limit: u64) -> f64 {
    if limit == 0 {
        return 0.0;
    }
    round_percent(used as f64 / limit as f64 * 100.0)
}

/// Rounds to two decimal places on the exact binary value, so `1.115` gives `1.11`.
pub fn round_percent(value: f64) -> f64 {
    format!("{:.2}", value).parse().unwrap_or(value)
}

/// Renders a percentage with at least one fractional digit (`50.0`, `92.77`).
pub fn format_percent(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{:.1}", value)
    } else {
        format!("{}", value)
    }
}

/// Aggregated outcome of one check run.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusReport {
    state: ServiceState,
    messages: Vec<String>,
}

impl StatusReport {
    /// An empty report in the OK state.
    pub fn new() -> Self {
        Self {
            state: ServiceState::Ok,
            messages: Vec::new(),
        }
    }

    /// A report for a run that could not be evaluated at all.
    pub fn unknown(message: impl Into<String>) -> Self {
        Self {
            state: ServiceState::Unknown,
            messages: vec![message.into()],
        }
    }

    /// Escalates the overall state and appends a violation message.
    /// OK observations leave the report untouched.
    pub fn record(&mut self, state: ServiceState, message: impl Into<String>) {
        if state == ServiceState::Ok {
            return;
        }
        self.state = self.state.max(state);
        self.messages.push(message.into());
    }

    pub fn state(&self) -> ServiceState {
        self.state
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    pub fn exit_code(&self) -> i32 {
        self.state.exit_code()
    }

    /// Fixed reassurance sentence when OK, else all messages joined by `", "`.
    pub fn summary(&self) -> String {
        if self.state == ServiceState::Ok {
            OK_SUMMARY.to_string()
        } else {
            self.messages.join(", ")
        }
    }

    /// The single line printed on stdout: `"{STATE}: {summary}"`.
    pub fn status_line(&self) -> String {
        format!("{}: {}", self.state, self.summary())
    }
}

impl Default for StatusReport {
    fn default() -> Self {
        Self::new()
    }
}
