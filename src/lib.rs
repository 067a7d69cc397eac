//! check-open-files library
//!
//! A Nagios plugin core that reports whether system-wide or per-process open
//! file descriptor usage is approaching its limit.
//!
//! # Features
//!
//! - **System-wide check**: allocated handles against `fs.file-max`
//! - **Per-process check**: open descriptors against each soft `RLIMIT_NOFILE`
//! - **Nagios semantics**: OK/WARNING/CRITICAL/UNKNOWN with matching exit codes
//! - **Pluggable introspection**: every kernel read goes through [`UsageSource`]
//!
//! # Usage
//!
//! ```rust,no_run
//! use check_open_files::{ProcFs, Thresholds, UsageChecker};
//!
//! let thresholds = Thresholds::new(80.0, 90.0).expect("valid thresholds");
//! let report = UsageChecker::new(thresholds).run(&ProcFs::default());
//!
//! println!("{}", report.status_line());
//! std::process::exit(report.exit_code());
//! ```

pub mod checker;
pub mod health;
pub mod health_config;
pub mod process;
pub mod source;
pub mod system;

// Re-export main types for convenience
pub use checker::UsageChecker;
pub use health::{ServiceState, StatusReport};
pub use health_config::{ThresholdError, Thresholds};
pub use source::{ProcFs, UsageSource};
pub use system::{CheckError, SystemUsage};
