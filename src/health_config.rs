//! Threshold configuration for open file usage checks.
//!
//! Thresholds are plain percentages of a limit. A measurement at or above the
//! critical percentage is critical, at or above the warning percentage a warning.

/// Default warning threshold in percent.
pub const DEFAULT_WARNING_PERCENT: f64 = 80.0;
/// Default critical threshold in percent.
pub const DEFAULT_CRITICAL_PERCENT: f64 = 90.0;

/// Warning and critical percentages, validated once at startup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    /// Warning threshold as a percentage (0-100].
    pub warning_percent: f64,
    /// Critical threshold as a percentage (0-100].
    pub critical_percent: f64,
}

impl Thresholds {
    /// Builds thresholds, rejecting anything outside `0 < warning < critical <= 100`.
    pub fn new(warning_percent: f64, critical_percent: f64) -> Result<Self, ThresholdError> {
        let thresholds = Self {
            warning_percent,
            critical_percent,
        };
        thresholds.validate()?;
        Ok(thresholds)
    }

    /// Checks the ordering and range invariants.
    pub fn validate(&self) -> Result<(), ThresholdError> {
        let w = self.warning_percent;
        let c = self.critical_percent;

        if !w.is_finite() || w <= 0.0 || w > 100.0 {
            return Err(ThresholdError::OutOfRange {
                name: "warning",
                value: w,
            });
        }
        if !c.is_finite() || c <= 0.0 || c > 100.0 {
            return Err(ThresholdError::OutOfRange {
                name: "critical",
                value: c,
            });
        }
        if w >= c {
            return Err(ThresholdError::NotOrdered {
                warning: w,
                critical: c,
            });
        }
        Ok(())
    }
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            warning_percent: DEFAULT_WARNING_PERCENT,
            critical_percent: DEFAULT_CRITICAL_PERCENT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ThresholdError {
    #[error("{name} threshold {value} must be greater than 0 and at most 100")]
    OutOfRange { name: &'static str, value: f64 },

    #[error("warning threshold {warning} must be lower than critical threshold {critical}")]
    NotOrdered { warning: f64, critical: f64 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thresholds_default() {
        let t = Thresholds::default();
        assert_eq!(t.warning_percent, 80.0);
        assert_eq!(t.critical_percent, 90.0);
        assert!(t.validate().is_ok());
    }

    #[test]
    fn test_thresholds_critical_may_be_100() {
        assert!(Thresholds::new(99.5, 100.0).is_ok());
    }

    #[test]
    fn test_thresholds_reject_zero_warning() {
        let err = Thresholds::new(0.0, 90.0).unwrap_err();
        assert_eq!(
            err,
            ThresholdError::OutOfRange {
                name: "warning",
                value: 0.0
            }
        );
    }

    #[test]
    fn test_thresholds_reject_critical_above_100() {
        let err = Thresholds::new(80.0, 120.0).unwrap_err();
        assert!(matches!(
            err,
            ThresholdError::OutOfRange {
                name: "critical",
                ..
            }
        ));
    }

    #[test]
    fn test_thresholds_reject_inverted_order() {
        assert!(matches!(
            Thresholds::new(90.0, 80.0),
            Err(ThresholdError::NotOrdered { .. })
        ));
        // Equal values are not a valid band either
        assert!(matches!(
            Thresholds::new(85.0, 85.0),
            Err(ThresholdError::NotOrdered { .. })
        ));
    }

    #[test]
    fn test_thresholds_reject_nan() {
        assert!(Thresholds::new(f64::NAN, 90.0).is_err());
    }
}
