//! Operator-facing messages.
//!
//! Every rejected input and every degraded scheduling decision becomes an
//! alert stamped with the simulation clock.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Message severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

/// A timestamped, severity-tagged message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    /// Simulation clock at detection (hours).
    pub hour: i64,
    pub severity: Severity,
    pub message: String,
}

impl Alert {
    /// Creates an alert.
    pub fn new(hour: i64, severity: Severity, message: impl Into<String>) -> Self {
        Self {
            hour,
            severity,
            message: message.into(),
        }
    }

    /// Creates an info alert.
    pub fn info(hour: i64, message: impl Into<String>) -> Self {
        Self::new(hour, Severity::Info, message)
    }

    /// Creates a warning alert.
    pub fn warning(hour: i64, message: impl Into<String>) -> Self {
        Self::new(hour, Severity::Warning, message)
    }

    /// Creates an error alert.
    pub fn error(hour: i64, message: impl Into<String>) -> Self {
        Self::new(hour, Severity::Error, message)
    }
}

impl fmt::Display for Alert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[Hour {}] {}", self.hour, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alert_factories() {
        assert_eq!(Alert::info(0, "a").severity, Severity::Info);
        assert_eq!(Alert::warning(0, "a").severity, Severity::Warning);
        assert_eq!(Alert::error(5, "a").hour, 5);
    }

    #[test]
    fn test_alert_display() {
        let a = Alert::error(12, "Invalid capacity value.");
        assert_eq!(a.to_string(), "[Hour 12] Invalid capacity value.");
    }
}
