//! Error types for the simulation's inbound API.
//!
//! Scheduling failures (resource exhaustion) are not errors: the scheduler
//! degrades the plan and reports them as [`crate::scheduler::SchedulingIssue`]s.
//! The variants here cover rejected inputs, which leave prior state untouched.

use thiserror::Error;

use crate::validation::ValidationError;

/// A rejected simulation request.
#[derive(Debug, Error)]
pub enum SimulationError {
    /// No resource with the given ID is registered.
    #[error("unknown resource '{0}'")]
    UnknownResource(String),

    /// No SKU with the given ID exists in the master data.
    #[error("unknown SKU {0}")]
    UnknownSku(u32),

    /// Capacity updates only apply to fermentation and bright-beer tanks.
    #[error("resource '{0}' is not a tank")]
    NotATank(String),

    /// Capacity was non-numeric or not positive.
    #[error("invalid capacity value: {0}")]
    InvalidCapacity(String),

    /// Demand quantity must be positive.
    #[error("invalid demand quantity {0} for SKU {1}")]
    InvalidQuantity(i64, u32),

    /// The clock only moves forward.
    #[error("cannot advance clock by {0} hours")]
    InvalidClockDelta(i64),

    /// Master data failed validation.
    #[error("invalid master data: {} problem(s)", .0.len())]
    InvalidMasterData(Vec<ValidationError>),

    /// Configuration document could not be parsed.
    #[error("failed to parse configuration: {0}")]
    Config(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ValidationErrorKind;

    #[test]
    fn test_error_messages() {
        let e = SimulationError::UnknownResource("FT9".into());
        assert_eq!(e.to_string(), "unknown resource 'FT9'");

        let e = SimulationError::InvalidCapacity("-5".into());
        assert_eq!(e.to_string(), "invalid capacity value: -5");

        let e = SimulationError::InvalidMasterData(vec![
            ValidationError::new(ValidationErrorKind::DuplicateId, "a"),
            ValidationError::new(ValidationErrorKind::MissingProfile, "b"),
        ]);
        assert_eq!(e.to_string(), "invalid master data: 2 problem(s)");
    }

    #[test]
    fn test_config_error_from_json() {
        let err = serde_json::from_str::<u32>("not json").unwrap_err();
        let e: SimulationError = err.into();
        assert!(matches!(e, SimulationError::Config(_)));
    }
}
