//! Master data and input validation.
//!
//! Checks structural integrity of a [`BreweryConfig`] before a simulation
//! is built. Detects:
//! - Duplicate resource and SKU IDs
//! - SKUs without a timing profile, and profiles for unknown SKUs
//! - Tanks without a positive capacity
//! - Packaging lines without a packaging family
//! - Negative durations and invalid packaging settings
//!
//! An equipment kind with zero units is not an error: the scheduler
//! reports it as resource exhaustion at planning time.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::config::BreweryConfig;
use crate::error::SimulationError;
use crate::models::ResourceKind;
use crate::scheduler::PackagingModel;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidationErrorKind {
    /// Two entities share the same ID.
    DuplicateId,
    /// A SKU has no timing profile.
    MissingProfile,
    /// A profile references a SKU that doesn't exist.
    UnknownSku,
    /// A tank has no positive capacity.
    InvalidCapacity,
    /// A packaging line has no packaging family.
    MissingLineFamily,
    /// A duration or rate is out of range.
    InvalidDuration,
}

impl ValidationError {
    pub fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates master data.
///
/// Checks:
/// 1. No duplicate resource IDs
/// 2. No duplicate SKU IDs
/// 3. Every SKU has a profile; every profile has a SKU
/// 4. Every tank has a positive capacity
/// 5. Every packaging line has a family
/// 6. No negative durations or packaging rates
/// 7. Fixed packaging time is positive
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_master_data(config: &BreweryConfig) -> ValidationResult {
    let mut errors = Vec::new();

    let mut resource_ids = HashSet::new();
    for r in &config.resources {
        if !resource_ids.insert(r.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate resource ID: {}", r.id),
            ));
        }
        if r.kind.is_tank() && !r.capacity.is_some_and(|c| c > 0) {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidCapacity,
                format!("Tank '{}' has no positive capacity", r.id),
            ));
        }
        if r.kind == ResourceKind::PackagingLine && r.line_family.is_none() {
            errors.push(ValidationError::new(
                ValidationErrorKind::MissingLineFamily,
                format!("Packaging line '{}' has no packaging family", r.id),
            ));
        }
    }

    let mut sku_ids = HashSet::new();
    for sku in &config.skus {
        if !sku_ids.insert(sku.id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate SKU ID: {}", sku.id),
            ));
        }
        if !config.profiles.contains_key(&sku.id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::MissingProfile,
                format!("SKU '{}' has no process profile", sku.name),
            ));
        }
    }

    for (sku_id, p) in &config.profiles {
        if !sku_ids.contains(sku_id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnknownSku,
                format!("Process profile references unknown SKU {sku_id}"),
            ));
        }
        let negative = p.brew_h < 0
            || p.min_fermentation_days < 0
            || p.conditioning_h < 0
            || p.filtering_h < 0
            || p.packaging_rate_per_h.is_nan()
            || p.packaging_rate_per_h < 0.0;
        if negative {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidDuration,
                format!("Process profile for SKU {sku_id} has a negative duration or rate"),
            ));
        }
    }

    let np = &config.non_productive;
    let c = &np.cleaning;
    if np.changeover_h < 0 || c.brewhouse_h < 0 || c.tank_h < 0 || c.filter_h < 0 || c.line_h < 0
    {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidDuration,
            "Cleaning and changeover times must not be negative",
        ));
    }

    match &config.scheduler.packaging {
        PackagingModel::Fixed { hours } if *hours <= 0 => {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidDuration,
                format!("Fixed packaging time must be positive, got {hours}"),
            ));
        }
        PackagingModel::Throughput { units_per_volume }
            if units_per_volume.is_nan() || *units_per_volume <= 0.0 =>
        {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidDuration,
                format!("Units per volume must be positive, got {units_per_volume}"),
            ));
        }
        _ => {}
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Parses a capacity typed by an operator.
///
/// Rejects non-numeric text and values that are not positive.
pub fn parse_capacity(raw: &str) -> Result<i64, SimulationError> {
    match raw.trim().parse::<i64>() {
        Ok(capacity) if capacity > 0 => Ok(capacity),
        _ => Err(SimulationError::InvalidCapacity(raw.trim().to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SchedulerConfig;
    use crate::models::{PackagingFamily, ProcessProfile, ProductSku, Resource};

    fn has(errors: &[ValidationError], kind: ValidationErrorKind) -> bool {
        errors.iter().any(|e| e.kind == kind)
    }

    #[test]
    fn test_reference_is_valid() {
        assert!(validate_master_data(&BreweryConfig::reference()).is_ok());
    }

    #[test]
    fn test_missing_kinds_are_valid() {
        let c = BreweryConfig::new().with_resource(Resource::brewhouse("BH1"));
        assert!(validate_master_data(&c).is_ok());
    }

    #[test]
    fn test_duplicate_resource_id() {
        let c = BreweryConfig::new()
            .with_resource(Resource::brewhouse("X"))
            .with_resource(Resource::filter("X"));
        let errors = validate_master_data(&c).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::DuplicateId && e.message.contains("resource")));
    }

    #[test]
    fn test_duplicate_sku_id() {
        let c = BreweryConfig::new()
            .with_sku(
                ProductSku::new(1, "A", PackagingFamily::Can),
                ProcessProfile::new(1, 1, 1, 1),
            )
            .with_sku(
                ProductSku::new(1, "B", PackagingFamily::Keg),
                ProcessProfile::new(1, 1, 1, 1),
            );
        let errors = validate_master_data(&c).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::DuplicateId && e.message.contains("SKU")));
    }

    #[test]
    fn test_profile_mismatch() {
        let mut c = BreweryConfig::new().with_sku(
            ProductSku::new(1, "A", PackagingFamily::Can),
            ProcessProfile::new(1, 1, 1, 1),
        );
        c.skus.push(ProductSku::new(2, "B", PackagingFamily::Keg));
        c.profiles.insert(9, ProcessProfile::new(1, 1, 1, 1));

        let errors = validate_master_data(&c).unwrap_err();
        assert!(has(&errors, ValidationErrorKind::MissingProfile));
        assert!(has(&errors, ValidationErrorKind::UnknownSku));
    }

    #[test]
    fn test_tank_capacity() {
        let mut tank = Resource::fermentation_tank("FT1", 400);
        tank.capacity = None;
        let c = BreweryConfig::new()
            .with_resource(tank)
            .with_resource(Resource::bright_beer_tank("BBT1", 0));
        let errors = validate_master_data(&c).unwrap_err();
        assert_eq!(
            errors
                .iter()
                .filter(|e| e.kind == ValidationErrorKind::InvalidCapacity)
                .count(),
            2
        );
    }

    #[test]
    fn test_line_family_required() {
        let mut line = Resource::packaging_line("PL1", PackagingFamily::Can);
        line.line_family = None;
        let errors = validate_master_data(&BreweryConfig::new().with_resource(line)).unwrap_err();
        assert!(has(&errors, ValidationErrorKind::MissingLineFamily));
    }

    #[test]
    fn test_negative_durations() {
        let c = BreweryConfig::new().with_sku(
            ProductSku::new(1, "A", PackagingFamily::Can),
            ProcessProfile::new(-1, 1, 1, 1),
        );
        let errors = validate_master_data(&c).unwrap_err();
        assert!(has(&errors, ValidationErrorKind::InvalidDuration));
    }

    #[test]
    fn test_packaging_settings() {
        let c = BreweryConfig::new().with_scheduler(SchedulerConfig {
            packaging: PackagingModel::Fixed { hours: 0 },
            ..Default::default()
        });
        assert!(validate_master_data(&c).is_err());

        let c = BreweryConfig::new().with_scheduler(SchedulerConfig {
            packaging: PackagingModel::Throughput {
                units_per_volume: 0.0,
            },
            ..Default::default()
        });
        assert!(validate_master_data(&c).is_err());
    }

    #[test]
    fn test_multiple_errors() {
        let c = BreweryConfig::new()
            .with_resource(Resource::bright_beer_tank("B", -5))
            .with_resource(Resource::filter("B"));
        let errors = validate_master_data(&c).unwrap_err();
        assert!(errors.len() >= 2);
    }

    #[test]
    fn test_parse_capacity() {
        assert_eq!(parse_capacity("650").unwrap(), 650);
        assert_eq!(parse_capacity(" 12 ").unwrap(), 12);
        assert!(parse_capacity("0").is_err());
        assert!(parse_capacity("abc").is_err());
        assert!(parse_capacity("").is_err());

        match parse_capacity("-3") {
            Err(SimulationError::InvalidCapacity(raw)) => assert_eq!(raw, "-3"),
            other => panic!("expected InvalidCapacity, got {other:?}"),
        }
    }
}
