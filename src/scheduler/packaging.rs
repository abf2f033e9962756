//! Packaging duration models.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;

use crate::models::ProcessProfile;

/// Hours a batch occupies its packaging line.
pub trait PackagingDuration: Send + Sync + Debug {
    /// Packaging hours for one batch of `batch_volume` units.
    fn duration_h(&self, profile: &ProcessProfile, batch_volume: i64) -> i64;
}

/// Built-in packaging duration models.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "model", rename_all = "snake_case")]
pub enum PackagingModel {
    /// Every batch takes the same time, regardless of rate or volume.
    Fixed { hours: i64 },
    /// `ceil(volume × units_per_volume ÷ packaging rate)`, at least one hour.
    ///
    /// Profiles without a positive rate fall back to the default fixed time.
    Throughput { units_per_volume: f64 },
}

impl PackagingModel {
    /// Default fixed packaging time (hours).
    pub const DEFAULT_FIXED_H: i64 = 8;
}

impl Default for PackagingModel {
    fn default() -> Self {
        Self::Fixed {
            hours: Self::DEFAULT_FIXED_H,
        }
    }
}

impl PackagingDuration for PackagingModel {
    fn duration_h(&self, profile: &ProcessProfile, batch_volume: i64) -> i64 {
        match self {
            Self::Fixed { hours } => *hours,
            Self::Throughput { units_per_volume } => {
                let rate = profile.packaging_rate_per_h;
                if rate <= 0.0 {
                    return Self::DEFAULT_FIXED_H;
                }
                let units = batch_volume as f64 * units_per_volume;
                ((units / rate).ceil() as i64).max(1)
            }
        }
    }
}
