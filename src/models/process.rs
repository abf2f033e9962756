//! Process timing reference data.
//!
//! # Duration Model
//!
//! Each SKU carries a timing profile for the productive stages. Equipment
//! additionally needs non-productive time after use:
//! - **Cleaning (CIP)**: after every stage, duration depends on the kind
//! - **Changeover**: when a packaging line switches to a different family
//!
//! All durations are whole hours.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::{ProductSku, ResourceKind};

/// Per-SKU stage timings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessProfile {
    /// Brewhouse occupation (hours).
    pub brew_h: i64,
    /// Minimum fermentation period (days).
    pub min_fermentation_days: i64,
    /// Bright-beer tank conditioning (hours).
    pub conditioning_h: i64,
    /// Filter occupation (hours).
    pub filtering_h: i64,
    /// Packaging throughput (units per hour).
    pub packaging_rate_per_h: f64,
}

impl ProcessProfile {
    /// Creates a profile from stage durations.
    pub fn new(
        brew_h: i64,
        min_fermentation_days: i64,
        conditioning_h: i64,
        filtering_h: i64,
    ) -> Self {
        Self {
            brew_h,
            min_fermentation_days,
            conditioning_h,
            filtering_h,
            packaging_rate_per_h: 0.0,
        }
    }

    /// Sets the packaging rate.
    pub fn with_packaging_rate(mut self, rate_per_h: f64) -> Self {
        self.packaging_rate_per_h = rate_per_h;
        self
    }

    /// Fermentation tank occupation in hours.
    #[inline]
    pub fn fermentation_h(&self) -> i64 {
        self.min_fermentation_days * 24
    }
}

/// Cleaning-in-place durations per equipment family.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CleaningTimes {
    pub brewhouse_h: i64,
    /// Shared by fermentation and bright-beer tanks.
    pub tank_h: i64,
    pub filter_h: i64,
    pub line_h: i64,
}

/// Non-productive overhead applied by the scheduler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NonProductiveTimes {
    /// Cleaning after each stage.
    pub cleaning: CleaningTimes,
    /// Packaging line family switch (hours).
    pub changeover_h: i64,
}

impl NonProductiveTimes {
    /// Creates overhead times.
    pub fn new(cleaning: CleaningTimes, changeover_h: i64) -> Self {
        Self {
            cleaning,
            changeover_h,
        }
    }

    /// Cleaning duration for a resource kind.
    pub fn cleaning_for(&self, kind: ResourceKind) -> i64 {
        match kind {
            ResourceKind::Brewhouse => self.cleaning.brewhouse_h,
            ResourceKind::FermentationTank | ResourceKind::BrightBeerTank => self.cleaning.tank_h,
            ResourceKind::Filter => self.cleaning.filter_h,
            ResourceKind::PackagingLine => self.cleaning.line_h,
        }
    }
}

impl Default for NonProductiveTimes {
    fn default() -> Self {
        Self::new(
            CleaningTimes {
                brewhouse_h: 2,
                tank_h: 4,
                filter_h: 3,
                line_h: 2,
            },
            3,
        )
    }
}

/// Lookup of products, their profiles, and overhead times.
#[derive(Debug, Clone, Default)]
pub struct ProcessCatalog {
    skus: Vec<ProductSku>,
    profiles: HashMap<u32, ProcessProfile>,
    non_productive: NonProductiveTimes,
}

impl ProcessCatalog {
    /// Creates a catalog.
    pub fn new(
        skus: Vec<ProductSku>,
        profiles: impl IntoIterator<Item = (u32, ProcessProfile)>,
        non_productive: NonProductiveTimes,
    ) -> Self {
        Self {
            skus,
            profiles: profiles.into_iter().collect(),
            non_productive,
        }
    }

    /// Finds a SKU by ID.
    pub fn sku(&self, sku_id: u32) -> Option<&ProductSku> {
        self.skus.iter().find(|s| s.id == sku_id)
    }

    /// Timing profile for a SKU.
    pub fn profile(&self, sku_id: u32) -> Option<&ProcessProfile> {
        self.profiles.get(&sku_id)
    }

    /// All SKUs in catalog order.
    pub fn skus(&self) -> &[ProductSku] {
        &self.skus
    }

    /// Overhead times.
    pub fn non_productive(&self) -> &NonProductiveTimes {
        &self.non_productive
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PackagingFamily;

    #[test]
    fn test_profile_fermentation_hours() {
        let p = ProcessProfile::new(8, 14, 5, 6).with_packaging_rate(3000.0);
        assert_eq!(p.fermentation_h(), 336);
        assert!((p.packaging_rate_per_h - 3000.0).abs() < 1e-10);
    }

    #[test]
    fn test_cleaning_for_kind() {
        let np = NonProductiveTimes::default();
        assert_eq!(np.cleaning_for(ResourceKind::Brewhouse), 2);
        assert_eq!(np.cleaning_for(ResourceKind::FermentationTank), 4);
        assert_eq!(np.cleaning_for(ResourceKind::BrightBeerTank), 4);
        assert_eq!(np.cleaning_for(ResourceKind::Filter), 3);
        assert_eq!(np.cleaning_for(ResourceKind::PackagingLine), 2);
        assert_eq!(np.changeover_h, 3);
    }

    #[test]
    fn test_catalog_lookup() {
        let mut profiles = HashMap::new();
        profiles.insert(1, ProcessProfile::new(8, 14, 5, 6));
        let catalog = ProcessCatalog::new(
            vec![ProductSku::new(1, "IPA", PackagingFamily::Can)],
            profiles,
            NonProductiveTimes::default(),
        );

        assert_eq!(catalog.sku(1).map(|s| s.name.as_str()), Some("IPA"));
        assert!(catalog.sku(2).is_none());
        assert_eq!(catalog.profile(1).map(|p| p.brew_h), Some(8));
        assert!(catalog.profile(2).is_none());
        assert_eq!(catalog.skus().len(), 1);
    }
}
