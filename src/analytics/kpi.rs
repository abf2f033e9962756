//! Clock-relative utilization KPIs.

use serde::{Deserialize, Serialize};

use crate::models::{ResourceKind, ResourceRegistry, TaskKind};
use crate::timeline::TimelineStore;

/// Utilization percentages as of the simulation clock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UtilizationKpi {
    /// Horizon used as denominator (hours, at least 1).
    pub horizon_h: i64,
    /// Brewhouse utilization (0..100).
    pub brewhouse_pct: f64,
    /// Fermentation tank utilization (0..100).
    pub fermentation_tank_pct: f64,
}

impl UtilizationKpi {
    /// Computes KPIs from bookings that ended by `clock_h`.
    ///
    /// # Arguments
    /// * `registry` - Units per kind.
    /// * `store` - Booked timelines.
    /// * `clock_h` - Simulation clock; a zero clock is treated as one hour.
    pub fn calculate(registry: &ResourceRegistry, store: &TimelineStore, clock_h: i64) -> Self {
        let horizon_h = clock_h.max(1);

        // Brewhouses: everything but cleaning.
        let brewhouses = registry.count_of_kind(ResourceKind::Brewhouse);
        let brew_hours: i64 = registry
            .all_of_kind(ResourceKind::Brewhouse)
            .flat_map(|r| store.timeline(&r.id))
            .filter(|e| e.task != TaskKind::Cip && e.end_h <= horizon_h)
            .map(|e| e.duration_h())
            .sum();
        let brewhouse_pct = if brewhouses == 0 {
            0.0
        } else {
            brew_hours as f64 / brewhouses as f64 / horizon_h as f64 * 100.0
        };

        // Tanks: any occupation, measured in tank-days.
        let tanks = registry.count_of_kind(ResourceKind::FermentationTank);
        let tank_days: f64 = registry
            .all_of_kind(ResourceKind::FermentationTank)
            .flat_map(|r| store.timeline(&r.id))
            .filter(|e| e.end_h <= horizon_h)
            .map(|e| e.duration_h() as f64 / 24.0)
            .sum();
        let available_tank_days = tanks as f64 * (horizon_h as f64 / 24.0);
        let fermentation_tank_pct = if tanks == 0 {
            0.0
        } else {
            tank_days / available_tank_days * 100.0
        };

        Self {
            horizon_h,
            brewhouse_pct,
            fermentation_tank_pct,
        }
    }
}
