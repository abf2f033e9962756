//! Bottleneck detection.

use serde::{Deserialize, Serialize};

use crate::models::{ResourceKind, ResourceRegistry};
use crate::timeline::TimelineStore;

/// Productive load of one resource kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KindLoad {
    pub kind: ResourceKind,
    /// Registered units of this kind.
    pub units: usize,
    /// Productive hours booked per unit.
    pub mean_productive_h: f64,
}

/// The most loaded resource kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BottleneckReport {
    pub kind: ResourceKind,
    pub mean_productive_h: f64,
    /// Every kind with at least one unit, in enumeration order.
    pub loads: Vec<KindLoad>,
}

/// Finds the kind with the highest mean productive hours per unit.
///
/// Kinds are compared in [`ResourceKind::ALL`] order and a later kind must
/// be strictly higher to win, so ties go to the earlier kind. Returns
/// `None` when nothing productive is booked.
pub fn detect_bottleneck(
    registry: &ResourceRegistry,
    store: &TimelineStore,
) -> Option<BottleneckReport> {
    if store.is_empty() {
        return None;
    }

    let mut loads = Vec::new();
    let mut best: Option<(ResourceKind, f64)> = None;

    for kind in ResourceKind::ALL {
        let units = registry.count_of_kind(kind);
        if units == 0 {
            continue;
        }
        let productive_h: i64 = registry
            .all_of_kind(kind)
            .flat_map(|r| store.timeline(&r.id))
            .filter(|e| !e.task.is_overhead())
            .map(|e| e.duration_h())
            .sum();
        let mean = productive_h as f64 / units as f64;

        if mean > best.map_or(0.0, |(_, m)| m) {
            best = Some((kind, mean));
        }
        loads.push(KindLoad {
            kind,
            units,
            mean_productive_h: mean,
        });
    }

    best.map(|(kind, mean_productive_h)| BottleneckReport {
        kind,
        mean_productive_h,
        loads,
    })
}
