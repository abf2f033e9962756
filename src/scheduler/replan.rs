//! Which bookings survive a re-plan.

use serde::{Deserialize, Serialize};

use crate::models::ScheduleEvent;
use crate::timeline::TimelineStore;

/// Reset policy applied at the start of every scheduling pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplanPolicy {
    /// Start from empty timelines. Injected reservations are discarded.
    #[default]
    ClearAll,
    /// Carry maintenance reservations into the new plan as fixed bookings.
    KeepReservations,
}

impl ReplanPolicy {
    /// Whether a booking is carried across a re-plan.
    pub fn carries(&self, event: &ScheduleEvent) -> bool {
        match self {
            Self::ClearAll => false,
            Self::KeepReservations => event.task.is_reservation(),
        }
    }

    /// Clears the store down to the carried bookings.
    pub fn reset(&self, store: &mut TimelineStore) {
        match self {
            Self::ClearAll => store.clear(),
            Self::KeepReservations => store.retain(|e| e.task.is_reservation()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TaskKind;

    fn sample_store() -> TimelineStore {
        let mut s = TimelineStore::new();
        s.book("BH1", 0, 8, TaskKind::Brewing, Some("B1".into()));
        s.book("BH1", 8, 32, TaskKind::Maintenance, None);
        s
    }

    #[test]
    fn test_clear_all() {
        let mut s = sample_store();
        ReplanPolicy::ClearAll.reset(&mut s);
        assert!(s.is_empty());
    }

    #[test]
    fn test_keep_reservations() {
        let mut s = sample_store();
        ReplanPolicy::KeepReservations.reset(&mut s);
        assert_eq!(s.len(), 1);
        assert_eq!(s.timeline("BH1").next().map(|e| e.task), Some(TaskKind::Maintenance));
        assert_eq!(s.find_slot("BH1", 8, 0), 0);
        assert_eq!(s.find_slot("BH1", 10, 0), 32);
    }

    #[test]
    fn test_carries() {
        let m = ScheduleEvent::new("F1", 0, 24, TaskKind::Maintenance, None);
        let b = ScheduleEvent::new("F1", 0, 6, TaskKind::Filtering, None);
        assert!(!ReplanPolicy::ClearAll.carries(&m));
        assert!(ReplanPolicy::KeepReservations.carries(&m));
        assert!(!ReplanPolicy::KeepReservations.carries(&b));
    }
}
