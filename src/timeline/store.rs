//! Arena-backed timeline store.

use std::collections::HashMap;

use tracing::debug;

use crate::models::{ScheduleEvent, TaskKind};

/// Flat event log plus a per-resource index over it.
///
/// No overlap check happens at booking time: callers find a slot first.
#[derive(Debug, Clone, Default)]
pub struct TimelineStore {
    events: Vec<ScheduleEvent>,
    by_resource: HashMap<String, Vec<usize>>,
}

impl TimelineStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Books `[start_h, end_h)` on a resource.
    ///
    /// Appends to the flat log and to the resource's timeline. Returns the
    /// event's position in the log.
    pub fn book(
        &mut self,
        resource_id: &str,
        start_h: i64,
        end_h: i64,
        task: TaskKind,
        batch: Option<String>,
    ) -> usize {
        debug!(resource = resource_id, start_h, end_h, task = %task, "booking");
        let idx = self.events.len();
        self.events
            .push(ScheduleEvent::new(resource_id, start_h, end_h, task, batch));
        self.by_resource
            .entry(resource_id.to_string())
            .or_default()
            .push(idx);
        idx
    }

    /// A resource's bookings in insertion order.
    pub fn timeline<'a>(&'a self, resource_id: &str) -> impl Iterator<Item = &'a ScheduleEvent> + 'a {
        self.by_resource
            .get(resource_id)
            .into_iter()
            .flatten()
            .map(move |&i| &self.events[i])
    }

    /// Number of bookings on a resource.
    pub fn timeline_len(&self, resource_id: &str) -> usize {
        self.by_resource.get(resource_id).map_or(0, Vec::len)
    }

    /// The flat log in insertion order.
    pub fn events(&self) -> &[ScheduleEvent] {
        &self.events
    }

    /// The flat log sorted by start time. Ties keep insertion order.
    pub fn chronological(&self) -> Vec<&ScheduleEvent> {
        let mut sorted: Vec<&ScheduleEvent> = self.events.iter().collect();
        sorted.sort_by_key(|e| e.start_h);
        sorted
    }

    /// Keeps only events matching `keep` and rebuilds every timeline from them.
    pub fn retain(&mut self, keep: impl FnMut(&ScheduleEvent) -> bool) {
        self.events.retain(keep);
        self.rebuild_index();
    }

    /// Empties the log and every timeline.
    pub fn clear(&mut self) {
        self.events.clear();
        self.by_resource.clear();
    }

    /// Number of bookings in the log.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether nothing is booked.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    fn rebuild_index(&mut self) {
        self.by_resource.clear();
        for (idx, e) in self.events.iter().enumerate() {
            self.by_resource
                .entry(e.resource_id.clone())
                .or_default()
                .push(idx);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_store() -> TimelineStore {
        let mut s = TimelineStore::new();
        s.book("BH1", 10, 18, TaskKind::Brewing, Some("B2".into()));
        s.book("FT1", 8, 344, TaskKind::Fermentation, Some("B1".into()));
        s.book("BH1", 0, 8, TaskKind::Brewing, Some("B1".into()));
        s
    }

    #[test]
    fn test_book_writes_log_and_timeline() {
        let s = sample_store();
        assert_eq!(s.len(), 3);
        assert_eq!(s.timeline_len("BH1"), 2);
        assert_eq!(s.timeline_len("FT1"), 1);
        assert_eq!(s.timeline_len("F1"), 0);
        assert_eq!(s.timeline("F1").count(), 0);
    }

    #[test]
    fn test_timeline_keeps_insertion_order() {
        let s = sample_store();
        let starts: Vec<i64> = s.timeline("BH1").map(|e| e.start_h).collect();
        assert_eq!(starts, vec![10, 0]);
    }

    #[test]
    fn test_chronological_is_stable() {
        let mut s = sample_store();
        s.book("F1", 0, 3, TaskKind::Cip, None);
        let order: Vec<(&str, i64)> = s
            .chronological()
            .iter()
            .map(|e| (e.resource_id.as_str(), e.start_h))
            .collect();
        assert_eq!(order, vec![("BH1", 0), ("F1", 0), ("FT1", 8), ("BH1", 10)]);
    }

    #[test]
    fn test_retain_rebuilds_index() {
        let mut s = sample_store();
        s.retain(|e| e.start_h < 9);
        assert_eq!(s.len(), 2);
        assert_eq!(s.timeline_len("BH1"), 1);
        assert_eq!(s.timeline("BH1").next().map(|e| e.start_h), Some(0));
        assert_eq!(s.timeline_len("FT1"), 1);
    }

    #[test]
    fn test_clear() {
        let mut s = sample_store();
        s.clear();
        assert!(s.is_empty());
        assert_eq!(s.timeline_len("BH1"), 0);
    }
}
