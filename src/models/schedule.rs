//! Booked event model.
//!
//! A schedule event records that a resource is occupied by a task during a
//! half-open interval `[start_h, end_h)`. Productive stages carry the batch
//! label they belong to; cleaning, changeover and maintenance carry none.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Label shown for events that belong to no batch.
pub const NO_BATCH: &str = "N/A";

/// A resource-time booking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleEvent {
    /// Occupied resource ID.
    pub resource_id: String,
    /// Start time (hours, inclusive).
    pub start_h: i64,
    /// End time (hours, exclusive).
    pub end_h: i64,
    /// What occupies the resource.
    pub task: TaskKind,
    /// Batch label, `None` for non-product tasks.
    pub batch: Option<String>,
}

/// Classification of booked work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskKind {
    Brewing,
    Fermentation,
    Filtering,
    Conditioning,
    Packaging,
    /// Cleaning-in-place.
    Cip,
    Changeover,
    Maintenance,
}

impl TaskKind {
    /// Task name as shown to operators.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Brewing => "Brewing",
            Self::Fermentation => "Fermentation",
            Self::Filtering => "Filtering",
            Self::Conditioning => "Conditioning",
            Self::Packaging => "Packaging",
            Self::Cip => "CIP",
            Self::Changeover => "Changeover",
            Self::Maintenance => "Maintenance",
        }
    }

    /// Cleaning and changeover are overhead, not production.
    pub fn is_overhead(&self) -> bool {
        matches!(self, Self::Cip | Self::Changeover)
    }

    /// Reservations are bookings injected from outside the scheduler.
    pub fn is_reservation(&self) -> bool {
        matches!(self, Self::Maintenance)
    }
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ScheduleEvent {
    /// Creates a new event.
    pub fn new(
        resource_id: impl Into<String>,
        start_h: i64,
        end_h: i64,
        task: TaskKind,
        batch: Option<String>,
    ) -> Self {
        Self {
            resource_id: resource_id.into(),
            start_h,
            end_h,
            task,
            batch,
        }
    }

    /// Duration (end - start) in hours.
    #[inline]
    pub fn duration_h(&self) -> i64 {
        self.end_h - self.start_h
    }

    /// Whether `[start_h, end_h)` overlaps this event.
    #[inline]
    pub fn overlaps(&self, start_h: i64, end_h: i64) -> bool {
        start_h < self.end_h && end_h > self.start_h
    }

    /// Batch label, or the placeholder for non-product tasks.
    pub fn batch_label(&self) -> &str {
        self.batch.as_deref().unwrap_or(NO_BATCH)
    }
}

/// Renders an hour offset: `Hour N.NN` up to 36 hours, `Day D.DD` beyond.
pub fn format_hours(hours: i64) -> String {
    if hours > 36 {
        format!("Day {:.2}", hours as f64 / 24.0)
    } else {
        format!("Hour {:.2}", hours as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_duration() {
        let e = ScheduleEvent::new("BH1", 0, 8, TaskKind::Brewing, Some("IPA (Batch 1/1)".into()));
        assert_eq!(e.duration_h(), 8);
        assert_eq!(e.batch_label(), "IPA (Batch 1/1)");
    }

    #[test]
    fn test_overlap_half_open() {
        let e = ScheduleEvent::new("BH1", 10, 20, TaskKind::Brewing, None);
        assert!(e.overlaps(15, 25));
        assert!(e.overlaps(5, 11));
        assert!(e.overlaps(0, 30));
        assert!(!e.overlaps(20, 30)); // touching end
        assert!(!e.overlaps(0, 10)); // touching start
        assert!(e.overlaps(12, 12)); // zero-length inside
        assert!(!e.overlaps(10, 10)); // zero-length at start
    }

    #[test]
    fn test_task_classification() {
        assert!(TaskKind::Cip.is_overhead());
        assert!(TaskKind::Changeover.is_overhead());
        assert!(!TaskKind::Maintenance.is_overhead());
        assert!(TaskKind::Maintenance.is_reservation());
        assert!(!TaskKind::Packaging.is_reservation());
        assert_eq!(TaskKind::Cip.to_string(), "CIP");
    }

    #[test]
    fn test_sentinel_label() {
        let e = ScheduleEvent::new("F1", 0, 3, TaskKind::Cip, None);
        assert_eq!(e.batch_label(), "N/A");
    }

    #[test]
    fn test_format_hours() {
        assert_eq!(format_hours(8), "Hour 8.00");
        assert_eq!(format_hours(36), "Hour 36.00");
        assert_eq!(format_hours(48), "Day 2.00");
        assert_eq!(format_hours(350), "Day 14.58");
    }
}
