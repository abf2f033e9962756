//! Booking store and slot search.
//!
//! # Storage
//!
//! Bookings live in one append-only arena of [`ScheduleEvent`]s (the flat
//! event log). A derived index maps each resource to the positions of its
//! events in insertion order; that per-resource view is the resource's
//! timeline. Both views are updated by the single [`TimelineStore::book`]
//! path, so they cannot drift apart.
//!
//! # Slot Search
//!
//! [`TimelineStore::find_slot`] returns the earliest start at or after a
//! floor such that `[start, start + duration)` overlaps no booking on the
//! resource. The search never fails: time is unbounded.
//!
//! [`ScheduleEvent`]: crate::models::ScheduleEvent

mod slot;
mod store;

pub use store::TimelineStore;
