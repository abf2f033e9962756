//! Earliest-slot search.

use tracing::trace;

use super::TimelineStore;

impl TimelineStore {
    /// Earliest start `>= earliest_h` at which `[start, start + duration_h)`
    /// overlaps no booking on `resource_id`.
    ///
    /// # Algorithm
    /// Scan the resource's timeline in insertion order for the first booking
    /// overlapping the candidate window. On a hit, move the candidate to that
    /// booking's end and rescan; otherwise the candidate is free.
    ///
    /// Each jump moves strictly past a real conflict, so the loop ends after
    /// at most one jump per booking. The result does not depend on the
    /// insertion order: a conflicting booking never ends after the earliest
    /// free start.
    ///
    /// # Complexity
    /// O(k²) for k bookings on the resource.
    pub fn find_slot(&self, resource_id: &str, duration_h: i64, earliest_h: i64) -> i64 {
        let mut candidate = earliest_h;
        loop {
            let candidate_end = candidate + duration_h;
            match self
                .timeline(resource_id)
                .find(|e| e.overlaps(candidate, candidate_end))
            {
                Some(conflict) => {
                    trace!(
                        resource = resource_id,
                        candidate,
                        jump_to = conflict.end_h,
                        "slot conflict"
                    );
                    candidate = conflict.end_h;
                }
                None => return candidate,
            }
        }
    }
}
