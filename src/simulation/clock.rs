//! Simulation clock.
//!
//! # Algorithm
//!
//! `advance(delta)` moves the clock from `previous` to `previous + delta`,
//! then walks the flat event log in start order. An event whose start falls
//! in `[previous, clock)` puts its resource into the event's task status;
//! an event whose end falls in the same window sets the resource back to
//! `Available`. The last touch wins, so status reflects only the most recent
//! start or end seen in the window.

use tracing::debug;

use super::Simulation;
use crate::analytics::UtilizationKpi;
use crate::error::SimulationError;
use crate::models::{ResourceRegistry, ResourceStatus, ScheduleEvent};

impl Simulation {
    /// Advances the clock by `delta_h` hours and reconciles resource status.
    ///
    /// Returns the utilization KPIs at the new clock.
    ///
    /// # Errors
    /// [`SimulationError::InvalidClockDelta`] for a negative delta; the
    /// clock does not move.
    pub fn advance(&mut self, delta_h: i64) -> Result<UtilizationKpi, SimulationError> {
        if delta_h < 0 {
            return Err(self.reject(SimulationError::InvalidClockDelta(delta_h)));
        }
        let previous_h = self.clock_h;
        self.clock_h += delta_h;

        let events = self.store.chronological();
        let changes = reconcile(&mut self.registry, &events, previous_h, self.clock_h);
        debug!(from = previous_h, to = self.clock_h, changes, "clock advanced");

        Ok(self.utilization())
    }
}

/// Applies status transitions for events starting or ending in
/// `[from_h, to_h)`. Returns the number of status writes.
fn reconcile(
    registry: &mut ResourceRegistry,
    events: &[&ScheduleEvent],
    from_h: i64,
    to_h: i64,
) -> usize {
    let in_window = |t: i64| t >= from_h && t < to_h;
    let mut changes = 0;

    for event in events {
        if in_window(event.start_h)
            && registry.set_status(&event.resource_id, ResourceStatus::from_task(event.task))
        {
            changes += 1;
        }
        if in_window(event.end_h) && registry.set_status(&event.resource_id, ResourceStatus::Available)
        {
            changes += 1;
        }
    }
    changes
}
