//! Breakdown scenarios.
//!
//! A breakdown takes a resource out of service at the current clock: the
//! resource goes into `Maintenance`, a reservation is booked for
//! [`MAINTENANCE_H`] hours, bookings from the clock onward are dropped and
//! the whole demand plan is re-planned. Whether the reservation survives
//! the re-plan is decided by the scheduler's [`ReplanPolicy`].
//!
//! [`ReplanPolicy`]: crate::scheduler::ReplanPolicy

use tracing::info;

use super::Simulation;
use crate::error::SimulationError;
use crate::models::{Alert, ResourceStatus, TaskKind};
use crate::scheduler::ScheduleOutcome;

/// Length of an injected maintenance reservation (hours).
pub const MAINTENANCE_H: i64 = 24;

impl Simulation {
    /// Injects a breakdown on `resource_id` and re-plans.
    ///
    /// # Errors
    /// [`SimulationError::UnknownResource`]; nothing changes.
    pub fn simulate_breakdown(
        &mut self,
        resource_id: &str,
    ) -> Result<ScheduleOutcome, SimulationError> {
        let name = match self.registry.get(resource_id) {
            Some(r) => r.display_name().to_string(),
            None => {
                return Err(self.reject(SimulationError::UnknownResource(resource_id.to_string())))
            }
        };

        self.registry.set_status(resource_id, ResourceStatus::Maintenance);
        let start_h = self.clock_h;
        self.store.book(
            resource_id,
            start_h,
            start_h + MAINTENANCE_H,
            TaskKind::Maintenance,
            None,
        );
        self.post(Alert::warning(
            start_h,
            format!(
                "SCENARIO: {name} is now under maintenance for {MAINTENANCE_H} hours. Regenerating schedule."
            ),
        ));

        let demand = self.demand.take();
        let policy = self.scheduler.replan_policy();
        let before = self.store.len();
        self.store.retain(|e| e.start_h < start_h || policy.carries(e));
        info!(
            resource = resource_id,
            dropped = before - self.store.len(),
            "future bookings dropped"
        );
        self.demand.restore(demand);

        Ok(self.generate_schedule())
    }
}
