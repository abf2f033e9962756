//! Simulation context.
//!
//! A [`Simulation`] owns everything one simulated brewery needs: the
//! resource registry, the process catalog, the timeline store, the demand
//! plan, the logical clock and the alert log. Every inbound operation goes
//! through it, and every rejected input or degraded scheduling decision is
//! posted as an [`Alert`] stamped with the clock. Independent simulations
//! share no state.
//!
//! # Example
//!
//! ```
//! use u_brewsim::{BreweryConfig, Simulation};
//!
//! let mut sim = Simulation::new(BreweryConfig::reference()).unwrap();
//! sim.add_demand(1, 1000).unwrap();
//! let outcome = sim.generate_schedule();
//! assert_eq!(outcome.batches_started, 3);
//!
//! sim.advance(24).unwrap();
//! assert!(sim.utilization().brewhouse_pct > 0.0);
//! ```

mod clock;
mod scenario;

pub use scenario::MAINTENANCE_H;

use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use crate::analytics::{detect_bottleneck, BottleneckReport, UtilizationKpi};
use crate::config::BreweryConfig;
use crate::error::SimulationError;
use crate::models::{
    Alert, DemandItem, DemandPlan, ProcessCatalog, ResourceKind, ResourceRegistry,
    ResourceStatus, ScheduleEvent, Severity,
};
use crate::scheduler::{PipelineScheduler, ScheduleOutcome};
use crate::timeline::TimelineStore;
use crate::validation::{parse_capacity, validate_master_data};

/// Status line for one resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceSnapshot {
    pub id: String,
    pub name: String,
    pub kind: ResourceKind,
    pub status: ResourceStatus,
    /// Tank capacity, `None` for other kinds.
    pub capacity: Option<i64>,
}

/// Everything a presentation shell renders after a mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationReport {
    pub clock_h: i64,
    pub demand: Vec<DemandItem>,
    /// Flat event log sorted by start time.
    pub events: Vec<ScheduleEvent>,
    /// Resources in registration order.
    pub resources: Vec<ResourceSnapshot>,
    pub utilization: UtilizationKpi,
    pub bottleneck: Option<BottleneckReport>,
}

/// Owning context for one simulated brewery.
#[derive(Debug, Clone)]
pub struct Simulation {
    registry: ResourceRegistry,
    catalog: ProcessCatalog,
    store: TimelineStore,
    demand: DemandPlan,
    clock_h: i64,
    alerts: Vec<Alert>,
    scheduler: PipelineScheduler,
}

impl Simulation {
    /// Builds a simulation at hour 0 with an empty demand plan.
    ///
    /// # Errors
    /// [`SimulationError::InvalidMasterData`] listing every problem found.
    pub fn new(config: BreweryConfig) -> Result<Self, SimulationError> {
        validate_master_data(&config).map_err(SimulationError::InvalidMasterData)?;

        let scheduler = config.scheduler.build();
        let registry = ResourceRegistry::from_resources(config.resources);
        let catalog = ProcessCatalog::new(config.skus, config.profiles, config.non_productive);
        info!(
            resources = registry.len(),
            skus = catalog.skus().len(),
            "simulation created"
        );

        Ok(Self {
            registry,
            catalog,
            store: TimelineStore::new(),
            demand: DemandPlan::new(),
            clock_h: 0,
            alerts: Vec::new(),
            scheduler,
        })
    }

    /// Adds demand for a SKU, summing into an existing entry.
    ///
    /// # Errors
    /// Unknown SKU or non-positive quantity. The plan is left untouched.
    pub fn add_demand(&mut self, sku_id: u32, quantity: i64) -> Result<(), SimulationError> {
        if self.catalog.sku(sku_id).is_none() {
            return Err(self.reject(SimulationError::UnknownSku(sku_id)));
        }
        if quantity <= 0 {
            return Err(self.reject(SimulationError::InvalidQuantity(quantity, sku_id)));
        }
        self.demand.add(sku_id, quantity);
        info!(sku_id, quantity, "demand added");
        Ok(())
    }

    /// Updates a tank's capacity.
    ///
    /// # Errors
    /// Non-positive capacity, unknown resource, or a resource that is not a
    /// tank. Prior state is left untouched.
    pub fn set_tank_capacity(&mut self, tank_id: &str, capacity: i64) -> Result<(), SimulationError> {
        if capacity <= 0 {
            return Err(self.reject(SimulationError::InvalidCapacity(capacity.to_string())));
        }
        let (is_tank, name) = match self.registry.get(tank_id) {
            Some(r) => (r.is_tank(), r.display_name().to_string()),
            None => return Err(self.reject(SimulationError::UnknownResource(tank_id.to_string()))),
        };
        if !is_tank {
            return Err(self.reject(SimulationError::NotATank(tank_id.to_string())));
        }

        self.registry.set_capacity(tank_id, capacity);
        self.post(Alert::info(
            self.clock_h,
            format!("Capacity for {name} updated to {capacity}L."),
        ));
        Ok(())
    }

    /// Updates a tank's capacity from operator text.
    pub fn set_tank_capacity_input(&mut self, tank_id: &str, raw: &str) -> Result<(), SimulationError> {
        match parse_capacity(raw) {
            Ok(capacity) => self.set_tank_capacity(tank_id, capacity),
            Err(e) => Err(self.reject(e)),
        }
    }

    /// Re-plans the whole demand plan.
    ///
    /// Scheduling problems are posted as alerts; the returned outcome also
    /// carries them.
    pub fn generate_schedule(&mut self) -> ScheduleOutcome {
        let outcome = self.scheduler.schedule(
            self.demand.items(),
            &self.registry,
            &self.catalog,
            &mut self.store,
        );
        for issue in &outcome.issues {
            self.post(Alert::new(self.clock_h, issue.severity, issue.message.clone()));
        }
        outcome
    }

    /// Current simulation clock (hours since plan start).
    pub fn clock_h(&self) -> i64 {
        self.clock_h
    }

    /// Alerts in posting order.
    pub fn alerts(&self) -> &[Alert] {
        &self.alerts
    }

    /// Demand items in submission order.
    pub fn demand(&self) -> &[DemandItem] {
        self.demand.items()
    }

    /// Flat event log sorted by start time.
    pub fn events(&self) -> Vec<&ScheduleEvent> {
        self.store.chronological()
    }

    pub fn registry(&self) -> &ResourceRegistry {
        &self.registry
    }

    pub fn catalog(&self) -> &ProcessCatalog {
        &self.catalog
    }

    pub fn timelines(&self) -> &TimelineStore {
        &self.store
    }

    /// Utilization KPIs as of the current clock.
    pub fn utilization(&self) -> UtilizationKpi {
        UtilizationKpi::calculate(&self.registry, &self.store, self.clock_h)
    }

    /// Most loaded resource kind, `None` before anything is scheduled.
    pub fn bottleneck(&self) -> Option<BottleneckReport> {
        detect_bottleneck(&self.registry, &self.store)
    }

    /// Snapshot of everything the shell renders.
    pub fn report(&self) -> SimulationReport {
        SimulationReport {
            clock_h: self.clock_h,
            demand: self.demand.items().to_vec(),
            events: self.store.chronological().into_iter().cloned().collect(),
            resources: self
                .registry
                .iter()
                .map(|r| ResourceSnapshot {
                    id: r.id.clone(),
                    name: r.display_name().to_string(),
                    kind: r.kind,
                    status: r.status.clone(),
                    capacity: r.capacity,
                })
                .collect(),
            utilization: self.utilization(),
            bottleneck: self.bottleneck(),
        }
    }

    fn post(&mut self, alert: Alert) {
        match alert.severity {
            Severity::Info => info!(hour = alert.hour, "{}", alert.message),
            Severity::Warning => warn!(hour = alert.hour, "{}", alert.message),
            Severity::Error => error!(hour = alert.hour, "{}", alert.message),
        }
        self.alerts.push(alert);
    }

    fn reject(&mut self, err: SimulationError) -> SimulationError {
        self.post(Alert::error(self.clock_h, err.to_string()));
        err
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PackagingFamily, ProcessProfile, ProductSku, Resource, TaskKind};

    pub(super) fn small_config() -> BreweryConfig {
        BreweryConfig::new()
            .with_sku(
                ProductSku::new(1, "IPA - 330ml Can", PackagingFamily::Can),
                ProcessProfile::new(8, 14, 5, 6),
            )
            .with_sku(
                ProductSku::new(2, "Stout - 50L Keg", PackagingFamily::Keg),
                ProcessProfile::new(10, 21, 8, 8),
            )
            .with_resource(Resource::brewhouse("BH1").with_name("Brewhouse 1"))
            .with_resource(Resource::fermentation_tank("FT1", 400).with_name("Fermentation Tank 1"))
            .with_resource(Resource::bright_beer_tank("BBT1", 500))
            .with_resource(Resource::filter("F1"))
            .with_resource(Resource::packaging_line("PL1", PackagingFamily::Can))
    }

    #[test]
    fn test_new_rejects_invalid_master_data() {
        let config = small_config().with_resource(Resource::filter("F1"));
        match Simulation::new(config) {
            Err(SimulationError::InvalidMasterData(errors)) => assert_eq!(errors.len(), 1),
            other => panic!("expected InvalidMasterData, got {other:?}"),
        }
    }

    #[test]
    fn test_add_demand_merges() {
        let mut sim = Simulation::new(small_config()).unwrap();
        sim.add_demand(1, 400).unwrap();
        sim.add_demand(2, 100).unwrap();
        sim.add_demand(1, 200).unwrap();

        assert_eq!(sim.demand().len(), 2);
        assert_eq!(sim.demand()[0].quantity, 600);
        assert_eq!(sim.demand()[0].fulfilled, 0);
        assert!(sim.alerts().is_empty());
    }

    #[test]
    fn test_add_demand_rejects_bad_input() {
        let mut sim = Simulation::new(small_config()).unwrap();
        assert!(matches!(
            sim.add_demand(99, 10),
            Err(SimulationError::UnknownSku(99))
        ));
        assert!(matches!(
            sim.add_demand(1, 0),
            Err(SimulationError::InvalidQuantity(0, 1))
        ));
        assert!(sim.demand().is_empty());
        assert_eq!(sim.alerts().len(), 2);
        assert!(sim.alerts().iter().all(|a| a.severity == Severity::Error));
    }

    #[test]
    fn test_set_tank_capacity() {
        let mut sim = Simulation::new(small_config()).unwrap();
        sim.set_tank_capacity("FT1", 650).unwrap();

        assert_eq!(sim.registry().get("FT1").unwrap().capacity, Some(650));
        let alert = sim.alerts().last().unwrap();
        assert_eq!(alert.severity, Severity::Info);
        assert_eq!(alert.message, "Capacity for Fermentation Tank 1 updated to 650L.");
    }

    #[test]
    fn test_set_tank_capacity_rejections_leave_state() {
        let mut sim = Simulation::new(small_config()).unwrap();

        assert!(matches!(
            sim.set_tank_capacity("FT1", 0),
            Err(SimulationError::InvalidCapacity(_))
        ));
        assert!(matches!(
            sim.set_tank_capacity("FT1", -20),
            Err(SimulationError::InvalidCapacity(_))
        ));
        assert!(matches!(
            sim.set_tank_capacity("BH1", 100),
            Err(SimulationError::NotATank(_))
        ));
        assert!(matches!(
            sim.set_tank_capacity("FT9", 100),
            Err(SimulationError::UnknownResource(_))
        ));
        assert!(matches!(
            sim.set_tank_capacity_input("FT1", "lots"),
            Err(SimulationError::InvalidCapacity(_))
        ));

        assert_eq!(sim.registry().get("FT1").unwrap().capacity, Some(400));
        assert_eq!(sim.alerts().len(), 5);
        assert!(sim.alerts().iter().all(|a| a.severity == Severity::Error));
    }

    #[test]
    fn test_set_tank_capacity_input() {
        let mut sim = Simulation::new(small_config()).unwrap();
        sim.set_tank_capacity_input("BBT1", " 750 ").unwrap();
        assert_eq!(sim.registry().get("BBT1").unwrap().capacity, Some(750));
    }

    #[test]
    fn test_capacity_change_resizes_batches() {
        let mut sim = Simulation::new(small_config()).unwrap();
        sim.add_demand(1, 1000).unwrap();
        assert_eq!(sim.generate_schedule().batches_started, 3);

        sim.set_tank_capacity("FT1", 500).unwrap();
        assert_eq!(sim.generate_schedule().batches_started, 2);
    }

    #[test]
    fn test_exhaustion_posts_single_error() {
        crate::logging::init_test();
        let config = BreweryConfig::new()
            .with_sku(
                ProductSku::new(1, "IPA - 330ml Can", PackagingFamily::Can),
                ProcessProfile::new(8, 14, 5, 6),
            )
            .with_resource(Resource::brewhouse("BH1"))
            .with_resource(Resource::bright_beer_tank("BBT1", 500))
            .with_resource(Resource::filter("F1"))
            .with_resource(Resource::packaging_line("PL1", PackagingFamily::Can));
        let mut sim = Simulation::new(config).unwrap();
        sim.add_demand(1, 400).unwrap();

        let outcome = sim.generate_schedule();

        assert_eq!(outcome.batches_started, 0);
        assert!(sim.events().is_empty());
        let errors: Vec<&Alert> = sim
            .alerts()
            .iter()
            .filter(|a| a.severity == Severity::Error)
            .collect();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.contains("IPA - 330ml Can"));
        assert_eq!(errors[0].hour, 0);
    }

    #[test]
    fn test_missing_line_posts_warning() {
        let mut sim = Simulation::new(small_config()).unwrap();
        sim.add_demand(2, 100).unwrap();
        sim.generate_schedule();

        assert!(sim
            .alerts()
            .iter()
            .any(|a| a.severity == Severity::Warning && a.message.contains("Keg")));
        assert!(sim.events().iter().all(|e| e.task != TaskKind::Packaging));
    }

    #[test]
    fn test_report_snapshot() {
        let mut sim = Simulation::new(small_config()).unwrap();
        let empty = sim.report();
        assert!(empty.events.is_empty());
        assert!(empty.bottleneck.is_none());
        assert_eq!(empty.resources.len(), 5);

        sim.add_demand(1, 400).unwrap();
        sim.generate_schedule();
        let report = sim.report();

        assert_eq!(report.clock_h, 0);
        assert_eq!(report.demand.len(), 1);
        assert_eq!(report.events.len(), 10);
        assert!(report.events.windows(2).all(|w| w[0].start_h <= w[1].start_h));
        assert_eq!(report.resources[0].name, "Brewhouse 1");
        assert_eq!(report.resources[2].name, "BBT1");
        assert_eq!(report.resources[1].status, ResourceStatus::Empty);
        assert_eq!(
            report.bottleneck.as_ref().unwrap().kind,
            ResourceKind::FermentationTank
        );

        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"clock_h\":0"));
    }

    #[test]
    fn test_independent_simulations() {
        let mut a = Simulation::new(small_config()).unwrap();
        let b = Simulation::new(small_config()).unwrap();
        a.add_demand(1, 400).unwrap();
        a.generate_schedule();
        a.advance(5).unwrap();

        assert!(b.events().is_empty());
        assert_eq!(b.clock_h(), 0);
        assert!(b.demand().is_empty());
    }
}
