//! Five-stage pipeline scheduler.
//!
//! # Algorithm
//!
//! 1. Reset the timelines (see [`ReplanPolicy`]).
//! 2. Stable-sort demand by packaging family to cluster line work.
//! 3. For each item, size batches against the first idle fermentation tank:
//!    `ceil(quantity / capacity)`.
//! 4. For each batch, book brew → ferment → filter → condition → package on
//!    the first unit of each kind, each stage no earlier than the previous
//!    one ends. Successive brews of one SKU start as soon as the previous
//!    brew ends.
//! 5. Book cleaning after each stage and a changeover when the packaging
//!    line differs from the one used last. A stage's slot search covers the
//!    stage and its cleaning, so the two always sit back to back.
//!
//! Resource exhaustion never aborts the pass: the affected item (or the
//! rest of its batches) is dropped and reported as a [`SchedulingIssue`].
//!
//! # Complexity
//! O(b × k²) where b = batches and k = bookings per resource.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::{PackagingDuration, PackagingModel, ReplanPolicy};
use crate::models::{
    DemandItem, ProcessCatalog, ProcessProfile, ProductSku, Resource, ResourceKind,
    ResourceRegistry, ScheduleEvent, Severity, TaskKind,
};
use crate::timeline::TimelineStore;

/// A degraded scheduling decision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchedulingIssue {
    pub severity: Severity,
    /// SKU of the affected demand item.
    pub sku_id: u32,
    /// Affected batch, if the issue arose inside one.
    pub batch: Option<String>,
    pub message: String,
}

/// Result of one scheduling pass.
#[derive(Debug, Clone, Default)]
pub struct ScheduleOutcome {
    /// Flat event log sorted by start time.
    pub events: Vec<ScheduleEvent>,
    /// Problems met along the way.
    pub issues: Vec<SchedulingIssue>,
    /// Batches whose brew stage was booked.
    pub batches_started: usize,
}

/// Greedy pipeline scheduler.
///
/// # Example
///
/// ```
/// use u_brewsim::models::{
///     DemandItem, NonProductiveTimes, PackagingFamily, ProcessCatalog, ProcessProfile,
///     ProductSku, Resource, ResourceRegistry, TaskKind,
/// };
/// use u_brewsim::scheduler::PipelineScheduler;
/// use u_brewsim::timeline::TimelineStore;
/// use std::collections::HashMap;
///
/// let catalog = ProcessCatalog::new(
///     vec![ProductSku::new(1, "IPA", PackagingFamily::Can)],
///     HashMap::from([(1, ProcessProfile::new(8, 14, 5, 6))]),
///     NonProductiveTimes::default(),
/// );
/// let registry = ResourceRegistry::from_resources(vec![
///     Resource::brewhouse("BH1"),
///     Resource::fermentation_tank("FT1", 400),
///     Resource::bright_beer_tank("BBT1", 500),
///     Resource::filter("F1"),
///     Resource::packaging_line("PL1", PackagingFamily::Can),
/// ]);
/// let mut store = TimelineStore::new();
///
/// let outcome = PipelineScheduler::new().schedule(
///     &[DemandItem::new(1, 400)],
///     &registry,
///     &catalog,
///     &mut store,
/// );
/// assert_eq!(outcome.batches_started, 1);
/// assert_eq!(outcome.events[0].task, TaskKind::Brewing);
/// ```
#[derive(Debug, Clone)]
pub struct PipelineScheduler {
    packaging: Arc<dyn PackagingDuration>,
    replan_policy: ReplanPolicy,
}

impl PipelineScheduler {
    /// Creates a scheduler with fixed packaging time and full reset.
    pub fn new() -> Self {
        Self {
            packaging: Arc::new(PackagingModel::default()),
            replan_policy: ReplanPolicy::ClearAll,
        }
    }

    /// Sets the packaging duration model.
    pub fn with_packaging<P: PackagingDuration + 'static>(mut self, packaging: P) -> Self {
        self.packaging = Arc::new(packaging);
        self
    }

    /// Sets the re-plan policy.
    pub fn with_replan_policy(mut self, policy: ReplanPolicy) -> Self {
        self.replan_policy = policy;
        self
    }

    /// The active re-plan policy.
    pub fn replan_policy(&self) -> ReplanPolicy {
        self.replan_policy
    }

    /// Schedules the demand plan into `store`.
    ///
    /// Deterministic for a given demand order and registry state.
    pub fn schedule(
        &self,
        demand: &[DemandItem],
        registry: &ResourceRegistry,
        catalog: &ProcessCatalog,
        store: &mut TimelineStore,
    ) -> ScheduleOutcome {
        self.replan_policy.reset(store);

        let mut pass = Pass {
            registry,
            catalog,
            store,
            packaging: self.packaging.as_ref(),
            last_line: None,
            last_pack_end_h: 0,
            issues: Vec::new(),
            batches_started: 0,
        };
        for item in sort_by_family(demand, catalog) {
            pass.schedule_item(item);
        }

        let issues = pass.issues;
        let batches_started = pass.batches_started;
        let events: Vec<ScheduleEvent> = store.chronological().into_iter().cloned().collect();
        info!(
            batches = batches_started,
            events = events.len(),
            issues = issues.len(),
            "scheduling pass complete"
        );

        ScheduleOutcome {
            events,
            issues,
            batches_started,
        }
    }
}

impl Default for PipelineScheduler {
    fn default() -> Self {
        Self::new()
    }
}

/// Number of tank-sized batches for a quantity: `ceil(quantity / capacity)`.
///
/// Zero for non-positive quantity or capacity.
pub fn batch_count(quantity: i64, capacity: i64) -> i64 {
    if quantity <= 0 || capacity <= 0 {
        return 0;
    }
    (quantity + capacity - 1) / capacity
}

/// Demand in packaging-family order; equal families keep submission order.
/// Items with unknown SKUs go last.
fn sort_by_family<'d>(demand: &'d [DemandItem], catalog: &ProcessCatalog) -> Vec<&'d DemandItem> {
    let mut sorted: Vec<&DemandItem> = demand.iter().collect();
    sorted.sort_by_key(|item| {
        let family = catalog.sku(item.sku_id).map(|s| s.family);
        (family.is_none(), family)
    });
    sorted
}

/// Mutable state of one scheduling pass.
struct Pass<'a> {
    registry: &'a ResourceRegistry,
    catalog: &'a ProcessCatalog,
    store: &'a mut TimelineStore,
    packaging: &'a dyn PackagingDuration,
    /// Line that packaged the previous batch.
    last_line: Option<&'a str>,
    /// When that line finished packaging and cleaning.
    last_pack_end_h: i64,
    issues: Vec<SchedulingIssue>,
    batches_started: usize,
}

impl<'a> Pass<'a> {
    fn schedule_item(&mut self, item: &DemandItem) {
        let catalog = self.catalog;
        let Some(sku) = catalog.sku(item.sku_id) else {
            self.report(
                Severity::Error,
                item.sku_id,
                None,
                format!("SCHEDULING ERROR: Unknown SKU {}.", item.sku_id),
            );
            return;
        };
        let Some(profile) = catalog.profile(sku.id) else {
            self.report(
                Severity::Error,
                sku.id,
                None,
                format!("SCHEDULING ERROR: No process profile for {}.", sku.name),
            );
            return;
        };

        // The representative tank only sizes the batches.
        let capacity = self
            .registry
            .first_idle(ResourceKind::FermentationTank)
            .and_then(|t| t.capacity)
            .filter(|&c| c > 0);
        let Some(capacity) = capacity else {
            self.report(
                Severity::Error,
                sku.id,
                None,
                format!(
                    "SCHEDULING ERROR: No available Fermentation Tank to start production for {}.",
                    sku.name
                ),
            );
            return;
        };

        let batches = batch_count(item.quantity, capacity);
        debug!(sku = %sku.name, quantity = item.quantity, capacity, batches, "batching demand");

        let mut brew_floor_h = 0;
        for i in 0..batches {
            let label = format!("{} (Batch {}/{})", sku.name, i + 1, batches);
            match self.schedule_batch(sku, profile, capacity, &label, brew_floor_h) {
                Ok(brew_end_h) => brew_floor_h = brew_end_h,
                Err(kind) => {
                    self.report(
                        Severity::Error,
                        sku.id,
                        Some(label.clone()),
                        format!(
                            "SCHEDULING ERROR: No available {} for batch {}. Production for this item halted.",
                            kind.display_name(),
                            label
                        ),
                    );
                    break;
                }
            }
        }
    }

    /// Books one batch. Returns the brew end, or the kind that ran out.
    fn schedule_batch(
        &mut self,
        sku: &ProductSku,
        profile: &ProcessProfile,
        batch_volume: i64,
        label: &str,
        brew_floor_h: i64,
    ) -> Result<i64, ResourceKind> {
        let brewhouse = self.first(ResourceKind::Brewhouse)?;
        let brew_start = self.slot_with_cleaning(brewhouse, profile.brew_h, brew_floor_h);
        let brew_end = brew_start + profile.brew_h;
        self.book(brewhouse, brew_start, brew_end, TaskKind::Brewing, label);
        self.clean_at(brewhouse, brew_end);
        self.batches_started += 1;

        let tank = self.first(ResourceKind::FermentationTank)?;
        let ferment_h = profile.fermentation_h();
        let ferment_start = self.store.find_slot(&tank.id, ferment_h, brew_end);
        let ferment_end = ferment_start + ferment_h;
        self.book(tank, ferment_start, ferment_end, TaskKind::Fermentation, label);

        let filter = self.first(ResourceKind::Filter)?;
        let filter_start = self.slot_with_cleaning(filter, profile.filtering_h, ferment_end);
        let filter_end = filter_start + profile.filtering_h;
        self.book(filter, filter_start, filter_end, TaskKind::Filtering, label);
        self.clean_at(filter, filter_end);
        // The tank is held until its beer has passed the filter.
        self.clean_from(tank, filter_end);

        let bbt = self.first(ResourceKind::BrightBeerTank)?;
        let cond_start = self.slot_with_cleaning(bbt, profile.conditioning_h, filter_end);
        let cond_end = cond_start + profile.conditioning_h;
        self.book(bbt, cond_start, cond_end, TaskKind::Conditioning, label);

        let registry = self.registry;
        match registry.first_line_for(sku.family) {
            Some(line) => self.package(line, profile, batch_volume, cond_end, label),
            None => {
                warn!(family = %sku.family, batch = label, "no packaging line");
                self.report(
                    Severity::Warning,
                    sku.id,
                    Some(label.to_string()),
                    format!("No {} packaging line for batch {}. Packaging skipped.", sku.family, label),
                );
            }
        }
        self.clean_at(bbt, cond_end);

        Ok(brew_end)
    }

    /// Books packaging, preceded by a changeover when the line differs from
    /// the previous batch's line.
    ///
    /// Changeover, packaging and line cleaning share one contiguous free
    /// window. The changeover starts when the previous line finished, or
    /// later if the line is busy or conditioning is still running.
    fn package(
        &mut self,
        line: &'a Resource,
        profile: &ProcessProfile,
        batch_volume: i64,
        cond_end: i64,
        label: &str,
    ) {
        let pack_h = self.packaging.duration_h(profile, batch_volume);
        let clean_h = self.cleaning_h(line);
        let switching = self.last_line.is_some_and(|prev| prev != line.id);

        let pack_start = if switching {
            let changeover_h = self.catalog.non_productive().changeover_h;
            let floor = self.last_pack_end_h.max(cond_end - changeover_h);
            let start = self
                .store
                .find_slot(&line.id, changeover_h + pack_h + clean_h, floor);
            self.store.book(
                &line.id,
                start,
                start + changeover_h,
                TaskKind::Changeover,
                None,
            );
            start + changeover_h
        } else {
            self.store.find_slot(&line.id, pack_h + clean_h, cond_end)
        };

        let pack_end = pack_start + pack_h;
        self.book(line, pack_start, pack_end, TaskKind::Packaging, label);
        let clean_end = self.clean_at(line, pack_end);

        self.last_line = Some(line.id.as_str());
        self.last_pack_end_h = clean_end;
    }

    fn first(&self, kind: ResourceKind) -> Result<&'a Resource, ResourceKind> {
        let registry = self.registry;
        registry.first_of_kind(kind).ok_or(kind)
    }

    fn book(&mut self, resource: &Resource, start_h: i64, end_h: i64, task: TaskKind, label: &str) {
        self.store
            .book(&resource.id, start_h, end_h, task, Some(label.to_string()));
    }

    fn cleaning_h(&self, resource: &Resource) -> i64 {
        self.catalog.non_productive().cleaning_for(resource.kind)
    }

    /// Earliest start for a stage of `duration_h` and the cleaning after it.
    fn slot_with_cleaning(&self, resource: &Resource, duration_h: i64, floor_h: i64) -> i64 {
        let total_h = duration_h + self.cleaning_h(resource);
        self.store.find_slot(&resource.id, total_h, floor_h)
    }

    /// Books cleaning at `from_h`, which the caller has already reserved.
    /// Returns the cleaning end.
    fn clean_at(&mut self, resource: &Resource, from_h: i64) -> i64 {
        let end = from_h + self.cleaning_h(resource);
        self.store.book(&resource.id, from_h, end, TaskKind::Cip, None);
        end
    }

    /// Books cleaning in the first free slot from `from_h`.
    fn clean_from(&mut self, resource: &Resource, from_h: i64) -> i64 {
        let start = self.store.find_slot(&resource.id, self.cleaning_h(resource), from_h);
        self.clean_at(resource, start)
    }

    fn report(&mut self, severity: Severity, sku_id: u32, batch: Option<String>, message: String) {
        self.issues.push(SchedulingIssue {
            severity,
            sku_id,
            batch,
            message,
        });
    }
}
