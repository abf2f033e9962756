//! Master data and scheduler settings.
//!
//! A [`BreweryConfig`] is everything a simulation needs before the first
//! demand arrives: products, their timings, overhead times, equipment, and
//! scheduler options. Reading documents from disk is left to the caller;
//! this module only parses text.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::SimulationError;
use crate::models::{
    CleaningTimes, NonProductiveTimes, PackagingFamily, ProcessProfile, ProductSku, Resource,
};
use crate::scheduler::{PackagingModel, PipelineScheduler, ReplanPolicy};

/// Scheduler options.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// How long a batch occupies its packaging line.
    pub packaging: PackagingModel,
    /// Which bookings survive a re-plan.
    pub replan_policy: ReplanPolicy,
}

impl SchedulerConfig {
    /// Builds a scheduler with these options.
    pub fn build(&self) -> PipelineScheduler {
        PipelineScheduler::new()
            .with_packaging(self.packaging.clone())
            .with_replan_policy(self.replan_policy)
    }
}

/// Master data bundle.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BreweryConfig {
    pub skus: Vec<ProductSku>,
    /// Timing profile per SKU ID.
    pub profiles: BTreeMap<u32, ProcessProfile>,
    #[serde(default)]
    pub non_productive: NonProductiveTimes,
    /// Equipment in registration order.
    pub resources: Vec<Resource>,
    #[serde(default)]
    pub scheduler: SchedulerConfig,
}

impl BreweryConfig {
    /// Creates an empty configuration with default overhead times.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self, SimulationError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serializes to pretty-printed JSON.
    pub fn to_json_string(&self) -> Result<String, SimulationError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Adds a SKU with its timing profile.
    pub fn with_sku(mut self, sku: ProductSku, profile: ProcessProfile) -> Self {
        self.profiles.insert(sku.id, profile);
        self.skus.push(sku);
        self
    }

    /// Adds a resource.
    pub fn with_resource(mut self, resource: Resource) -> Self {
        self.resources.push(resource);
        self
    }

    /// Sets overhead times.
    pub fn with_non_productive(mut self, non_productive: NonProductiveTimes) -> Self {
        self.non_productive = non_productive;
        self
    }

    /// Sets scheduler options.
    pub fn with_scheduler(mut self, scheduler: SchedulerConfig) -> Self {
        self.scheduler = scheduler;
        self
    }

    /// The reference brewery: three SKUs and a 49-unit plant.
    pub fn reference() -> Self {
        let mut config = Self::new()
            .with_sku(
                ProductSku::new(1, "IPA - 330ml Can", PackagingFamily::Can)
                    .with_brand("Crafty Ales")
                    .with_flavor("Hoppy"),
                ProcessProfile::new(8, 14, 5, 6).with_packaging_rate(3000.0),
            )
            .with_sku(
                ProductSku::new(2, "Stout - 50L Keg", PackagingFamily::Keg)
                    .with_brand("Dark Horse")
                    .with_flavor("Rich"),
                ProcessProfile::new(10, 21, 8, 8).with_packaging_rate(50.0),
            )
            .with_sku(
                ProductSku::new(3, "Lager - 330ml Bottle", PackagingFamily::Bottle)
                    .with_brand("Classic Brews")
                    .with_flavor("Crisp"),
                ProcessProfile::new(9, 18, 6, 7).with_packaging_rate(2500.0),
            )
            .with_non_productive(NonProductiveTimes::new(
                CleaningTimes {
                    brewhouse_h: 2,
                    tank_h: 4,
                    filter_h: 3,
                    line_h: 2,
                },
                3,
            ));

        for i in 1..=2 {
            config = config.with_resource(
                Resource::brewhouse(format!("BH{i}")).with_name(format!("Brewhouse {i}")),
            );
        }
        for i in 1..=40 {
            config = config.with_resource(
                Resource::fermentation_tank(format!("FT{i}"), 400)
                    .with_name(format!("Fermentation Tank {i}")),
            );
        }
        for i in 1..=5 {
            config = config.with_resource(
                Resource::bright_beer_tank(format!("BBT{i}"), 500)
                    .with_name(format!("Bright Beer Tank {i}")),
            );
        }
        config
            .with_resource(Resource::filter("F1").with_name("Filter 1"))
            .with_resource(
                Resource::packaging_line("PL1", PackagingFamily::Can).with_name("Can Line"),
            )
            .with_resource(
                Resource::packaging_line("PL2", PackagingFamily::Keg).with_name("Keg Line"),
            )
            .with_resource(
                Resource::packaging_line("PL3", PackagingFamily::Bottle).with_name("Bottle Line"),
            )
    }
}
