//! Equipment model.
//!
//! Resources are the physical units that pipeline stages occupy:
//! brewhouses, fermentation tanks, bright-beer tanks, filters and
//! packaging lines. Tanks carry a volume capacity; packaging lines carry
//! the packaging family they fill.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{PackagingFamily, TaskKind};

/// A unit of equipment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    /// Unique resource identifier (e.g., "FT1").
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Equipment classification.
    pub kind: ResourceKind,
    /// Current operational state.
    pub status: ResourceStatus,
    /// Volume capacity (tanks only).
    pub capacity: Option<i64>,
    /// Family filled by this line (packaging lines only).
    pub line_family: Option<PackagingFamily>,
}

/// Equipment classification.
///
/// Declaration order is the fixed enumeration order used by analytics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ResourceKind {
    Brewhouse,
    FermentationTank,
    BrightBeerTank,
    Filter,
    PackagingLine,
}

/// Operational state of a resource.
///
/// Rendered as free text (`Available`, `Empty`, the running task's name, or
/// `Maintenance`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResourceStatus {
    /// Idle, generic.
    Available,
    /// Idle tank with no contents.
    Empty,
    /// A booked task has started.
    Active(TaskKind),
    /// Taken out of service.
    Maintenance,
}

impl ResourceKind {
    /// All kinds in enumeration order.
    pub const ALL: [ResourceKind; 5] = [
        ResourceKind::Brewhouse,
        ResourceKind::FermentationTank,
        ResourceKind::BrightBeerTank,
        ResourceKind::Filter,
        ResourceKind::PackagingLine,
    ];

    /// Whether units of this kind hold liquid and have a capacity.
    pub fn is_tank(&self) -> bool {
        matches!(self, Self::FermentationTank | Self::BrightBeerTank)
    }

    /// Singular name used in operator messages.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Brewhouse => "Brewhouse",
            Self::FermentationTank => "Fermentation Tank",
            Self::BrightBeerTank => "Bright Beer Tank",
            Self::Filter => "Filter",
            Self::PackagingLine => "Packaging Line",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl ResourceStatus {
    /// Status a resource takes when a booked task starts.
    pub fn from_task(task: TaskKind) -> Self {
        match task {
            TaskKind::Maintenance => Self::Maintenance,
            other => Self::Active(other),
        }
    }

    /// Whether the resource counts as idle for batch sizing.
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Available | Self::Empty)
    }
}

impl fmt::Display for ResourceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Available => f.write_str("Available"),
            Self::Empty => f.write_str("Empty"),
            Self::Active(task) => f.write_str(task.as_str()),
            Self::Maintenance => f.write_str("Maintenance"),
        }
    }
}

impl Resource {
    /// Creates a resource of the given kind with status `Available`.
    pub fn new(id: impl Into<String>, kind: ResourceKind) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            kind,
            status: ResourceStatus::Available,
            capacity: None,
            line_family: None,
        }
    }

    /// Creates a brewhouse.
    pub fn brewhouse(id: impl Into<String>) -> Self {
        Self::new(id, ResourceKind::Brewhouse)
    }

    /// Creates an empty fermentation tank.
    pub fn fermentation_tank(id: impl Into<String>, capacity: i64) -> Self {
        Self::new(id, ResourceKind::FermentationTank)
            .with_capacity(capacity)
            .with_status(ResourceStatus::Empty)
    }

    /// Creates an empty bright-beer tank.
    pub fn bright_beer_tank(id: impl Into<String>, capacity: i64) -> Self {
        Self::new(id, ResourceKind::BrightBeerTank)
            .with_capacity(capacity)
            .with_status(ResourceStatus::Empty)
    }

    /// Creates a filter.
    pub fn filter(id: impl Into<String>) -> Self {
        Self::new(id, ResourceKind::Filter)
    }

    /// Creates a packaging line for a family.
    pub fn packaging_line(id: impl Into<String>, family: PackagingFamily) -> Self {
        let mut line = Self::new(id, ResourceKind::PackagingLine);
        line.line_family = Some(family);
        line
    }

    /// Sets the resource name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the capacity.
    pub fn with_capacity(mut self, capacity: i64) -> Self {
        self.capacity = Some(capacity);
        self
    }

    /// Sets the initial status.
    pub fn with_status(mut self, status: ResourceStatus) -> Self {
        self.status = status;
        self
    }

    /// Display name, falling back to the ID.
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            &self.id
        } else {
            &self.name
        }
    }

    /// Whether this resource is a tank.
    pub fn is_tank(&self) -> bool {
        self.kind.is_tank()
    }

    /// Whether this resource is idle.
    pub fn is_idle(&self) -> bool {
        self.status.is_idle()
    }
}
