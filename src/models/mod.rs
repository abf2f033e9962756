//! Brewery domain models.
//!
//! Provides the data types the engine schedules over: products and their
//! process timings, physical equipment, demand, and booked events.
//!
//! # Domain Mappings
//!
//! | u-brewsim | Generic scheduling |
//! |-----------|--------------------|
//! | DemandItem | Task/Job |
//! | Pipeline stage | Activity/Operation |
//! | Resource | Machine |
//! | ScheduleEvent | Assignment |
//! | NonProductiveTimes | Setup/Teardown |

mod alert;
mod demand;
mod process;
mod product;
mod registry;
mod resource;
mod schedule;

pub use alert::{Alert, Severity};
pub use demand::{DemandItem, DemandPlan};
pub use process::{CleaningTimes, NonProductiveTimes, ProcessCatalog, ProcessProfile};
pub use product::{PackagingFamily, ProductSku};
pub use registry::ResourceRegistry;
pub use resource::{Resource, ResourceKind, ResourceStatus};
pub use schedule::{format_hours, ScheduleEvent, TaskKind};
