//! Production scheduling engine for a multi-stage brewery pipeline.
//!
//! Turns a demand plan into a time-ordered assignment of pipeline stages
//! (brew → ferment → filter → condition → package) to capacity-limited
//! equipment, then derives utilization and bottleneck analytics from the
//! resulting timeline. A simulation context layers a logical clock and
//! breakdown scenarios on top.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `ProductSku`, `ProcessProfile`, `Resource`,
//!   `ResourceRegistry`, `DemandItem`, `ScheduleEvent`, `Alert`
//! - **`timeline`**: Booking store and earliest-slot search
//! - **`scheduler`**: Greedy pipeline scheduler (batching + stage walk)
//! - **`analytics`**: Utilization KPIs and bottleneck detection
//! - **`simulation`**: Owning context, simulation clock, breakdown scenarios
//! - **`config`**: Master data and scheduler settings
//! - **`validation`**: Master data and input checks
//!
//! # Time Representation
//!
//! All times are whole hours relative to plan start (t=0).
//!
//! # Architecture
//!
//! Single-threaded and synchronous. All mutable state lives in one
//! [`simulation::Simulation`] value; independent simulations never share
//! state.

pub mod analytics;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod scheduler;
pub mod simulation;
pub mod timeline;
pub mod validation;

pub use config::BreweryConfig;
pub use error::SimulationError;
pub use simulation::Simulation;
