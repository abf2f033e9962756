//! Greedy pipeline scheduler.
//!
//! Turns a demand plan into bookings: each demand item is split into
//! tank-sized batches, and each batch walks the five pipeline stages
//! (brew → ferment → filter → condition → package), taking the earliest
//! free slot on the first unit of each kind.
//!
//! # Algorithm
//!
//! Single-pass, greedy, deterministic. It is not optimal: units are never
//! compared against each other, and a booked stage is never moved.
//!
//! # Seams
//!
//! - [`PackagingDuration`]: how long a batch occupies its packaging line
//! - [`ReplanPolicy`]: which bookings survive the reset at the start of a pass

mod packaging;
mod pipeline;
mod replan;

pub use packaging::{PackagingDuration, PackagingModel};
pub use pipeline::{batch_count, PipelineScheduler, ScheduleOutcome, SchedulingIssue};
pub use replan::ReplanPolicy;
