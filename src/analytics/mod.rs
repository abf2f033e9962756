//! Timeline analytics.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Brewhouse utilization | Productive brewhouse hours finished by the clock ÷ units ÷ clock |
//! | Fermentation tank utilization | Tank-days finished by the clock ÷ available tank-days |
//! | Bottleneck | Kind with the highest mean productive hours per unit |
//!
//! Cleaning and changeover are overhead and never count as productive.

mod bottleneck;
mod kpi;

pub use bottleneck::{detect_bottleneck, BottleneckReport, KindLoad};
pub use kpi::UtilizationKpi;
