//! Scoring: completion reports and cross-session totals.

pub mod report;
pub mod total;

pub use report::SessionReport;
pub use total::{ScoreAggregator, ScoreTotal};
