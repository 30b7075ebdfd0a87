pub mod level;
pub mod simulator;
pub mod stats;

#[cfg(test)]
mod unit_tests;

pub use level::CacheLevel;
pub use simulator::{AccessKind, AccessOutcome, HierarchySimulator};
pub use stats::{AccessStatistics, StatsSnapshot};
