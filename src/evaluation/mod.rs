//! Capacity-constrained evaluation of ranked and random investigation policies

pub mod allocator;
pub mod bootstrap;
pub mod loss;
pub mod periods;
pub mod ranked;
pub mod report;

pub use bootstrap::BootstrapBaselineEstimator;
pub use periods::PeriodIndex;
pub use ranked::RankedEvaluator;
pub use report::ComparisonReporter;
