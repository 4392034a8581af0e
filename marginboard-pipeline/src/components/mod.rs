//! Concrete pipeline stages for the margin dashboard.

pub mod dimension_filter;
pub mod margin_hydrator;
pub mod reconciliation_source;
pub mod revenue_scorer;
pub mod snapshot_side_effect;
pub mod target_defaults_hydrator;
pub mod top_n_selector;

pub use dimension_filter::DimensionFilter;
pub use margin_hydrator::MarginHydrator;
pub use reconciliation_source::ReconciliationSource;
pub use revenue_scorer::RevenueScorer;
pub use snapshot_side_effect::SnapshotSideEffect;
pub use target_defaults_hydrator::TargetDefaultsHydrator;
pub use top_n_selector::TopNSelector;
