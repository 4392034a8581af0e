use std::sync::Arc;

use marginboard_core::config::EngineConfig;

use crate::candidate_pipeline::{CandidatePipeline, PipelineResult};
use crate::error::{EngineError, EngineResult};
use crate::components::{
    DimensionFilter, MarginHydrator, ReconciliationSource, RevenueScorer, SnapshotSideEffect,
    TargetDefaultsHydrator, TopNSelector,
};
use crate::filter::Filter;
use crate::hydrator::Hydrator;
use crate::query_hydrator::QueryHydrator;
use crate::records::{CostRecord, ProductRecord, SalesRecord};
use crate::scorer::Scorer;
use crate::selector::Selector;
use crate::side_effect::SideEffect;
use crate::source::Source;
use crate::types::{DashboardQuery, StyleCandidate};

/// The margin dashboard pipeline: reconcile, hydrate margins, filter by
/// the active dimensions, rank by revenue, select.
///
/// Built once per loaded data set; every filter change executes it again
/// with a fresh query. All derived views recompute from the raw records,
/// nothing is incrementally patched.
pub struct DashboardPipeline {
    query_hydrators: Vec<Box<dyn QueryHydrator<DashboardQuery>>>,
    sources: Vec<Box<dyn Source<DashboardQuery, StyleCandidate>>>,
    hydrators: Vec<Box<dyn Hydrator<DashboardQuery, StyleCandidate>>>,
    filters: Vec<Box<dyn Filter<DashboardQuery, StyleCandidate>>>,
    scorers: Vec<Box<dyn Scorer<DashboardQuery, StyleCandidate>>>,
    selector: Box<dyn Selector<DashboardQuery, StyleCandidate>>,
    side_effects: Vec<Arc<dyn SideEffect<DashboardQuery, StyleCandidate>>>,
}

impl DashboardPipeline {
    pub fn new(
        products: Vec<ProductRecord>,
        sales: Vec<SalesRecord>,
        costs: Vec<CostRecord>,
        config: &EngineConfig,
    ) -> Self {
        Self {
            query_hydrators: vec![Box::new(TargetDefaultsHydrator::new(config))],
            sources: vec![Box::new(ReconciliationSource::new(
                products,
                sales,
                costs,
                config.channels.clone(),
            ))],
            hydrators: vec![Box::new(MarginHydrator::new(config))],
            filters: vec![Box::new(DimensionFilter::new(config.channels.clone()))],
            scorers: vec![Box::new(RevenueScorer)],
            selector: Box::new(TopNSelector::unbounded()),
            side_effects: vec![Arc::new(SnapshotSideEffect)],
        }
    }

    /// Execute and lift stage failures into the typed engine error.
    pub async fn run(
        &self,
        query: DashboardQuery,
    ) -> EngineResult<PipelineResult<DashboardQuery, StyleCandidate>> {
        self.execute(query)
            .await
            .map_err(|reason| EngineError::StageFailed {
                stage: self.name().to_string(),
                reason,
            })
    }
}

impl CandidatePipeline<DashboardQuery, StyleCandidate> for DashboardPipeline {
    fn query_hydrators(&self) -> &[Box<dyn QueryHydrator<DashboardQuery>>] {
        &self.query_hydrators
    }

    fn sources(&self) -> &[Box<dyn Source<DashboardQuery, StyleCandidate>>] {
        &self.sources
    }

    fn hydrators(&self) -> &[Box<dyn Hydrator<DashboardQuery, StyleCandidate>>] {
        &self.hydrators
    }

    fn filters(&self) -> &[Box<dyn Filter<DashboardQuery, StyleCandidate>>] {
        &self.filters
    }

    fn scorers(&self) -> &[Box<dyn Scorer<DashboardQuery, StyleCandidate>>] {
        &self.scorers
    }

    fn selector(&self) -> &dyn Selector<DashboardQuery, StyleCandidate> {
        self.selector.as_ref()
    }

    fn side_effects(&self) -> &[Arc<dyn SideEffect<DashboardQuery, StyleCandidate>>] {
        &self.side_effects
    }
}
