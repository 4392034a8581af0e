use async_trait::async_trait;
use log::{info, warn};
use std::sync::Arc;

use crate::filter::Filter;
use crate::hydrator::Hydrator;
use crate::query_hydrator::QueryHydrator;
use crate::scorer::Scorer;
use crate::selector::Selector;
use crate::side_effect::{SideEffect, SideEffectInput};
use crate::source::Source;

/// Queries carry a request id so every log line of a pipeline run can
/// be correlated.
pub trait HasRequestId {
    fn request_id(&self) -> &str;
}

/// Final output of a pipeline run.
pub struct PipelineResult<Q, C> {
    /// The query after all query hydrators ran.
    pub query: Q,
    /// Candidate count produced by the sources, before filtering.
    pub retrieved_candidates: usize,
    /// Candidate count removed by filters.
    pub removed_count: usize,
    /// The selected candidates, sorted by the selector.
    pub selected_candidates: Vec<C>,
}

/// A staged candidate pipeline: query hydration, sourcing, candidate
/// hydration, filtering, scoring, selection, then side effects.
///
/// Stage errors degrade rather than abort: a failing hydrator, filter,
/// or scorer is logged and skipped, so one bad stage cannot take down
/// the whole dashboard response. Source errors are fatal since there is
/// nothing to run the rest of the pipeline on.
#[async_trait]
pub trait CandidatePipeline<Q, C>: Send + Sync
where
    Q: HasRequestId + Clone + Send + Sync + 'static,
    C: Clone + Send + Sync + 'static,
{
    fn query_hydrators(&self) -> &[Box<dyn QueryHydrator<Q>>];
    fn sources(&self) -> &[Box<dyn Source<Q, C>>];
    fn hydrators(&self) -> &[Box<dyn Hydrator<Q, C>>];
    fn filters(&self) -> &[Box<dyn Filter<Q, C>>];
    fn scorers(&self) -> &[Box<dyn Scorer<Q, C>>];
    fn selector(&self) -> &dyn Selector<Q, C>;
    fn side_effects(&self) -> &[Arc<dyn SideEffect<Q, C>>];

    /// Returns a stable name for logging.
    fn name(&self) -> &str {
        crate::util::short_type_name(std::any::type_name::<Self>())
    }

    async fn execute(&self, query: Q) -> Result<PipelineResult<Q, C>, String> {
        let request_id = query.request_id().to_string();
        info!("[{}] {} pipeline start", request_id, self.name());

        // Query hydration. Each hydrator sees the query as updated by
        // the ones before it.
        let mut query = query;
        for query_hydrator in self.query_hydrators() {
            if !query_hydrator.enable(&query) {
                continue;
            }
            match query_hydrator.hydrate(&query).await {
                Ok(hydrated) => query_hydrator.update(&mut query, hydrated),
                Err(e) => {
                    warn!(
                        "[{}] query hydrator {} failed: {}",
                        request_id,
                        query_hydrator.name(),
                        e
                    );
                }
            }
        }

        // Sourcing. Sources run independently and their outputs concat.
        let mut candidates: Vec<C> = Vec::new();
        for source in self.sources() {
            if !source.enable(&query) {
                continue;
            }
            let mut sourced = source.get_candidates(&query).await?;
            info!(
                "[{}] source {} produced {} candidates",
                request_id,
                source.name(),
                sourced.len()
            );
            candidates.append(&mut sourced);
        }
        let retrieved_candidates = candidates.len();

        // Candidate hydration.
        for hydrator in self.hydrators() {
            if !hydrator.enable(&query) {
                continue;
            }
            match hydrator.hydrate(&query, &candidates).await {
                Ok(hydrated) if hydrated.len() == candidates.len() => {
                    for (candidate, h) in candidates.iter_mut().zip(hydrated) {
                        hydrator.update(candidate, h);
                    }
                }
                Ok(hydrated) => {
                    warn!(
                        "[{}] hydrator {} returned {} candidates for {}, skipping",
                        request_id,
                        hydrator.name(),
                        hydrated.len(),
                        candidates.len()
                    );
                }
                Err(e) => {
                    warn!("[{}] hydrator {} failed: {}", request_id, hydrator.name(), e);
                }
            }
        }

        // Filtering.
        let mut removed_count = 0usize;
        for filter in self.filters() {
            if !filter.enable(&query) {
                continue;
            }
            let input = std::mem::take(&mut candidates);
            let input_len = input.len();
            match filter.filter(&query, input).await {
                Ok(result) => {
                    removed_count += result.removed.len();
                    info!(
                        "[{}] filter {} kept {}/{}",
                        request_id,
                        filter.name(),
                        result.kept.len(),
                        input_len
                    );
                    candidates = result.kept;
                }
                Err(e) => {
                    warn!("[{}] filter {} failed: {}", request_id, filter.name(), e);
                    // The filter consumed the candidates; without its
                    // result there is nothing left to pass downstream.
                    return Err(format!("filter {} failed: {e}", filter.name()));
                }
            }
        }

        // Scoring.
        for scorer in self.scorers() {
            if !scorer.enable(&query) {
                continue;
            }
            match scorer.score(&query, &candidates).await {
                Ok(scored) if scored.len() == candidates.len() => {
                    for (candidate, s) in candidates.iter_mut().zip(scored) {
                        scorer.update(candidate, s);
                    }
                }
                Ok(scored) => {
                    warn!(
                        "[{}] scorer {} returned {} candidates for {}, skipping",
                        request_id,
                        scorer.name(),
                        scored.len(),
                        candidates.len()
                    );
                }
                Err(e) => {
                    warn!("[{}] scorer {} failed: {}", request_id, scorer.name(), e);
                }
            }
        }

        // Selection.
        let selector = self.selector();
        let selected_candidates = if selector.enable(&query) {
            selector.select(&query, candidates)
        } else {
            candidates
        };
        info!(
            "[{}] selector {} kept {} candidates",
            request_id,
            selector.name(),
            selected_candidates.len()
        );

        // Side effects observe the result but cannot change it.
        let input = Arc::new(SideEffectInput {
            query: Arc::new(query.clone()),
            selected_candidates: selected_candidates.clone(),
        });
        for side_effect in self.side_effects() {
            if !side_effect.enable(Arc::clone(&input.query)) {
                continue;
            }
            if let Err(e) = side_effect.run(Arc::clone(&input)).await {
                warn!(
                    "[{}] side effect {} failed: {}",
                    request_id,
                    side_effect.name(),
                    e
                );
            }
        }

        Ok(PipelineResult {
            query,
            retrieved_candidates,
            removed_count,
            selected_candidates,
        })
    }
}
