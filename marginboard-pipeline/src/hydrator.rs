use async_trait::async_trait;

use crate::util;

/// Hydrators enrich candidates with derived fields (margins, tiers)
/// after sourcing and before filtering/scoring.
#[async_trait]
pub trait Hydrator<Q, C>: Send + Sync
where
    Q: Clone + Send + Sync + 'static,
    C: Clone + Send + Sync + 'static,
{
    /// Decide if this hydrator should run for the given query.
    fn enable(&self, _query: &Q) -> bool {
        true
    }

    /// Hydrate the candidates. The returned vector is parallel to the
    /// input slice.
    async fn hydrate(&self, query: &Q, candidates: &[C]) -> Result<Vec<C>, String>;

    /// Copy this hydrator's fields from `hydrated` into `candidate`.
    fn update(&self, candidate: &mut C, hydrated: C);

    /// Returns a stable name for logging.
    fn name(&self) -> &str {
        util::short_type_name(std::any::type_name::<Self>())
    }
}
