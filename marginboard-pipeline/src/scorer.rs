use async_trait::async_trait;

use crate::util;

/// Scorers compute a value per candidate without mutating the input
/// set; the executor copies results back via `update` so each scorer
/// only ever touches the fields it owns.
#[async_trait]
pub trait Scorer<Q, C>: Send + Sync
where
    Q: Clone + Send + Sync + 'static,
    C: Clone + Send + Sync + 'static,
{
    /// Decide if this scorer should run for the given query.
    fn enable(&self, _query: &Q) -> bool {
        true
    }

    /// Score the candidates. The returned vector is parallel to the
    /// input slice.
    async fn score(&self, query: &Q, candidates: &[C]) -> Result<Vec<C>, String>;

    /// Copy this scorer's fields from `scored` into `candidate`.
    fn update(&self, candidate: &mut C, scored: C);

    /// Returns a stable name for logging.
    fn name(&self) -> &str {
        util::short_type_name(std::any::type_name::<Self>())
    }
}
