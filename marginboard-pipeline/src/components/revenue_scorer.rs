use async_trait::async_trait;

use crate::scorer::Scorer;
use crate::types::{DashboardQuery, StyleCandidate};

/// Ranks candidates by booked revenue. The dashboard leads with the
/// styles that move the most money, whatever their margin looks like.
#[derive(Debug, Default)]
pub struct RevenueScorer;

#[async_trait]
impl Scorer<DashboardQuery, StyleCandidate> for RevenueScorer {
    async fn score(
        &self,
        _query: &DashboardQuery,
        candidates: &[StyleCandidate],
    ) -> Result<Vec<StyleCandidate>, String> {
        Ok(candidates
            .iter()
            .map(|candidate| {
                let mut scored = candidate.clone();
                scored.priority_score = Some(candidate.total_revenue);
                scored
            })
            .collect())
    }

    fn update(&self, candidate: &mut StyleCandidate, scored: StyleCandidate) {
        candidate.priority_score = scored.priority_score;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn score_is_total_revenue() {
        let candidate = StyleCandidate {
            total_revenue: 4000.0,
            ..StyleCandidate::default()
        };
        let scored = RevenueScorer
            .score(&DashboardQuery::new("t"), &[candidate])
            .await
            .unwrap();
        assert_eq!(scored[0].priority_score, Some(4000.0));
    }
}
