use async_trait::async_trait;
use chrono::Utc;
use log::info;
use serde_json::json;
use std::sync::Arc;

use crate::side_effect::{SideEffect, SideEffectInput};
use crate::types::{DashboardQuery, StyleCandidate};

/// Logs a one-line JSON snapshot of each completed recompute: request
/// id, timestamp, candidate count, total revenue, and how many selected
/// styles still lack a resolved cost. Ops greps these lines to watch
/// data completeness drift as new seasons load.
#[derive(Debug, Default)]
pub struct SnapshotSideEffect;

#[async_trait]
impl SideEffect<DashboardQuery, StyleCandidate> for SnapshotSideEffect {
    async fn run(
        &self,
        input: Arc<SideEffectInput<DashboardQuery, StyleCandidate>>,
    ) -> Result<(), String> {
        let selected = &input.selected_candidates;
        let total_revenue: f64 = selected.iter().map(|c| c.total_revenue).sum();
        let uncosted = selected
            .iter()
            .filter(|c| !c.reconciled.landed_cost.is_resolved())
            .count();

        let snapshot = json!({
            "request_id": input.query.request_id,
            "generated_at": Utc::now().to_rfc3339(),
            "selected": selected.len(),
            "total_revenue": total_revenue,
            "uncosted_styles": uncosted,
        });
        info!("recompute snapshot {snapshot}");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn runs_without_error_on_empty_selection() {
        let input = Arc::new(SideEffectInput {
            query: Arc::new(DashboardQuery::new("t")),
            selected_candidates: Vec::<StyleCandidate>::new(),
        });
        assert!(SnapshotSideEffect.run(input).await.is_ok());
    }
}
