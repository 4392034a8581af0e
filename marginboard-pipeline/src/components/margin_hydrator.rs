use async_trait::async_trait;

use marginboard_core::config::{EngineConfig, TierThresholds};
use marginboard_core::margin;
use marginboard_core::margin::MarginTier;

use crate::hydrator::Hydrator;
use crate::types::{DashboardQuery, StyleCandidate};

/// Computes every derived margin figure on a candidate: average net
/// price, baseline and weighted margins, delta, distance to target,
/// tier, cost of goods, and gross profit.
///
/// Missing inputs propagate as `None` throughout; a style without a
/// resolved landed cost gets no margin rather than a fake 0%.
pub struct MarginHydrator {
    default_target_pct: f64,
    tiers: TierThresholds,
}

impl MarginHydrator {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            default_target_pct: config.target_margin_pct,
            tiers: config.tiers.clone(),
        }
    }

    fn hydrate_one(&self, query: &DashboardQuery, candidate: &StyleCandidate) -> StyleCandidate {
        let mut c = candidate.clone();
        let landed = c.reconciled.landed_cost.value;
        let wholesale = c.reconciled.wholesale_price.value;

        c.avg_net_price = margin::avg_net_price(c.total_revenue, c.total_units);

        c.baseline_margin_pct = match (wholesale, landed) {
            (Some(price), Some(cost)) => margin::baseline_margin(price, cost),
            _ => None,
        };
        c.weighted_margin_pct =
            landed.and_then(|cost| margin::weighted_margin(c.total_revenue, c.total_units, cost));
        c.margin_delta_pct = margin::margin_delta(c.weighted_margin_pct, c.baseline_margin_pct);

        let target = query
            .filters
            .target_margin_pct
            .unwrap_or(self.default_target_pct);
        // Tier and target distance classify the realized margin; a style
        // with no sales yet falls back to its baseline.
        let effective = c.weighted_margin_pct.or(c.baseline_margin_pct);
        c.vs_target_pct = effective.map(|m| margin::vs_target(m, target));
        c.tier = effective.map(|m| MarginTier::classify(m, &self.tiers));

        c.cogs = landed
            .filter(|&cost| cost > 0.0 && c.total_units > 0.0)
            .map(|cost| cost * c.total_units);
        c.gross_profit = c.cogs.map(|cogs| c.total_revenue - cogs);

        c
    }
}

#[async_trait]
impl Hydrator<DashboardQuery, StyleCandidate> for MarginHydrator {
    async fn hydrate(
        &self,
        query: &DashboardQuery,
        candidates: &[StyleCandidate],
    ) -> Result<Vec<StyleCandidate>, String> {
        Ok(candidates
            .iter()
            .map(|candidate| self.hydrate_one(query, candidate))
            .collect())
    }

    fn update(&self, candidate: &mut StyleCandidate, hydrated: StyleCandidate) {
        candidate.avg_net_price = hydrated.avg_net_price;
        candidate.baseline_margin_pct = hydrated.baseline_margin_pct;
        candidate.weighted_margin_pct = hydrated.weighted_margin_pct;
        candidate.margin_delta_pct = hydrated.margin_delta_pct;
        candidate.vs_target_pct = hydrated.vs_target_pct;
        candidate.tier = hydrated.tier;
        candidate.cogs = hydrated.cogs;
        candidate.gross_profit = hydrated.gross_profit;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Provenance, ReconciledStyleSeason, Resolved};

    fn candidate(landed: Option<f64>, wholesale: Option<f64>, revenue: f64, units: f64) -> StyleCandidate {
        StyleCandidate {
            reconciled: ReconciledStyleSeason {
                style_number: "A1".into(),
                season: "25SP".into(),
                landed_cost: landed
                    .map(|v| Resolved::from(v, Provenance::Product))
                    .unwrap_or_else(Resolved::none),
                wholesale_price: wholesale
                    .map(|v| Resolved::from(v, Provenance::Product))
                    .unwrap_or_else(Resolved::none),
                ..ReconciledStyleSeason::default()
            },
            total_revenue: revenue,
            total_units: units,
            ..StyleCandidate::default()
        }
    }

    fn hydrator() -> MarginHydrator {
        MarginHydrator::new(&EngineConfig::default())
    }

    #[tokio::test]
    async fn fills_full_margin_picture() {
        let query = DashboardQuery::new("t");
        let input = candidate(Some(20.0), Some(50.0), 4000.0, 100.0);
        let out = &hydrator().hydrate(&query, &[input]).await.unwrap()[0];

        assert!((out.avg_net_price.unwrap() - 40.0).abs() < 1e-9);
        assert!((out.baseline_margin_pct.unwrap() - 60.0).abs() < 1e-9);
        assert!((out.weighted_margin_pct.unwrap() - 50.0).abs() < 1e-9);
        assert!((out.margin_delta_pct.unwrap() - -10.0).abs() < 1e-9);
        // Default target is 48%; realized 50% sits 2pp above.
        assert!((out.vs_target_pct.unwrap() - 2.0).abs() < 1e-9);
        assert_eq!(out.tier, Some(MarginTier::Target));
        assert!((out.cogs.unwrap() - 2000.0).abs() < 1e-9);
        assert!((out.gross_profit.unwrap() - 2000.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn no_cost_means_no_margin() {
        let query = DashboardQuery::new("t");
        let input = candidate(None, Some(50.0), 4000.0, 100.0);
        let out = &hydrator().hydrate(&query, &[input]).await.unwrap()[0];

        assert_eq!(out.baseline_margin_pct, None);
        assert_eq!(out.weighted_margin_pct, None);
        assert_eq!(out.margin_delta_pct, None);
        assert_eq!(out.vs_target_pct, None);
        assert_eq!(out.tier, None);
        assert_eq!(out.cogs, None);
        assert_eq!(out.gross_profit, None);
        // Revenue figures are independent of cost.
        assert!((out.avg_net_price.unwrap() - 40.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn tier_falls_back_to_baseline_without_sales() {
        let query = DashboardQuery::new("t");
        let input = candidate(Some(20.0), Some(50.0), 0.0, 0.0);
        let out = &hydrator().hydrate(&query, &[input]).await.unwrap()[0];

        assert_eq!(out.weighted_margin_pct, None);
        // Baseline 60% >= 55% cut point.
        assert_eq!(out.tier, Some(MarginTier::Excellent));
        assert!((out.vs_target_pct.unwrap() - 12.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn query_target_override_moves_vs_target() {
        let mut query = DashboardQuery::new("t");
        query.filters.target_margin_pct = Some(55.0);
        let input = candidate(Some(20.0), Some(50.0), 4000.0, 100.0);
        let out = &hydrator().hydrate(&query, &[input]).await.unwrap()[0];
        assert!((out.vs_target_pct.unwrap() - -5.0).abs() < 1e-9);
    }
}
