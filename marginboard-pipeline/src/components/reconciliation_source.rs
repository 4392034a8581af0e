use async_trait::async_trait;
use std::collections::{BTreeMap, BTreeSet};

use marginboard_core::channel::ChannelConfig;

use crate::channel_rollup::{rollup_by_style, StyleSalesRollup};
use crate::reconcile::reconcile;
use crate::records::{CostRecord, ProductRecord, SalesRecord};
use crate::source::Source;
use crate::types::{DashboardQuery, Provenance, ReconciledStyleSeason, StyleCandidate};

/// Produces one candidate per (style, season) by joining the reconciled
/// cost/product view with the sales rollup.
///
/// Keys that appear only in sales still become candidates: the dashboard
/// must show revenue for styles whose cost sheet or line-list row has
/// not arrived yet. Such candidates carry `Provenance::Sales` as their
/// record source tag and an unresolved cost.
pub struct ReconciliationSource {
    products: Vec<ProductRecord>,
    sales: Vec<SalesRecord>,
    costs: Vec<CostRecord>,
    channels: ChannelConfig,
}

impl ReconciliationSource {
    pub fn new(
        products: Vec<ProductRecord>,
        sales: Vec<SalesRecord>,
        costs: Vec<CostRecord>,
        channels: ChannelConfig,
    ) -> Self {
        Self {
            products,
            sales,
            costs,
            channels,
        }
    }

    /// First non-empty division/category description per sales key,
    /// grouped in one pass. Used to label keys that exist only in the
    /// sales data.
    fn sales_descriptions(&self) -> BTreeMap<(String, String), (Option<String>, Option<String>)> {
        let mut map: BTreeMap<(String, String), (Option<String>, Option<String>)> = BTreeMap::new();
        for row in &self.sales {
            let slot = map
                .entry((row.style_number.clone(), row.season.clone()))
                .or_default();
            if slot.0.is_none() && !row.division_desc.trim().is_empty() {
                slot.0 = Some(row.division_desc.trim().to_string());
            }
            if slot.1.is_none() && !row.category_desc.trim().is_empty() {
                slot.1 = Some(row.category_desc.trim().to_string());
            }
        }
        map
    }

    fn candidate(reconciled: ReconciledStyleSeason, rollup: Option<&StyleSalesRollup>) -> StyleCandidate {
        match rollup {
            Some(rollup) => StyleCandidate {
                reconciled,
                customers: rollup.customers.iter().cloned().collect(),
                total_revenue: rollup.total_revenue,
                total_units: rollup.total_units,
                channels: rollup.channel_slices(),
                ..StyleCandidate::default()
            },
            None => StyleCandidate {
                reconciled,
                ..StyleCandidate::default()
            },
        }
    }
}

#[async_trait]
impl Source<DashboardQuery, StyleCandidate> for ReconciliationSource {
    fn enable(&self, _query: &DashboardQuery) -> bool {
        !(self.products.is_empty() && self.sales.is_empty() && self.costs.is_empty())
    }

    async fn get_candidates(&self, _query: &DashboardQuery) -> Result<Vec<StyleCandidate>, String> {
        let reconciled = reconcile(&self.costs, &self.products);
        let rollups: BTreeMap<(String, String), StyleSalesRollup> =
            rollup_by_style(&self.sales, &self.channels);

        let mut candidates = Vec::with_capacity(reconciled.len());
        let mut seen: BTreeSet<(String, String)> = BTreeSet::new();

        for record in reconciled {
            let key = (record.style_number.clone(), record.season.clone());
            let rollup = rollups.get(&key);
            seen.insert(key);
            candidates.push(Self::candidate(record, rollup));
        }

        // Sales-only keys, in the rollup map's deterministic order.
        let descriptions = self.sales_descriptions();
        for (key, rollup) in &rollups {
            if seen.contains(key) {
                continue;
            }
            let (division, category) = descriptions.get(key).cloned().unwrap_or_default();
            let record = ReconciledStyleSeason {
                style_number: key.0.clone(),
                season: key.1.clone(),
                division,
                category,
                cost_provenance: Provenance::Sales,
                ..ReconciledStyleSeason::default()
            };
            candidates.push(Self::candidate(record, Some(rollup)));
        }

        Ok(candidates)
    }
}
