use async_trait::async_trait;

use marginboard_core::config::EngineConfig;

use crate::query_hydrator::QueryHydrator;
use crate::types::DashboardQuery;

/// Fills query-level defaults: the configured target margin when the
/// caller did not override it, and a trimmed style search term so
/// downstream matching never sees stray whitespace.
pub struct TargetDefaultsHydrator {
    target_margin_pct: f64,
}

impl TargetDefaultsHydrator {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            target_margin_pct: config.target_margin_pct,
        }
    }
}

#[async_trait]
impl QueryHydrator<DashboardQuery> for TargetDefaultsHydrator {
    async fn hydrate(&self, query: &DashboardQuery) -> Result<DashboardQuery, String> {
        let mut hydrated = query.clone();

        if hydrated.filters.target_margin_pct.is_none() {
            hydrated.filters.target_margin_pct = Some(self.target_margin_pct);
        }

        // An all-whitespace search term means "no search", not "match
        // styles containing spaces".
        hydrated.filters.style_number_search = hydrated
            .filters
            .style_number_search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        Ok(hydrated)
    }

    fn update(&self, query: &mut DashboardQuery, hydrated: DashboardQuery) {
        query.filters.target_margin_pct = hydrated.filters.target_margin_pct;
        query.filters.style_number_search = hydrated.filters.style_number_search;
    }
}
