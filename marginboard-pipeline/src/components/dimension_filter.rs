use async_trait::async_trait;

use marginboard_core::channel::{normalize, ChannelConfig};

use crate::filter::{Filter, FilterResult};
use crate::types::{DashboardQuery, StyleCandidate, MULTIPLE};
use crate::util::eq_ignore_case;

/// Applies the dashboard's dimension filters to the candidate set.
///
/// Single-valued dimensions (season, division, category) match by
/// case-insensitive equality. Multi-valued dimensions (factory, country,
/// design team, developer) match against the full distinct-value set, so
/// filtering on one factory still finds a style whose display value
/// collapsed to "Multiple". Filtering on the literal "Multiple" selects
/// exactly those collapsed styles.
pub struct DimensionFilter {
    channels: ChannelConfig,
}

impl DimensionFilter {
    pub fn new(channels: ChannelConfig) -> Self {
        Self { channels }
    }

    fn multi_match(filter: &str, values: &[String]) -> bool {
        if eq_ignore_case(filter, MULTIPLE) {
            return values.len() > 1;
        }
        values.iter().any(|v| eq_ignore_case(v, filter))
    }

    fn matches(&self, query: &DashboardQuery, candidate: &StyleCandidate) -> bool {
        let f = &query.filters;
        let r = &candidate.reconciled;

        if let Some(season) = &f.season {
            if !eq_ignore_case(&r.season, season) {
                return false;
            }
        }
        if let Some(division) = &f.division {
            match &r.division {
                Some(v) if eq_ignore_case(v, division) => {}
                _ => return false,
            }
        }
        if let Some(category) = &f.category {
            match &r.category {
                Some(v) if eq_ignore_case(v, category) => {}
                _ => return false,
            }
        }
        if let Some(customer) = &f.customer {
            if !candidate.customers.iter().any(|c| eq_ignore_case(c, customer)) {
                return false;
            }
        }
        if let Some(raw) = &f.customer_type {
            // The filter value goes through the same normalization as the
            // sales rows, so filtering on "DTC" finds "WD" revenue too.
            let wanted = normalize(raw, &self.channels).primary;
            if !candidate.channels.iter().any(|s| s.channel == wanted) {
                return false;
            }
        }
        if let Some(factory) = &f.factory {
            if !Self::multi_match(factory, &r.factories) {
                return false;
            }
        }
        if let Some(country) = &f.country {
            if !Self::multi_match(country, &r.countries) {
                return false;
            }
        }
        if let Some(team) = &f.design_team {
            if !Self::multi_match(team, &r.design_teams) {
                return false;
            }
        }
        if let Some(developer) = &f.developer {
            if !Self::multi_match(developer, &r.developers) {
                return false;
            }
        }
        if let Some(needle) = &f.style_number_search {
            let haystack = r.style_number.to_uppercase();
            if !haystack.contains(&needle.to_uppercase()) {
                return false;
            }
        }
        true
    }
}

#[async_trait]
impl Filter<DashboardQuery, StyleCandidate> for DimensionFilter {
    fn enable(&self, query: &DashboardQuery) -> bool {
        let f = &query.filters;
        f.season.is_some()
            || f.division.is_some()
            || f.category.is_some()
            || f.customer_type.is_some()
            || f.customer.is_some()
            || f.factory.is_some()
            || f.country.is_some()
            || f.design_team.is_some()
            || f.developer.is_some()
            || f.style_number_search.is_some()
    }

    async fn filter(
        &self,
        query: &DashboardQuery,
        candidates: Vec<StyleCandidate>,
    ) -> Result<FilterResult<StyleCandidate>, String> {
        let (kept, removed) = candidates
            .into_iter()
            .partition(|candidate| self.matches(query, candidate));
        Ok(FilterResult { kept, removed })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use marginboard_core::channel::CanonicalChannel;
    use crate::types::{ChannelSlice, ReconciledStyleSeason};

    fn candidate(style: &str, season: &str) -> StyleCandidate {
        StyleCandidate {
            reconciled: ReconciledStyleSeason {
                style_number: style.into(),
                season: season.into(),
                division: Some("Mens".into()),
                factories: vec!["Alpha Works".into(), "Beta Mills".into()],
                ..ReconciledStyleSeason::default()
            },
            customers: vec!["Summit Outfitters".into()],
            channels: vec![ChannelSlice {
                channel: CanonicalChannel::KuhlStores,
                revenue: 1000.0,
                units: 10.0,
            }],
            ..StyleCandidate::default()
        }
    }

    fn filter() -> DimensionFilter {
        DimensionFilter::new(ChannelConfig::default())
    }

    fn query_with(mutate: impl FnOnce(&mut DashboardQuery)) -> DashboardQuery {
        let mut query = DashboardQuery::new("t");
        mutate(&mut query);
        query
    }

    #[test]
    fn disabled_when_no_filters_active() {
        assert!(!filter().enable(&DashboardQuery::new("t")));
        assert!(filter().enable(&query_with(|q| q.filters.season = Some("25SP".into()))));
    }

    #[tokio::test]
    async fn season_matches_case_insensitively() {
        let query = query_with(|q| q.filters.season = Some("25sp".into()));
        let result = filter()
            .filter(&query, vec![candidate("A1", "25SP"), candidate("B2", "24FA")])
            .await
            .unwrap();
        assert_eq!(result.kept.len(), 1);
        assert_eq!(result.kept[0].style_number(), "A1");
        assert_eq!(result.removed.len(), 1);
    }

    #[tokio::test]
    async fn factory_filter_matches_the_value_set() {
        // Display value would be "Multiple"; the individual member still
        // has to match.
        let query = query_with(|q| q.filters.factory = Some("Beta Mills".into()));
        let result = filter().filter(&query, vec![candidate("A1", "25SP")]).await.unwrap();
        assert_eq!(result.kept.len(), 1);
    }

    #[tokio::test]
    async fn multiple_literal_selects_collapsed_styles() {
        let query = query_with(|q| q.filters.factory = Some("Multiple".into()));
        let mut single = candidate("B2", "25SP");
        single.reconciled.factories = vec!["Alpha Works".into()];
        let result = filter()
            .filter(&query, vec![candidate("A1", "25SP"), single])
            .await
            .unwrap();
        assert_eq!(result.kept.len(), 1);
        assert_eq!(result.kept[0].style_number(), "A1");
    }

    #[tokio::test]
    async fn customer_type_filter_normalizes_before_matching() {
        // Candidate revenue sits under KUHL_STORES; a filter on the old
        // "DTC" code must still find it.
        let query = query_with(|q| q.filters.customer_type = Some("DTC".into()));
        let result = filter().filter(&query, vec![candidate("A1", "25SP")]).await.unwrap();
        assert_eq!(result.kept.len(), 1);

        let query = query_with(|q| q.filters.customer_type = Some("BB".into()));
        let result = filter().filter(&query, vec![candidate("A1", "25SP")]).await.unwrap();
        assert!(result.kept.is_empty());
    }

    #[tokio::test]
    async fn style_search_is_substring_and_case_insensitive() {
        let query = query_with(|q| q.filters.style_number_search = Some("a1".into()));
        let result = filter()
            .filter(&query, vec![candidate("KA1005", "25SP"), candidate("KB2000", "25SP")])
            .await
            .unwrap();
        assert_eq!(result.kept.len(), 1);
        assert_eq!(result.kept[0].style_number(), "KA1005");
    }

    #[tokio::test]
    async fn filters_combine_conjunctively() {
        let query = query_with(|q| {
            q.filters.season = Some("25SP".into());
            q.filters.division = Some("Womens".into());
        });
        let result = filter().filter(&query, vec![candidate("A1", "25SP")]).await.unwrap();
        assert!(result.kept.is_empty());
    }
}
