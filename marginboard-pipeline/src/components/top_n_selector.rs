use crate::selector::Selector;
use crate::types::{DashboardQuery, StyleCandidate};

/// Sorts by priority score (descending) and truncates to the query's
/// `top_n`, falling back to a configured default limit when the query
/// does not set one.
pub struct TopNSelector {
    default_limit: Option<usize>,
}

impl TopNSelector {
    pub fn new(default_limit: Option<usize>) -> Self {
        Self { default_limit }
    }

    /// No truncation unless a query asks for it.
    pub fn unbounded() -> Self {
        Self::new(None)
    }
}

impl Selector<DashboardQuery, StyleCandidate> for TopNSelector {
    fn score(&self, candidate: &StyleCandidate) -> f64 {
        candidate.priority_score.unwrap_or(0.0)
    }

    fn size(&self, query: &DashboardQuery) -> Option<usize> {
        query.filters.top_n.or(self.default_limit)
    }
}
