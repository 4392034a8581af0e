//! Derived record types flowing through the pipeline, plus the query
//! object the dashboard submits.
//!
//! Everything here is plain serializable data with no behavior attached;
//! the display layer consumes these as-is.

use serde::Serialize;

use marginboard_core::channel::CanonicalChannel;
use marginboard_core::margin::MarginTier;

use crate::candidate_pipeline::HasRequestId;

// ---------------------------------------------------------------------------
// Query types
// ---------------------------------------------------------------------------

/// Active dashboard filters and per-query configuration. All fields are
/// optional; `None` means "no restriction".
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct FilterConfig {
    pub season: Option<String>,
    pub division: Option<String>,
    pub category: Option<String>,
    /// Raw customer-type code; normalized to a canonical channel before
    /// matching.
    pub customer_type: Option<String>,
    pub customer: Option<String>,
    pub factory: Option<String>,
    pub country: Option<String>,
    pub design_team: Option<String>,
    pub developer: Option<String>,
    /// Case-insensitive substring match on the style number.
    pub style_number_search: Option<String>,
    /// Overrides the engine's configured target margin for this query.
    pub target_margin_pct: Option<f64>,
    /// Truncate the selected set to this many candidates.
    pub top_n: Option<usize>,
}

/// Query from the dashboard. Recomputed results are keyed off this plus
/// the loaded record arrays — nothing else.
#[derive(Clone, Debug, Serialize)]
pub struct DashboardQuery {
    pub request_id: String,
    pub filters: FilterConfig,
}

impl DashboardQuery {
    pub fn new(request_id: impl Into<String>) -> Self {
        Self {
            request_id: request_id.into(),
            filters: FilterConfig::default(),
        }
    }
}

impl HasRequestId for DashboardQuery {
    fn request_id(&self) -> &str {
        &self.request_id
    }
}

// ---------------------------------------------------------------------------
// Provenance
// ---------------------------------------------------------------------------

/// Which source supplied a resolved field's value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Provenance {
    LandedCost,
    StandardCost,
    Product,
    Sales,
    #[default]
    None,
}

impl Provenance {
    /// Trust ranking: landed cost sheet > standard cost > line list >
    /// sales > nothing. Used for the overall cost tag on a reconciled
    /// record; rendering trust indicators depends on it.
    pub fn stronger(self, other: Provenance) -> Provenance {
        // The derived Ord already ranks variants in declaration order.
        self.min(other)
    }
}

/// A resolved field value plus the source that supplied it. A field no
/// source could fill is `value: None` with `source: Provenance::None`.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Resolved<T> {
    pub value: Option<T>,
    pub source: Provenance,
}

impl<T> Resolved<T> {
    pub fn none() -> Self {
        Self {
            value: None,
            source: Provenance::None,
        }
    }

    pub fn from(value: T, source: Provenance) -> Self {
        Self {
            value: Some(value),
            source,
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.value.is_some()
    }
}

// ---------------------------------------------------------------------------
// Reconciled records
// ---------------------------------------------------------------------------

/// Sentinel reported when a multi-valued attribute accumulated more than
/// one distinct value (e.g. two colors of one style cut at different
/// factories). First-class: filters and displays treat it as a value.
pub const MULTIPLE: &str = "Multiple";

/// One reconciled (style, season) record with per-field provenance.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ReconciledStyleSeason {
    pub style_number: String,
    pub season: String,
    pub description: Option<String>,
    pub division: Option<String>,
    pub category: Option<String>,

    /// Projected display values: single member, `MULTIPLE`, or absent.
    pub factory: Resolved<String>,
    pub country: Resolved<String>,
    pub design_team: Resolved<String>,
    pub developer: Resolved<String>,

    /// Full distinct-value sets behind the projections, sorted. Filters
    /// match against these so multi-factory styles stay findable.
    pub factories: Vec<String>,
    pub countries: Vec<String>,
    pub design_teams: Vec<String>,
    pub developers: Vec<String>,

    pub fob_cost: Resolved<f64>,
    pub landed_cost: Resolved<f64>,
    pub wholesale_price: Resolved<f64>,
    pub msrp: Resolved<f64>,

    /// Overall cost trust tag: landed_cost > standard_cost > product.
    /// Records synthesized from sales rows alone carry `sales`; `none`
    /// means a product or cost row exists but supplied no cost.
    pub cost_provenance: Provenance,
}

impl ReconciledStyleSeason {
    /// Display key, `style-season`. For machine grouping use the
    /// aggregation engine's composite keys instead.
    pub fn key(&self) -> String {
        format!("{}-{}", self.style_number, self.season)
    }
}

// ---------------------------------------------------------------------------
// Candidate and summary types
// ---------------------------------------------------------------------------

/// Revenue and units attributed to one channel for one candidate.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ChannelSlice {
    pub channel: CanonicalChannel,
    pub revenue: f64,
    pub units: f64,
}

/// The unit of work flowing through the pipeline: one (style, season)
/// with reconciled fields, its sales rollup, and the margins the margin
/// hydrator fills in.
#[derive(Clone, Debug, Default, Serialize)]
pub struct StyleCandidate {
    pub reconciled: ReconciledStyleSeason,

    /// Distinct customers that bought this style, sorted.
    pub customers: Vec<String>,
    pub total_revenue: f64,
    pub total_units: f64,
    /// Per-channel attribution; mixed rows are already split.
    pub channels: Vec<ChannelSlice>,

    // Populated by the margin hydrator.
    pub avg_net_price: Option<f64>,
    pub baseline_margin_pct: Option<f64>,
    pub weighted_margin_pct: Option<f64>,
    pub margin_delta_pct: Option<f64>,
    pub vs_target_pct: Option<f64>,
    pub tier: Option<MarginTier>,
    pub cogs: Option<f64>,
    pub gross_profit: Option<f64>,

    // Populated by scorers.
    pub priority_score: Option<f64>,
}

impl StyleCandidate {
    pub fn style_number(&self) -> &str {
        &self.reconciled.style_number
    }

    pub fn season(&self) -> &str {
        &self.reconciled.season
    }

    /// Flatten into the per-style margin summary the dashboard tables
    /// consume.
    pub fn style_margin(&self) -> StyleMargin {
        StyleMargin {
            style_number: self.reconciled.style_number.clone(),
            season: self.reconciled.season.clone(),
            landed_cost: self.reconciled.landed_cost.value,
            total_revenue: self.total_revenue,
            total_units: self.total_units,
            cogs: self.cogs,
            gross_profit: self.gross_profit,
            margin_pct: self.weighted_margin_pct,
            vs_target_pct: self.vs_target_pct,
        }
    }
}

/// Per-style profitability summary.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct StyleMargin {
    pub style_number: String,
    pub season: String,
    pub landed_cost: Option<f64>,
    pub total_revenue: f64,
    pub total_units: f64,
    /// Units x landed cost; absent when no cost was resolved.
    pub cogs: Option<f64>,
    pub gross_profit: Option<f64>,
    /// Gross profit over revenue; absent when undefined.
    pub margin_pct: Option<f64>,
    pub vs_target_pct: Option<f64>,
}

/// One canonical channel's totals. Always produced for all six channels,
/// zero-filled, so channel cards have a stable shape.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ChannelMetric {
    pub channel: CanonicalChannel,
    pub revenue: f64,
    pub units: f64,
    pub avg_net_price: Option<f64>,
    /// Revenue-weighted margin over the rows with a known cost.
    pub margin_pct: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provenance_stronger_follows_trust_ranking() {
        assert_eq!(
            Provenance::StandardCost.stronger(Provenance::LandedCost),
            Provenance::LandedCost
        );
        assert_eq!(
            Provenance::Product.stronger(Provenance::StandardCost),
            Provenance::StandardCost
        );
        assert_eq!(
            Provenance::None.stronger(Provenance::Sales),
            Provenance::Sales
        );
    }

    #[test]
    fn provenance_serializes_as_snake_case_tags() {
        assert_eq!(
            serde_json::to_string(&Provenance::LandedCost).unwrap(),
            "\"landed_cost\""
        );
        assert_eq!(
            serde_json::to_string(&Provenance::None).unwrap(),
            "\"none\""
        );
    }

    #[test]
    fn unresolved_field_is_absent_with_provenance_none() {
        let field: Resolved<f64> = Resolved::none();
        assert!(!field.is_resolved());
        assert_eq!(field.source, Provenance::None);
    }

    #[test]
    fn display_key_joins_style_and_season() {
        let record = ReconciledStyleSeason {
            style_number: "A1".into(),
            season: "25SP".into(),
            ..ReconciledStyleSeason::default()
        };
        assert_eq!(record.key(), "A1-25SP");
    }
}
