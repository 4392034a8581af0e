//! Raw input records, as handed over by the (external) ingestion layer.
//!
//! These are immutable for the duration of one computation pass. The
//! engine never parses files itself; it receives already-parsed arrays
//! of these types and recomputes every derived view from scratch when
//! they (or the active filters) change.

use serde::{Deserialize, Serialize};

/// One line-list row: the authoritative source for descriptive style
/// attributes. One record per style + season.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub style_number: String,
    pub description: String,
    pub division: String,
    pub category: String,
    pub season: String,
    pub designer: String,
    pub tech_designer: String,
    pub factory: String,
    pub country_of_origin: String,
    /// Line-list cost. Lowest-priority cost source.
    pub cost: f64,
    pub wholesale_price: f64,
    pub msrp: f64,
    pub currency: String,
}

/// One sales transaction or pre-aggregation bucket. Many per style +
/// season. `customer_type` may be comma-joined when the row was
/// pre-aggregated across channels.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SalesRecord {
    pub style_number: String,
    pub season: String,
    pub customer: String,
    /// Raw channel code(s), e.g. "WD" or "WD,BB".
    pub customer_type: String,
    pub sales_rep: String,
    /// Division as recorded at time of sale. May diverge from the
    /// line-list division for the same style.
    pub division_desc: String,
    pub category_desc: String,
    pub units_booked: f64,
    pub revenue: f64,
}

/// Which cost sheet a `CostRecord` came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CostSource {
    LandedCost,
    StandardCost,
}

/// One cost-sheet row. Zero or more per style + season: multiple rows
/// for the same key are different components (colors) of the style and
/// must be aggregated, never overwritten.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CostRecord {
    pub style_number: String,
    pub season: String,
    pub factory: String,
    pub country_of_origin: String,
    pub design_team: String,
    pub developer: String,
    /// Factory-gate cost before freight/duty.
    pub fob_cost: f64,
    /// Fully-loaded per-unit cost including freight/duty.
    pub landed_cost: f64,
    pub suggested_wholesale: f64,
    pub suggested_msrp: f64,
    pub source: CostSource,
}

impl Default for CostRecord {
    fn default() -> Self {
        Self {
            style_number: String::new(),
            season: String::new(),
            factory: String::new(),
            country_of_origin: String::new(),
            design_team: String::new(),
            developer: String::new(),
            fob_cost: 0.0,
            landed_cost: 0.0,
            suggested_wholesale: 0.0,
            suggested_msrp: 0.0,
            source: CostSource::LandedCost,
        }
    }
}
