//! Margin formulas and tier classification.
//!
//! Two margin definitions exist side by side and are never conflated:
//!
//! - **Baseline margin** — list wholesale price vs. landed cost. What a
//!   style earns if it sells at list.
//! - **Weighted ("true") margin** — the actual average net price
//!   realized across channels vs. landed cost. What the style actually
//!   earned given the channel mix.
//!
//! Every division is guarded: a missing or non-positive input yields
//! `None` (an explicit undefined state), never 0%, NaN, or infinity.
//! Apparel data is chronically incomplete — a style can have sales
//! before its cost sheet exists — so undefined margins are a normal
//! state, not an error.

use serde::{Deserialize, Serialize};

use crate::config::TierThresholds;

/// Gross margin of `price` over `cost`, in percent.
///
/// Defined only when both inputs are positive.
pub fn margin_pct(price: f64, cost: f64) -> Option<f64> {
    if price > 0.0 && cost > 0.0 {
        Some((price - cost) / price * 100.0)
    } else {
        None
    }
}

/// Baseline margin: list wholesale price vs. landed cost.
pub fn baseline_margin(wholesale_price: f64, landed_cost: f64) -> Option<f64> {
    margin_pct(wholesale_price, landed_cost)
}

/// Average realized net price: total revenue over total units sold.
/// Undefined when no units were sold.
pub fn avg_net_price(revenue: f64, units: f64) -> Option<f64> {
    if units > 0.0 {
        Some(revenue / units)
    } else {
        None
    }
}

/// Weighted ("true") margin: channel-mix-weighted average net price vs.
/// landed cost.
pub fn weighted_margin(revenue: f64, units: f64, landed_cost: f64) -> Option<f64> {
    avg_net_price(revenue, units).and_then(|net| margin_pct(net, landed_cost))
}

/// Weighted minus baseline, in percentage points. Negative values flag
/// styles selling materially below list price.
pub fn margin_delta(weighted: Option<f64>, baseline: Option<f64>) -> Option<f64> {
    Some(weighted? - baseline?)
}

/// Distance from the configured target margin, in percentage points.
/// Purely informational; never clamped.
pub fn vs_target(margin_pct: f64, target_pct: f64) -> f64 {
    margin_pct - target_pct
}

/// Margin health tier. Boundary values belong to the higher tier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MarginTier {
    Excellent,
    Target,
    Watch,
    Problem,
}

impl MarginTier {
    pub const ALL: [MarginTier; 4] = [
        MarginTier::Excellent,
        MarginTier::Target,
        MarginTier::Watch,
        MarginTier::Problem,
    ];

    /// Classify a margin percentage against the configured cut points.
    pub fn classify(margin_pct: f64, thresholds: &TierThresholds) -> MarginTier {
        if margin_pct >= thresholds.excellent {
            MarginTier::Excellent
        } else if margin_pct >= thresholds.target {
            MarginTier::Target
        } else if margin_pct >= thresholds.watch {
            MarginTier::Watch
        } else {
            MarginTier::Problem
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MarginTier::Excellent => "Excellent",
            MarginTier::Target => "Target",
            MarginTier::Watch => "Watch",
            MarginTier::Problem => "Problem",
        }
    }
}

/// Count margins per tier, zero-filled so the health distribution always
/// has all four tiers in display order.
pub fn tier_distribution(
    margins: impl IntoIterator<Item = f64>,
    thresholds: &TierThresholds,
) -> Vec<(MarginTier, usize)> {
    let mut counts = [0usize; 4];
    for margin in margins {
        let tier = MarginTier::classify(margin, thresholds);
        let slot = MarginTier::ALL.iter().position(|t| *t == tier).unwrap_or(3);
        counts[slot] += 1;
    }
    MarginTier::ALL.iter().copied().zip(counts).collect()
}
