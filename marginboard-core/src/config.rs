//! Engine configuration.
//!
//! Everything tunable — the target margin, tier cut points, and the
//! channel fallback — lives in one passed-in struct so the engine stays
//! reentrant and testable with varying targets. No module-level mutable
//! state anywhere.

use serde::{Deserialize, Serialize};

use crate::channel::ChannelConfig;

/// Company-wide target gross margin, in percent.
pub const DEFAULT_TARGET_MARGIN_PCT: f64 = 48.0;

/// Margin tier cut points, in percent. Each value is an inclusive lower
/// bound: a margin exactly on a boundary belongs to the higher tier.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TierThresholds {
    /// At or above this margin a style is Excellent.
    pub excellent: f64,
    /// At or above this margin (and below `excellent`) a style is on Target.
    pub target: f64,
    /// At or above this margin (and below `target`) a style is on Watch.
    /// Below it, the style is a Problem.
    pub watch: f64,
}

impl Default for TierThresholds {
    fn default() -> Self {
        Self {
            excellent: 55.0,
            target: 45.0,
            watch: 35.0,
        }
    }
}

/// Top-level engine configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Target margin used for vs-target deltas, in percent.
    pub target_margin_pct: f64,
    /// Margin tier cut points.
    pub tiers: TierThresholds,
    /// Channel normalization settings.
    pub channels: ChannelConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            target_margin_pct: DEFAULT_TARGET_MARGIN_PCT,
            tiers: TierThresholds::default(),
            channels: ChannelConfig::default(),
        }
    }
}
