//! Pure domain math for the apparel margin dashboard.
//!
//! Everything here is synchronous, allocation-light, and free of I/O:
//! the canonical channel set and normalizer, the two margin definitions
//! (baseline vs. weighted), tier classification, and the configuration
//! struct the engine is parameterized by. The pipeline crate builds on
//! these primitives; the display layer consumes their outputs.

pub mod channel;
pub mod config;
pub mod margin;

pub use channel::{normalize, CanonicalChannel, ChannelConfig, ChannelResolution};
pub use config::{EngineConfig, TierThresholds, DEFAULT_TARGET_MARGIN_PCT};
pub use margin::{
    avg_net_price, baseline_margin, margin_delta, margin_pct, tier_distribution, vs_target,
    weighted_margin, MarginTier,
};
