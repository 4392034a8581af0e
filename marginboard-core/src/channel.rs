//! Canonical channel set and raw customer-type normalization.
//!
//! Sales exports carry free-form customer-type codes, sometimes
//! comma-joined when a row was pre-aggregated across channels. This
//! module maps them onto a fixed set of six canonical channels so that
//! everything downstream groups consistently. Unrecognized codes fold
//! into a configurable fallback channel instead of erroring: revenue
//! totals reconciling matters more than strict validation here.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The fixed canonical channel set. Exactly six; aggregation zero-fills
/// over `ALL` so channel views always have a stable shape.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CanonicalChannel {
    Wholesale,
    /// Company-owned retail. Both the `WD` (warehouse direct) and `DTC`
    /// codes fold here — they are the same channel in two export eras.
    KuhlStores,
    BigBox,
    Ecommerce,
    ProSales,
    International,
}

impl CanonicalChannel {
    pub const ALL: [CanonicalChannel; 6] = [
        CanonicalChannel::Wholesale,
        CanonicalChannel::KuhlStores,
        CanonicalChannel::BigBox,
        CanonicalChannel::Ecommerce,
        CanonicalChannel::ProSales,
        CanonicalChannel::International,
    ];

    /// Stable wire code. Part of the export contract — do not rename.
    pub fn code(&self) -> &'static str {
        match self {
            CanonicalChannel::Wholesale => "WHOLESALE",
            CanonicalChannel::KuhlStores => "KUHL_STORES",
            CanonicalChannel::BigBox => "BB",
            CanonicalChannel::Ecommerce => "ECOMM",
            CanonicalChannel::ProSales => "PRO_SALES",
            CanonicalChannel::International => "INTERNATIONAL",
        }
    }

    /// Human-readable label for channel cards.
    pub fn label(&self) -> &'static str {
        match self {
            CanonicalChannel::Wholesale => "Wholesale",
            CanonicalChannel::KuhlStores => "KUHL Stores",
            CanonicalChannel::BigBox => "Big Box",
            CanonicalChannel::Ecommerce => "E-Commerce",
            CanonicalChannel::ProSales => "Pro Sales",
            CanonicalChannel::International => "International",
        }
    }

    /// Map one already-trimmed, uppercased raw code. Canonical codes map
    /// to themselves so normalization is idempotent.
    fn from_raw(code: &str) -> Option<CanonicalChannel> {
        match code {
            "WS" | "WHSL" | "WHOLESALE" => Some(CanonicalChannel::Wholesale),
            "WD" | "DTC" | "KUHL_STORES" => Some(CanonicalChannel::KuhlStores),
            "BB" | "BIG_BOX" => Some(CanonicalChannel::BigBox),
            "EC" | "ECOM" | "ECOMM" => Some(CanonicalChannel::Ecommerce),
            "PRO" | "PS" | "PRO_SALES" => Some(CanonicalChannel::ProSales),
            "INT" | "INTL" | "INTERNATIONAL" => Some(CanonicalChannel::International),
            _ => None,
        }
    }
}

impl fmt::Display for CanonicalChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Channel normalization settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChannelConfig {
    /// Channel that absorbs unrecognized or empty customer-type codes.
    /// Defaults to Wholesale for numeric parity with historical reports;
    /// deployments that want an explicit catch-all can repoint this.
    pub fallback: CanonicalChannel,
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self {
            fallback: CanonicalChannel::Wholesale,
        }
    }
}

/// Result of normalizing one raw customer-type value.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ChannelResolution {
    /// First resolved channel — single-channel attribution uses this.
    pub primary: CanonicalChannel,
    /// Distinct resolved channels in first-seen order. Summation over a
    /// mixed row must distribute across all of these, never just `primary`.
    pub channels: Vec<CanonicalChannel>,
    /// True when the input resolved to more than one distinct channel.
    pub is_mixed: bool,
    /// The cleaned (trimmed, uppercased) raw codes that contributed.
    pub raw_codes: Vec<String>,
}

/// Normalize a raw customer-type value, possibly comma-joined.
///
/// Splits on comma, trims, uppercases. Each piece resolves to a
/// canonical channel, unrecognized pieces to `config.fallback`. Empty
/// input resolves to the fallback channel with no raw codes, so callers
/// never have to handle a channel-less row.
pub fn normalize(raw: &str, config: &ChannelConfig) -> ChannelResolution {
    let mut raw_codes = Vec::new();
    let mut channels: Vec<CanonicalChannel> = Vec::new();

    for piece in raw.split(',') {
        let code = piece.trim().to_uppercase();
        if code.is_empty() {
            continue;
        }
        let channel = CanonicalChannel::from_raw(&code).unwrap_or(config.fallback);
        raw_codes.push(code);
        if !channels.contains(&channel) {
            channels.push(channel);
        }
    }

    if channels.is_empty() {
        channels.push(config.fallback);
    }

    let primary = channels[0];
    let is_mixed = channels.len() > 1;
    ChannelResolution {
        primary,
        channels,
        is_mixed,
        raw_codes,
    }
}
