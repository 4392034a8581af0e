//! Sales rollups: per-style channel mix and global channel metrics.
//!
//! A pre-aggregated sales row may carry a comma-joined customer type
//! ("WD,BB"). Such a mixed row is split evenly across its distinct
//! resolved channels, with the last channel taking the float remainder,
//! so summing across channels reproduces the row total exactly — never
//! double-counted, never dropped.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use marginboard_core::channel::{normalize, CanonicalChannel, ChannelConfig};

use crate::records::SalesRecord;
use crate::types::{ChannelMetric, ChannelSlice};

/// Split one row's revenue and units across its resolved channels.
///
/// Equal shares; the last channel absorbs the remainder so the split
/// sums back to the input exactly.
fn split_row(
    revenue: f64,
    units: f64,
    channels: &[CanonicalChannel],
) -> Vec<(CanonicalChannel, f64, f64)> {
    let n = channels.len().max(1) as f64;
    let revenue_share = revenue / n;
    let units_share = units / n;
    let last = channels.len().saturating_sub(1);

    channels
        .iter()
        .enumerate()
        .map(|(i, &channel)| {
            if i == last {
                (
                    channel,
                    revenue - revenue_share * last as f64,
                    units - units_share * last as f64,
                )
            } else {
                (channel, revenue_share, units_share)
            }
        })
        .collect()
}

/// Sales totals for one (style, season) key.
#[derive(Clone, Debug, Default)]
pub struct StyleSalesRollup {
    pub total_revenue: f64,
    pub total_units: f64,
    pub customers: BTreeSet<String>,
    channels: BTreeMap<CanonicalChannel, (f64, f64)>,
}

impl StyleSalesRollup {
    /// Per-channel slices in canonical channel order. Only channels that
    /// actually received revenue or units appear; zero-fill belongs to
    /// the aggregation engine, not the per-style view.
    pub fn channel_slices(&self) -> Vec<ChannelSlice> {
        CanonicalChannel::ALL
            .iter()
            .filter_map(|channel| {
                self.channels.get(channel).map(|&(revenue, units)| ChannelSlice {
                    channel: *channel,
                    revenue,
                    units,
                })
            })
            .collect()
    }
}

/// Group sales rows by (style, season) and accumulate channel-split
/// revenue, units, and the distinct customer set.
pub fn rollup_by_style(
    sales: &[SalesRecord],
    config: &ChannelConfig,
) -> BTreeMap<(String, String), StyleSalesRollup> {
    let mut rollups: BTreeMap<(String, String), StyleSalesRollup> = BTreeMap::new();

    for record in sales {
        let resolution = normalize(&record.customer_type, config);
        let rollup = rollups
            .entry((record.style_number.clone(), record.season.clone()))
            .or_default();

        rollup.total_revenue += record.revenue;
        rollup.total_units += record.units_booked;
        if !record.customer.trim().is_empty() {
            rollup.customers.insert(record.customer.trim().to_string());
        }

        for (channel, revenue, units) in
            split_row(record.revenue, record.units_booked, &resolution.channels)
        {
            let slot = rollup.channels.entry(channel).or_insert((0.0, 0.0));
            slot.0 += revenue;
            slot.1 += units;
        }
    }

    rollups
}

/// Global channel metrics, zero-filled over all six canonical channels.
///
/// Margin is revenue-weighted over the rows whose style has a resolved
/// cost; rows without a cost still contribute revenue and units but
/// cannot contribute to margin.
pub fn channel_metrics(
    sales: &[SalesRecord],
    cost_lookup: &HashMap<String, f64>,
    config: &ChannelConfig,
) -> Vec<ChannelMetric> {
    #[derive(Default)]
    struct Acc {
        revenue: f64,
        units: f64,
        costed_revenue: f64,
        cogs: f64,
    }

    let mut accs: BTreeMap<CanonicalChannel, Acc> = CanonicalChannel::ALL
        .iter()
        .map(|&channel| (channel, Acc::default()))
        .collect();

    for record in sales {
        let resolution = normalize(&record.customer_type, config);
        let unit_cost = cost_lookup.get(&record.style_number).copied();

        for (channel, revenue, units) in
            split_row(record.revenue, record.units_booked, &resolution.channels)
        {
            let acc = accs.entry(channel).or_default();
            acc.revenue += revenue;
            acc.units += units;
            if let Some(cost) = unit_cost {
                acc.costed_revenue += revenue;
                acc.cogs += units * cost;
            }
        }
    }

    CanonicalChannel::ALL
        .iter()
        .map(|&channel| {
            let acc = &accs[&channel];
            let avg_net_price = if acc.units > 0.0 {
                Some(acc.revenue / acc.units)
            } else {
                None
            };
            let margin_pct = if acc.costed_revenue > 0.0 {
                Some((acc.costed_revenue - acc.cogs) / acc.costed_revenue * 100.0)
            } else {
                None
            };
            ChannelMetric {
                channel,
                revenue: acc.revenue,
                units: acc.units,
                avg_net_price,
                margin_pct,
            }
        })
        .collect()
}
